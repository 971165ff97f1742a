use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog document is not valid: {0}")]
    Parse(String),

    #[error("catalog has no age groups")]
    Empty,

    #[error("age key {key:?} is not an integer")]
    InvalidAgeKey { key: String },

    #[error("age {age} appears more than once")]
    DuplicateAge { age: u32 },

    #[error("age group {key:?} has no skills")]
    EmptyGroup { key: String },

    #[error("skill name cannot be empty (age group {key:?})")]
    EmptySkillName { key: String },

    #[error("skill {skill:?} appears more than once in age group {key:?}")]
    DuplicateSkill { key: String, skill: String },
}

//
// ─── SKILLS ────────────────────────────────────────────────────────────────────
//

/// A single developmental skill. The name doubles as the lookup key inside its group.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Skill {
    #[serde(rename = "skill")]
    name: String,
    #[serde(default)]
    description: String,
}

impl Skill {
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// An ordered bucket of skills for one developmental age (a "chapter").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgeGroup {
    age: u32,
    key: String,
    skills: Vec<Skill>,
}

impl AgeGroup {
    /// Build a group from its raw age key.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the key is not an integer, the group is empty,
    /// or two skills share a name.
    pub fn new(key: impl Into<String>, skills: Vec<Skill>) -> Result<Self, CatalogError> {
        let key = key.into();
        let age = key
            .trim()
            .parse::<u32>()
            .map_err(|_| CatalogError::InvalidAgeKey { key: key.clone() })?;

        if skills.is_empty() {
            return Err(CatalogError::EmptyGroup { key });
        }

        let mut seen = HashSet::with_capacity(skills.len());
        for skill in &skills {
            if skill.name.trim().is_empty() {
                return Err(CatalogError::EmptySkillName { key });
            }
            if !seen.insert(skill.name.as_str()) {
                return Err(CatalogError::DuplicateSkill {
                    key,
                    skill: skill.name.clone(),
                });
            }
        }

        Ok(Self { age, key, skills })
    }

    #[must_use]
    pub fn age(&self) -> u32 {
        self.age
    }

    /// The key as written in the catalog; progress records are keyed by it.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    #[must_use]
    pub fn skill(&self, index: usize) -> Option<&Skill> {
        self.skills.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

#[derive(Deserialize)]
struct CatalogDocument {
    skills_by_age: BTreeMap<String, Vec<Skill>>,
}

const BUNDLED_CATALOG: &str = include_str!("../../data/catalog.json");

/// Read-only skills catalog, groups sorted by ascending numeric age.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    groups: Vec<AgeGroup>,
}

impl Catalog {
    /// # Errors
    ///
    /// Returns `CatalogError::Empty` for zero groups and `DuplicateAge` when two
    /// keys parse to the same age.
    pub fn new(mut groups: Vec<AgeGroup>) -> Result<Self, CatalogError> {
        if groups.is_empty() {
            return Err(CatalogError::Empty);
        }
        groups.sort_by_key(AgeGroup::age);
        if let Some(pair) = groups.windows(2).find(|pair| pair[0].age == pair[1].age) {
            return Err(CatalogError::DuplicateAge { age: pair[0].age });
        }
        Ok(Self { groups })
    }

    /// Parse a `{"skills_by_age": {"<age>": [{"skill", "description"}]}}` document.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed JSON and the validation
    /// errors of [`AgeGroup::new`] and [`Catalog::new`].
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument =
            serde_json::from_str(raw).map_err(|err| CatalogError::Parse(err.to_string()))?;
        let groups = doc
            .skills_by_age
            .into_iter()
            .map(|(key, skills)| AgeGroup::new(key, skills))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(groups)
    }

    /// The catalog shipped with the application.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded document is broken.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    #[must_use]
    pub fn groups(&self) -> &[AgeGroup] {
        &self.groups
    }

    #[must_use]
    pub fn group(&self, index: usize) -> Option<&AgeGroup> {
        self.groups.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[must_use]
    pub fn total_skills(&self) -> usize {
        self.groups.iter().map(AgeGroup::len).sum()
    }
}
