use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RosterError {
    #[error("roster document is not valid: {0}")]
    Parse(String),

    #[error("roster has no people")]
    Empty,

    #[error("person name cannot be empty")]
    EmptyName,

    #[error("{0:?} appears more than once in the roster")]
    DuplicatePerson(String),
}

/// Opaque identifier for one participant.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Person(String);

impl Person {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Person({})", self.0)
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Person {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Deserialize)]
struct RosterDocument {
    people: Vec<Person>,
}

const BUNDLED_ROSTER: &str = include_str!("../../data/roster.json");

/// Fixed, ordered list of people taking part in the audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    people: Vec<Person>,
}

impl Roster {
    /// # Errors
    ///
    /// Returns `RosterError` for an empty roster, blank names or duplicates.
    pub fn new(people: Vec<Person>) -> Result<Self, RosterError> {
        if people.is_empty() {
            return Err(RosterError::Empty);
        }
        let mut seen = HashSet::with_capacity(people.len());
        for person in &people {
            if person.0.trim().is_empty() {
                return Err(RosterError::EmptyName);
            }
            if !seen.insert(person.as_str()) {
                return Err(RosterError::DuplicatePerson(person.0.clone()));
            }
        }
        Ok(Self { people })
    }

    /// Parse a `{"people": [...]}` document.
    ///
    /// # Errors
    ///
    /// Returns `RosterError::Parse` for malformed JSON, otherwise the errors of [`Roster::new`].
    pub fn from_json(raw: &str) -> Result<Self, RosterError> {
        let doc: RosterDocument =
            serde_json::from_str(raw).map_err(|err| RosterError::Parse(err.to_string()))?;
        Self::new(doc.people)
    }

    /// # Errors
    ///
    /// Only fails if the embedded document is broken.
    pub fn bundled() -> Result<Self, RosterError> {
        Self::from_json(BUNDLED_ROSTER)
    }

    #[must_use]
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    #[must_use]
    pub fn contains(&self, person: &Person) -> bool {
        self.people.contains(person)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.people.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
}
