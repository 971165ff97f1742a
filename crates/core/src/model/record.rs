use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{Person, Roster};

/// People recorded as able to perform one skill.
///
/// Insertion order is kept for stable display; a person never appears twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Person>", into = "Vec<Person>")]
pub struct ResponseSet {
    people: Vec<Person>,
}

impl ResponseSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only roster members, dropping duplicates.
    #[must_use]
    pub fn within_roster(people: impl IntoIterator<Item = Person>, roster: &Roster) -> Self {
        let mut set = Self::new();
        for person in people {
            if roster.contains(&person) {
                set.insert(person);
            }
        }
        set
    }

    /// Returns `false` when the person was already present.
    pub fn insert(&mut self, person: Person) -> bool {
        if self.contains(&person) {
            return false;
        }
        self.people.push(person);
        true
    }

    pub fn remove(&mut self, person: &Person) -> bool {
        let before = self.people.len();
        self.people.retain(|p| p != person);
        self.people.len() != before
    }

    /// A copy with `person` added if absent, removed if present.
    #[must_use]
    pub fn toggled(&self, person: &Person) -> Self {
        let mut next = self.clone();
        if !next.remove(person) {
            next.insert(person.clone());
        }
        next
    }

    #[must_use]
    pub fn contains(&self, person: &Person) -> bool {
        self.people.contains(person)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Person> {
        self.people.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Person] {
        &self.people
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

impl From<Vec<Person>> for ResponseSet {
    fn from(people: Vec<Person>) -> Self {
        let mut set = Self::new();
        for person in people {
            set.insert(person);
        }
        set
    }
}

impl From<ResponseSet> for Vec<Person> {
    fn from(set: ResponseSet) -> Self {
        set.people
    }
}

impl FromIterator<Person> for ResponseSet {
    fn from_iter<T: IntoIterator<Item = Person>>(iter: T) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

/// Age key → skill name → respondents.
///
/// A missing pair means "not yet assessed"; an empty set means "assessed,
/// nobody capable". Both count as incomplete in statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditRecord {
    ages: BTreeMap<String, BTreeMap<String, ResponseSet>>,
}

impl AuditRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, age_key: &str, skill: &str) -> Option<&ResponseSet> {
        self.ages.get(age_key).and_then(|skills| skills.get(skill))
    }

    /// Overwrite the respondents for one pair. Never merges.
    pub fn set(&mut self, age_key: &str, skill: &str, respondents: ResponseSet) {
        self.ages
            .entry(age_key.to_owned())
            .or_default()
            .insert(skill.to_owned(), respondents);
    }

    /// Drop every respondent who is not on the roster.
    pub fn retain_roster(&mut self, roster: &Roster) -> usize {
        let mut dropped = 0;
        for skills in self.ages.values_mut() {
            for set in skills.values_mut() {
                let before = set.len();
                set.people.retain(|person| roster.contains(person));
                dropped += before - set.len();
            }
        }
        dropped
    }

    /// Number of recorded (age, skill) pairs, including empty ones.
    #[must_use]
    pub fn entries(&self) -> usize {
        self.ages.values().map(BTreeMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries() == 0
    }

    pub fn clear(&mut self) {
        self.ages.clear();
    }
}
