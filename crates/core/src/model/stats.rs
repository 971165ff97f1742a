use std::fmt;

use crate::model::{AgeGroup, AuditRecord, Person, Roster};

/// How many skills one person is recorded against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonTally {
    pub person: Person,
    pub skills: usize,
}

/// Completion counts over one or more age groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditStats {
    pub completed: usize,
    pub total: usize,
    /// One entry per roster member, in roster order.
    pub by_person: Vec<PersonTally>,
}

impl AuditStats {
    /// Tally `groups` against `record`.
    ///
    /// A skill counts as completed only when its respondent set is non-empty.
    #[must_use]
    pub fn collect<'a>(
        groups: impl IntoIterator<Item = &'a AgeGroup>,
        record: &AuditRecord,
        roster: &Roster,
    ) -> Self {
        let mut by_person: Vec<PersonTally> = roster
            .people()
            .iter()
            .map(|person| PersonTally {
                person: person.clone(),
                skills: 0,
            })
            .collect();
        let mut completed = 0;
        let mut total = 0;

        for group in groups {
            total += group.len();
            for skill in group.skills() {
                let Some(responses) = record.get(group.key(), skill.name()) else {
                    continue;
                };
                if !responses.is_empty() {
                    completed += 1;
                }
                for person in responses.iter() {
                    if let Some(tally) = by_person.iter_mut().find(|t| &t.person == person) {
                        tally.skills += 1;
                    }
                }
            }
        }

        Self {
            completed,
            total,
            by_person,
        }
    }

    #[must_use]
    pub fn count_for(&self, person: &str) -> Option<usize> {
        self.by_person
            .iter()
            .find(|tally| tally.person.as_str() == person)
            .map(|tally| tally.skills)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed == self.total
    }
}

/// Position within the current chapter, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChapterProgress {
    pub current: usize,
    pub total: usize,
}

impl ChapterProgress {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.current as f64 / self.total as f64
    }
}

impl fmt::Display for ChapterProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.total)
    }
}
