use audit_core::AuditSession;
use audit_core::model::AuditStats;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonCountVm {
    pub name: String,
    pub skills: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsVm {
    pub completed: usize,
    pub total: usize,
    pub complete: bool,
    pub people: Vec<PersonCountVm>,
}

impl From<&AuditStats> for StatsVm {
    fn from(stats: &AuditStats) -> Self {
        Self {
            completed: stats.completed,
            total: stats.total,
            complete: stats.is_complete(),
            people: stats
                .by_person
                .iter()
                .map(|tally| PersonCountVm {
                    name: tally.person.to_string(),
                    skills: tally.skills,
                })
                .collect(),
        }
    }
}

/// One line of the per-chapter overview.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChapterRowVm {
    pub label: String,
    pub completed: usize,
    pub total: usize,
    pub current: bool,
}

#[must_use]
pub fn map_chapter_rows(session: &AuditSession) -> Vec<ChapterRowVm> {
    let current = session.position().age_index;
    session
        .catalog()
        .groups()
        .iter()
        .enumerate()
        .filter_map(|(index, group)| {
            let stats = session.group_stats(index)?;
            Some(ChapterRowVm {
                label: group.key().to_owned(),
                completed: stats.completed,
                total: stats.total,
                current: index == current,
            })
        })
        .collect()
}
