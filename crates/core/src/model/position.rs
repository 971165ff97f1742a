use serde::{Deserialize, Serialize};

/// Which screen the audit is on. The single source of truth for navigation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewMode {
    #[default]
    AgeIntro,
    SkillPrompt,
    ChapterSummary,
    FinalSummary,
}

impl ViewMode {
    #[must_use]
    pub fn is_summary(self) -> bool {
        matches!(self, Self::ChapterSummary | Self::FinalSummary)
    }
}

/// Cursor into the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPosition {
    pub age_index: usize,
    pub skill_index: usize,
    pub show_age_intro: bool,
}

impl Default for SessionPosition {
    fn default() -> Self {
        Self {
            age_index: 0,
            skill_index: 0,
            show_age_intro: true,
        }
    }
}
