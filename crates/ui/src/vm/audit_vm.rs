use audit_core::model::{Person, ViewMode};
use services::{AuditController, AuditError};

use crate::context::SharedController;
use crate::views::ViewError;
use crate::vm::StatsVm;
use crate::vm::time_fmt::format_datetime;

/// Everything a user can ask the audit to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuditIntent {
    StartChapter,
    MarkAllCapable,
    Toggle(String),
    Advance,
    JumpTo(usize),
    ContinueFromSummary,
    Reset,
    OpenMenu,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgeChipVm {
    pub label: String,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonToggleVm {
    pub name: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillPromptVm {
    pub name: String,
    pub description: String,
    pub progress: String,
    pub people: Vec<PersonToggleVm>,
    pub can_advance: bool,
}

/// Render-ready snapshot of the controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditVm {
    pub mode: ViewMode,
    pub age_label: String,
    pub skill_count: usize,
    pub ages: Vec<AgeChipVm>,
    pub prompt: SkillPromptVm,
    pub chapter: StatsVm,
    pub overall: StatsVm,
    pub has_next_group: bool,
    pub last_saved: Option<String>,
}

impl AuditVm {
    #[must_use]
    pub fn capture(controller: &AuditController) -> Self {
        let session = controller.session();
        let group = session.current_group();
        let skill = session.current_skill();
        let respondents = session.current_respondents();
        let age_index = session.position().age_index;

        let ages = session
            .catalog()
            .groups()
            .iter()
            .enumerate()
            .map(|(index, group)| AgeChipVm {
                label: group.key().to_owned(),
                active: index == age_index,
            })
            .collect();

        let people = session
            .roster()
            .people()
            .iter()
            .map(|person| PersonToggleVm {
                name: person.to_string(),
                selected: respondents.contains(person),
            })
            .collect();

        Self {
            mode: session.view_mode(),
            age_label: group.key().to_owned(),
            skill_count: group.len(),
            ages,
            prompt: SkillPromptVm {
                name: skill.name().to_owned(),
                description: skill.description().to_owned(),
                progress: session.chapter_progress().to_string(),
                people,
                can_advance: !respondents.is_empty(),
            },
            chapter: StatsVm::from(&session.chapter_stats()),
            overall: StatsVm::from(&session.overall_stats()),
            has_next_group: session.has_next_group(),
            last_saved: controller.last_saved_at().map(format_datetime),
        }
    }
}

/// Apply one intent and return the resulting snapshot.
///
/// # Errors
///
/// Returns `ViewError::Storage` when progress could not be persisted and
/// `ViewError::Unknown` for anything else.
pub async fn dispatch_intent(
    controller: &SharedController,
    intent: AuditIntent,
) -> Result<AuditVm, ViewError> {
    let mut guard = controller.lock().await;
    let result = match intent {
        AuditIntent::StartChapter => guard.start_chapter().await,
        AuditIntent::MarkAllCapable => guard.mark_all_capable().await,
        AuditIntent::Toggle(name) => guard.toggle_individual(&Person::new(name)).await,
        AuditIntent::Advance => guard.advance().await,
        AuditIntent::JumpTo(index) => guard.jump_to_group(index).await,
        AuditIntent::ContinueFromSummary => guard.continue_after_chapter_summary().await,
        AuditIntent::Reset => guard.reset().await,
        AuditIntent::OpenMenu => guard.open_menu().await,
    };

    match result {
        Ok(_) => Ok(AuditVm::capture(&guard)),
        Err(AuditError::Storage(err)) => {
            tracing::error!(error = %err, "progress could not be saved");
            Err(ViewError::Storage)
        }
        Err(err) => {
            tracing::error!(error = %err, "audit intent failed");
            Err(ViewError::Unknown)
        }
    }
}
