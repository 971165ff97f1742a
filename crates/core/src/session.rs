//! The audit progression state machine.
//!
//! `AuditSession` is pure: every transition mutates in-memory state and
//! returns an [`Effect`] telling the caller what has to happen to durable
//! storage. Persistence lives one layer up.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::model::{
    AgeGroup, AuditRecord, AuditStats, Catalog, ChapterProgress, Person, ProgressBlob,
    ResponseSet, Roster, SessionPosition, Skill, ViewMode,
};

/// What a transition requires from the progress store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// State changed; the full blob must be saved.
    Save,
    /// State was wiped; the stored blob must be removed.
    Clear,
    /// The intent did not apply in the current state. Nothing changed.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct AuditSession {
    catalog: Arc<Catalog>,
    roster: Arc<Roster>,
    record: AuditRecord,
    age_index: usize,
    skill_index: usize,
    view: ViewMode,
}

impl AuditSession {
    /// Fresh session at the first chapter intro.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, roster: Arc<Roster>) -> Self {
        Self {
            catalog,
            roster,
            record: AuditRecord::new(),
            age_index: 0,
            skill_index: 0,
            view: ViewMode::AgeIntro,
        }
    }

    /// Rehydrate from a saved blob.
    ///
    /// Indices are clamped into the catalog (it may have shrunk since the
    /// save) and respondents no longer on the roster are dropped.
    #[must_use]
    pub fn from_blob(catalog: Arc<Catalog>, roster: Arc<Roster>, blob: ProgressBlob) -> Self {
        let view = blob.resolved_view_mode();
        let mut record = blob.audit_data;
        record.retain_roster(&roster);

        let last_group = catalog.len().saturating_sub(1);
        let age_index = clamp_index(blob.current_age_index, last_group);
        let group_len = catalog.group(age_index).map_or(0, AgeGroup::len);
        let skill_index = clamp_index(blob.current_skill_index, group_len.saturating_sub(1));

        Self {
            catalog,
            roster,
            record,
            age_index,
            skill_index,
            view,
        }
    }

    /// Snapshot the persistable state.
    #[must_use]
    pub fn to_blob(&self, saved_at: Option<DateTime<Utc>>) -> ProgressBlob {
        ProgressBlob {
            audit_data: self.record.clone(),
            current_age_index: i64::try_from(self.age_index).unwrap_or(i64::MAX),
            current_skill_index: i64::try_from(self.skill_index).unwrap_or(i64::MAX),
            show_age_intro: self.view == ViewMode::AgeIntro,
            view_mode: Some(self.view),
            saved_at,
        }
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    /// Overwrite the current skill's respondents and advance the cursor.
    ///
    /// Respondents outside the roster are dropped. On the last skill of a
    /// chapter the view moves to the chapter summary; the age cursor only
    /// moves on [`continue_after_chapter_summary`](Self::continue_after_chapter_summary).
    pub fn record_selection(&mut self, respondents: impl IntoIterator<Item = Person>) -> Effect {
        if self.view.is_summary() {
            return Effect::Ignored;
        }
        let set = ResponseSet::within_roster(respondents, &self.roster);
        self.store_current(set);

        if self.skill_index + 1 < self.current_group().len() {
            self.skill_index += 1;
            self.view = ViewMode::SkillPrompt;
        } else {
            self.view = ViewMode::ChapterSummary;
        }
        Effect::Save
    }

    /// Record the whole roster for the current skill and advance.
    pub fn mark_all_capable(&mut self) -> Effect {
        let everyone = self.roster.people().to_vec();
        self.record_selection(everyone)
    }

    /// Add or remove one person for the current skill without moving the cursor.
    pub fn toggle_individual(&mut self, person: &Person) -> Effect {
        if self.view.is_summary() || !self.roster.contains(person) {
            return Effect::Ignored;
        }
        let next = self.current_respondents().toggled(person);
        self.store_current(next);
        Effect::Save
    }

    /// Confirm the current selection and move on. Needs at least one person.
    pub fn advance(&mut self) -> Effect {
        let current = self.current_respondents();
        if current.is_empty() {
            return Effect::Ignored;
        }
        self.record_selection(current.as_slice().to_vec())
    }

    /// Open chapter `index` at its intro from any view. Out-of-range indices are ignored.
    pub fn jump_to_group(&mut self, index: usize) -> Effect {
        if index >= self.catalog.len() {
            return Effect::Ignored;
        }
        self.age_index = index;
        self.skill_index = 0;
        self.view = ViewMode::AgeIntro;
        Effect::Save
    }

    /// Leave the chapter summary for the next chapter's intro, or the final summary after the last one.
    pub fn continue_after_chapter_summary(&mut self) -> Effect {
        if self.view != ViewMode::ChapterSummary {
            return Effect::Ignored;
        }
        if self.has_next_group() {
            self.age_index += 1;
            self.skill_index = 0;
            self.view = ViewMode::AgeIntro;
        } else {
            self.view = ViewMode::FinalSummary;
        }
        Effect::Save
    }

    /// Move from the chapter intro to the first prompt.
    pub fn start_chapter(&mut self) -> Effect {
        if self.view != ViewMode::AgeIntro {
            return Effect::Ignored;
        }
        self.view = ViewMode::SkillPrompt;
        Effect::Save
    }

    /// Back to the chapter intro, keeping the cursor where it is.
    pub fn open_menu(&mut self) -> Effect {
        if self.view == ViewMode::AgeIntro {
            return Effect::Ignored;
        }
        self.view = ViewMode::AgeIntro;
        Effect::Save
    }

    /// Forget every answer and return to the first chapter intro.
    pub fn reset(&mut self) -> Effect {
        self.record.clear();
        self.age_index = 0;
        self.skill_index = 0;
        self.view = ViewMode::AgeIntro;
        Effect::Clear
    }

    fn store_current(&mut self, set: ResponseSet) {
        let group = self.current_group();
        let (key, skill) = (group.key().to_owned(), self.current_skill().name().to_owned());
        self.record.set(&key, &skill, set);
    }

    //
    // ─── QUERIES ───────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.view
    }

    #[must_use]
    pub fn position(&self) -> SessionPosition {
        SessionPosition {
            age_index: self.age_index,
            skill_index: self.skill_index,
            show_age_intro: self.view == ViewMode::AgeIntro,
        }
    }

    #[must_use]
    pub fn record(&self) -> &AuditRecord {
        &self.record
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub fn current_group(&self) -> &AgeGroup {
        // age_index is kept within bounds and catalogs are never empty.
        &self.catalog.groups()[self.age_index]
    }

    #[must_use]
    pub fn current_skill(&self) -> &Skill {
        &self.current_group().skills()[self.skill_index]
    }

    /// Respondents for the cursor's skill; empty when not yet assessed.
    #[must_use]
    pub fn current_respondents(&self) -> ResponseSet {
        self.record
            .get(self.current_group().key(), self.current_skill().name())
            .cloned()
            .unwrap_or_default()
    }

    #[must_use]
    pub fn has_next_group(&self) -> bool {
        self.age_index + 1 < self.catalog.len()
    }

    #[must_use]
    pub fn chapter_progress(&self) -> ChapterProgress {
        ChapterProgress {
            current: self.skill_index + 1,
            total: self.current_group().len(),
        }
    }

    #[must_use]
    pub fn chapter_stats(&self) -> AuditStats {
        AuditStats::collect([self.current_group()], &self.record, &self.roster)
    }

    /// Stats for any chapter, used by overview screens.
    #[must_use]
    pub fn group_stats(&self, index: usize) -> Option<AuditStats> {
        let group = self.catalog.group(index)?;
        Some(AuditStats::collect([group], &self.record, &self.roster))
    }

    #[must_use]
    pub fn overall_stats(&self) -> AuditStats {
        AuditStats::collect(self.catalog.groups(), &self.record, &self.roster)
    }
}

fn clamp_index(raw: i64, max: usize) -> usize {
    usize::try_from(raw).unwrap_or(0).min(max)
}
