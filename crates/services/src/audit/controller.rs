use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use audit_core::model::{
    AuditStats, ChapterProgress, Person, ProgressBlob, ResponseSet, SessionPosition, ViewMode,
};
use audit_core::{AuditSession, Clock, Effect};
use storage::repository::ProgressStore;

use super::ReferenceData;
use crate::error::AuditError;

/// Drives an [`AuditSession`] and keeps the progress store in step with it.
///
/// Every mutating call persists before it returns, so a crash between calls
/// loses at most the call in flight.
pub struct AuditController {
    clock: Clock,
    session: AuditSession,
    store: Arc<dyn ProgressStore>,
    last_saved_at: Option<DateTime<Utc>>,
}

impl AuditController {
    /// Rehydrate from the store, or start fresh when nothing usable is saved.
    ///
    /// A payload that fails to decode is discarded with a warning.
    ///
    /// # Errors
    ///
    /// Returns `AuditError::Storage` if the store cannot be read.
    pub async fn initialize(
        reference: ReferenceData,
        store: Arc<dyn ProgressStore>,
        clock: Clock,
    ) -> Result<Self, AuditError> {
        let ReferenceData { catalog, roster } = reference;
        let saved = store.load().await?;

        let (session, last_saved_at) = match saved.as_deref().map(ProgressBlob::decode) {
            Some(Ok(blob)) => {
                let saved_at = blob.saved_at;
                let session = AuditSession::from_blob(catalog, roster, blob);
                info!(
                    age_index = session.position().age_index,
                    skill_index = session.position().skill_index,
                    view = ?session.view_mode(),
                    "resumed saved audit"
                );
                (session, saved_at)
            }
            Some(Err(err)) => {
                warn!(error = %err, "discarding unreadable saved progress");
                (AuditSession::new(catalog, roster), None)
            }
            None => {
                info!("starting a new audit");
                (AuditSession::new(catalog, roster), None)
            }
        };

        Ok(Self {
            clock,
            session,
            store,
            last_saved_at,
        })
    }

    #[must_use]
    pub fn session(&self) -> &AuditSession {
        &self.session
    }

    #[must_use]
    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.last_saved_at
    }

    //
    // ─── INTENTS ───────────────────────────────────────────────────────────────
    //

    /// Overwrite the current skill's respondents and advance.
    ///
    /// # Errors
    ///
    /// Returns `AuditError` if the new state cannot be persisted.
    pub async fn record_selection(
        &mut self,
        respondents: impl IntoIterator<Item = Person>,
    ) -> Result<Effect, AuditError> {
        let effect = self.session.record_selection(respondents);
        self.commit(effect, "record_selection").await
    }

    /// # Errors
    ///
    /// Returns `AuditError` if the new state cannot be persisted.
    pub async fn mark_all_capable(&mut self) -> Result<Effect, AuditError> {
        let effect = self.session.mark_all_capable();
        self.commit(effect, "mark_all_capable").await
    }

    /// Flip one person for the current skill. Never advances.
    ///
    /// # Errors
    ///
    /// Returns `AuditError` if the new state cannot be persisted.
    pub async fn toggle_individual(&mut self, person: &Person) -> Result<Effect, AuditError> {
        let effect = self.session.toggle_individual(person);
        self.commit(effect, "toggle_individual").await
    }

    /// Confirm the current selection ("Next Skill"). Ignored while nobody is selected.
    ///
    /// # Errors
    ///
    /// Returns `AuditError` if the new state cannot be persisted.
    pub async fn advance(&mut self) -> Result<Effect, AuditError> {
        let effect = self.session.advance();
        self.commit(effect, "advance").await
    }

    /// # Errors
    ///
    /// Returns `AuditError` if the new state cannot be persisted.
    pub async fn jump_to_group(&mut self, index: usize) -> Result<Effect, AuditError> {
        let effect = self.session.jump_to_group(index);
        self.commit(effect, "jump_to_group").await
    }

    /// # Errors
    ///
    /// Returns `AuditError` if the new state cannot be persisted.
    pub async fn continue_after_chapter_summary(&mut self) -> Result<Effect, AuditError> {
        let effect = self.session.continue_after_chapter_summary();
        self.commit(effect, "continue_after_chapter_summary").await
    }

    /// # Errors
    ///
    /// Returns `AuditError` if the new state cannot be persisted.
    pub async fn start_chapter(&mut self) -> Result<Effect, AuditError> {
        let effect = self.session.start_chapter();
        self.commit(effect, "start_chapter").await
    }

    /// # Errors
    ///
    /// Returns `AuditError` if the new state cannot be persisted.
    pub async fn open_menu(&mut self) -> Result<Effect, AuditError> {
        let effect = self.session.open_menu();
        self.commit(effect, "open_menu").await
    }

    /// Wipe all answers and the stored blob.
    ///
    /// If the store cannot be cleared the session is left as it was, so the
    /// screen keeps matching what a restart would load.
    ///
    /// # Errors
    ///
    /// Returns `AuditError::Storage` if the store cannot be cleared.
    pub async fn reset(&mut self) -> Result<Effect, AuditError> {
        let previous = self.session.clone();
        let effect = self.session.reset();
        let result = self.commit(effect, "reset").await;
        if result.is_err() {
            self.session = previous;
        }
        result
    }

    async fn commit(&mut self, effect: Effect, intent: &'static str) -> Result<Effect, AuditError> {
        match effect {
            Effect::Save => {
                let saved_at = self.clock.now();
                let payload = self.session.to_blob(Some(saved_at)).encode()?;
                if let Err(err) = self.store.save(&payload).await {
                    warn!(intent, error = %err, "failed to save progress");
                    return Err(err.into());
                }
                self.last_saved_at = Some(saved_at);
                let position = self.session.position();
                debug!(
                    intent,
                    age_index = position.age_index,
                    skill_index = position.skill_index,
                    view = ?self.session.view_mode(),
                    "progress saved"
                );
            }
            Effect::Clear => {
                if let Err(err) = self.store.clear().await {
                    warn!(intent, error = %err, "failed to clear progress");
                    return Err(err.into());
                }
                self.last_saved_at = None;
                info!("audit reset");
            }
            Effect::Ignored => {
                debug!(intent, view = ?self.session.view_mode(), "intent ignored");
            }
        }
        Ok(effect)
    }

    //
    // ─── QUERIES ───────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.session.view_mode()
    }

    #[must_use]
    pub fn position(&self) -> SessionPosition {
        self.session.position()
    }

    #[must_use]
    pub fn current_respondents(&self) -> ResponseSet {
        self.session.current_respondents()
    }

    #[must_use]
    pub fn chapter_progress(&self) -> ChapterProgress {
        self.session.chapter_progress()
    }

    #[must_use]
    pub fn chapter_stats(&self) -> AuditStats {
        self.session.chapter_stats()
    }

    #[must_use]
    pub fn overall_stats(&self) -> AuditStats {
        self.session.overall_stats()
    }
}
