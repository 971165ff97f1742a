use std::path::PathBuf;

use audit_core::Clock;
use storage::repository::Storage;

use crate::audit::{AuditController, ReferenceData};
use crate::error::AppServicesError;

/// Where the catalog and roster come from. `None` means the bundled document.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSources {
    pub catalog: Option<PathBuf>,
    pub roster: Option<PathBuf>,
}

/// Assembles the app-facing services from configuration.
pub struct AppServices {
    storage: Storage,
    controller: AuditController,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// Reference data is validated before any storage is touched, so a bad
    /// catalog or roster never reaches an interactive state.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if reference data, storage initialization or
    /// the initial load fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        sources: &ReferenceSources,
    ) -> Result<Self, AppServicesError> {
        let reference = ReferenceData::load(sources.catalog.as_deref(), sources.roster.as_deref())?;
        let storage = Storage::sqlite(db_url).await?;
        Self::with_storage(storage, reference, clock).await
    }

    /// Build services on top of an already-open storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Audit` if saved progress cannot be read.
    pub async fn with_storage(
        storage: Storage,
        reference: ReferenceData,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let controller =
            AuditController::initialize(reference, storage.progress.clone(), clock).await?;
        Ok(Self {
            storage,
            controller,
        })
    }

    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    #[must_use]
    pub fn controller(&self) -> &AuditController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut AuditController {
        &mut self.controller
    }

    #[must_use]
    pub fn into_controller(self) -> AuditController {
        self.controller
    }
}
