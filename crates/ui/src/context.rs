use std::sync::Arc;

use services::AuditController;
use tokio::sync::Mutex;

/// The controller as shared between views. Intents lock it for the duration
/// of one transition, persistence included.
pub type SharedController = Arc<Mutex<AuditController>>;

pub trait UiApp: Send + Sync {
    fn controller(&self) -> SharedController;

    /// Human-readable description of where progress is stored.
    fn storage_label(&self) -> String;
}

#[derive(Clone)]
pub struct AppContext {
    controller: SharedController,
    storage_label: String,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            controller: app.controller(),
            storage_label: app.storage_label(),
        }
    }

    #[must_use]
    pub fn controller(&self) -> SharedController {
        Arc::clone(&self.controller)
    }

    #[must_use]
    pub fn storage_label(&self) -> &str {
        &self.storage_label
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
