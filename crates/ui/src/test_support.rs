use std::sync::Arc;

use audit_core::model::{Catalog, Roster};
use audit_core::time::fixed_clock;
use services::{AuditController, ReferenceData};
use storage::repository::InMemoryProgressStore;
use tokio::sync::Mutex;

use crate::context::SharedController;

/// Two one-skill chapters ("3", "5") and a two-person roster.
pub(crate) async fn shared_controller() -> SharedController {
    let catalog = Catalog::from_json(
        r#"{"skills_by_age": {
            "3": [{"skill": "sharing", "description": "Shares toys"}],
            "5": [{"skill": "counting", "description": "Counts to ten"}]
        }}"#,
    )
    .unwrap();
    let roster = Roster::from_json(r#"{"people": ["Alice", "Bob"]}"#).unwrap();
    let controller = AuditController::initialize(
        ReferenceData::new(catalog, roster),
        Arc::new(InMemoryProgressStore::new()),
        fixed_clock(),
    )
    .await
    .unwrap();
    Arc::new(Mutex::new(controller))
}
