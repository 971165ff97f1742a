mod controller;
mod reference;

// Public API of the audit subsystem.
pub use crate::error::AuditError;
pub use controller::AuditController;
pub use reference::ReferenceData;
