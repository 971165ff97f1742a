mod audit;
mod progress;
mod state;

#[cfg(test)]
mod view_smoke;

pub use audit::AuditView;
pub use progress::ProgressView;
pub use state::{ViewError, ViewState, view_state_from_resource};
