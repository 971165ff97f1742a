#![forbid(unsafe_code)]

pub mod app_services;
pub mod audit;
pub mod error;

pub use app_services::{AppServices, ReferenceSources};
pub use audit::{AuditController, ReferenceData};
pub use error::{AppServicesError, AuditError, ReferenceError};
