//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use audit_core::model::{BlobError, CatalogError, RosterError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted while loading the catalog and roster. Always fatal.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReferenceError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Roster(#[from] RosterError),
}

/// Errors emitted by `AuditController`.
///
/// A corrupt saved blob is not an error; it is discarded on load.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuditError {
    #[error(transparent)]
    Blob(#[from] BlobError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Reference(#[from] ReferenceError),
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Audit(#[from] AuditError),
}
