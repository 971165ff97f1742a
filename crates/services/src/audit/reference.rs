use std::path::Path;
use std::sync::Arc;

use audit_core::model::{Catalog, Roster};

use crate::error::ReferenceError;

/// The static catalog and roster, loaded once at startup.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub catalog: Arc<Catalog>,
    pub roster: Arc<Roster>,
}

impl ReferenceData {
    #[must_use]
    pub fn new(catalog: Catalog, roster: Roster) -> Self {
        Self {
            catalog: Arc::new(catalog),
            roster: Arc::new(roster),
        }
    }

    /// Data embedded in the binary.
    ///
    /// # Errors
    ///
    /// Returns `ReferenceError` if an embedded document is invalid.
    pub fn bundled() -> Result<Self, ReferenceError> {
        Ok(Self::new(Catalog::bundled()?, Roster::bundled()?))
    }

    /// Load from files, falling back to the bundled document for any path not given.
    ///
    /// # Errors
    ///
    /// Returns `ReferenceError::Io` for unreadable files and the parse or
    /// validation error otherwise.
    pub fn load(catalog: Option<&Path>, roster: Option<&Path>) -> Result<Self, ReferenceError> {
        let catalog = match catalog {
            Some(path) => Catalog::from_json(&read(path)?)?,
            None => Catalog::bundled()?,
        };
        let roster = match roster {
            Some(path) => Roster::from_json(&read(path)?)?,
            None => Roster::bundled()?,
        };
        tracing::info!(
            groups = catalog.len(),
            skills = catalog.total_skills(),
            people = roster.len(),
            "reference data loaded"
        );
        Ok(Self::new(catalog, roster))
    }
}

fn read(path: &Path) -> Result<String, ReferenceError> {
    std::fs::read_to_string(path).map_err(|source| ReferenceError::Io {
        path: path.to_path_buf(),
        source,
    })
}
