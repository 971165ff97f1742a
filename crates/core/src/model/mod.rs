mod blob;
mod catalog;
mod position;
mod record;
mod roster;
mod stats;

pub use blob::{BlobError, ProgressBlob};
pub use catalog::{AgeGroup, Catalog, CatalogError, Skill};
pub use position::{SessionPosition, ViewMode};
pub use record::{AuditRecord, ResponseSet};
pub use roster::{Person, Roster, RosterError};
pub use stats::{AuditStats, ChapterProgress, PersonTally};
