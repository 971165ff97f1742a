#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{InMemoryProgressStore, PROGRESS_KEY, ProgressStore, Storage, StorageError};
pub use sqlite::{SqliteInitError, SqliteRepository};
