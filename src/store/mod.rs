//! Schedule persistence.
//!
//! The core treats persistence as an opaque key-value store: one lesson
//! list per [`Level`], read and written wholesale. There is no partial or
//! merge semantics; `save` replaces the stored value.
//!
//! # Implementations
//!
//! - [`MemoryStore`]: in-process, for tests and demos
//! - [`JsonFileStore`]: one JSON file per level in a data directory

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::models::{LessonSlot, Level};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Whole-value lesson list storage, keyed by level.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so a session can hold them behind
/// an `Arc` and await them from any executor.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Reads the stored list for `level`. A level never saved yields an
    /// empty list.
    async fn load(&self, level: Level) -> StoreResult<Vec<LessonSlot>>;

    /// Replaces the stored list for `level`.
    async fn save(&self, level: Level, lessons: &[LessonSlot]) -> StoreResult<()>;
}
