//! In-memory store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{ScheduleStore, StoreError, StoreResult};
use crate::models::{LessonSlot, Level};

/// In-memory store.
///
/// Clones share the same data, so a test can keep a handle and inspect
/// what a session saved.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    data: Arc<RwLock<MemoryData>>,
}

#[derive(Debug, Default)]
struct MemoryData {
    lists: HashMap<Level, Vec<LessonSlot>>,
    saves: usize,
    healthy: bool,
}

impl MemoryStore {
    /// Creates an empty, healthy store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(MemoryData {
                healthy: true,
                ..Default::default()
            })),
        }
    }

    /// Creates a store pre-populated with one level.
    pub fn with_level(self, level: Level, lessons: Vec<LessonSlot>) -> Self {
        // the Arc was just created, so nobody else can hold the lock
        if let Ok(mut data) = self.data.try_write() {
            data.lists.insert(level, lessons);
        }
        self
    }

    /// Makes every subsequent call fail with `Unavailable`.
    pub async fn set_healthy(&self, healthy: bool) {
        self.data.write().await.healthy = healthy;
    }

    /// Number of successful saves so far.
    pub async fn save_count(&self) -> usize {
        self.data.read().await.saves
    }

    /// Current stored list for `level`, if any.
    pub async fn snapshot(&self, level: Level) -> Option<Vec<LessonSlot>> {
        self.data.read().await.lists.get(&level).cloned()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScheduleStore for MemoryStore {
    async fn load(&self, level: Level) -> StoreResult<Vec<LessonSlot>> {
        let data = self.data.read().await;
        if !data.healthy {
            return Err(StoreError::Unavailable("memory store offline".into()));
        }
        Ok(data.lists.get(&level).cloned().unwrap_or_default())
    }

    async fn save(&self, level: Level, lessons: &[LessonSlot]) -> StoreResult<()> {
        let mut data = self.data.write().await;
        if !data.healthy {
            return Err(StoreError::Unavailable("memory store offline".into()));
        }
        data.lists.insert(level, lessons.to_vec());
        data.saves += 1;
        Ok(())
    }
}
