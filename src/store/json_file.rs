//! JSON file store: `<data_dir>/schedule_<level>.json`.

use async_trait::async_trait;
use log::debug;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{ScheduleStore, StoreResult};
use crate::models::{LessonSlot, Level};

/// Stores each level as a pretty-printed JSON array.
///
/// Saves go through a temporary file and a rename, so a reader never sees
/// a half-written list.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding `level`.
    pub fn path_for(&self, level: Level) -> PathBuf {
        self.dir.join(format!("schedule_{}.json", level.as_str()))
    }
}

#[async_trait]
impl ScheduleStore for JsonFileStore {
    async fn load(&self, level: Level) -> StoreResult<Vec<LessonSlot>> {
        let path = self.path_for(level);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no stored schedule at {}", path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        let lessons: Vec<LessonSlot> = serde_json::from_slice(&bytes)?;
        debug!("loaded {} lessons from {}", lessons.len(), path.display());
        Ok(lessons)
    }

    async fn save(&self, level: Level, lessons: &[LessonSlot]) -> StoreResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(level);
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_vec_pretty(lessons)?;
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &path).await?;
        debug!("saved {} lessons to {}", lessons.len(), path.display());
        Ok(())
    }
}
