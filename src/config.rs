//! Timetable configuration file support.
//!
//! Reads editor settings from a TOML file. Every section and key is
//! optional:
//!
//! ```toml
//! [calendar]
//! semester_start = "2025-09-01"  # default: first teaching Monday of the current year
//! total_weeks = 16
//!
//! [grid]
//! page_size = 10
//!
//! [store]
//! data_dir = "data"
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::calendar::AcademicCalendar;
use crate::store::JsonFileStore;

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Editor configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimetableConfig {
    #[serde(default)]
    pub calendar: CalendarSettings,
    #[serde(default)]
    pub grid: GridSettings,
    #[serde(default)]
    pub store: StoreSettings,
}

/// Semester settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarSettings {
    /// Explicit week-1 start. `None` derives it from the current date.
    #[serde(default)]
    pub semester_start: Option<NaiveDate>,
    #[serde(default = "default_total_weeks")]
    pub total_weeks: u32,
}

/// Grid display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    /// Group columns per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

/// Persistence settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_total_weeks() -> u32 {
    16
}

fn default_page_size() -> usize {
    10
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            semester_start: None,
            total_weeks: default_total_weeks(),
        }
    }
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl TimetableConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: TimetableConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.calendar.total_weeks == 0 {
            return Err(ConfigError::Invalid("calendar.total_weeks must be > 0".into()));
        }
        if self.grid.page_size == 0 {
            return Err(ConfigError::Invalid("grid.page_size must be > 0".into()));
        }
        Ok(())
    }

    /// Academic calendar for the semester in effect on `today`.
    pub fn academic_calendar(&self, today: NaiveDate) -> AcademicCalendar {
        match self.calendar.semester_start {
            Some(start) => AcademicCalendar::new(start, self.calendar.total_weeks),
            None => AcademicCalendar::for_date(today, self.calendar.total_weeks),
        }
    }

    /// File store rooted at the configured data directory.
    pub fn json_store(&self) -> JsonFileStore {
        JsonFileStore::new(&self.store.data_dir)
    }
}
