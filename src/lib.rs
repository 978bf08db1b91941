//! University timetable core for the U-Engine ecosystem.
//!
//! Provides the academic scheduling core behind an interactive timetable
//! editor: a deterministic academic calendar and a grid placement engine
//! over a sparse set of lessons keyed by (weekday, pair, group, parity).
//!
//! # Modules
//!
//! - **`models`**: Domain types: `LessonSlot`, `Cell`, `Level`, `Parity`,
//!   `WeekParity`, the canonical pair-time table
//! - **`calendar`**: Date → academic week / parity arithmetic
//! - **`grid`**: Cell index, display filter, column pager
//! - **`placement`**: Move / swap / pin commands with all-or-nothing semantics
//! - **`validation`**: Lesson list integrity checks
//! - **`store`**: Whole-list persistence per level (memory, JSON files)
//! - **`session`**: Single-owner editing session and grid read model
//! - **`config`**: TOML configuration
//!
//! # Architecture
//!
//! Everything except `store` and the async halves of `session` is
//! synchronous and pure. The session is the only mutator of the lesson
//! list; the store only ever sees whole-list replacement.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use u_timetable::calendar::AcademicCalendar;
//! use u_timetable::models::{Cell, LessonSlot, Level};
//! use u_timetable::session::TimetableSession;
//!
//! let today = NaiveDate::from_ymd_opt(2025, 10, 16).unwrap();
//! let mut session = TimetableSession::new(
//!     Level::Bachelor,
//!     AcademicCalendar::for_date(today, 16),
//!     today,
//!     10,
//! );
//! let ticket = session.begin_load(Level::Bachelor);
//! session
//!     .complete_load(
//!         ticket,
//!         Ok(vec![LessonSlot::new("1", Level::Bachelor, 4, Cell::new(1, 1, "КН-41"))]),
//!     )
//!     .unwrap();
//!
//! session.move_lesson("1", Cell::new(2, 3, "КН-41")).unwrap();
//! assert_eq!(session.cell(2, 3, "КН-41").len(), 1);
//! assert_eq!(session.parity_label(), "odd");
//! ```

pub mod calendar;
pub mod config;
pub mod grid;
pub mod models;
pub mod placement;
pub mod session;
pub mod store;
pub mod validation;
