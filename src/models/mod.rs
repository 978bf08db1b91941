//! Timetable domain models.
//!
//! Provides the core data types for the lesson grid. Groups are not a
//! separate table: any lesson may introduce a new group label.
//!
//! # Grid Addressing
//!
//! | Field | Range | Meaning |
//! |-------|-------|---------|
//! | `weekday` | 1..=6 | Monday..Saturday |
//! | `pair` | 1..=4 | Fixed daily time slot |
//! | `group` | any string | Student group column |

mod lesson;
mod pair;

pub use lesson::{Cell, LessonSlot, Level, Parity, WeekParity};
pub use pair::{
    is_valid_pair, is_valid_weekday, pair_time, pair_time_label, PairTime, PAIRS, WEEKDAYS,
};
