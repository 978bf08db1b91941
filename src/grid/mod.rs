//! Grid read model: cell index, display filter, and column paging.
//!
//! # Usage
//!
//! ```
//! use u_timetable::grid::{ColumnPager, GridIndex, LessonFilter};
//! use u_timetable::models::{Cell, LessonSlot, Level};
//!
//! let lessons = vec![
//!     LessonSlot::new("1", Level::Bachelor, 4, Cell::new(1, 1, "КН-41")),
//!     LessonSlot::new("2", Level::Bachelor, 3, Cell::new(1, 1, "КН-31")),
//! ];
//! let index = GridIndex::build_filtered(&lessons, &LessonFilter::new(Some(4), None));
//! assert_eq!(index.groups(), ["КН-41"]);
//!
//! let mut pager = ColumnPager::new(10);
//! pager.set_groups(index.groups().to_vec());
//! assert_eq!(pager.visible_groups(), ["КН-41"]);
//! ```

mod index;
mod pager;

pub use index::{
    distinct_groups, filter_by_course_and_parity, GridIndex, IntegrityWarning, LessonFilter,
};
pub(crate) use index::is_valid_occupancy;
pub use pager::ColumnPager;
