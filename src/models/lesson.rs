//! Lesson slot model.
//!
//! A lesson slot is one scheduled lesson occurrence, addressed in the grid
//! by its [`Cell`] (weekday, pair, group) and qualified by week [`Parity`].
//!
//! # Occupancy
//! A cell may hold one `any`-parity lesson, or up to one `even` and one
//! `odd` lesson. `even` + `odd` is the only sanctioned multi-occupancy.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::pair::pair_time_label;

/// Degree level. Each level is an independent grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Bachelor,
    Master,
}

impl Level {
    /// Lowercase key used by stores.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Bachelor => "bachelor",
            Level::Master => "master",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Week classification of a calendar week. Week 1 is odd.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekParity {
    Odd,
    Even,
}

impl WeekParity {
    /// Parity of a 1-based week index.
    pub fn of_index(index: u32) -> Self {
        if index % 2 == 1 {
            WeekParity::Odd
        } else {
            WeekParity::Even
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeekParity::Odd => "odd",
            WeekParity::Even => "even",
        }
    }
}

impl fmt::Display for WeekParity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which weeks a lesson is held in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    /// Every week.
    #[default]
    Any,
    /// Even weeks only.
    Even,
    /// Odd weeks only.
    Odd,
}

impl Parity {
    /// Whether a lesson with this parity is held in a week of `week` parity.
    pub fn matches_week(&self, week: WeekParity) -> bool {
        match self {
            Parity::Any => true,
            Parity::Even => week == WeekParity::Even,
            Parity::Odd => week == WeekParity::Odd,
        }
    }

    /// Whether two lessons with these parities may not share a cell.
    ///
    /// Only `even` + `odd` coexist.
    pub fn conflicts_with(&self, other: Parity) -> bool {
        !matches!(
            (self, other),
            (Parity::Even, Parity::Odd) | (Parity::Odd, Parity::Even)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Parity::Any => "any",
            Parity::Even => "even",
            Parity::Odd => "odd",
        }
    }
}

impl From<WeekParity> for Parity {
    fn from(week: WeekParity) -> Self {
        match week {
            WeekParity::Odd => Parity::Odd,
            WeekParity::Even => Parity::Even,
        }
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grid address: (weekday, pair, group).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    /// 1 = Monday .. 6 = Saturday.
    pub weekday: u8,
    /// Pair slot, 1..=4.
    pub pair: u8,
    /// Group (column) label.
    pub group: String,
}

impl Cell {
    pub fn new(weekday: u8, pair: u8, group: impl Into<String>) -> Self {
        Self {
            weekday,
            pair,
            group: group.into(),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day {} pair {} [{}]", self.weekday, self.pair, self.group)
    }
}

/// One scheduled lesson occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonSlot {
    /// Stable unique identifier (per level).
    pub id: String,
    /// Degree level partition.
    pub level: Level,
    /// Group (column) label, e.g. "КН-41".
    pub group: String,
    /// Year of study. Used for filtering only.
    pub course: u8,
    /// 1 = Monday .. 6 = Saturday.
    pub weekday: u8,
    /// Pair slot, 1..=4.
    pub pair: u8,
    /// Cached canonical time of `pair`, for display.
    #[serde(default)]
    pub time: String,
    /// Week parity the lesson is held in.
    #[serde(default)]
    pub parity: Parity,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub teacher: String,
    #[serde(default)]
    pub location: String,
    /// Pinned lessons are never moved or overwritten.
    #[serde(default)]
    pub pinned: bool,
}

impl LessonSlot {
    /// Creates an unpinned `any`-parity lesson at the given cell.
    pub fn new(id: impl Into<String>, level: Level, course: u8, cell: Cell) -> Self {
        Self {
            id: id.into(),
            level,
            group: cell.group,
            course,
            weekday: cell.weekday,
            pair: cell.pair,
            time: pair_time_label(cell.pair),
            parity: Parity::Any,
            subject: String::new(),
            teacher: String::new(),
            location: String::new(),
            pinned: false,
        }
    }

    /// Sets the week parity.
    pub fn with_parity(mut self, parity: Parity) -> Self {
        self.parity = parity;
        self
    }

    /// Sets the subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Sets the teacher.
    pub fn with_teacher(mut self, teacher: impl Into<String>) -> Self {
        self.teacher = teacher.into();
        self
    }

    /// Sets the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Marks the lesson as pinned.
    pub fn pinned(mut self) -> Self {
        self.pinned = true;
        self
    }

    /// The cell this lesson occupies.
    pub fn cell(&self) -> Cell {
        Cell::new(self.weekday, self.pair, self.group.clone())
    }

    /// Whether the lesson sits at `cell`.
    pub fn is_at(&self, cell: &Cell) -> bool {
        self.weekday == cell.weekday && self.pair == cell.pair && self.group == cell.group
    }

    /// Moves the lesson to `cell` and refreshes the cached time.
    pub fn relocate(&mut self, cell: Cell) {
        self.weekday = cell.weekday;
        self.pair = cell.pair;
        self.group = cell.group;
        self.time = pair_time_label(self.pair);
    }

    /// Whether two lessons belong to the same (level, course, parity) track.
    pub fn same_partition(&self, other: &LessonSlot) -> bool {
        self.level == other.level && self.course == other.course && self.parity == other.parity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lesson_builder() {
        let l = LessonSlot::new("L1", Level::Bachelor, 4, Cell::new(1, 2, "КН-41"))
            .with_parity(Parity::Even)
            .with_subject("Algorithms")
            .with_teacher("Petrenko")
            .with_location("301")
            .pinned();

        assert_eq!(l.id, "L1");
        assert_eq!(l.group, "КН-41");
        assert_eq!(l.time, "10:35–12:10");
        assert_eq!(l.parity, Parity::Even);
        assert!(l.pinned);
        assert_eq!(l.cell(), Cell::new(1, 2, "КН-41"));
    }

    #[test]
    fn test_relocate_refreshes_time() {
        let mut l = LessonSlot::new("L1", Level::Master, 1, Cell::new(1, 1, "A"));
        l.relocate(Cell::new(3, 4, "B"));
        assert!(l.is_at(&Cell::new(3, 4, "B")));
        assert_eq!(l.time, "14:05–15:40");
    }

    #[test]
    fn test_parity_conflicts() {
        assert!(!Parity::Even.conflicts_with(Parity::Odd));
        assert!(!Parity::Odd.conflicts_with(Parity::Even));
        assert!(Parity::Any.conflicts_with(Parity::Any));
        assert!(Parity::Any.conflicts_with(Parity::Odd));
        assert!(Parity::Even.conflicts_with(Parity::Even));
    }

    #[test]
    fn test_parity_matches_week() {
        assert!(Parity::Any.matches_week(WeekParity::Odd));
        assert!(Parity::Odd.matches_week(WeekParity::Odd));
        assert!(!Parity::Even.matches_week(WeekParity::Odd));
        assert_eq!(WeekParity::of_index(1), WeekParity::Odd);
        assert_eq!(WeekParity::of_index(2), WeekParity::Even);
    }

    #[test]
    fn test_serde_lowercase() {
        let l = LessonSlot::new("L1", Level::Bachelor, 2, Cell::new(2, 1, "G"))
            .with_parity(Parity::Odd);
        let json = serde_json::to_string(&l).unwrap();
        assert!(json.contains("\"bachelor\""));
        assert!(json.contains("\"odd\""));

        let back: LessonSlot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, l);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{"id":"x","level":"master","group":"M-1","course":1,"weekday":2,"pair":3}"#;
        let l: LessonSlot = serde_json::from_str(json).unwrap();
        assert_eq!(l.parity, Parity::Any);
        assert!(!l.pinned);
        assert_eq!(l.time, "");
    }
}
