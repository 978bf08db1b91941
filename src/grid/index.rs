//! Cell index over a flat lesson list.
//!
//! Groups lessons by their (weekday, pair, group) address and derives the
//! live set of group columns. The index stores positions into the list it
//! was built from, so it never owns or copies lessons.
//!
//! # Integrity
//! A healthy cell holds one lesson, or exactly one `even` plus one `odd`
//! lesson. Anything else is reported as an [`IntegrityWarning`] and logged;
//! the extra lessons stay in the cell so nothing disappears from view.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::models::{Cell, LessonSlot, Parity};

/// Display-time lesson filter. `None` fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonFilter {
    /// Year of study.
    pub course: Option<u8>,
    /// Requested week parity. `Some(Parity::Any)` is the same as `None`.
    pub parity: Option<Parity>,
}

impl LessonFilter {
    pub fn new(course: Option<u8>, parity: Option<Parity>) -> Self {
        Self { course, parity }
    }

    /// Whether `lesson` passes the filter.
    pub fn accepts(&self, lesson: &LessonSlot) -> bool {
        let course_ok = self.course.map_or(true, |c| lesson.course == c);
        let parity_ok = match self.parity {
            None | Some(Parity::Any) => true,
            Some(requested) => lesson.parity == Parity::Any || lesson.parity == requested,
        };
        course_ok && parity_ok
    }
}

/// Keeps lessons matching `course` (if given) and compatible with `parity`.
///
/// Never mutates the list.
pub fn filter_by_course_and_parity(
    lessons: &[LessonSlot],
    course: Option<u8>,
    parity: Option<Parity>,
) -> Vec<&LessonSlot> {
    let filter = LessonFilter::new(course, parity);
    lessons.iter().filter(|l| filter.accepts(l)).collect()
}

/// Distinct group labels in first-seen order.
pub fn distinct_groups<'a, I>(lessons: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a LessonSlot>,
{
    let mut seen = HashSet::new();
    let mut groups = Vec::new();
    for lesson in lessons {
        if seen.insert(lesson.group.as_str()) {
            groups.push(lesson.group.clone());
        }
    }
    groups
}

/// A cell observed with an unexpected set of occupants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityWarning {
    pub cell: Cell,
    /// Ids of every lesson in the cell.
    pub lesson_ids: Vec<String>,
    /// Parities of those lessons, same order.
    pub parities: Vec<Parity>,
}

/// Whether a multiset of parities is a sanctioned cell occupancy.
pub(crate) fn is_valid_occupancy(parities: &[Parity]) -> bool {
    match parities {
        [] | [_] => true,
        [a, b] => !a.conflicts_with(*b),
        _ => false,
    }
}

/// Lookup of lesson positions by cell, plus the visible group columns.
#[derive(Debug, Clone, Default)]
pub struct GridIndex {
    cells: HashMap<Cell, Vec<usize>>,
    groups: Vec<String>,
    warnings: Vec<IntegrityWarning>,
}

impl GridIndex {
    /// Indexes every lesson.
    pub fn build(lessons: &[LessonSlot]) -> Self {
        Self::build_filtered(lessons, &LessonFilter::default())
    }

    /// Indexes the lessons accepted by `filter`.
    ///
    /// Positions refer to `lessons`, not to the filtered subset.
    pub fn build_filtered(lessons: &[LessonSlot], filter: &LessonFilter) -> Self {
        let mut cells: HashMap<Cell, Vec<usize>> = HashMap::new();
        let mut seen = HashSet::new();
        let mut groups = Vec::new();

        for (pos, lesson) in lessons.iter().enumerate() {
            if !filter.accepts(lesson) {
                continue;
            }
            if seen.insert(lesson.group.as_str()) {
                groups.push(lesson.group.clone());
            }
            cells.entry(lesson.cell()).or_default().push(pos);
        }

        let mut warnings = Vec::new();
        for (cell, positions) in &cells {
            let parities: Vec<Parity> = positions.iter().map(|&p| lessons[p].parity).collect();
            if is_valid_occupancy(&parities) {
                continue;
            }
            let lesson_ids: Vec<String> =
                positions.iter().map(|&p| lessons[p].id.clone()).collect();
            warn!(
                "data integrity: {} holds {} lessons {:?} with parities {:?}",
                cell,
                positions.len(),
                lesson_ids,
                parities
            );
            warnings.push(IntegrityWarning {
                cell: cell.clone(),
                lesson_ids,
                parities,
            });
        }
        warnings.sort_by(|a, b| a.cell.cmp(&b.cell));

        Self {
            cells,
            groups,
            warnings,
        }
    }

    /// Positions of the lessons in a cell (empty if none).
    pub fn positions(&self, weekday: u8, pair: u8, group: &str) -> &[usize] {
        self.cells
            .get(&Cell::new(weekday, pair, group))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Lessons in a cell, resolved against the list the index was built from.
    pub fn cell<'a>(
        &self,
        lessons: &'a [LessonSlot],
        weekday: u8,
        pair: u8,
        group: &str,
    ) -> Vec<&'a LessonSlot> {
        self.positions(weekday, pair, group)
            .iter()
            .filter_map(|&p| lessons.get(p))
            .collect()
    }

    /// Group labels in first-seen order.
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Cells with an unexpected occupancy, sorted by cell.
    pub fn warnings(&self) -> &[IntegrityWarning] {
        &self.warnings
    }

    /// Number of non-empty cells.
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }
}
