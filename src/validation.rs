//! Integrity checks for a lesson list.
//!
//! Checks the structural invariants of the grid before it is edited.
//! Detects:
//! - Duplicate IDs within a level
//! - Weekday / pair numbers outside the grid
//! - Empty group labels
//! - Cached times that disagree with the pair table
//! - Cells holding a conflicting set of lessons
//!
//! Findings are reported, never repaired: the caller decides whether to
//! warn or refuse.

use std::collections::{BTreeMap, HashSet};

use crate::grid::is_valid_occupancy;
use crate::models::{
    is_valid_pair, is_valid_weekday, pair_time_label, Cell, LessonSlot, Level, Parity,
};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending lesson id (first one, for cell conflicts).
    pub lesson_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two lessons of one level share an ID.
    DuplicateId,
    /// Weekday outside 1..=6.
    WeekdayOutOfRange,
    /// Pair outside 1..=4.
    PairOutOfRange,
    /// Group label is blank.
    EmptyGroup,
    /// Cached `time` differs from the canonical pair time.
    StaleTime,
    /// A cell holds lessons whose parities cannot coexist.
    CellConflict,
}

impl ValidationError {
    fn new(
        kind: ValidationErrorKind,
        lesson_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            lesson_id: lesson_id.into(),
            message: message.into(),
        }
    }
}

/// Validates a lesson list.
///
/// Checks:
/// 1. No duplicate ids within a level
/// 2. Weekday and pair within the grid
/// 3. Non-blank group label
/// 4. Cached time equals the pair table entry
/// 5. Every (level, cell) holds one lesson or one even + one odd
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_lessons(lessons: &[LessonSlot]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut ids: HashSet<(Level, &str)> = HashSet::new();
    for l in lessons {
        if !ids.insert((l.level, l.id.as_str())) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                &l.id,
                format!("Duplicate lesson ID in {}: {}", l.level, l.id),
            ));
        }

        if !is_valid_weekday(l.weekday) {
            errors.push(ValidationError::new(
                ValidationErrorKind::WeekdayOutOfRange,
                &l.id,
                format!("Lesson '{}' has weekday {}", l.id, l.weekday),
            ));
        }

        if !is_valid_pair(l.pair) {
            errors.push(ValidationError::new(
                ValidationErrorKind::PairOutOfRange,
                &l.id,
                format!("Lesson '{}' has pair {}", l.id, l.pair),
            ));
        } else if l.time != pair_time_label(l.pair) {
            errors.push(ValidationError::new(
                ValidationErrorKind::StaleTime,
                &l.id,
                format!(
                    "Lesson '{}' caches time '{}' for pair {}",
                    l.id, l.time, l.pair
                ),
            ));
        }

        if l.group.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyGroup,
                &l.id,
                format!("Lesson '{}' has no group", l.id),
            ));
        }
    }

    // BTreeMap keeps the report order stable
    let mut cells: BTreeMap<(Level, Cell), Vec<&LessonSlot>> = BTreeMap::new();
    for l in lessons {
        cells.entry((l.level, l.cell())).or_default().push(l);
    }
    for ((level, cell), occupants) in &cells {
        let parities: Vec<Parity> = occupants.iter().map(|l| l.parity).collect();
        if is_valid_occupancy(&parities) {
            continue;
        }
        let ids: Vec<&str> = occupants.iter().map(|l| l.id.as_str()).collect();
        errors.push(ValidationError::new(
            ValidationErrorKind::CellConflict,
            ids[0],
            format!("{level} {cell} holds conflicting lessons {ids:?} ({parities:?})"),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Rewrites every cached time from the pair table. Returns how many changed.
pub fn refresh_cached_times(lessons: &mut [LessonSlot]) -> usize {
    let mut changed = 0;
    for l in lessons.iter_mut() {
        let canonical = pair_time_label(l.pair);
        if l.time != canonical {
            l.time = canonical;
            changed += 1;
        }
    }
    changed
}
