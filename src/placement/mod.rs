//! Placement engine: drag-and-drop relocation and pin toggling.
//!
//! Commands operate on an owned lesson list and are all-or-nothing: a
//! rejected command leaves the list exactly as it was, so callers may
//! compare before/after to detect "nothing happened".
//!
//! # Move Resolution
//!
//! 1. Resolve the source by id (`NotFound` if absent).
//! 2. Pinned source → `SourceLocked`; out-of-grid destination →
//!    `InvalidDestination`.
//! 3. Look for a target at the destination in the same
//!    (level, course, parity) partition as the source.
//! 4. No target → relocate the source (unless another lesson already
//!    occupies the destination with a conflicting parity → `Occupied`).
//! 5. Pinned target → `TargetLocked`, nothing moves.
//! 6. Unpinned target → swap positions; both ids are kept.
//!
//! Moves never create or delete lessons.

mod engine;

pub use engine::PlacementEngine;

use serde::{Deserialize, Serialize};

use crate::models::Cell;

/// A command from the UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Drop a lesson onto a cell.
    Move {
        lesson_id: String,
        destination: Cell,
    },
    /// Flip the pinned flag.
    TogglePin { lesson_id: String },
}

impl Command {
    pub fn move_to(lesson_id: impl Into<String>, destination: Cell) -> Self {
        Self::Move {
            lesson_id: lesson_id.into(),
            destination,
        }
    }

    pub fn toggle_pin(lesson_id: impl Into<String>) -> Self {
        Self::TogglePin {
            lesson_id: lesson_id.into(),
        }
    }

    /// Id of the lesson the command addresses.
    pub fn lesson_id(&self) -> &str {
        match self {
            Command::Move { lesson_id, .. } | Command::TogglePin { lesson_id } => lesson_id,
        }
    }
}

/// Effect of an accepted command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The lesson moved to an empty (for its partition) cell.
    Relocated { lesson_id: String, from: Cell, to: Cell },
    /// The lesson and the destination occupant exchanged cells.
    Swapped {
        lesson_id: String,
        displaced_id: String,
        from: Cell,
        to: Cell,
    },
    /// The lesson was dropped onto its own cell.
    Unchanged { lesson_id: String },
    /// The pinned flag now has the given value.
    PinToggled { lesson_id: String, pinned: bool },
}

impl Outcome {
    /// Whether the lesson list was modified.
    pub fn is_change(&self) -> bool {
        !matches!(self, Outcome::Unchanged { .. })
    }
}

/// Why a command was rejected. The list is untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("lesson not found: {0}")]
    NotFound(String),

    #[error("lesson {0} is pinned and cannot be moved")]
    SourceLocked(String),

    #[error("cannot move {lesson_id}: destination holds pinned lesson {target_id}")]
    TargetLocked { lesson_id: String, target_id: String },

    /// The destination holds a lesson of another partition whose parity
    /// cannot share the cell. Stricter than partition matching alone: an
    /// `any` lesson is not stacked with `even`/`odd` lessons, and two
    /// same-parity lessons of different courses never share a cell.
    #[error("cannot move {lesson_id}: destination holds conflicting lesson {occupant_id}")]
    Occupied {
        lesson_id: String,
        occupant_id: String,
    },

    #[error("invalid destination: {0}")]
    InvalidDestination(Cell),
}

impl PlacementError {
    /// Pin violations are shown to the user as a rejected drop.
    pub fn is_pin_violation(&self) -> bool {
        matches!(
            self,
            PlacementError::SourceLocked(_) | PlacementError::TargetLocked { .. }
        )
    }
}
