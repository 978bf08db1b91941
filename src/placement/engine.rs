//! Move and pin-toggle resolution.

use log::{debug, info};

use super::{Command, Outcome, PlacementError};
use crate::models::{is_valid_pair, is_valid_weekday, Cell, LessonSlot};

/// Applies placement commands to a lesson list.
///
/// The engine holds no state; every call is a function of the list and
/// the command. Taking `&mut [LessonSlot]` means a command can reorder
/// fields inside lessons but can never add or remove one.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Cell, LessonSlot, Level};
/// use u_timetable::placement::{Command, Outcome, PlacementEngine};
///
/// let mut lessons = vec![
///     LessonSlot::new("A", Level::Bachelor, 4, Cell::new(1, 1, "КН-41")),
///     LessonSlot::new("B", Level::Bachelor, 4, Cell::new(1, 2, "КН-41")),
/// ];
/// let engine = PlacementEngine::new();
/// let outcome = engine
///     .apply(&mut lessons, &Command::move_to("A", Cell::new(1, 2, "КН-41")))
///     .unwrap();
///
/// assert!(matches!(outcome, Outcome::Swapped { .. }));
/// assert_eq!(lessons[0].pair, 2);
/// assert_eq!(lessons[1].pair, 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PlacementEngine;

impl PlacementEngine {
    pub fn new() -> Self {
        Self
    }

    /// Applies one command. On `Err` the list is unchanged.
    pub fn apply(
        &self,
        lessons: &mut [LessonSlot],
        command: &Command,
    ) -> Result<Outcome, PlacementError> {
        let result = match command {
            Command::Move {
                lesson_id,
                destination,
            } => self.move_lesson(lessons, lesson_id, destination),
            Command::TogglePin { lesson_id } => self.toggle_pin(lessons, lesson_id),
        };

        match &result {
            Ok(outcome) => info!("placement: {outcome:?}"),
            Err(e @ PlacementError::NotFound(_)) => debug!("placement ignored: {e}"),
            Err(e) => debug!("placement rejected: {e}"),
        }
        result
    }

    /// Flips `pinned` on the addressed lesson.
    pub fn toggle_pin(
        &self,
        lessons: &mut [LessonSlot],
        lesson_id: &str,
    ) -> Result<Outcome, PlacementError> {
        let lesson = lessons
            .iter_mut()
            .find(|l| l.id == lesson_id)
            .ok_or_else(|| PlacementError::NotFound(lesson_id.to_string()))?;
        lesson.pinned = !lesson.pinned;
        Ok(Outcome::PinToggled {
            lesson_id: lesson.id.clone(),
            pinned: lesson.pinned,
        })
    }

    /// Moves a lesson to `destination`, swapping with a same-partition
    /// occupant if there is one.
    pub fn move_lesson(
        &self,
        lessons: &mut [LessonSlot],
        lesson_id: &str,
        destination: &Cell,
    ) -> Result<Outcome, PlacementError> {
        let src = lessons
            .iter()
            .position(|l| l.id == lesson_id)
            .ok_or_else(|| PlacementError::NotFound(lesson_id.to_string()))?;

        let source = &lessons[src];
        if source.pinned {
            return Err(PlacementError::SourceLocked(source.id.clone()));
        }
        if !is_valid_weekday(destination.weekday)
            || !is_valid_pair(destination.pair)
            || destination.group.trim().is_empty()
        {
            return Err(PlacementError::InvalidDestination(destination.clone()));
        }
        if source.is_at(destination) {
            return Ok(Outcome::Unchanged {
                lesson_id: source.id.clone(),
            });
        }

        let target = lessons
            .iter()
            .enumerate()
            .position(|(i, l)| i != src && l.same_partition(source) && l.is_at(destination));

        let Some(tgt) = target else {
            // Another track may still hold the cell with a clashing parity.
            if let Some(occupant) = lessons.iter().enumerate().find_map(|(i, l)| {
                (i != src
                    && l.level == source.level
                    && l.is_at(destination)
                    && l.parity.conflicts_with(source.parity))
                .then_some(l)
            }) {
                return Err(PlacementError::Occupied {
                    lesson_id: source.id.clone(),
                    occupant_id: occupant.id.clone(),
                });
            }

            let from = source.cell();
            let lesson = &mut lessons[src];
            lesson.relocate(destination.clone());
            return Ok(Outcome::Relocated {
                lesson_id: lesson.id.clone(),
                from,
                to: destination.clone(),
            });
        };

        if lessons[tgt].pinned {
            return Err(PlacementError::TargetLocked {
                lesson_id: source.id.clone(),
                target_id: lessons[tgt].id.clone(),
            });
        }

        let from = source.cell();
        lessons[src].relocate(destination.clone());
        lessons[tgt].relocate(from.clone());
        Ok(Outcome::Swapped {
            lesson_id: lessons[src].id.clone(),
            displaced_id: lessons[tgt].id.clone(),
            from,
            to: destination.clone(),
        })
    }
}
