//! Randomized move sequences against the placement invariants.
//!
//! Each test drives a few thousand seeded random commands through the
//! engine and checks, after every step, that pinned lessons stay put,
//! rejected commands change nothing, lessons are never created or lost,
//! and no cell ever holds a conflicting set of lessons.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

use u_timetable::models::{Cell, LessonSlot, Level, Parity, PAIRS, WEEKDAYS};
use u_timetable::placement::{Command, PlacementEngine};
use u_timetable::validation::validate_lessons;

const GROUPS: [&str; 3] = ["КН-41", "КН-42", "КН-31"];

/// A valid starting grid: every lesson in its own cell or an even/odd pair.
fn seed_lessons() -> Vec<LessonSlot> {
    let mut lessons = Vec::new();
    let mut n = 0;
    let mut push = |lessons: &mut Vec<LessonSlot>, course, w, p, g: &str, parity, pinned| {
        n += 1;
        let mut l = LessonSlot::new(format!("L{n}"), Level::Bachelor, course, Cell::new(w, p, g))
            .with_parity(parity);
        l.pinned = pinned;
        lessons.push(l);
    };

    push(&mut lessons, 4, 1, 1, "КН-41", Parity::Any, true);
    push(&mut lessons, 4, 1, 2, "КН-41", Parity::Any, false);
    push(&mut lessons, 4, 1, 3, "КН-41", Parity::Even, false);
    push(&mut lessons, 4, 1, 3, "КН-41", Parity::Odd, true);
    push(&mut lessons, 4, 2, 1, "КН-42", Parity::Any, false);
    push(&mut lessons, 4, 2, 2, "КН-42", Parity::Even, false);
    push(&mut lessons, 4, 3, 4, "КН-42", Parity::Odd, false);
    push(&mut lessons, 3, 1, 1, "КН-31", Parity::Any, false);
    push(&mut lessons, 3, 4, 2, "КН-31", Parity::Any, true);
    push(&mut lessons, 3, 5, 3, "КН-31", Parity::Even, false);
    push(&mut lessons, 3, 6, 4, "КН-31", Parity::Odd, false);
    lessons
}

fn random_command(rng: &mut StdRng, lessons: &[LessonSlot]) -> Command {
    let id = if rng.random_bool(0.05) {
        "missing".to_string()
    } else {
        lessons[rng.random_range(0..lessons.len())].id.clone()
    };
    if rng.random_bool(0.1) {
        return Command::toggle_pin(id);
    }
    let destination = Cell::new(
        rng.random_range(1..=WEEKDAYS),
        rng.random_range(1..=PAIRS),
        GROUPS[rng.random_range(0..GROUPS.len())],
    );
    Command::move_to(id, destination)
}

#[test]
fn pinned_lessons_never_move() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut lessons = seed_lessons();
    let engine = PlacementEngine::new();

    let pinned: HashMap<String, Cell> = lessons
        .iter()
        .filter(|l| l.pinned)
        .map(|l| (l.id.clone(), l.cell()))
        .collect();

    for _ in 0..3000 {
        let cmd = random_command(&mut rng, &lessons);
        if matches!(cmd, Command::TogglePin { .. }) {
            continue;
        }
        let _ = engine.apply(&mut lessons, &cmd);
        for l in lessons.iter().filter(|l| pinned.contains_key(&l.id)) {
            assert_eq!(&l.cell(), &pinned[&l.id], "pinned lesson {} moved", l.id);
        }
    }
}

#[test]
fn rejected_commands_change_nothing() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut lessons = seed_lessons();
    let engine = PlacementEngine::new();

    for _ in 0..3000 {
        let cmd = random_command(&mut rng, &lessons);
        let before = lessons.clone();
        if engine.apply(&mut lessons, &cmd).is_err() {
            assert_eq!(lessons, before, "rejected {cmd:?} modified the list");
        }
    }
}

#[test]
fn invariants_hold_after_every_command() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut lessons = seed_lessons();
    let engine = PlacementEngine::new();
    assert!(validate_lessons(&lessons).is_ok());

    let mut ids: Vec<String> = lessons.iter().map(|l| l.id.clone()).collect();
    ids.sort();

    for step in 0..5000 {
        let cmd = random_command(&mut rng, &lessons);
        let _ = engine.apply(&mut lessons, &cmd);

        if let Err(errors) = validate_lessons(&lessons) {
            panic!("step {step}: {cmd:?} broke invariants: {errors:?}");
        }
        let mut now: Vec<String> = lessons.iter().map(|l| l.id.clone()).collect();
        now.sort();
        assert_eq!(now, ids);
    }
}

#[test]
fn swap_preserves_ids_and_count() {
    let mut rng = StdRng::seed_from_u64(3);
    let engine = PlacementEngine::new();

    for _ in 0..500 {
        let mut lessons = seed_lessons();
        let unpinned: Vec<&LessonSlot> = lessons.iter().filter(|l| !l.pinned).collect();
        let a = unpinned[rng.random_range(0..unpinned.len())].clone();
        let Some(b) = unpinned
            .iter()
            .find(|b| b.id != a.id && b.same_partition(&a) && b.cell() != a.cell())
            .map(|b| (*b).clone())
        else {
            continue;
        };

        engine
            .apply(&mut lessons, &Command::move_to(a.id.clone(), b.cell()))
            .unwrap();

        let moved_a = lessons.iter().find(|l| l.id == a.id).unwrap();
        let moved_b = lessons.iter().find(|l| l.id == b.id).unwrap();
        assert_eq!(moved_a.cell(), b.cell());
        assert_eq!(moved_b.cell(), a.cell());
        assert_eq!(lessons.len(), seed_lessons().len());
    }
}
