//! Canonical pair-slot times.
//!
//! A "pair" is one of the four fixed daily teaching slots. Start and end
//! times are a static lookup keyed by pair number; lessons only cache the
//! formatted result for display.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of teaching days per week (Mon..Sat).
pub const WEEKDAYS: u8 = 6;

/// Number of pair slots per day.
pub const PAIRS: u8 = 4;

/// Start/end (hour, minute) of each pair, indexed by `pair - 1`.
const PAIR_TABLE: [((u32, u32), (u32, u32)); PAIRS as usize] = [
    ((8, 40), (10, 15)),
    ((10, 35), (12, 10)),
    ((12, 20), (13, 55)),
    ((14, 5), (15, 40)),
];

/// The time span of one pair slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairTime {
    /// Pair number (1-based).
    pub pair: u8,
    /// Slot start.
    pub start: NaiveTime,
    /// Slot end.
    pub end: NaiveTime,
}

impl PairTime {
    /// Slot length in minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

impl fmt::Display for PairTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}–{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// Looks up the canonical time of a pair. `None` outside `1..=PAIRS`.
pub fn pair_time(pair: u8) -> Option<PairTime> {
    if pair == 0 || pair > PAIRS {
        return None;
    }
    let ((sh, sm), (eh, em)) = PAIR_TABLE[usize::from(pair - 1)];
    Some(PairTime {
        pair,
        start: NaiveTime::from_hms_opt(sh, sm, 0)?,
        end: NaiveTime::from_hms_opt(eh, em, 0)?,
    })
}

/// Formatted canonical time for a pair, or an empty string when out of range.
pub fn pair_time_label(pair: u8) -> String {
    pair_time(pair).map(|t| t.to_string()).unwrap_or_default()
}

/// Whether a weekday number is a teaching day (1 = Monday .. 6 = Saturday).
#[inline]
pub fn is_valid_weekday(weekday: u8) -> bool {
    (1..=WEEKDAYS).contains(&weekday)
}

/// Whether a pair number exists in the daily table.
#[inline]
pub fn is_valid_pair(pair: u8) -> bool {
    (1..=PAIRS).contains(&pair)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_table() {
        let first = pair_time(1).unwrap();
        assert_eq!(first.to_string(), "08:40–10:15");
        assert_eq!(first.duration_minutes(), 95);
        assert_eq!(pair_time_label(4), "14:05–15:40");
    }

    #[test]
    fn test_pairs_do_not_overlap() {
        for p in 1..PAIRS {
            let a = pair_time(p).unwrap();
            let b = pair_time(p + 1).unwrap();
            assert!(a.end <= b.start);
        }
    }

    #[test]
    fn test_out_of_range() {
        assert!(pair_time(0).is_none());
        assert!(pair_time(5).is_none());
        assert_eq!(pair_time_label(9), "");
        assert!(!is_valid_weekday(0));
        assert!(!is_valid_weekday(7));
        assert!(is_valid_weekday(6));
        assert!(is_valid_pair(1));
        assert!(!is_valid_pair(5));
    }
}
