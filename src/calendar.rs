//! Academic calendar arithmetic.
//!
//! Maps calendar dates to academic week numbers and odd/even parity.
//! Every function is pure and total: date arithmetic saturates at the
//! representable range instead of panicking.
//!
//! # Week Model
//! Weeks run Monday..Sunday. Week 1 starts on the Monday of the week that
//! contains the semester start, and is always odd. Dates before the
//! semester start clamp to week 1; the grid never shows week 0.
//!
//! # Academic Year
//! The academic year is anchored on September 1. January..August belong
//! to the year that started the previous September.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::models::WeekParity;

/// Shifts a date by a signed number of days, saturating at the date range.
fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    let magnitude = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    };
    shifted.unwrap_or(if days >= 0 {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    })
}

/// Monday of the week containing `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday();
    shift_days(date, -i64::from(offset))
}

/// September 1 of the academic year containing `date`.
pub fn academic_year_anchor(date: NaiveDate) -> NaiveDate {
    let year = if date.month() >= 9 {
        date.year()
    } else {
        date.year() - 1
    };
    NaiveDate::from_ymd_opt(year, 9, 1).unwrap_or(if year < 0 {
        NaiveDate::MIN
    } else {
        NaiveDate::MAX
    })
}

/// Canonical week-1 Monday of the academic year containing `date`.
///
/// When September 1 is a weekend the semester starts the following
/// Monday, otherwise on the Monday of September 1's week.
pub fn first_teaching_monday(date: NaiveDate) -> NaiveDate {
    let anchor = academic_year_anchor(date);
    match anchor.weekday() {
        Weekday::Sat => shift_days(anchor, 2),
        Weekday::Sun => shift_days(anchor, 1),
        _ => start_of_week(anchor),
    }
}

/// 1-based academic week of `date` relative to `semester_start`.
///
/// Dates before the semester clamp to 1. When `total_weeks` is given the
/// result is also clamped to `total_weeks` (a zero total is treated as 1).
pub fn week_index(semester_start: NaiveDate, date: NaiveDate, total_weeks: Option<u32>) -> u32 {
    let days = (start_of_week(date) - start_of_week(semester_start)).num_days();
    let index = (days.div_euclid(7) + 1).max(1);
    let index = u32::try_from(index).unwrap_or(u32::MAX);
    match total_weeks {
        Some(total) => index.min(total.max(1)),
        None => index,
    }
}

/// Parity of the academic week containing `date`.
pub fn parity(semester_start: NaiveDate, date: NaiveDate) -> WeekParity {
    WeekParity::of_index(week_index(semester_start, date, None))
}

/// Monday of week `index` (1-based). Indices below 1 map to week 1.
pub fn week_start_from_index(semester_start: NaiveDate, index: u32) -> NaiveDate {
    let weeks = i64::from(index.max(1) - 1);
    shift_days(start_of_week(semester_start), weeks * 7)
}

/// The seven dates Monday..Sunday of the week beginning at `week_start`.
pub fn week_dates(week_start: NaiveDate) -> [NaiveDate; 7] {
    let mut dates = [week_start; 7];
    for (offset, slot) in dates.iter_mut().enumerate() {
        *slot = shift_days(week_start, offset as i64);
    }
    dates
}

/// "DD.MM – DD.MM" (or "DD.MM.YYYY – DD.MM.YYYY") for a week.
pub fn format_week_range(week_start: NaiveDate, with_years: bool) -> String {
    let week_end = shift_days(week_start, 6);
    let pattern = if with_years { "%d.%m.%Y" } else { "%d.%m" };
    format!(
        "{} – {}",
        week_start.format(pattern),
        week_end.format(pattern)
    )
}

/// A semester: start date plus length in weeks.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_timetable::calendar::AcademicCalendar;
/// use u_timetable::models::WeekParity;
///
/// let start = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
/// let cal = AcademicCalendar::new(start, 16);
/// let date = NaiveDate::from_ymd_opt(2025, 9, 10).unwrap();
/// assert_eq!(cal.week_index(date), 2);
/// assert_eq!(cal.parity(date), WeekParity::Even);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcademicCalendar {
    /// First teaching day (normally a Monday).
    pub semester_start: NaiveDate,
    /// Number of teaching weeks.
    pub total_weeks: u32,
}

impl AcademicCalendar {
    pub fn new(semester_start: NaiveDate, total_weeks: u32) -> Self {
        Self {
            semester_start,
            total_weeks: total_weeks.max(1),
        }
    }

    /// Calendar of the academic year containing `date`.
    pub fn for_date(date: NaiveDate, total_weeks: u32) -> Self {
        Self::new(first_teaching_monday(date), total_weeks)
    }

    /// Clamped week index of `date`.
    pub fn week_index(&self, date: NaiveDate) -> u32 {
        week_index(self.semester_start, date, Some(self.total_weeks))
    }

    /// Parity of the (clamped) week containing `date`.
    pub fn parity(&self, date: NaiveDate) -> WeekParity {
        WeekParity::of_index(self.week_index(date))
    }

    pub fn week_start(&self, index: u32) -> NaiveDate {
        week_start_from_index(self.semester_start, index.min(self.total_weeks))
    }

    /// "Week N · DD.MM – DD.MM" for the week containing `date`.
    pub fn week_label(&self, date: NaiveDate) -> String {
        let index = self.week_index(date);
        format!(
            "Week {} · {}",
            index,
            format_week_range(self.week_start(index), false)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_start_of_week() {
        // 2025-09-03 is a Wednesday
        assert_eq!(start_of_week(d(2025, 9, 3)), d(2025, 9, 1));
        assert_eq!(start_of_week(d(2025, 9, 1)), d(2025, 9, 1));
        // Sunday belongs to the preceding Monday
        assert_eq!(start_of_week(d(2025, 9, 7)), d(2025, 9, 1));
    }

    #[test]
    fn test_academic_year_anchor() {
        assert_eq!(academic_year_anchor(d(2026, 3, 15)), d(2025, 9, 1));
        assert_eq!(academic_year_anchor(d(2025, 8, 31)), d(2024, 9, 1));
        assert_eq!(academic_year_anchor(d(2025, 9, 1)), d(2025, 9, 1));
        assert_eq!(academic_year_anchor(d(2025, 12, 31)), d(2025, 9, 1));
    }

    #[test]
    fn test_first_teaching_monday() {
        // 2024-09-01 is a Sunday → Monday 2024-09-02
        assert_eq!(first_teaching_monday(d(2024, 10, 1)), d(2024, 9, 2));
        // 2029-09-01 is a Saturday → Monday 2029-09-03
        assert_eq!(first_teaching_monday(d(2029, 11, 1)), d(2029, 9, 3));
        // 2026-09-01 is a Tuesday → Monday 2026-08-31
        assert_eq!(first_teaching_monday(d(2026, 9, 20)), d(2026, 8, 31));
    }

    #[test]
    fn test_week_one_anchor() {
        let start = d(2025, 9, 1);
        assert_eq!(week_index(start, start, None), 1);
        assert_eq!(parity(start, start), WeekParity::Odd);
        assert_eq!(parity(start, d(2025, 9, 8)), WeekParity::Even);
    }

    #[test]
    fn test_pre_semester_clamp() {
        let start = d(2025, 9, 1);
        assert_eq!(week_index(start, d(2025, 8, 31), Some(16)), 1);
        assert_eq!(week_index(start, d(2020, 1, 1), Some(16)), 1);
        assert_eq!(week_index(start, d(2020, 1, 1), None), 1);
    }

    #[test]
    fn test_total_weeks_clamp() {
        let start = d(2025, 9, 1);
        assert_eq!(week_index(start, d(2026, 6, 1), Some(16)), 16);
        assert!(week_index(start, d(2026, 6, 1), None) > 16);
    }

    #[test]
    fn test_week_monotonicity() {
        let start = d(2025, 9, 1);
        let mut prev = 0;
        let mut date = d(2025, 8, 20);
        while date < d(2026, 8, 31) {
            let w = week_index(start, date, None);
            assert!(w >= prev);
            prev = w;
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_round_trip() {
        let start = d(2025, 9, 1);
        let mut date = start;
        for _ in 0..200 {
            let idx = week_index(start, date, None);
            assert_eq!(week_start_from_index(start, idx), start_of_week(date));
            date = shift_days(date, 3);
        }
    }

    #[test]
    fn test_round_trip_midweek_start() {
        let start = d(2025, 9, 3);
        let date = d(2025, 10, 16);
        let idx = week_index(start, date, None);
        assert_eq!(week_start_from_index(start, idx), start_of_week(date));
    }

    #[test]
    fn test_week_dates_and_format() {
        let dates = week_dates(d(2025, 12, 29));
        assert_eq!(dates[0], d(2025, 12, 29));
        assert_eq!(dates[6], d(2026, 1, 4));
        assert_eq!(format_week_range(d(2025, 12, 29), false), "29.12 – 04.01");
        assert_eq!(
            format_week_range(d(2025, 12, 29), true),
            "29.12.2025 – 04.01.2026"
        );
    }

    #[test]
    fn test_total_at_extremes() {
        assert_eq!(start_of_week(NaiveDate::MIN), NaiveDate::MIN);
        let _ = week_dates(NaiveDate::MAX);
        let _ = week_start_from_index(NaiveDate::MAX, u32::MAX);
        assert_eq!(week_index(NaiveDate::MAX, NaiveDate::MIN, Some(10)), 1);
    }

    #[test]
    fn test_academic_calendar() {
        let cal = AcademicCalendar::for_date(d(2025, 10, 16), 16);
        assert_eq!(cal.semester_start, d(2025, 9, 1));
        assert_eq!(cal.week_index(d(2025, 10, 16)), 7);
        assert_eq!(cal.parity(d(2025, 10, 16)), WeekParity::Odd);
        assert_eq!(cal.week_label(d(2025, 10, 16)), "Week 7 · 13.10 – 19.10");
    }
}
