//! Editing session: the single owner of the in-memory lesson list.
//!
//! A session holds one level's lessons between load and save, applies UI
//! commands through the [`PlacementEngine`], and exposes the read model
//! the grid renders from (visible groups, cells, paging, week labels).
//!
//! # Load / Save Protocol
//!
//! Store round-trips are split into `begin_*` / `complete_*` so a UI can
//! keep its own future in flight:
//!
//! - `begin_load` issues a [`LoadTicket`] tagged with a sequence number.
//!   While a load is pending the grid is read-only.
//! - `complete_load` applies the result only if its ticket is still the
//!   latest one. A failed load keeps the previous list untouched.
//! - `begin_save` hands out a snapshot tagged with the generation of the
//!   list it was taken from, and refuses a second save until the first
//!   completes. The list generation only advances when a load is applied,
//!   so a save result is ignored once another list has replaced it, but
//!   survives a reload that failed or was superseded.
//!
//! [`load_level`](TimetableSession::load_level) and
//! [`save`](TimetableSession::save) run both halves against a store.

use chrono::NaiveDate;
use log::{debug, info, warn};

use crate::calendar::{week_dates, AcademicCalendar};
use crate::config::TimetableConfig;
use crate::grid::{ColumnPager, GridIndex, IntegrityWarning, LessonFilter};
use crate::models::{Cell, LessonSlot, Level, Parity, WeekParity};
use crate::placement::{Command, Outcome, PlacementEngine, PlacementError};
use crate::store::{ScheduleStore, StoreError};
use crate::validation::{refresh_cached_times, validate_lessons};

/// Error type for session operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("grid is read-only while a load is pending")]
    Loading,

    #[error("a save is already in flight")]
    SaveInFlight,

    #[error(transparent)]
    Placement(#[from] PlacementError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Handle for a pending load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub level: Level,
    seq: u64,
}

/// Handle for a pending save, carrying the list to write.
#[derive(Debug, Clone)]
pub struct SaveTicket {
    pub level: Level,
    pub lessons: Vec<LessonSlot>,
    generation: u64,
    revision: u64,
}

/// What `complete_load` did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// The list was replaced.
    Applied { lessons: usize },
    /// A newer load superseded this one; the result was dropped.
    Discarded,
}

/// What `complete_save` did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    Saved,
    /// Another list was loaded since the save started.
    Discarded,
}

/// In-memory editing session for one level.
#[derive(Debug)]
pub struct TimetableSession {
    level: Level,
    lessons: Vec<LessonSlot>,
    filter: LessonFilter,
    index: GridIndex,
    pager: ColumnPager,
    calendar: AcademicCalendar,
    selected_date: NaiveDate,
    engine: PlacementEngine,
    load_seq: u64,
    list_generation: u64,
    pending_load: Option<LoadTicket>,
    save_in_flight: bool,
    revision: u64,
    saved_revision: u64,
}

impl TimetableSession {
    /// Creates an empty session showing the week of `today`.
    pub fn new(
        level: Level,
        calendar: AcademicCalendar,
        today: NaiveDate,
        page_size: usize,
    ) -> Self {
        Self {
            level,
            lessons: Vec::new(),
            filter: LessonFilter::default(),
            index: GridIndex::default(),
            pager: ColumnPager::new(page_size),
            calendar,
            selected_date: today,
            engine: PlacementEngine::new(),
            load_seq: 0,
            list_generation: 0,
            pending_load: None,
            save_in_flight: false,
            revision: 0,
            saved_revision: 0,
        }
    }

    /// Creates a session from configuration.
    pub fn from_config(config: &TimetableConfig, level: Level, today: NaiveDate) -> Self {
        Self::new(
            level,
            config.academic_calendar(today),
            today,
            config.grid.page_size,
        )
    }

    // ==================== Load / Save ====================

    /// Starts loading `level`. Supersedes any load already pending.
    pub fn begin_load(&mut self, level: Level) -> LoadTicket {
        self.load_seq += 1;
        let ticket = LoadTicket {
            level,
            seq: self.load_seq,
        };
        if let Some(previous) = self.pending_load.replace(ticket) {
            debug!("load of {} superseded by load of {}", previous.level, level);
        }
        ticket
    }

    /// Applies a load result if `ticket` is still current.
    ///
    /// On `Err` the previous list is kept and the error is returned.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<LessonSlot>, StoreError>,
    ) -> Result<LoadStatus, SessionError> {
        if self.pending_load != Some(ticket) {
            debug!("discarding stale load of {}", ticket.level);
            return Ok(LoadStatus::Discarded);
        }
        self.pending_load = None;

        let mut lessons = match result {
            Ok(lessons) => lessons,
            Err(e) => {
                warn!(
                    "load of {} failed, keeping {} lessons of {}: {}",
                    ticket.level,
                    self.lessons.len(),
                    self.level,
                    e
                );
                return Err(e.into());
            }
        };

        let refreshed = refresh_cached_times(&mut lessons);
        if refreshed > 0 {
            debug!("refreshed cached time on {refreshed} lessons");
        }
        if let Err(errors) = validate_lessons(&lessons) {
            for e in &errors {
                warn!("{} schedule: {}", ticket.level, e.message);
            }
        }

        let count = lessons.len();
        self.level = ticket.level;
        self.lessons = lessons;
        self.list_generation += 1;
        self.revision += 1;
        self.saved_revision = self.revision;
        self.rebuild();
        info!("loaded {} lessons for {}", count, self.level);
        Ok(LoadStatus::Applied { lessons: count })
    }

    /// Loads `level` from `store`.
    pub async fn load_level<S>(
        &mut self,
        store: &S,
        level: Level,
    ) -> Result<LoadStatus, SessionError>
    where
        S: ScheduleStore + ?Sized,
    {
        let ticket = self.begin_load(level);
        let result = store.load(level).await;
        self.complete_load(ticket, result)
    }

    /// Snapshots the list for saving. Only one save may be in flight.
    pub fn begin_save(&mut self) -> Result<SaveTicket, SessionError> {
        if self.pending_load.is_some() {
            return Err(SessionError::Loading);
        }
        if self.save_in_flight {
            return Err(SessionError::SaveInFlight);
        }
        self.save_in_flight = true;
        Ok(SaveTicket {
            level: self.level,
            lessons: self.lessons.clone(),
            generation: self.list_generation,
            revision: self.revision,
        })
    }

    /// Records the outcome of a save started with `begin_save`.
    pub fn complete_save(
        &mut self,
        ticket: &SaveTicket,
        result: Result<(), StoreError>,
    ) -> Result<SaveStatus, SessionError> {
        self.save_in_flight = false;
        if ticket.generation != self.list_generation || ticket.level != self.level {
            debug!("ignoring save result for {}", ticket.level);
            return Ok(SaveStatus::Discarded);
        }
        result?;
        self.saved_revision = self.saved_revision.max(ticket.revision);
        info!("saved {} lessons for {}", ticket.lessons.len(), ticket.level);
        Ok(SaveStatus::Saved)
    }

    /// Saves the current list to `store`.
    pub async fn save<S>(&mut self, store: &S) -> Result<SaveStatus, SessionError>
    where
        S: ScheduleStore + ?Sized,
    {
        let ticket = self.begin_save()?;
        let result = store.save(ticket.level, &ticket.lessons).await;
        self.complete_save(&ticket, result)
    }

    // ==================== Commands ====================

    /// Applies a placement command.
    pub fn apply(&mut self, command: &Command) -> Result<Outcome, SessionError> {
        if self.pending_load.is_some() {
            return Err(SessionError::Loading);
        }
        let outcome = self.engine.apply(&mut self.lessons, command)?;
        if outcome.is_change() {
            self.revision += 1;
            self.rebuild();
        }
        Ok(outcome)
    }

    /// Moves a lesson onto a cell (drag-and-drop drop).
    pub fn move_lesson(
        &mut self,
        lesson_id: &str,
        destination: Cell,
    ) -> Result<Outcome, SessionError> {
        self.apply(&Command::move_to(lesson_id, destination))
    }

    pub fn toggle_pin(&mut self, lesson_id: &str) -> Result<Outcome, SessionError> {
        self.apply(&Command::toggle_pin(lesson_id))
    }

    /// Changes the display filter. The page is re-clamped to the new
    /// group set.
    pub fn set_filter(&mut self, course: Option<u8>, parity: Option<Parity>) {
        self.filter = LessonFilter::new(course, parity);
        self.rebuild();
    }

    pub fn set_page(&mut self, page: usize) {
        self.pager.set_page(page);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.pager.set_page_size(page_size);
    }

    /// Selects the week containing `date`.
    pub fn set_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    pub fn next_week(&mut self) {
        let index = self.week_index().saturating_add(1);
        self.selected_date = self.calendar.week_start(index);
    }

    pub fn prev_week(&mut self) {
        let index = self.week_index().saturating_sub(1).max(1);
        self.selected_date = self.calendar.week_start(index);
    }

    fn rebuild(&mut self) {
        self.index = GridIndex::build_filtered(&self.lessons, &self.filter);
        self.pager.set_groups(self.index.groups().to_vec());
    }

    // ==================== Read Model ====================

    /// Level of the loaded list.
    pub fn level(&self) -> Level {
        self.level
    }

    pub fn lessons(&self) -> &[LessonSlot] {
        &self.lessons
    }

    /// Group columns on the current page.
    pub fn visible_groups(&self) -> &[String] {
        self.pager.visible_groups()
    }

    /// All group columns passing the filter.
    pub fn groups(&self) -> &[String] {
        self.pager.groups()
    }

    /// Lessons in a cell that pass the filter.
    pub fn cell(&self, weekday: u8, pair: u8, group: &str) -> Vec<&LessonSlot> {
        self.index.cell(&self.lessons, weekday, pair, group)
    }

    pub fn current_page(&self) -> usize {
        self.pager.page()
    }

    pub fn max_page(&self) -> usize {
        self.pager.max_page()
    }

    pub fn page_size(&self) -> usize {
        self.pager.page_size()
    }

    pub fn filter(&self) -> LessonFilter {
        self.filter
    }

    pub fn calendar(&self) -> &AcademicCalendar {
        &self.calendar
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    /// Clamped academic week of the selected date.
    pub fn week_index(&self) -> u32 {
        self.calendar.week_index(self.selected_date)
    }

    /// "Week N · DD.MM – DD.MM" for the selected week.
    pub fn week_label(&self) -> String {
        self.calendar.week_label(self.selected_date)
    }

    pub fn week_parity(&self) -> WeekParity {
        self.calendar.parity(self.selected_date)
    }

    /// "odd" or "even".
    pub fn parity_label(&self) -> &'static str {
        self.week_parity().as_str()
    }

    /// Dates Monday..Sunday of the selected week, for column headers.
    pub fn week_dates(&self) -> [NaiveDate; 7] {
        week_dates(self.calendar.week_start(self.week_index()))
    }

    /// Cells with unexpected occupancy in the current view.
    pub fn integrity_warnings(&self) -> &[IntegrityWarning] {
        self.index.warnings()
    }

    /// Whether a load is pending (grid read-only).
    pub fn is_loading(&self) -> bool {
        self.pending_load.is_some()
    }

    pub fn is_saving(&self) -> bool {
        self.save_in_flight
    }

    /// Whether there are edits not yet saved.
    pub fn is_dirty(&self) -> bool {
        self.revision != self.saved_revision
    }
}
