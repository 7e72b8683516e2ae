//! Month window padded to whole weeks, with day grouping and filters.

use std::collections::{BTreeSet, HashMap};

use chrono::{Datelike, NaiveDate};

use crate::clock::Clock;
use crate::dates::{
    add_months, end_of_month, month_from_parts, start_of_month, to_iso_date, week_aligned_end,
    week_aligned_start,
};
use crate::error::CalendarError;
use crate::source::EventQuery;
use crate::types::{
    CalendarEvent, DAYS_PER_WEEK, LoadSummary, StatusCounts, WEEK_START, WindowOptions,
};

/// A loaded event together with its parsed due day.
#[derive(Debug, Clone)]
struct DatedEvent {
    day: NaiveDate,
    event: CalendarEvent,
}

/// Navigable month view over a set of dated events.
///
/// The window never performs I/O: after navigating, the caller fetches events
/// for [`CalendarWindow::query`] and hands them to [`CalendarWindow::load_events`].
#[derive(Debug, Clone)]
pub struct CalendarWindow {
    current_month: NaiveDate,
    range_start: NaiveDate,
    range_end: NaiveDate,
    events: Vec<DatedEvent>,
    by_day: HashMap<NaiveDate, Vec<usize>>,
    filter_category: Option<String>,
    pending_only: bool,
}

impl CalendarWindow {
    /// Window for the month containing `month` (any day of it).
    ///
    /// Fails with `OutOfRange` when the month cannot be padded to whole weeks
    /// within chrono's date range.
    pub fn new(month: NaiveDate, options: WindowOptions) -> Result<Self, CalendarError> {
        let current_month = start_of_month(month);
        let (range_start, range_end) =
            padded_range(current_month).ok_or(CalendarError::OutOfRange)?;
        Ok(CalendarWindow {
            current_month,
            range_start,
            range_end,
            events: Vec::new(),
            by_day: HashMap::new(),
            filter_category: options.default_category_filter,
            pending_only: options.pending_only_default,
        })
    }

    /// Window for a year/month pair; rejects anything that is not a calendar month.
    pub fn for_month(
        year: i32,
        month: u32,
        options: WindowOptions,
    ) -> Result<Self, CalendarError> {
        let first = month_from_parts(year, month)?;
        Self::new(first, options)
    }

    /// Window for the month containing today's date.
    pub fn for_today(clock: &dyn Clock, options: WindowOptions) -> Result<Self, CalendarError> {
        Self::new(clock.today(), options)
    }

    /// First day of the month being viewed.
    pub fn current_month(&self) -> NaiveDate {
        self.current_month
    }

    pub fn range_start(&self) -> NaiveDate {
        self.range_start
    }

    pub fn range_end(&self) -> NaiveDate {
        self.range_end
    }

    pub fn filter_category(&self) -> Option<&str> {
        self.filter_category.as_deref()
    }

    pub fn pending_only(&self) -> bool {
        self.pending_only
    }

    pub fn next_month(&mut self) -> Result<(), CalendarError> {
        self.shift_months(1)
    }

    pub fn prev_month(&mut self) -> Result<(), CalendarError> {
        self.shift_months(-1)
    }

    /// Move by `n` months (negative goes back). State is untouched on error.
    pub fn shift_months(&mut self, n: i32) -> Result<(), CalendarError> {
        let target = add_months(self.current_month, n).ok_or(CalendarError::OutOfRange)?;
        self.go_to_month(target)
    }

    /// Jump to the month containing `today`.
    pub fn go_to_today(&mut self, today: NaiveDate) -> Result<(), CalendarError> {
        self.go_to_month(today)
    }

    /// Jump to the month containing `date`.
    pub fn go_to_month(&mut self, date: NaiveDate) -> Result<(), CalendarError> {
        let month = start_of_month(date);
        let (range_start, range_end) = padded_range(month).ok_or(CalendarError::OutOfRange)?;
        self.current_month = month;
        self.range_start = range_start;
        self.range_end = range_end;
        log::debug!(
            "viewing {}-{:02}, range {}..{}",
            month.year(),
            month.month(),
            to_iso_date(range_start),
            to_iso_date(range_end)
        );
        Ok(())
    }

    pub fn set_category_filter(&mut self, category: Option<String>) {
        self.filter_category = category;
    }

    pub fn set_pending_only(&mut self, flag: bool) {
        self.pending_only = flag;
    }

    /// Replace the loaded events wholesale.
    ///
    /// Events whose due date cannot be parsed are dropped and counted in
    /// `skipped`; coverage of the current range is not checked.
    pub fn load_events(&mut self, events: Vec<CalendarEvent>) -> LoadSummary {
        self.events.clear();
        self.by_day.clear();
        let mut summary = LoadSummary::default();

        for event in events {
            match event.due_day() {
                Some(day) => {
                    self.by_day.entry(day).or_default().push(self.events.len());
                    self.events.push(DatedEvent { day, event });
                    summary.accepted += 1;
                }
                None => {
                    log::warn!(
                        "skipping event {} ({:?}): unparseable due date {:?}",
                        event.id,
                        event.title,
                        event.due_date
                    );
                    summary.skipped += 1;
                }
            }
        }

        log::info!(
            "loaded {} events ({} skipped)",
            summary.accepted,
            summary.skipped
        );
        summary
    }

    /// Every day from `range_start` to `range_end`, ascending.
    pub fn visible_days(&self) -> Vec<NaiveDate> {
        self.range_start
            .iter_days()
            .take_while(|day| *day <= self.range_end)
            .collect()
    }

    /// Visible days as 7-column rows.
    pub fn weeks(&self) -> Vec<[NaiveDate; DAYS_PER_WEEK]> {
        self.visible_days()
            .chunks_exact(DAYS_PER_WEEK)
            .filter_map(|week| <[NaiveDate; DAYS_PER_WEEK]>::try_from(week).ok())
            .collect()
    }

    pub fn is_in_current_month(&self, date: NaiveDate) -> bool {
        date.year() == self.current_month.year() && date.month() == self.current_month.month()
    }

    /// Filtered events due on `date`, in load order.
    pub fn events_for_day(&self, date: NaiveDate) -> Vec<&CalendarEvent> {
        self.by_day
            .get(&date)
            .into_iter()
            .flatten()
            .map(|&idx| &self.events[idx].event)
            .filter(|event| self.passes_filters(event))
            .collect()
    }

    /// Filtered events due within the viewed month, by day then load order.
    pub fn month_events(&self) -> Vec<(NaiveDate, &CalendarEvent)> {
        let mut events: Vec<(NaiveDate, &CalendarEvent)> = self
            .events
            .iter()
            .filter(|dated| self.is_in_current_month(dated.day))
            .filter(|dated| self.passes_filters(&dated.event))
            .map(|dated| (dated.day, &dated.event))
            .collect();
        // Stable sort keeps load order within a day.
        events.sort_by_key(|(day, _)| *day);
        events
    }

    /// All categories among the loaded events, ignoring active filters.
    pub fn distinct_categories(&self) -> Vec<String> {
        self.events
            .iter()
            .map(|dated| dated.event.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Status chip counts for the viewed month under the category filter.
    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        self.events
            .iter()
            .filter(|dated| self.is_in_current_month(dated.day))
            .filter(|dated| self.matches_category(&dated.event))
            .for_each(|dated| counts.add(dated.event.status));
        counts
    }

    pub fn pending_count(&self) -> usize {
        self.status_counts().pending()
    }

    /// Request for every event in the visible range.
    ///
    /// Category and pending filters stay local to the window, so the category
    /// list and status counts always see the whole range.
    pub fn query(&self) -> EventQuery {
        EventQuery {
            desde: self.range_start,
            hasta: self.range_end,
            solo_pendientes: false,
            tipo: None,
        }
    }

    /// Same range as [`CalendarWindow::query`], narrowed by the active filters
    /// for endpoints that filter server-side.
    pub fn filtered_query(&self) -> EventQuery {
        EventQuery {
            solo_pendientes: self.pending_only,
            tipo: self.filter_category.clone(),
            ..self.query()
        }
    }

    /// Whether a response to `query` still covers the visible range.
    ///
    /// Fetches issued before a navigation compare unequal; filter changes do
    /// not, since filtering happens on loaded events.
    pub fn is_current(&self, query: &EventQuery) -> bool {
        query.desde == self.range_start && query.hasta == self.range_end
    }

    fn matches_category(&self, event: &CalendarEvent) -> bool {
        self.filter_category
            .as_deref()
            .is_none_or(|category| event.category == category)
    }

    fn passes_filters(&self, event: &CalendarEvent) -> bool {
        self.matches_category(event) && (!self.pending_only || event.status.is_pending())
    }
}

/// Month range padded out to whole weeks.
fn padded_range(month: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let start = week_aligned_start(start_of_month(month), WEEK_START)?;
    let end = week_aligned_end(end_of_month(month), WEEK_START)?;
    Some((start, end))
}
