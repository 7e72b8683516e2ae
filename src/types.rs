//! Type definitions and constants for the calendar window.

use std::fmt;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::dates::parse_iso_date;

/// Opaque event identifier as sent by the event source (numeric or textual).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventId {
    Int(i64),
    Text(String),
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventId::Int(n) => write!(f, "{}", n),
            EventId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for EventId {
    fn from(n: i64) -> Self {
        EventId::Int(n)
    }
}

impl From<i32> for EventId {
    fn from(n: i32) -> Self {
        EventId::Int(n.into())
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        EventId::Text(s.to_string())
    }
}

/// Expiration status computed by the event source relative to its notice window.
///
/// Never recomputed here; used only for grouping and coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventStatus {
    #[serde(alias = "VENCIDO")]
    Overdue,
    #[serde(alias = "PROXIMO")]
    Upcoming,
    #[serde(alias = "VIGENTE")]
    Current,
}

impl EventStatus {
    /// Overdue and upcoming documents still need attention.
    pub fn is_pending(self) -> bool {
        matches!(self, EventStatus::Overdue | EventStatus::Upcoming)
    }

    /// Lower is more urgent.
    pub fn urgency(self) -> u8 {
        match self {
            EventStatus::Overdue => 0,
            EventStatus::Upcoming => 1,
            EventStatus::Current => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EventStatus::Overdue => "overdue",
            EventStatus::Upcoming => "upcoming",
            EventStatus::Current => "current",
        }
    }

    /// Single-character marker drawn next to a day number.
    pub fn marker(self) -> char {
        match self {
            EventStatus::Overdue => '!',
            EventStatus::Upcoming => '*',
            EventStatus::Current => '+',
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            EventStatus::Overdue => COLOR_RED,
            EventStatus::Upcoming => COLOR_SAND_YELLOW,
            EventStatus::Current => COLOR_TEAL,
        }
    }
}

/// A dated document/obligation as supplied by the event source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: EventId,
    pub title: String,
    pub category: String,
    /// Raw due date (`YYYY-MM-DD`, or a date-time truncated to its day).
    pub due_date: String,
    pub status: EventStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CalendarEvent {
    pub fn new(
        id: impl Into<EventId>,
        title: impl Into<String>,
        category: impl Into<String>,
        due_date: impl Into<String>,
        status: EventStatus,
    ) -> Self {
        CalendarEvent {
            id: id.into(),
            title: title.into(),
            category: category.into(),
            due_date: due_date.into(),
            status,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Calendar day of `due_date`, or `None` when it cannot be parsed.
    pub fn due_day(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.due_date)
    }
}

/// Construction options for a calendar window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowOptions {
    /// Initial value of the pending-only filter.
    pub pending_only_default: bool,
    /// Initial category filter.
    pub default_category_filter: Option<String>,
}

/// Outcome of replacing the loaded events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub accepted: usize,
    pub skipped: usize,
}

/// Per-status event counts used for the chip line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub overdue: usize,
    pub upcoming: usize,
    pub current: usize,
}

impl StatusCounts {
    pub fn add(&mut self, status: EventStatus) {
        match status {
            EventStatus::Overdue => self.overdue += 1,
            EventStatus::Upcoming => self.upcoming += 1,
            EventStatus::Current => self.current += 1,
        }
    }

    pub fn pending(&self) -> usize {
        self.overdue + self.upcoming
    }

    pub fn total(&self) -> usize {
        self.overdue + self.upcoming + self.current
    }
}

/// Terminal display options for a rendered window.
#[derive(Clone, Debug)]
pub struct DisplayContext {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
    /// Today's date for highlighting.
    pub today: NaiveDate,
    /// Whether to list the month's events under the grid.
    pub agenda: bool,
    /// Maximum agenda line width (`None` = unlimited).
    pub max_width: Option<usize>,
}

// The grid is always laid out Monday-first.
pub const WEEK_START: Weekday = Weekday::Mon;
pub const DAYS_PER_WEEK: usize = 7;

// Width of one day cell: two digits plus a status marker.
pub const CELL_WIDTH: usize = 3;
pub const GRID_WIDTH: usize = CELL_WIDTH * DAYS_PER_WEEK + DAYS_PER_WEEK - 1;

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

// Color is enabled by default for better user experience
pub const COLOR_ENABLED_BY_DEFAULT: bool = true;

// ANSI color codes
pub const COLOR_RESET: &str = "\x1b[0m";
pub const COLOR_REVERSE: &str = "\x1b[7m";
pub const COLOR_DIM: &str = "\x1b[2m";
pub const COLOR_RED: &str = "\x1b[91m";
pub const COLOR_TEAL: &str = "\x1b[96m";
pub const COLOR_SAND_YELLOW: &str = "\x1b[93m";
