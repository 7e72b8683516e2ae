//! Event sources: the query a window asks for and a JSON-file backed source.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar::CalendarWindow;
use crate::error::CalendarError;
use crate::types::{CalendarEvent, LoadSummary};

/// Request for the events of one window, as sent to the expirations endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventQuery {
    /// First day of the range (inclusive).
    pub desde: NaiveDate,
    /// Last day of the range (inclusive).
    pub hasta: NaiveDate,
    pub solo_pendientes: bool,
    /// Category (document type) filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo: Option<String>,
}

impl EventQuery {
    /// URL query string, e.g. `desde=2024-02-26&hasta=2024-03-31&soloPendientes=false`.
    pub fn to_query_string(&self) -> Result<String, CalendarError> {
        Ok(serde_qs::to_string(self)?)
    }

    /// Whether `event` belongs in this query's response.
    ///
    /// Events with an unparseable due date are kept so the window can count them.
    pub fn matches(&self, event: &CalendarEvent) -> bool {
        let in_range = event
            .due_day()
            .is_none_or(|day| self.desde <= day && day <= self.hasta);
        let in_category = self
            .tipo
            .as_deref()
            .is_none_or(|tipo| event.category == tipo);
        let pending = !self.solo_pendientes || event.status.is_pending();
        in_range && in_category && pending
    }
}

pub trait EventSource {
    fn fetch(&self, query: &EventQuery) -> Result<Vec<CalendarEvent>, CalendarError>;
}

/// Events read from a JSON array on disk, filtered like the remote endpoint.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        JsonFileSource {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every event in the file, unfiltered.
    pub fn read_all(&self) -> Result<Vec<CalendarEvent>, CalendarError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| CalendarError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| CalendarError::Json {
            path: self.path.clone(),
            source,
        })
    }
}

impl EventSource for JsonFileSource {
    fn fetch(&self, query: &EventQuery) -> Result<Vec<CalendarEvent>, CalendarError> {
        let events: Vec<CalendarEvent> = self
            .read_all()?
            .into_iter()
            .filter(|event| query.matches(event))
            .collect();
        log::debug!(
            "{}: {} events for {:?}",
            self.path.display(),
            events.len(),
            query
        );
        Ok(events)
    }
}

/// In-memory source, handy for wiring a window without a file.
impl EventSource for Vec<CalendarEvent> {
    fn fetch(&self, query: &EventQuery) -> Result<Vec<CalendarEvent>, CalendarError> {
        Ok(self
            .iter()
            .filter(|event| query.matches(event))
            .cloned()
            .collect())
    }
}

/// Fetch every event in the window's range from `source` and load the result.
///
/// Filters are applied by the window afterwards, never by the source.
pub fn refresh(
    window: &mut CalendarWindow,
    source: &dyn EventSource,
) -> Result<LoadSummary, CalendarError> {
    let query = window.query();
    let events = source.fetch(&query)?;
    Ok(window.load_events(events))
}
