//! Error type shared by the calendar window, the event sources and the CLI.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalendarError {
    /// Year/month pair that does not name a calendar month.
    #[error("invalid month: {month} {year} (month must be 1-12, year 1-9999)")]
    InvalidMonth { year: i32, month: u32 },

    #[error("{0}")]
    InvalidArgument(String),

    /// Navigation left the range of representable dates.
    #[error("date out of range")]
    OutOfRange,

    #[error("cannot read events file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid events file {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot encode event query: {0}")]
    Query(#[from] serde_qs::Error),
}
