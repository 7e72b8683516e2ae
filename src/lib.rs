//! Monthly expirations calendar: a month window padded to whole weeks over a
//! flat list of dated document events.
//!
//! Features:
//! - Monday-first month windows with month navigation
//! - Grouping of events by due day, in load order
//! - Category and pending-only filters, status chip counts
//! - JSON event files and a terminal renderer for the CLI

pub mod args;
pub mod calendar;
pub mod clock;
pub mod dates;
pub mod error;
pub mod formatter;
pub mod source;
pub mod types;
