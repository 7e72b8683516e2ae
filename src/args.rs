//! Command-line argument parsing using clap.
//!
//! Arguments follow the `cal` convention: `[[month] year]`.

use std::io::IsTerminal;
use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use clap::{Parser, ValueHint};

use crate::clock::Clock;
use crate::dates::{month_from_parts, parse_month};
use crate::error::CalendarError;
use crate::formatter::get_terminal_width;
use crate::types::{COLOR_ENABLED_BY_DEFAULT, DisplayContext, MAX_YEAR, MIN_YEAR, WindowOptions};

#[derive(Parser, Debug)]
#[command(name = "vencimientos")]
#[command(about = "Displays the monthly expirations calendar", long_about = None)]
#[command(version)]
#[command(after_help = HELP_MESSAGE)]
pub struct Args {
    /// JSON file with the events to display.
    #[arg(
        short = 'e',
        long,
        env = "VENCIMIENTOS_EVENTS",
        value_name = "file",
        value_hint = ValueHint::FilePath,
        help_heading = "Event options"
    )]
    pub events: Option<PathBuf>,

    /// Only show events of this category (document type).
    #[arg(short = 't', long = "tipo", value_name = "category", help_heading = "Event options")]
    pub category: Option<String>,

    /// Only show pending (overdue or upcoming) events.
    #[arg(short = 'p', long, help_heading = "Event options")]
    pub pending: bool,

    /// List the categories present in the events file and exit.
    #[arg(long, help_heading = "Event options")]
    pub categories: bool,

    /// Move forward this many months from the selected month.
    #[arg(long, value_name = "num", help_heading = "Navigation")]
    pub next: Option<u32>,

    /// Move back this many months from the selected month.
    #[arg(long, value_name = "num", help_heading = "Navigation")]
    pub prev: Option<u32>,

    /// Month (1-12 or name) - optional, used with year.
    #[arg(index = 1, default_value = None, value_name = "month", value_hint = ValueHint::Other)]
    pub month_arg: Option<String>,

    /// Year (1-9999).
    #[arg(index = 2, default_value = None, value_name = "year", value_hint = ValueHint::Other)]
    pub year_arg: Option<String>,

    /// List the month's events under the calendar.
    #[arg(short = 'a', long, help_heading = "Output options")]
    pub agenda: bool,

    /// Disable colorized output.
    #[arg(long, help_heading = "Output options")]
    pub color: bool,
}

/// Help message displayed with --help.
const HELP_MESSAGE: &str = "Display the expirations calendar for a month.

Without any arguments, display the current month.

Markers: ! overdue, * upcoming, + current

Examples:
  vencimientos                       Display current month
  vencimientos 3 2024                Display March 2024
  vencimientos marzo                 Display March of the current year
  vencimientos -e docs.json -a       Display events and the month's agenda
  vencimientos -e docs.json -p       Only pending documents
  vencimientos -e docs.json -t Permit
  vencimientos --next 2              Display the month after next";

impl Args {
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Signed month offset requested by `--next`/`--prev`.
    pub fn month_offset(&self) -> Result<i32, CalendarError> {
        let next = i32::try_from(self.next.unwrap_or(0))
            .map_err(|_| CalendarError::InvalidArgument("--next value too large".to_string()))?;
        let prev = i32::try_from(self.prev.unwrap_or(0))
            .map_err(|_| CalendarError::InvalidArgument("--prev value too large".to_string()))?;
        Ok(next - prev)
    }

    pub fn window_options(&self) -> WindowOptions {
        WindowOptions {
            pending_only_default: self.pending,
            default_category_filter: self.category.clone(),
        }
    }
}

impl DisplayContext {
    pub fn new(args: &Args, clock: &dyn Clock) -> Self {
        let is_terminal = std::io::stdout().is_terminal();
        let color = !args.color && COLOR_ENABLED_BY_DEFAULT && is_terminal;
        let max_width = if is_terminal {
            get_terminal_width()
        } else {
            None
        };

        DisplayContext {
            color,
            today: clock.today(),
            agenda: args.agenda,
            max_width,
        }
    }
}

/// Calculate the month to display from positional arguments.
///
/// Argument patterns:
/// - no args: current month
/// - 1 arg: year (4 digits) or month (number or name)
/// - 2 args: month year
pub fn get_display_month(args: &Args, today: NaiveDate) -> Result<NaiveDate, CalendarError> {
    match (args.month_arg.as_deref(), args.year_arg.as_deref()) {
        (None, None) => month_from_parts(today.year(), today.month()),
        (Some(val), None) => {
            if let Ok(num) = val.parse::<i32>()
                && (1000..=MAX_YEAR).contains(&num)
            {
                return month_from_parts(num, today.month());
            }
            let month = parse_month(val).ok_or_else(|| {
                CalendarError::InvalidArgument(format!("Invalid argument: {}", val))
            })?;
            month_from_parts(today.year(), month)
        }
        (Some(month_str), Some(year_str)) => {
            let month = parse_month(month_str).ok_or_else(|| {
                CalendarError::InvalidArgument(format!("Invalid month: {}", month_str))
            })?;
            let year = year_str.parse::<i32>().map_err(|_| {
                CalendarError::InvalidArgument(format!("Invalid year: {}", year_str))
            })?;
            if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
                return Err(CalendarError::InvalidArgument(format!(
                    "Invalid year: {} (must be 1-9999)",
                    year
                )));
            }
            month_from_parts(year, month)
        }
        (None, Some(_)) => Err(CalendarError::InvalidArgument(
            "Invalid argument combination".to_string(),
        )),
    }
}
