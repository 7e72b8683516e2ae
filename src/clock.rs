//! Source of "today" for the window and the renderer.

use chrono::NaiveDate;

/// Environment variable overriding the system date (`YYYY-MM-DD`), for tests.
pub const TEST_TIME_ENV: &str = "VENCIMIENTOS_TEST_TIME";

pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date, respecting `VENCIMIENTOS_TEST_TIME`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        if let Ok(test_time) = std::env::var(TEST_TIME_ENV)
            && let Ok(date) = NaiveDate::parse_from_str(&test_time, "%Y-%m-%d")
        {
            return date;
        }
        chrono::Local::now().date_naive()
    }
}

/// Always reports the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
