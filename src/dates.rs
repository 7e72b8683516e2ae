//! Month boundaries, month arithmetic and week alignment on local calendar days.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::error::CalendarError;
use crate::types::{MAX_YEAR, MIN_YEAR};

/// Gregorian leap year: divisible by 4, except centuries unless divisible by 400.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 30,
    }
}

/// First day of the month containing `date`.
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`.
pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(days_in_month(date.year(), date.month()))
        .unwrap_or(date)
}

/// Shift `date` by `n` whole months.
///
/// A day-of-month that does not exist in the target month is clamped to its
/// last day (Jan 31 + 1 month = end of February). Returns `None` only when the
/// result falls outside the representable date range.
pub fn add_months(date: NaiveDate, n: i32) -> Option<NaiveDate> {
    let total_months = date.year() as i64 * 12 + date.month0() as i64 + n as i64;
    let year = i32::try_from(total_months.div_euclid(12)).ok()?;
    let month = (total_months.rem_euclid(12) + 1) as u32;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Format as `YYYY-MM-DD` from the date's own fields.
pub fn to_iso_date(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Parse a due date: `YYYY-MM-DD`, or an ISO date-time truncated to its day.
///
/// A date-time needs a `T` or space separator followed by a time part; a bare
/// trailing separator is malformed.
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let day_part = match s.get(10..) {
        Some("") => s,
        Some(rest) if rest.len() > 1 && (rest.starts_with('T') || rest.starts_with(' ')) => {
            s.get(..10)?
        }
        _ => return None,
    };
    NaiveDate::parse_from_str(day_part, "%Y-%m-%d").ok()
}

/// Step back to the latest day on or before `date` falling on `week_start`.
pub fn week_aligned_start(date: NaiveDate, week_start: Weekday) -> Option<NaiveDate> {
    let offset = (date.weekday().num_days_from_monday() + 7
        - week_start.num_days_from_monday())
        % 7;
    date.checked_sub_days(Days::new(offset as u64))
}

/// Step forward to the earliest day on or after `date` that closes a week
/// beginning on `week_start`.
pub fn week_aligned_end(date: NaiveDate, week_start: Weekday) -> Option<NaiveDate> {
    let week_end = week_start.pred();
    let offset = (week_end.num_days_from_monday() + 7 - date.weekday().num_days_from_monday())
        % 7;
    date.checked_add_days(Days::new(offset as u64))
}

/// First day of a month given as year and month number, validated.
pub fn month_from_parts(year: i32, month: u32) -> Result<NaiveDate, CalendarError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(CalendarError::InvalidMonth { year, month });
    }
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::InvalidMonth { year, month })
}

/// Parse month from string (numeric 1-12 or name in English/Spanish).
pub fn parse_month(s: &str) -> Option<u32> {
    if let Ok(n) = s.parse::<u32>()
        && (1..=12).contains(&n)
    {
        return Some(n);
    }

    let s_lower = s.to_lowercase();
    let month_names: &[(&str, u32)] = &[
        // English full names
        ("january", 1),
        ("february", 2),
        ("march", 3),
        ("april", 4),
        ("may", 5),
        ("june", 6),
        ("july", 7),
        ("august", 8),
        ("september", 9),
        ("october", 10),
        ("november", 11),
        ("december", 12),
        // Spanish full names
        ("enero", 1),
        ("febrero", 2),
        ("marzo", 3),
        ("abril", 4),
        ("mayo", 5),
        ("junio", 6),
        ("julio", 7),
        ("agosto", 8),
        ("septiembre", 9),
        ("octubre", 10),
        ("noviembre", 11),
        ("diciembre", 12),
        // Short forms
        ("jan", 1),
        ("ene", 1),
        ("feb", 2),
        ("mar", 3),
        ("apr", 4),
        ("abr", 4),
        ("jun", 6),
        ("jul", 7),
        ("aug", 8),
        ("ago", 8),
        ("sep", 9),
        ("oct", 10),
        ("nov", 11),
        ("dec", 12),
        ("dic", 12),
    ];
    month_names
        .iter()
        .find(|(name, _)| *name == s_lower)
        .map(|(_, num)| *num)
}
