//! Terminal rendering of a calendar window with localization and color support.

use chrono::{Datelike, Locale, NaiveDate, Weekday};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::calendar::CalendarWindow;
use crate::dates::to_iso_date;
use crate::types::{
    CELL_WIDTH, COLOR_DIM, COLOR_RESET, COLOR_REVERSE, COLOR_SAND_YELLOW, COLOR_TEAL,
    DisplayContext, EventStatus, GRID_WIDTH,
};

/// Locale for month and weekday names in the grid header
/// (LC_ALL > LC_TIME > LANG > en_US).
pub fn get_system_locale() -> Locale {
    std::env::var("LC_ALL")
        .or_else(|_| std::env::var("LC_TIME"))
        .or_else(|_| std::env::var("LANG"))
        .unwrap_or_else(|_| "en_US.UTF-8".to_string())
        .split('.')
        .next()
        .unwrap_or("en_US")
        .split('@')
        .next()
        .unwrap_or("en_US")
        .parse()
        .unwrap_or(Locale::en_US)
}

/// Get month name in nominative case for the given locale.
pub fn get_month_name(month: u32, locale: Locale) -> String {
    match NaiveDate::from_ymd_opt(2000, month, 1) {
        Some(date) => {
            let name = date.format_localized("%B", locale).to_string();
            capitalize(&name)
        }
        None => month.to_string(),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Format month header with year and optional color.
pub fn format_month_header(month: NaiveDate, locale: Locale, color: bool) -> String {
    let header = format!("{} {}", get_month_name(month.month(), locale), month.year());
    let centered = center_text(&header, GRID_WIDTH);
    if color {
        format!("{}{}{}", COLOR_TEAL, centered, COLOR_RESET)
    } else {
        centered
    }
}

/// Center the month header over the day grid, measuring display width.
fn center_text(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width >= width {
        return text.to_string();
    }
    let total_padding = width - text_width;
    let left_padding = total_padding.div_ceil(2);
    let right_padding = total_padding - left_padding;
    format!(
        "{}{}{}",
        " ".repeat(left_padding),
        text,
        " ".repeat(right_padding)
    )
}

/// Weekday columns, Monday first.
pub fn get_weekday_order() -> [Weekday; 7] {
    [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ]
}

/// Get 2-character weekday abbreviation for the given locale.
pub fn get_weekday_short_name(weekday: Weekday, locale: Locale) -> String {
    let base_date = NaiveDate::from_ymd_opt(2000, 1, 3).unwrap_or_default();
    let offset = weekday.num_days_from_monday() as i64;
    let date = base_date + chrono::Duration::days(offset);
    let day_name = date.format_localized("%a", locale).to_string();
    capitalize(&day_name.chars().take(2).collect::<String>())
}

/// Format weekday header row, one name per grid column.
pub fn format_weekday_headers(locale: Locale, color: bool) -> String {
    let cells: Vec<String> = get_weekday_order()
        .iter()
        .map(|&weekday| pad_right(&get_weekday_short_name(weekday, locale), CELL_WIDTH))
        .collect();
    let row = cells.join(" ");
    if color {
        format!("{}{}{}", COLOR_SAND_YELLOW, row, COLOR_RESET)
    } else {
        row
    }
}

fn pad_right(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(padding))
}

/// Most urgent status among the (filtered) events of a day.
pub fn day_status(window: &CalendarWindow, day: NaiveDate) -> Option<EventStatus> {
    window
        .events_for_day(day)
        .iter()
        .map(|event| event.status)
        .min_by_key(|status| status.urgency())
}

/// Format one day cell: right-aligned day number and a status marker.
///
/// Color priority for the number: today > outside month > regular.
fn format_day(ctx: &DisplayContext, window: &CalendarWindow, day: NaiveDate) -> String {
    let status = day_status(window, day);
    let marker = status.map_or(' ', EventStatus::marker);
    let day_str = format!("{:>2}", day.day());

    if !ctx.color {
        return format!("{}{}", day_str, marker);
    }

    let number = if day == ctx.today {
        format!("{}{}{}", COLOR_REVERSE, day_str, COLOR_RESET)
    } else if !window.is_in_current_month(day) {
        format!("{}{}{}", COLOR_DIM, day_str, COLOR_RESET)
    } else {
        day_str
    };
    match status {
        Some(status) => format!("{}{}{}{}", number, status.color(), marker, COLOR_RESET),
        None => format!("{}{}", number, marker),
    }
}

/// Format the window as grid lines: header, weekday row, one row per week.
pub fn format_window_grid(ctx: &DisplayContext, window: &CalendarWindow) -> Vec<String> {
    let locale = get_system_locale();
    let weeks = window.weeks();
    let mut lines = Vec::with_capacity(weeks.len() + 2);

    lines.push(format_month_header(window.current_month(), locale, ctx.color));
    lines.push(format_weekday_headers(locale, ctx.color));

    for week in &weeks {
        let cells: Vec<String> = week
            .iter()
            .map(|&day| format_day(ctx, window, day))
            .collect();
        lines.push(cells.join(" "));
    }

    lines
}

/// Format the status chip line for the viewed month.
pub fn format_status_chips(window: &CalendarWindow, color: bool) -> String {
    let counts = window.status_counts();
    [
        (EventStatus::Overdue, counts.overdue),
        (EventStatus::Upcoming, counts.upcoming),
        (EventStatus::Current, counts.current),
    ]
    .iter()
    .map(|&(status, count)| {
        if color {
            format!("{}{}{} {}", status.color(), status.label(), COLOR_RESET, count)
        } else {
            format!("{} {}", status.label(), count)
        }
    })
    .collect::<Vec<_>>()
    .join("  ")
}

/// Format one agenda line per filtered event in the viewed month.
pub fn format_agenda(ctx: &DisplayContext, window: &CalendarWindow) -> Vec<String> {
    window
        .month_events()
        .into_iter()
        .map(|(day, event)| {
            let line = format!(
                "{} {} {}: {}",
                to_iso_date(day),
                event.status.marker(),
                event.category,
                event.title
            );
            match ctx.max_width {
                Some(width) => truncate_to_width(&line, width),
                None => line,
            }
        })
        .collect()
}

/// Cut `text` to at most `width` columns, marking the cut with an ellipsis.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut result = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        result.push(c);
        used += w;
    }
    if width > 0 {
        result.push('…');
    }
    result
}

/// Format the full view: grid, chips and (optionally) the agenda.
pub fn format_window(ctx: &DisplayContext, window: &CalendarWindow) -> Vec<String> {
    let mut lines = format_window_grid(ctx, window);
    lines.push(String::new());
    lines.push(format_status_chips(window, ctx.color));

    if ctx.agenda {
        let agenda = format_agenda(ctx, window);
        lines.push(String::new());
        if agenda.is_empty() {
            lines.push("no events".to_string());
        } else {
            lines.extend(agenda);
        }
    }
    lines
}

/// Print the full view of a window.
pub fn print_window(ctx: &DisplayContext, window: &CalendarWindow) {
    for line in format_window(ctx, window) {
        println!("{}", line);
    }
}

/// Print one category per line.
pub fn print_categories(window: &CalendarWindow) {
    for category in window.distinct_categories() {
        println!("{}", category);
    }
}

/// Terminal width, when stdout is a terminal.
pub fn get_terminal_width() -> Option<usize> {
    terminal_size::terminal_size().map(|(w, _)| w.0 as usize)
}
