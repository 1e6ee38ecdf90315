//! Rendering of PHP `date()` patterns.
//!
//! `date_format` validation rules carry PHP format characters (`Y-m-d`,
//! `d/m/Y H:i`, ...). Each recognised character expands to a component of
//! the instant; a backslash copies the next character verbatim and every
//! other character is copied as is.

use std::fmt::Write;

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};

/// The pattern used when a date has no explicit format.
pub const DEFAULT_DATE_FORMAT: &str = "Y-m-d";

/// Render `instant` with a PHP `date()` pattern.
pub fn format_php_date(instant: &DateTime<Utc>, pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
            continue;
        }
        push_component(&mut out, instant, c);
    }

    out
}

fn push_component(out: &mut String, dt: &DateTime<Utc>, c: char) {
    // Writing to a String cannot fail.
    let _ = match c {
        // Day
        'd' => write!(out, "{:02}", dt.day()),
        'D' => write!(out, "{}", dt.format("%a")),
        'j' => write!(out, "{}", dt.day()),
        'l' => write!(out, "{}", dt.format("%A")),
        'N' => write!(out, "{}", dt.weekday().number_from_monday()),
        'S' => write!(out, "{}", ordinal_suffix(dt.day())),
        'w' => write!(out, "{}", dt.weekday().num_days_from_sunday()),
        'z' => write!(out, "{}", dt.ordinal0()),
        // Week
        'W' => write!(out, "{:02}", dt.iso_week().week()),
        // Month
        'F' => write!(out, "{}", dt.format("%B")),
        'm' => write!(out, "{:02}", dt.month()),
        'M' => write!(out, "{}", dt.format("%b")),
        'n' => write!(out, "{}", dt.month()),
        't' => write!(out, "{}", days_in_month(dt.year(), dt.month())),
        // Year
        'L' => write!(out, "{}", u8::from(is_leap_year(dt.year()))),
        'o' => write!(out, "{}", dt.iso_week().year()),
        'Y' => write!(out, "{}", dt.year()),
        'y' => write!(out, "{:02}", dt.year().rem_euclid(100)),
        // Time
        'a' => write!(out, "{}", if dt.hour() < 12 { "am" } else { "pm" }),
        'A' => write!(out, "{}", if dt.hour() < 12 { "AM" } else { "PM" }),
        'g' => write!(out, "{}", dt.hour12().1),
        'G' => write!(out, "{}", dt.hour()),
        'h' => write!(out, "{:02}", dt.hour12().1),
        'H' => write!(out, "{:02}", dt.hour()),
        'i' => write!(out, "{:02}", dt.minute()),
        's' => write!(out, "{:02}", dt.second()),
        'u' => write!(out, "{:06}", dt.timestamp_subsec_micros()),
        'v' => write!(out, "{:03}", dt.timestamp_subsec_millis()),
        // Timezone; instants are always UTC.
        'e' | 'T' => out.write_str("UTC"),
        'P' => out.write_str("+00:00"),
        'p' => out.write_str("Z"),
        'O' => out.write_str("+0000"),
        'Z' => out.write_str("0"),
        // Full date/time
        'c' => write!(out, "{}", dt.format("%Y-%m-%dT%H:%M:%S+00:00")),
        'r' => write!(out, "{}", dt.format("%a, %d %b %Y %H:%M:%S +0000")),
        'U' => write!(out, "{}", dt.timestamp()),
        other => {
            out.push(other);
            Ok(())
        }
    };
}

fn ordinal_suffix(day: u32) -> &'static str {
    match day {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}

fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}
