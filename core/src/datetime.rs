// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Wire formats for the date and time fields of an event.
//!
//! The backend stores dates as `YYYY-M-D` with an unpadded month and a zero-padded day,
//! and times as `HH:MM`. Existing records depend on that exact shape, so it is kept as is.

use jiff::civil::Date;

/// Formats an hour/minute pair as `HH:MM`.
///
/// Each component is padded to two digits independently. Values are not clamped, so
/// `format_time(100, 5)` yields `"100:05"`.
pub fn format_time(hours: u32, minutes: u32) -> String {
    format!("{}:{}", pad2(hours), pad2(minutes))
}

/// Formats a date as `YYYY-M-D`: month unpadded, day padded below 10.
pub fn format_date(date: Date) -> String {
    let day = pad2(date.day().unsigned_abs().into());
    format!("{:04}-{}-{}", date.year(), date.month(), day)
}

fn pad2(v: u32) -> String {
    if v < 10 { format!("0{v}") } else { v.to_string() }
}

/// Parses a backend date string.
///
/// Accepts `Y-M-D` with or without zero padding, optionally followed by a time part
/// introduced by `T` or a space (as in `2023-01-05T00:00:00.000Z`).
pub fn parse_date(s: &str) -> Option<Date> {
    let s = s.trim();
    let date = s.split(['T', ' ']).next()?;

    let mut parts = date.split('-');
    let year = parts.next()?.parse::<i16>().ok()?;
    let month = parts.next()?.parse::<i8>().ok()?;
    let day = parts.next()?.parse::<i8>().ok()?;
    if parts.next().is_some() {
        return None;
    }

    Date::new(year, month, day).ok()
}

/// Extracts hour and minute from an `HH:MM` string by fixed offsets: the hour is read from
/// characters 0..2 and the minute from characters 3..5.
pub fn parse_time_string(s: &str) -> Option<(u32, u32)> {
    let hour = s.get(0..2)?.trim().parse().ok()?;
    let minute = s.get(3..5)?.trim().parse().ok()?;
    Some((hour, minute))
}

/// Today's date in the system time zone.
pub fn today() -> Date {
    jiff::Zoned::now().date()
}
