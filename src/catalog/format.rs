// Streamio Core - Native core for the Streamio streaming-catalog client
// Copyright (C) 2025 Streamio contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Display formatting helpers for catalog and video metadata.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// ISO-8601 duration as YouTube emits it, e.g. `PT1H2M3S`
    static ref ISO_DURATION: Regex = Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?$").unwrap();
}

/// Render a runtime in minutes as `2h 14m`. Zero minutes yields `0m`.
pub fn format_runtime(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{hours}h {mins}m")
    } else {
        format!("{mins}m")
    }
}

/// Render a dollar amount with thousands separators, e.g. `$1,234,567`.
pub fn format_money(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Render a view count the way the video list shows it: `1.2M views`,
/// `3.4K views`, or the plain number below a thousand.
pub fn format_view_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M views", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K views", count as f64 / 1_000.0)
    } else {
        format!("{count} views")
    }
}

/// Convert an ISO-8601 duration (`PT1H2M3S`) to a player-style clock,
/// `1:02:03` with hours or `4:05` without. Unparseable input comes back
/// unchanged so the UI still shows something.
pub fn format_duration(iso: &str) -> String {
    let caps = match ISO_DURATION.captures(iso) {
        Some(caps) => caps,
        None => return iso.to_string(),
    };

    let part = |i: usize| -> u64 {
        caps.get(i)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };
    let (hours, minutes, seconds) = (part(1), part(2), part(3));

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_runtime() {
        assert_eq!(format_runtime(134), "2h 14m");
        assert_eq!(format_runtime(60), "1h 0m");
        assert_eq!(format_runtime(45), "45m");
        assert_eq!(format_runtime(0), "0m");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0), "$0");
        assert_eq!(format_money(999), "$999");
        assert_eq!(format_money(1_000), "$1,000");
        assert_eq!(format_money(1_234_567), "$1,234,567");
        assert_eq!(format_money(63_000_000), "$63,000,000");
    }

    #[test]
    fn test_format_view_count() {
        assert_eq!(format_view_count(17), "17 views");
        assert_eq!(format_view_count(3_400), "3.4K views");
        assert_eq!(format_view_count(1_200_000), "1.2M views");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration("PT1H2M3S"), "1:02:03");
        assert_eq!(format_duration("PT4M5S"), "4:05");
        assert_eq!(format_duration("PT58S"), "0:58");
        assert_eq!(format_duration("PT2H"), "2:00:00");
    }

    #[test]
    fn test_format_duration_passes_through_garbage() {
        assert_eq!(format_duration("not-a-duration"), "not-a-duration");
        assert_eq!(format_duration(""), "");
    }
}
