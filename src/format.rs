//! # Text Formatting Module
//!
//! Human-readable renderings of engine output for the dashboard text:
//! absolute dates in the event time zone, strict relative distances
//! ("in 3 hours", "12 minutes ago"), run times and target numbers.

use chrono::{DateTime, FixedOffset, Offset, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Time zone used for every absolute date on the page
#[derive(Debug, Clone)]
pub struct DisplayZone {
    offset: FixedOffset,
    name: String,
}

impl DisplayZone {
    /// `offset_seconds` is east of UTC; out-of-range offsets fall back to UTC
    pub fn new(offset_seconds: i32, name: impl Into<String>) -> Self {
        let offset = FixedOffset::east_opt(offset_seconds).unwrap_or_else(|| {
            log::warn!("Invalid UTC offset {}s, using UTC", offset_seconds);
            Utc.fix()
        });
        Self {
            offset,
            name: name.into(),
        }
    }

    pub fn utc() -> Self {
        Self::new(0, "UTC")
    }

    /// Convert a unix timestamp to a zoned date, `None` if out of range
    pub fn to_local(&self, ts: f64) -> Option<DateTime<FixedOffset>> {
        if !ts.is_finite() {
            return None;
        }
        let secs = ts.floor();
        let nanos = ((ts - secs) * 1e9) as u32;
        DateTime::<Utc>::from_timestamp(secs as i64, nanos).map(|dt| dt.with_timezone(&self.offset))
    }

    /// `M/d HH:mm <zone>`, e.g. `7/4 09:05 PDT`
    pub fn absolute(&self, ts: f64) -> String {
        match self.to_local(ts) {
            Some(local) if self.name.is_empty() => local.format("%-m/%-d %H:%M UTC%:z").to_string(),
            Some(local) => format!("{} {}", local.format("%-m/%-d %H:%M"), self.name),
            None => "unknown date".to_string(),
        }
    }

    /// Axis tick label: `M/d HH:mm` without the zone
    pub fn tick(&self, ts: f64) -> String {
        self.to_local(ts)
            .map(|local| local.format("%-m/%-d %H:%M").to_string())
            .unwrap_or_default()
    }
}

/// Strict distance between `ts` and `now`, floored to the largest whole unit
pub fn relative_time(ts: f64, now: f64) -> String {
    let delta = ts - now;
    let secs = delta.abs().floor() as i64;

    let (count, unit) = if secs < MINUTE {
        (secs, "second")
    } else if secs < HOUR {
        (secs / MINUTE, "minute")
    } else if secs < DAY {
        (secs / HOUR, "hour")
    } else if secs < MONTH {
        (secs / DAY, "day")
    } else if secs < YEAR {
        (secs / MONTH, "month")
    } else {
        (secs / YEAR, "year")
    };

    let plural = if count == 1 { "" } else { "s" };
    if delta >= 0.0 {
        format!("in {} {}{}", count, unit, plural)
    } else {
        format!("{} {}{} ago", count, unit, plural)
    }
}

/// Elapsed time as zero-padded `HH:MM:SS`; hours are not wrapped at 24
pub fn runtime_text(start: f64, end: f64) -> String {
    let total = (end - start).round().max(0.0) as i64;
    let hours = total / HOUR;
    let minutes = (total % HOUR) / MINUTE;
    let seconds = total % MINUTE;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Render a number with `,` thousands separators and at most three decimals
pub fn group_thousands(x: f64) -> String {
    let rendered = format!("{:.3}", x.abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if x < 0.0 && rendered.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}
