//! Commit timestamp formatting.
//!
//! Two styles are supported: a long human-readable form such as
//! `Jan. 1st, 2024, 01:05:09 PM, GMT+0`, and strict ISO 8601 with offset.
//! Output depends only on the instant and the chosen style, never on the
//! process locale or timezone.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, SecondsFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ---------------------------------------------------------------------------
// TimestampFormat
// ---------------------------------------------------------------------------

/// How commit timestamps are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampFormat {
    /// `Jan. 1st, 2024, 01:05:09 PM, GMT+0`
    #[default]
    Readable,
    /// `2024-01-01T13:05:09+00:00`
    Iso,
}

impl TimestampFormat {
    /// Every accepted name, in the order shown to users.
    pub const NAMES: [&'static str; 2] = ["readable", "iso"];

    /// Returns the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Readable => "readable",
            Self::Iso => "iso",
        }
    }
}

impl fmt::Display for TimestampFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a timestamp format name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown timestamp format '{0}' (expected 'readable' or 'iso')")]
pub struct ParseTimestampFormatError(pub String);

impl FromStr for TimestampFormat {
    type Err = ParseTimestampFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "readable" => Ok(Self::Readable),
            "iso" => Ok(Self::Iso),
            _ => Err(ParseTimestampFormatError(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Render `dt` in the requested style.
pub fn format_timestamp(dt: &DateTime<FixedOffset>, format: TimestampFormat) -> String {
    match format {
        TimestampFormat::Readable => format_readable(dt),
        TimestampFormat::Iso => format_iso(dt),
    }
}

/// ISO 8601 with offset; fractional seconds only when present.
pub fn format_iso(dt: &DateTime<FixedOffset>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

/// Long form with a `GMT±H` suffix derived from the instant's offset.
pub fn format_readable(dt: &DateTime<FixedOffset>) -> String {
    readable(&dt.naive_local(), Some(*dt.offset()))
}

/// Long form for a wall-clock time with no known offset; the zone renders
/// as bare `GMT`.
pub fn format_readable_naive(dt: &NaiveDateTime) -> String {
    readable(dt, None)
}

fn readable(local: &NaiveDateTime, offset: Option<FixedOffset>) -> String {
    let day = local.day();
    let zone = match offset {
        // Integer division truncates toward zero, so -5:30 renders as -5.
        Some(offset) => format!("GMT{:+}", offset.local_minus_utc() / 3600),
        None => "GMT".to_string(),
    };
    format!(
        "{}. {}{}, {}, {}, {}",
        local.format("%b"),
        day,
        ordinal_suffix(day),
        local.year(),
        local.format("%I:%M:%S %p"),
        zone,
    )
}

/// English ordinal suffix for a day of the month.
pub fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
