//! Date rendering for list subtitles.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Verbosity of a rendered date. Both styles include a short time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DateStyle {
    /// `October 18, 2026 at 3:04 PM`
    Long,
    /// `10/18/26, 3:04 PM`
    Short,
}

impl DateStyle {
    fn pattern(self) -> &'static str {
        match self {
            Self::Long => "%B %-d, %Y at %-I:%M %p",
            Self::Short => "%-m/%-d/%y, %-I:%M %p",
        }
    }
}

/// Renders `date` in its own time zone using `style`.
pub fn format_date<Tz>(date: &DateTime<Tz>, style: DateStyle) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date.format(style.pattern()).to_string()
}
