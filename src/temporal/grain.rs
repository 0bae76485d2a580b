//! Granularity units for date bucketing.
//!
//! A [`GranularityUnit`] names either a truncation (`Day`, `Month`, ...) or
//! an extraction (`DayOfWeek`, `MonthOfYear`, ...). The set is closed: each
//! dialect maps every unit with an exhaustive `match`, so adding a unit
//! without a translation rule fails to compile.

use std::fmt;
use std::str::FromStr;

/// Error returned when a unit name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown granularity unit: {0}")]
pub struct GranularityError(pub String);

/// A named time-bucket size or date-part extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GranularityUnit {
    Minute,
    MinuteOfHour,
    Hour,
    HourOfDay,
    Day,
    DayOfWeek,
    DayOfMonth,
    DayOfYear,
    Week,
    WeekOfYear,
    Month,
    MonthOfYear,
    Quarter,
    QuarterOfYear,
    Year,
    Default,
}

impl GranularityUnit {
    /// Every unit, in declaration order.
    pub const ALL: [GranularityUnit; 16] = [
        GranularityUnit::Minute,
        GranularityUnit::MinuteOfHour,
        GranularityUnit::Hour,
        GranularityUnit::HourOfDay,
        GranularityUnit::Day,
        GranularityUnit::DayOfWeek,
        GranularityUnit::DayOfMonth,
        GranularityUnit::DayOfYear,
        GranularityUnit::Week,
        GranularityUnit::WeekOfYear,
        GranularityUnit::Month,
        GranularityUnit::MonthOfYear,
        GranularityUnit::Quarter,
        GranularityUnit::QuarterOfYear,
        GranularityUnit::Year,
        GranularityUnit::Default,
    ];

    /// Canonical kebab-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            GranularityUnit::Minute => "minute",
            GranularityUnit::MinuteOfHour => "minute-of-hour",
            GranularityUnit::Hour => "hour",
            GranularityUnit::HourOfDay => "hour-of-day",
            GranularityUnit::Day => "day",
            GranularityUnit::DayOfWeek => "day-of-week",
            GranularityUnit::DayOfMonth => "day-of-month",
            GranularityUnit::DayOfYear => "day-of-year",
            GranularityUnit::Week => "week",
            GranularityUnit::WeekOfYear => "week-of-year",
            GranularityUnit::Month => "month",
            GranularityUnit::MonthOfYear => "month-of-year",
            GranularityUnit::Quarter => "quarter",
            GranularityUnit::QuarterOfYear => "quarter-of-year",
            GranularityUnit::Year => "year",
            GranularityUnit::Default => "default",
        }
    }
}

impl FromStr for GranularityUnit {
    type Err = GranularityError;

    /// Parses kebab-case or snake_case names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        GranularityUnit::ALL
            .iter()
            .copied()
            .find(|unit| unit.as_str() == normalized)
            .ok_or_else(|| GranularityError(s.to_string()))
    }
}

impl fmt::Display for GranularityUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
