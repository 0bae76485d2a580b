//! Interval units for date arithmetic.
//!
//! The unit text that reaches emitted SQL always comes from [`IntervalUnit::as_sql`],
//! never from caller-supplied strings. Free text becomes an `IntervalUnit`
//! only through [`FromStr`], which rejects anything outside the allow-list.

use std::fmt;
use std::str::FromStr;

/// Error returned when an interval unit is not on the allow-list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported interval unit: {0:?}")]
pub struct IntervalUnitError(pub String);

/// Allow-listed units for `INTERVAL <n> <unit>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl IntervalUnit {
    pub const ALL: [IntervalUnit; 8] = [
        IntervalUnit::Second,
        IntervalUnit::Minute,
        IntervalUnit::Hour,
        IntervalUnit::Day,
        IntervalUnit::Week,
        IntervalUnit::Month,
        IntervalUnit::Quarter,
        IntervalUnit::Year,
    ];

    /// Unit keyword as emitted in SQL.
    pub fn as_sql(&self) -> &'static str {
        match self {
            IntervalUnit::Second => "second",
            IntervalUnit::Minute => "minute",
            IntervalUnit::Hour => "hour",
            IntervalUnit::Day => "day",
            IntervalUnit::Week => "week",
            IntervalUnit::Month => "month",
            IntervalUnit::Quarter => "quarter",
            IntervalUnit::Year => "year",
        }
    }
}

impl FromStr for IntervalUnit {
    type Err = IntervalUnitError;

    /// Accepts singular or plural unit names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let singular = lowered.strip_suffix('s').unwrap_or(&lowered);
        IntervalUnit::ALL
            .iter()
            .copied()
            .find(|unit| unit.as_sql() == singular)
            .ok_or_else(|| IntervalUnitError(s.to_string()))
    }
}

impl fmt::Display for IntervalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Truncate an interval amount toward zero.
///
/// Out-of-range values saturate at the `i64` bounds; NaN becomes 0.
pub fn truncate_amount(amount: f64) -> i64 {
    amount.trunc() as i64
}

/// Render `INTERVAL <n> <unit>`.
pub fn interval_literal(amount: f64, unit: IntervalUnit) -> String {
    format!("INTERVAL {} {}", truncate_amount(amount), unit.as_sql())
}
