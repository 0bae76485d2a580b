//! Temporal value codec.
//!
//! Impala has no offset-aware types, so anything carrying an offset is
//! flattened on the way in:
//! - offset times are shifted to UTC and bound as a plain time;
//! - offset and zoned date-times are re-expressed in the *session*
//!   timezone (using its offset at that instant) and bound as a local
//!   date-time. The value's own offset only locates the instant; it is
//!   not carried into the bound wall-clock time.
//!
//! The loss is silent. Reads go the other way only for genuine
//! `TIMESTAMP` columns; nothing else is coerced into a date-time.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta, Utc};
use serde::Serialize;

use crate::sql::dialect::SqlDialect;
use crate::sql::expr::{func, lit_str, raw_sql, Expr};
use crate::sql::types::{SemanticType, TIMESTAMP_TYPE_NAME};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
const TIME_FORMAT: &str = "%H:%M:%S%.f";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A date/time value as the engine hands it to the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemporalValue {
    Date(NaiveDate),
    Time(NaiveTime),
    OffsetTime { time: NaiveTime, offset: FixedOffset },
    LocalDateTime(NaiveDateTime),
    OffsetDateTime(DateTime<FixedOffset>),
    /// A date-time resolved in a named zone; `datetime` carries the zone's
    /// offset at that instant.
    ZonedDateTime {
        datetime: DateTime<FixedOffset>,
        zone: String,
    },
}

/// The timezone of the current database session.
pub trait SessionTimezone {
    /// Zone identifier, e.g. `UTC` or `Europe/Berlin`.
    fn id(&self) -> &str;

    /// UTC offset of the zone at `instant`.
    fn offset_at(&self, instant: DateTime<Utc>) -> FixedOffset;
}

/// A session timezone with a constant offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedSessionTimezone {
    id: String,
    offset: FixedOffset,
}

impl FixedSessionTimezone {
    pub fn new(id: impl Into<String>, offset: FixedOffset) -> Self {
        Self {
            id: id.into(),
            offset,
        }
    }

    pub fn utc() -> Self {
        Self::new("UTC", Utc.fix())
    }
}

impl SessionTimezone for FixedSessionTimezone {
    fn id(&self) -> &str {
        &self.id
    }

    fn offset_at(&self, _instant: DateTime<Utc>) -> FixedOffset {
        self.offset
    }
}

/// A value ready to bind as a statement parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum BindValue {
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
}

/// Encode a temporal value for binding.
pub fn encode_bind(value: &TemporalValue, session: &dyn SessionTimezone) -> BindValue {
    match value {
        TemporalValue::Date(d) => BindValue::Date(*d),
        TemporalValue::Time(t) => BindValue::Time(*t),
        TemporalValue::LocalDateTime(dt) => BindValue::DateTime(*dt),
        TemporalValue::OffsetTime { time, offset } => BindValue::Time(time_to_utc(*time, offset)),
        TemporalValue::OffsetDateTime(dt)
        | TemporalValue::ZonedDateTime { datetime: dt, .. } => {
            BindValue::DateTime(to_session_local(dt, session))
        }
    }
}

fn time_to_utc(time: NaiveTime, offset: &FixedOffset) -> NaiveTime {
    let shift = TimeDelta::seconds(i64::from(offset.local_minus_utc()));
    time.overflowing_sub_signed(shift).0
}

fn to_session_local(dt: &DateTime<FixedOffset>, session: &dyn SessionTimezone) -> NaiveDateTime {
    let instant = dt.with_timezone(&Utc);
    let offset = session.offset_at(instant);
    instant.with_timezone(&offset).naive_local()
}

/// Column metadata needed to decide how a result value is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub semantic_type: SemanticType,
    /// Native type name exactly as the server reported it.
    pub native_type: String,
}

impl ColumnInfo {
    pub fn new(semantic_type: SemanticType, native_type: impl Into<String>) -> Self {
        Self {
            semantic_type,
            native_type: native_type.into(),
        }
    }
}

/// Source of a timestamp for the current row and column.
pub trait TimestampSource {
    fn timestamp(&self) -> Option<NaiveDateTime>;
}

/// Read a date-time result value.
///
/// Only `DateTime` columns whose native type is exactly `TIMESTAMP` are
/// read; everything else yields `None` and is left to the generic path.
pub fn decode_datetime(column: &ColumnInfo, source: &dyn TimestampSource) -> Option<NaiveDateTime> {
    if column.semantic_type == SemanticType::DateTime && column.native_type == TIMESTAMP_TYPE_NAME {
        source.timestamp()
    } else {
        None
    }
}

/// Render an offset as a timezone source string: `UTC` or `±HH:MM`.
pub fn format_offset(offset: &FixedOffset) -> String {
    let total = offset.local_minus_utc();
    if total == 0 {
        return "UTC".to_string();
    }
    let sign = if total < 0 { '-' } else { '+' };
    let minutes = total.unsigned_abs() / 60;
    format!("{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
}

/// Render a temporal value as a SQL literal expression.
///
/// Offset-bearing values become
/// `convert_timezone('<literal>', '<source>', <session tz variable>)`.
/// A dialect without a session timezone variable gets the UTC instant as a
/// plain timestamp literal instead.
pub fn render_literal(value: &TemporalValue, dialect: &dyn SqlDialect) -> Expr {
    match value {
        TemporalValue::Date(d) => {
            raw_sql(&dialect.format_date_literal(&d.format(DATE_FORMAT).to_string()))
        }
        TemporalValue::Time(t) => {
            raw_sql(&dialect.format_time_literal(&t.format(TIME_FORMAT).to_string()))
        }
        TemporalValue::LocalDateTime(dt) => {
            raw_sql(&dialect.format_timestamp_literal(&dt.format(DATETIME_FORMAT).to_string()))
        }
        TemporalValue::OffsetTime { time, offset } => match dialect.session_timezone_variable() {
            Some(var) => convert_timezone(
                time.format(TIME_FORMAT).to_string(),
                format_offset(offset),
                var,
            ),
            None => {
                let utc = time_to_utc(*time, offset);
                raw_sql(&dialect.format_time_literal(&utc.format(TIME_FORMAT).to_string()))
            }
        },
        TemporalValue::OffsetDateTime(dt) => {
            render_offset_datetime(dt, format_offset(dt.offset()), dialect)
        }
        TemporalValue::ZonedDateTime { datetime, zone } => {
            render_offset_datetime(datetime, zone.clone(), dialect)
        }
    }
}

fn render_offset_datetime(
    dt: &DateTime<FixedOffset>,
    source: String,
    dialect: &dyn SqlDialect,
) -> Expr {
    match dialect.session_timezone_variable() {
        Some(var) => convert_timezone(
            dt.naive_local().format(DATETIME_FORMAT).to_string(),
            source,
            var,
        ),
        None => {
            let utc = dt.with_timezone(&Utc).naive_utc();
            raw_sql(&dialect.format_timestamp_literal(&utc.format(DATETIME_FORMAT).to_string()))
        }
    }
}

fn convert_timezone(literal: String, source: String, session_variable: &str) -> Expr {
    func(
        "convert_timezone",
        vec![lit_str(&literal), lit_str(&source), raw_sql(session_variable)],
    )
}
