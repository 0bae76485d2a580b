//! Temporal vocabulary shared by the dialects: granularity units for
//! bucketing, interval units for date arithmetic, and the codec that moves
//! date/time values across the driver boundary.

pub mod codec;
pub mod grain;
pub mod interval;

pub use codec::{
    decode_datetime, encode_bind, format_offset, render_literal, BindValue, ColumnInfo,
    FixedSessionTimezone, SessionTimezone, TemporalValue, TimestampSource,
};
pub use grain::{GranularityError, GranularityUnit};
pub use interval::{IntervalUnit, IntervalUnitError};
