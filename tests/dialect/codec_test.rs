// tests/dialect/codec_test.rs
//! Temporal value encoding, decoding and literal rendering.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use insta::assert_snapshot;
use mantis_impala::sql::dialect::Dialect;
use mantis_impala::sql::types::{map_native_type, SemanticType};
use mantis_impala::temporal::{
    decode_datetime, encode_bind, format_offset, render_literal, BindValue, ColumnInfo,
    FixedSessionTimezone, SessionTimezone, TemporalValue, TimestampSource,
};

fn hours(h: i32) -> FixedOffset {
    FixedOffset::east_opt(h * 3600).unwrap()
}

fn datetime(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

/// A session zone whose offset changes at a fixed instant, like a DST switch.
struct SwitchingZone {
    switch_at: DateTime<Utc>,
    before: FixedOffset,
    after: FixedOffset,
}

impl SessionTimezone for SwitchingZone {
    fn id(&self) -> &str {
        "Test/Switching"
    }

    fn offset_at(&self, instant: DateTime<Utc>) -> FixedOffset {
        if instant < self.switch_at {
            self.before
        } else {
            self.after
        }
    }
}

#[test]
fn offset_rendering() {
    assert_eq!(format_offset(&hours(0)), "UTC");
    assert_eq!(
        format_offset(&FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap()),
        "+05:30"
    );
    assert_eq!(
        format_offset(&FixedOffset::west_opt(3 * 3600 + 45 * 60).unwrap()),
        "-03:45"
    );
}

#[test]
fn offset_datetime_binds_in_session_zone() {
    // 10:00 at +02:00 is 08:00Z, which is 13:00 in a +05:00 session
    let value = TemporalValue::OffsetDateTime(
        DateTime::parse_from_rfc3339("2024-01-01T10:00:00+02:00").unwrap(),
    );
    let session = FixedSessionTimezone::new("Asia/Karachi", hours(5));
    assert_eq!(
        encode_bind(&value, &session),
        BindValue::DateTime(datetime("2024-01-01 13:00:00"))
    );
}

#[test]
fn offset_datetime_discards_its_own_offset() {
    // Same wall clock, different offsets: different instants, different binds
    let session = FixedSessionTimezone::utc();
    let a = TemporalValue::OffsetDateTime(
        DateTime::parse_from_rfc3339("2024-06-01T12:00:00+00:00").unwrap(),
    );
    let b = TemporalValue::OffsetDateTime(
        DateTime::parse_from_rfc3339("2024-06-01T12:00:00+03:00").unwrap(),
    );
    assert_eq!(
        encode_bind(&a, &session),
        BindValue::DateTime(datetime("2024-06-01 12:00:00"))
    );
    assert_eq!(
        encode_bind(&b, &session),
        BindValue::DateTime(datetime("2024-06-01 09:00:00"))
    );
}

#[test]
fn session_offset_is_taken_at_the_instant() {
    let zone = SwitchingZone {
        switch_at: DateTime::parse_from_rfc3339("2024-03-31T01:00:00Z")
            .unwrap()
            .with_timezone(&Utc),
        before: hours(1),
        after: hours(2),
    };
    let before = TemporalValue::OffsetDateTime(
        DateTime::parse_from_rfc3339("2024-03-31T00:30:00Z").unwrap(),
    );
    let after = TemporalValue::ZonedDateTime {
        datetime: DateTime::parse_from_rfc3339("2024-03-31T01:30:00Z").unwrap(),
        zone: "Etc/UTC".to_string(),
    };
    assert_eq!(
        encode_bind(&before, &zone),
        BindValue::DateTime(datetime("2024-03-31 01:30:00"))
    );
    assert_eq!(
        encode_bind(&after, &zone),
        BindValue::DateTime(datetime("2024-03-31 03:30:00"))
    );
}

#[test]
fn offset_time_binds_as_utc_time() {
    let value = TemporalValue::OffsetTime {
        time: NaiveTime::from_hms_opt(9, 15, 0).unwrap(),
        offset: FixedOffset::west_opt(4 * 3600).unwrap(),
    };
    assert_eq!(
        encode_bind(&value, &FixedSessionTimezone::utc()),
        BindValue::Time(NaiveTime::from_hms_opt(13, 15, 0).unwrap())
    );
}

#[test]
fn plain_values_pass_through() {
    let session = FixedSessionTimezone::new("Asia/Tokyo", hours(9));
    let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
    assert_eq!(
        encode_bind(&TemporalValue::Date(date), &session),
        BindValue::Date(date)
    );
    let local = datetime("2024-02-29 23:59:59");
    assert_eq!(
        encode_bind(&TemporalValue::LocalDateTime(local), &session),
        BindValue::DateTime(local)
    );
}

#[test]
fn render_offset_datetime() {
    let value = TemporalValue::OffsetDateTime(
        DateTime::parse_from_rfc3339("2024-01-01T10:00:00+05:30").unwrap(),
    );
    let sql = render_literal(&value, &Dialect::Impala).to_sql(Dialect::Impala);
    assert_snapshot!(sql, @"convert_timezone('2024-01-01 10:00:00', '+05:30', @@time_zone)");
}

#[test]
fn render_utc_datetime() {
    let value = TemporalValue::OffsetDateTime(
        DateTime::parse_from_rfc3339("2024-01-01T10:00:00Z").unwrap(),
    );
    let sql = render_literal(&value, &Dialect::Impala).to_sql(Dialect::Impala);
    assert_snapshot!(sql, @"convert_timezone('2024-01-01 10:00:00', 'UTC', @@time_zone)");
}

#[test]
fn render_zoned_datetime_uses_zone_id() {
    let value = TemporalValue::ZonedDateTime {
        datetime: DateTime::parse_from_rfc3339("2024-07-04T09:00:00-04:00").unwrap(),
        zone: "America/New_York".to_string(),
    };
    let sql = render_literal(&value, &Dialect::Impala).to_sql(Dialect::Impala);
    assert_snapshot!(sql, @"convert_timezone('2024-07-04 09:00:00', 'America/New_York', @@time_zone)");
}

#[test]
fn render_local_datetime_as_plain_literal() {
    let value = TemporalValue::LocalDateTime(datetime("2024-01-01 10:00:00"));
    let sql = render_literal(&value, &Dialect::Impala).to_sql(Dialect::Impala);
    assert_snapshot!(sql, @"CAST('2024-01-01 10:00:00' AS TIMESTAMP)");
}

struct Row(Option<NaiveDateTime>);

impl TimestampSource for Row {
    fn timestamp(&self) -> Option<NaiveDateTime> {
        self.0
    }
}

#[test]
fn decode_only_timestamp_columns() {
    let value = datetime("2023-12-31 23:00:00");
    let row = Row(Some(value));

    let column = ColumnInfo::new(map_native_type("TIMESTAMP"), "TIMESTAMP");
    assert_eq!(decode_datetime(&column, &row), Some(value));

    let column = ColumnInfo::new(map_native_type("DATE"), "DATE");
    assert_eq!(decode_datetime(&column, &row), None);

    let column = ColumnInfo::new(SemanticType::DateTime, "TIMESTAMP WITH TIME ZONE");
    assert_eq!(decode_datetime(&column, &row), None);

    let column = ColumnInfo::new(SemanticType::DateTime, "TIMESTAMP");
    assert_eq!(decode_datetime(&column, &Row(None)), None);
}
