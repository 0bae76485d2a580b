// tests/dialect/temporal_test.rs
//! Truncation, extraction and interval rendering through the public API.

use insta::assert_snapshot;
use mantis_impala::sql::dialect::{Dialect, DialectRegistry, SqlDialect};
use mantis_impala::sql::expr::{col, raw_sql, table_col};
use mantis_impala::temporal::{GranularityUnit, IntervalUnit};

fn impala_truncate(unit: GranularityUnit) -> String {
    Dialect::Impala
        .truncate(unit, col("created_at"))
        .to_sql(Dialect::Impala)
}

#[test]
fn truncate_minute() {
    assert_snapshot!(impala_truncate(GranularityUnit::Minute), @"trunc(`created_at`, 'MI')");
}

#[test]
fn truncate_week_uses_day_format() {
    assert_snapshot!(impala_truncate(GranularityUnit::Week), @"trunc(`created_at`, 'day')");
}

#[test]
fn truncate_quarter() {
    assert_snapshot!(impala_truncate(GranularityUnit::Quarter), @"trunc(`created_at`, 'Q')");
}

#[test]
fn extract_month_of_year() {
    assert_snapshot!(impala_truncate(GranularityUnit::MonthOfYear), @"extract(`created_at`, 'month')");
}

#[test]
fn extract_quarter_of_year() {
    assert_snapshot!(
        impala_truncate(GranularityUnit::QuarterOfYear),
        @"(extract(`created_at`, 'month') + 2) DIV 3"
    );
}

#[test]
fn extract_week_of_year() {
    assert_snapshot!(impala_truncate(GranularityUnit::WeekOfYear), @"weekofyear(`created_at`)");
}

#[test]
fn year_is_an_extraction() {
    assert_snapshot!(impala_truncate(GranularityUnit::Year), @"extract(`created_at`, 'year')");
}

#[test]
fn default_unit_casts_to_timestamp() {
    assert_snapshot!(impala_truncate(GranularityUnit::Default), @"CAST(`created_at` AS TIMESTAMP)");
}

#[test]
fn qualified_column() {
    let sql = Dialect::Impala
        .truncate(GranularityUnit::Day, table_col("orders", "created_at"))
        .to_sql(Dialect::Impala);
    assert_snapshot!(sql, @"trunc(`orders`.`created_at`, 'dd')");
}

#[test]
fn every_unit_has_a_rule() {
    for unit in GranularityUnit::ALL {
        let sql = impala_truncate(unit);
        assert!(sql.contains("`created_at`"), "{unit}: {sql}");
    }
}

#[test]
fn units_parse_from_names() {
    let unit: GranularityUnit = "day-of-week".parse().unwrap();
    assert_eq!(unit, GranularityUnit::DayOfWeek);
    let unit: GranularityUnit = "QUARTER_OF_YEAR".parse().unwrap();
    assert_eq!(unit, GranularityUnit::QuarterOfYear);
    assert!("fortnight".parse::<GranularityUnit>().is_err());
}

#[test]
fn date_add_negative_days() {
    let sql = Dialect::Impala
        .add_interval(raw_sql("E"), -3.0, IntervalUnit::Day)
        .to_sql(Dialect::Impala);
    assert_eq!(sql, "date_add(E, INTERVAL -3 day)");
}

#[test]
fn date_add_truncates_amount_toward_zero() {
    let sql = Dialect::Impala
        .add_interval(col("ts"), -1.9, IntervalUnit::Month)
        .to_sql(Dialect::Impala);
    assert_snapshot!(sql, @"date_add(`ts`, INTERVAL -1 month)");
}

#[test]
fn date_add_unit_from_free_text() {
    let unit: IntervalUnit = "Hours".parse().unwrap();
    let sql = Dialect::Impala
        .add_interval(col("ts"), 6.0, unit)
        .to_sql(Dialect::Impala);
    assert_snapshot!(sql, @"date_add(`ts`, INTERVAL 6 hour)");

    assert!("day); DROP TABLE x; --".parse::<IntervalUnit>().is_err());
}

#[test]
fn generic_base_is_unaffected() {
    let d = Dialect::Generic;
    assert_snapshot!(
        d.truncate(GranularityUnit::Minute, col("ts")).to_sql(d),
        @r#"DATE_TRUNC('minute', "ts")"#
    );
    assert_snapshot!(
        d.add_interval(col("ts"), 3.0, IntervalUnit::Day).to_sql(d),
        @r#""ts" + INTERVAL '3' DAY"#
    );
}

#[test]
fn registry_resolves_impala() {
    let registry = DialectRegistry::new();
    let impala = registry.get("impala").unwrap();
    let sql = impala
        .truncate(GranularityUnit::Hour, col("ts"))
        .to_sql(Dialect::Impala);
    assert_eq!(sql, "trunc(`ts`, 'HH')");
    assert_eq!(registry.resolve_parent_chain("impala").unwrap(), vec!["impala", "sql"]);
}
