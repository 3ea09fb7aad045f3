//! Schema Retrieval Tests
//!
//! `get_schema` distinguishes an unset schema from an empty one and hands
//! back a filtered copy the caller owns.

use hostctl::daemon::{HostError, HostErrorKind, MysqlDaemon};
use hostctl::fake::FakeMysqlDaemon;
use hostctl::schema::{SchemaDefinition, SchemaError, TableDefinition};

fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn vt_schema() -> SchemaDefinition {
    SchemaDefinition::new(
        "CREATE DATABASE `vt_test_keyspace`",
        vec![
            TableDefinition::table("customer", "CREATE TABLE customer (id BIGINT)")
                .with_columns(["id", "email"])
                .with_primary_key(["id"]),
            TableDefinition::table("corder", "CREATE TABLE corder (order_id BIGINT)"),
            TableDefinition::table("corder_archive", "CREATE TABLE corder_archive (order_id BIGINT)"),
            TableDefinition::view("recent_orders", "CREATE VIEW recent_orders AS SELECT 1"),
        ],
        "5f3c1a",
    )
}

fn double_with(schema: Option<SchemaDefinition>) -> FakeMysqlDaemon {
    let mut fmd = FakeMysqlDaemon::new();
    fmd.schema = schema;
    fmd
}

// =============================================================================
// Unset, Empty, Present
// =============================================================================

#[test]
fn test_unset_schema_fails() {
    let fmd = double_with(None);
    let err = fmd.get_schema("vt_test_keyspace", &[], &[], true).unwrap_err();
    assert!(matches!(err, HostError::NoSchema));
}

#[test]
fn test_empty_schema_is_not_an_error() {
    let fmd = double_with(Some(SchemaDefinition::default()));
    let sd = fmd.get_schema("vt_test_keyspace", &[], &[], true).unwrap();
    assert!(sd.is_empty());
}

#[test]
fn test_unfiltered_schema_is_identical() {
    let fmd = double_with(Some(vt_schema()));
    let sd = fmd.get_schema("vt_test_keyspace", &[], &[], true).unwrap();
    assert_eq!(sd, vt_schema());
}

// =============================================================================
// Filtering
// =============================================================================

#[test]
fn test_views_dropped_by_default() {
    let fmd = double_with(Some(vt_schema()));
    let sd = fmd.get_schema("vt_test_keyspace", &[], &[], false).unwrap();
    assert_eq!(sd.table_names(), vec!["customer", "corder", "corder_archive"]);
    assert_eq!(sd.version, "");
}

#[test]
fn test_include_and_exclude_patterns() {
    let fmd = double_with(Some(vt_schema()));
    let sd = fmd
        .get_schema("vt_test_keyspace", &names(&["corder.*"]), &names(&["corder_archive"]), false)
        .unwrap();
    assert_eq!(sd.table_names(), vec!["corder"]);
    assert_eq!(sd.database_schema, "CREATE DATABASE `vt_test_keyspace`");
}

#[test]
fn test_result_is_independent_copy() {
    let fmd = double_with(Some(vt_schema()));
    let mut sd = fmd.get_schema("vt_test_keyspace", &[], &[], true).unwrap();
    sd.table_definitions.clear();

    assert_eq!(fmd.schema, Some(vt_schema()));
}

#[test]
fn test_invalid_pattern_surfaces_schema_error() {
    let fmd = double_with(Some(vt_schema()));
    let err = fmd.get_schema("vt_test_keyspace", &names(&["corder("]), &[], false).unwrap_err();

    assert_eq!(err.kind(), HostErrorKind::Schema);
    assert!(matches!(err, HostError::Schema(SchemaError::InvalidPattern { .. })));
}
