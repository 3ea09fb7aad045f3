//! Table filtering for schema definitions
//!
//! Narrows a `SchemaDefinition` to the tables a caller asked for.
//!
//! # Pattern rules
//!
//! - A pattern equal to a table name matches that table.
//! - Any other pattern is an anchored regular expression (`^pattern$`).
//! - An empty include list keeps every table.
//! - Exclusion wins over inclusion.
//! - Views are dropped unless explicitly included.
//!
//! Patterns are anchored: `order` matches only the table `order`, not
//! `order_items`. Write `order.*` for a prefix match. When any table is
//! dropped the result's `version` is cleared rather than recomputed.

use regex::Regex;

use super::errors::{SchemaError, SchemaResult};
use super::types::{SchemaDefinition, TableDefinition};

/// A compiled list of table patterns.
#[derive(Debug, Clone)]
struct TablePatterns {
    names: Vec<String>,
    expressions: Vec<Regex>,
}

impl TablePatterns {
    fn compile(patterns: &[String]) -> SchemaResult<Self> {
        let mut expressions = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let anchored = format!("^(?:{})$", pattern);
            let regex = Regex::new(&anchored)
                .map_err(|e| SchemaError::invalid_pattern(pattern.as_str(), e.to_string()))?;
            expressions.push(regex);
        }

        Ok(Self {
            names: patterns.to_vec(),
            expressions,
        })
    }

    fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn matches(&self, table: &str) -> bool {
        self.names.iter().any(|n| n == table) || self.expressions.iter().any(|r| r.is_match(table))
    }
}

impl SchemaDefinition {
    /// Return a copy of this schema narrowed to the requested tables.
    ///
    /// The result is a new value owned by the caller. Its `version` is kept
    /// only if no table was filtered out, since the tag describes the full
    /// table set.
    pub fn filter_tables(
        &self,
        tables: &[String],
        exclude_tables: &[String],
        include_views: bool,
    ) -> SchemaResult<SchemaDefinition> {
        let include = TablePatterns::compile(tables)?;
        let exclude = TablePatterns::compile(exclude_tables)?;

        let keep = |table: &TableDefinition| {
            if !include.is_empty() && !include.matches(&table.name) {
                return false;
            }
            if exclude.matches(&table.name) {
                return false;
            }
            include_views || !table.is_view()
        };

        let table_definitions: Vec<TableDefinition> = self
            .table_definitions
            .iter()
            .filter(|t| keep(t))
            .cloned()
            .collect();

        let version = if table_definitions.len() == self.table_definitions.len() {
            self.version.clone()
        } else {
            String::new()
        };

        Ok(SchemaDefinition {
            database_schema: self.database_schema.clone(),
            table_definitions,
            version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> SchemaDefinition {
        SchemaDefinition::new(
            "CREATE DATABASE `{{.DatabaseName}}`",
            vec![
                TableDefinition::table("orders", "CREATE TABLE orders (id INT)"),
                TableDefinition::table("order_items", "CREATE TABLE order_items (id INT)"),
                TableDefinition::table("users", "CREATE TABLE users (id INT)"),
                TableDefinition::view("recent_orders", "CREATE VIEW recent_orders AS SELECT 1"),
            ],
            "v7",
        )
    }

    #[test]
    fn test_no_filters_drops_views_only() {
        let sd = sample().filter_tables(&[], &[], false).unwrap();
        assert_eq!(sd.table_names(), vec!["orders", "order_items", "users"]);
        assert_eq!(sd.version, "");
    }

    #[test]
    fn test_no_filters_with_views_is_identity() {
        let original = sample();
        let sd = original.filter_tables(&[], &[], true).unwrap();
        assert_eq!(sd, original);
    }

    #[test]
    fn test_include_by_name() {
        let sd = sample().filter_tables(&strings(&["users"]), &[], true).unwrap();
        assert_eq!(sd.table_names(), vec!["users"]);
        assert_eq!(sd.database_schema, "CREATE DATABASE `{{.DatabaseName}}`");
    }

    #[test]
    fn test_include_by_regex_is_anchored() {
        let sd = sample().filter_tables(&strings(&["order.*"]), &[], true).unwrap();
        assert_eq!(sd.table_names(), vec!["orders", "order_items"]);

        // "order" alone must not match "orders"
        let sd = sample().filter_tables(&strings(&["order"]), &[], true).unwrap();
        assert!(sd.is_empty());
    }

    #[test]
    fn test_exclude_wins() {
        let sd = sample()
            .filter_tables(&strings(&["order.*"]), &strings(&["order_items"]), true)
            .unwrap();
        assert_eq!(sd.table_names(), vec!["orders"]);
    }

    #[test]
    fn test_include_view_explicitly_named_still_needs_flag() {
        let sd = sample()
            .filter_tables(&strings(&["recent_orders"]), &[], false)
            .unwrap();
        assert!(sd.is_empty());
    }

    #[test]
    fn test_invalid_pattern() {
        let err = sample()
            .filter_tables(&[], &strings(&["bad("]), true)
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidPattern { ref pattern, .. } if pattern == "bad("));
    }

    #[test]
    fn test_source_is_untouched() {
        let original = sample();
        let _ = original.filter_tables(&strings(&["users"]), &[], false).unwrap();
        assert_eq!(original, sample());
    }
}
