// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! In-memory table: a row heap plus an optional primary-key index.

use crate::btree::{BPlusTree, Index as IndexTrait};
use crate::metrics::{Metric, MetricUnit, MetricsCollector};
use crate::schema::{Condition, ColumnDef};
use crate::value::Value;
use std::time::Instant;

/// A single row: one [`Value`] per column, in column order.
pub type Row = Vec<Value>;

/// An ordered index from a primary-key value to the row's position in
/// the table's row heap.
struct PrimaryKeyIndex {
    column: usize,
    index: BPlusTree<Value, usize>,
}

/// Owns a row heap and, if one of its columns declares `primary_key`, an
/// ordered index from that column's value to row position.
pub struct Table {
    name: String,
    columns: Vec<ColumnDef>,
    rows: Vec<Row>,
    pk: Option<PrimaryKeyIndex>,
}

impl Table {
    /// Creates an empty table. Does not validate `columns` — callers
    /// (the [`crate::database::Database`] catalog) are expected to run
    /// [`crate::schema::validate_columns`] first.
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDef>) -> Self {
        let pk_column = columns.iter().position(|c| c.primary_key);
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
            pk: pk_column.map(|column| PrimaryKeyIndex {
                column,
                index: BPlusTree::new(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Replaces the row heap wholesale, e.g. to restore a transaction's
    /// pre-image snapshot on abort. The PK index is left as-is — per
    /// §9's accepted limitation, it is not rebuilt from the restored
    /// rows, so it may disagree with row contents until the next
    /// mutation supersedes the stale entries.
    pub fn restore_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
    }

    /// Linear search for a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Validates and appends `row`. Returns `false` without mutating
    /// state if any column constraint is violated.
    pub fn insert(&mut self, row: Row) -> bool {
        let started = Instant::now();
        let accepted = self.try_insert(row);
        record_duration("table.insert.duration_us", started, &self.name);
        if !accepted {
            MetricsCollector::global()
                .record(Metric::counter("table.insert.rejected").with_tag("table", self.name.clone()));
        }
        accepted
    }

    fn try_insert(&mut self, row: Row) -> bool {
        if row.len() != self.columns.len() {
            return false;
        }
        for (i, column) in self.columns.iter().enumerate() {
            if row[i] == Value::Null {
                if column.not_null {
                    return false;
                }
            } else if !row[i].matches_type(column.column_type) {
                return false;
            }
        }
        if let Some(pk) = &self.pk {
            let key = &row[pk.column];
            if *key != Value::Null && pk.index.get(key).is_some() {
                return false;
            }
        }

        let position = self.rows.len();
        self.rows.push(row);
        if let Some(pk) = &mut self.pk {
            let key = self.rows[position][pk.column].clone();
            if key != Value::Null {
                pk.index.insert(key, position);
            }
        }
        true
    }

    /// Returns every row matching `conditions`, in insertion order. Uses
    /// a single index lookup instead of a full scan when `conditions` is
    /// exactly one equality test on the primary-key column with a
    /// matching value type.
    pub fn select(&self, conditions: &[Condition]) -> Vec<Row> {
        if let Some(result) = self.try_index_lookup(conditions) {
            MetricsCollector::global()
                .record(Metric::counter("table.select.path").with_tag("path", "index"));
            return result.into_iter().collect();
        }
        MetricsCollector::global()
            .record(Metric::counter("table.select.path").with_tag("path", "scan"));
        self.rows
            .iter()
            .filter(|row| crate::schema::condition::matches_all(conditions, &self.columns, row))
            .cloned()
            .collect()
    }

    fn try_index_lookup(&self, conditions: &[Condition]) -> Option<Option<Row>> {
        let pk = self.pk.as_ref()?;
        let [cond] = conditions else {
            return None;
        };
        if cond.op != "=" {
            return None;
        }
        let pk_column = &self.columns[pk.column];
        if cond.column != pk_column.name || !cond.value.matches_type(pk_column.column_type) {
            return None;
        }
        let position = pk.index.get(&cond.value);
        Some(position.and_then(|p| self.rows.get(p)).cloned())
    }

    /// Applies `assignments` to every row matching `conditions`. Returns
    /// the number of rows the assignment step ran to completion for.
    pub fn update(&mut self, assignments: &[(String, Value)], conditions: &[Condition]) -> usize {
        let resolved: Vec<(usize, Value)> = assignments
            .iter()
            .filter_map(|(name, value)| {
                self.column_index(name).map(|idx| (idx, value.clone()))
            })
            .collect();

        let matching: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| crate::schema::condition::matches_all(conditions, &self.columns, row))
            .map(|(i, _)| i)
            .collect();

        let mut updated = 0;
        for position in matching {
            if let Some(pk) = &self.pk {
                if let Some((_, new_key)) = resolved.iter().find(|(idx, _)| *idx == pk.column) {
                    if *new_key != Value::Null {
                        if let Some(existing) = pk.index.get(new_key) {
                            if existing != position {
                                continue;
                            }
                        }
                    }
                }
            }

            for (col_idx, value) in &resolved {
                let column = &self.columns[*col_idx];
                if *value == Value::Null || value.matches_type(column.column_type) {
                    self.rows[position][*col_idx] = value.clone();
                }
            }

            if let Some(pk) = &mut self.pk {
                if resolved.iter().any(|(idx, _)| *idx == pk.column) {
                    let key = self.rows[position][pk.column].clone();
                    if key != Value::Null {
                        pk.index.insert(key, position);
                    }
                }
            }

            updated += 1;
        }
        updated
    }

    /// Removes every row matching `conditions`. The PK index is left
    /// untouched: stale entries pointing past the shrunk row heap are
    /// tolerated and filtered out by [`Table::select`]'s bounds check.
    pub fn remove(&mut self, conditions: &[Condition]) -> usize {
        let before = self.rows.len();
        let columns = &self.columns;
        self.rows
            .retain(|row| !crate::schema::condition::matches_all(conditions, columns, row));
        before - self.rows.len()
    }
}

fn record_duration(name: &'static str, started: Instant, table: &str) {
    let micros = started.elapsed().as_secs_f64() * 1_000_000.0;
    MetricsCollector::global()
        .record(Metric::new(name, micros, MetricUnit::Microseconds).with_tag("table", table.to_string()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ColumnType;

    fn make_table() -> Table {
        Table::new(
            "users",
            vec![
                ColumnDef::new("id", ColumnType::Int).primary_key(),
                ColumnDef::new("name", ColumnType::Text).not_null(),
            ],
        )
    }

    #[test]
    fn insert_rejects_wrong_row_length() {
        let mut t = make_table();
        assert!(!t.insert(vec![Value::Int64(1)]));
    }

    #[test]
    fn insert_rejects_not_null_violation() {
        let mut t = make_table();
        assert!(!t.insert(vec![Value::Int64(1), Value::Null]));
    }

    #[test]
    fn insert_rejects_type_mismatch() {
        let mut t = make_table();
        assert!(!t.insert(vec![Value::Text("x".into()), Value::Text("a".into())]));
    }

    #[test]
    fn insert_rejects_duplicate_primary_key() {
        let mut t = make_table();
        assert!(t.insert(vec![Value::Int64(1), Value::Text("a".into())]));
        assert!(!t.insert(vec![Value::Int64(1), Value::Text("b".into())]));
        assert_eq!(t.rows().len(), 1);
    }

    #[test]
    fn select_with_no_conditions_returns_all_rows_in_insertion_order() {
        let mut t = make_table();
        t.insert(vec![Value::Int64(1), Value::Text("a".into())]);
        t.insert(vec![Value::Int64(2), Value::Text("b".into())]);
        let rows = t.select(&[]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], Value::Int64(1));
        assert_eq!(rows[1][0], Value::Int64(2));
    }

    #[test]
    fn select_uses_index_for_single_pk_equality() {
        let mut t = make_table();
        t.insert(vec![Value::Int64(1), Value::Text("a".into())]);
        t.insert(vec![Value::Int64(2), Value::Text("b".into())]);
        let rows = t.select(&[Condition::new("id", "=", Value::Int64(2))]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][1], Value::Text("b".into()));
    }

    #[test]
    fn select_uses_index_path_even_when_key_is_absent() {
        let mut t = make_table();
        t.insert(vec![Value::Int64(1), Value::Text("a".into())]);
        let rows = t.select(&[Condition::new("id", "=", Value::Int64(99))]);
        assert!(rows.is_empty());
        assert_eq!(
            t.try_index_lookup(&[Condition::new("id", "=", Value::Int64(99))]),
            Some(None)
        );
    }

    #[test]
    fn select_falls_back_to_scan_for_non_pk_condition() {
        let mut t = make_table();
        t.insert(vec![Value::Int64(1), Value::Text("a".into())]);
        t.insert(vec![Value::Int64(2), Value::Text("a".into())]);
        let rows = t.select(&[Condition::new("name", "=", Value::Text("a".into()))]);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn update_skips_row_when_new_pk_collides() {
        let mut t = make_table();
        t.insert(vec![Value::Int64(1), Value::Text("a".into())]);
        t.insert(vec![Value::Int64(2), Value::Text("b".into())]);
        let count = t.update(
            &[("id".to_string(), Value::Int64(2))],
            &[Condition::new("id", "=", Value::Int64(1))],
        );
        assert_eq!(count, 0);
        assert_eq!(t.rows()[0][0], Value::Int64(1));
    }

    #[test]
    fn update_silently_skips_type_mismatched_field() {
        let mut t = make_table();
        t.insert(vec![Value::Int64(1), Value::Text("a".into())]);
        let count = t.update(
            &[("name".to_string(), Value::Int64(99))],
            &[Condition::new("id", "=", Value::Int64(1))],
        );
        assert_eq!(count, 1);
        assert_eq!(t.rows()[0][1], Value::Text("a".into()));
    }

    #[test]
    fn update_ignores_unknown_column_names() {
        let mut t = make_table();
        t.insert(vec![Value::Int64(1), Value::Text("a".into())]);
        let count = t.update(
            &[("nonexistent".to_string(), Value::Int64(1))],
            &[],
        );
        assert_eq!(count, 1);
    }

    #[test]
    fn remove_deletes_matching_rows_and_returns_count() {
        let mut t = make_table();
        t.insert(vec![Value::Int64(1), Value::Text("a".into())]);
        t.insert(vec![Value::Int64(2), Value::Text("b".into())]);
        let removed = t.remove(&[Condition::new("id", "=", Value::Int64(1))]);
        assert_eq!(removed, 1);
        assert_eq!(t.rows().len(), 1);
        assert_eq!(t.rows()[0][0], Value::Int64(2));
    }

    #[test]
    fn column_index_finds_existing_and_missing_names() {
        let t = make_table();
        assert_eq!(t.column_index("id"), Some(0));
        assert_eq!(t.column_index("missing"), None);
    }
}
