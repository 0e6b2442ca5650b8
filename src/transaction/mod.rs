// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Snapshot-based transaction manager.
//!
//! Mutations roll back by restoring a whole-table row snapshot captured
//! at the moment a transaction first touched that table — there is no
//! per-row undo log and no isolation beyond the initiator's own changes
//! (§5).

use crate::database::Database;
use crate::error::{StoreError, StoreResult};
use crate::metrics::{Metric, MetricsCollector};
use crate::tables::Row;
use std::collections::HashMap;
use std::sync::Mutex;

/// Lifecycle state of a [`Transaction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    Active,
    Committed,
    Aborted,
}

struct Transaction {
    state: TransactionState,
    pre_images: HashMap<String, Vec<Row>>,
}

struct ManagerState {
    next_id: u64,
    transactions: HashMap<u64, Transaction>,
}

/// Issues transaction ids and holds their pre-image snapshots.
///
/// Unlike [`crate::metrics::MetricsCollector`], this is not a `static`
/// global: a database owns one instance and threads it explicitly to
/// whatever needs it. A single mutex serializes every state change,
/// matching the "process-wide" authority §5 describes without making
/// the authority itself globally reachable.
pub struct TransactionManager {
    state: Mutex<ManagerState>,
}

impl TransactionManager {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ManagerState {
                next_id: 1,
                transactions: HashMap::new(),
            }),
        }
    }

    /// Allocates a new id, starting an Active transaction with no
    /// captured snapshots.
    pub fn begin_transaction(&self) -> u64 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        state.transactions.insert(
            id,
            Transaction {
                state: TransactionState::Active,
                pre_images: HashMap::new(),
            },
        );
        MetricsCollector::global().record(Metric::counter("tx.begin.count"));
        id
    }

    /// Records `rows` as `table_name`'s pre-image for transaction `id`,
    /// if one hasn't already been captured (first-write-wins). A no-op
    /// if `id` is unknown, not Active, or `id` is 0 ("no transaction").
    pub fn capture(&self, id: u64, table_name: &str, rows: &[Row]) {
        if id == 0 {
            return;
        }
        let mut state = self.state.lock().unwrap();
        if let Some(tx) = state.transactions.get_mut(&id) {
            if tx.state == TransactionState::Active
                && !tx.pre_images.contains_key(table_name)
            {
                tx.pre_images.insert(table_name.to_string(), rows.to_vec());
            }
        }
    }

    /// Discards `id`'s pre-images and removes the transaction record.
    pub fn commit_transaction(&self, id: u64) -> StoreResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.transactions.remove(&id).is_none() {
            return Err(StoreError::TransactionNotFound { id });
        }
        MetricsCollector::global().record(Metric::counter("tx.commit.count"));
        Ok(())
    }

    /// Restores every captured pre-image into `db`, then removes the
    /// transaction record.
    pub fn abort_transaction(&self, id: u64, db: &mut Database) -> StoreResult<()> {
        let pre_images = {
            let mut state = self.state.lock().unwrap();
            match state.transactions.remove(&id) {
                Some(tx) => tx.pre_images,
                None => return Err(StoreError::TransactionNotFound { id }),
            }
        };
        for (table_name, rows) in pre_images {
            if let Some(table) = db.get_table_mut(&table_name) {
                table.restore_rows(rows);
            }
        }
        MetricsCollector::global().record(Metric::counter("tx.abort.count"));
        Ok(())
    }
}

impl Default for TransactionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnDef;
    use crate::value::{ColumnType, Value};

    fn db_with_users() -> Database {
        let mut db = Database::new();
        db.create_table(
            "users",
            vec![
                ColumnDef::new("id", ColumnType::Int).primary_key(),
                ColumnDef::new("name", ColumnType::Text),
            ],
        )
        .unwrap();
        db.get_table_mut("users")
            .unwrap()
            .insert(vec![Value::Int64(1), Value::Text("Ada".into())]);
        db.get_table_mut("users")
            .unwrap()
            .insert(vec![Value::Int64(2), Value::Text("Linus".into())]);
        db
    }

    #[test]
    fn begin_allocates_monotonically_increasing_ids() {
        let tm = TransactionManager::new();
        let a = tm.begin_transaction();
        let b = tm.begin_transaction();
        assert!(b > a);
    }

    #[test]
    fn commit_unknown_transaction_fails() {
        let tm = TransactionManager::new();
        assert!(matches!(
            tm.commit_transaction(999),
            Err(StoreError::TransactionNotFound { .. })
        ));
    }

    #[test]
    fn commit_discards_snapshot_leaving_rows_untouched() {
        let mut db = db_with_users();
        let tm = TransactionManager::new();
        let tx = tm.begin_transaction();
        let snapshot = db.get_table("users").unwrap().rows().to_vec();
        tm.capture(tx, "users", &snapshot);
        db.get_table_mut("users")
            .unwrap()
            .insert(vec![Value::Int64(3), Value::Text("Guido".into())]);
        tm.commit_transaction(tx).unwrap();
        assert_eq!(db.get_table("users").unwrap().rows().len(), 3);
    }

    #[test]
    fn abort_restores_the_captured_snapshot() {
        let mut db = db_with_users();
        let tm = TransactionManager::new();
        let tx = tm.begin_transaction();
        let snapshot = db.get_table("users").unwrap().rows().to_vec();
        tm.capture(tx, "users", &snapshot);
        db.get_table_mut("users")
            .unwrap()
            .insert(vec![Value::Int64(3), Value::Text("Guido".into())]);
        assert_eq!(db.get_table("users").unwrap().rows().len(), 3);

        tm.abort_transaction(tx, &mut db).unwrap();
        assert_eq!(db.get_table("users").unwrap().rows().len(), 2);
    }

    #[test]
    fn second_abort_of_same_transaction_fails() {
        let mut db = db_with_users();
        let tm = TransactionManager::new();
        let tx = tm.begin_transaction();
        tm.abort_transaction(tx, &mut db).unwrap();
        assert!(matches!(
            tm.abort_transaction(tx, &mut db),
            Err(StoreError::TransactionNotFound { .. })
        ));
    }

    #[test]
    fn capture_is_first_write_wins_within_a_transaction() {
        let mut db = db_with_users();
        let tm = TransactionManager::new();
        let tx = tm.begin_transaction();
        let first_snapshot = db.get_table("users").unwrap().rows().to_vec();
        tm.capture(tx, "users", &first_snapshot);

        db.get_table_mut("users")
            .unwrap()
            .insert(vec![Value::Int64(3), Value::Text("Guido".into())]);
        let later_snapshot = db.get_table("users").unwrap().rows().to_vec();
        tm.capture(tx, "users", &later_snapshot); // should not overwrite

        db.get_table_mut("users")
            .unwrap()
            .insert(vec![Value::Int64(4), Value::Text("Dennis".into())]);
        tm.abort_transaction(tx, &mut db).unwrap();
        assert_eq!(db.get_table("users").unwrap().rows().len(), 2);
    }

    #[test]
    fn transaction_id_zero_suppresses_capture() {
        let mut db = db_with_users();
        let tm = TransactionManager::new();
        tm.capture(0, "users", &[]);
        db.get_table_mut("users")
            .unwrap()
            .insert(vec![Value::Int64(3), Value::Text("Guido".into())]);
        assert_eq!(db.get_table("users").unwrap().rows().len(), 3);
    }
}
