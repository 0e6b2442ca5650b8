// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Table catalog: a named collection of [`Table`]s.

use crate::error::{StoreError, StoreResult};
use crate::schema::{validate_columns, validate_identifier, ColumnDef};
use crate::tables::Table;
use std::collections::BTreeMap;

/// Maps table name to [`Table`]. Owns every table it holds.
#[derive(Default)]
pub struct Database {
    tables: BTreeMap<String, Table>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table named `name` with the given columns. Rejects a
    /// duplicate name, an invalid table or column identifier, and a
    /// column set declaring more than one primary key.
    pub fn create_table(&mut self, name: &str, columns: Vec<ColumnDef>) -> StoreResult<()> {
        if self.tables.contains_key(name) {
            return Err(StoreError::TableAlreadyExists {
                name: name.to_string(),
            });
        }
        validate_identifier(name)?;
        validate_columns(name, &columns)?;
        self.tables.insert(name.to_string(), Table::new(name, columns));
        Ok(())
    }

    /// Removes a table. Fails if no table named `name` exists.
    pub fn drop_table(&mut self, name: &str) -> StoreResult<()> {
        self.tables
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| StoreError::TableNotFound {
                name: name.to_string(),
            })
    }

    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    pub fn get_table_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.tables.get_mut(name)
    }

    /// Table names in catalog (ascending) order.
    pub fn list_tables(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }

    pub fn table_exists(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ColumnType;

    fn columns() -> Vec<ColumnDef> {
        vec![ColumnDef::new("id", ColumnType::Int).primary_key()]
    }

    #[test]
    fn create_table_then_lookup() {
        let mut db = Database::new();
        db.create_table("users", columns()).unwrap();
        assert!(db.table_exists("users"));
        assert!(db.get_table("users").is_some());
    }

    #[test]
    fn create_table_rejects_duplicate_name() {
        let mut db = Database::new();
        db.create_table("users", columns()).unwrap();
        assert!(matches!(
            db.create_table("users", columns()),
            Err(StoreError::TableAlreadyExists { .. })
        ));
    }

    #[test]
    fn create_table_rejects_invalid_identifier() {
        let mut db = Database::new();
        assert!(matches!(
            db.create_table("2bad", columns()),
            Err(StoreError::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn drop_table_removes_and_then_reports_not_found() {
        let mut db = Database::new();
        db.create_table("users", columns()).unwrap();
        db.drop_table("users").unwrap();
        assert!(!db.table_exists("users"));
        assert!(matches!(
            db.drop_table("users"),
            Err(StoreError::TableNotFound { .. })
        ));
    }

    #[test]
    fn list_tables_is_sorted_by_name() {
        let mut db = Database::new();
        db.create_table("zebra", columns()).unwrap();
        db.create_table("apple", columns()).unwrap();
        assert_eq!(db.list_tables(), vec!["apple".to_string(), "zebra".to_string()]);
    }
}
