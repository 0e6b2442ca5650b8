// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Schema definitions for rowbase tables.
//!
//! Provides:
//! - **Column schema** — [`ColumnDef`], the typed column declarations a
//!   [`crate::tables::Table`] is constructed from.
//! - **Identifier validation** — table and column names are checked
//!   against a plain identifier pattern before a table is created.
//! - **Condition evaluation** — see [`condition`] for the predicate
//!   language tables are queried with.

pub mod condition;

use crate::error::StoreError;
use crate::value::ColumnType;
use once_cell::sync::Lazy;
use regex::Regex;

pub use condition::{Condition, Operator};

/// A single column declaration within a table.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub column_type: ColumnType,
    pub primary_key: bool,
    pub not_null: bool,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            primary_key: false,
            not_null: false,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }
}

/// Matches a lowercase-or-mixed-case identifier: ASCII letters, digits,
/// and underscores, not starting with a digit. Table and column names
/// must satisfy this before a table is created (§2a).
static IDENTIFIER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Validates a table or column name against [`IDENTIFIER_PATTERN`].
pub fn validate_identifier(name: &str) -> Result<(), StoreError> {
    if IDENTIFIER_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(StoreError::InvalidIdentifier {
            name: name.to_string(),
        })
    }
}

/// Validates a full column set for a new table: every name is a valid
/// identifier, and at most one column declares `primary_key`, and any
/// primary key is an Int or Text column (§3).
pub fn validate_columns(table: &str, columns: &[ColumnDef]) -> Result<(), StoreError> {
    let mut pk_count = 0;
    for column in columns {
        validate_identifier(&column.name)?;
        if column.primary_key {
            pk_count += 1;
            if !matches!(column.column_type, ColumnType::Int | ColumnType::Text) {
                return Err(StoreError::InvalidPrimaryKeyType {
                    table: table.to_string(),
                    column: column.name.clone(),
                });
            }
        }
    }
    if pk_count > 1 {
        return Err(StoreError::MultiplePrimaryKeys {
            table: table.to_string(),
        });
    }
    Ok(())
}
