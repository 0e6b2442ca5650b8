// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Error types for rowbase operations.
//!
//! Provides structured error handling with detailed context for debugging.

use std::fmt;

/// Standard Result type for all rowbase operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Error types for rowbase operations.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Table not found in the catalog.
    TableNotFound { name: String },

    /// Table already exists in the catalog.
    TableAlreadyExists { name: String },

    /// Column not found on a table.
    ColumnNotFound { table: String, column: String },

    /// Transaction id unknown (never existed, or already committed/aborted).
    TransactionNotFound { id: u64 },

    /// Primary-key value already present on the table.
    DuplicateKey { table: String, key: String },

    /// Row length does not match the table's column count.
    ColumnCountMismatch { expected: usize, found: usize },

    /// A NOT NULL column received a Null value.
    NotNullViolation { table: String, column: String },

    /// A column's value type does not match its declared type.
    TypeMismatch {
        table: String,
        column: String,
        expected: String,
        found: String,
    },

    /// More than one primary-key column declared for a table.
    MultiplePrimaryKeys { table: String },

    /// A primary-key column was declared with a type that cannot be a key
    /// (only Int and Text primary keys are supported).
    InvalidPrimaryKeyType { table: String, column: String },

    /// A table or column identifier failed validation.
    InvalidIdentifier { name: String },

    /// A value string could not be coerced to the target column type.
    ParseCoercion { value: String, target_type: String },

    /// A condition used an operator outside {=, !=, <, >, <=, >=}.
    UnknownOperator { op: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TableNotFound { name } => write!(f, "table '{}' not found", name),
            Self::TableAlreadyExists { name } => write!(f, "table '{}' already exists", name),
            Self::ColumnNotFound { table, column } => {
                write!(f, "column '{}' not found on table '{}'", column, table)
            }
            Self::TransactionNotFound { id } => write!(f, "transaction {} not found", id),
            Self::DuplicateKey { table, key } => {
                write!(f, "duplicate primary key '{}' on table '{}'", key, table)
            }
            Self::ColumnCountMismatch { expected, found } => write!(
                f,
                "row has {} values, table has {} columns",
                found, expected
            ),
            Self::NotNullViolation { table, column } => write!(
                f,
                "column '{}' on table '{}' is NOT NULL but got Null",
                column, table
            ),
            Self::TypeMismatch {
                table,
                column,
                expected,
                found,
            } => write!(
                f,
                "column '{}' on table '{}' expects {}, got {}",
                column, table, expected, found
            ),
            Self::MultiplePrimaryKeys { table } => {
                write!(f, "table '{}' declares more than one primary key", table)
            }
            Self::InvalidPrimaryKeyType { table, column } => write!(
                f,
                "column '{}' on table '{}' cannot be a primary key (must be Int or Text)",
                column, table
            ),
            Self::InvalidIdentifier { name } => write!(f, "invalid identifier '{}'", name),
            Self::ParseCoercion { value, target_type } => write!(
                f,
                "cannot coerce '{}' to column type {}",
                value, target_type
            ),
            Self::UnknownOperator { op } => write!(f, "unknown condition operator '{}'", op),
        }
    }
}

impl std::error::Error for StoreError {}
