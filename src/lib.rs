// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! rowbase - an in-memory relational store with a B+-Tree primary-key index.
//!
//! A single-node engine offering typed tables, predicate evaluation, and
//! snapshot-rollback transactions over data held entirely in memory —
//! durability is explicitly out of scope.
//!
//! ## Quick Start
//!
//! ```rust
//! use rowbase::database::Database;
//! use rowbase::schema::ColumnDef;
//! use rowbase::value::{ColumnType, Value};
//!
//! let mut db = Database::new();
//! db.create_table(
//!     "users",
//!     vec![
//!         ColumnDef::new("id", ColumnType::Int).primary_key(),
//!         ColumnDef::new("name", ColumnType::Text),
//!     ],
//! ).unwrap();
//!
//! let table = db.get_table_mut("users").unwrap();
//! table.insert(vec![Value::Int64(1), Value::Text("Ada".into())]);
//! assert_eq!(table.rows().len(), 1);
//! ```
//!
//! ## Architecture
//!
//! - **value**: the typed [`Value`] model and its total ordering.
//! - **btree**: the ordered [`btree::BPlusTree`] index backing every
//!   primary key.
//! - **schema**: column definitions, identifier validation, and
//!   predicate evaluation.
//! - **tables**: the row-heap-plus-index [`tables::Table`] abstraction.
//! - **database**: the table catalog.
//! - **transaction**: snapshot-based rollback across tables.
//! - **executor**: dispatches parsed statements to the above.
//! - **metrics**: in-memory observability, never persisted to disk.

pub mod btree;
pub mod database;
pub mod error;
pub mod executor;
pub mod metrics;
pub mod schema;
pub mod tables;
pub mod transaction;
pub mod value;

pub use error::{StoreError, StoreResult};
pub use metrics::{Metric, MetricType, MetricUnit, MetricsCollector};
