// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Statement dispatch: the single entry point that turns a parsed
//! statement into a mutation or query against a [`Database`].
//!
//! The tokenizer and statement parser live outside this crate (§1); a
//! [`Statement`] is assumed already validated by that external layer.

use crate::database::Database;
use crate::error::{StoreError, StoreResult};
use crate::schema::{Condition, ColumnDef};
use crate::tables::Row;
use crate::transaction::TransactionManager;
use crate::value::{ColumnType, Value};

/// A fully parsed statement, ready for dispatch. `tx_id` is `0` for
/// statements executed outside any transaction.
#[derive(Debug, Clone)]
pub enum Statement {
    CreateTable {
        name: String,
        columns: Vec<ColumnDef>,
    },
    Insert {
        table: String,
        column_names: Option<Vec<String>>,
        value_rows: Vec<Vec<String>>,
        tx_id: u64,
    },
    Select {
        columns: Vec<String>,
        table: String,
        conditions: Vec<Condition>,
    },
    Update {
        table: String,
        assignments: Vec<(String, String)>,
        conditions: Vec<Condition>,
        tx_id: u64,
    },
    Delete {
        table: String,
        conditions: Vec<Condition>,
        tx_id: u64,
    },
    DropTable {
        name: String,
    },
    ShowTables,
    BeginTransaction,
    CommitTransaction {
        id: u64,
    },
    AbortTransaction {
        id: u64,
    },
}

/// The result of dispatching one [`Statement`].
#[derive(Debug, Clone, PartialEq)]
pub enum ExecResult {
    Rows { columns: Vec<ColumnDef>, rows: Vec<Row> },
    Affected(usize),
    Tables(Vec<String>),
    TransactionBegun(u64),
    Ack,
}

/// Dispatches `statement` against `db`, consulting `tm` for
/// transaction-aware mutations.
pub fn execute(
    db: &mut Database,
    tm: &TransactionManager,
    statement: Statement,
) -> StoreResult<ExecResult> {
    match statement {
        Statement::CreateTable { name, columns } => {
            db.create_table(&name, columns)?;
            Ok(ExecResult::Ack)
        }
        Statement::Insert {
            table,
            column_names,
            value_rows,
            tx_id,
        } => {
            let count = insert_rows(db, tm, &table, column_names, value_rows, tx_id)?;
            Ok(ExecResult::Affected(count))
        }
        Statement::Select {
            columns,
            table,
            conditions,
        } => select(db, &table, &columns, &conditions),
        Statement::Update {
            table,
            assignments,
            conditions,
            tx_id,
        } => {
            let count = update_rows(db, tm, &table, assignments, &conditions, tx_id)?;
            Ok(ExecResult::Affected(count))
        }
        Statement::Delete {
            table,
            conditions,
            tx_id,
        } => {
            let count = delete_rows(db, tm, &table, &conditions, tx_id)?;
            Ok(ExecResult::Affected(count))
        }
        Statement::DropTable { name } => {
            db.drop_table(&name)?;
            Ok(ExecResult::Ack)
        }
        Statement::ShowTables => Ok(ExecResult::Tables(db.list_tables())),
        Statement::BeginTransaction => Ok(ExecResult::TransactionBegun(tm.begin_transaction())),
        Statement::CommitTransaction { id } => {
            tm.commit_transaction(id)?;
            Ok(ExecResult::Ack)
        }
        Statement::AbortTransaction { id } => {
            tm.abort_transaction(id, db)?;
            Ok(ExecResult::Ack)
        }
    }
}

fn insert_rows(
    db: &mut Database,
    tm: &TransactionManager,
    table_name: &str,
    column_names: Option<Vec<String>>,
    value_rows: Vec<Vec<String>>,
    tx_id: u64,
) -> StoreResult<usize> {
    let table = db
        .get_table_mut(table_name)
        .ok_or_else(|| StoreError::TableNotFound {
            name: table_name.to_string(),
        })?;

    tm.capture(tx_id, table_name, table.rows());

    let mut inserted = 0;
    for value_row in value_rows {
        let row = build_row(table.columns(), column_names.as_deref(), &value_row);
        if table.insert(row) {
            inserted += 1;
        }
    }
    Ok(inserted)
}

/// Constructs a [`Row`] from string values per the coercion rules in §4.7.
fn build_row(columns: &[ColumnDef], column_names: Option<&[String]>, values: &[String]) -> Row {
    match column_names {
        Some(names) => {
            let mut row: Row = columns.iter().map(|_| Value::Null).collect();
            for (name, raw) in names.iter().zip(values.iter()) {
                if let Some(idx) = columns.iter().position(|c| &c.name == name) {
                    row[idx] = coerce_value(raw, columns[idx].column_type);
                }
            }
            row
        }
        None => values
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                let target = columns.get(i).map(|c| c.column_type).unwrap_or(ColumnType::Null);
                coerce_value(raw, target)
            })
            .collect(),
    }
}

/// Coerces one raw value string to a [`Value`] against `target`: the
/// literal `NULL` (any case) becomes Null; a matching pair of quotes is
/// stripped to Text; otherwise the string is parsed as `target`'s type,
/// falling back to Text if parsing fails.
fn coerce_value(raw: &str, target: ColumnType) -> Value {
    if raw.eq_ignore_ascii_case("null") {
        return Value::Null;
    }
    if let Some(text) = strip_matching_quotes(raw) {
        return Value::Text(text);
    }
    match target {
        ColumnType::Int => raw
            .parse::<i64>()
            .map(Value::Int64)
            .unwrap_or_else(|_| Value::Text(raw.to_string())),
        ColumnType::Float => raw
            .parse::<f64>()
            .map(Value::Float64)
            .unwrap_or_else(|_| Value::Text(raw.to_string())),
        ColumnType::Text | ColumnType::Null => Value::Text(raw.to_string()),
    }
}

fn strip_matching_quotes(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'\'' && last == b'\'') || (first == b'"' && last == b'"') {
            return Some(raw[1..raw.len() - 1].to_string());
        }
    }
    None
}

fn select(
    db: &Database,
    table_name: &str,
    projection: &[String],
    conditions: &[Condition],
) -> StoreResult<ExecResult> {
    let table = db
        .get_table(table_name)
        .ok_or_else(|| StoreError::TableNotFound {
            name: table_name.to_string(),
        })?;

    let rows = table.select(conditions);

    if projection.is_empty() {
        return Ok(ExecResult::Rows {
            columns: table.columns().to_vec(),
            rows,
        });
    }

    let indices: Vec<usize> = projection
        .iter()
        .filter_map(|name| table.column_index(name))
        .collect();
    let columns: Vec<ColumnDef> = indices.iter().map(|&i| table.columns()[i].clone()).collect();
    let projected: Vec<Row> = rows
        .into_iter()
        .map(|row| indices.iter().map(|&i| row[i].clone()).collect::<Row>())
        .collect();
    Ok(ExecResult::Rows {
        columns,
        rows: projected,
    })
}

fn update_rows(
    db: &mut Database,
    tm: &TransactionManager,
    table_name: &str,
    assignments: Vec<(String, String)>,
    conditions: &[Condition],
    tx_id: u64,
) -> StoreResult<usize> {
    let table = db
        .get_table_mut(table_name)
        .ok_or_else(|| StoreError::TableNotFound {
            name: table_name.to_string(),
        })?;

    tm.capture(tx_id, table_name, table.rows());

    let resolved: Vec<(String, Value)> = assignments
        .into_iter()
        .map(|(name, raw)| {
            let value = match table.column_index(&name) {
                Some(idx) => coerce_value(&raw, table.columns()[idx].column_type),
                None => Value::Null,
            };
            (name, value)
        })
        .collect();

    Ok(table.update(&resolved, conditions))
}

fn delete_rows(
    db: &mut Database,
    tm: &TransactionManager,
    table_name: &str,
    conditions: &[Condition],
    tx_id: u64,
) -> StoreResult<usize> {
    let table = db
        .get_table_mut(table_name)
        .ok_or_else(|| StoreError::TableNotFound {
            name: table_name.to_string(),
        })?;

    tm.capture(tx_id, table_name, table.rows());
    Ok(table.remove(conditions))
}
