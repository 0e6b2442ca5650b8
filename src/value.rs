// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Typed value model shared by tables, conditions, and the B+-Tree index.
//!
//! A [`Value`] is the tagged unit of data stored in a row or used as an
//! index key. Ordering and equality are defined once here so the index,
//! the table layer, and the condition evaluator agree on identical
//! semantics.

use std::cmp::Ordering;
use std::fmt;

/// A single cell value.
///
/// Variants are ordered `Null < Int64 < Float64 < Text` for comparisons
/// that span variants (see [`Value::cmp_total`]); within a variant,
/// ordering is the natural one for that Rust type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int64(i64),
    Float64(f64),
    Text(String),
}

/// The declared type of a column, independent of any stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Null,
    Int,
    Float,
    Text,
}

impl Value {
    /// Returns the [`ColumnType`] this value's variant corresponds to.
    pub fn type_of(&self) -> ColumnType {
        match self {
            Value::Null => ColumnType::Null,
            Value::Int64(_) => ColumnType::Int,
            Value::Float64(_) => ColumnType::Float,
            Value::Text(_) => ColumnType::Text,
        }
    }

    /// True if this value is a non-null value of `ty`, or is `Null`
    /// (every column type accepts Null; NOT NULL is enforced separately).
    pub fn matches_type(&self, ty: ColumnType) -> bool {
        matches!(self, Value::Null) || self.type_of() == ty
    }

    /// Renders a value the way the executor's result envelope would:
    /// `NULL` for Null, plain decimal for Int64, default-precision
    /// `Display` for Float64, and the raw (unquoted) text for Text.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Int64(i) => i.to_string(),
            Value::Float64(f) => f.to_string(),
            Value::Text(s) => s.clone(),
        }
    }

    /// Total ordering across variants, used by the B+-Tree comparator and
    /// by `less`/`equal`. Null sorts first; among non-null values the tag
    /// order is `Int64 < Float64 < Text`; floats compare via
    /// [`f64::partial_cmp`], falling back to `Equal` on NaN so the
    /// comparator stays total (NaN keys are otherwise undefined, §9).
    pub fn cmp_total(&self, other: &Value) -> Ordering {
        use Value::*;
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Null, _) => Ordering::Less,
            (_, Null) => Ordering::Greater,
            (Int64(a), Int64(b)) => a.cmp(b),
            (Float64(a), Float64(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Text(a), Text(b)) => a.cmp(b),
            (Int64(_), _) => Ordering::Less,
            (_, Int64(_)) => Ordering::Greater,
            (Float64(_), _) => Ordering::Less,
            (_, Float64(_)) => Ordering::Greater,
        }
    }

    /// `self == other` under the §3 equality rules (same variant and
    /// payload; `Null` equals `Null`).
    pub fn equal(&self, other: &Value) -> bool {
        self.cmp_total(other) == Ordering::Equal
    }

    /// `self < other` under the total ordering in [`Value::cmp_total`].
    pub fn less(&self, other: &Value) -> bool {
        self.cmp_total(other) == Ordering::Less
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp_total(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_total(other)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Null => "NULL",
            ColumnType::Int => "INT",
            ColumnType::Float => "FLOAT",
            ColumnType::Text => "TEXT",
        };
        write!(f, "{}", name)
    }
}

/// Converts a parsed-statement type name (§6) to a [`ColumnType`].
///
/// Recognizes `INT`/`INTEGER`, `FLOAT`/`REAL`, `TEXT`/`VARCHAR`/`CHAR`
/// (case-insensitive); anything else is accepted as `ColumnType::Null`
/// (usable as storage, but never satisfiable as a typed value).
pub fn parse_column_type(name: &str) -> ColumnType {
    match name.to_ascii_uppercase().as_str() {
        "INT" | "INTEGER" => ColumnType::Int,
        "FLOAT" | "REAL" => ColumnType::Float,
        "TEXT" | "VARCHAR" | "CHAR" => ColumnType::Text,
        _ => ColumnType::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_is_less_than_everything() {
        assert!(Value::Null.less(&Value::Int64(0)));
        assert!(Value::Null.less(&Value::Text(String::new())));
        assert!(Value::Null.equal(&Value::Null));
    }

    #[test]
    fn variant_tag_order() {
        assert!(Value::Int64(1_000_000).less(&Value::Float64(0.0)));
        assert!(Value::Float64(f64::MAX).less(&Value::Text("".to_string())));
    }

    #[test]
    fn natural_order_within_variant() {
        assert!(Value::Int64(1).less(&Value::Int64(2)));
        assert!(Value::Text("a".into()).less(&Value::Text("b".into())));
        assert!(!Value::Float64(1.0).less(&Value::Float64(1.0)));
    }

    #[test]
    fn equality_requires_same_variant() {
        assert!(!Value::Int64(1).equal(&Value::Float64(1.0)));
    }

    #[test]
    fn nan_does_not_panic_the_comparator() {
        let nan = Value::Float64(f64::NAN);
        let _ = nan.less(&Value::Float64(1.0));
        let _ = nan.equal(&nan);
    }

    #[test]
    fn matches_type_allows_null_everywhere() {
        assert!(Value::Null.matches_type(ColumnType::Int));
        assert!(Value::Int64(1).matches_type(ColumnType::Int));
        assert!(!Value::Int64(1).matches_type(ColumnType::Text));
    }

    #[test]
    fn display_string_formats_each_variant() {
        assert_eq!(Value::Null.to_display_string(), "NULL");
        assert_eq!(Value::Int64(42).to_display_string(), "42");
        assert_eq!(Value::Text("hi".into()).to_display_string(), "hi");
    }

    #[test]
    fn parse_column_type_recognizes_aliases() {
        assert_eq!(parse_column_type("integer"), ColumnType::Int);
        assert_eq!(parse_column_type("REAL"), ColumnType::Float);
        assert_eq!(parse_column_type("VarChar"), ColumnType::Text);
        assert_eq!(parse_column_type("blob"), ColumnType::Null);
    }
}
