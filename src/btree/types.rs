// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Core types for the in-memory B+-Tree index.
//!
//! Defines the generic [`Index`] trait implemented by [`crate::btree::tree::BPlusTree`]
//! and the [`Order`] configuration newtype.

use crate::error::StoreError;
use serde::{Deserialize, Serialize};

/// Generic index interface for key-value storage backends.
///
/// Gives the table layer a narrow, backend-agnostic surface — it talks to
/// "an ordered index" without depending on B+-Tree internals directly.
///
/// ## Type Parameters
/// - `K`: Key type (must implement `Clone + Ord`)
/// - `V`: Value type (must implement `Clone`)
pub trait Index<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    /// Retrieve the value for a given key, if present.
    ///
    /// ## Performance
    /// - O(log n) tree descent.
    fn get(&self, key: &K) -> Option<V>;

    /// Retrieve all key-value pairs with `lo <= key <= hi`, ascending.
    ///
    /// ## Performance
    /// - O(log n) to locate `lo`, then O(k) for `k` matching entries.
    fn range(&self, lo: &K, hi: &K) -> Vec<(K, V)>;

    /// Insert or overwrite the value for `key` (upsert).
    ///
    /// ## Performance
    /// - O(log n) amortized; O(n) worst case on a split cascade.
    fn insert(&mut self, key: K, value: V);

    /// Overwrite the value at `key` if present. Returns whether it existed.
    fn update(&mut self, key: &K, value: V) -> bool;

    /// Remove `key` if present. Returns whether it existed.
    ///
    /// Does not rebalance or merge underflowed nodes (§9 open question).
    fn remove(&mut self, key: &K) -> bool;

    /// Number of live entries.
    fn len(&self) -> usize;

    /// True if the index holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// B+-Tree order (degree) configuration.
///
/// Defines the maximum number of keys a node may hold before it splits.
///
/// ## Constraints
/// - Minimum order: 3.
///
/// ## Example
/// ```
/// use rowbase::btree::Order;
///
/// let order = Order::new(4).unwrap();
/// assert_eq!(order.max_keys(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order(u16);

impl Order {
    /// Create a new order with validation.
    ///
    /// ## Error Conditions
    /// - `order < 3`: B+-Trees require a minimum order of 3.
    pub fn new(order: u16) -> Result<Self, StoreError> {
        if order < 3 {
            return Err(StoreError::InvalidIdentifier {
                name: format!("btree order {} (must be >= 3)", order),
            });
        }
        Ok(Self(order))
    }

    /// Maximum number of keys a node may hold before it splits.
    pub fn max_keys(&self) -> u16 {
        self.0
    }

    /// Half-full requirement; unused while remove does not rebalance, kept
    /// for parity with a future merging implementation.
    pub fn min_keys(&self) -> u16 {
        self.0 / 2
    }

    /// Raw order value.
    pub fn value(&self) -> u16 {
        self.0
    }
}

impl Default for Order {
    /// The default order used when none is specified is 4, per spec.
    fn default() -> Self {
        Order(4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_validation() {
        assert!(Order::new(3).is_ok());
        assert!(Order::new(100).is_ok());
        assert!(Order::new(2).is_err());
        assert!(Order::new(0).is_err());
    }

    #[test]
    fn order_min_keys() {
        assert_eq!(Order::new(100).unwrap().min_keys(), 50);
        assert_eq!(Order::new(3).unwrap().min_keys(), 1);
    }

    #[test]
    fn default_order_is_four() {
        assert_eq!(Order::default().max_keys(), 4);
    }
}
