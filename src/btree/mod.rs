// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! In-memory B+-Tree index.
//!
//! The ordered index backing every primary-key lookup in [`crate::tables`].
//! See [`tree::BPlusTree`] for the algorithm (splitting, sibling linking,
//! range scans) and [`types::Index`] for the trait it implements.

pub mod node;
pub mod tree;
pub mod types;

pub use tree::BPlusTree;
pub use types::{Index, Order};
