// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Table abstraction: a row heap plus an optional primary-key index.

pub mod table;

pub use table::{Row, Table};
