// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! In-memory observability for the storage engine.
//!
//! Provides lightweight performance monitoring, held entirely in the
//! process — there is no on-disk metrics store:
//! - **Types**: [`Metric`], [`MetricType`], [`MetricUnit`]
//! - **Collector**: [`MetricsCollector`], a global singleton buffer
//! - **Aggregator**: percentile and statistical calculations over a
//!   buffer snapshot
//!
//! ## Quick Start
//!
//! ```rust
//! use rowbase::metrics::{MetricsCollector, Metric, MetricUnit};
//!
//! let metric = Metric::new("table.insert.duration_us", 12.0, MetricUnit::Microseconds)
//!     .with_tag("table", "users");
//!
//! MetricsCollector::global().record(metric);
//! ```
//!
//! ## Thread Safety
//!
//! `MetricsCollector` guards its buffer with a `Mutex`; multiple threads
//! may record concurrently.

pub mod aggregator;
pub mod collector;
pub mod types;

// Re-export commonly used types for convenience
pub use aggregator::{calculate_stats, p50, p95, p99, MetricStats};
pub use collector::MetricsCollector;
pub use types::{Metric, MetricType, MetricUnit};
