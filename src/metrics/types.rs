// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Metric value types.

use std::time::{SystemTime, UNIX_EPOCH};

fn now_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before Unix epoch")
        .as_nanos() as u64
}

/// What a metric is measuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    /// A single timed or counted event.
    Counter,
    /// A point-in-time measurement (duration, size, rate).
    Gauge,
}

/// The unit a metric's value is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricUnit {
    Microseconds,
    Milliseconds,
    Count,
    Bytes,
    Ratio,
}

impl MetricUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            MetricUnit::Microseconds => "us",
            MetricUnit::Milliseconds => "ms",
            MetricUnit::Count => "count",
            MetricUnit::Bytes => "bytes",
            MetricUnit::Ratio => "ratio",
        }
    }
}

/// A single recorded measurement: a name, a value, a unit, tags
/// identifying where it came from (table name, operation, etc), and the
/// nanosecond timestamp it was recorded at.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub name: String,
    pub value: f64,
    pub unit: MetricUnit,
    pub metric_type: MetricType,
    pub tags: Vec<(String, String)>,
    pub timestamp: u64,
}

impl Metric {
    /// Creates a gauge metric. Use [`Metric::counter`] for counted events.
    pub fn new(name: impl Into<String>, value: f64, unit: MetricUnit) -> Self {
        Self {
            name: name.into(),
            value,
            unit,
            metric_type: MetricType::Gauge,
            tags: Vec::new(),
            timestamp: now_nanos(),
        }
    }

    /// Creates a counter metric with a value of `1.0`.
    pub fn counter(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: 1.0,
            unit: MetricUnit::Count,
            metric_type: MetricType::Counter,
            tags: Vec::new(),
            timestamp: now_nanos(),
        }
    }

    /// Attaches a tag, consuming and returning `self` for chaining.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push((key.into(), value.into()));
        self
    }

    /// Returns the value of the first tag matching `key`, if any.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
