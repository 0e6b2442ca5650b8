// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Process-wide metrics buffer.
//!
//! There is no persistent backend here: metrics live only for the
//! lifetime of the process, in a plain in-memory buffer. `flush()` exists
//! for API parity with code that expects a periodic drain point, but it
//! discards rather than writes anything out.

use crate::metrics::types::Metric;
use once_cell::sync::Lazy;
use std::sync::Mutex;

static GLOBAL: Lazy<MetricsCollector> = Lazy::new(MetricsCollector::new);

/// A thread-safe buffer of recorded [`Metric`] values.
pub struct MetricsCollector {
    buffer: Mutex<Vec<Metric>>,
}

impl MetricsCollector {
    pub(crate) fn new() -> Self {
        Self {
            buffer: Mutex::new(Vec::new()),
        }
    }

    /// Returns the process-wide collector.
    pub fn global() -> &'static MetricsCollector {
        &GLOBAL
    }

    /// Appends a metric to the buffer.
    pub fn record(&self, metric: Metric) {
        self.buffer.lock().unwrap().push(metric);
    }

    /// Number of metrics currently buffered.
    pub fn buffer_size(&self) -> usize {
        self.buffer.lock().unwrap().len()
    }

    /// Returns a snapshot of all buffered metrics with a matching name.
    pub fn values_for(&self, name: &str) -> Vec<f64> {
        self.buffer
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.name == name)
            .map(|m| m.value)
            .collect()
    }

    /// Empties the buffer without returning its contents.
    pub fn clear(&self) {
        self.buffer.lock().unwrap().clear();
    }

    /// Drains the buffer. With no persistent backend this is equivalent
    /// to [`MetricsCollector::clear`]; it exists so call sites that
    /// periodically flush don't need to special-case an in-memory-only
    /// store.
    pub fn flush(&self) {
        self.buffer.lock().unwrap().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::types::MetricUnit;

    #[test]
    fn record_and_clear() {
        let collector = MetricsCollector::new();
        collector.record(Metric::new("a", 1.0, MetricUnit::Count));
        collector.record(Metric::new("a", 2.0, MetricUnit::Count));
        assert_eq!(collector.buffer_size(), 2);
        collector.clear();
        assert_eq!(collector.buffer_size(), 0);
    }

    #[test]
    fn values_for_filters_by_name() {
        let collector = MetricsCollector::new();
        collector.record(Metric::new("a", 1.0, MetricUnit::Count));
        collector.record(Metric::new("b", 2.0, MetricUnit::Count));
        collector.record(Metric::new("a", 3.0, MetricUnit::Count));
        assert_eq!(collector.values_for("a"), vec![1.0, 3.0]);
    }

    #[test]
    fn global_is_a_singleton() {
        let before = MetricsCollector::global().values_for("collector_singleton_probe").len();
        MetricsCollector::global().record(Metric::counter("collector_singleton_probe"));
        let after = MetricsCollector::global().values_for("collector_singleton_probe").len();
        assert_eq!(after, before + 1);
    }
}
