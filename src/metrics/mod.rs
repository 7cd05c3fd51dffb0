//! Metrics for the cleaning pipeline
//!
//! Counters and histograms are emitted through the `metrics` facade. No
//! recorder is installed by this crate, so they are free no-ops unless an
//! embedding application installs one.

pub mod cleaner;
pub mod core;

pub use cleaner::CleanerMetrics;
pub use self::core::{time_operation, TimingGuard};

use std::sync::Once;

static INIT: Once = Once::new();

/// Register all phase metrics with whatever recorder is installed. Idempotent.
pub fn init_metrics() {
    INIT.call_once(|| {
        CleanerMetrics::register_metrics();
        tracing::debug!(phase = CleanerMetrics::phase_name(), "metrics registered");
    });
}

/// Trait for phase-specific metrics collections
pub trait PhaseMetrics {
    /// Register all metrics for this phase
    fn register_metrics();

    /// Get the phase name for prefixing metrics
    fn phase_name() -> &'static str;

    /// Get documentation for all metrics in this phase
    fn metrics_documentation() -> Vec<MetricDoc>;
}

/// Documentation for a single metric
#[derive(Debug, Clone)]
pub struct MetricDoc {
    pub name: &'static str,
    pub metric_type: MetricType,
    pub help: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MetricType {
    Counter,
    Histogram,
}

impl std::fmt::Display for MetricType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricType::Counter => f.write_str("counter"),
            MetricType::Histogram => f.write_str("histogram"),
        }
    }
}

/// Every metric this crate can emit, for `csv_cleaner metrics`.
pub fn documentation() -> Vec<MetricDoc> {
    CleanerMetrics::metrics_documentation()
}

/// Naming convention: csvc_{phase}_{metric_name}[_total]
macro_rules! phase_metric {
    (counter, $phase:literal, $name:literal) => {
        concat!("csvc_", $phase, "_", $name, "_total")
    };
    (histogram, $phase:literal, $name:literal) => {
        concat!("csvc_", $phase, "_", $name)
    };
}

pub(crate) use phase_metric;
