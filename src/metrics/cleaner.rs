//! Cleaning phase metrics

use crate::metrics::{phase_metric, MetricDoc, MetricType, PhaseMetrics};

pub struct CleanerMetrics;

impl CleanerMetrics {
    pub const DURATION_HISTOGRAM: &'static str = phase_metric!(histogram, "clean", "duration_seconds");

    pub fn record_rows_read(count: usize) {
        ::metrics::counter!(phase_metric!(counter, "clean", "rows_read")).increment(count as u64);
    }

    pub fn record_rows_kept(count: usize) {
        ::metrics::counter!(phase_metric!(counter, "clean", "rows_kept")).increment(count as u64);
    }

    pub fn record_rows_removed(action_items: usize, unclassified: usize, duplicates: usize) {
        ::metrics::counter!(phase_metric!(counter, "clean", "action_items_removed"))
            .increment(action_items as u64);
        ::metrics::counter!(phase_metric!(counter, "clean", "unclassified_removed"))
            .increment(unclassified as u64);
        ::metrics::counter!(phase_metric!(counter, "clean", "duplicates_removed"))
            .increment(duplicates as u64);
    }

    pub fn record_config_error() {
        ::metrics::counter!(phase_metric!(counter, "clean", "config_errors")).increment(1);
    }
}

impl PhaseMetrics for CleanerMetrics {
    fn register_metrics() {
        use ::metrics::{counter, histogram};

        let _ = counter!(phase_metric!(counter, "clean", "rows_read"));
        let _ = counter!(phase_metric!(counter, "clean", "rows_kept"));
        let _ = counter!(phase_metric!(counter, "clean", "action_items_removed"));
        let _ = counter!(phase_metric!(counter, "clean", "unclassified_removed"));
        let _ = counter!(phase_metric!(counter, "clean", "duplicates_removed"));
        let _ = counter!(phase_metric!(counter, "clean", "config_errors"));
        let _ = histogram!(Self::DURATION_HISTOGRAM);
    }

    fn phase_name() -> &'static str {
        "clean"
    }

    fn metrics_documentation() -> Vec<MetricDoc> {
        vec![
            MetricDoc {
                name: phase_metric!(counter, "clean", "rows_read"),
                metric_type: MetricType::Counter,
                help: "Rows read from input tables",
            },
            MetricDoc {
                name: phase_metric!(counter, "clean", "rows_kept"),
                metric_type: MetricType::Counter,
                help: "Rows written to cleaned output",
            },
            MetricDoc {
                name: phase_metric!(counter, "clean", "action_items_removed"),
                metric_type: MetricType::Counter,
                help: "Rows dropped as action items",
            },
            MetricDoc {
                name: phase_metric!(counter, "clean", "unclassified_removed"),
                metric_type: MetricType::Counter,
                help: "Rows dropped for not looking like an address",
            },
            MetricDoc {
                name: phase_metric!(counter, "clean", "duplicates_removed"),
                metric_type: MetricType::Counter,
                help: "Rows dropped as duplicate addresses",
            },
            MetricDoc {
                name: phase_metric!(counter, "clean", "config_errors"),
                metric_type: MetricType::Counter,
                help: "Runs refused because a configured column was missing",
            },
            MetricDoc {
                name: Self::DURATION_HISTOGRAM,
                metric_type: MetricType::Histogram,
                help: "Wall time of one cleaning pass",
            },
        ]
    }
}
