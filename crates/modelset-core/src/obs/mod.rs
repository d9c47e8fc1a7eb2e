//! Observability: runtime counters and the sink they flow through.
//!
//! The query layer never logs. Each resolution emits `MetricsEvent`s into
//! the active `MetricsSink`; the default sink folds them into thread-local
//! counters readable through `metrics_report`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EntityCounters, EventOps, EventReport};
pub use sink::{
    MaterializeKind, MetricsEvent, MetricsSink, metrics_report, metrics_reset_all,
    with_metrics_sink,
};
