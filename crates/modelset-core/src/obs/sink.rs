//! Metrics sink boundary.
//!
//! Query logic MUST NOT touch obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
use crate::{
    obs::metrics::{self, EventReport},
    query::QueryMode,
};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = RefCell::new(None);
}

///
/// MaterializeKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MaterializeKind {
    Intersection,
    SortStore,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    Resolve {
        entity: &'static str,
        mode: QueryMode,
    },
    Materialize {
        entity: &'static str,
        kind: MaterializeKind,
        rows: u64,
    },
    RangeScan {
        entity: &'static str,
        rows: u64,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default thread-local sink that writes into global metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::Resolve { entity, mode } => {
                metrics::with_state_mut(|m| {
                    m.ops.resolve_calls = m.ops.resolve_calls.saturating_add(1);
                    match mode {
                        QueryMode::All => m.ops.resolve_all = m.ops.resolve_all.saturating_add(1),
                        QueryMode::Equality => {
                            m.ops.resolve_equality = m.ops.resolve_equality.saturating_add(1);
                        }
                        QueryMode::Range => {
                            m.ops.resolve_range = m.ops.resolve_range.saturating_add(1);
                        }
                    }

                    let entry = m.entities.entry(entity.to_string()).or_default();
                    entry.resolve_calls = entry.resolve_calls.saturating_add(1);
                });
            }

            MetricsEvent::Materialize { entity, kind, rows } => {
                metrics::with_state_mut(|m| {
                    m.ops.rows_materialized = m.ops.rows_materialized.saturating_add(rows);
                    let entry = m.entities.entry(entity.to_string()).or_default();
                    entry.rows_materialized = entry.rows_materialized.saturating_add(rows);

                    match kind {
                        MaterializeKind::Intersection => {
                            m.ops.intersections = m.ops.intersections.saturating_add(1);
                            entry.intersections = entry.intersections.saturating_add(1);
                        }
                        MaterializeKind::SortStore => {
                            m.ops.sort_stores = m.ops.sort_stores.saturating_add(1);
                            entry.sort_stores = entry.sort_stores.saturating_add(1);
                        }
                    }
                });
            }

            MetricsEvent::RangeScan { entity, rows } => {
                metrics::with_state_mut(|m| {
                    m.ops.range_scans = m.ops.range_scans.saturating_add(1);
                    m.ops.rows_scanned = m.ops.rows_scanned.saturating_add(rows);
                    let entry = m.entities.entry(entity.to_string()).or_default();
                    entry.range_scans = entry.range_scans.saturating_add(1);
                    entry.rows_scanned = entry.rows_scanned.saturating_add(rows);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    // clone out of the slot so a sink may itself record without a borrow conflict
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());

    match sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current metrics state.
#[must_use]
pub fn metrics_report() -> EventReport {
    metrics::with_state(Clone::clone)
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        cell::Cell,
        panic::{AssertUnwindSafe, catch_unwind},
    };

    #[derive(Default)]
    struct CountingSink {
        calls: Cell<usize>,
    }

    impl MetricsSink for CountingSink {
        fn record(&self, _: MetricsEvent) {
            self.calls.set(self.calls.get() + 1);
        }
    }

    fn resolve_event() -> MetricsEvent {
        MetricsEvent::Resolve {
            entity: "obs::tests::Entity",
            mode: QueryMode::All,
        }
    }

    #[test]
    fn with_metrics_sink_routes_and_restores_nested_overrides() {
        SINK_OVERRIDE.with(|cell| {
            *cell.borrow_mut() = None;
        });

        let outer = Rc::new(CountingSink::default());
        let inner = Rc::new(CountingSink::default());

        // No override installed yet.
        record(resolve_event());
        assert_eq!(outer.calls.get(), 0);

        with_metrics_sink(outer.clone(), || {
            record(resolve_event());
            assert_eq!(outer.calls.get(), 1);

            with_metrics_sink(inner.clone(), || {
                record(resolve_event());
            });

            // Inner override was restored to outer override.
            record(resolve_event());
        });

        assert_eq!(outer.calls.get(), 2);
        assert_eq!(inner.calls.get(), 1);

        SINK_OVERRIDE.with(|cell| {
            assert!(cell.borrow().is_none());
        });
    }

    #[test]
    fn with_metrics_sink_restores_override_on_panic() {
        SINK_OVERRIDE.with(|cell| {
            *cell.borrow_mut() = None;
        });

        let sink = Rc::new(CountingSink::default());

        let panicked = catch_unwind(AssertUnwindSafe(|| {
            with_metrics_sink(sink.clone(), || {
                record(resolve_event());
                panic!("intentional panic for guard test");
            });
        }))
        .is_err();
        assert!(panicked);
        assert_eq!(sink.calls.get(), 1);

        SINK_OVERRIDE.with(|cell| {
            assert!(cell.borrow().is_none());
        });
    }

    #[test]
    fn global_sink_accumulates_per_mode_and_entity() {
        metrics_reset_all();

        record(resolve_event());
        record(MetricsEvent::Resolve {
            entity: "obs::tests::Entity",
            mode: QueryMode::Range,
        });
        record(MetricsEvent::RangeScan {
            entity: "obs::tests::Entity",
            rows: 4,
        });
        record(MetricsEvent::Materialize {
            entity: "obs::tests::Other",
            kind: MaterializeKind::Intersection,
            rows: 2,
        });

        let report = metrics_report();
        assert_eq!(report.ops.resolve_calls, 2);
        assert_eq!(report.ops.resolve_all, 1);
        assert_eq!(report.ops.resolve_range, 1);
        assert_eq!(report.ops.rows_scanned, 4);
        assert_eq!(report.ops.intersections, 1);
        assert_eq!(report.ops.rows_materialized, 2);

        let entity = report
            .entities
            .get("obs::tests::Entity")
            .expect("entity counters should be present");
        assert_eq!(entity.resolve_calls, 2);
        assert_eq!(entity.range_scans, 1);
        assert_eq!(report.entities["obs::tests::Other"].intersections, 1);

        metrics_reset_all();
        assert_eq!(metrics_report(), EventReport::default());
    }

    #[test]
    fn report_serializes_to_json() {
        metrics_reset_all();
        record(resolve_event());

        let json = serde_json::to_value(metrics_report()).expect("report should serialize");
        assert_eq!(json["ops"]["resolve_calls"], 1);
        assert_eq!(json["entities"]["obs::tests::Entity"]["resolve_calls"], 1);
    }
}
