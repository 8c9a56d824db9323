//! Metrics sink boundary.
//!
//! Query and entity code MUST NOT touch obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
use crate::{model::ObjectKind, obs::metrics};
use std::{cell::RefCell, time::Instant};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<*const dyn MetricsSink>> = const { RefCell::new(None) };
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    StatementCompiled {
        kind: ObjectKind,
        joins: u64,
        ctes: u64,
    },
    QueryStart {
        kind: ObjectKind,
    },
    QueryFinish {
        kind: ObjectKind,
        rows: u64,
        elapsed_us: u64,
    },
    EmptyFirst {
        kind: ObjectKind,
    },
    Hydration {
        kind: ObjectKind,
    },
    DatabaseError {
        kind: ObjectKind,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into the thread-local metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::StatementCompiled { kind, joins, ctes } => {
                metrics::with_state_mut(|m| {
                    m.ops.statements_compiled = m.ops.statements_compiled.saturating_add(1);
                    m.ops.joins_emitted = m.ops.joins_emitted.saturating_add(joins);
                    m.ops.ctes_emitted = m.ops.ctes_emitted.saturating_add(ctes);

                    let entry = m.kinds.entry(kind).or_default();
                    entry.statements_compiled = entry.statements_compiled.saturating_add(1);
                });
            }

            MetricsEvent::QueryStart { kind } => {
                metrics::with_state_mut(|m| {
                    m.ops.queries_executed = m.ops.queries_executed.saturating_add(1);

                    let entry = m.kinds.entry(kind).or_default();
                    entry.queries_executed = entry.queries_executed.saturating_add(1);
                });
            }

            MetricsEvent::QueryFinish {
                kind,
                rows,
                elapsed_us,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.rows_loaded = m.ops.rows_loaded.saturating_add(rows);
                    metrics::add_micros(
                        &mut m.perf.query_us_total,
                        &mut m.perf.query_us_max,
                        elapsed_us,
                    );

                    let entry = m.kinds.entry(kind).or_default();
                    entry.rows_loaded = entry.rows_loaded.saturating_add(rows);
                });
            }

            MetricsEvent::EmptyFirst { kind } => {
                metrics::with_state_mut(|m| {
                    m.ops.empty_first = m.ops.empty_first.saturating_add(1);

                    let entry = m.kinds.entry(kind).or_default();
                    entry.empty_first = entry.empty_first.saturating_add(1);
                });
            }

            MetricsEvent::Hydration { kind } => {
                metrics::with_state_mut(|m| {
                    m.ops.hydrations = m.ops.hydrations.saturating_add(1);

                    let entry = m.kinds.entry(kind).or_default();
                    entry.hydrations = entry.hydrations.saturating_add(1);
                });
            }

            MetricsEvent::DatabaseError { .. } => {
                metrics::with_state_mut(|m| {
                    m.ops.database_errors = m.ops.database_errors.saturating_add(1);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_ptr = SINK_OVERRIDE.with(|cell| *cell.borrow());
    if let Some(ptr) = override_ptr {
        // SAFETY:
        // - `ptr` was produced from a valid `&dyn MetricsSink` in `with_metrics_sink`.
        // - `with_metrics_sink` restores the previous pointer before returning,
        //   including unwind paths via `Guard::drop`.
        // - `record` is synchronous and never stores `ptr` beyond this call.
        unsafe { (&*ptr).record(event) };
    } else {
        GLOBAL_METRICS_SINK.record(event);
    }
}

/// Snapshot the current thread's metrics state.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics state (counters + timing).
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
pub fn with_metrics_sink<T>(sink: &dyn MetricsSink, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<*const dyn MetricsSink>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = self.0;
            });
        }
    }

    // SAFETY:
    // - `sink_ptr` is installed only for this dynamic scope.
    // - `Guard` restores the previous slot on all exits, including panic.
    // - `record` only dereferences synchronously and never persists `sink_ptr`.
    let sink_ptr = unsafe { std::mem::transmute::<&dyn MetricsSink, *const dyn MetricsSink>(sink) };
    let prev = SINK_OVERRIDE.with(|cell| {
        let mut slot = cell.borrow_mut();
        slot.replace(sink_ptr)
    });
    let _guard = Guard(prev);

    f()
}

/// Span
/// RAII guard that emits start/finish events for one query execution.
/// Finish accounting happens even when hydration fails part-way.

pub(crate) struct Span {
    kind: ObjectKind,
    start: Instant,
    rows: u64,
    finished: bool,
}

impl Span {
    #[must_use]
    pub(crate) fn new(kind: ObjectKind) -> Self {
        record(MetricsEvent::QueryStart { kind });

        Self {
            kind,
            start: Instant::now(),
            rows: 0,
            finished: false,
        }
    }

    /// Record the finish event now; the drop path then stays silent.
    pub(crate) fn finish(mut self, rows: u64) {
        self.rows = rows;
        self.finish_inner();
        self.finished = true;
    }

    fn finish_inner(&self) {
        let elapsed_us = u64::try_from(self.start.elapsed().as_micros()).unwrap_or(u64::MAX);

        record(MetricsEvent::QueryFinish {
            kind: self.kind,
            rows: self.rows,
            elapsed_us,
        });
    }
}

impl Drop for Span {
    fn drop(&mut self) {
        if !self.finished {
            self.finish_inner();
            self.finished = true;
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        cell::RefCell,
        panic::{AssertUnwindSafe, catch_unwind},
    };

    #[derive(Default)]
    struct CapturingSink {
        events: RefCell<Vec<MetricsEvent>>,
    }

    impl MetricsSink for CapturingSink {
        fn record(&self, event: MetricsEvent) {
            self.events.borrow_mut().push(event);
        }
    }

    #[test]
    fn with_metrics_sink_routes_and_restores_nested_overrides() {
        let outer = CapturingSink::default();
        let inner = CapturingSink::default();

        with_metrics_sink(&outer, || {
            record(MetricsEvent::Hydration {
                kind: ObjectKind::Word,
            });

            with_metrics_sink(&inner, || {
                record(MetricsEvent::EmptyFirst {
                    kind: ObjectKind::Form,
                });
            });

            record(MetricsEvent::Hydration {
                kind: ObjectKind::Notion,
            });
        });

        assert_eq!(outer.events.borrow().len(), 2);
        assert_eq!(
            inner.events.borrow().as_slice(),
            &[MetricsEvent::EmptyFirst {
                kind: ObjectKind::Form
            }]
        );
        SINK_OVERRIDE.with(|cell| assert!(cell.borrow().is_none()));
    }

    #[test]
    fn with_metrics_sink_restores_override_on_panic() {
        let sink = CapturingSink::default();

        let panicked = catch_unwind(AssertUnwindSafe(|| {
            with_metrics_sink(&sink, || {
                record(MetricsEvent::Hydration {
                    kind: ObjectKind::Word,
                });
                panic!("intentional panic for guard test");
            });
        }))
        .is_err();

        assert!(panicked);
        assert_eq!(sink.events.borrow().len(), 1);
        SINK_OVERRIDE.with(|cell| assert!(cell.borrow().is_none()));
    }

    #[test]
    fn span_records_start_and_finish() {
        let sink = CapturingSink::default();

        with_metrics_sink(&sink, || {
            // dropped without finish, as on an early error return
            let _span = Span::new(ObjectKind::Pronunciation);
        });

        let events = sink.events.borrow();
        assert_eq!(
            events[0],
            MetricsEvent::QueryStart {
                kind: ObjectKind::Pronunciation
            }
        );
        assert!(matches!(
            events[1],
            MetricsEvent::QueryFinish {
                kind: ObjectKind::Pronunciation,
                rows: 0,
                ..
            }
        ));
    }

    #[test]
    fn explicit_finish_records_once() {
        let sink = CapturingSink::default();

        with_metrics_sink(&sink, || {
            Span::new(ObjectKind::Word).finish(4);
        });

        let events = sink.events.borrow();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[1],
            MetricsEvent::QueryFinish {
                kind: ObjectKind::Word,
                rows: 4,
                ..
            }
        ));
    }

    #[test]
    fn global_sink_accumulates_per_kind() {
        metrics_reset_all();

        record(MetricsEvent::StatementCompiled {
            kind: ObjectKind::Word,
            joins: 2,
            ctes: 1,
        });
        record(MetricsEvent::QueryStart {
            kind: ObjectKind::Word,
        });
        record(MetricsEvent::QueryFinish {
            kind: ObjectKind::Word,
            rows: 5,
            elapsed_us: 10,
        });

        let report = metrics_report();
        assert_eq!(report.counters.ops.statements_compiled, 1);
        assert_eq!(report.counters.ops.joins_emitted, 2);
        assert_eq!(report.counters.ops.rows_loaded, 5);
        assert_eq!(report.counters.perf.query_us_max, 10);
        assert_eq!(report.kind_summaries[0].queries_executed, 1);
        metrics_reset_all();
    }
}
