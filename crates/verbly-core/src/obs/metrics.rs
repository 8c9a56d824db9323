use crate::model::ObjectKind;
use serde::Serialize;
use std::{cell::RefCell, collections::BTreeMap};

///
/// EventState
/// Ephemeral, in-memory counters and simple timing totals for queries.
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub perf: EventPerf,
    pub kinds: BTreeMap<ObjectKind, KindCounters>,
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct EventOps {
    // Compilation
    pub statements_compiled: u64,
    pub ctes_emitted: u64,
    pub joins_emitted: u64,

    // Execution
    pub queries_executed: u64,
    pub rows_loaded: u64,
    pub empty_first: u64,
    pub database_errors: u64,

    // Entities
    pub hydrations: u64,
}

///
/// KindCounters
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct KindCounters {
    pub statements_compiled: u64,
    pub queries_executed: u64,
    pub rows_loaded: u64,
    pub empty_first: u64,
    pub hydrations: u64,
}

///
/// EventPerf
/// Wall-clock totals for query execution, in microseconds.
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct EventPerf {
    pub query_us_total: u128,
    pub query_us_max: u64,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters and timing totals.
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

/// Accumulate a duration and track a max.
#[allow(clippy::missing_const_for_fn)]
pub(crate) fn add_micros(total: &mut u128, max: &mut u64, delta: u64) {
    *total = total.saturating_add(u128::from(delta));
    if delta > *max {
        *max = delta;
    }
}

///
/// EventReport
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct EventReport {
    pub counters: EventState,
    pub kind_summaries: Vec<KindSummary>,
}

///
/// KindSummary
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct KindSummary {
    pub kind: String,
    pub queries_executed: u64,
    pub rows_loaded: u64,
    pub avg_rows_per_query: f64,
    pub empty_first: u64,
    pub hydrations: u64,
}

/// Build a report from the in-memory counters.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub(crate) fn report() -> EventReport {
    let snap = with_state(Clone::clone);

    let kind_summaries = snap
        .kinds
        .iter()
        .map(|(kind, counters)| {
            let avg_rows_per_query = if counters.queries_executed > 0 {
                counters.rows_loaded as f64 / counters.queries_executed as f64
            } else {
                0.0
            };

            KindSummary {
                kind: kind.name().to_string(),
                queries_executed: counters.queries_executed,
                rows_loaded: counters.rows_loaded,
                avg_rows_per_query,
                empty_first: counters.empty_first,
                hydrations: counters.hydrations,
            }
        })
        .collect();

    EventReport {
        counters: snap,
        kind_summaries,
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_averages_rows_per_query() {
        reset_all();
        with_state_mut(|m| {
            let entry = m.kinds.entry(ObjectKind::Word).or_default();
            entry.queries_executed = 4;
            entry.rows_loaded = 10;
        });

        let report = report();
        let summary = &report.kind_summaries[0];

        assert_eq!(summary.kind, "word");
        assert!((summary.avg_rows_per_query - 2.5).abs() < f64::EPSILON);
        reset_all();
    }

    #[test]
    fn add_micros_tracks_max() {
        let mut total = 0;
        let mut max = 0;

        add_micros(&mut total, &mut max, 5);
        add_micros(&mut total, &mut max, 3);

        assert_eq!(total, 8);
        assert_eq!(max, 5);
    }
}
