//! Observability: runtime telemetry (metrics) and sink abstractions.
//!
//! Query execution reports through [`MetricsEvent`]s only; nothing outside
//! this module touches the counter state.

pub(crate) mod metrics;
pub(crate) mod sink;

pub use metrics::{EventOps, EventPerf, EventReport, EventState, KindCounters, KindSummary};
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink};
