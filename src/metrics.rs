//! Commit and query instrumentation.
//!
//! With the `metrics` feature, counters and a commit-duration histogram are
//! registered on the global OpenTelemetry meter under `activebase_*`. The
//! application owns the exporter. With the `tracing` feature, commits and
//! guarded queries run inside spans from [`tracing_helpers`].

#[cfg(feature = "metrics")]
use once_cell::sync::Lazy;
#[cfg(feature = "metrics")]
use opentelemetry::{
    global,
    metrics::{Counter, Histogram},
    KeyValue,
};

#[cfg(feature = "metrics")]
pub static METRICS: Lazy<ActiveBaseMetrics> = Lazy::new(ActiveBaseMetrics::init);

#[cfg(feature = "metrics")]
pub struct ActiveBaseMetrics {
    pub commits_total: Counter<u64>,
    pub rollbacks_total: Counter<u64>,
    pub commit_errors_total: Counter<u64>,
    pub commit_duration: Histogram<f64>,
    pub query_retries_total: Counter<u64>,
}

#[cfg(feature = "metrics")]
impl ActiveBaseMetrics {
    pub fn init() -> Self {
        let meter = global::meter("activebase");

        let commits_total = meter
            .u64_counter("activebase_commits_total")
            .with_description("Commits that reached storage")
            .build();

        let rollbacks_total = meter
            .u64_counter("activebase_rollbacks_total")
            .with_description("Commits absorbed after an operational failure")
            .build();

        let commit_errors_total = meter
            .u64_counter("activebase_commit_errors_total")
            .with_description("Commits that failed with a propagated error")
            .build();

        let commit_duration = meter
            .f64_histogram("activebase_commit_duration_seconds")
            .with_description("Duration of commit cycles")
            .build();

        let query_retries_total = meter
            .u64_counter("activebase_query_retries_total")
            .with_description("Queries retried after an operational failure")
            .build();

        Self {
            commits_total,
            rollbacks_total,
            commit_errors_total,
            commit_duration,
            query_retries_total,
        }
    }

    pub fn record_commit(&self) {
        self.commits_total.add(1, &[]);
    }

    pub fn record_rollback(&self) {
        self.rollbacks_total.add(1, &[]);
    }

    pub fn record_commit_error(&self, kind: &'static str) {
        self.commit_errors_total
            .add(1, &[KeyValue::new("kind", kind)]);
    }

    pub fn record_commit_duration(&self, elapsed: std::time::Duration) {
        self.commit_duration.record(elapsed.as_secs_f64(), &[]);
    }

    pub fn record_query_retry(&self, table: &'static str) {
        self.query_retries_total
            .add(1, &[KeyValue::new("table", table)]);
    }
}

#[cfg(feature = "tracing")]
pub mod tracing_helpers {
    use tracing::{info_span, Span};

    /// Span around one pass through the commit coordinator.
    pub fn commit_span() -> Span {
        info_span!("activebase.commit")
    }

    /// Span around a guarded read of `table`.
    pub fn query_span(table: &'static str) -> Span {
        info_span!("activebase.query", table)
    }
}
