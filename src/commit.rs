//! Commit coordinator.
//!
//! Every lifecycle operation that persists finishes through [`commit`]. The
//! failure policy is fixed:
//!
//! | session error  | effect                                         |
//! |----------------|------------------------------------------------|
//! | `Operational`  | logged, rolled back, closed; `Ok(RolledBack)`  |
//! | `Integrity`    | `Err(RecordError::Integrity)`                  |
//! | `Other`        | `Err(RecordError::Unclassified)`               |
//!
//! Whatever happens, the cycle ends with the `DB execution cycle complete`
//! trace at info level (disable it with `commit_trace = false`).

use std::time::Instant;

#[cfg(feature = "metrics")]
use crate::metrics::METRICS;
#[cfg(feature = "tracing")]
use crate::metrics::tracing_helpers;

use crate::active_model::RecordError;
use crate::config;
use crate::session::{Session, SessionError};

/// Message logged at the end of every commit cycle.
pub const CYCLE_COMPLETE: &str = "DB execution cycle complete";

/// What became of a lifecycle operation's changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Changes are staged in the session; the caller commits later
    Deferred,
    /// Changes are durable
    Committed,
    /// An operational failure was absorbed; the session was rolled back and
    /// closed and the changes are lost
    RolledBack { reason: String },
}

impl CommitOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, CommitOutcome::Committed)
    }

    pub fn is_rolled_back(&self) -> bool {
        matches!(self, CommitOutcome::RolledBack { .. })
    }
}

/// Ends a commit cycle when dropped, on every exit path.
struct CommitCycle {
    #[cfg_attr(not(feature = "metrics"), allow(dead_code))]
    started: Instant,
}

impl CommitCycle {
    fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Drop for CommitCycle {
    fn drop(&mut self) {
        #[cfg(feature = "metrics")]
        METRICS.record_commit_duration(self.started.elapsed());

        if config::global().commit_trace {
            log::info!("{}", CYCLE_COMPLETE);
        }
    }
}

/// Commit `session` and classify any failure.
///
/// # Errors
///
/// Returns `RecordError::Integrity` on a constraint violation and
/// `RecordError::Unclassified` for any other non-operational failure. The
/// session is left as the failed commit left it; callers decide whether to
/// roll back.
///
/// # Examples
///
/// ```
/// use activebase::session::{MemorySession, Session, SessionError};
/// use activebase::{commit, CommitOutcome};
///
/// let session = MemorySession::new();
/// assert_eq!(commit(&session), Ok(CommitOutcome::Committed));
///
/// session.fail_next_commit(SessionError::Operational("server closed the connection".into()));
/// assert!(commit(&session).unwrap().is_rolled_back());
/// ```
pub fn commit<S: Session + ?Sized>(session: &S) -> Result<CommitOutcome, RecordError> {
    let _cycle = CommitCycle::start();
    #[cfg(feature = "tracing")]
    let _span = tracing_helpers::commit_span().entered();

    match session.commit() {
        Ok(()) => {
            #[cfg(feature = "metrics")]
            METRICS.record_commit();
            Ok(CommitOutcome::Committed)
        }
        Err(SessionError::Operational(reason)) => {
            log::error!("Operational error during commit, rolling back: {}", reason);
            if let Err(err) = session.rollback() {
                log::error!("Rollback after failed commit failed: {}", err);
            }
            if let Err(err) = session.close() {
                log::error!("Closing session after failed commit failed: {}", err);
            }
            #[cfg(feature = "metrics")]
            METRICS.record_rollback();
            Ok(CommitOutcome::RolledBack { reason })
        }
        Err(err) => {
            #[cfg(feature = "metrics")]
            METRICS.record_commit_error(match err {
                SessionError::Integrity(_) => "integrity",
                _ => "other",
            });
            Err(err.into())
        }
    }
}
