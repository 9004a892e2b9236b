//! Worker pool setup and cooperative cancellation for solution scans.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossbeam_channel::{bounded, RecvTimeoutError};
use tracing::{debug, info};

use crate::domain::introspection::ScanError;

/// Worker count for a `workers` setting: 0 means half the cores, at least 1.
pub fn worker_count(requested: usize) -> usize {
    if requested > 0 {
        requested
    } else {
        std::cmp::max(1, num_cpus::get() / 2)
    }
}

/// Initialize the global rayon thread pool. Fails if it was already built.
pub fn init_thread_pool(requested: usize) -> Result<()> {
    let workers = worker_count(requested);
    rayon::ThreadPoolBuilder::new().num_threads(workers).build_global()?;
    info!(workers, cores = num_cpus::get(), "initialized thread pool");
    Ok(())
}

/// Shared stop signal with an optional deadline. Clones observe the same
/// flag; a [`child`](Self::child) also observes its parent's.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    parent: Option<Arc<AtomicBool>>,
    deadline: Option<(Instant, Duration)>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// A token that expires `budget` from now.
    pub fn with_timeout(budget: Duration) -> Self {
        CancellationToken {
            cancelled: Arc::default(),
            parent: None,
            deadline: Some((Instant::now() + budget, budget)),
        }
    }

    /// A token with the same deadline that stops when `self` is cancelled,
    /// while cancelling it leaves `self` untouched.
    pub fn child(&self) -> Self {
        CancellationToken {
            cancelled: Arc::default(),
            parent: Some(Arc::clone(&self.cancelled)),
            deadline: self.deadline,
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flagged() || self.is_expired()
    }

    fn flagged(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
            || self.parent.as_ref().is_some_and(|p| p.load(Ordering::SeqCst))
    }

    fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|(at, _)| Instant::now() >= at)
    }

    /// `Err` once cancelled or past the deadline. Workers call this before
    /// each unit of work.
    pub fn check(&self) -> Result<(), ScanError> {
        if self.flagged() {
            return Err(ScanError::Cancelled);
        }
        match self.deadline {
            Some((at, budget)) if Instant::now() >= at => Err(ScanError::TimedOut { budget }),
            _ => Ok(()),
        }
    }

    fn remaining(&self) -> Option<Duration> {
        self.deadline.map(|(at, _)| at.saturating_duration_since(Instant::now()))
    }
}

/// How often the waiting thread looks at the cancellation flag.
const POLL: Duration = Duration::from_millis(50);

/// Runs `work` on its own thread and returns whichever comes first: its
/// result, or a cancellation error once `token` is cancelled or expires.
/// `work` gets a child of `token`, which is cancelled when the run is
/// abandoned so the worker winds down; `token` itself is never tripped.
pub fn run_with_cancellation<T, F>(token: &CancellationToken, work: F) -> Result<T, ScanError>
where
    T: Send + 'static,
    F: FnOnce(CancellationToken) -> Result<T, ScanError> + Send + 'static,
{
    token.check()?;
    let worker = token.child();
    let worker_token = worker.clone();
    let (tx, rx) = bounded(1);
    thread::Builder::new()
        .name("sharpcraft-scan".into())
        .spawn(move || {
            // The receiver may have given up already.
            let _ = tx.send(work(worker_token));
        })
        .map_err(|e| ScanError::Load(e.into()))?;

    loop {
        let wait = token.remaining().map_or(POLL, |left| left.min(POLL));
        match rx.recv_timeout(wait) {
            Ok(result) => return result,
            Err(RecvTimeoutError::Disconnected) => return Err(ScanError::WorkerLost),
            Err(RecvTimeoutError::Timeout) => {
                if let Err(stop) = token.check() {
                    debug!(reason = %stop, "abandoning scan");
                    worker.cancel();
                    return Err(stop);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_count_has_a_floor() {
        assert_eq!(worker_count(3), 3);
        assert!(worker_count(0) >= 1);
    }

    #[test]
    fn init_thread_pool_reports_second_init() {
        // The global pool can only be built once per process; whichever call
        // comes second must fail rather than panic.
        let first = init_thread_pool(1);
        let second = init_thread_pool(1);
        assert!(first.is_err() || second.is_err());
    }

    #[test]
    fn finished_work_is_returned() {
        let token = CancellationToken::with_timeout(Duration::from_secs(30));
        assert_eq!(run_with_cancellation(&token, |_| Ok(42)).unwrap(), 42);
    }

    #[test]
    fn deadline_surfaces_as_timeout() {
        let token = CancellationToken::with_timeout(Duration::from_millis(20));
        let err = run_with_cancellation(&token, |worker| {
            while !worker.is_cancelled() {
                thread::sleep(Duration::from_millis(5));
            }
            Ok(())
        })
        .unwrap_err();
        assert!(matches!(err, ScanError::TimedOut { budget } if budget == Duration::from_millis(20)));
        assert!(err.is_cancellation());
    }

    #[test]
    fn explicit_cancel_is_not_a_timeout() {
        let token = CancellationToken::new();
        let canceller = token.clone();
        let err = run_with_cancellation(&token, move |_| {
            canceller.cancel();
            thread::sleep(Duration::from_secs(5));
            Ok(())
        })
        .unwrap_err();
        assert!(matches!(err, ScanError::Cancelled));
    }

    #[test]
    fn worker_errors_pass_through() {
        let token = CancellationToken::new();
        let err = run_with_cancellation::<(), _>(&token, |_| Err(ScanError::WorkerLost)).unwrap_err();
        assert!(matches!(err, ScanError::WorkerLost));
    }

    #[test]
    fn timed_out_token_stays_timed_out() {
        let token = CancellationToken::with_timeout(Duration::from_millis(20));
        let (tx, rx) = bounded(1);
        let err = run_with_cancellation(&token, move |worker| {
            while !worker.is_cancelled() {
                thread::sleep(Duration::from_millis(5));
            }
            let _ = tx.send(worker.check());
            Ok(())
        })
        .unwrap_err();
        assert!(matches!(err, ScanError::TimedOut { .. }));

        // Reusing the caller's token reports the deadline, not a cancel.
        let again = run_with_cancellation(&token, |_| Ok(())).unwrap_err();
        assert!(matches!(again, ScanError::TimedOut { .. }));
        assert!(matches!(token.check(), Err(ScanError::TimedOut { .. })));
        assert!(rx.recv_timeout(Duration::from_secs(5)).unwrap().is_err());
    }

    #[test]
    fn abandoned_worker_is_stopped_but_caller_is_not() {
        let token = CancellationToken::new();
        let worker = token.child();
        worker.cancel();
        assert!(worker.is_cancelled());
        assert!(!token.is_cancelled());

        token.cancel();
        let fresh = token.child();
        assert!(matches!(fresh.check(), Err(ScanError::Cancelled)));
    }
}
