//! Bounded worker pool with first-failure propagation.
//!
//! The pool runs N worker threads, each looping dispatch → match → commit
//! against one shared [`EvalSynchronizer`]. Failure handling is explicit: a
//! shared [`CancelToken`] is checked cooperatively between units, and the
//! first worker to fail cancels the token, interrupts threads parked in the
//! synchronizer, and reports its error. The pool always joins every worker
//! before returning (wait-for-all-or-first-failure), so the caller can rely
//! on reaching the synchronizer's teardown even when a worker fails
//! mid-wait.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_channel::bounded;
use log::warn;

use crate::errors::{EvalError, Result};
use crate::matcher::RegionMatcher;
use crate::progress::ProgressTracker;
use crate::source::VariantSource;
use crate::synchronizer::EvalSynchronizer;

/// Cooperative cancellation signal shared by all workers of one pool run.
#[derive(Debug, Default)]
pub struct CancelToken {
    cancelled: AtomicBool,
}

impl CancelToken {
    /// Create an un-cancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal cancellation to every observer.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// True once any observer has cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Run `threads` workers until the source drains or a worker fails.
///
/// On success every dispatched region has committed. On failure the first
/// underlying error is returned (sibling `Interrupted` failures are
/// reported only when no other cause surfaced), and the synchronizer is
/// left open so the caller can still close it.
///
/// # Errors
///
/// Returns the first worker failure: an I/O error from a commit, a source
/// error from dispatch, or `Interrupted` when that is all that remains.
pub fn run_workers<S, W, M>(
    threads: usize,
    synchronizer: &EvalSynchronizer<S, W>,
    matcher: &M,
    progress: &ProgressTracker,
) -> Result<()>
where
    S: VariantSource + Send,
    W: Write + Send,
    M: RegionMatcher,
{
    let threads = threads.max(1);
    let cancel = CancelToken::new();
    let (err_tx, err_rx) = bounded::<EvalError>(threads);

    std::thread::scope(|scope| {
        for worker in 0..threads {
            let err_tx = err_tx.clone();
            let cancel = &cancel;
            scope.spawn(move || {
                if let Err(e) = worker_loop(synchronizer, matcher, progress, cancel) {
                    warn!("Worker {worker} failed: {e}");
                    cancel.cancel();
                    synchronizer.interrupt();
                    let _ = err_tx.send(e);
                }
            });
        }
    });
    drop(err_tx);

    // Prefer a root cause over the Interrupted failures it induced in
    // sibling workers.
    let mut first: Option<EvalError> = None;
    for e in err_rx.try_iter() {
        match &first {
            None => first = Some(e),
            Some(EvalError::Interrupted) if !matches!(e, EvalError::Interrupted) => {
                first = Some(e);
            }
            Some(_) => {}
        }
    }
    match first {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn worker_loop<S, W, M>(
    synchronizer: &EvalSynchronizer<S, W>,
    matcher: &M,
    progress: &ProgressTracker,
    cancel: &CancelToken,
) -> Result<()>
where
    S: VariantSource,
    W: Write,
    M: RegionMatcher,
{
    loop {
        if cancel.is_cancelled() {
            return Ok(());
        }
        let Some(set) = synchronizer.next_set()? else {
            return Ok(());
        };
        let region = set.region;
        let batch = matcher.evaluate(&region, set.variants);
        synchronizer.write(
            &region,
            &batch.false_negatives,
            &batch.calls,
            &batch.baseline_diagnostics,
            &batch.call_diagnostics,
        )?;
        progress.log_if_needed(1);
    }
}
