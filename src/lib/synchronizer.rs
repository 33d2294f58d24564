//! Ordered-commit synchronizer for parallel region evaluation.
//!
//! Worker threads pull regions via [`EvalSynchronizer::next_set`], classify
//! their variants (out of band, via a [`crate::matcher::RegionMatcher`]), and
//! commit the results via [`EvalSynchronizer::write`]. Regions may finish in
//! any order, but commits happen in strict dispatch order: each region gets a
//! sequence ticket at dispatch, and `write` parks the calling thread until
//! the commit cursor reaches its ticket.
//!
//! # Protocol
//!
//! Two cursors live under one lock: `next_seq` (the next ticket to hand out)
//! and `commit_seq` (the ticket allowed to commit). `commit_seq <= next_seq`
//! at all times. A committing thread appends its batch to the sinks, folds
//! the batch counts into the running totals, advances `commit_seq`, and
//! broadcasts on the condition variable — several waiters may hold tickets
//! for different future values, so every wake-up is a broadcast.
//!
//! Because only the thread whose ticket equals `commit_seq` can reach the
//! commit section, counter aggregation needs no locking of its own, and sink
//! writes are serialized by construction. The lock is held across the batch
//! write to keep ordering and aggregation atomic; backpressure is implicit
//! (a worker far ahead of the cursor holds its classified batch in memory
//! until its turn, bounding memory by pool size, not region count).
//!
//! # Interruption
//!
//! [`EvalSynchronizer::interrupt`] sets a shared cancellation flag and
//! broadcasts. A thread parked in `write` wakes promptly and fails with
//! [`EvalError::Interrupted`] without advancing the cursor or touching the
//! counters. Higher-ticket units can then never commit, so the caller (the
//! worker pool) is responsible for aborting the remaining workers and still
//! closing the synchronizer.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::io::Write;

use log::debug;
use parking_lot::{Condvar, Mutex};

use crate::errors::{EvalError, Result};
use crate::sink::{Classification, SplitSinks};
use crate::source::{FusedVariantSource, VariantSource};
use crate::variant::{RegionSet, ScoredCall, Variant};

/// Running classification totals for one evaluation run.
///
/// Mutated only inside a commit; strictly non-decreasing for the lifetime of
/// a run. Valid as final totals only after all dispatched units have
/// committed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalCounts {
    /// Called variants that matched a baseline variant.
    pub true_positives: u64,
    /// Called variants with no matching baseline.
    pub false_positives: u64,
    /// Baseline variants with no matching call.
    pub false_negatives: u64,
}

impl EvalCounts {
    /// Total called variants committed (true plus false positives).
    #[must_use]
    pub fn total_calls(&self) -> u64 {
        self.true_positives + self.false_positives
    }
}

struct SyncState<S, W: Write> {
    source: FusedVariantSource<S>,
    /// Next ticket to assign at dispatch.
    next_seq: u64,
    /// Ticket currently allowed to commit.
    commit_seq: u64,
    /// Dispatched, not-yet-committed units: region name to ticket.
    outstanding: HashMap<String, u64>,
    sinks: SplitSinks<W>,
    counts: EvalCounts,
    interrupted: bool,
}

/// Synchronizes parallel per-region evaluation into ordered output.
///
/// One lock guards the cursors, the outstanding-unit map, the sinks, and the
/// counters; `next_set` contends on it only briefly, `write` may park on the
/// paired condition variable until its turn.
pub struct EvalSynchronizer<S, W: Write> {
    state: Mutex<SyncState<S, W>>,
    turn: Condvar,
}

impl<S: VariantSource, W: Write> EvalSynchronizer<S, W> {
    /// Create a synchronizer over a source and the three output sinks.
    ///
    /// The sinks must already carry the shared header
    /// ([`SplitSinks::new`] emits it at construction, before any commit).
    pub fn new(source: S, sinks: SplitSinks<W>) -> Self {
        Self {
            state: Mutex::new(SyncState {
                source: FusedVariantSource::new(source),
                next_seq: 0,
                commit_seq: 0,
                outstanding: HashMap::new(),
                sinks,
                counts: EvalCounts::default(),
                interrupted: false,
            }),
            turn: Condvar::new(),
        }
    }

    /// Dispatch the next region, assigning it the next sequence ticket.
    ///
    /// Never blocks on commit ordering. Returns `None` forever once the
    /// source is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails.
    pub fn next_set(&self) -> Result<Option<RegionSet>> {
        let mut state = self.state.lock();
        let Some(set) = state.source.next_set()? else {
            return Ok(None);
        };
        let ticket = state.next_seq;
        state.next_seq += 1;
        state.outstanding.insert(set.region.clone(), ticket);
        debug!("Dispatched region '{}' with ticket {}", set.region, ticket);
        Ok(Some(set))
    }

    /// Commit one region's classified results, in dispatch order.
    ///
    /// Blocks until every earlier-dispatched region has committed, then
    /// appends the false-negative records to the false-negative sink and the
    /// called records to the true-/false-positive sinks (input order
    /// preserved within each stream), folds the batch counts into the
    /// running totals, advances the commit cursor, and wakes all waiters.
    ///
    /// `baseline_diagnostics` and `call_diagnostics` are opaque pass-through
    /// data for external consumers; they do not affect counters or routing.
    ///
    /// # Errors
    ///
    /// - [`EvalError::UnknownRegion`] immediately (without blocking) if the
    ///   region was never dispatched or has already committed.
    /// - [`EvalError::Interrupted`] if [`interrupt`](Self::interrupt) fires
    ///   while the thread is parked; cursors and counters are untouched.
    /// - [`EvalError::Io`] if a sink write fails; the unit remains
    ///   outstanding and the cursor does not advance.
    pub fn write(
        &self,
        region: &str,
        false_negatives: &[Variant],
        calls: &[ScoredCall],
        baseline_diagnostics: &[usize],
        call_diagnostics: &[usize],
    ) -> Result<()> {
        let mut state = self.state.lock();

        let ticket = *state
            .outstanding
            .get(region)
            .ok_or_else(|| EvalError::UnknownRegion { region: region.to_string() })?;

        // Park until the cursor reaches this unit's ticket. Waiting releases
        // the lock; every commit and every interrupt broadcasts.
        loop {
            if state.interrupted {
                return Err(EvalError::Interrupted);
            }
            match state.commit_seq.cmp(&ticket) {
                Ordering::Less => {
                    self.turn.wait(&mut state);
                }
                Ordering::Equal => break,
                // A duplicate writer already committed this ticket.
                Ordering::Greater => {
                    return Err(EvalError::UnknownRegion { region: region.to_string() });
                }
            }
        }

        if !baseline_diagnostics.is_empty() || !call_diagnostics.is_empty() {
            debug!(
                "Region '{region}': {} baseline / {} call diagnostic indices",
                baseline_diagnostics.len(),
                call_diagnostics.len()
            );
        }

        // Append the batch while holding the lock; on an I/O failure the
        // unit stays outstanding and the cursor stays put. Output already
        // appended is not rolled back.
        let mut batch = EvalCounts::default();
        for variant in false_negatives {
            state.sinks.append(Classification::FalseNegative, &variant.line)?;
            batch.false_negatives += 1;
        }
        for call in calls {
            if call.outcome.is_match() {
                state.sinks.append(Classification::TruePositive, &call.variant.line)?;
                batch.true_positives += 1;
            } else {
                state.sinks.append(Classification::FalsePositive, &call.variant.line)?;
                batch.false_positives += 1;
            }
        }

        state.counts.true_positives += batch.true_positives;
        state.counts.false_positives += batch.false_positives;
        state.counts.false_negatives += batch.false_negatives;
        state.outstanding.remove(region);
        state.commit_seq += 1;
        debug!("Committed region '{region}' with ticket {ticket}");
        self.turn.notify_all();
        Ok(())
    }

    /// Interrupt every thread parked (or about to park) in [`write`].
    ///
    /// The affected threads fail with [`EvalError::Interrupted`]; shared
    /// state is left intact. Intended for the worker pool's first-failure
    /// abort path.
    pub fn interrupt(&self) {
        let mut state = self.state.lock();
        state.interrupted = true;
        self.turn.notify_all();
    }

    /// Snapshot of the running totals.
    ///
    /// Final only after all dispatched units have committed.
    #[must_use]
    pub fn counts(&self) -> EvalCounts {
        self.state.lock().counts
    }

    /// The ticket currently allowed to commit.
    #[must_use]
    pub fn commit_cursor(&self) -> u64 {
        self.state.lock().commit_seq
    }

    /// The next ticket to be assigned at dispatch.
    #[must_use]
    pub fn dispatch_cursor(&self) -> u64 {
        self.state.lock().next_seq
    }

    /// Flush and close all three sinks. Idempotent, best-effort across
    /// sinks, and required on every exit path — including after a worker
    /// failure left units uncommitted.
    ///
    /// # Errors
    ///
    /// Surfaces the first sink close failure.
    pub fn close(&self) -> Result<()> {
        let mut state = self.state.lock();
        state.sinks.close()?;
        Ok(())
    }
}
