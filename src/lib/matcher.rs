//! Interface boundary for the variant-matching algorithm.
//!
//! Matching — deciding which called variants correspond to which baseline
//! variants — happens outside the synchronizer. Workers hand a region's
//! variants to a [`RegionMatcher`] and commit whatever batch it produces.
//! The tolerance rules of a matcher are its own business; the evaluation
//! contract only consumes the per-call outcome and the leftover baseline
//! variants.
//!
//! [`ExactMatcher`] is the built-in implementation: a call matches a
//! baseline variant when start position, reference allele, and alternate
//! alleles are all equal, and each baseline variant is consumed by at most
//! one call.

use crate::variant::{MatchOutcome, Orientation, RegionVariants, ScoredCall, Variant};

/// The classified output of matching one region.
#[derive(Debug, Clone, Default)]
pub struct MatchedBatch {
    /// Baseline variants with no matching call, in input order.
    pub false_negatives: Vec<Variant>,
    /// Every called variant with its outcome, in input order.
    pub calls: Vec<ScoredCall>,
    /// Opaque per-region diagnostic indices for the baseline side.
    pub baseline_diagnostics: Vec<usize>,
    /// Opaque per-region diagnostic indices for the call side.
    pub call_diagnostics: Vec<usize>,
}

/// Classifies one region's variants.
///
/// Implementations must be callable from several worker threads at once.
pub trait RegionMatcher: Sync {
    /// Score the region's calls against its baseline.
    fn evaluate(&self, region: &str, variants: RegionVariants) -> MatchedBatch;
}

/// Position-and-allele equality matching.
///
/// Each call is matched against the first not-yet-consumed baseline variant
/// with an equal start, reference allele, and alternate allele list. Matched
/// variant ids are reported as the diagnostic indices.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatcher;

impl RegionMatcher for ExactMatcher {
    fn evaluate(&self, _region: &str, variants: RegionVariants) -> MatchedBatch {
        let RegionVariants { baseline, calls } = variants;
        let mut consumed = vec![false; baseline.len()];
        let mut scored = Vec::with_capacity(calls.len());
        let mut baseline_diagnostics = Vec::new();
        let mut call_diagnostics = Vec::new();

        for call in calls {
            let hit = baseline.iter().enumerate().find(|(i, b)| {
                !consumed[*i]
                    && b.start == call.start
                    && b.ref_allele == call.ref_allele
                    && b.alt_alleles == call.alt_alleles
            });
            match hit {
                Some((i, b)) => {
                    consumed[i] = true;
                    baseline_diagnostics.push(b.id);
                    call_diagnostics.push(call.id);
                    scored.push(ScoredCall::new(call, MatchOutcome::Match(Orientation::AlleleA)));
                }
                None => scored.push(ScoredCall::new(call, MatchOutcome::NoMatch)),
            }
        }

        let false_negatives = baseline
            .into_iter()
            .zip(consumed)
            .filter(|(_, used)| !used)
            .map(|(b, _)| b)
            .collect();

        MatchedBatch { false_negatives, calls: scored, baseline_diagnostics, call_diagnostics }
    }
}
