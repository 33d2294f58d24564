//! Variant records and per-region variant sets.
//!
//! A [`Variant`] carries the fields the evaluation needs (identity, start
//! position, alleles) plus the preserialized record line that is appended to
//! an output sink when the variant's region commits. The matching algorithm
//! that decides whether a called variant matches a baseline variant lives
//! behind the [`crate::matcher::RegionMatcher`] trait; this module only
//! models its inputs and outputs.

/// The two categories of variants evaluated per region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantCategory {
    /// Variants from the baseline truth set.
    Baseline,
    /// Variants from the call set under evaluation.
    Calls,
}

/// A single variant record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    /// Identity of the variant within its source file (input order).
    pub id: usize,
    /// 1-based start position on the reference sequence.
    pub start: u32,
    /// Reference allele.
    pub ref_allele: String,
    /// Alternate alleles, in record order.
    pub alt_alleles: Vec<String>,
    /// The serialized record text written to a sink on commit (no newline).
    pub line: String,
}

impl Variant {
    /// Create a variant from its record fields.
    #[must_use]
    pub fn new(
        id: usize,
        start: u32,
        ref_allele: impl Into<String>,
        alt_alleles: Vec<String>,
        line: impl Into<String>,
    ) -> Self {
        Self { id, start, ref_allele: ref_allele.into(), alt_alleles, line: line.into() }
    }
}

/// Haplotype orientation assigned to a matched call by the matcher.
///
/// Opaque to the synchronizer and sinks; carried through so downstream
/// consumers can recover which haplotype the match was phased against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Matched against the first haplotype.
    AlleleA,
    /// Matched against the second haplotype.
    AlleleB,
}

/// Outcome of scoring one called variant against the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The call matches a baseline variant in the given orientation.
    Match(Orientation),
    /// No baseline variant matches this call.
    NoMatch,
}

impl MatchOutcome {
    /// Returns true for either orientation of a match.
    #[must_use]
    pub fn is_match(&self) -> bool {
        matches!(self, MatchOutcome::Match(_))
    }
}

/// A called variant paired with its match outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCall {
    /// The called variant.
    pub variant: Variant,
    /// Outcome assigned by the matcher.
    pub outcome: MatchOutcome,
}

impl ScoredCall {
    /// Pair a called variant with its outcome.
    #[must_use]
    pub fn new(variant: Variant, outcome: MatchOutcome) -> Self {
        Self { variant, outcome }
    }
}

/// The ordered baseline and called variants of one region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionVariants {
    /// Baseline truth variants, in input order.
    pub baseline: Vec<Variant>,
    /// Called variants, in input order.
    pub calls: Vec<Variant>,
}

impl RegionVariants {
    /// The variants of one category, in input order.
    #[must_use]
    pub fn get(&self, category: VariantCategory) -> &[Variant] {
        match category {
            VariantCategory::Baseline => &self.baseline,
            VariantCategory::Calls => &self.calls,
        }
    }

    /// Total number of variants across both categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.baseline.len() + self.calls.len()
    }

    /// True if neither category has variants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.baseline.is_empty() && self.calls.is_empty()
    }
}

/// One region's name and variants, as handed to a worker at dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSet {
    /// Region (reference sequence) name.
    pub region: String,
    /// The region's variants by category.
    pub variants: RegionVariants,
}

impl RegionSet {
    /// Create a region set.
    #[must_use]
    pub fn new(region: impl Into<String>, variants: RegionVariants) -> Self {
        Self { region: region.into(), variants }
    }
}
