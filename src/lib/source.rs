//! Ordered providers of per-region variant sets.
//!
//! A [`VariantSource`] yields regions in a fixed order decided by the
//! provider (typically input-file order). Sources are NOT internally
//! synchronized: the synchronizer serializes all access under the same lock
//! it uses for sequencing, so implementations can stay plain `&mut self`
//! iteration.

use crate::errors::Result;
use crate::variant::RegionSet;

/// An ordered provider of per-region variant sets.
pub trait VariantSource {
    /// Return the next region's variants, or `None` once exhausted.
    ///
    /// Implementations are not required to be idempotent at exhaustion;
    /// wrap in [`FusedVariantSource`] for that guarantee.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying provider fails to produce a set.
    fn next_set(&mut self) -> Result<Option<RegionSet>>;
}

/// Wrapper that keeps returning `None` after the first `None`.
///
/// Callers may keep polling past end-of-stream (every worker thread observes
/// exhaustion independently), so the end-marker must be sticky.
#[derive(Debug)]
pub struct FusedVariantSource<S> {
    inner: S,
    exhausted: bool,
}

impl<S: VariantSource> FusedVariantSource<S> {
    /// Wrap a source.
    pub fn new(inner: S) -> Self {
        Self { inner, exhausted: false }
    }
}

impl<S: VariantSource> VariantSource for FusedVariantSource<S> {
    fn next_set(&mut self) -> Result<Option<RegionSet>> {
        if self.exhausted {
            return Ok(None);
        }
        let set = self.inner.next_set()?;
        if set.is_none() {
            self.exhausted = true;
        }
        Ok(set)
    }
}

/// A source over a prebuilt, ordered collection of region sets.
#[derive(Debug)]
pub struct VecSource {
    sets: std::vec::IntoIter<RegionSet>,
}

impl VecSource {
    /// Create a source that yields the given sets in order.
    #[must_use]
    pub fn new(sets: Vec<RegionSet>) -> Self {
        Self { sets: sets.into_iter() }
    }
}

impl VariantSource for VecSource {
    fn next_set(&mut self) -> Result<Option<RegionSet>> {
        Ok(self.sets.next())
    }
}
