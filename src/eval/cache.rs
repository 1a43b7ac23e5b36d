use std::sync::Arc;

use crate::{
    eval::field::RecurrenceField, foundation::core::ResidueMatrix,
    foundation::error::CosmatesqueResult, model::params::FractalParameters,
};

/// Remembers the most recent `(parameters, size)` evaluation.
///
/// Previewing and saving the same picture in two modes evaluates the recurrence once. Any change
/// to the parameters or the size recomputes.
#[derive(Clone, Debug, Default)]
pub struct FieldCache {
    last: Option<CachedField>,
    stats: CacheStats,
}

#[derive(Clone, Debug)]
struct CachedField {
    params: FractalParameters,
    size: usize,
    residues: Arc<ResidueMatrix>,
}

/// Hit/miss counters for a [`FieldCache`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that evaluated the recurrence.
    pub misses: u64,
}

impl FieldCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached residues for `(params, size)` or evaluate and remember them.
    ///
    /// A failed evaluation leaves the cache untouched.
    pub fn get_or_compute(
        &mut self,
        params: &FractalParameters,
        size: usize,
    ) -> CosmatesqueResult<Arc<ResidueMatrix>> {
        if let Some(hit) = self
            .last
            .as_ref()
            .filter(|c| c.size == size && c.params == *params)
        {
            self.stats.hits += 1;
            tracing::debug!(size, "residue cache hit");
            return Ok(Arc::clone(&hit.residues));
        }

        let residues = Arc::new(RecurrenceField::compute(params, size)?);
        self.stats.misses += 1;
        tracing::debug!(size, "residue cache miss");
        self.last = Some(CachedField {
            params: params.clone(),
            size,
            residues: Arc::clone(&residues),
        });
        Ok(residues)
    }

    /// Counters since construction or the last [`FieldCache::clear`].
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Forget the cached evaluation and reset the counters.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/cache.rs"]
mod tests;
