//! # Extraction Cache
//!
//! Single-slot memo of the last extraction result.
//!
//! ## Keys
//!
//! A [`Fingerprint`] pairs the session's dataset version with the request
//! parameters and their value hash. Fingerprints compare version and hash
//! first and the parameters themselves last, so a hash collision never
//! serves another request's geometry. Comparing two fingerprints costs the
//! same for any mesh size; the geometry itself is never hashed.
//!
//! ## Example
//!
//! ```rust
//! use mesh_extract::cache::{ExtractionCache, Fingerprint};
//! use mesh_extract::ExtractParams;
//!
//! let mut cache: ExtractionCache<u32> = ExtractionCache::new();
//! let key = Fingerprint::new(1, &ExtractParams::default());
//!
//! let first = cache.get_or_compute(key.clone(), || 42);
//! let second = cache.get_or_compute(key, || unreachable!());
//! assert_eq!(*first, *second);
//! assert_eq!(cache.stats().computations, 1);
//! ```


use crate::params::ExtractParams;
use crate::pipeline::Extraction;
use std::convert::Infallible;
use std::sync::Arc;

/// Cache key of one request.
#[derive(Debug, Clone)]
pub struct Fingerprint {
    /// Version of the dataset the request ran against.
    pub dataset_version: u64,
    /// [`ExtractParams::parameters_hash`] of the request.
    pub parameters_hash: u64,
    /// The request itself.
    pub params: ExtractParams,
}

impl Fingerprint {
    /// Fingerprint of `params` against dataset version `dataset_version`.
    pub fn new(dataset_version: u64, params: &ExtractParams) -> Self {
        Self {
            dataset_version,
            parameters_hash: params.parameters_hash(),
            params: params.clone(),
        }
    }
}

impl PartialEq for Fingerprint {
    fn eq(&self, other: &Self) -> bool {
        self.dataset_version == other.dataset_version
            && self.parameters_hash == other.parameters_hash
            && self.params == other.params
    }
}

/// Cache statistics for monitoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Requests answered from the slot.
    pub hits: u64,
    /// Requests that found a different fingerprint or an empty slot.
    pub misses: u64,
    /// Successful recomputations stored in the slot.
    pub computations: u64,
    /// Entries replaced by a newer fingerprint.
    pub evictions: u64,
}

impl CacheStats {
    /// Computes the hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Holds at most one result. A new fingerprint always evicts the previous
/// entry.
#[derive(Debug)]
pub struct ExtractionCache<T = Extraction> {
    slot: Option<(Fingerprint, Arc<T>)>,
    stats: CacheStats,
}

impl<T> ExtractionCache<T> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            slot: None,
            stats: CacheStats::default(),
        }
    }

    /// Returns the cached value for `fingerprint`, computing and storing it
    /// on a miss.
    pub fn get_or_compute<F>(&mut self, fingerprint: Fingerprint, compute: F) -> Arc<T>
    where
        F: FnOnce() -> T,
    {
        match self.get_or_try_compute(fingerprint, || Ok::<T, Infallible>(compute())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Like [`ExtractionCache::get_or_compute`] for fallible computations.
    ///
    /// A failed computation leaves the slot untouched.
    pub fn get_or_try_compute<F, E>(
        &mut self,
        fingerprint: Fingerprint,
        compute: F,
    ) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if let Some((cached, value)) = &self.slot {
            if *cached == fingerprint {
                self.stats.hits += 1;
                log::debug!(
                    "Cache hit for dataset version {} (parameters {:016x})",
                    fingerprint.dataset_version,
                    fingerprint.parameters_hash
                );
                return Ok(Arc::clone(value));
            }
        }

        self.stats.misses += 1;
        let value = Arc::new(compute()?);
        self.stats.computations += 1;
        let previous = self.slot.replace((fingerprint, Arc::clone(&value)));
        if previous.is_some() {
            self.stats.evictions += 1;
        }
        Ok(value)
    }

    /// Cached value for `fingerprint` without computing.
    pub fn peek(&self, fingerprint: &Fingerprint) -> Option<Arc<T>> {
        self.slot
            .as_ref()
            .filter(|(cached, _)| cached == fingerprint)
            .map(|(_, value)| Arc::clone(value))
    }

    /// Fingerprint of the cached entry.
    pub fn fingerprint(&self) -> Option<&Fingerprint> {
        self.slot.as_ref().map(|(fingerprint, _)| fingerprint)
    }

    /// Returns true if the slot is empty.
    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    /// Empties the slot.
    pub fn clear(&mut self) {
        self.slot = None;
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

impl<T> Default for ExtractionCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
