//! # Session
//!
//! One active dataset, its version counter and a single-slot cache.
//!
//! Every extraction is [`extract_with`] over the current dataset; the
//! session only remembers which dataset is active and the last result.
//! Independent sessions share nothing and can live on separate threads.

use crate::cache::{CacheStats, ExtractionCache, Fingerprint};
use crate::error::{ExtractError, ExtractResult};
use crate::params::ExtractParams;
use crate::pipeline::{extract_with, Extraction};
use config::constants::ExtractConfig;
use mesh_dataset::{load_with, Association, Dataset, DatasetReader, JsonReader, LoadResult};
use std::path::Path;
use std::sync::Arc;

/// Visualization session state.
///
/// # Example
///
/// ```rust
/// use mesh_dataset::sources::default_sphere;
/// use mesh_extract::{ExtractParams, Session};
///
/// let mut session = Session::default();
/// session.set_dataset(default_sphere().unwrap());
///
/// let params = ExtractParams::default();
/// let first = session.extract(&params).unwrap();
/// let second = session.extract(&params).unwrap();
/// assert_eq!(first.geometry, second.geometry);
/// assert_eq!(session.stats().computations, 1);
/// ```
#[derive(Debug)]
pub struct Session {
    dataset: Option<Arc<Dataset>>,
    version: u64,
    cache: ExtractionCache,
    config: ExtractConfig,
}

impl Session {
    /// Creates an empty session.
    pub fn new(config: ExtractConfig) -> Self {
        Self {
            dataset: None,
            version: 0,
            cache: ExtractionCache::new(),
            config,
        }
    }

    /// Loads a JSON dataset and makes it active.
    ///
    /// On error the previous dataset stays active.
    pub fn load(&mut self, path: impl AsRef<Path>) -> LoadResult<()> {
        self.load_with(&JsonReader, path)
    }

    /// Loads with an arbitrary reader and makes the result active.
    pub fn load_with<R: DatasetReader + ?Sized>(
        &mut self,
        reader: &R,
        path: impl AsRef<Path>,
    ) -> LoadResult<()> {
        let dataset = load_with(reader, path)?;
        self.set_dataset(dataset);
        Ok(())
    }

    /// Replaces the active dataset and bumps the version.
    pub fn set_dataset(&mut self, dataset: impl Into<Arc<Dataset>>) {
        self.dataset = Some(dataset.into());
        self.version += 1;
        log::debug!("Dataset version {}", self.version);
    }

    /// Active dataset.
    pub fn dataset(&self) -> Option<&Arc<Dataset>> {
        self.dataset.as_ref()
    }

    /// Number of times a dataset was made active.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Array names of the active dataset.
    pub fn array_names(&self) -> Vec<(Association, String)> {
        self.dataset
            .as_ref()
            .map(|d| d.array_names())
            .unwrap_or_default()
    }

    /// Extraction settings.
    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Extracts from the active dataset, answering from the cache when the
    /// dataset version and parameters match the last request.
    pub fn extract(&mut self, params: &ExtractParams) -> ExtractResult<Arc<Extraction>> {
        let dataset = self.dataset.clone().ok_or(ExtractError::NoDataset)?;
        let fingerprint = Fingerprint::new(self.version, params);
        let config = self.config;
        self.cache
            .get_or_try_compute(fingerprint, || extract_with(&dataset, params, &config))
    }

    /// Cache statistics.
    pub fn stats(&self) -> &CacheStats {
        self.cache.stats()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ExtractConfig::default())
    }
}
