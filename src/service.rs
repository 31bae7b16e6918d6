//! The glossary service: the published vocabulary index and the analysis
//! pipeline built on it.
//!
//! The service holds at most one published [`VocabularyIndex`] in an
//! [`ArcSwapOption`]. Requests load the current `Arc` without locking and keep
//! it for their whole run, so a concurrent reload never affects a request in
//! flight. Builds are serialized by a mutex and publish only a completely built
//! index; a failed reload leaves the previous index in place.
//!
//! # Example
//!
//! ```
//! use medterm::config::GlossaryConfig;
//! use medterm::service::GlossaryService;
//! use medterm::source::SourceLoader;
//! use serde_json::json;
//!
//! let service = GlossaryService::new(GlossaryConfig::default());
//! assert!(service.analyze("fever").unwrap_err().is_not_ready());
//!
//! let loaded = SourceLoader::default()
//!     .load_entries(vec![("nih", vec![json!({"term": "Fever", "plain_alternative": "High temperature"})])])
//!     .unwrap();
//! service.publish(loaded).unwrap();
//!
//! let response = service.analyze("A high fever.").unwrap();
//! assert_eq!(response.found_terms[0].main_term, "Fever");
//! ```

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use lazy_static::lazy_static;
use log::{debug, info, warn};
use parking_lot::Mutex;
use rayon::prelude::*;

use crate::aggregate::ConceptAggregator;
use crate::config::GlossaryConfig;
use crate::error::{MedtermError, Result};
use crate::matcher::PhraseMatcher;
use crate::response::{AnalysisResponse, GlossaryRequest};
use crate::source::loader::{LoadedSources, SourceLoader};
use crate::vocabulary::builder::VocabularyBuilder;
use crate::vocabulary::concept::Concept;
use crate::vocabulary::index::{VocabularyIndex, VocabularyStats};

lazy_static! {
    static ref GLOBAL: GlossaryService = GlossaryService::new(GlossaryConfig::from_env());
}

/// The process-wide service, configured from the environment.
///
/// Its index is built on the first call to
/// [`GlossaryService::ensure_loaded`]; until then analysis fails with
/// [`MedtermError::NotReady`].
pub fn global() -> &'static GlossaryService {
    &GLOBAL
}

/// Run the full pipeline for one text against one index version.
pub fn analyze_with(index: &VocabularyIndex, text: &str) -> AnalysisResponse {
    let matches = PhraseMatcher::new(index).find(text);
    let results = ConceptAggregator::new(index).aggregate(&matches);
    debug!(
        "Found {} occurrences of {} concepts in {} bytes (index v{})",
        matches.len(),
        results.len(),
        text.len(),
        index.version()
    );
    AnalysisResponse::assemble(text, results)
}

/// Owns the published vocabulary index and serves analysis requests.
pub struct GlossaryService {
    config: GlossaryConfig,
    current: ArcSwapOption<VocabularyIndex>,
    /// Serializes builds; holds the last version number handed out.
    build_lock: Mutex<u64>,
}

impl GlossaryService {
    /// Create a service with no index published yet.
    pub fn new(config: GlossaryConfig) -> Self {
        GlossaryService {
            config,
            current: ArcSwapOption::empty(),
            build_lock: Mutex::new(0),
        }
    }

    pub fn config(&self) -> &GlossaryConfig {
        &self.config
    }

    /// Whether an index has been published.
    pub fn is_ready(&self) -> bool {
        self.current.load().is_some()
    }

    /// The currently published index.
    pub fn snapshot(&self) -> Result<Arc<VocabularyIndex>> {
        self.current.load_full().ok_or_else(|| {
            MedtermError::not_ready("the vocabulary index has not been built yet")
        })
    }

    /// Build and publish the index from the configured directory unless one is
    /// already published.
    ///
    /// Concurrent first callers build once; the others wait and share the
    /// result. A failed build publishes nothing and is retried on the next call.
    pub fn ensure_loaded(&self) -> Result<Arc<VocabularyIndex>> {
        if let Some(index) = self.current.load_full() {
            return Ok(index);
        }

        let mut version = self.build_lock.lock();
        if let Some(index) = self.current.load_full() {
            return Ok(index);
        }
        let loaded = SourceLoader::new(self.config.clone()).load()?;
        self.build_and_publish(&mut version, loaded)
    }

    /// Rebuild the index from the configured directory and publish it.
    ///
    /// On failure the previously published index stays in place.
    pub fn reload(&self) -> Result<Arc<VocabularyIndex>> {
        let mut version = self.build_lock.lock();
        let loaded = SourceLoader::new(self.config.clone())
            .load()
            .inspect_err(|e| warn!("Glossary reload failed, keeping current index: {e}"))?;
        self.build_and_publish(&mut version, loaded)
    }

    /// Build an index from already loaded sources and publish it.
    pub fn publish(&self, loaded: LoadedSources) -> Result<Arc<VocabularyIndex>> {
        let mut version = self.build_lock.lock();
        self.build_and_publish(&mut version, loaded)
    }

    fn build_and_publish(
        &self,
        version: &mut u64,
        loaded: LoadedSources,
    ) -> Result<Arc<VocabularyIndex>> {
        let index = Arc::new(VocabularyBuilder::new(loaded).version(*version + 1).build()?);
        *version += 1;
        self.current.store(Some(Arc::clone(&index)));
        info!("Published vocabulary index v{}", index.version());
        Ok(index)
    }

    /// Analyse one text.
    pub fn analyze(&self, text: &str) -> Result<AnalysisResponse> {
        let index = self.snapshot()?;
        Ok(analyze_with(&index, text))
    }

    /// Analyse raw bytes, which must be valid UTF-8.
    pub fn analyze_bytes(&self, bytes: &[u8]) -> Result<AnalysisResponse> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| MedtermError::invalid_input(format!("text is not valid UTF-8: {e}")))?;
        self.analyze(text)
    }

    /// Analyse a validated request.
    pub fn analyze_request(&self, request: &GlossaryRequest) -> Result<AnalysisResponse> {
        self.analyze(&request.text)
    }

    /// Analyse several independent texts in parallel against one index version.
    pub fn analyze_batch<S>(&self, texts: &[S]) -> Result<Vec<AnalysisResponse>>
    where
        S: AsRef<str> + Sync,
    {
        let index = self.snapshot()?;
        Ok(texts
            .par_iter()
            .map(|text| analyze_with(&index, text.as_ref()))
            .collect())
    }

    /// The concept an alias resolves to, if any.
    pub fn lookup(&self, alias: &str) -> Result<Option<Concept>> {
        let index = self.snapshot()?;
        Ok(index.lookup(alias).cloned())
    }

    pub fn stats(&self) -> Result<VocabularyStats> {
        Ok(self.snapshot()?.stats())
    }
}
