//! # medterm
//!
//! A fast medical glossary term identification engine for Rust.
//!
//! Given an input passage, medterm finds every occurrence of any alias from a
//! combined vocabulary of glossary sources, reports the exact span of each
//! occurrence in the original text, and groups occurrences by the concept they
//! denote together with every definition the sources supply.
//!
//! ## Features
//!
//! - Aho–Corasick matching over tens of thousands of aliases in one pass
//! - Case-insensitive, word-boundary aware matching with exact original offsets
//! - Deterministic leftmost-longest overlap resolution
//! - Priority-ranked resolution of alias collisions between sources
//! - Build-once index published by atomic swap, lock-free concurrent reads
//!
//! ## Example
//!
//! ```
//! use medterm::prelude::*;
//! use serde_json::json;
//!
//! let loaded = SourceLoader::default()
//!     .load_entries(vec![(
//!         "nih",
//!         vec![
//!             json!({"term": "Adverse effects", "plain_alternative": "Unwanted effects of a treatment"}),
//!             json!({"term": "Clinical Trial", "plain_alternative": "A research study in people"}),
//!         ],
//!     )])
//!     .unwrap();
//!
//! let service = GlossaryService::new(GlossaryConfig::default());
//! service.publish(loaded).unwrap();
//!
//! let response = service
//!     .analyze("The patient experienced adverse effects during the clinical trial.")
//!     .unwrap();
//! assert_eq!(response.analysis_summary.total_unique_phrases_found, 2);
//! assert_eq!(response.found_terms[1].matches_in_text[0].location_start, 51);
//! ```

pub mod aggregate;
pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod matcher;
pub mod response;
pub mod service;
pub mod source;
pub mod vocabulary;

pub mod prelude {
    pub use crate::aggregate::{ConceptAggregator, ConceptResult};
    pub use crate::config::GlossaryConfig;
    pub use crate::error::{MedtermError, Result};
    pub use crate::matcher::{Match, PhraseMatcher};
    pub use crate::response::{AnalysisResponse, GlossaryRequest};
    pub use crate::service::GlossaryService;
    pub use crate::source::SourceLoader;
    pub use crate::vocabulary::{Concept, ConceptId, Definition, VocabularyBuilder, VocabularyIndex};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
