//! Immutable, queryable vocabulary index.

use ahash::AHashMap;
use aho_corasick::{AhoCorasick, PatternID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::normalize::normalize;
use crate::source::record::{GlossarySource, LoadWarning};
use crate::vocabulary::concept::{Concept, ConceptId};

/// Summary of an index version.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyStats {
    pub version: u64,
    pub built_at: DateTime<Utc>,
    pub sources: Vec<GlossarySource>,
    pub records: usize,
    pub aliases: usize,
    /// Concepts reachable through at least one alias.
    pub concepts: usize,
    /// Concepts whose every alias was won by another concept in a collision.
    /// They keep their id but can never be matched.
    pub unreachable_concepts: usize,
    pub alias_collisions: usize,
    pub warnings: usize,
}

/// The resolved alias→concept map, the concepts, and the search automaton.
///
/// Built by [`crate::vocabulary::VocabularyBuilder`]; read-only afterwards and
/// safe to share between threads.
#[derive(Debug)]
pub struct VocabularyIndex {
    pub(crate) version: u64,
    pub(crate) built_at: DateTime<Utc>,
    pub(crate) sources: Vec<GlossarySource>,
    pub(crate) concepts: Vec<Concept>,
    pub(crate) aliases: AHashMap<String, ConceptId>,
    /// Concept of each automaton pattern, indexed by pattern id.
    pub(crate) patterns: Vec<ConceptId>,
    pub(crate) automaton: AhoCorasick,
    pub(crate) warnings: Vec<LoadWarning>,
    pub(crate) records: usize,
    pub(crate) alias_collisions: usize,
}

impl VocabularyIndex {
    /// Version number assigned when the index was built.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    pub fn sources(&self) -> &[GlossarySource] {
        &self.sources
    }

    pub fn concepts(&self) -> &[Concept] {
        &self.concepts
    }

    pub fn concept(&self, id: ConceptId) -> Option<&Concept> {
        self.concepts.get(id.index())
    }

    /// Warnings recorded while loading the sources of this index.
    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    /// Number of distinct normalized aliases.
    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }

    /// Resolve a candidate string to a concept id.
    ///
    /// The candidate is normalized the same way aliases are, so casing and
    /// whitespace runs do not matter.
    pub fn resolve(&self, candidate: &str) -> Option<ConceptId> {
        self.aliases.get(&normalize(candidate)).copied()
    }

    /// Resolve a candidate string to its concept.
    pub fn lookup(&self, candidate: &str) -> Option<&Concept> {
        self.resolve(candidate).and_then(|id| self.concept(id))
    }

    pub(crate) fn automaton(&self) -> &AhoCorasick {
        &self.automaton
    }

    pub(crate) fn pattern_concept(&self, pattern: PatternID) -> ConceptId {
        self.patterns[pattern.as_usize()]
    }

    pub fn stats(&self) -> VocabularyStats {
        let unreachable_concepts = self
            .concepts
            .iter()
            .filter(|concept| concept.aliases.is_empty())
            .count();
        VocabularyStats {
            version: self.version,
            built_at: self.built_at,
            sources: self.sources.clone(),
            records: self.records,
            aliases: self.aliases.len(),
            concepts: self.concepts.len() - unreachable_concepts,
            unreachable_concepts,
            alias_collisions: self.alias_collisions,
            warnings: self.warnings.len(),
        }
    }
}
