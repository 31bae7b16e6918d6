//! Grouping of matches by concept.
//!
//! The aggregator is a pure function of the index and the match list: running
//! it twice on the same matches yields identical results.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::matcher::Match;
use crate::vocabulary::concept::{ConceptId, Definition};
use crate::vocabulary::index::VocabularyIndex;

/// One concept found in a text, with its occurrences and definitions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptResult {
    pub concept: ConceptId,
    /// Canonical concept label.
    pub label: String,
    /// Distinct (text, source) definitions.
    pub definitions: Vec<Definition>,
    /// Occurrences ordered by start offset.
    pub matches: Vec<Match>,
}

/// Groups accepted matches into [`ConceptResult`]s.
#[derive(Clone, Copy, Debug)]
pub struct ConceptAggregator<'a> {
    index: &'a VocabularyIndex,
}

impl<'a> ConceptAggregator<'a> {
    pub fn new(index: &'a VocabularyIndex) -> Self {
        ConceptAggregator { index }
    }

    /// Group `matches` by concept.
    ///
    /// Concepts are ordered by their first occurrence in the text, matches
    /// within a concept by start offset. Identical occurrences are reported
    /// once.
    pub fn aggregate(&self, matches: &[Match]) -> Vec<ConceptResult> {
        let mut ordered: Vec<&Match> = matches.iter().collect();
        ordered.sort_by_key(|m| (m.location_start, m.location_end));
        ordered.dedup();

        let mut positions: AHashMap<ConceptId, usize> = AHashMap::new();
        let mut results: Vec<ConceptResult> = Vec::new();

        for found in ordered {
            let position = *positions.entry(found.concept).or_insert_with(|| {
                results.push(self.empty_result(found.concept));
                results.len() - 1
            });
            results[position].matches.push(found.clone());
        }

        results
    }

    fn empty_result(&self, id: ConceptId) -> ConceptResult {
        let (label, definitions) = match self.index.concept(id) {
            Some(concept) => (concept.label.clone(), dedup_definitions(&concept.definitions)),
            None => (String::new(), Vec::new()),
        };
        ConceptResult {
            concept: id,
            label,
            definitions,
            matches: Vec::new(),
        }
    }
}

fn dedup_definitions(definitions: &[Definition]) -> Vec<Definition> {
    let mut seen = AHashSet::with_capacity(definitions.len());
    definitions
        .iter()
        .filter(|definition| seen.insert((definition.text.as_str(), definition.source.as_str())))
        .cloned()
        .collect()
}
