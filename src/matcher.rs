//! Phrase matching against the vocabulary index.
//!
//! Matching runs in three steps:
//!
//! 1. The input is folded (lowercased, whitespace runs collapsed) and the
//!    index's Aho–Corasick automaton reports every overlapping alias
//!    occurrence in one pass.
//! 2. Each occurrence is mapped back to the original text and kept only if it
//!    does not split a character and is not embedded in a longer word.
//! 3. Overlaps are resolved by [`resolve_overlaps`]: leftmost first, longest
//!    first at the same start.
//!
//! Reported offsets are character offsets into the original text; the exact
//! original substring is reported as `alias_found`.
//!
//! # Example
//!
//! ```
//! use medterm::matcher::PhraseMatcher;
//! use medterm::source::SourceLoader;
//! use medterm::vocabulary::VocabularyBuilder;
//! use serde_json::json;
//!
//! let loaded = SourceLoader::default()
//!     .load_entries(vec![(
//!         "nih",
//!         vec![json!({"term": "Adverse effects", "plain_alternative": "Unwanted effects"})],
//!     )])
//!     .unwrap();
//! let index = VocabularyBuilder::new(loaded).build().unwrap();
//!
//! let matches = PhraseMatcher::new(&index).find("Some ADVERSE EFFECTS were seen.");
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].alias_found, "ADVERSE EFFECTS");
//! assert_eq!((matches[0].location_start, matches[0].location_end), (5, 20));
//! ```

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::analysis::folded::FoldedText;
use crate::analysis::normalize::is_word_char;
use crate::vocabulary::concept::ConceptId;
use crate::vocabulary::index::VocabularyIndex;

/// One accepted occurrence of an alias in the input text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Match {
    /// Concept the alias resolves to.
    pub concept: ConceptId,
    /// The matched substring exactly as it appears in the input.
    pub alias_found: String,
    /// Start character offset (inclusive).
    pub location_start: usize,
    /// End character offset (exclusive).
    pub location_end: usize,
    /// Byte range of the occurrence in the input.
    pub byte_range: Range<usize>,
}

/// A boundary-respecting occurrence before overlap resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    /// Byte range in the original text.
    pub range: Range<usize>,
    pub concept: ConceptId,
    /// Automaton pattern that produced the candidate; breaks exact ties.
    pub pattern: usize,
}

impl Candidate {
    pub fn len(&self) -> usize {
        self.range.end - self.range.start
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Finds alias occurrences using a shared [`VocabularyIndex`].
#[derive(Clone, Copy, Debug)]
pub struct PhraseMatcher<'a> {
    index: &'a VocabularyIndex,
}

impl<'a> PhraseMatcher<'a> {
    pub fn new(index: &'a VocabularyIndex) -> Self {
        PhraseMatcher { index }
    }

    /// Find every non-overlapping alias occurrence in `text`, ordered by start.
    pub fn find(&self, text: &str) -> Vec<Match> {
        if text.is_empty() {
            return Vec::new();
        }

        let accepted = resolve_overlaps(self.candidates(text));
        let mut chars = CharCursor::new(text);

        accepted
            .into_iter()
            .map(|candidate| {
                let location_start = chars.advance_to(candidate.range.start);
                let location_end = chars.advance_to(candidate.range.end);
                Match {
                    concept: candidate.concept,
                    alias_found: text[candidate.range.clone()].to_string(),
                    location_start,
                    location_end,
                    byte_range: candidate.range,
                }
            })
            .collect()
    }

    /// Every boundary-respecting alias occurrence, overlapping ones included.
    pub fn candidates(&self, text: &str) -> Vec<Candidate> {
        let folded = FoldedText::new(text);
        let mut candidates = Vec::new();

        for found in self.index.automaton().find_overlapping_iter(folded.as_str()) {
            let Some(range) = folded.original_range(found.start()..found.end()) else {
                continue;
            };
            if !is_phrase_boundary(text, &range) {
                continue;
            }
            candidates.push(Candidate {
                range,
                concept: self.index.pattern_concept(found.pattern()),
                pattern: found.pattern().as_usize(),
            });
        }

        candidates
    }
}

/// Select a maximal non-overlapping subset of candidates.
///
/// Candidates are sorted by start ascending and length descending, then swept
/// left to right: a candidate is accepted iff it starts at or after the end of
/// the last accepted one.
pub fn resolve_overlaps(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.sort_by(|a, b| {
        a.range
            .start
            .cmp(&b.range.start)
            .then_with(|| b.len().cmp(&a.len()))
            .then_with(|| a.pattern.cmp(&b.pattern))
    });

    let mut next_free = 0;
    let mut accepted = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if candidate.range.start >= next_free {
            next_free = candidate.range.end;
            accepted.push(candidate);
        }
    }
    accepted
}

/// Whether `range` is delimited by non-word characters or the text edges.
fn is_phrase_boundary(text: &str, range: &Range<usize>) -> bool {
    let before = text[..range.start].chars().next_back();
    let after = text[range.end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

/// Converts increasing byte offsets to character offsets in one pass.
struct CharCursor<'a> {
    text: &'a str,
    byte: usize,
    chars: usize,
}

impl<'a> CharCursor<'a> {
    fn new(text: &'a str) -> Self {
        CharCursor {
            text,
            byte: 0,
            chars: 0,
        }
    }

    /// Character offset of `byte`, which must not precede the previous call.
    fn advance_to(&mut self, byte: usize) -> usize {
        if byte > self.byte {
            self.chars += self.text[self.byte..byte].chars().count();
            self.byte = byte;
        }
        self.chars
    }
}
