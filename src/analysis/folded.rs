//! Folded view of input text with a mapping back to original offsets.
//!
//! Matching runs over a case-folded, whitespace-collapsed copy of the input so
//! that the automaton only needs to know normalized aliases. Each folded byte
//! remembers the byte range of the original *unit* that produced it: a single
//! character, or a whole run of whitespace collapsed into one space. A span of
//! folded text can be mapped back only if it starts and ends on unit
//! boundaries, which rejects matches that would split a character whose
//! lowercase form expands to several characters.

use std::ops::Range;

use crate::analysis::normalize::fold_char;

/// Byte range in the original text that a folded byte was derived from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Origin {
    start: usize,
    end: usize,
}

/// Case-folded copy of a text plus the folded-to-original offset map.
#[derive(Debug)]
pub struct FoldedText<'a> {
    original: &'a str,
    folded: String,
    origins: Vec<Origin>,
}

impl<'a> FoldedText<'a> {
    /// Fold `original`.
    pub fn new(original: &'a str) -> Self {
        let mut folded = String::with_capacity(original.len());
        let mut origins = Vec::with_capacity(original.len());
        let mut chars = original.char_indices().peekable();

        while let Some((start, c)) = chars.next() {
            if c.is_whitespace() {
                let mut end = start + c.len_utf8();
                while let Some(&(next, w)) = chars.peek() {
                    if !w.is_whitespace() {
                        break;
                    }
                    end = next + w.len_utf8();
                    chars.next();
                }
                folded.push(' ');
                origins.push(Origin { start, end });
                continue;
            }

            let before = folded.len();
            fold_char(c, &mut folded);
            let origin = Origin {
                start,
                end: start + c.len_utf8(),
            };
            origins.extend(std::iter::repeat_n(origin, folded.len() - before));
        }

        FoldedText {
            original,
            folded,
            origins,
        }
    }

    /// The text the folded view was built from.
    pub fn original(&self) -> &'a str {
        self.original
    }

    /// The folded text.
    pub fn as_str(&self) -> &str {
        &self.folded
    }

    /// Map a folded byte range back to the original text.
    ///
    /// Returns `None` for empty ranges and for ranges that begin or end inside
    /// the folded expansion of a single original unit.
    pub fn original_range(&self, folded: Range<usize>) -> Option<Range<usize>> {
        if folded.start >= folded.end || folded.end > self.origins.len() {
            return None;
        }
        if !self.is_unit_start(folded.start) || !self.is_unit_start(folded.end) {
            return None;
        }
        Some(self.origins[folded.start].start..self.origins[folded.end - 1].end)
    }

    fn is_unit_start(&self, pos: usize) -> bool {
        pos == 0 || pos == self.origins.len() || self.origins[pos - 1] != self.origins[pos]
    }
}
