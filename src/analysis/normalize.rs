//! Case and whitespace normalization.
//!
//! Aliases and `main_term` labels are compared by their normalized form: every
//! character lowercased, surrounding whitespace trimmed, and each internal run
//! of whitespace collapsed to a single ASCII space. The same character folding
//! is applied to input text by [`crate::analysis::folded::FoldedText`], so a
//! normalized alias can be searched for directly in folded text.
//!
//! # Examples
//!
//! ```
//! use medterm::analysis::normalize::normalize;
//!
//! assert_eq!(normalize("  Adverse \t EFFECTS "), "adverse effects");
//! ```

/// Append the case-folded form of `c` to `out`.
///
/// ASCII takes a fast path; other characters use Unicode lowercase mapping,
/// which may expand to more than one character.
#[inline]
pub fn fold_char(c: char, out: &mut String) {
    if c.is_ascii() {
        out.push(c.to_ascii_lowercase());
    } else {
        out.extend(c.to_lowercase());
    }
}

/// Normalize a surface string for lookup identity.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.trim().chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        fold_char(c, &mut out);
    }

    out
}

/// Whether `c` counts as part of a word for phrase boundary checks.
#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}
