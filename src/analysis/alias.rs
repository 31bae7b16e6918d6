//! Alias generation for glossary terms.
//!
//! Glossaries often write a term together with its best-known alternative in
//! parentheses, e.g. `Pertussis (Whooping Cough)` or `Oral Poliovirus (OPV)`.
//! Such a term is registered under the full text and under both halves.

use lazy_static::lazy_static;
use regex::Regex;

use crate::analysis::normalize::normalize;

lazy_static! {
    static ref PARENTHESIZED: Regex =
        Regex::new(r"(.+)\s\((.+)\)").expect("Parenthesized alias pattern should be valid");
}

/// Generate the normalized aliases for a term.
///
/// `explicit` aliases declared by the source are added to the generated ones.
/// Blank aliases are discarded and duplicates are removed; the result keeps
/// first-seen order so index construction stays deterministic.
///
/// # Examples
///
/// ```
/// use medterm::analysis::alias::generate_aliases;
///
/// let aliases = generate_aliases::<&str>("Pertussis (Whooping Cough)", &[]);
/// assert_eq!(
///     aliases,
///     vec!["pertussis (whooping cough)", "pertussis", "whooping cough"]
/// );
/// ```
pub fn generate_aliases<S: AsRef<str>>(term: &str, explicit: &[S]) -> Vec<String> {
    let mut aliases: Vec<String> = Vec::new();
    let mut push = |candidate: &str| {
        let alias = normalize(candidate);
        if !alias.is_empty() && !aliases.contains(&alias) {
            aliases.push(alias);
        }
    };

    push(term);
    if let Some(caps) = PARENTHESIZED.captures(term) {
        push(&caps[1]);
        push(&caps[2]);
    }
    for alias in explicit {
        push(alias.as_ref());
    }

    aliases
}
