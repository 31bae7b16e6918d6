//! Source and record types produced by the loader.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Dense identifier of a loaded source; equal to its position in load order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceId(pub u32);

impl SourceId {
    /// Position of the source in load order.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One glossary that contributed entries to the vocabulary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossarySource {
    /// Identifier, also the load order position.
    pub id: SourceId,
    /// Source name (the glossary file stem).
    pub name: String,
    /// Trust priority; higher wins alias collisions.
    pub priority: u32,
    /// Number of usable entries this source contributed.
    pub entry_count: usize,
}

/// A glossary entry as it appears in a source file.
///
/// Every field is optional at this level so that one bad entry can be reported
/// and skipped without rejecting the rest of the file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    /// The main term.
    #[serde(default)]
    pub term: Option<String>,

    /// Plain-language definition of the term.
    #[serde(default, alias = "definition")]
    pub plain_alternative: Option<String>,

    /// Additional surface forms for the term.
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Other main terms declared to name the same concept.
    #[serde(default)]
    pub synonyms: Vec<String>,
}

impl RawEntry {
    /// Create an entry with a term and definition.
    pub fn new<T: Into<String>, D: Into<String>>(term: T, definition: D) -> Self {
        RawEntry {
            term: Some(term.into()),
            plain_alternative: Some(definition.into()),
            ..Default::default()
        }
    }

    /// Add an explicit alias.
    pub fn with_alias<S: Into<String>>(mut self, alias: S) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Declare a synonym link to another main term.
    pub fn with_synonym<S: Into<String>>(mut self, synonym: S) -> Self {
        self.synonyms.push(synonym.into());
        self
    }
}

/// A normalized statement from one source that some aliases denote `main_term`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TermRecord {
    /// Source that supplied the record.
    pub source: SourceId,
    /// The main term as written by the source.
    pub main_term: String,
    /// Normalized aliases, never empty.
    pub aliases: Vec<String>,
    /// Plain-language definition, if the source gave one.
    pub definition: Option<String>,
    /// Main terms the source declared as synonyms of this one.
    pub synonyms: Vec<String>,
}

/// A recoverable problem found while loading sources.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadWarning {
    /// Source name.
    pub source: String,
    /// Entry position within the source, when the warning is about one entry.
    pub entry: Option<usize>,
    /// What was wrong.
    pub message: String,
}

impl LoadWarning {
    pub fn for_source<S: Into<String>, M: Into<String>>(source: S, message: M) -> Self {
        LoadWarning {
            source: source.into(),
            entry: None,
            message: message.into(),
        }
    }

    pub fn for_entry<S: Into<String>, M: Into<String>>(source: S, entry: usize, message: M) -> Self {
        LoadWarning {
            source: source.into(),
            entry: Some(entry),
            message: message.into(),
        }
    }
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.entry {
            Some(entry) => write!(f, "{}[{}]: {}", self.source, entry, self.message),
            None => write!(f, "{}: {}", self.source, self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_entry_deserialization() {
        let entry: RawEntry = serde_json::from_str(
            r#"{"term": "Hypertension", "plain_alternative": "High blood pressure"}"#,
        )
        .unwrap();
        assert_eq!(entry, RawEntry::new("Hypertension", "High blood pressure"));

        let entry: RawEntry = serde_json::from_str(
            r#"{"term": "Heart attack", "definition": "Blocked blood flow to the heart",
                "aliases": ["MI"], "synonyms": ["Myocardial infarction"]}"#,
        )
        .unwrap();
        assert_eq!(
            entry.plain_alternative.as_deref(),
            Some("Blocked blood flow to the heart")
        );
        assert_eq!(entry.aliases, vec!["MI"]);
        assert_eq!(entry.synonyms, vec!["Myocardial infarction"]);
    }

    #[test]
    fn test_warning_display() {
        assert_eq!(
            LoadWarning::for_entry("nih", 3, "missing term").to_string(),
            "nih[3]: missing term"
        );
        assert_eq!(
            LoadWarning::for_source("cdc", "not a JSON array").to_string(),
            "cdc: not a JSON array"
        );
    }
}
