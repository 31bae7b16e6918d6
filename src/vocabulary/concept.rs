//! Concept and definition types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Dense identifier of a concept inside one index version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConceptId(pub u32);

impl ConceptId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ConceptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0)
    }
}

/// A plain-language definition and the source that supplied it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Definition {
    pub text: String,
    pub source: String,
}

impl Definition {
    pub fn new<T: Into<String>, S: Into<String>>(text: T, source: S) -> Self {
        Definition {
            text: text.into(),
            source: source.into(),
        }
    }
}

/// The canonical identity of a medical idea.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    /// Identifier within the index that created it.
    pub id: ConceptId,

    /// Canonical label, the `main_term` of the highest-priority record.
    pub label: String,

    /// Other `main_term` spellings that resolved to this concept.
    pub alternate_labels: Vec<String>,

    /// Deduplicated definitions in contribution order.
    pub definitions: Vec<Definition>,

    /// Normalized aliases resolving to this concept. Used to build the search
    /// automaton, not for display.
    pub aliases: Vec<String>,
}

impl Concept {
    pub(crate) fn new(id: ConceptId, label: String) -> Self {
        Concept {
            id,
            label,
            alternate_labels: Vec::new(),
            definitions: Vec::new(),
            aliases: Vec::new(),
        }
    }

    /// Add a definition unless the same (text, source) pair is already present.
    pub(crate) fn add_definition(&mut self, definition: Definition) -> bool {
        if self.definitions.contains(&definition) {
            return false;
        }
        self.definitions.push(definition);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definitions_are_deduplicated() {
        let mut concept = Concept::new(ConceptId(0), "Fever".to_string());
        assert!(concept.add_definition(Definition::new("High body temperature", "nih")));
        assert!(!concept.add_definition(Definition::new("High body temperature", "nih")));
        assert!(concept.add_definition(Definition::new("High body temperature", "cdc")));
        assert!(concept.add_definition(Definition::new("Raised temperature", "nih")));
        assert_eq!(concept.definitions.len(), 3);
    }

    #[test]
    fn test_concept_id_display() {
        assert_eq!(ConceptId(42).to_string(), "C42");
    }
}
