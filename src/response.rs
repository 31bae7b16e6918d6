//! Request and response shapes exchanged with external callers.
//!
//! Field names follow the glossary tool's published JSON contract
//! (`analysis_summary`, `found_terms`, `matches_in_text`, ...).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::aggregate::ConceptResult;
use crate::error::{MedtermError, Result};

/// A glossary analysis request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryRequest {
    pub text: String,
}

impl GlossaryRequest {
    pub fn new<S: Into<String>>(text: S) -> Self {
        GlossaryRequest { text: text.into() }
    }

    /// Validate a JSON request object.
    ///
    /// Fails with [`MedtermError::InvalidInput`] unless `text` is present and
    /// is a string.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value.get("text") {
            Some(Value::String(text)) => Ok(GlossaryRequest::new(text.as_str())),
            Some(Value::Null) | None => Err(MedtermError::invalid_input(
                "Missing required parameter: text",
            )),
            Some(other) => Err(MedtermError::invalid_input(format!(
                "Parameter 'text' must be a string, got {}",
                json_type_name(other)
            ))),
        }
    }

    /// Parse and validate a JSON request document.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| MedtermError::invalid_input(format!("Request is not valid JSON: {e}")))?;
        Self::from_value(&value)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Number of distinct concepts found.
    pub total_unique_phrases_found: usize,
    /// Length of the input in characters.
    pub text_character_length: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionInfo {
    pub plain_alternative: String,
    pub source: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchLocation {
    pub alias_found: String,
    pub location_start: usize,
    pub location_end: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundTerm {
    pub main_term: String,
    pub definitions: Vec<DefinitionInfo>,
    pub matches_in_text: Vec<MatchLocation>,
}

/// The complete result of analysing one text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub analysis_summary: AnalysisSummary,
    pub found_terms: Vec<FoundTerm>,
}

impl AnalysisResponse {
    /// Assemble the response for `text` from aggregated concept results.
    pub fn assemble(text: &str, results: Vec<ConceptResult>) -> Self {
        let found_terms: Vec<FoundTerm> = results.into_iter().map(FoundTerm::from).collect();
        AnalysisResponse {
            analysis_summary: AnalysisSummary {
                total_unique_phrases_found: found_terms.len(),
                text_character_length: text.chars().count(),
            },
            found_terms,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.found_terms.is_empty()
    }
}

impl From<ConceptResult> for FoundTerm {
    fn from(result: ConceptResult) -> Self {
        FoundTerm {
            main_term: result.label,
            definitions: result
                .definitions
                .into_iter()
                .map(|definition| DefinitionInfo {
                    plain_alternative: definition.text,
                    source: definition.source,
                })
                .collect(),
            matches_in_text: result
                .matches
                .into_iter()
                .map(|found| MatchLocation {
                    alias_found: found.alias_found,
                    location_start: found.location_start,
                    location_end: found.location_end,
                })
                .collect(),
        }
    }
}
