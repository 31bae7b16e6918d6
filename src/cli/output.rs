//! Output formatting for CLI commands.

use serde::Serialize;

use crate::cli::args::{MedtermArgs, OutputFormat};
use crate::error::Result;
use crate::response::AnalysisResponse;
use crate::vocabulary::concept::Concept;
use crate::vocabulary::index::VocabularyStats;

/// Result structure for alias lookups.
#[derive(Debug, Serialize)]
pub struct LookupResult {
    pub alias: String,
    pub concept: Option<Concept>,
}

/// Render a result as human-readable text.
pub trait HumanOutput {
    fn render_human(&self) -> String;
}

/// Output a result in the selected format.
pub fn output_result<T: Serialize + HumanOutput>(result: &T, args: &MedtermArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            print!("{}", result.render_human());
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &MedtermArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

impl HumanOutput for AnalysisResponse {
    fn render_human(&self) -> String {
        let summary = &self.analysis_summary;
        let mut out = format!(
            "Found {} term(s) in {} characters\n",
            summary.total_unique_phrases_found, summary.text_character_length
        );
        if self.found_terms.is_empty() {
            return out;
        }
        out.push_str("═══════════════\n");

        for (i, term) in self.found_terms.iter().enumerate() {
            out.push('\n');
            out.push_str(&format!("{}. {}\n", i + 1, term.main_term));
            out.push_str("─────────────\n");
            for location in &term.matches_in_text {
                out.push_str(&format!(
                    "  at [{}, {}): \"{}\"\n",
                    location.location_start, location.location_end, location.alias_found
                ));
            }
            for definition in &term.definitions {
                out.push_str(&format!(
                    "  - {} ({})\n",
                    definition.plain_alternative, definition.source
                ));
            }
        }

        out
    }
}

impl HumanOutput for LookupResult {
    fn render_human(&self) -> String {
        let Some(concept) = &self.concept else {
            return format!("'{}' is not a known alias\n", self.alias);
        };

        let mut out = format!("'{}' → {} ({})\n", self.alias, concept.label, concept.id);
        if !concept.alternate_labels.is_empty() {
            out.push_str(&format!(
                "Also known as: {}\n",
                concept.alternate_labels.join(", ")
            ));
        }
        out.push_str(&format!("Aliases: {}\n", concept.aliases.join(", ")));
        for definition in &concept.definitions {
            out.push_str(&format!("  - {} ({})\n", definition.text, definition.source));
        }
        out
    }
}

impl HumanOutput for VocabularyStats {
    fn render_human(&self) -> String {
        let mut out = String::new();
        out.push_str("Vocabulary Statistics:\n");
        out.push_str("══════════════════════\n");
        out.push_str(&format!("Version: {}\n", self.version));
        out.push_str(&format!("Built at: {}\n", self.built_at.to_rfc3339()));
        out.push_str(&format!("Records: {}\n", self.records));
        out.push_str(&format!("Aliases: {}\n", self.aliases));
        out.push_str(&format!("Concepts: {}\n", self.concepts));
        if self.unreachable_concepts > 0 {
            out.push_str(&format!(
                "Unreachable concepts: {}\n",
                self.unreachable_concepts
            ));
        }
        out.push_str(&format!("Alias collisions: {}\n", self.alias_collisions));
        out.push_str(&format!("Load warnings: {}\n", self.warnings));
        out.push_str("\nSources:\n");
        for source in &self.sources {
            out.push_str(&format!(
                "  {:<24} priority {:>3}  entries {:>6}\n",
                source.name, source.priority, source.entry_count
            ));
        }
        out
    }
}
