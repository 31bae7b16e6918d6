//! Loading glossary sources into term records.
//!
//! Sources are read from a directory of `*.json` files, each a JSON array of
//! [`RawEntry`] objects. Files are processed in file-name order, which fixes the
//! load order used to break priority ties during index construction.
//!
//! Problems with individual entries or whole files are recorded as
//! [`LoadWarning`]s and logged; loading fails only when no usable record is
//! left across all sources.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde_json::Value;

use crate::analysis::alias::generate_aliases;
use crate::config::GlossaryConfig;
use crate::error::{MedtermError, Result};
use crate::source::record::{GlossarySource, LoadWarning, RawEntry, SourceId, TermRecord};

/// Everything the loader produced: sources, usable records and warnings.
#[derive(Clone, Debug, Default)]
pub struct LoadedSources {
    pub sources: Vec<GlossarySource>,
    pub records: Vec<TermRecord>,
    pub warnings: Vec<LoadWarning>,
}

impl LoadedSources {
    /// Fail with [`MedtermError::EmptyVocabulary`] if no record is usable.
    pub fn ensure_not_empty(self) -> Result<Self> {
        if self.records.is_empty() {
            return Err(MedtermError::empty_vocabulary(format!(
                "no usable glossary entries in {} source(s) ({} warning(s))",
                self.sources.len(),
                self.warnings.len()
            )));
        }
        Ok(self)
    }
}

/// Turns raw glossary sources into [`TermRecord`]s.
#[derive(Clone, Debug, Default)]
pub struct SourceLoader {
    config: GlossaryConfig,
}

impl SourceLoader {
    /// Create a loader using the priorities of `config`.
    pub fn new(config: GlossaryConfig) -> Self {
        SourceLoader { config }
    }

    /// Load every `*.json` source in the configured glossary directory.
    pub fn load(&self) -> Result<LoadedSources> {
        self.load_dir(&self.config.glossaries_dir)
    }

    /// Load every `*.json` source in `dir`.
    ///
    /// An unreadable directory is an error. Unreadable or malformed files are
    /// skipped with a warning.
    pub fn load_dir<P: AsRef<Path>>(&self, dir: P) -> Result<LoadedSources> {
        let dir = dir.as_ref();
        let files = json_files(dir).map_err(|e| {
            MedtermError::source(format!(
                "Failed to read glossary directory '{}': {}",
                dir.display(),
                e
            ))
        })?;

        let mut loaded = LoadedSources::default();
        for path in files {
            let name = source_name(&path);
            match read_entries(&path) {
                Ok(entries) => self.add_source(&mut loaded, &name, entries),
                Err(e) => {
                    warn!("Skipping glossary source '{}': {}", name, e);
                    loaded
                        .warnings
                        .push(LoadWarning::for_source(name, e.to_string()));
                }
            }
        }

        loaded.ensure_not_empty()
    }

    /// Load sources already held in memory, in the given order.
    pub fn load_entries<S, I>(&self, sources: I) -> Result<LoadedSources>
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, Vec<Value>)>,
    {
        let mut loaded = LoadedSources::default();
        for (name, entries) in sources {
            self.add_source(&mut loaded, &name.into(), entries);
        }
        loaded.ensure_not_empty()
    }

    /// Normalize one source's entries and append them to `loaded`.
    pub fn add_source(&self, loaded: &mut LoadedSources, name: &str, entries: Vec<Value>) {
        let id = SourceId(loaded.sources.len() as u32);
        let before = loaded.records.len();

        for (position, value) in entries.into_iter().enumerate() {
            match normalize_entry(id, value) {
                Ok(record) => loaded.records.push(record),
                Err(message) => {
                    warn!("Dropping entry {} of '{}': {}", position, name, message);
                    loaded
                        .warnings
                        .push(LoadWarning::for_entry(name, position, message));
                }
            }
        }

        let entry_count = loaded.records.len() - before;
        debug!("Loaded {} entries from source '{}'", entry_count, name);
        loaded.sources.push(GlossarySource {
            id,
            name: name.to_string(),
            priority: self.config.priority_of(name),
            entry_count,
        });
    }
}

/// Validate a raw entry and turn it into a record.
fn normalize_entry(source: SourceId, value: Value) -> std::result::Result<TermRecord, String> {
    let entry: RawEntry =
        serde_json::from_value(value).map_err(|e| format!("malformed entry: {e}"))?;

    let main_term = entry
        .term
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .ok_or_else(|| "missing or empty term".to_string())?;

    let aliases = generate_aliases(main_term, &entry.aliases);
    if aliases.is_empty() {
        return Err(format!("term '{main_term}' has no usable alias"));
    }

    let definition = entry
        .plain_alternative
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty());

    let synonyms = entry
        .synonyms
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    Ok(TermRecord {
        source,
        main_term: main_term.to_string(),
        aliases,
        definition,
        synonyms,
    })
}

/// The `*.json` files of `dir`, sorted by file name.
fn json_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn source_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn read_entries(path: &Path) -> Result<Vec<Value>> {
    let content = fs::read_to_string(path)?;
    match serde_json::from_str::<Value>(&content)? {
        Value::Array(entries) => Ok(entries),
        _ => Err(MedtermError::source("expected a JSON array of entries")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_load_entries_normalizes_records() {
        let loader = SourceLoader::new(GlossaryConfig::default().source_priority("nci", 5));
        let loaded = loader
            .load_entries(vec![(
                "nci",
                vec![json!({
                    "term": "Pertussis (Whooping Cough)",
                    "plain_alternative": "  A lung infection.  ",
                    "aliases": ["100-day cough"]
                })],
            )])
            .unwrap();

        assert_eq!(loaded.sources.len(), 1);
        assert_eq!(loaded.sources[0].name, "nci");
        assert_eq!(loaded.sources[0].priority, 5);
        assert_eq!(loaded.sources[0].entry_count, 1);

        let record = &loaded.records[0];
        assert_eq!(record.main_term, "Pertussis (Whooping Cough)");
        assert_eq!(record.definition.as_deref(), Some("A lung infection."));
        assert_eq!(
            record.aliases,
            vec![
                "pertussis (whooping cough)",
                "pertussis",
                "whooping cough",
                "100-day cough"
            ]
        );
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn test_malformed_entries_are_dropped_with_warnings() {
        let loader = SourceLoader::default();
        let loaded = loader
            .load_entries(vec![(
                "mixed",
                vec![
                    json!({"term": "Hypertension", "plain_alternative": "High blood pressure"}),
                    json!({"plain_alternative": "No term here"}),
                    json!({"term": "   ", "plain_alternative": "Blank term"}),
                    json!("not an object"),
                    json!({"term": "Fever"}),
                ],
            )])
            .unwrap();

        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.records[1].main_term, "Fever");
        assert_eq!(loaded.records[1].definition, None);
        assert_eq!(loaded.sources[0].entry_count, 2);

        let positions: Vec<_> = loaded.warnings.iter().map(|w| w.entry).collect();
        assert_eq!(positions, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_empty_vocabulary_is_fatal() {
        let loader = SourceLoader::default();
        let err = loader
            .load_entries(vec![("empty", vec![json!({"plain_alternative": "x"})])])
            .unwrap_err();
        assert!(matches!(err, MedtermError::EmptyVocabulary(_)));
    }

    #[test]
    fn test_load_dir_skips_broken_files() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("b_nih.json"),
            r#"[{"term": "Clinical Trial", "plain_alternative": "A research study"}]"#,
        )
        .unwrap();
        fs::write(dir.path().join("a_broken.json"), "{ not json").unwrap();
        fs::write(dir.path().join("c_object.json"), r#"{"term": "x"}"#).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let loaded = SourceLoader::default().load_dir(dir.path()).unwrap();

        assert_eq!(loaded.sources.len(), 1);
        assert_eq!(loaded.sources[0].name, "b_nih");
        assert_eq!(loaded.records.len(), 1);

        let skipped: Vec<_> = loaded.warnings.iter().map(|w| w.source.as_str()).collect();
        assert_eq!(skipped, vec!["a_broken", "c_object"]);
    }

    #[test]
    fn test_load_missing_dir() {
        let err = SourceLoader::default()
            .load_dir("/nonexistent/glossaries")
            .unwrap_err();
        assert!(matches!(err, MedtermError::Source(_)));
    }
}
