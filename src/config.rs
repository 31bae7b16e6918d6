//! Configuration for the glossary service.
//!
//! The core only needs to know where the glossary files live and how much each
//! source is trusted when two sources disagree about an alias.
//!
//! # Example
//!
//! ```
//! use medterm::config::GlossaryConfig;
//!
//! let config = GlossaryConfig::new("./glossaries")
//!     .source_priority("nci", 10)
//!     .source_priority("cochrane", 5)
//!     .default_priority(1);
//!
//! assert_eq!(config.priority_of("nci"), 10);
//! assert_eq!(config.priority_of("unlisted"), 1);
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MedtermError, Result};

/// Environment variable naming the glossary directory.
pub const GLOSSARIES_DIR_ENV: &str = "MEDTERM_GLOSSARIES_DIR";

/// Environment variable used by older deployments for the same purpose.
pub const LEGACY_GLOSSARIES_DIR_ENV: &str = "GLOSSARIES_DIR";

/// Directory used when nothing else is configured.
pub const DEFAULT_GLOSSARIES_DIR: &str = "./glossaries";

/// Glossary service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryConfig {
    /// Directory containing one `*.json` file per source.
    pub glossaries_dir: PathBuf,

    /// Trust priority per source name; higher wins alias collisions.
    #[serde(default)]
    pub source_priorities: HashMap<String, u32>,

    /// Priority of sources missing from `source_priorities`.
    #[serde(default)]
    pub default_priority: u32,
}

impl Default for GlossaryConfig {
    fn default() -> Self {
        GlossaryConfig::new(DEFAULT_GLOSSARIES_DIR)
    }
}

impl GlossaryConfig {
    /// Create a configuration for a glossary directory.
    pub fn new<P: Into<PathBuf>>(glossaries_dir: P) -> Self {
        GlossaryConfig {
            glossaries_dir: glossaries_dir.into(),
            source_priorities: HashMap::new(),
            default_priority: 0,
        }
    }

    /// Build a configuration from the environment.
    ///
    /// `MEDTERM_GLOSSARIES_DIR` wins over `GLOSSARIES_DIR`; with neither set the
    /// default directory is used.
    pub fn from_env() -> Self {
        let dir = std::env::var(GLOSSARIES_DIR_ENV)
            .or_else(|_| std::env::var(LEGACY_GLOSSARIES_DIR_ENV))
            .unwrap_or_else(|_| DEFAULT_GLOSSARIES_DIR.to_string());
        GlossaryConfig::new(dir)
    }

    /// Load a configuration from a JSON file.
    ///
    /// A relative `glossaries_dir` is resolved against the directory holding
    /// the configuration file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            MedtermError::config(format!(
                "Failed to read configuration file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let mut config: GlossaryConfig = serde_json::from_str(&content).map_err(|e| {
            MedtermError::config(format!(
                "Failed to parse configuration file '{}': {}",
                path.display(),
                e
            ))
        })?;

        if config.glossaries_dir.is_relative()
            && let Some(parent) = path.parent()
        {
            config.glossaries_dir = parent.join(&config.glossaries_dir);
        }

        Ok(config)
    }

    /// Set the priority of one source.
    pub fn source_priority<S: Into<String>>(mut self, source: S, priority: u32) -> Self {
        self.source_priorities.insert(source.into(), priority);
        self
    }

    /// Set the priority of unlisted sources.
    pub fn default_priority(mut self, priority: u32) -> Self {
        self.default_priority = priority;
        self
    }

    /// Priority of a source by name.
    pub fn priority_of(&self, source: &str) -> u32 {
        self.source_priorities
            .get(source)
            .copied()
            .unwrap_or(self.default_priority)
    }

    /// Parse a `source=priority` assignment as given on the command line.
    pub fn parse_priority(assignment: &str) -> Result<(String, u32)> {
        let (source, priority) = assignment.split_once('=').ok_or_else(|| {
            MedtermError::config(format!(
                "Invalid priority '{assignment}', expected SOURCE=PRIORITY"
            ))
        })?;
        let source = source.trim();
        if source.is_empty() {
            return Err(MedtermError::config(format!(
                "Invalid priority '{assignment}', source name is empty"
            )));
        }
        let priority = priority.trim().parse::<u32>().map_err(|e| {
            MedtermError::config(format!("Invalid priority '{assignment}': {e}"))
        })?;
        Ok((source.to_string(), priority))
    }
}
