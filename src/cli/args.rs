//! Command line argument parsing for the medterm CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::GlossaryConfig;
use crate::error::Result;

/// medterm - find and define medical terms in text
#[derive(Parser, Debug, Clone)]
#[command(name = "medterm")]
#[command(about = "Find and define medical glossary terms in text")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct MedtermArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Directory containing the glossary JSON files (overrides the config file
    /// and the MEDTERM_GLOSSARIES_DIR environment variable)
    #[arg(short, long, value_name = "DIR")]
    pub glossaries: Option<PathBuf>,

    /// Source priority for collision resolution, as SOURCE=PRIORITY (repeatable)
    #[arg(short, long = "priority", value_name = "SOURCE=PRIORITY")]
    pub priorities: Vec<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl MedtermArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// Resolve the glossary configuration.
    ///
    /// Starts from the configuration file if given, otherwise the environment,
    /// then applies `--glossaries` and `--priority` on top. The environment is
    /// not consulted when a configuration file is given.
    pub fn glossary_config(&self) -> Result<GlossaryConfig> {
        let mut config = match &self.config {
            Some(path) => GlossaryConfig::load_from_file(path)?,
            None => GlossaryConfig::from_env(),
        };

        if let Some(dir) = &self.glossaries {
            config.glossaries_dir = dir.clone();
        }
        for assignment in &self.priorities {
            let (source, priority) = GlossaryConfig::parse_priority(assignment)?;
            config = config.source_priority(source, priority);
        }

        Ok(config)
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Find and define glossary terms in a text
    Analyze(AnalyzeArgs),

    /// Show the concept an alias resolves to
    Lookup(LookupArgs),

    /// Show vocabulary statistics
    Stats,
}

/// Arguments for analysing text
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Text to analyse (reads standard input when neither TEXT nor --file is given)
    #[arg(value_name = "TEXT", conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Treat the input as a JSON request object {"text": ...}
    #[arg(long)]
    pub request: bool,
}

/// Arguments for alias lookup
#[derive(Parser, Debug, Clone)]
pub struct LookupArgs {
    /// Alias to resolve
    #[arg(value_name = "ALIAS")]
    pub alias: String,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
