//! Command implementations for the medterm CLI.

use std::fs;
use std::io::{self, Read};
use std::time::Instant;

use log::{info, warn};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{MedtermError, Result};
use crate::response::GlossaryRequest;
use crate::service::GlossaryService;

/// Execute a CLI command.
pub fn execute_command(args: MedtermArgs) -> Result<()> {
    let service = load_service(&args)?;

    match &args.command {
        Command::Analyze(analyze_args) => analyze_text(&service, analyze_args, &args),
        Command::Lookup(lookup_args) => lookup_alias(&service, lookup_args, &args),
        Command::Stats => show_stats(&service, &args),
    }
}

/// Build the glossary service for the configured sources.
fn load_service(args: &MedtermArgs) -> Result<GlossaryService> {
    let config = args.glossary_config()?;
    info!(
        "Loading glossaries from: {}",
        config.glossaries_dir.display()
    );

    let start_time = Instant::now();
    let service = GlossaryService::new(config);
    let index = service.ensure_loaded()?;

    for warning in index.warnings() {
        warn!("{warning}");
    }
    info!(
        "Indexed {} aliases for {} concepts in {} ms",
        index.alias_count(),
        index.concepts().len(),
        start_time.elapsed().as_millis()
    );

    Ok(service)
}

/// Analyse a text and print the found terms.
fn analyze_text(service: &GlossaryService, args: &AnalyzeArgs, cli_args: &MedtermArgs) -> Result<()> {
    let bytes = match (&args.text, &args.file) {
        (Some(text), _) => text.clone().into_bytes(),
        (None, Some(path)) => fs::read(path)?,
        (None, None) => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            buffer
        }
    };

    let response = if args.request {
        let json = std::str::from_utf8(&bytes).map_err(|e| {
            MedtermError::invalid_input(format!("request is not valid UTF-8: {e}"))
        })?;
        service.analyze_request(&GlossaryRequest::from_json(json)?)?
    } else {
        service.analyze_bytes(&bytes)?
    };

    output_result(&response, cli_args)
}

/// Resolve one alias.
fn lookup_alias(service: &GlossaryService, args: &LookupArgs, cli_args: &MedtermArgs) -> Result<()> {
    let result = LookupResult {
        alias: args.alias.clone(),
        concept: service.lookup(&args.alias)?,
    };
    output_result(&result, cli_args)
}

/// Show vocabulary statistics.
fn show_stats(service: &GlossaryService, cli_args: &MedtermArgs) -> Result<()> {
    let stats = service.stats()?;
    output_result(&stats, cli_args)
}
