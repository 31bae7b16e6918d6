//! End-to-end scenarios for the glossary pipeline: sources on disk, index
//! build, matching, aggregation and the response contract.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;

use medterm::prelude::*;
use medterm::service::{analyze_with, global};
use serde_json::json;
use tempfile::{TempDir, tempdir};

fn write_source(dir: &Path, name: &str, entries: serde_json::Value) {
    fs::write(dir.join(format!("{name}.json")), entries.to_string()).unwrap();
}

/// Two sources with overlapping vocabulary, similar to the production set.
fn glossary_dir() -> TempDir {
    let dir = tempdir().unwrap();
    write_source(
        dir.path(),
        "cochrane",
        json!([
            {"term": "Adverse effects", "plain_alternative": "Unwanted effects of a treatment"},
            {"term": "Clinical Trial", "plain_alternative": "A research study that tests a treatment in people"},
            {"term": "Infection", "plain_alternative": "Illness caused by germs"},
            {"term": "Bacterial infection", "plain_alternative": "Illness caused by bacteria"},
            {"term": "Chronic disease", "plain_alternative": "A long-lasting illness"},
            {"term": "Disease", "plain_alternative": "An illness"},
            {"term": "an", "plain_alternative": "not a real entry, used to test boundaries"}
        ]),
    );
    write_source(
        dir.path(),
        "nih",
        json!([
            {"term": "Myocardial infarction", "plain_alternative": "Heart attack", "aliases": ["MI", "heart attack"]},
            {"term": "Oral Poliovirus (OPV)", "plain_alternative": "A polio vaccine given by mouth"},
            {"term": "adverse effects", "plain_alternative": "Side effects"},
            {"plain_alternative": "entry without a term"}
        ]),
    );
    dir
}

fn loaded_service(dir: &TempDir) -> GlossaryService {
    let service = GlossaryService::new(GlossaryConfig::new(dir.path()));
    service.ensure_loaded().unwrap();
    service
}

fn assert_offsets_exact(text: &str, response: &AnalysisResponse) {
    for term in &response.found_terms {
        for found in &term.matches_in_text {
            let slice: String = text
                .chars()
                .skip(found.location_start)
                .take(found.location_end - found.location_start)
                .collect();
            assert_eq!(slice, found.alias_found);
        }
    }
}

fn assert_no_overlaps(response: &AnalysisResponse) {
    let mut spans: Vec<(usize, usize)> = response
        .found_terms
        .iter()
        .flat_map(|term| term.matches_in_text.iter())
        .map(|found| (found.location_start, found.location_end))
        .collect();
    spans.sort();
    for pair in spans.windows(2) {
        assert!(pair[0].1 <= pair[1].0, "overlapping spans {pair:?}");
    }
}

#[test]
fn test_concrete_scenario() -> Result<()> {
    let dir = glossary_dir();
    let service = loaded_service(&dir);

    let text = "The patient experienced adverse effects during the clinical trial.";
    let response = service.analyze(text)?;

    assert_eq!(response.analysis_summary.total_unique_phrases_found, 2);
    assert_eq!(response.analysis_summary.text_character_length, text.chars().count());

    let first = &response.found_terms[0];
    assert_eq!(first.main_term, "Adverse effects");
    assert_eq!(first.matches_in_text[0].alias_found, "adverse effects");
    assert_eq!(
        (first.matches_in_text[0].location_start, first.matches_in_text[0].location_end),
        (24, 39)
    );
    // Both sources define the concept; both definitions are kept.
    let sources: Vec<_> = first.definitions.iter().map(|d| d.source.as_str()).collect();
    assert_eq!(sources, vec!["cochrane", "nih"]);

    let second = &response.found_terms[1];
    assert_eq!(second.main_term, "Clinical Trial");
    assert_eq!(
        (second.matches_in_text[0].location_start, second.matches_in_text[0].location_end),
        (51, 65)
    );

    Ok(())
}

#[test]
fn test_longest_match_precedence() -> Result<()> {
    let dir = glossary_dir();
    let service = loaded_service(&dir);

    let response = service.analyze("Signs of a bacterial infection.")?;
    assert_eq!(response.found_terms.len(), 1);
    assert_eq!(response.found_terms[0].main_term, "Bacterial infection");

    let response = service.analyze("This chronic disease is not just any disease.")?;
    let labels: Vec<_> = response.found_terms.iter().map(|t| t.main_term.as_str()).collect();
    assert_eq!(labels, vec!["Chronic disease", "Disease"]);
    assert_no_overlaps(&response);

    Ok(())
}

#[test]
fn test_case_insensitive_and_boundaries() -> Result<()> {
    let dir = glossary_dir();
    let service = loaded_service(&dir);

    let response = service.analyze("ADVERSE EFFECTS were reported")?;
    assert_eq!(response.found_terms[0].main_term, "Adverse effects");
    assert_eq!(response.found_terms[0].matches_in_text[0].alias_found, "ADVERSE EFFECTS");

    let response = service.analyze("The android measured the pancreas")?;
    assert!(response.found_terms.is_empty());

    Ok(())
}

#[test]
fn test_canonical_grouping() -> Result<()> {
    let dir = glossary_dir();
    let service = loaded_service(&dir);

    let text = "After the MI, a second heart attack followed.";
    let response = service.analyze(text)?;

    assert_eq!(response.found_terms.len(), 1);
    let term = &response.found_terms[0];
    assert_eq!(term.main_term, "Myocardial infarction");
    let found: Vec<_> = term.matches_in_text.iter().map(|m| m.alias_found.as_str()).collect();
    assert_eq!(found, vec!["MI", "heart attack"]);
    assert_offsets_exact(text, &response);

    Ok(())
}

#[test]
fn test_parenthesized_aliases() -> Result<()> {
    let dir = glossary_dir();
    let service = loaded_service(&dir);

    let text = "Children received OPV; oral poliovirus (OPV) is cheap.";
    let response = service.analyze(text)?;

    assert_eq!(response.found_terms.len(), 1);
    let found: Vec<_> = response.found_terms[0]
        .matches_in_text
        .iter()
        .map(|m| m.alias_found.as_str())
        .collect();
    assert_eq!(found, vec!["OPV", "oral poliovirus (OPV)"]);

    Ok(())
}

#[test]
fn test_properties_over_varied_inputs() -> Result<()> {
    let dir = glossary_dir();
    let service = loaded_service(&dir);

    let texts = [
        "",
        "no medical words here",
        "Infection, infection and INFECTION.",
        "Ménière's café: adverse\teffects\n during a clinical   trial, an MI.",
        "bacterial infectionbacterial infection",
        "an an an",
    ];

    for text in texts {
        let response = service.analyze(text)?;
        assert_offsets_exact(text, &response);
        assert_no_overlaps(&response);
        assert_eq!(
            response.analysis_summary.total_unique_phrases_found,
            response.found_terms.len()
        );

        // Idempotence: identical serialized output.
        let again = service.analyze(text)?;
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            serde_json::to_string(&again).unwrap()
        );
    }

    Ok(())
}

#[test]
fn test_lengths_and_offsets_count_characters() -> Result<()> {
    let dir = glossary_dir();
    let service = loaded_service(&dir);

    let text = "Fièvre après l’opération: clinical trial";
    assert_eq!(text.len(), 45);

    let response = service.analyze(text)?;
    assert_eq!(response.analysis_summary.text_character_length, 40);

    let found = &response.found_terms[0].matches_in_text[0];
    assert_eq!(found.alias_found, "clinical trial");
    assert_eq!((found.location_start, found.location_end), (26, 40));

    Ok(())
}

#[test]
fn test_empty_input() -> Result<()> {
    let dir = glossary_dir();
    let service = loaded_service(&dir);

    let response = service.analyze("")?;
    assert_eq!(response.analysis_summary.total_unique_phrases_found, 0);
    assert_eq!(response.analysis_summary.text_character_length, 0);
    assert!(response.found_terms.is_empty());

    Ok(())
}

#[test]
fn test_unready_service() {
    let service = GlossaryService::new(GlossaryConfig::new("/does/not/exist"));
    let err = service.analyze("The clinical trial").unwrap_err();
    assert!(err.is_not_ready());
}

#[test]
fn test_load_warnings_are_recorded() {
    let dir = glossary_dir();
    let service = loaded_service(&dir);

    let stats = service.stats().unwrap();
    assert_eq!(stats.warnings, 1);
    assert_eq!(stats.sources.len(), 2);
    assert_eq!(stats.records, 10);

    let index = service.snapshot().unwrap();
    assert_eq!(index.warnings()[0].source, "nih");
    assert_eq!(index.warnings()[0].entry, Some(3));
}

#[test]
fn test_priority_decides_collisions() -> Result<()> {
    let dir = tempdir().unwrap();
    write_source(
        dir.path(),
        "a_general",
        json!([{"term": "Mitral insufficiency", "plain_alternative": "A leaky heart valve", "aliases": ["MI"]}]),
    );
    write_source(
        dir.path(),
        "b_cardiology",
        json!([{"term": "Myocardial infarction", "plain_alternative": "Heart attack", "aliases": ["MI"]}]),
    );

    // Without priorities the first loaded source wins.
    let service = loaded_service(&dir);
    let concept = service.lookup("mi")?.unwrap();
    assert_eq!(concept.label, "Mitral insufficiency");

    // With a higher priority the cardiology glossary wins, keeping the
    // general glossary's definition under the winning concept.
    let config = GlossaryConfig::new(dir.path()).source_priority("b_cardiology", 10);
    let service = GlossaryService::new(config);
    service.ensure_loaded()?;
    let concept = service.lookup("MI")?.unwrap();
    assert_eq!(concept.label, "Myocardial infarction");
    assert_eq!(
        concept.definitions,
        vec![
            Definition::new("Heart attack", "b_cardiology"),
            Definition::new("A leaky heart valve", "a_general"),
        ]
    );

    Ok(())
}

#[test]
fn test_concurrent_requests_during_reload() -> Result<()> {
    let dir = glossary_dir();
    let service = Arc::new(loaded_service(&dir));
    let text = "adverse effects in a clinical trial";
    let expected = service.analyze(text)?;

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let service = Arc::clone(&service);
            let expected = expected.clone();
            thread::spawn(move || {
                for _ in 0..50 {
                    let response = service.analyze(text).unwrap();
                    assert_eq!(response, expected);
                }
            })
        })
        .collect();

    for _ in 0..5 {
        service.reload()?;
    }
    for reader in readers {
        reader.join().unwrap();
    }

    assert_eq!(service.snapshot()?.version(), 6);
    Ok(())
}

#[test]
fn test_pure_pipeline_against_snapshot() -> Result<()> {
    let dir = glossary_dir();
    let service = loaded_service(&dir);
    let index = service.snapshot()?;

    let text = "a clinical trial";
    assert_eq!(analyze_with(&index, text), service.analyze(text)?);
    Ok(())
}

#[test]
fn test_json_request_validation() -> Result<()> {
    let dir = glossary_dir();
    let service = loaded_service(&dir);

    let request = GlossaryRequest::from_json(r#"{"text": "a clinical trial"}"#)?;
    let response = service.analyze_request(&request)?;
    assert_eq!(response.found_terms[0].main_term, "Clinical Trial");

    let err = GlossaryRequest::from_json(r#"{"text": ["a", "list"]}"#).unwrap_err();
    assert!(err.is_invalid_input());
    Ok(())
}

#[test]
fn test_global_service_is_shared_and_not_ready_until_loaded() {
    assert!(std::ptr::eq(global(), global()));
    assert!(!global().is_ready());
    assert!(global().snapshot().unwrap_err().is_not_ready());
    assert!(global().analyze("clinical trial").unwrap_err().is_not_ready());
}
