//! Vocabulary index construction and collision resolution.

use std::cmp::Reverse;

use ahash::AHashMap;
use aho_corasick::{AhoCorasick, MatchKind};
use chrono::Utc;
use log::{debug, info};

use crate::analysis::normalize::normalize;
use crate::error::{MedtermError, Result};
use crate::source::loader::LoadedSources;
use crate::source::record::{GlossarySource, SourceId, TermRecord};
use crate::vocabulary::concept::{Concept, ConceptId, Definition};
use crate::vocabulary::index::VocabularyIndex;

/// Builds a [`VocabularyIndex`] from loaded sources.
///
/// # Example
///
/// ```
/// use medterm::source::SourceLoader;
/// use medterm::vocabulary::VocabularyBuilder;
/// use serde_json::json;
///
/// let loaded = SourceLoader::default()
///     .load_entries(vec![(
///         "nih",
///         vec![json!({"term": "Clinical Trial", "plain_alternative": "A research study"})],
///     )])
///     .unwrap();
/// let index = VocabularyBuilder::new(loaded).build().unwrap();
///
/// assert_eq!(index.lookup("CLINICAL  trial").unwrap().label, "Clinical Trial");
/// ```
#[derive(Debug)]
pub struct VocabularyBuilder {
    loaded: LoadedSources,
    version: u64,
}

impl VocabularyBuilder {
    pub fn new(loaded: LoadedSources) -> Self {
        VocabularyBuilder { loaded, version: 1 }
    }

    /// Set the version number recorded in the built index.
    pub fn version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    pub fn build(self) -> Result<VocabularyIndex> {
        let LoadedSources {
            sources,
            records,
            warnings,
        } = self.loaded;

        if records.is_empty() {
            return Err(MedtermError::empty_vocabulary(
                "cannot build an index without records",
            ));
        }

        let ranking = Ranking {
            sources: &sources,
            records: &records,
        };
        let (record_concepts, members) = group_records(&records);

        let mut concepts: Vec<Concept> = members
            .iter()
            .enumerate()
            .map(|(id, member_records)| {
                build_concept(ConceptId(id as u32), member_records, &ranking)
            })
            .collect();

        // Alias registrations in first-seen order.
        let mut registrations: AHashMap<&str, Vec<usize>> = AHashMap::new();
        let mut alias_order: Vec<&str> = Vec::new();
        for (position, record) in records.iter().enumerate() {
            for alias in &record.aliases {
                let registered = registrations.entry(alias.as_str()).or_insert_with(|| {
                    alias_order.push(alias.as_str());
                    Vec::new()
                });
                registered.push(position);
            }
        }

        let mut aliases = AHashMap::with_capacity(alias_order.len());
        let mut patterns = Vec::with_capacity(alias_order.len());
        let mut alias_collisions = 0;

        for alias in &alias_order {
            let registered = &registrations[alias];
            let Some(best) = ranking.best(registered) else {
                continue;
            };
            let winner = record_concepts[best];

            if registered.iter().any(|&r| record_concepts[r] != winner) {
                alias_collisions += 1;
                debug!(
                    "Alias '{}' is registered by {} concepts, resolved to '{}'",
                    alias,
                    registered.len(),
                    concepts[winner.index()].label
                );
                for &r in registered {
                    if record_concepts[r] == winner {
                        continue;
                    }
                    if let Some(definition) = ranking.definition(r) {
                        concepts[winner.index()].add_definition(definition);
                    }
                }
            }

            aliases.insert(alias.to_string(), winner);
            concepts[winner.index()].aliases.push(alias.to_string());
            patterns.push(winner);
        }

        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(&alias_order)
            .map_err(|e| MedtermError::index(format!("Failed to build alias automaton: {e}")))?;

        info!(
            "Built vocabulary index v{}: {} aliases, {} concepts, {} collisions from {} sources",
            self.version,
            aliases.len(),
            concepts.len(),
            alias_collisions,
            sources.len()
        );

        Ok(VocabularyIndex {
            version: self.version,
            built_at: Utc::now(),
            records: records.len(),
            sources,
            concepts,
            aliases,
            patterns,
            automaton,
            warnings,
            alias_collisions,
        })
    }
}

/// Orders records by trust: higher source priority first, then earlier source
/// in load order, then earlier record.
struct Ranking<'a> {
    sources: &'a [GlossarySource],
    records: &'a [TermRecord],
}

impl Ranking<'_> {
    fn key(&self, record: usize) -> (Reverse<u32>, SourceId, usize) {
        let source = self.records[record].source;
        let priority = self
            .sources
            .get(source.index())
            .map(|s| s.priority)
            .unwrap_or_default();
        (Reverse(priority), source, record)
    }

    fn best(&self, records: &[usize]) -> Option<usize> {
        records.iter().copied().min_by_key(|&r| self.key(r))
    }

    fn source_name(&self, record: usize) -> &str {
        self.sources
            .get(self.records[record].source.index())
            .map(|s| s.name.as_str())
            .unwrap_or_default()
    }

    fn definition(&self, record: usize) -> Option<Definition> {
        self.records[record]
            .definition
            .as_ref()
            .map(|text| Definition::new(text.clone(), self.source_name(record)))
    }
}

/// Assign every record to a concept.
///
/// Records whose normalized `main_term` labels are equal or joined by synonym
/// links share a concept. Concept ids follow first-seen record order.
fn group_records(records: &[TermRecord]) -> (Vec<ConceptId>, Vec<Vec<usize>>) {
    let mut labels = LabelSets::default();
    let record_labels: Vec<usize> = records
        .iter()
        .map(|record| labels.intern(normalize(&record.main_term)))
        .collect();

    for (record, &label) in records.iter().zip(&record_labels) {
        for synonym in &record.synonyms {
            let other = labels.intern(normalize(synonym));
            labels.union(label, other);
        }
    }

    let mut concept_of_root: AHashMap<usize, ConceptId> = AHashMap::new();
    let mut members: Vec<Vec<usize>> = Vec::new();
    let mut record_concepts = Vec::with_capacity(records.len());

    for (position, &label) in record_labels.iter().enumerate() {
        let root = labels.find(label);
        let next = ConceptId(members.len() as u32);
        let id = *concept_of_root.entry(root).or_insert(next);
        if id == next {
            members.push(Vec::new());
        }
        members[id.index()].push(position);
        record_concepts.push(id);
    }

    (record_concepts, members)
}

fn build_concept(id: ConceptId, members: &[usize], ranking: &Ranking<'_>) -> Concept {
    let records = ranking.records;
    let label_record = ranking.best(members).unwrap_or(members[0]);
    let label = records[label_record].main_term.clone();
    let label_key = normalize(&label);

    let mut concept = Concept::new(id, label);
    let mut seen_keys = vec![label_key];

    for &member in members {
        let key = normalize(&records[member].main_term);
        if !seen_keys.contains(&key) {
            seen_keys.push(key);
            concept
                .alternate_labels
                .push(records[member].main_term.clone());
        }
        if let Some(definition) = ranking.definition(member) {
            concept.add_definition(definition);
        }
    }

    concept
}

/// Disjoint sets of normalized `main_term` labels.
#[derive(Default)]
struct LabelSets {
    ids: AHashMap<String, usize>,
    parent: Vec<usize>,
}

impl LabelSets {
    fn intern(&mut self, key: String) -> usize {
        if let Some(&id) = self.ids.get(&key) {
            return id;
        }
        let id = self.parent.len();
        self.parent.push(id);
        self.ids.insert(key, id);
        id
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Join two sets, keeping the earlier-interned root.
    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            let (root, child) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[child] = root;
        }
    }
}
