//! Glossary source loading.
//!
//! A glossary source is one JSON file contributing term entries. The loader
//! turns raw entries from every source into uniform [`record::TermRecord`]s,
//! dropping malformed entries with a recorded warning instead of failing.

pub mod loader;
pub mod record;

pub use loader::{LoadedSources, SourceLoader};
pub use record::{GlossarySource, LoadWarning, RawEntry, SourceId, TermRecord};
