//! The vocabulary index.
//!
//! The index is built once from the loaded sources and never mutated. It maps
//! every normalized alias to exactly one [`concept::Concept`] and owns the
//! multi-pattern automaton used by the matcher.
//!
//! Construction resolves naming collisions between sources:
//!
//! 1. An alias registered under a single `main_term` resolves to that concept.
//! 2. `main_term` labels joined by source-declared synonym links form one
//!    concept. Otherwise an alias registered under several concepts resolves to
//!    the concept of the highest-priority registering source (ties go to the
//!    source loaded first), and the losing records' definitions are attached to
//!    the winner.
//! 3. Aliases and labels are compared case-insensitively with whitespace
//!    collapsed.

pub mod builder;
pub mod concept;
pub mod index;

pub use builder::VocabularyBuilder;
pub use concept::{Concept, ConceptId, Definition};
pub use index::{VocabularyIndex, VocabularyStats};
