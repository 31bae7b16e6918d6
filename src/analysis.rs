//! Text analysis module for medterm.
//!
//! This module provides the normalization shared by index construction and
//! matching: case folding, whitespace collapsing, alias generation from glossary
//! terms, and a folded view of input text that remembers where every folded byte
//! came from in the original.

pub mod alias;
pub mod folded;
pub mod normalize;
