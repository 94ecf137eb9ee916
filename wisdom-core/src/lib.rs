//! Order-2 Markov passage generation library.
//!
//! This crate builds a statistical model of which words follow which
//! two-word contexts in a source text, then uses it to synthesize:
//! - Word-level Markov models with sentence-boundary sentinels
//! - Grammatically plausible sentences with bounded word counts
//! - Multi-verse passages wrapped to a fixed display width
//!
//! Only the high-level API is exposed publicly. Low-level components
//! are kept internal to ensure consistency and prevent misuse.

/// Core corpus model and generation logic.
///
/// This module exposes the tokenizer, the link table, the corpus model
/// and the passage assembler.
pub mod model;

/// I/O utilities (corpus source reading).
///
/// Not exposed
pub(crate) mod io;
