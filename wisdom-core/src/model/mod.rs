//! Top-level module for the Markov passage generation system.
//!
//! This crate provides a word-level order-2 Markov text generator, including:
//! - Sentence and phrase tokenization (`Tokenizer`)
//! - Context-to-followers link table and casing table (`LinkTable`, `FormTable`)
//! - The corpus model and sentence generator (`Corpus`)
//! - Verse and passage assembly with line wrapping (`Assembler`)

/// Corpus model owning the source text and the lazily built tables.
///
/// Exposes the explicit build step, next-word and can-end lookups, and
/// bounded sentence generation with retry on overrun.
pub mod corpus;

/// Link table and form table built from the corpus.
///
/// Maps a two-word context to the set of observed followers (including the
/// end-of-sentence sentinel) and remembers first-seen original casings.
pub mod link_table;

/// Verse and passage assembly on top of sentence generation.
///
/// Resolves fixed-or-ranged size parameters and re-flows generated words
/// into fixed-width display lines.
pub mod passage;

/// Sentence splitting and phrase extraction.
///
/// Owns the compiled patterns for end punctuation, whitespace runs and
/// word characters, built once at configuration time.
pub mod tokenizer;
