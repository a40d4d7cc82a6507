//! Word-level Markov chain text generation library.
//!
//! This crate provides a small statistical language model including:
//! - Paragraph splitting and word/punctuation tokenization
//! - A fixed-order n-gram frequency table with first-insertion ordering
//! - Weighted random sampling over successor counts
//! - Generation with paragraph restarts on dead ends, and detokenization
//!
//! Text processing helpers are public so callers can inspect what the
//! chain learns. File helpers are public for the binaries of the workspace.

/// Markov chain model, frequency table and sampling.
///
/// This module exposes the chain interface (`MarkovChain`) together with
/// the table it owns and the weighted sampler it draws from.
pub mod model;

/// Text processing: paragraphs, tokens and their reassembly.
pub mod text;

/// I/O utilities (file loading, folder listing).
pub mod io;
