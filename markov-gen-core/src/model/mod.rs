//! Top-level module for the Markov chain.
//!
//! This module provides a word-level Markov chain, including:
//! - Weighted sampling over observed counts (`sampler`)
//! - Successor counts of a single context (`State`)
//! - The fixed-order frequency table (`FrequencyTable`)
//! - Token sequence generation with paragraph restarts (`Generator`)
//! - The model owning all of the above (`MarkovChain`)

/// Weighted random choice over `(item, weight)` pairs.
///
/// Split into a deterministic scan (`pick`) and a random draw (`choice`)
/// so generation can be reproduced with a seeded RNG.
pub mod sampler;

/// Successors observed after one context, with their occurrence counts.
///
/// Keeps first-insertion order so sampling is reproducible.
pub mod state;

/// Fixed-order frequency table mapping contexts to states.
///
/// Handles paragraph ingestion, successor lookup and table merging.
pub mod table;

/// Drives the sampler against a table to produce token sequences.
pub mod generator;

/// The Markov chain model: ingestion from lines, files or in parallel,
/// and text generation.
pub mod chain;

pub use chain::{ChainStats, MarkovChain};
pub use generator::Generator;
pub use state::State;
pub use table::{Context, FrequencyTable};
