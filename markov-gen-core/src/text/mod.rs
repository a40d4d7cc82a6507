//! Text processing around the chain.
//!
//! Raw lines go through the paragraph splitter, then the tokenizer, before
//! reaching the frequency table. Generated tokens come back out through the
//! detokenizer.

/// Segments lines into paragraphs (maximal runs of non-blank lines).
pub mod paragraph;

/// Splits a paragraph into normalized word and punctuation tokens.
pub mod tokenizer;

/// Reassembles tokens into readable prose.
pub mod detokenizer;

pub use detokenizer::join;
pub use paragraph::{paragraphs, Paragraphs};
pub use tokenizer::{is_punctuation, tokenize, PUNCTUATION};
