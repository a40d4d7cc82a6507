use rand::Rng;

use super::table::{slide, FrequencyTable};
use crate::text::join;

/// Separator inserted between generated paragraphs.
pub const PARAGRAPH_BREAK: &str = "\n\n";

/// Produces token sequences from a frequency table.
///
/// # Responsibilities
/// - Walk the table from the start context, one weighted draw per token
/// - Start a new paragraph on each dead end, from a fresh start context
/// - Reassemble the paragraphs into a single string
///
/// Generation only reads the table: any number of generators may share it.
#[derive(Clone, Copy, Debug)]
pub struct Generator<'a> {
	table: &'a FrequencyTable,
}

impl<'a> Generator<'a> {
	pub fn new(table: &'a FrequencyTable) -> Self {
		Self { table }
	}

	/// Generates exactly `length` tokens, grouped by paragraph.
	///
	/// Each dead end closes the current paragraph and restarts from the
	/// start context. The total number of tokens across all paragraphs is
	/// always `length`; `length == 0` gives a single empty paragraph.
	///
	/// # Errors
	/// Returns an error if the start context itself is a dead end while
	/// tokens are still requested (nothing was ingested), since no restart
	/// could ever make progress.
	pub fn segments<R: Rng>(&self, length: usize, rng: &mut R) -> Result<Vec<Vec<String>>, String> {
		let mut segments = Vec::new();
		let mut current: Vec<String> = Vec::new();
		let mut context = self.table.start_context();
		let mut collected = 0;

		while collected < length {
			match self.table.predict(&context, rng) {
				Some(word) => {
					current.push(word.to_owned());
					slide(&mut context, word);
					collected += 1;
				}
				None if current.is_empty() => {
					return Err("No continuation for the start context, the chain is empty".to_owned());
				}
				None => {
					log::trace!("Dead end after {} tokens, starting a new paragraph", collected);
					segments.push(std::mem::take(&mut current));
					context = self.table.start_context();
				}
			}
		}

		segments.push(current);
		Ok(segments)
	}

	/// Generates `length` tokens as readable text.
	///
	/// Paragraphs are detokenized separately and joined with
	/// `PARAGRAPH_BREAK`.
	pub fn generate<R: Rng>(&self, length: usize, rng: &mut R) -> Result<String, String> {
		let segments = self.segments(length, rng)?;
		Ok(segments
			.iter()
			.map(|segment| join(segment))
			.collect::<Vec<_>>()
			.join(PARAGRAPH_BREAK))
	}
}
