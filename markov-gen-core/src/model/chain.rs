use std::path::Path;
use std::sync::mpsc;
use std::thread;

use rand::Rng;
use serde::Serialize;

use super::generator::Generator;
use super::table::FrequencyTable;
use crate::io::{get_filename, read_file};
use crate::text::paragraphs;

/// Default number of tokens in a context.
pub const DEFAULT_ORDER: usize = 3;

/// Worker chunks spawned per CPU by `ingest_parallel`.
const CHUNKS_PER_CPU: usize = 8;

/// Summary of what a chain has learned.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ChainStats {
	pub order: usize,
	pub contexts: usize,
	pub observations: usize,
	pub sources: Vec<String>,
}

/// A word-level Markov chain: keeps a statistical model of input text and
/// produces output on demand.
///
/// This struct manages:
/// - `table`: the frequency table, whose order is fixed at construction.
/// - `sources`: names of the files ingested so far, one entry per ingestion.
///
/// The chain is built once, grows with every ingestion call, and can
/// generate any number of times. Generation never mutates it.
#[derive(Clone, Debug)]
pub struct MarkovChain {
	table: FrequencyTable,
	sources: Vec<String>,
}

impl Default for MarkovChain {
	/// Returns an empty chain of order `DEFAULT_ORDER`.
	fn default() -> Self {
		Self { table: FrequencyTable::with_order(DEFAULT_ORDER), sources: Vec::new() }
	}
}

impl MarkovChain {
	/// Creates an empty chain.
	///
	/// # Errors
	/// Returns an error if `order < 1`.
	pub fn new(order: usize) -> Result<Self, String> {
		Ok(Self { table: FrequencyTable::new(order)?, sources: Vec::new() })
	}

	pub fn order(&self) -> usize {
		self.table.order()
	}

	/// Read-only access to the frequency table.
	pub fn table(&self) -> &FrequencyTable {
		&self.table
	}

	/// Names of the ingested files, in ingestion order.
	///
	/// A file ingested several times appears several times.
	pub fn sources(&self) -> &[String] {
		&self.sources
	}

	pub fn stats(&self) -> ChainStats {
		ChainStats {
			order: self.order(),
			contexts: self.table.len(),
			observations: self.table.observations(),
			sources: self.sources.clone(),
		}
	}

	/// Ingests one paragraph.
	pub fn ingest_paragraph(&mut self, paragraph: &str) {
		self.table.add_paragraph(paragraph);
	}

	/// Ingests a sequence of lines.
	///
	/// Lines are grouped into paragraphs; each paragraph restarts from the
	/// start context. Counts add up across calls, so ingesting the same
	/// text twice doubles every count.
	pub fn ingest<L, S>(&mut self, lines: L)
	where
		L: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut count = 0;
		for paragraph in paragraphs(lines) {
			self.table.add_paragraph(&paragraph);
			count += 1;
		}
		log::debug!("Ingested {} paragraphs, {} contexts known", count, self.table.len());
	}

	/// Ingests a sequence of lines using worker threads.
	///
	/// # Behavior
	/// - Splits the lines into paragraphs.
	/// - Splits paragraphs into chunks (based on CPU cores * factor).
	/// - Spawns threads to build a partial table for each chunk.
	/// - Merges the partial tables in chunk order.
	///
	/// The resulting table is identical to the one `ingest` would build,
	/// successor order included.
	///
	/// # Errors
	/// Returns an error if a worker thread fails.
	pub fn ingest_parallel<L, S>(&mut self, lines: L) -> Result<(), String>
	where
		L: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let all: Vec<String> = paragraphs(lines).collect();
		if all.is_empty() {
			return Ok(());
		}

		let chunks = num_cpus::get() * CHUNKS_PER_CPU;
		let chunk_size = all.len().div_ceil(chunks);
		let order = self.order();

		let (tx, rx) = mpsc::channel();
		let mut spawned = 0;
		let mut remaining = all.into_iter();
		loop {
			let chunk: Vec<String> = remaining.by_ref().take(chunk_size).collect();
			if chunk.is_empty() {
				break;
			}

			let tx = tx.clone();
			let index = spawned;
			thread::spawn(move || {
				let mut partial = FrequencyTable::with_order(order);
				for paragraph in &chunk {
					partial.add_paragraph(paragraph);
				}
				// The receiver is alive until every chunk is collected
				let _ = tx.send((index, partial));
			});
			spawned += 1;
		}
		drop(tx);

		let mut partials: Vec<(usize, FrequencyTable)> = rx.iter().collect();
		if partials.len() != spawned {
			return Err(format!("{} of {} ingestion workers failed", spawned - partials.len(), spawned));
		}
		partials.sort_by_key(|(index, _)| *index);

		for (_, partial) in &partials {
			self.table.merge(partial)?;
		}
		log::debug!("Merged {} partial tables, {} contexts known", spawned, self.table.len());

		Ok(())
	}

	/// Reads a UTF-8 text file and ingests it.
	///
	/// The file name (without extension) is recorded in `sources`.
	///
	/// # Errors
	/// Returns an error if the file cannot be read or decoded. Nothing is
	/// ingested in that case.
	pub fn ingest_file<P: AsRef<Path>>(&mut self, filepath: P) -> Result<(), Box<dyn std::error::Error>> {
		let name = get_filename(&filepath)?;
		let lines = read_file(&filepath)?;
		self.ingest_parallel(lines)?;
		log::info!("Ingested source '{}' ({} contexts known)", name, self.table.len());
		self.sources.push(name);
		Ok(())
	}

	/// Gets the next (random) token following `context`.
	///
	/// Returns `None` if the context has no known successor.
	pub fn get<R: Rng>(&self, context: &[Option<String>], rng: &mut R) -> Option<&str> {
		self.table.predict(context, rng)
	}

	/// Generates `length` tokens grouped by paragraph.
	///
	/// See `Generator::segments`.
	pub fn generate_segments<R: Rng>(&self, length: usize, rng: &mut R) -> Result<Vec<Vec<String>>, String> {
		Generator::new(&self.table).segments(length, rng)
	}

	/// Generates `length` tokens as text, paragraphs separated by a blank
	/// line.
	///
	/// # Errors
	/// Returns an error if tokens are requested from an empty chain.
	pub fn generate<R: Rng>(&self, length: usize, rng: &mut R) -> Result<String, String> {
		Generator::new(&self.table).generate(length, rng)
	}

	/// Same as `generate`, using the thread-local RNG.
	pub fn output(&self, length: usize) -> Result<String, String> {
		self.generate(length, &mut rand::rng())
	}

	/// Merges another chain into this one.
	///
	/// # Errors
	/// Returns an error if the orders do not match.
	pub fn merge(&mut self, other: &Self) -> Result<(), String> {
		self.table.merge(&other.table)?;
		self.sources.extend(other.sources.iter().cloned());
		Ok(())
	}
}
