use std::collections::HashMap;

use rand::Rng;

use super::sampler;

/// Successors observed after one context of the chain.
///
/// A `State` is a node of the Markov chain: its outgoing edges are the
/// tokens that followed the context in the source text, weighted by how
/// many times they were observed.
///
/// ## Responsibilities:
/// - Accumulate transition occurrences during ingestion
/// - Predict the next token using weighted random sampling
/// - Merge with the state of the same context from another table
///
/// ## Invariants
/// - Each transition occurrence count is strictly positive
/// - Transitions are kept in first-insertion order, so a given random
///   draw always selects the same token
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct State {
	/// Outgoing transitions in first-insertion order.
	/// Example: [("the", 42), ("a", 3)]
	transitions: Vec<(String, usize)>,
	/// Position of each token in `transitions`.
	index: HashMap<String, usize>,
}

impl State {
	/// Creates a new state without transitions.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records `occurrence` observations of a transition toward `token`.
	fn add_occurrences(&mut self, token: &str, occurrence: usize) {
		match self.index.get(token) {
			Some(&position) => self.transitions[position].1 += occurrence,
			None => {
				self.index.insert(token.to_owned(), self.transitions.len());
				self.transitions.push((token.to_owned(), occurrence));
			}
		}
	}

	/// Records an occurrence of a transition toward `token`.
	///
	/// - If the transition already exists, its occurrence count is increased.
	/// - Otherwise, a new transition is appended with an initial count of 1.
	pub fn add_transition(&mut self, token: &str) {
		self.add_occurrences(token, 1);
	}

	/// Number of times `token` followed this context.
	pub fn count(&self, token: &str) -> usize {
		self.index
			.get(token)
			.map_or(0, |&position| self.transitions[position].1)
	}

	/// Transitions with their counts, in first-insertion order.
	pub fn transitions(&self) -> &[(String, usize)] {
		&self.transitions
	}

	/// Total number of observations.
	pub fn total(&self) -> usize {
		self.transitions.iter().map(|(_, occurrence)| occurrence).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.transitions.is_empty()
	}

	/// Predicts the next token using weighted random sampling.
	///
	/// Returns `None` if the state has no transitions.
	pub fn predict<R: Rng>(&self, rng: &mut R) -> Option<&str> {
		sampler::choice(&self.transitions, rng).map(String::as_str)
	}

	/// Merges another state into this one.
	///
	/// Occurrence counts are summed. Tokens unknown to `self` are appended
	/// in the order `other` first saw them.
	pub fn merge(&mut self, other: &Self) {
		for (token, occurrence) in &other.transitions {
			self.add_occurrences(token, *occurrence);
		}
	}
}
