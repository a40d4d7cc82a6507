use std::collections::HashMap;

use rand::Rng;

use super::state::State;
use crate::text::tokenize;

/// The `order` most recent tokens, oldest first.
///
/// `None` is the start marker padding the beginning of each paragraph. It
/// is distinct from every real token, including the empty one.
pub type Context = Vec<Option<String>>;

/// Drops the oldest element of `context` and appends `token`.
pub(crate) fn slide(context: &mut Context, token: &str) {
	context.remove(0);
	context.push(Some(token.to_owned()));
}

/// Frequency table of a word-level Markov chain.
///
/// The `FrequencyTable` maps every context of `order` tokens seen during
/// ingestion to the `State` holding its successors.
///
/// # Responsibilities
/// - Ingest paragraphs, restarting the context at each one
/// - Accumulate successor counts for each context
/// - Predict the next token for a context
/// - Merge with another table of the same order
///
/// # Invariants
/// - `order` is always >= 1 and never changes
/// - Every key of `states` has exactly `order` elements
/// - Counts only ever increase
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
	/// Number of tokens in a context.
	order: usize,

	/// Mapping from a context to its successors.
	states: HashMap<Context, State>,
}

impl FrequencyTable {
	/// Creates an empty table of the given order.
	///
	/// # Errors
	/// Returns an error if `order < 1`.
	pub fn new(order: usize) -> Result<Self, String> {
		if order < 1 {
			return Err("order must be >= 1".to_owned());
		}
		Ok(Self::with_order(order))
	}

	/// Creates an empty table for an already validated order.
	pub(crate) fn with_order(order: usize) -> Self {
		Self { order, states: HashMap::new() }
	}

	pub fn order(&self) -> usize {
		self.order
	}

	/// A context made only of start markers.
	pub fn start_context(&self) -> Context {
		vec![None; self.order]
	}

	/// Records one occurrence of `token` after `context`.
	pub fn add(&mut self, context: &[Option<String>], token: &str) {
		debug_assert_eq!(context.len(), self.order);
		match self.states.get_mut(context) {
			Some(state) => state.add_transition(token),
			None => {
				let mut state = State::new();
				state.add_transition(token);
				self.states.insert(context.to_vec(), state);
			}
		}
	}

	/// Adds every transition of one paragraph.
	///
	/// The context starts as `order` start markers, so nothing from a
	/// previous paragraph leaks into this one.
	pub fn add_paragraph(&mut self, paragraph: &str) {
		let mut context = self.start_context();
		for token in tokenize(paragraph) {
			self.add(&context, &token);
			slide(&mut context, &token);
		}
	}

	/// Successors of a context, if it was ever observed.
	pub fn get(&self, context: &[Option<String>]) -> Option<&State> {
		self.states.get(context)
	}

	/// Number of times `token` followed `context`.
	pub fn count(&self, context: &[Option<String>], token: &str) -> usize {
		self.get(context).map_or(0, |state| state.count(token))
	}

	/// Predicts the next token after `context`.
	///
	/// Returns `None` for a dead end: an unknown context, or one without
	/// successors.
	pub fn predict<R: Rng>(&self, context: &[Option<String>], rng: &mut R) -> Option<&str> {
		self.get(context)?.predict(rng)
	}

	/// All observed contexts, in no particular order.
	pub fn contexts(&self) -> impl Iterator<Item = &Context> {
		self.states.keys()
	}

	/// Number of distinct contexts.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Total number of recorded transitions.
	pub fn observations(&self) -> usize {
		self.states.values().map(State::total).sum()
	}

	/// Merges another table into this one.
	///
	/// # Notes
	/// - Both tables must have the same `order`.
	/// - Counts of matching contexts and successors are summed.
	/// - Merging partial tables in source order gives the same table,
	///   successor order included, as ingesting the sources sequentially.
	///
	/// # Errors
	/// Returns an error if the orders do not match.
	pub fn merge(&mut self, other: &Self) -> Result<(), String> {
		if self.order != other.order {
			return Err(format!("Order mismatch: self={}, other={}", self.order, other.order));
		}

		for (context, state) in &other.states {
			if let Some(existing) = self.states.get_mut(context) {
				existing.merge(state);
			} else {
				self.states.insert(context.clone(), state.clone());
			}
		}

		Ok(())
	}
}
