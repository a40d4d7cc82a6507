use rand::Rng;

/// Selects an item from a weighted set for a given draw.
///
/// Performs a cumulative scan in iteration order: the draw is decreased by
/// each weight and the first item at which it would become negative is
/// returned. For `draw` in `[0, total)` an item is always found.
///
/// Returns `None` if `draw` is not below the total weight, which includes
/// empty and all-zero sets.
pub fn pick<T>(weighted_set: &[(T, usize)], mut draw: usize) -> Option<&T> {
	for (item, weight) in weighted_set {
		if draw < *weight {
			return Some(item);
		}
		draw -= weight;
	}
	None
}

/// Returns one random item from a weighted set.
///
/// The probability of selecting an item is proportional to its weight.
/// Returns `None` if the total weight is zero: this is the dead-end signal
/// of the generator, not an error.
pub fn choice<'a, T, R: Rng>(weighted_set: &'a [(T, usize)], rng: &mut R) -> Option<&'a T> {
	let total: usize = weighted_set.iter().map(|(_, weight)| weight).sum();
	if total == 0 {
		return None;
	}

	pick(weighted_set, rng.random_range(0..total))
}
