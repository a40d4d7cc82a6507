use super::tokenizer::is_punctuation;

/// Joins tokens back into a phrase.
///
/// Punctuation is appended directly; every other token is preceded by a
/// single space, so a non-empty result starts with a space. No
/// capitalization or final period is added.
pub fn join<S: AsRef<str>>(words: &[S]) -> String {
	let mut phrase = String::new();
	for word in words {
		let word = word.as_ref();
		if !is_punctuation(word) {
			phrase.push(' ');
		}
		phrase.push_str(word);
	}
	phrase
}
