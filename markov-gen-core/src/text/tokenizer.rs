/// Punctuation marks emitted as standalone tokens, in the order they are
/// checked against the end of a chunk.
pub const PUNCTUATION: [&str; 5] = [":", ";", "!", ",", "."];

/// The punctuation marks as one string, in `PUNCTUATION` order.
const PUNCTUATION_RUN: &str = ":;!,.";

/// Returns `true` if the token attaches to the previous one without a space.
///
/// A token attaches when it is a contiguous run of `":;!,."`: a single mark,
/// a run such as `";!"` left by stripping the last mark of `";!."`, or the
/// empty token left by a chunk made only of punctuation and quotes.
pub fn is_punctuation(token: &str) -> bool {
	PUNCTUATION_RUN.contains(token)
}

/// Splits one whitespace-delimited chunk into its clause parts.
///
/// - A chunk containing `--` is split on every `--`, the pieces are rejoined
///   with `" -- "` and split again on whitespace. The dash survives as its
///   own `--` part.
/// - Otherwise, a chunk ending with one of `PUNCTUATION` gives two parts:
///   the chunk with that symbol trimmed from both ends, then the symbol.
/// - Any other chunk is returned unchanged.
pub fn clause_parts(chunk: &str) -> Vec<String> {
	if chunk.contains("--") {
		return chunk
			.split("--")
			.collect::<Vec<_>>()
			.join(" -- ")
			.split_whitespace()
			.map(str::to_owned)
			.collect();
	}

	for symbol in PUNCTUATION {
		if chunk.ends_with(symbol) {
			return vec![chunk.trim_matches(|c: char| symbol.contains(c)).to_owned(), symbol.to_owned()];
		}
	}

	vec![chunk.to_owned()]
}

/// Strips leading and trailing double quotes.
pub fn simplify(word: &str) -> &str {
	word.trim_matches('"')
}

/// Tokenizes one paragraph into words and punctuation marks.
///
/// The returned iterator is lazy and borrows the paragraph; calling
/// `tokenize` again restarts from the beginning.
pub fn tokenize(paragraph: &str) -> impl Iterator<Item = String> + '_ {
	paragraph
		.split_whitespace()
		.flat_map(clause_parts)
		.map(|word| simplify(&word).to_owned())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tokens(paragraph: &str) -> Vec<String> {
		tokenize(paragraph).collect()
	}

	#[test]
	fn trailing_punctuation_is_split_off() {
		assert_eq!(tokens("hello."), vec!["hello", "."]);
		assert_eq!(tokens("Well, then: go!"), vec!["Well", ",", "then", ":", "go", "!"]);
	}

	#[test]
	fn repeated_symbol_is_stripped_entirely() {
		assert_eq!(tokens("wait..."), vec!["wait", "."]);
		// Strip-characters semantics also trims the front of the chunk
		assert_eq!(tokens(".hidden."), vec!["hidden", "."]);
	}

	#[test]
	fn only_the_final_symbol_is_extracted() {
		assert_eq!(tokens("what?!"), vec!["what?", "!"]);
		assert_eq!(tokens("odd;."), vec!["odd;", "."]);
	}

	#[test]
	fn dash_compounds_become_three_tokens() {
		assert_eq!(tokens("well--actually"), vec!["well", "--", "actually"]);
		assert_eq!(tokens("a--b--c"), vec!["a", "--", "b", "--", "c"]);
		assert_eq!(tokens("ends--"), vec!["ends", "--"]);
	}

	#[test]
	fn dash_path_skips_punctuation_extraction() {
		assert_eq!(tokens("so--there."), vec!["so", "--", "there."]);
	}

	#[test]
	fn quotes_are_stripped_from_tokens() {
		assert_eq!(tokens("\"Hello,\" she said."), vec!["Hello,", "she", "said", "."]);
		assert_eq!(tokens("\"quoted\""), vec!["quoted"]);
		assert_eq!(tokens("\"open"), vec!["open"]);
	}

	#[test]
	fn punctuation_only_chunk_yields_empty_token() {
		assert_eq!(tokens("..."), vec!["", "."]);
	}

	#[test]
	fn tokenize_is_restartable() {
		let paragraph = "one two. three";
		assert_eq!(tokens(paragraph), tokens(paragraph));
		assert_eq!(tokenize(paragraph).count(), 4);
	}

	#[test]
	fn punctuation_set_membership() {
		for symbol in PUNCTUATION {
			assert!(is_punctuation(symbol));
		}
		assert!(is_punctuation(""));
		assert!(is_punctuation(";!"));
		assert!(is_punctuation(":;!,."));
		assert!(!is_punctuation("!;"));
		assert!(!is_punctuation("--"));
		assert!(!is_punctuation("word"));
		assert!(!is_punctuation("?"));
	}
}
