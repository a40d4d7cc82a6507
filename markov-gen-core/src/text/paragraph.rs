/// Lazy iterator over the paragraphs of a sequence of lines.
///
/// Lines are accumulated, separated by a single space, until a line that is
/// blank once trimmed. The accumulated paragraph is then yielded if it is
/// not empty. Repeated blank lines are no-ops.
///
/// A last paragraph that is not followed by a blank line is dropped: only
/// terminated paragraphs are produced.
pub struct Paragraphs<I> {
	lines: I,
	buffer: String,
}

impl<I, S> Paragraphs<I>
where
	I: Iterator<Item = S>,
	S: AsRef<str>,
{
	pub fn new(lines: I) -> Self {
		Self { lines, buffer: String::new() }
	}
}

impl<I, S> Iterator for Paragraphs<I>
where
	I: Iterator<Item = S>,
	S: AsRef<str>,
{
	type Item = String;

	fn next(&mut self) -> Option<String> {
		for line in self.lines.by_ref() {
			let line = line.as_ref();
			if line.trim().is_empty() {
				if !self.buffer.is_empty() {
					return Some(std::mem::take(&mut self.buffer));
				}
			} else {
				if !self.buffer.is_empty() {
					self.buffer.push(' ');
				}
				self.buffer.push_str(line);
			}
		}
		// Unterminated trailing paragraph
		None
	}
}

/// Builds a `Paragraphs` iterator from anything iterable over lines.
pub fn paragraphs<L, S>(lines: L) -> Paragraphs<L::IntoIter>
where
	L: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	Paragraphs::new(lines.into_iter())
}
