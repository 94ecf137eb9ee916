use std::error::Error;
use std::str::FromStr;

use rand::Rng;

use crate::model::corpus::Corpus;

/// A size parameter: either a fixed count or an inclusive random range,
/// resolved once per invocation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Count {
	Fixed(usize),
	Range(usize, usize),
}

impl Count {
	/// Resolves the count, drawing once from the range if needed.
	///
	/// # Errors
	/// Returns an error for an empty range (`lo > hi`).
	pub fn resolve<R: Rng>(&self, rng: &mut R) -> Result<usize, String> {
		match *self {
			Count::Fixed(n) => Ok(n),
			Count::Range(lo, hi) => {
				if lo > hi {
					return Err(format!("empty count range: {lo} > {hi}"));
				}
				Ok(rng.random_range(lo..=hi))
			}
		}
	}

	/// The inclusive `(min, max)` bounds this count spans.
	pub fn bounds(&self) -> (usize, usize) {
		match *self {
			Count::Fixed(n) => (n, n),
			Count::Range(lo, hi) => (lo, hi),
		}
	}
}

impl FromStr for Count {
	type Err = String;

	/// Parses `"N"` as a fixed count and `"N-M"` as an inclusive range.
	fn from_str(s: &str) -> Result<Self, String> {
		if let Some((lo, hi)) = s.split_once('-') {
			let lo = lo.trim().parse::<usize>().map_err(|_| format!("invalid count range {s:?}"))?;
			let hi = hi.trim().parse::<usize>().map_err(|_| format!("invalid count range {s:?}"))?;
			if lo > hi {
				return Err(format!("empty count range {s:?}: {lo} > {hi}"));
			}
			Ok(Count::Range(lo, hi))
		} else {
			s.trim().parse::<usize>().map(Count::Fixed).map_err(|_| format!("invalid count {s:?}"))
		}
	}
}

/// Shape parameters for an assembled passage.
///
/// Defaults to 3-6 verses of 2-5 sentences of 5-20 words, wrapped at
/// 40 columns.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PassageInput {
	/// Verses per passage.
	pub verses: Count,
	/// Sentences per verse.
	pub sentences: Count,
	/// Words per sentence; the bounds become the sentence generator's
	/// `min` and `max`.
	pub words: Count,
	/// Wrap width in columns; 0 disables wrapping.
	pub width: usize,
}

impl Default for PassageInput {
	fn default() -> Self {
		Self {
			verses: Count::Range(3, 6),
			sentences: Count::Range(2, 5),
			words: Count::Range(5, 20),
			width: 40,
		}
	}
}

/// Arranges generated sentences into verses and wrapped passages.
///
/// # Responsibilities
/// - Resolve the fixed-or-ranged shape parameters, once per passage
/// - Flatten each verse's sentences into a word stream and re-flow it
///   into fixed-width display lines
/// - Separate verses with a single blank line
#[derive(Clone, Debug)]
pub struct Assembler {
	input: PassageInput,
}

impl Assembler {
	pub fn new(input: PassageInput) -> Self {
		Self { input }
	}

	pub fn input(&self) -> &PassageInput {
		&self.input
	}

	/// The words of one freshly generated verse, sentence punctuation
	/// attached to its words.
	fn verse_words<R: Rng>(&self, corpus: &mut Corpus, rng: &mut R) -> Result<Vec<String>, Box<dyn Error>> {
		let count = self.input.sentences.resolve(rng)?;
		let (min, max) = self.input.words.bounds();
		let mut words = Vec::new();
		for _ in 0..count {
			let sentence = corpus.sentence(min, max, rng)?;
			words.extend(sentence.split_whitespace().map(str::to_owned));
		}
		Ok(words)
	}

	/// Generates and renders one whole passage.
	///
	/// Each verse is wrapped at the configured width (or left as a single
	/// line when the width is 0); verses are separated by a blank line.
	/// The result carries no trailing newline.
	pub fn passage<R: Rng>(&self, corpus: &mut Corpus, rng: &mut R) -> Result<String, Box<dyn Error>> {
		let verses = self.input.verses.resolve(rng)?;
		let mut rendered = Vec::with_capacity(verses);
		for _ in 0..verses {
			let words = self.verse_words(corpus, rng)?;
			rendered.push(if self.input.width > 0 {
				wrapped_lines(&words, self.input.width).join("\n")
			} else {
				words.join(" ")
			});
		}
		Ok(rendered.join("\n\n"))
	}
}

/// Greedy word-wrap: words are appended to the current line while it fits
/// the width; a word that would not fit starts the next line.
///
/// A single word longer than the width occupies its own line unmodified,
/// so a line only ever exceeds the width when one word alone does.
pub fn wrapped_lines(words: &[String], width: usize) -> Vec<String> {
	let mut lines = Vec::new();
	let mut line = String::new();
	for word in words {
		if line.is_empty() {
			line.push_str(word);
		} else if line.chars().count() + 1 + word.chars().count() > width {
			lines.push(std::mem::take(&mut line));
			line.push_str(word);
		} else {
			line.push(' ');
			line.push_str(word);
		}
	}
	if !line.is_empty() {
		lines.push(line);
	}
	lines
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::corpus::Corpus;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn words(list: &[&str]) -> Vec<String> {
		list.iter().map(|w| w.to_string()).collect()
	}

	#[test]
	fn parses_fixed_counts_and_ranges() {
		assert_eq!("7".parse::<Count>(), Ok(Count::Fixed(7)));
		assert_eq!("3-6".parse::<Count>(), Ok(Count::Range(3, 6)));
		assert!("6-3".parse::<Count>().is_err());
		assert!("x".parse::<Count>().is_err());
		assert!("3-".parse::<Count>().is_err());
		assert!("".parse::<Count>().is_err());
	}

	#[test]
	fn resolves_within_bounds() {
		let mut rng = StdRng::seed_from_u64(42);
		assert_eq!(Count::Fixed(4).resolve(&mut rng).unwrap(), 4);
		for _ in 0..50 {
			let n = Count::Range(2, 5).resolve(&mut rng).unwrap();
			assert!((2..=5).contains(&n));
		}
		assert!(Count::Range(5, 2).resolve(&mut rng).is_err());
	}

	#[test]
	fn wrap_respects_the_width() {
		let lines = wrapped_lines(&words(&["aa", "bb", "cc", "dd", "ee"]), 8);
		assert_eq!(lines, vec!["aa bb cc", "dd ee"]);
		for line in &lines {
			assert!(line.chars().count() <= 8);
		}
	}

	#[test]
	fn exact_fit_stays_on_one_line() {
		assert_eq!(wrapped_lines(&words(&["ab", "cd"]), 5), vec!["ab cd"]);
	}

	#[test]
	fn oversized_word_gets_its_own_line() {
		let lines = wrapped_lines(&words(&["a", "incomprehensibilities", "b"]), 5);
		assert_eq!(lines, vec!["a", "incomprehensibilities", "b"]);
	}

	#[test]
	fn no_words_give_no_lines() {
		assert!(wrapped_lines(&[], 10).is_empty());
	}

	#[test]
	fn plain_passage_joins_each_verse_on_one_line() {
		let mut corpus = Corpus::from_reader("one two three four five.".as_bytes()).unwrap();
		let input = PassageInput {
			verses: Count::Fixed(2),
			sentences: Count::Fixed(2),
			words: Count::Fixed(5),
			width: 0,
		};
		let mut rng = StdRng::seed_from_u64(42);
		let passage = Assembler::new(input).passage(&mut corpus, &mut rng).unwrap();
		let verse = "One two three four five. One two three four five.";
		assert_eq!(passage, format!("{verse}\n\n{verse}"));
	}

	#[test]
	fn wrapped_passage_keeps_lines_within_width() {
		let mut corpus = Corpus::from_reader("one two three four five.".as_bytes()).unwrap();
		let input = PassageInput {
			verses: Count::Fixed(2),
			sentences: Count::Fixed(2),
			words: Count::Fixed(5),
			width: 12,
		};
		let mut rng = StdRng::seed_from_u64(42);
		let passage = Assembler::new(input).passage(&mut corpus, &mut rng).unwrap();
		assert_eq!(passage.matches("\n\n").count(), 1);
		for line in passage.lines().filter(|line| !line.is_empty()) {
			assert!(line.chars().count() <= 12, "line too wide: {line:?}");
		}
	}
}
