use std::collections::VecDeque;
use std::error::Error;

use regex::Regex;

/// Character classes used by the tokenizer, as raw regex class fragments.
///
/// `end_punc` is the body of a character class marking sentence ends;
/// `word_char` is a full character class matching word characters.
#[derive(Clone, Debug)]
pub struct TokenizerConfig {
	/// Sentence-terminating characters, e.g. `\.;:?!`.
	pub end_punc: String,
	/// Word character class, e.g. `[\w\-']`.
	pub word_char: String,
}

impl Default for TokenizerConfig {
	fn default() -> Self {
		Self {
			end_punc: r"\.;:?!".to_owned(),
			word_char: r"[\w\-']".to_owned(),
		}
	}
}

/// Splits raw text into sentences and sentences into word phrases.
///
/// # Responsibilities
/// - Split a stream of text chunks into complete, whitespace-normalized sentences
/// - Extract fixed-size sliding windows of words from one sentence, with
///   optional boundary-sentinel padding at either end
/// - Find the words of a sentence for casing bookkeeping
///
/// # Invariants
/// - All patterns are compiled once, at construction time
/// - Phrases never cross sentence boundaries
#[derive(Debug)]
pub struct Tokenizer {
	/// Non-greedy "text, one end character, remainder" matcher. `(?s)` so
	/// the punctuation search spans embedded newlines.
	sentence_re: Regex,
	/// Whitespace runs, collapsed to single spaces on sentence emission.
	whitespace_re: Regex,
	/// Word finder built from the configured word character class.
	word_re: Regex,
}

impl Tokenizer {
	/// Compiles the configured character classes into the tokenizer patterns.
	///
	/// # Errors
	/// Returns an error if either class fragment does not form a valid
	/// regular expression. This is a fatal configuration error.
	pub fn new(config: &TokenizerConfig) -> Result<Self, Box<dyn Error>> {
		let sentence_re = Regex::new(&format!(r"(?s)^(.+?)[{}](.*)", config.end_punc))
			.map_err(|e| format!("invalid end-punctuation class {:?}: {e}", config.end_punc))?;
		let word_re = Regex::new(&format!(r"\b({}+)\b", config.word_char))
			.map_err(|e| format!("invalid word-character class {:?}: {e}", config.word_char))?;
		// Fixed pattern, cannot fail
		let whitespace_re = Regex::new(r"\s+").unwrap();
		Ok(Self { sentence_re, whitespace_re, word_re })
	}

	/// Iterates the complete sentences found in a sequence of text chunks.
	///
	/// The returned iterator is lazy and non-restartable. Chunk boundaries
	/// carry no meaning; text accumulates until an end-punctuation character
	/// is seen. A trailing fragment with no terminator is silently dropped.
	pub fn sentences<I>(&self, chunks: I) -> Sentences<'_, I::IntoIter>
	where
		I: IntoIterator<Item = String>,
	{
		Sentences {
			tokenizer: self,
			chunks: chunks.into_iter(),
			buf: String::new(),
		}
	}

	/// Iterates fixed-size phrases over the words of one sentence.
	///
	/// # Parameters
	/// - `size`: how many word slots each phrase holds.
	/// - `leading`: `Some(l)` prefills the window with `size - l` boundary
	///   sentinels, so the first phrases represent the sentence start.
	/// - `trailing`: `Some(t)` appends `t` boundary sentinels after the last
	///   word, emitting the tapering windows that represent the sentence end.
	///
	/// With `size = 3`, `leading = Some(1)`, `trailing = Some(2)` the sentence
	/// `"alpha bravo charlie delta"` yields:
	///
	/// ```text
	/// (None, None, "alpha")
	/// (None, "alpha", "bravo")
	/// ("alpha", "bravo", "charlie")
	/// ("bravo", "charlie", "delta")
	/// ("charlie", "delta", None)
	/// ("delta", None, None)
	/// ```
	pub fn phrases<'t, 's>(
		&'t self,
		sentence: &'s str,
		size: usize,
		leading: Option<usize>,
		trailing: Option<usize>,
	) -> Phrases<'t, 's> {
		let prefill = leading.map_or(0, |l| size.saturating_sub(l));
		let mut buf = VecDeque::with_capacity(size + 1);
		buf.extend(std::iter::repeat_n(None, prefill));
		Phrases {
			words: self.word_re.find_iter(sentence),
			buf,
			size,
			trailing_left: trailing.unwrap_or(0),
			exhausted: false,
		}
	}

	/// Iterates the words of a sentence, as matched by the word class.
	pub fn words<'t, 's>(&'t self, sentence: &'s str) -> impl Iterator<Item = &'s str> {
		self.word_re.find_iter(sentence).map(|m| m.as_str())
	}

	/// Collapses whitespace runs to single spaces and trims the ends.
	fn normalize(&self, fragment: &str) -> String {
		self.whitespace_re.replace_all(fragment, " ").trim().to_owned()
	}
}

/// Lazy sentence iterator over a sequence of text chunks.
///
/// Accumulates chunks in a buffer; whenever the buffer contains an
/// end-punctuation character, the text before it is emitted as a sentence
/// and the remainder is kept for the next round.
pub struct Sentences<'t, I> {
	tokenizer: &'t Tokenizer,
	chunks: I,
	buf: String,
}

impl<'t, I> Iterator for Sentences<'t, I>
where
	I: Iterator<Item = String>,
{
	type Item = String;

	fn next(&mut self) -> Option<String> {
		loop {
			let split = self.tokenizer.sentence_re.captures(&self.buf).map(|caps| {
				// Groups 1 and 2 always exist in the compiled pattern
				let frag = caps.get(1).map_or("", |m| m.as_str());
				let rest = caps.get(2).map_or("", |m| m.as_str());
				(self.tokenizer.normalize(frag), rest.to_owned())
			});
			if let Some((sentence, rest)) = split {
				self.buf = rest;
				return Some(sentence);
			}
			match self.chunks.next() {
				Some(chunk) => self.buf.push_str(&chunk),
				// Unterminated trailing fragment: dropped
				None => return None,
			}
		}
	}
}

/// One fixed-size window of words-or-boundary-sentinel.
pub type Phrase<'s> = Vec<Option<&'s str>>;

/// Lazy phrase iterator over the words of one sentence.
pub struct Phrases<'t, 's> {
	words: regex::Matches<'t, 's>,
	buf: VecDeque<Option<&'s str>>,
	size: usize,
	trailing_left: usize,
	exhausted: bool,
}

impl<'t, 's> Phrases<'t, 's> {
	/// Slides one slot into the window; a snapshot is emitted once the
	/// window is full.
	fn push(&mut self, slot: Option<&'s str>) -> Option<Phrase<'s>> {
		self.buf.push_back(slot);
		if self.buf.len() > self.size {
			self.buf.pop_front();
		}
		if self.buf.len() == self.size {
			Some(self.buf.iter().copied().collect())
		} else {
			None
		}
	}
}

impl<'t, 's> Iterator for Phrases<'t, 's> {
	type Item = Phrase<'s>;

	fn next(&mut self) -> Option<Phrase<'s>> {
		loop {
			if !self.exhausted {
				match self.words.next() {
					Some(word) => {
						if let Some(phrase) = self.push(Some(word.as_str())) {
							return Some(phrase);
						}
						continue;
					}
					None => self.exhausted = true,
				}
			}
			if self.trailing_left == 0 {
				return None;
			}
			self.trailing_left -= 1;
			if let Some(phrase) = self.push(None) {
				return Some(phrase);
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tokenizer() -> Tokenizer {
		Tokenizer::new(&TokenizerConfig::default()).expect("valid default config")
	}

	fn split(tokenizer: &Tokenizer, chunks: &[&str]) -> Vec<String> {
		tokenizer.sentences(chunks.iter().map(|c| c.to_string())).collect()
	}

	#[test]
	fn splits_on_end_punctuation() {
		let config = TokenizerConfig { end_punc: r"\.;".to_owned(), ..Default::default() };
		let tokenizer = Tokenizer::new(&config).expect("valid config");
		assert_eq!(split(&tokenizer, &["One. Two; Three."]), vec!["One", "Two", "Three"]);
	}

	#[test]
	fn default_class_covers_questions_and_exclamations() {
		let tokenizer = tokenizer();
		assert_eq!(split(&tokenizer, &["Really? Yes! Fine: good."]), vec!["Really", "Yes", "Fine", "good"]);
	}

	#[test]
	fn drops_unterminated_trailing_fragment() {
		let tokenizer = tokenizer();
		assert_eq!(split(&tokenizer, &["One. and then some"]), vec!["One"]);
		assert_eq!(split(&tokenizer, &["no terminator at all"]), Vec::<String>::new());
	}

	#[test]
	fn sentences_span_chunk_boundaries() {
		let tokenizer = tokenizer();
		assert_eq!(split(&tokenizer, &["One. Tw", "o; rest."]), vec!["One", "Two", "rest"]);
	}

	#[test]
	fn normalizes_whitespace_across_newlines() {
		let tokenizer = tokenizer();
		assert_eq!(
			split(&tokenizer, &["  First  line\nsecond\tline. \n Next\none."]),
			vec!["First line second line", "Next one"]
		);
	}

	#[test]
	fn rejects_invalid_end_punctuation_class() {
		let config = TokenizerConfig { end_punc: r"\".to_owned(), ..Default::default() };
		assert!(Tokenizer::new(&config).is_err());
	}

	#[test]
	fn pads_sentence_boundaries_with_sentinels() {
		let tokenizer = tokenizer();
		let phrases: Vec<_> = tokenizer
			.phrases("alpha bravo charlie delta", 3, Some(1), Some(2))
			.collect();
		assert_eq!(
			phrases,
			vec![
				vec![None, None, Some("alpha")],
				vec![None, Some("alpha"), Some("bravo")],
				vec![Some("alpha"), Some("bravo"), Some("charlie")],
				vec![Some("bravo"), Some("charlie"), Some("delta")],
				vec![Some("charlie"), Some("delta"), None],
				vec![Some("delta"), None, None],
			]
		);
	}

	#[test]
	fn full_windows_only_without_padding() {
		let tokenizer = tokenizer();
		let phrases: Vec<_> = tokenizer
			.phrases("alpha bravo charlie delta", 3, None, None)
			.collect();
		assert_eq!(
			phrases,
			vec![
				vec![Some("alpha"), Some("bravo"), Some("charlie")],
				vec![Some("bravo"), Some("charlie"), Some("delta")],
			]
		);
	}

	#[test]
	fn short_sentence_yields_nothing_without_padding() {
		let tokenizer = tokenizer();
		assert!(tokenizer.phrases("only two", 3, None, None).next().is_none());
	}

	#[test]
	fn keeps_hyphens_and_apostrophes_in_words() {
		let tokenizer = tokenizer();
		let words: Vec<_> = tokenizer.words("it's a well-known fact").collect();
		assert_eq!(words, vec!["it's", "a", "well-known", "fact"]);
	}
}
