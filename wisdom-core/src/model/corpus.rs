use std::error::Error;
use std::io::Read;
use std::path::Path;

use log::{debug, trace};
use rand::Rng;

use crate::io::Source;
use crate::model::link_table::{Context, Follow, FormTable, LinkTable};
use crate::model::tokenizer::{Tokenizer, TokenizerConfig};

/// Word slots per extracted phrase: a two-word context plus its follower.
const PHRASE_SIZE: usize = 3;
/// Leading pad so the all-sentinel start context is recorded for each sentence.
const LEADING_PAD: usize = 1;
/// Trailing pad so sentence ends are recorded as boundary-sentinel followers.
const TRAILING_PAD: usize = 2;

/// The tables built from the source text, immutable once built.
struct Tables {
	links: LinkTable,
	forms: FormTable,
}

/// Outcome of one word-sequence generation attempt.
///
/// Overrun is ordinary control flow, not a fault: it signals that this
/// attempt violated its length bounds and the caller should retry.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Attempt {
	Words(Vec<String>),
	Overrun,
}

/// A corpus model: one text source and the link and form tables built
/// from it.
///
/// # Responsibilities
/// - Own the source and read it exactly once, on the explicit `build` step
/// - Map two-word contexts to observed followers and remember first-seen
///   original casings
/// - Generate bounded-length word sequences and complete sentences,
///   retrying attempts that overrun their bounds
///
/// # Notes
/// - Construction is cheap; `build` is expensive, idempotent and safe to
///   call repeatedly. Accessors build on first use.
/// - Generation entry points take the random source as a parameter so
///   callers (and tests) control seeding.
pub struct Corpus {
	tokenizer: Tokenizer,
	source: Option<Source>,
	tables: Option<Tables>,
	retry_cap: Option<usize>,
}

impl Corpus {
	/// Creates a corpus model over a text file, with the default tokenizer.
	pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
		Self::from_source(Source::Path(path.as_ref().to_path_buf()), &TokenizerConfig::default())
	}

	/// Creates a corpus model over a text file with a custom tokenizer
	/// configuration.
	pub fn with_config<P: AsRef<Path>>(path: P, config: &TokenizerConfig) -> Result<Self, Box<dyn Error>> {
		Self::from_source(Source::Path(path.as_ref().to_path_buf()), config)
	}

	/// Creates a corpus model over an already-open reader.
	pub fn from_reader<R: Read + 'static>(reader: R) -> Result<Self, Box<dyn Error>> {
		Self::from_source(Source::Reader(Box::new(reader)), &TokenizerConfig::default())
	}

	fn from_source(source: Source, config: &TokenizerConfig) -> Result<Self, Box<dyn Error>> {
		Ok(Self {
			tokenizer: Tokenizer::new(config)?,
			source: Some(source),
			tables: None,
			retry_cap: None,
		})
	}

	/// Bounds the number of generation attempts per sentence.
	///
	/// `None` (the default) keeps retrying forever, which livelocks on a
	/// corpus whose link structure never satisfies the length bounds.
	pub fn set_retry_cap(&mut self, cap: Option<usize>) {
		self.retry_cap = cap;
	}

	/// True once the link and form tables have been built.
	pub fn is_built(&self) -> bool {
		self.tables.is_some()
	}

	/// Builds the link and form tables from the source.
	///
	/// # Behavior
	/// - Reads the source exactly once; later calls are no-ops.
	/// - For every sentence, records `(first two slots, third slot)` for each
	///   phrase of the lowercased text, extracted with leading and trailing
	///   boundary padding so sentence starts and ends participate as
	///   first-class contexts.
	/// - Records every original-cased word into the form table.
	///
	/// # Errors
	/// Returns an error if the source cannot be read.
	pub fn build(&mut self) -> Result<(), Box<dyn Error>> {
		if self.tables.is_some() {
			return Ok(());
		}
		let source = match self.source.take() {
			Some(source) => source,
			// Only reachable after a failed read; the source is gone
			None => return Err("corpus source already consumed".into()),
		};
		let text = source.read_all()?;

		let mut links = LinkTable::new();
		let mut forms = FormTable::new();
		let mut count = 0usize;
		for sentence in self.tokenizer.sentences(std::iter::once(text)) {
			// Stray punctuation yields wordless sentences; they contribute nothing
			if self.tokenizer.words(&sentence).next().is_none() {
				continue;
			}
			for word in self.tokenizer.words(&sentence) {
				forms.record(word);
			}
			let lowered = sentence.to_lowercase();
			for phrase in
				self.tokenizer.phrases(&lowered, PHRASE_SIZE, Some(LEADING_PAD), Some(TRAILING_PAD))
			{
				let context = Context::new(
					phrase[0].map(str::to_owned),
					phrase[1].map(str::to_owned),
				);
				links.record(context, phrase[2].map(str::to_owned));
			}
			count += 1;
		}
		debug!(
			"corpus built: {count} sentences, {} contexts, {} remembered spellings",
			links.len(),
			forms.len()
		);
		self.tables = Some(Tables { links, forms });
		Ok(())
	}

	/// Builds on first use and returns the tables.
	fn tables(&mut self) -> Result<&Tables, Box<dyn Error>> {
		self.build()?;
		match &self.tables {
			Some(tables) => Ok(tables),
			// build() always sets the tables on success
			None => Err("corpus model not built".into()),
		}
	}

	/// Draws the next word after `context`, uniformly among the followers
	/// observed in the corpus.
	pub fn next_word<R: Rng>(&mut self, context: &Context, rng: &mut R) -> Result<Follow, Box<dyn Error>> {
		Ok(self.tables()?.links.follow(context, rng))
	}

	/// True if `context` may legally end a sentence.
	pub fn can_end(&mut self, context: &Context) -> Result<bool, Box<dyn Error>> {
		Ok(self.tables()?.links.can_end(context))
	}

	/// Generates one bounded word sequence from the start context.
	///
	/// # Behavior
	/// - Stops successfully once at least `min` words are out and the current
	///   context can legally end.
	/// - Continuing past `max` words is an overrun: the attempt fails when
	///   `strict`, otherwise the sequence simply stops.
	/// - A drawn boundary sentinel or an unknown context forces an end; below
	///   `min` words that is an overrun too (when `strict`).
	///
	/// # Errors
	/// Returns an error for invalid bounds (`min` must be in `1..=max`) or a
	/// failed build.
	pub fn word_sequence<R: Rng>(
		&mut self,
		min: usize,
		max: usize,
		strict: bool,
		rng: &mut R,
	) -> Result<Attempt, Box<dyn Error>> {
		if min < 1 || min > max {
			return Err(format!("invalid word-count bounds: min={min}, max={max}").into());
		}
		let tables = self.tables()?;

		let mut context = Context::start();
		let mut words: Vec<String> = Vec::new();
		loop {
			if words.len() >= min && tables.links.can_end(&context) {
				break;
			}
			if words.len() >= max {
				return Ok(if strict { Attempt::Overrun } else { Attempt::Words(words) });
			}
			match tables.links.follow(&context, rng) {
				Follow::Word(word) => {
					context.advance(&word);
					words.push(word);
				}
				Follow::End | Follow::NoChoice => {
					// The chain cannot continue from here
					if words.len() >= min {
						break;
					}
					return Ok(if strict { Attempt::Overrun } else { Attempt::Words(words) });
				}
			}
		}
		Ok(Attempt::Words(words))
	}

	/// Generates one complete sentence of `min..=max` words.
	///
	/// Retries strict word sequences until one fits the bounds, restores
	/// each word's first-seen casing, capitalizes the first character and
	/// appends a terminating period.
	///
	/// # Errors
	/// Returns an error for invalid bounds, a failed build, or when the
	/// retry cap (if any) is exhausted. Without a cap, a corpus that can
	/// never satisfy the bounds retries forever.
	pub fn sentence<R: Rng>(&mut self, min: usize, max: usize, rng: &mut R) -> Result<String, Box<dyn Error>> {
		let mut attempts = 0usize;
		let words = loop {
			match self.word_sequence(min, max, true, rng)? {
				Attempt::Words(words) => break words,
				Attempt::Overrun => {
					attempts += 1;
					trace!("attempt {attempts} overran bounds [{min}, {max}], retrying");
					if let Some(cap) = self.retry_cap {
						if attempts >= cap {
							return Err(format!(
								"no sentence of {min}..={max} words found after {cap} attempts"
							)
							.into());
						}
					}
				}
			}
		};

		let tables = self.tables()?;
		let restored: Vec<&str> = words.iter().map(|word| tables.forms.display(word)).collect();
		let joined = restored.join(" ");
		let mut chars = joined.chars();
		let capitalized = match chars.next() {
			Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
			None => String::new(),
		};
		Ok(capitalized + ".")
	}
}
