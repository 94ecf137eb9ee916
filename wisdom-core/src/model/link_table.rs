use std::collections::{HashMap, HashSet};

use rand::Rng;
use rand::prelude::IteratorRandom;

/// One word slot; `None` is the boundary sentinel marking the absence of a
/// word at a sentence start or end.
pub type Slot = Option<String>;

/// An ordered pair of word slots used as a lookup key into the link table.
///
/// The all-sentinel context represents "start of sentence"; advancing drops
/// the oldest slot and pushes the newest word.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Context {
	slots: [Slot; 2],
}

impl Context {
	/// The all-boundary-sentinel context every sentence starts from.
	pub fn start() -> Self {
		Self { slots: [None, None] }
	}

	pub fn new(first: Slot, second: Slot) -> Self {
		Self { slots: [first, second] }
	}

	/// Shifts the window forward by one generated word.
	pub fn advance(&mut self, word: &str) {
		self.slots[0] = self.slots[1].take();
		self.slots[1] = Some(word.to_owned());
	}
}

/// Outcome of looking up the follower of a context.
///
/// # Variants
/// - `Word(String)`: a concrete next word was drawn.
/// - `End`: the boundary sentinel was drawn; the sentence may end here.
/// - `NoChoice`: the context was never observed; the sentence must stop.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Follow {
	Word(String),
	End,
	NoChoice,
}

/// Mapping from a two-word context to the set of distinct followers
/// observed in the corpus.
///
/// # Responsibilities
/// - Accumulate (context, follower) observations during the build
/// - Draw a follower uniformly at random among the observed set
/// - Answer whether a context can legally end a sentence
///
/// # Invariants
/// - Every recorded context maps to a non-empty follower set
/// - Followers are distinct; observation counts are not kept (choice is
///   uniform over the set, not frequency-weighted)
#[derive(Debug, Default)]
pub struct LinkTable {
	links: HashMap<Context, HashSet<Slot>>,
}

impl LinkTable {
	pub fn new() -> Self {
		Self { links: HashMap::new() }
	}

	/// Records one observation of `follower` after `context`.
	pub fn record(&mut self, context: Context, follower: Slot) {
		self.links.entry(context).or_default().insert(follower);
	}

	/// Draws a follower for `context` uniformly at random.
	///
	/// A context with exactly one follower returns it without consulting
	/// the random source, so a single observed continuation is deterministic.
	pub fn follow<R: Rng>(&self, context: &Context, rng: &mut R) -> Follow {
		let Some(followers) = self.links.get(context) else {
			return Follow::NoChoice;
		};
		let drawn = if followers.len() == 1 {
			followers.iter().next()
		} else {
			followers.iter().choose(rng)
		};
		match drawn {
			Some(Some(word)) => Follow::Word(word.clone()),
			Some(None) => Follow::End,
			// Recorded follower sets are never empty
			None => Follow::NoChoice,
		}
	}

	/// True if `context` may legally end a sentence: either it was never
	/// observed (permissive default) or the boundary sentinel follows it.
	pub fn can_end(&self, context: &Context) -> bool {
		match self.links.get(context) {
			Some(followers) => followers.contains(&None),
			None => true,
		}
	}

	/// Number of distinct contexts observed.
	pub fn len(&self) -> usize {
		self.links.len()
	}

	pub fn is_empty(&self) -> bool {
		self.links.is_empty()
	}

	#[cfg(test)]
	pub(crate) fn followers(&self, context: &Context) -> Option<&HashSet<Slot>> {
		self.links.get(context)
	}
}

/// Mapping from a lowercased word to the first originally-cased spelling
/// encountered for it.
///
/// Only populated for words whose lowercase form differs from the original;
/// absence means "display as-is".
#[derive(Debug, Default)]
pub struct FormTable {
	forms: HashMap<String, String>,
}

impl FormTable {
	pub fn new() -> Self {
		Self { forms: HashMap::new() }
	}

	/// Remembers the original spelling of a word. First-seen casing wins.
	pub fn record(&mut self, original: &str) {
		let lowered = original.to_lowercase();
		if lowered != original && !self.forms.contains_key(&lowered) {
			self.forms.insert(lowered, original.to_owned());
		}
	}

	/// Restores the display form of a lowercased word.
	pub fn display<'a>(&'a self, word: &'a str) -> &'a str {
		self.forms.get(word).map_or(word, String::as_str)
	}

	/// Number of remembered spellings.
	pub fn len(&self) -> usize {
		self.forms.len()
	}

	pub fn is_empty(&self) -> bool {
		self.forms.is_empty()
	}
}
