use std::io::Write;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::NamedTempFile;
use wisdom_core::model::corpus::Corpus;
use wisdom_core::model::passage::{Assembler, Count, PassageInput};

const CORPUS: &str = "\
The sea remembers the sky. The sky forgets the sea; the sea keeps \
the sky. The sea and the sky are one, and the sea remembers.";

fn file_corpus() -> Corpus {
	let mut file = NamedTempFile::new().expect("temp file");
	write!(file, "{CORPUS}").unwrap();
	let mut corpus = Corpus::new(file.path()).expect("default config");
	corpus.build().expect("file build");
	corpus
}

#[test]
fn assembles_a_wrapped_passage_from_a_file_corpus() {
	let mut corpus = file_corpus();
	corpus.set_retry_cap(Some(10_000));
	let input = PassageInput {
		verses: Count::Fixed(2),
		sentences: Count::Range(2, 3),
		words: Count::Range(3, 12),
		width: 20,
	};
	let mut rng = StdRng::seed_from_u64(7);
	let passage = Assembler::new(input).passage(&mut corpus, &mut rng).expect("passage");

	let verses: Vec<&str> = passage.split("\n\n").collect();
	assert_eq!(verses.len(), 2);
	for verse in &verses {
		assert!(!verse.is_empty());
		for line in verse.lines() {
			assert!(!line.is_empty());
			// No corpus word is wider than the configured width
			assert!(line.chars().count() <= 20, "line too wide: {line:?}");
		}
		// Sentences are period-terminated, so each verse ends with one
		assert!(verse.ends_with('.'), "unterminated verse: {verse:?}");
	}
}

#[test]
fn generated_sentences_are_capitalized_and_bounded() {
	let mut corpus = file_corpus();
	corpus.set_retry_cap(Some(10_000));
	let mut rng = StdRng::seed_from_u64(7);
	for _ in 0..20 {
		let sentence = corpus.sentence(3, 12, &mut rng).expect("sentence");
		let count = sentence.split_whitespace().count();
		assert!((3..=12).contains(&count), "bad word count in {sentence:?}");
		assert!(sentence.ends_with('.'));
		let first = sentence.chars().next().expect("non-empty sentence");
		assert!(first.is_uppercase(), "uncapitalized sentence: {sentence:?}");
	}
}

#[test]
fn casing_is_restored_from_the_source() {
	let mut corpus = file_corpus();
	corpus.set_retry_cap(Some(10_000));
	let mut rng = StdRng::seed_from_u64(7);
	// "The" is the first-seen spelling of "the"; every occurrence is
	// restored to it, even mid-sentence
	let sentence = corpus.sentence(6, 12, &mut rng).expect("sentence");
	let mut occurrences = 0;
	for word in sentence.split_whitespace().skip(1) {
		let word = word.trim_end_matches('.');
		if word.eq_ignore_ascii_case("the") {
			assert_eq!(word, "The", "casing not restored in {sentence:?}");
			occurrences += 1;
		}
	}
	assert!(occurrences > 0, "no article in {sentence:?}");
}
