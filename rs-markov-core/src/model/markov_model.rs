use std::collections::BTreeMap;

use log::{debug, error, trace, warn};
use rand::prelude::IteratorRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::distribution::FollowerDistribution;
use super::window::SlidingWindow;
use crate::error::MarkovError;

/// Value returned by [`MarkovModel::next_string`] when no word can be produced.
pub const NO_STRING: &str = "";

/// Value returned by [`MarkovModel::get_frequency`] for a context that does
/// not have exactly `order` words.
pub const INVALID_KGRAM: i64 = -1;

/// Word-level Markov model of order `k`.
///
/// The model maps every observed k-word context ("k-gram") to the
/// distribution of words that followed it, and samples the next word
/// with its own seeded generator.
///
/// # Responsibilities
/// - Build the table from whitespace-separated text
/// - Report how often a context was observed
/// - Sample a follower of a context, weighted by its count
///
/// # Invariants
/// - `order` is always >= 1
/// - Each key in `table` is exactly `order` words joined by single spaces
/// - The table only grows
#[derive(Clone, Debug)]
pub struct MarkovModel {
	/// Number of words in a context key
	order: usize,

	/// Context key to its followers.
	/// Ordered so that whole-table traversals are reproducible.
	table: BTreeMap<String, FollowerDistribution>,

	/// Generator owned by this model, advanced by every sample
	rng: StdRng,
}

impl MarkovModel {
	/// Creates an empty model of the given order, seeding its generator.
	///
	/// # Errors
	/// Returns [`MarkovError::InvalidOrder`] if `order` is 0.
	pub fn new(order: usize, seed: u64) -> Result<Self, MarkovError> {
		if order < 1 {
			return Err(MarkovError::InvalidOrder);
		}
		Ok(Self {
			order,
			table: BTreeMap::new(),
			rng: StdRng::seed_from_u64(seed),
		})
	}

	/// Number of words in a context key.
	pub fn order(&self) -> usize {
		self.order
	}

	/// Number of distinct contexts observed so far.
	pub fn len(&self) -> usize {
		self.table.len()
	}

	/// Returns `true` if no context has been observed yet.
	pub fn is_empty(&self) -> bool {
		self.table.is_empty()
	}

	/// Returns the followers recorded for an exact context key.
	pub fn distribution(&self, kgram: &str) -> Option<&FollowerDistribution> {
		self.table.get(kgram)
	}

	/// Adds the observations of `text` to the model.
	///
	/// The text is split on single spaces. Repeated spaces produce empty
	/// tokens: they never enter the window and are never recorded as
	/// followers. When the window is full but the next token is empty, the
	/// window is kept as is, so the same context is used for the next
	/// non-empty token.
	///
	/// # Notes
	/// - `None` is a no-op.
	/// - Calling this several times accumulates observations, each call
	///   starting with an empty window.
	pub fn initialize_text<'a>(&mut self, text: impl Into<Option<&'a str>>) {
		let Some(text) = text.into() else {
			return;
		};

		let words: Vec<&str> = text.split(' ').collect();
		let mut window = SlidingWindow::new();
		let before = self.table.len();

		// The last word only ever appears as a follower
		for pair in words.windows(2) {
			let (word, next) = (pair[0], pair[1]);
			let size = if word.is_empty() {
				window.len()
			} else {
				window.insert(word)
			};

			if size == self.order && !next.is_empty() {
				let key = window.render();
				window.remove_first();
				trace!("'{}' -> '{}'", key, next);

				match self.table.get_mut(&key) {
					Some(distribution) => distribution.insert(next),
					None => {
						self.table.insert(key, FollowerDistribution::new(next));
					}
				}
			}
		}

		debug!(
			"Scanned {} tokens, {} new contexts ({} total)",
			words.len(),
			self.table.len() - before,
			self.table.len()
		);
	}

	/// Returns how many times `kgram` was followed by a word.
	///
	/// # Returns
	/// - [`INVALID_KGRAM`] (-1) if `kgram` is `None` or does not contain
	///   exactly `order` words
	/// - 0 if the context was never observed
	/// - the number of observed followers otherwise
	pub fn get_frequency<'a>(&self, kgram: impl Into<Option<&'a str>>) -> i64 {
		match kgram.into() {
			Some(kgram) if Self::count_words(kgram) == self.order => {
				self.table.get(kgram).map_or(0, |distribution| distribution.total_count() as i64)
			}
			kgram => {
				warn!("Rejected context {:?}: expected {} words", kgram, self.order);
				INVALID_KGRAM
			}
		}
	}

	/// Samples the word following `kgram`.
	///
	/// Draws an index in `[0, frequency)` and returns the follower at that
	/// rank, so each follower is picked proportionally to its count.
	/// The generator advances on every successful call.
	///
	/// Returns [`NO_STRING`] if the context is malformed or was never observed.
	pub fn next_string<'a>(&mut self, kgram: impl Into<Option<&'a str>>) -> String {
		let Some(kgram) = kgram.into() else {
			return NO_STRING.to_owned();
		};
		if self.get_frequency(kgram) <= 0 {
			return NO_STRING.to_owned();
		}
		// Frequency > 0 implies a present key
		let Some(distribution) = self.table.get(kgram) else {
			return NO_STRING.to_owned();
		};

		let index = self.rng.random_range(0..distribution.total_count());
		match distribution.rank(index) {
			Ok(word) => word.to_owned(),
			Err(e) => {
				error!("Sampling '{}' failed: {}", kgram, e);
				NO_STRING.to_owned()
			}
		}
	}

	/// Picks one observed context uniformly at random.
	///
	/// Uses the model generator, so the choice is reproducible.
	/// Returns `None` if the model is empty.
	pub fn random_context(&mut self) -> Option<String> {
		self.table.keys().choose(&mut self.rng).cloned()
	}

	/// Counts the words of `s`.
	///
	/// Surrounding whitespace is ignored, except the no-break spaces which can
	/// be words on their own. Runs of spaces count as a single separator.
	/// Returns 0 for `None` or blank input.
	pub fn count_words<'a>(s: impl Into<Option<&'a str>>) -> usize {
		match s.into() {
			Some(s) => s.trim_matches(is_separator).split(' ').filter(|word| !word.is_empty()).count(),
			None => 0,
		}
	}
}

/// Whitespace trimmed around a context before counting its words.
///
/// Control separators and Unicode space, line and paragraph separators,
/// except the no-break spaces (U+00A0, U+2007, U+202F) which stay part of a
/// word. U+0085 is not a separator either.
fn is_separator(c: char) -> bool {
	match c {
		'\u{a0}' | '\u{2007}' | '\u{202f}' | '\u{85}' => false,
		'\t'..='\r' | '\u{1c}'..='\u{1f}' => true,
		_ => c.is_whitespace(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn followers(model: &MarkovModel, kgram: &str) -> Vec<(String, usize)> {
		model
			.distribution(kgram)
			.map(|d| d.followers().map(|(w, c)| (w.to_owned(), c)).collect())
			.unwrap_or_default()
	}

	#[test]
	fn order_zero_is_rejected() {
		assert!(matches!(MarkovModel::new(0, 1), Err(MarkovError::InvalidOrder)));
	}

	#[test]
	fn builds_order_one_table() {
		let mut model = MarkovModel::new(1, 7).unwrap();
		model.initialize_text("the cat sat the cat ran");

		assert_eq!(model.len(), 3);
		assert_eq!(followers(&model, "the"), vec![("cat".to_owned(), 2)]);
		assert_eq!(
			followers(&model, "cat"),
			vec![("ran".to_owned(), 1), ("sat".to_owned(), 1)]
		);
		assert_eq!(followers(&model, "sat"), vec![("the".to_owned(), 1)]);

		assert_eq!(model.get_frequency("the"), 2);
		assert_eq!(model.get_frequency("cat"), 2);
		assert_eq!(model.get_frequency("dog"), 0);
		assert_eq!(model.get_frequency("the cat"), INVALID_KGRAM);
	}

	#[test]
	fn builds_order_two_table() {
		let mut model = MarkovModel::new(2, 7).unwrap();
		model.initialize_text("a b c a b d");

		assert_eq!(model.get_frequency("a b"), 2);
		assert_eq!(model.get_frequency("b c"), 1);
		assert_eq!(model.get_frequency("a"), INVALID_KGRAM);
		for _ in 0..20 {
			let next = model.next_string("a b");
			assert!(next == "c" || next == "d", "unexpected follower {next}");
		}
	}

	#[test]
	fn none_text_is_a_no_op() {
		let mut model = MarkovModel::new(1, 0).unwrap();
		model.initialize_text(None);
		assert!(model.is_empty());
		model.initialize_text("");
		assert!(model.is_empty());
		model.initialize_text("single");
		assert!(model.is_empty());
	}

	#[test]
	fn empty_tokens_are_skipped() {
		let mut model = MarkovModel::new(1, 0).unwrap();
		model.initialize_text("a  b   c ");

		assert_eq!(followers(&model, "a"), vec![("b".to_owned(), 1)]);
		assert_eq!(followers(&model, "b"), vec![("c".to_owned(), 1)]);
		assert_eq!(model.len(), 2);
	}

	#[test]
	fn full_window_waits_across_empty_tokens() {
		let mut model = MarkovModel::new(2, 0).unwrap();
		model.initialize_text("x y  z w");

		assert_eq!(followers(&model, "x y"), vec![("z".to_owned(), 1)]);
		assert_eq!(followers(&model, "y z"), vec![("w".to_owned(), 1)]);
		assert_eq!(model.len(), 2);
	}

	#[test]
	fn leading_space_does_not_shift_contexts() {
		let mut model = MarkovModel::new(1, 0).unwrap();
		model.initialize_text(" a b");
		assert_eq!(followers(&model, "a"), vec![("b".to_owned(), 1)]);
		assert_eq!(model.len(), 1);
	}

	#[test]
	fn repeated_initialization_accumulates() {
		let mut model = MarkovModel::new(1, 0).unwrap();
		model.initialize_text("a b");
		model.initialize_text("a c");
		assert_eq!(model.get_frequency("a"), 2);
		// contexts do not span two calls
		assert_eq!(model.get_frequency("b"), 0);
	}

	#[test]
	fn frequency_of_malformed_kgram() {
		let mut model = MarkovModel::new(2, 0).unwrap();
		model.initialize_text("a b c");
		assert_eq!(model.get_frequency(None), INVALID_KGRAM);
		assert_eq!(model.get_frequency(""), INVALID_KGRAM);
		assert_eq!(model.get_frequency("a b c"), INVALID_KGRAM);
		// right shape, but the key is stored with a single space
		assert_eq!(model.get_frequency("a  b"), 0);
		assert_eq!(model.get_frequency("a b"), 1);
	}

	#[test]
	fn next_string_without_data() {
		let mut model = MarkovModel::new(1, 0).unwrap();
		assert_eq!(model.next_string("a"), NO_STRING);
		model.initialize_text("a b");
		assert_eq!(model.next_string(None), NO_STRING);
		assert_eq!(model.next_string("a b"), NO_STRING);
		assert_eq!(model.next_string("b"), NO_STRING);
		assert_eq!(model.next_string("a"), "b");
	}

	#[test]
	fn same_seed_same_samples() {
		let text = "one two one three one two one four one two";
		let mut first = MarkovModel::new(1, 42).unwrap();
		let mut second = MarkovModel::new(1, 42).unwrap();
		first.initialize_text(text);
		second.initialize_text(text);

		let a: Vec<String> = (0..50).map(|_| first.next_string("one")).collect();
		let b: Vec<String> = (0..50).map(|_| second.next_string("one")).collect();
		assert_eq!(a, b);
	}

	#[test]
	fn random_context_is_a_stored_key() {
		let mut model = MarkovModel::new(2, 3).unwrap();
		assert_eq!(model.random_context(), None);
		model.initialize_text("a b c a b d");
		for _ in 0..10 {
			let key = model.random_context().unwrap();
			assert!(model.get_frequency(key.as_str()) > 0);
		}
	}

	#[test]
	fn count_words_collapses_spaces() {
		assert_eq!(MarkovModel::count_words(None), 0);
		assert_eq!(MarkovModel::count_words(""), 0);
		assert_eq!(MarkovModel::count_words("   "), 0);
		assert_eq!(MarkovModel::count_words("one"), 1);
		assert_eq!(MarkovModel::count_words("  one   two "), 2);
		assert_eq!(MarkovModel::count_words("a b  c"), 3);
	}

	#[test]
	fn count_words_with_tabs_and_unicode_spaces() {
		// a tab is trimmed around the text but does not separate words
		assert_eq!(MarkovModel::count_words("\t"), 0);
		assert_eq!(MarkovModel::count_words("a\tb"), 1);
		assert_eq!(MarkovModel::count_words("\ta b\t"), 2);
		assert_eq!(MarkovModel::count_words("\u{1f}a\u{1c}"), 1);
		assert_eq!(MarkovModel::count_words("\u{3000}a\u{2028}"), 1);
		// no-break spaces are words
		assert_eq!(MarkovModel::count_words("\u{a0}"), 1);
		assert_eq!(MarkovModel::count_words("\u{2007}"), 1);
		assert_eq!(MarkovModel::count_words("a \u{202f}"), 2);
		assert_eq!(MarkovModel::count_words("\u{85}"), 1);
	}

	#[test]
	fn no_break_space_keys_are_queryable() {
		let mut model = MarkovModel::new(1, 0).unwrap();
		model.initialize_text("x \u{a0} y");
		assert_eq!(model.distribution("\u{a0}").map(|d| d.total_count()), Some(1));
		assert_eq!(model.get_frequency("\u{a0}"), 1);
		assert_eq!(model.next_string("\u{a0}"), "y");

		let mut model = MarkovModel::new(2, 0).unwrap();
		model.initialize_text("x \u{a0} y");
		assert_eq!(model.get_frequency("x \u{a0}"), 1);
		assert_eq!(model.next_string("x \u{a0}"), "y");
	}

	#[test]
	fn frequency_is_stable_between_queries() {
		let mut model = MarkovModel::new(1, 9).unwrap();
		model.initialize_text("a b a c a b");
		let first = model.get_frequency("a");
		for _ in 0..10 {
			model.next_string("a");
			assert_eq!(model.get_frequency("a"), first);
		}
		assert_eq!(first, 3);
	}

	#[test]
	fn next_string_advances_generator() {
		let mut model = MarkovModel::new(1, 13).unwrap();
		model.initialize_text("x a x b x c x d x e");
		let samples: Vec<String> = (0..50).map(|_| model.next_string("x")).collect();

		for sample in &samples {
			assert!(["a", "b", "c", "d", "e"].contains(&sample.as_str()), "unexpected follower {sample}");
		}
		// five equally likely followers: 50 identical draws would mean a stuck generator
		assert!(samples.iter().any(|s| s != &samples[0]));
	}
}
