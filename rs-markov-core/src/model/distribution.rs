use std::collections::BTreeMap;

use crate::error::MarkovError;

/// Followers observed after a single context key.
///
/// Conceptually a multiset of words: each follower is stored once with the
/// number of times it was observed.
///
/// ## Invariants
/// - Each follower count is strictly positive
/// - `total` is the sum of all follower counts
/// - Followers are kept in ordinal (byte) order, which fixes the meaning of
///   [`rank`](FollowerDistribution::rank)
#[derive(Clone, Debug)]
pub struct FollowerDistribution {
	/// Follower word to occurrence count.
	/// Example: { "cat" => 2, "dog" => 1 }
	counts: BTreeMap<String, usize>,
	total: usize,
}

impl FollowerDistribution {
	/// Creates a distribution holding one occurrence of `first`.
	pub fn new(first: &str) -> Self {
		let mut counts = BTreeMap::new();
		counts.insert(first.to_owned(), 1);
		Self { counts, total: 1 }
	}

	/// Records one more occurrence of `word`.
	pub fn insert(&mut self, word: &str) {
		match self.counts.get_mut(word) {
			Some(count) => *count += 1,
			None => {
				self.counts.insert(word.to_owned(), 1);
			}
		}
		self.total += 1;
	}

	/// Total number of recorded occurrences.
	pub fn total_count(&self) -> usize {
		self.total
	}

	/// Iterates over `(follower, count)` pairs in ordinal order.
	pub fn followers(&self) -> impl Iterator<Item = (&str, usize)> {
		self.counts.iter().map(|(word, count)| (word.as_str(), *count))
	}

	/// Returns the `n`-th element of the sorted multiset of followers.
	///
	/// With 3 "I'm" and 4 "world", ranks 0..=2 are "I'm" and ranks 3..=6 are
	/// "world". Sampling a uniform index in `[0, total)` and mapping it
	/// through `rank` therefore picks each follower proportionally to its
	/// count.
	///
	/// # Errors
	/// Returns [`MarkovError::RankOutOfRange`] if `n >= total`.
	pub fn rank(&self, n: usize) -> Result<&str, MarkovError> {
		let mut remaining = n;
		for (word, count) in &self.counts {
			if remaining < *count {
				return Ok(word);
			}
			remaining -= count;
		}

		Err(MarkovError::RankOutOfRange { index: n, total: self.total })
	}
}
