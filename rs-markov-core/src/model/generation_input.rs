/// Strategy used to select the starting context of a generated sequence.
///
/// # Variants
/// - `Random`: start from a context picked at random in the model.
/// - `Custom(String)`: start from the provided context, which must contain
///   exactly `order` words.
#[derive(Clone, Debug, PartialEq)]
pub enum StartSeed {
	Random,
	Custom(String),
}

/// Parameters of a generation run.
///
/// # Invariants
/// - `length` is always >= 1
#[derive(Clone, Debug)]
pub struct GenerationInput {
	/// Maximum number of words appended after the starting context.
	length: usize,

	/// Number of times generation restarts from a random context when the
	/// current one has no follower. 0 stops at the first dead end.
	pub max_restarts: usize,

	/// Starting context.
	pub start_seed: StartSeed,
}

impl Default for GenerationInput {
	fn default() -> Self {
		Self {
			length: 50,
			max_restarts: 0,
			start_seed: StartSeed::Random,
		}
	}
}

impl GenerationInput {
	/// Creates an input generating at most `length` words from `start_seed`.
	///
	/// # Errors
	/// Returns an error if `length` is 0.
	pub fn new(length: usize, start_seed: StartSeed) -> Result<Self, String> {
		let mut input = Self { start_seed, ..Self::default() };
		input.set_length(length)?;
		Ok(input)
	}

	/// Returns the maximum number of generated words.
	pub fn length(&self) -> usize {
		self.length
	}

	/// Sets the maximum number of generated words.
	///
	/// # Errors
	/// Returns an error if `length` is 0.
	pub fn set_length(&mut self, length: usize) -> Result<(), String> {
		if length == 0 {
			return Err("Length must be at least 1".to_owned());
		}
		self.length = length;
		Ok(())
	}
}
