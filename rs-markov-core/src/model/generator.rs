use std::path::Path;

use log::{debug, info, warn};

use crate::error::MarkovError;
use crate::io;
use crate::model::generation_input::{GenerationInput, StartSeed};
use crate::model::markov_model::{INVALID_KGRAM, MarkovModel};
use crate::model::window::SlidingWindow;

/// High-level generator producing word sequences from a `MarkovModel`.
///
/// # Responsibilities
/// - Load a model from a text file
/// - Pick the starting context (random or user provided)
/// - Slide its own window over the sampled words until the requested
///   length or a dead end is reached
#[derive(Debug)]
pub struct Generator {
	model: MarkovModel,
}

impl Generator {
	/// Wraps an already built model.
	pub fn new(model: MarkovModel) -> Self {
		Self { model }
	}

	/// Builds a model of the given order from a text file.
	///
	/// Lines are joined with single spaces before the model is fed, so a
	/// line break separates words.
	///
	/// # Errors
	/// - Returns an error if `order` is 0.
	/// - Returns an error if the file cannot be read.
	pub fn from_file<P: AsRef<Path>>(order: usize, seed: u64, filepath: P) -> Result<Self, MarkovError> {
		let mut model = MarkovModel::new(order, seed)?;
		let raw = io::read_text(&filepath)?;
		model.initialize_text(io::normalize_text(&raw).as_str());

		info!(
			"Loaded {} contexts of order {} from {}",
			model.len(),
			order,
			filepath.as_ref().display()
		);
		Ok(Self::new(model))
	}

	/// Read access to the underlying model.
	pub fn model(&self) -> &MarkovModel {
		&self.model
	}

	/// Mutable access, ex. to feed more text.
	pub fn model_mut(&mut self) -> &mut MarkovModel {
		&mut self.model
	}

	/// Generates a sequence of words.
	///
	/// The returned sequence starts with the words of the starting context,
	/// followed by at most `input.length()` sampled words.
	///
	/// # Behavior
	/// - Each step samples the follower of the last `order` words.
	/// - When a context has no follower, generation jumps to a random
	///   context (nothing is emitted for the jump) while restarts remain,
	///   otherwise it stops.
	///
	/// # Errors
	/// - [`MarkovError::InvalidContext`] if a custom start does not have
	///   `order` words.
	/// - [`MarkovError::EmptyModel`] if a random start is requested from an
	///   empty model.
	pub fn generate(&mut self, input: &GenerationInput) -> Result<Vec<String>, MarkovError> {
		let start = match &input.start_seed {
			StartSeed::Custom(context) => {
				if self.model.get_frequency(context.as_str()) == INVALID_KGRAM {
					warn!("Custom start '{}' is not a context of order {}", context, self.model.order());
					return Err(MarkovError::InvalidContext {
						context: context.to_owned(),
						order: self.model.order(),
					});
				}
				context.to_owned()
			}
			StartSeed::Random => self.model.random_context().ok_or(MarkovError::EmptyModel)?,
		};

		let mut window = Self::make_window(&start);
		let mut words: Vec<String> = start.split(' ').filter(|w| !w.is_empty()).map(str::to_owned).collect();

		let mut restarts = input.max_restarts;
		let mut generated = 0;
		while generated < input.length() {
			let next = self.model.next_string(window.render().as_str());
			if next.is_empty() {
				if restarts == 0 {
					debug!("No follower for '{}', stopping", window.render());
					break;
				}
				restarts -= 1;
				let Some(context) = self.model.random_context() else {
					break;
				};
				debug!("No follower for '{}', restarting from '{}'", window.render(), context);
				window = Self::make_window(&context);
				continue;
			}

			window.insert(&next);
			window.remove_first();
			words.push(next);
			generated += 1;
		}

		Ok(words)
	}

	fn make_window(context: &str) -> SlidingWindow {
		let mut window = SlidingWindow::new();
		for word in context.split(' ').filter(|w| !w.is_empty()) {
			window.insert(word);
		}
		window
	}
}
