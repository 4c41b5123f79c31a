use std::collections::VecDeque;

/// Queue of the most recent tokens seen while scanning a text.
///
/// The window keeps tokens in insertion order and renders them as a
/// context key (tokens joined by a single space).
/// It is only used during construction and by the generation loop.
#[derive(Clone, Debug, Default)]
pub struct SlidingWindow {
	tokens: VecDeque<String>,
}

impl SlidingWindow {
	/// Creates an empty window.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a token and returns the new size.
	///
	/// The token must not be empty, callers filter the empty sentinel first.
	pub fn insert(&mut self, token: &str) -> usize {
		debug_assert!(!token.is_empty(), "empty token pushed into the window");
		self.tokens.push_back(token.to_owned());
		self.tokens.len()
	}

	/// Removes and returns the oldest token.
	///
	/// Returns `None` if the window is empty.
	pub fn remove_first(&mut self) -> Option<String> {
		self.tokens.pop_front()
	}

	/// Number of tokens currently held.
	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	/// Returns `true` if the window holds no token.
	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	/// Renders the window as a context key.
	pub fn render(&self) -> String {
		self.tokens.iter().map(String::as_str).collect::<Vec<_>>().join(" ")
	}
}
