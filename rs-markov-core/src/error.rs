use std::io;

use thiserror::Error;

/// Errors raised by the Markov model and the generation loop.
///
/// Malformed or unseen contexts passed to the query methods are not errors:
/// those are reported through the sentinel values documented on
/// [`MarkovModel`](crate::model::markov_model::MarkovModel).
#[derive(Debug, Error)]
pub enum MarkovError {
	/// The model order must be at least 1.
	#[error("order must be >= 1")]
	InvalidOrder,

	/// A rank lookup was made outside `[0, total)`.
	#[error("rank {index} out of range for a distribution of {total} followers")]
	RankOutOfRange { index: usize, total: usize },

	/// A starting context does not have `order` words.
	#[error("context '{context}' must contain exactly {order} words")]
	InvalidContext { context: String, order: usize },

	/// Generation was requested from a model with no observed context.
	#[error("no context available in the model")]
	EmptyModel,

	#[error(transparent)]
	Io(#[from] io::Error),
}
