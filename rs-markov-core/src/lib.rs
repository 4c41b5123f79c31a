//! Word-level Markov chain text generation library.
//!
//! This crate provides:
//! - An order-k word Markov model with a reproducible, seeded sampler
//! - Rank-based lookup over the followers of each context
//! - A generation loop sliding its own context window over sampled words
//! - Small I/O helpers to feed the model from text files

/// Markov model, follower distributions and generation logic.
pub mod model;

/// Crate error type.
pub mod error;

/// I/O utilities (text loading and normalization).
pub mod io;

pub use error::MarkovError;
