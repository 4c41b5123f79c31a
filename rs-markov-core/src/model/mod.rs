//! Top-level module for the word Markov chain.
//!
//! - Word-level Markov model of order k (`MarkovModel`)
//! - Per-context follower multiset (`FollowerDistribution`)
//! - Token window used while scanning text (`SlidingWindow`)
//! - Generation configuration (`GenerationInput`)
//! - A high-level generation interface (`Generator`)

/// High-level interface producing word sequences from a model.
pub mod generator;

/// Generation parameters and starting-context strategy.
pub mod generation_input;

/// Order-k word model: construction, frequency queries and sampling.
pub mod markov_model;

/// Followers of a single context, with rank-based lookup.
pub mod distribution;

/// Ordered queue of the most recent tokens.
pub mod window;
