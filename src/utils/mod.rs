//! # Utilities Module
//!
//! Randomness plumbing shared by generation and turn resolution.

pub mod random;

pub use random::*;
