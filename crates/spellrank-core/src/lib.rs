//! Shared types for the spellrank workspace.
//!
//! - [`character`] -- character classes used by tokenizers and context windows
//! - [`token`] -- text tokens with character offsets
//! - [`analysis`] -- tagger readings attached to tokens
//! - [`probability`] -- language model probability results
//! - [`replacement`] -- ranked suggestion output

pub mod analysis;
pub mod character;
pub mod probability;
pub mod replacement;
pub mod token;

pub use analysis::{AnalyzedToken, Reading};
pub use probability::Probability;
pub use replacement::SuggestedReplacement;
pub use token::{Token, TokenType};

