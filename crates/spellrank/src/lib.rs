//! Re-ranking of spelling suggestions.
//!
//! A speller proposes replacement candidates for a misspelled word; this
//! crate reorders them using an n-gram language model, edit distances and,
//! optionally, a learned model.
//!
//! # Architecture
//!
//! - [`language_model`] -- language model seam, neutral mock, in-memory count table
//! - [`tokenizer`] -- word tokenizer seam and n-gram token helpers
//! - [`tagger`] -- tagger seam and analyzed sentences
//! - [`ngram`] -- context windows and 3-/4-gram probabilities around an error
//! - [`context`] -- textual context windows for contextual models
//! - [`features`] -- per-candidate feature vectors
//! - [`scoring`] -- scoring policies
//! - [`model`] -- learned model evaluation (tree ensembles, logistic regression)
//! - [`orderer`] -- ordering strategies built on the above
//! - [`config`] -- ranker configuration
//! - [`ranker`] -- the facade wiring everything together

pub mod config;
pub mod context;
pub mod error;
pub mod features;
pub mod language_model;
pub mod model;
pub mod ngram;
pub mod orderer;
pub mod ranker;
pub mod scoring;
pub mod tagger;
pub mod tokenizer;

pub use config::RankerConfig;
pub use error::{ConfigError, LanguageModelError, ModelError, RankError};
pub use language_model::{LanguageModel, MockLanguageModel, NgramCountModel};
pub use model::ModelEvaluator;
pub use orderer::SuggestionsOrderer;
pub use ranker::{Collaborators, Fallback, RankedSuggestions, SuggestionRanker};
pub use scoring::{ScoringParams, ScoringPolicy};
pub use tagger::{AnalyzedSentence, NoopTagger, Tagger};
pub use tokenizer::{SimpleWordTokenizer, WordTokenizer};
