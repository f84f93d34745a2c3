//! Edit distances for spelling suggestion ranking.
//!
//! # Architecture
//!
//! - [`detailed`] -- Damerau-Levenshtein distance broken down into per-operation counts
//! - [`simple`] -- scalar Levenshtein / optimal string alignment distances, with a cap
//! - [`similarity`] -- normalized similarity scores and prefix helpers
//! - [`mutation`] -- random edit operations for generating misspelled test data
//!   (behind the `mutation` feature)

pub mod detailed;
pub mod similarity;
pub mod simple;

#[cfg(feature = "mutation")]
pub mod mutation;

pub use detailed::{EditOperationCount, compare};
pub use similarity::{jaro_winkler, longest_common_prefix};
pub use simple::{capped_distance, levenshtein};

/// Cap applied to the simple edit distance used as a ranking feature.
///
/// Candidates further away than this still get ranked; they just stop
/// being penalized any harder.
pub const DEFAULT_DISTANCE_CAP: usize = 3;
