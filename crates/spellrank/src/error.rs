// Error types for ranker construction, collaborator loading and model
// evaluation.

use std::path::PathBuf;

/// Fatal errors raised while building a ranker.
///
/// Everything that can go wrong once a ranker exists is handled inside the
/// ranking path (fallback to the input order), so this type only shows up
/// at construction time.
#[derive(Debug, thiserror::Error)]
pub enum RankError {
    /// The scoring policy name is not one of the recognized set.
    #[error("unknown scoring policy: {0:?}")]
    UnknownPolicy(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors from reading or validating a [`RankerConfig`](crate::config::RankerConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Errors from loading an n-gram count table.
#[derive(Debug, thiserror::Error)]
pub enum LanguageModelError {
    #[error("failed to read n-gram table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed n-gram table line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// Errors from loading or evaluating a learned ranking model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read model {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid model: {0}")]
    Invalid(String),

    #[error("feature count mismatch: model expects {expected}, got {actual}")]
    FeatureCountMismatch { expected: usize, actual: usize },

    #[error("model returned {actual} outputs, expected {expected}")]
    OutputCountMismatch { expected: usize, actual: usize },

    #[error("tree {tree} is malformed: {reason}")]
    MalformedTree { tree: usize, reason: String },
}
