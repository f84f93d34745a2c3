// Language model probability results.

use serde::{Deserialize, Serialize};

/// A pseudo-probability returned by a language model for a token sequence.
///
/// `coverage` is the fraction of the sequence's prefixes that the model
/// has actually seen (1.0 = every n-gram was found). `occurrences` is the
/// raw count of the full sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Probability {
    pub prob: f64,
    pub coverage: f32,
    pub occurrences: u64,
}

impl Probability {
    /// Create a probability. `prob` and `coverage` are clamped to `[0, 1]`;
    /// NaN maps to zero.
    pub fn new(prob: f64, coverage: f32, occurrences: u64) -> Self {
        Self {
            prob: if prob.is_nan() { 0.0 } else { prob.clamp(0.0, 1.0) },
            coverage: if coverage.is_nan() { 0.0 } else { coverage.clamp(0.0, 1.0) },
            occurrences,
        }
    }

    /// Create a probability without occurrence information.
    pub fn with_coverage(prob: f64, coverage: f32) -> Self {
        Self::new(prob, coverage, 0)
    }

    /// Natural logarithm of the probability (`-inf` for zero).
    pub fn log_prob(&self) -> f64 {
        self.prob.ln()
    }
}
