// Language model seam and the two in-crate implementations.
// Origin: LuceneSingleIndexLanguageModel.java (count lookups)
//
// Production language models (large n-gram indexes) live outside this
// crate and plug in through the `LanguageModel` trait. `MockLanguageModel`
// is the neutral fallback used when no model is available, and
// `NgramCountModel` is a small in-memory count table for tests and the
// command-line tools.

use std::io::BufRead;
use std::path::Path;

use hashbrown::HashMap;
use spellrank_core::Probability;
use tracing::{debug, trace};

use crate::error::LanguageModelError;

/// An n-gram language model.
///
/// Implementations must be safe to share across threads; the ranker only
/// ever reads from them.
pub trait LanguageModel: Send + Sync {
    /// Pseudo-probability of the token sequence `context`.
    fn pseudo_probability(&self, context: &[String]) -> Probability;

    /// Raw corpus occurrence count of a single word.
    fn count(&self, word: &str) -> u64;

    /// `true` for the neutral stand-in model.
    fn is_mock(&self) -> bool {
        false
    }
}

// ============================================================================
// MockLanguageModel
// ============================================================================

/// Neutral language model: every sequence gets probability 0.5 with full
/// coverage, every word a count of zero.
///
/// All candidates score the same under it, so rankings built on top of it
/// keep the input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockLanguageModel;

impl MockLanguageModel {
    pub const PROBABILITY: f64 = 0.5;
}

impl LanguageModel for MockLanguageModel {
    fn pseudo_probability(&self, _context: &[String]) -> Probability {
        Probability::with_coverage(Self::PROBABILITY, 1.0)
    }

    fn count(&self, _word: &str) -> u64 {
        0
    }

    fn is_mock(&self) -> bool {
        true
    }
}

// ============================================================================
// NgramCountModel
// ============================================================================

/// In-memory n-gram count table.
///
/// Keys are the tokens of an n-gram joined by single spaces. The total
/// token count is the sum of all unigram counts.
#[derive(Debug, Clone, Default)]
pub struct NgramCountModel {
    counts: HashMap<String, u64>,
    total_tokens: u64,
}

impl NgramCountModel {
    /// Build a table from `(tokens, count)` pairs. Repeated n-grams add up,
    /// saturating at `u64::MAX`.
    pub fn from_counts<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Vec<S>, u64)>,
        S: AsRef<str>,
    {
        let mut model = Self::default();
        for (tokens, count) in entries {
            let tokens: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();
            // Saturating addition never fails.
            let _ = model.add(&tokens, count, |a, b| Some(a.saturating_add(b)));
        }
        model
    }

    /// Parse a table from tab-separated lines: `n-gram<TAB>count`, where the
    /// n-gram's tokens are separated by spaces. Blank lines and lines
    /// starting with `#` are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, LanguageModelError> {
        let mut model = Self::default();
        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.map_err(|e| LanguageModelError::Malformed {
                line: line_no,
                reason: e.to_string(),
            })?;
            let line = line.trim_end_matches(['\r', '\n']);
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((ngram, count)) = line.rsplit_once('\t') else {
                return Err(LanguageModelError::Malformed {
                    line: line_no,
                    reason: "expected n-gram and count separated by a tab".to_string(),
                });
            };
            let count: u64 = count.trim().parse().map_err(|_| LanguageModelError::Malformed {
                line: line_no,
                reason: format!("invalid count {count:?}"),
            })?;
            let tokens: Vec<&str> = ngram.split_whitespace().collect();
            if tokens.is_empty() {
                return Err(LanguageModelError::Malformed {
                    line: line_no,
                    reason: "empty n-gram".to_string(),
                });
            }
            model
                .add(&tokens, count, u64::checked_add)
                .ok_or_else(|| LanguageModelError::Malformed {
                    line: line_no,
                    reason: format!("count {count} overflows the table totals"),
                })?;
        }
        debug!(
            entries = model.counts.len(),
            total_tokens = model.total_tokens,
            "loaded n-gram count table"
        );
        Ok(model)
    }

    /// Load a table from a file in the [`from_reader`](Self::from_reader)
    /// format.
    pub fn load(path: &Path) -> Result<Self, LanguageModelError> {
        let file = std::fs::File::open(path).map_err(|source| LanguageModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Add `count` to an n-gram (and to the total for unigrams). Leaves the
    /// table untouched when `combine` reports an overflow.
    fn add(
        &mut self,
        tokens: &[&str],
        count: u64,
        combine: impl Fn(u64, u64) -> Option<u64>,
    ) -> Option<()> {
        let key = tokens.join(" ");
        let ngram_total = combine(self.counts.get(&key).copied().unwrap_or(0), count)?;
        if tokens.len() == 1 {
            self.total_tokens = combine(self.total_tokens, count)?;
        }
        self.counts.insert(key, ngram_total);
        Some(())
    }

    /// Count of an n-gram, zero when unseen.
    pub fn ngram_count<S: AsRef<str>>(&self, tokens: &[S]) -> u64 {
        let key = tokens.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ");
        self.counts.get(&key).copied().unwrap_or(0)
    }

    /// Sum of all unigram counts.
    pub fn total_tokens(&self) -> u64 {
        self.total_tokens
    }

    /// Number of distinct n-grams in the table.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl LanguageModel for NgramCountModel {
    /// Add-one smoothed chain rule over the prefixes of `context`.
    ///
    /// The first word is estimated against the total token count and every
    /// longer prefix against the count of the first word. Coverage is the
    /// fraction of prefixes with a non-zero count.
    fn pseudo_probability(&self, context: &[String]) -> Probability {
        let Some(first) = context.first() else {
            return Probability::with_coverage(0.0, 0.0);
        };
        let first_count = self.count(first);
        let mut covered = usize::from(first_count > 0);
        let first_smoothed = first_count as f64 + 1.0;
        let mut p = first_smoothed / (self.total_tokens as f64 + 1.0);
        for end in 2..=context.len() {
            let phrase_count = self.ngram_count(&context[..end]);
            if phrase_count > 0 {
                covered += 1;
            }
            p *= (phrase_count as f64 + 1.0) / first_smoothed;
        }
        let coverage = covered as f32 / context.len() as f32;
        trace!(?context, p, coverage, "pseudo probability");
        Probability::new(p.clamp(0.0, 1.0), coverage, self.ngram_count(context))
    }

    fn count(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }
}
