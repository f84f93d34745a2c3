// Scoring policies: turn a candidate's features into a single sort key.
// Origin: SuggestionsOrdererFeatureExtractor.java

use std::fmt;
use std::str::FromStr;

use crate::error::RankError;
use crate::features::CandidateFeatures;

/// How candidates are scored before sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoringPolicy {
    /// `ln(p1) + ln(p3)`.
    Ngrams,
    /// N-gram score plus `ln(p_mistake ^ distance)`.
    NgramsLevenshtein,
    /// N-gram score plus the log of the binomial probability of `distance`
    /// errors among the candidate's characters.
    NgramsBinomialLevenshtein,
    /// Every candidate scores zero and the input order is kept.
    Nop,
}

impl ScoringPolicy {
    pub const ALL: [ScoringPolicy; 4] = [
        ScoringPolicy::Ngrams,
        ScoringPolicy::NgramsLevenshtein,
        ScoringPolicy::NgramsBinomialLevenshtein,
        ScoringPolicy::Nop,
    ];

    /// Configuration name of the policy.
    pub fn name(self) -> &'static str {
        match self {
            ScoringPolicy::Ngrams => "ngrams",
            ScoringPolicy::NgramsLevenshtein => "ngrams+levensthein",
            ScoringPolicy::NgramsBinomialLevenshtein => "ngrams+binomialLevensthein",
            ScoringPolicy::Nop => "nop",
        }
    }
}

impl fmt::Display for ScoringPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScoringPolicy {
    type Err = RankError;

    /// Case-sensitive exact match against the policy names. `"noop"` is
    /// accepted as an older spelling of `"nop"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ngrams" => Ok(ScoringPolicy::Ngrams),
            "ngrams+levensthein" => Ok(ScoringPolicy::NgramsLevenshtein),
            "ngrams+binomialLevensthein" => Ok(ScoringPolicy::NgramsBinomialLevenshtein),
            "nop" | "noop" => Ok(ScoringPolicy::Nop),
            other => Err(RankError::UnknownPolicy(other.to_string())),
        }
    }
}

/// A policy together with its numeric parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringParams {
    pub policy: ScoringPolicy,
    /// Per-edit (or per-character) probability of a typing mistake.
    pub mistake_probability: f64,
    /// Number of input candidates to score; `None` scores all of them.
    pub top_n: Option<usize>,
}

impl ScoringParams {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self {
            policy,
            mistake_probability: 1.0,
            top_n: None,
        }
    }

    pub fn with_mistake_probability(mut self, p: f64) -> Self {
        self.mistake_probability = p;
        self
    }

    pub fn with_top_n(mut self, top_n: Option<usize>) -> Self {
        self.top_n = top_n;
        self
    }

    /// Score one candidate. Higher is better; `-inf` for candidates the
    /// language model considers impossible.
    pub fn score(&self, features: &CandidateFeatures) -> f64 {
        let ngram_score = features.prob1gram.ln() + features.prob3gram.ln();
        let distance = features.levenshtein;
        match self.policy {
            ScoringPolicy::Ngrams => ngram_score,
            ScoringPolicy::NgramsLevenshtein => {
                let exponent = i32::try_from(distance).unwrap_or(i32::MAX);
                ngram_score + self.mistake_probability.powi(exponent).ln()
            }
            ScoringPolicy::NgramsBinomialLevenshtein => {
                let p = binomial_probability(
                    self.mistake_probability,
                    features.word_length(),
                    distance,
                );
                ngram_score + p.ln()
            }
            ScoringPolicy::Nop => 0.0,
        }
    }

    /// Sort candidates by descending score. The sort is stable, so equal
    /// scores keep their input order; under [`ScoringPolicy::Nop`] the input
    /// is returned untouched.
    pub fn rank(&self, candidates: Vec<CandidateFeatures>) -> Vec<CandidateFeatures> {
        if self.policy == ScoringPolicy::Nop {
            return candidates;
        }
        let mut scored: Vec<(f64, CandidateFeatures)> =
            candidates.into_iter().map(|f| (self.score(&f), f)).collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.into_iter().map(|(_, f)| f).collect()
    }
}

/// `C(n, k)` as a float. Zero when `k > n`.
pub fn binomial_coefficient(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}

/// Probability of exactly `k` successes in `n` independent trials that each
/// succeed with probability `p`.
pub fn binomial_probability(p: f64, n: usize, k: usize) -> f64 {
    let successes = i32::try_from(k).unwrap_or(i32::MAX);
    let failures = i32::try_from(n.saturating_sub(k)).unwrap_or(i32::MAX);
    binomial_coefficient(n, k) * p.powi(successes) * (1.0 - p).powi(failures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spellrank_distance::EditOperationCount;

    fn features(candidate: &str, p1: f64, p3: f64, levenshtein: usize) -> CandidateFeatures {
        CandidateFeatures {
            candidate: candidate.to_string(),
            prob1gram: p1,
            prob3gram: p3,
            prob4gram: 0.0,
            word_count: 0,
            levenshtein,
            detailed: EditOperationCount::ZERO,
            jaro_winkler: 0.0,
            source_word: "x".to_string(),
            source_word_length: 1,
        }
    }

    fn names(ranked: &[CandidateFeatures]) -> Vec<&str> {
        ranked.iter().map(|f| f.candidate.as_str()).collect()
    }

    #[test]
    fn parse_policy_names() {
        for policy in ScoringPolicy::ALL {
            assert_eq!(policy.name().parse::<ScoringPolicy>().unwrap(), policy);
            assert_eq!(policy.to_string(), policy.name());
        }
        assert_eq!("noop".parse::<ScoringPolicy>().unwrap(), ScoringPolicy::Nop);
    }

    #[test]
    fn unknown_policy_is_an_error() {
        let err = "bogus".parse::<ScoringPolicy>().unwrap_err();
        assert!(matches!(err, RankError::UnknownPolicy(ref s) if s == "bogus"));
        assert!("Ngrams".parse::<ScoringPolicy>().is_err());
        assert!("ngrams+levenshtein".parse::<ScoringPolicy>().is_err());
        assert!("".parse::<ScoringPolicy>().is_err());
    }

    #[test]
    fn ngram_score_is_log_sum() {
        let params = ScoringParams::new(ScoringPolicy::Ngrams);
        let s = params.score(&features("a", 0.5, 0.25, 2));
        assert!((s - (0.5f64.ln() + 0.25f64.ln())).abs() < 1e-12);
        assert_eq!(params.score(&features("a", 0.5, 0.0, 0)), f64::NEG_INFINITY);
    }

    #[test]
    fn geometric_distance_penalty() {
        let params =
            ScoringParams::new(ScoringPolicy::NgramsLevenshtein).with_mistake_probability(0.1);
        let base = 0.5f64.ln() * 2.0;
        let s = params.score(&features("a", 0.5, 0.5, 2));
        assert!((s - (base + 0.01f64.ln())).abs() < 1e-12);
        // Default mistake probability of 1.0 leaves the score unchanged.
        let neutral = ScoringParams::new(ScoringPolicy::NgramsLevenshtein);
        assert!((neutral.score(&features("a", 0.5, 0.5, 3)) - base).abs() < 1e-12);
    }

    #[test]
    fn binomial_distance_penalty() {
        let params = ScoringParams::new(ScoringPolicy::NgramsBinomialLevenshtein)
            .with_mistake_probability(0.1);
        let base = 0.5f64.ln() * 2.0;
        // "abcd": n = 4, k = 1 -> 4 * 0.1 * 0.9^3
        let s = params.score(&features("abcd", 0.5, 0.5, 1));
        let expected = base + (4.0 * 0.1 * 0.9f64.powi(3)).ln();
        assert!((s - expected).abs() < 1e-12);
    }

    #[test]
    fn nop_scores_zero() {
        let params = ScoringParams::new(ScoringPolicy::Nop);
        assert_eq!(params.score(&features("a", 0.1, 0.0, 3)), 0.0);
    }

    #[test]
    fn binomial_helpers() {
        assert_eq!(binomial_coefficient(5, 0), 1.0);
        assert_eq!(binomial_coefficient(5, 2), 10.0);
        assert_eq!(binomial_coefficient(5, 5), 1.0);
        assert_eq!(binomial_coefficient(3, 4), 0.0);
        assert!((binomial_coefficient(30, 3) - 4060.0).abs() < 1e-9);
        assert!((binomial_probability(0.5, 2, 1) - 0.5).abs() < 1e-12);
        assert_eq!(binomial_probability(0.1, 2, 3), 0.0);
    }

    #[test]
    fn rank_sorts_descending() {
        let params = ScoringParams::new(ScoringPolicy::Ngrams);
        let ranked = params.rank(vec![
            features("low", 0.1, 0.1, 0),
            features("high", 0.9, 0.9, 0),
            features("mid", 0.5, 0.5, 0),
        ]);
        assert_eq!(names(&ranked), vec!["high", "mid", "low"]);
    }

    #[test]
    fn rank_keeps_ties_in_input_order() {
        let params = ScoringParams::new(ScoringPolicy::Ngrams);
        let ranked = params.rank(vec![
            features("b", 0.5, 0.5, 0),
            features("zero", 0.5, 0.0, 0),
            features("a", 0.5, 0.5, 0),
            features("c", 0.5, 0.5, 0),
            features("zero2", 0.0, 0.0, 0),
        ]);
        assert_eq!(names(&ranked), vec!["b", "a", "c", "zero", "zero2"]);
    }

    #[test]
    fn nop_keeps_input_order() {
        let params = ScoringParams::new(ScoringPolicy::Nop);
        let ranked = params.rank(vec![
            features("low", 0.1, 0.1, 0),
            features("high", 0.9, 0.9, 0),
        ]);
        assert_eq!(names(&ranked), vec!["low", "high"]);
    }

    #[test]
    fn distance_penalty_changes_order() {
        let params =
            ScoringParams::new(ScoringPolicy::NgramsLevenshtein).with_mistake_probability(0.01);
        let ranked = params.rank(vec![
            features("frequent_far", 0.9, 0.9, 3),
            features("rare_close", 0.1, 0.1, 1),
        ]);
        assert_eq!(names(&ranked), vec!["rare_close", "frequent_far"]);
    }
}
