// Per-candidate feature vectors.
// Origin: SuggestionsOrdererFeatureExtractor.java
//
// Features are computed once per candidate per ranking call. The named
// feature map is what learned models see; its keys are sorted, and the
// sorted order is the model's input order.

use std::collections::BTreeMap;
use std::sync::Arc;

use spellrank_distance::{
    DEFAULT_DISTANCE_CAP, EditOperationCount, capped_distance, compare, jaro_winkler,
};
use tracing::{debug, warn};

use crate::language_model::LanguageModel;
use crate::ngram::{probability_3gram_at, probability_4gram_at, token_index_at};
use crate::tagger::AnalyzedSentence;
use crate::tokenizer::{WordTokenizer, ngram_strings};

/// Names of the per-candidate features, in model input order.
pub const FEATURE_NAMES: [&str; 10] = [
    "deletes",
    "inserts",
    "jaroWrinkler",
    "levensthein",
    "prob1gram",
    "prob3gram",
    "replaces",
    "transposes",
    "wordCount",
    "wordLength",
];

/// Name of the only match-level feature.
pub const CANDIDATE_COUNT: &str = "candidateCount";

/// Everything the scoring policies and learned models know about one
/// replacement candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateFeatures {
    pub candidate: String,
    pub prob1gram: f64,
    pub prob3gram: f64,
    pub prob4gram: f64,
    pub word_count: u64,
    /// Simple edit distance to the source word, capped.
    pub levenshtein: usize,
    pub detailed: EditOperationCount,
    pub jaro_winkler: f64,
    pub source_word: String,
    pub source_word_length: usize,
}

impl CandidateFeatures {
    /// Length of the candidate in characters.
    pub fn word_length(&self) -> usize {
        self.candidate.chars().count()
    }

    /// Named feature values, keyed by the entries of [`FEATURE_NAMES`].
    ///
    /// The 4-gram probability and the source word are diagnostics only and
    /// are left out.
    pub fn feature_map(&self) -> BTreeMap<String, f32> {
        let values = [
            self.detailed.deletes as f32,
            self.detailed.inserts as f32,
            self.jaro_winkler as f32,
            self.levenshtein as f32,
            self.prob1gram as f32,
            self.prob3gram as f32,
            self.detailed.replaces as f32,
            self.detailed.transposes as f32,
            self.word_count as f32,
            self.word_length() as f32,
        ];
        FEATURE_NAMES
            .iter()
            .zip(values)
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }
}

/// Features describing the match as a whole rather than one candidate.
pub fn match_features(candidates: &[CandidateFeatures]) -> BTreeMap<String, f32> {
    BTreeMap::from([(CANDIDATE_COUNT.to_string(), candidates.len() as f32)])
}

/// Computes [`CandidateFeatures`] for a list of suggestions.
pub struct FeatureExtractor {
    language_model: Arc<dyn LanguageModel>,
    tokenizer: Arc<dyn WordTokenizer>,
    top_n: Option<usize>,
    distance_cap: usize,
}

impl FeatureExtractor {
    pub fn new(language_model: Arc<dyn LanguageModel>, tokenizer: Arc<dyn WordTokenizer>) -> Self {
        Self {
            language_model,
            tokenizer,
            top_n: None,
            distance_cap: DEFAULT_DISTANCE_CAP,
        }
    }

    /// Only the first `top_n` suggestions (in input order) get features;
    /// the rest are dropped. `None` or zero keeps every suggestion.
    pub fn with_top_n(mut self, top_n: Option<usize>) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn top_n(&self) -> Option<usize> {
        self.top_n
    }

    pub fn language_model(&self) -> &Arc<dyn LanguageModel> {
        &self.language_model
    }

    /// Compute features for `suggestions` as replacements of `word`, which
    /// starts at character `start_pos` of `sentence`.
    pub fn extract(
        &self,
        suggestions: &[String],
        word: &str,
        sentence: &AnalyzedSentence,
        start_pos: usize,
    ) -> Vec<CandidateFeatures> {
        if suggestions.is_empty() {
            return Vec::new();
        }
        let limit = match self.top_n {
            Some(n) if n > 0 => n.min(suggestions.len()),
            _ => suggestions.len(),
        };

        let tokens = sentence.ngram_tokens();
        let index = token_index_at(&tokens, start_pos);
        if index.is_none() {
            warn!(
                sentence = sentence.text(),
                start_pos, "no n-gram token at error position, contextual probabilities are zero"
            );
        }
        let lm = self.language_model.as_ref();
        let source_word_length = word.chars().count();

        suggestions[..limit]
            .iter()
            .map(|candidate| {
                let new_tokens = ngram_strings(self.tokenizer.as_ref(), candidate);
                let (prob3gram, prob4gram) = match index {
                    Some(i) => (
                        probability_3gram_at(lm, &tokens, i, &new_tokens),
                        probability_4gram_at(lm, &tokens, i, &new_tokens),
                    ),
                    None => (0.0, 0.0),
                };
                let features = CandidateFeatures {
                    candidate: candidate.clone(),
                    prob1gram: lm.pseudo_probability(std::slice::from_ref(candidate)).prob,
                    prob3gram,
                    prob4gram,
                    word_count: lm.count(candidate),
                    levenshtein: capped_distance(word, candidate, self.distance_cap),
                    detailed: compare(word, candidate),
                    jaro_winkler: jaro_winkler(word, candidate),
                    source_word: word.to_string(),
                    source_word_length,
                };
                debug!(candidate = %candidate, ?features, "candidate features");
                features
            })
            .collect()
    }
}
