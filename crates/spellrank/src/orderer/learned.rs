// Ordering with a learned model that sees all candidates at once.
// Origin: XGBoostSuggestionsOrderer.java
//
// The model input is the match features followed by the feature maps of
// the first `MODEL_TOP_N` candidates in input order, zero-padded when there
// are fewer candidates. The model outputs one probability per class; a
// class label is either a candidate index or -1 ("correction not in the
// list").

use std::collections::BTreeMap;
use std::sync::Arc;

use spellrank_core::SuggestedReplacement;
use spellrank_core::replacement::from_strings;
use tracing::{debug, error};

use super::policy::FeatureOrderer;
use super::{SuggestionsOrderer, sort_by_confidence};
use crate::error::ModelError;
use crate::language_model::LanguageModel;
use crate::model::ModelEvaluator;
use crate::scoring::{ScoringParams, ScoringPolicy};
use crate::tagger::AnalyzedSentence;
use crate::tokenizer::WordTokenizer;

/// Number of candidates the model is trained to look at.
pub const MODEL_TOP_N: usize = 5;

/// Default class labels of the model outputs.
pub const DEFAULT_MODEL_CLASSES: [i32; 6] = [-1, 0, 1, 2, 3, 4];

/// Orders the first [`MODEL_TOP_N`] candidates by the class probabilities
/// of a tree ensemble.
pub struct ModelOrderer {
    features: FeatureOrderer,
    model: Arc<dyn ModelEvaluator>,
    classes: Vec<i32>,
    auto_correct_threshold: f32,
}

impl ModelOrderer {
    pub fn new(
        language_model: Arc<dyn LanguageModel>,
        tokenizer: Arc<dyn WordTokenizer>,
        model: Arc<dyn ModelEvaluator>,
    ) -> Self {
        let params = ScoringParams::new(ScoringPolicy::Nop).with_top_n(Some(MODEL_TOP_N));
        Self {
            features: FeatureOrderer::new(language_model, tokenizer, params),
            model,
            classes: DEFAULT_MODEL_CLASSES.to_vec(),
            auto_correct_threshold: f32::INFINITY,
        }
    }

    /// Class label of each model output, in output order.
    pub fn with_classes(mut self, classes: Vec<i32>) -> Self {
        self.classes = classes;
        self
    }

    /// Minimum top confidence for an automatic correction. Defaults to
    /// infinity (never).
    pub fn with_auto_correct_threshold(mut self, threshold: f32) -> Self {
        self.auto_correct_threshold = threshold;
        self
    }

    /// Rank the candidates, failing on any model error.
    pub fn rank(
        &self,
        suggestions: &[String],
        word: &str,
        sentence: &AnalyzedSentence,
        start_pos: usize,
    ) -> Result<Vec<SuggestedReplacement>, ModelError> {
        let (candidates, match_data) =
            self.features.compute_features(suggestions, word, sentence, start_pos);
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let input = model_input(&match_data, &candidates, MODEL_TOP_N);
        let probabilities = self.model.evaluate(&input)?;
        if probabilities.len() != self.classes.len() {
            return Err(ModelError::OutputCountMismatch {
                expected: self.classes.len(),
                actual: probabilities.len(),
            });
        }

        let mut ranked: Vec<SuggestedReplacement> = candidates
            .into_iter()
            .enumerate()
            .map(|(index, candidate)| {
                let label = i32::try_from(index).unwrap_or(i32::MAX);
                let confidence = self
                    .classes
                    .iter()
                    .position(|&c| c == label)
                    .map_or(0.0, |i| probabilities[i]);
                candidate.with_confidence(confidence)
            })
            .collect();
        sort_by_confidence(&mut ranked);
        debug!(
            top = ranked.first().map(|s| s.replacement.as_str()),
            confidence = ranked.first().and_then(|s| s.confidence),
            "ranked candidates with model"
        );
        Ok(ranked)
    }
}

/// Flatten match and candidate features into the fixed-length model input.
///
/// Candidate feature maps are assumed to share one key set; the input has
/// room for `top_n` of them and unused slots are zero.
pub fn model_input(
    match_data: &BTreeMap<String, f32>,
    candidates: &[SuggestedReplacement],
    top_n: usize,
) -> Vec<f32> {
    let per_candidate = candidates.first().map_or(0, |c| c.features.len());
    let mut input = Vec::with_capacity(match_data.len() + top_n * per_candidate);
    input.extend(match_data.values().copied());
    for candidate in candidates.iter().take(top_n) {
        input.extend(candidate.features.values().copied());
    }
    input.resize(match_data.len() + top_n * per_candidate, 0.0);
    input
}

impl SuggestionsOrderer for ModelOrderer {
    fn name(&self) -> &'static str {
        "model"
    }

    fn is_ml_available(&self) -> bool {
        true
    }

    fn order_suggestions(
        &self,
        suggestions: &[String],
        word: &str,
        sentence: &AnalyzedSentence,
        start_pos: usize,
    ) -> Vec<SuggestedReplacement> {
        match self.rank(suggestions, word, sentence, start_pos) {
            Ok(ranked) => ranked,
            Err(e) => {
                error!(error = %e, word, "failed to apply ranking model, keeping input order");
                from_strings(suggestions.iter().cloned())
            }
        }
    }

    fn should_auto_correct(&self, ranked: &[SuggestedReplacement]) -> bool {
        ranked
            .first()
            .and_then(|s| s.confidence)
            .is_some_and(|c| c >= self.auto_correct_threshold)
    }
}
