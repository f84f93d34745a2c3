// Ordering with a per-candidate binary model over context features.
// Origin: SuggestionsOrdererGSoC.java
//
// For every candidate the sentence is corrected, the context window around
// the error is extracted, and the model scores how well the corrected
// window reads compared to the original one.

use std::sync::Arc;

use spellrank_core::SuggestedReplacement;
use spellrank_core::replacement::from_strings;
use spellrank_distance::{levenshtein, longest_common_prefix};
use tracing::{debug, error};

use super::{SuggestionsOrderer, sort_by_confidence};
use crate::context::{ContextWindow, DEFAULT_CONTEXT_LENGTH, context_for_correction};
use crate::error::ModelError;
use crate::language_model::LanguageModel;
use crate::model::ModelEvaluator;
use crate::tagger::AnalyzedSentence;
use crate::tokenizer::{WordTokenizer, ngram_strings};

/// Names of the context features, in model input order.
pub const CONTEXT_FEATURE_NAMES: [&str; 10] = [
    "left_context_covered_length",
    "left_context_covered_probability",
    "right_context_covered_length",
    "right_context_covered_probability",
    "left_context_correction_length",
    "left_context_correction_probability",
    "right_context_correction_length",
    "right_context_correction_probability",
    "first_letter_matches",
    "edit_distance",
];

/// Number of trailing tokens scored by the language model.
const PROBABILITY_WINDOW: usize = 3;

pub struct ContextualOrderer {
    language_model: Arc<dyn LanguageModel>,
    tokenizer: Arc<dyn WordTokenizer>,
    model: Option<Arc<dyn ModelEvaluator>>,
    context_length: usize,
}

impl ContextualOrderer {
    pub fn new(
        language_model: Arc<dyn LanguageModel>,
        tokenizer: Arc<dyn WordTokenizer>,
        model: Option<Arc<dyn ModelEvaluator>>,
    ) -> Self {
        Self {
            language_model,
            tokenizer,
            model,
            context_length: DEFAULT_CONTEXT_LENGTH,
        }
    }

    /// Maximum number of words taken on each side of the error.
    pub fn with_context_length(mut self, context_length: usize) -> Self {
        self.context_length = context_length;
        self
    }

    /// Feature vector for replacing `covered` with `replacement`, given the
    /// sentence before and after the correction.
    pub fn context_features(
        &self,
        sentence: &str,
        corrected: &str,
        covered: &str,
        replacement: &str,
    ) -> [f32; 10] {
        let window = context_for_correction(sentence, corrected, covered, self.context_length);
        let correction = window.with_replacement(replacement);

        let left_covered = self.side_tokens(&window.left, covered);
        let right_covered = self.side_tokens(&window.right, covered);
        let left_correction = self.side_tokens(&correction.left, replacement);
        let right_correction = self.side_tokens(&correction.right, replacement);

        let first_letter_matches = !longest_common_prefix(&[covered, replacement]).is_empty();
        [
            left_covered.len() as f32,
            self.string_probability(&left_covered),
            right_covered.len() as f32,
            self.string_probability(&right_covered),
            left_correction.len() as f32,
            self.string_probability(&left_correction),
            right_correction.len() as f32,
            self.string_probability(&right_correction),
            if first_letter_matches { 1.0 } else { 0.0 },
            levenshtein(covered, replacement) as f32,
        ]
    }

    /// Score every candidate, failing on the first model error.
    pub fn rank(
        &self,
        model: &dyn ModelEvaluator,
        suggestions: &[String],
        word: &str,
        sentence: &AnalyzedSentence,
        start_pos: usize,
    ) -> Result<Vec<SuggestedReplacement>, ModelError> {
        let text = sentence.text();
        let word_len = word.chars().count();

        let mut ranked = Vec::with_capacity(suggestions.len());
        for suggestion in suggestions {
            let corrected = correct_sentence(text, start_pos, word_len, suggestion);
            let features = self.context_features(text, &corrected, word, suggestion);
            let score = model.evaluate(&features)?.first().copied().unwrap_or(0.0);
            debug!(candidate = %suggestion, ?features, score, "contextual candidate score");
            ranked.push(SuggestedReplacement::new(suggestion.clone()).with_confidence(score));
        }
        sort_by_confidence(&mut ranked);
        Ok(ranked)
    }

    /// Tokens of one side of the window, or of `fallback` when that side
    /// has no context.
    fn side_tokens(&self, side: &str, fallback: &str) -> Vec<String> {
        let text = if side.is_empty() { fallback } else { side };
        ngram_strings(self.tokenizer.as_ref(), text)
    }

    fn string_probability(&self, tokens: &[String]) -> f32 {
        if tokens.is_empty() {
            return 0.0;
        }
        let tail = &tokens[tokens.len().saturating_sub(PROBABILITY_WINDOW)..];
        self.language_model.pseudo_probability(tail).prob as f32
    }
}

/// `text` with the `word_len` characters at `start` replaced by
/// `suggestion`.
fn correct_sentence(text: &str, start: usize, word_len: usize, suggestion: &str) -> String {
    let mut corrected: String = text.chars().take(start).collect();
    corrected.push_str(suggestion);
    corrected.extend(text.chars().skip(start + word_len));
    corrected
}

impl SuggestionsOrderer for ContextualOrderer {
    fn name(&self) -> &'static str {
        "contextual"
    }

    fn is_ml_available(&self) -> bool {
        self.model.is_some()
    }

    fn order_suggestions(
        &self,
        suggestions: &[String],
        word: &str,
        sentence: &AnalyzedSentence,
        start_pos: usize,
    ) -> Vec<SuggestedReplacement> {
        let Some(model) = &self.model else {
            return from_strings(suggestions.iter().cloned());
        };
        match self.rank(model.as_ref(), suggestions, word, sentence, start_pos) {
            Ok(ranked) => ranked,
            Err(e) => {
                error!(error = %e, word, "failed to apply contextual model, keeping input order");
                from_strings(suggestions.iter().cloned())
            }
        }
    }
}

/// Context window of `covered` in `sentence` as seen by the orderer; used
/// by diagnostics that want to show what the model looked at.
pub fn correction_window(
    sentence: &str,
    start: usize,
    covered: &str,
    replacement: &str,
    context_length: usize,
) -> (ContextWindow, ContextWindow) {
    let corrected = correct_sentence(sentence, start, covered.chars().count(), replacement);
    let window = context_for_correction(sentence, &corrected, covered, context_length);
    let correction = window.with_replacement(replacement);
    (window, correction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language_model::MockLanguageModel;
    use crate::model::LogisticModel;
    use crate::tagger::NoopTagger;
    use crate::tokenizer::SimpleWordTokenizer;
    use spellrank_core::replacement::to_strings;

    const SENTENCE: &str = "I would like a bigg house in the city";

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn orderer(model: Option<Arc<dyn ModelEvaluator>>) -> ContextualOrderer {
        ContextualOrderer::new(Arc::new(MockLanguageModel), Arc::new(SimpleWordTokenizer), model)
    }

    /// Rewards a matching first letter, penalizes edit distance.
    fn spelling_model() -> Arc<dyn ModelEvaluator> {
        let mut weights = vec![0.0; CONTEXT_FEATURE_NAMES.len()];
        weights[8] = 2.0;
        weights[9] = -1.0;
        Arc::new(LogisticModel { weights, bias: 0.0 })
    }

    #[test]
    fn features_with_full_context() {
        let o = orderer(None);
        let corrected = "I would like a big house in the city";
        let f = o.context_features(SENTENCE, corrected, "bigg", "big");
        assert_eq!(f, [3.0, 0.5, 3.0, 0.5, 3.0, 0.5, 3.0, 0.5, 1.0, 1.0]);
    }

    #[test]
    fn features_without_context_use_the_words() {
        let o = orderer(None);
        let f = o.context_features("bigg", "big", "bigg", "big");
        assert_eq!(f, [1.0, 0.5, 1.0, 0.5, 1.0, 0.5, 1.0, 0.5, 1.0, 1.0]);
    }

    #[test]
    fn first_letter_and_distance() {
        let o = orderer(None);
        let f = o.context_features("a hoose", "a mouse", "hoose", "mouse");
        assert_eq!(f[8], 0.0);
        assert_eq!(f[9], 1.0);
    }

    #[test]
    fn correction_windows() {
        let (window, correction) = correction_window(SENTENCE, 15, "bigg", "big", 2);
        assert_eq!(window.left, "like a bigg");
        assert_eq!(correction.left, "like a big");
        assert_eq!(correction.right, "big house in");
    }

    #[test]
    fn corrects_by_characters() {
        assert_eq!(correct_sentence("un cafè bo", 3, 4, "café"), "un café bo");
        assert_eq!(correct_sentence("hoose", 0, 5, "house"), "house");
    }

    #[test]
    fn model_orders_candidates() {
        let o = orderer(Some(spelling_model()));
        assert!(o.is_ml_available());
        let s = AnalyzedSentence::analyze("I like this hoose very much", &SimpleWordTokenizer, &NoopTagger);
        let ranked = o.order_suggestions(&strings(&["mouse", "hose", "house"]), "hoose", &s, 12);
        assert_eq!(to_strings(&ranked), vec!["hose", "house", "mouse"]);
        assert!(ranked.iter().all(|r| r.confidence.is_some()));
        assert!(ranked[0].confidence > ranked[2].confidence);
    }

    #[test]
    fn without_model_keeps_input_order() {
        let o = orderer(None);
        assert!(!o.is_ml_available());
        let s = AnalyzedSentence::analyze("a hoose", &SimpleWordTokenizer, &NoopTagger);
        let input = strings(&["mouse", "hose", "house"]);
        let ranked = o.order_suggestions(&input, "hoose", &s, 2);
        assert_eq!(to_strings(&ranked), input);
        assert!(ranked.iter().all(|r| r.confidence.is_none()));
    }

    #[test]
    fn model_error_keeps_input_order() {
        let broken: Arc<dyn ModelEvaluator> = Arc::new(LogisticModel {
            weights: vec![1.0; 4],
            bias: 0.0,
        });
        let o = orderer(Some(broken));
        let s = AnalyzedSentence::analyze("a hoose", &SimpleWordTokenizer, &NoopTagger);
        let input = strings(&["mouse", "house"]);
        assert_eq!(to_strings(&o.order_suggestions(&input, "hoose", &s, 2)), input);
    }
}
