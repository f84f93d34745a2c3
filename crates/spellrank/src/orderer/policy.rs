// Policy-based ordering over candidate features.
// Origin: SuggestionsOrdererFeatureExtractor.java

use std::collections::BTreeMap;
use std::sync::Arc;

use spellrank_core::SuggestedReplacement;
use tracing::debug;

use super::SuggestionsOrderer;
use crate::features::{CandidateFeatures, FeatureExtractor, match_features};
use crate::language_model::LanguageModel;
use crate::scoring::ScoringParams;
use crate::tagger::AnalyzedSentence;
use crate::tokenizer::WordTokenizer;

/// Orders candidates by a [`ScoringPolicy`](crate::scoring::ScoringPolicy)
/// applied to their features. Every returned suggestion carries its
/// feature map; none carries a confidence.
pub struct FeatureOrderer {
    extractor: FeatureExtractor,
    params: ScoringParams,
}

impl FeatureOrderer {
    pub fn new(
        language_model: Arc<dyn LanguageModel>,
        tokenizer: Arc<dyn WordTokenizer>,
        params: ScoringParams,
    ) -> Self {
        let extractor = FeatureExtractor::new(language_model, tokenizer).with_top_n(params.top_n);
        Self { extractor, params }
    }

    pub fn params(&self) -> &ScoringParams {
        &self.params
    }

    /// Candidate features in ranked order.
    pub fn ranked_features(
        &self,
        suggestions: &[String],
        word: &str,
        sentence: &AnalyzedSentence,
        start_pos: usize,
    ) -> Vec<CandidateFeatures> {
        let features = self.extractor.extract(suggestions, word, sentence, start_pos);
        self.params.rank(features)
    }

    /// Ranked suggestions with their feature maps, plus the features of the
    /// match as a whole.
    pub fn compute_features(
        &self,
        suggestions: &[String],
        word: &str,
        sentence: &AnalyzedSentence,
        start_pos: usize,
    ) -> (Vec<SuggestedReplacement>, BTreeMap<String, f32>) {
        if suggestions.is_empty() {
            return (Vec::new(), BTreeMap::new());
        }
        let ranked = self.ranked_features(suggestions, word, sentence, start_pos);
        let match_data = match_features(&ranked);
        debug!(
            policy = %self.params.policy,
            candidates = ranked.len(),
            "ranked candidates by policy"
        );
        let suggestions = ranked
            .iter()
            .map(|f| SuggestedReplacement::new(f.candidate.clone()).with_features(f.feature_map()))
            .collect();
        (suggestions, match_data)
    }
}

impl SuggestionsOrderer for FeatureOrderer {
    fn name(&self) -> &'static str {
        "policy"
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
        self.compute_features(suggestions, word, sentence, start_pos).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language_model::{MockLanguageModel, NgramCountModel};
    use crate::scoring::ScoringPolicy;
    use crate::tagger::NoopTagger;
    use crate::tokenizer::SimpleWordTokenizer;
    use spellrank_core::replacement::to_strings;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sentence(text: &str) -> AnalyzedSentence {
        AnalyzedSentence::analyze(text, &SimpleWordTokenizer, &NoopTagger)
    }

    fn orderer(lm: impl LanguageModel + 'static, params: ScoringParams) -> FeatureOrderer {
        FeatureOrderer::new(Arc::new(lm), Arc::new(SimpleWordTokenizer), params)
    }

    fn counts() -> NgramCountModel {
        NgramCountModel::from_counts([
            (vec!["the"], 40),
            (vec!["house"], 12),
            (vec!["horse"], 3),
            (vec!["hose"], 1),
            (vec!["is"], 30),
            (vec!["big"], 8),
            (vec!["the", "house"], 6),
            (vec!["the", "house", "is"], 3),
            (vec!["house", "is"], 5),
            (vec!["house", "is", "big"], 2),
            (vec!["the", "horse"], 1),
        ])
    }

    #[test]
    fn ngram_policy_prefers_likely_candidate() {
        let o = orderer(counts(), ScoringParams::new(ScoringPolicy::Ngrams));
        let s = sentence("the hoose is big");
        let ranked = o.order_suggestions(&strings(&["hose", "horse", "house"]), "hoose", &s, 4);
        assert_eq!(to_strings(&ranked)[0], "house");
        assert!(ranked.iter().all(|r| r.confidence.is_none()));
        assert!(ranked.iter().all(|r| r.features.len() == 10));
    }

    #[test]
    fn nop_policy_keeps_input_order() {
        let o = orderer(counts(), ScoringParams::new(ScoringPolicy::Nop));
        let s = sentence("the hoose is big");
        let input = strings(&["hose", "horse", "house"]);
        let ranked = o.order_suggestions(&input, "hoose", &s, 4);
        assert_eq!(to_strings(&ranked), input);
    }

    #[test]
    fn mock_model_keeps_input_order() {
        let o = orderer(MockLanguageModel, ScoringParams::new(ScoringPolicy::Ngrams));
        let s = sentence("the hoose is big");
        let input = strings(&["hose", "horse", "house"]);
        assert_eq!(to_strings(&o.order_suggestions(&input, "hoose", &s, 4)), input);
    }

    #[test]
    fn top_n_drops_later_candidates() {
        let params = ScoringParams::new(ScoringPolicy::Ngrams).with_top_n(Some(2));
        let o = orderer(counts(), params);
        let s = sentence("the hoose is big");
        let (ranked, match_data) =
            o.compute_features(&strings(&["hose", "horse", "house"]), "hoose", &s, 4);
        assert_eq!(ranked.len(), 2);
        assert!(!to_strings(&ranked).contains(&"house".to_string()));
        assert_eq!(match_data["candidateCount"], 2.0);
    }

    #[test]
    fn empty_input() {
        let o = orderer(counts(), ScoringParams::new(ScoringPolicy::Ngrams));
        let s = sentence("the hoose");
        let (ranked, match_data) = o.compute_features(&[], "hoose", &s, 4);
        assert!(ranked.is_empty());
        assert!(match_data.is_empty());
    }

    #[test]
    fn ranking_is_deterministic() {
        let o = orderer(
            counts(),
            ScoringParams::new(ScoringPolicy::NgramsBinomialLevenshtein)
                .with_mistake_probability(0.05),
        );
        let s = sentence("the hoose is big");
        let input = strings(&["hose", "horse", "house", "hoosier"]);
        let first = o.order_suggestions(&input, "hoose", &s, 4);
        for _ in 0..5 {
            assert_eq!(o.order_suggestions(&input, "hoose", &s, 4), first);
        }
    }
}
