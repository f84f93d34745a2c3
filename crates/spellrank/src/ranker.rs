// Ranker facade: wires collaborators and configuration into one orderer.
// Origin: SpellingCheckRule.java

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use spellrank_core::SuggestedReplacement;
use tracing::{debug, info, warn};

use crate::config::RankerConfig;
use crate::error::RankError;
use crate::language_model::{LanguageModel, MockLanguageModel, NgramCountModel};
use crate::model::{ModelEvaluator, load_model};
use crate::orderer::{ContextualOrderer, FeatureOrderer, ModelOrderer, SuggestionsOrderer};
use crate::tagger::{AnalyzedSentence, NoopTagger, Tagger};
use crate::tokenizer::{SimpleWordTokenizer, WordTokenizer};

/// Externally provided services. Anything left as `None` is loaded from
/// the paths in [`RankerConfig`], or replaced by a neutral stand-in.
#[derive(Clone)]
pub struct Collaborators {
    pub language_model: Option<Arc<dyn LanguageModel>>,
    pub tokenizer: Arc<dyn WordTokenizer>,
    pub tagger: Arc<dyn Tagger>,
    /// Tree ensemble ranking all candidates at once.
    pub ranking_model: Option<Arc<dyn ModelEvaluator>>,
    /// Per-candidate model over context features.
    pub ordering_model: Option<Arc<dyn ModelEvaluator>>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            language_model: None,
            tokenizer: Arc::new(SimpleWordTokenizer),
            tagger: Arc::new(NoopTagger),
            ranking_model: None,
            ordering_model: None,
        }
    }
}

/// A collaborator that could not be used, and what replaced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fallback {
    /// No language model; the neutral mock model is used.
    LanguageModel { reason: String },
    /// A learned model failed to load; the next ordering mode is used.
    Model { path: String, reason: String },
}

impl fmt::Display for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fallback::LanguageModel { reason } => {
                write!(f, "using neutral language model: {reason}")
            }
            Fallback::Model { path, reason } => {
                write!(f, "ignoring model {path}: {reason}")
            }
        }
    }
}

/// Ranked suggestions and whether the first one may be applied without
/// asking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedSuggestions {
    pub suggestions: Vec<SuggestedReplacement>,
    pub auto_correct: bool,
}

/// Re-ranks spelling suggestions. Immutable once built and safe to share
/// across threads.
pub struct SuggestionRanker {
    orderer: Box<dyn SuggestionsOrderer>,
    tokenizer: Arc<dyn WordTokenizer>,
    tagger: Arc<dyn Tagger>,
    fallbacks: Vec<Fallback>,
    neutral_language_model: bool,
}

impl SuggestionRanker {
    /// Build a ranker. Fails only on invalid configuration; unavailable
    /// collaborators are recorded in [`fallbacks`](Self::fallbacks).
    ///
    /// The ordering mode is the first available of: ranking model,
    /// contextual ordering model, scoring policy.
    pub fn new(config: &RankerConfig, collaborators: Collaborators) -> Result<Self, RankError> {
        config.validate()?;
        let params = config.scoring_params()?;
        let Collaborators {
            language_model,
            tokenizer,
            tagger,
            ranking_model,
            ordering_model,
        } = collaborators;
        let mut fallbacks = Vec::new();

        let language_model = language_model
            .or_else(|| load_language_model(config, &mut fallbacks))
            .unwrap_or_else(|| Arc::new(MockLanguageModel));
        let neutral_language_model = language_model.is_mock();

        let load = |path: &Option<PathBuf>, fallbacks: &mut Vec<Fallback>| {
            path.as_deref().and_then(|path| try_load_model(path, fallbacks))
        };
        let orderer: Box<dyn SuggestionsOrderer> = if let Some(model) =
            ranking_model.or_else(|| load(&config.model_path, &mut fallbacks))
        {
            Box::new(
                ModelOrderer::new(language_model, tokenizer.clone(), model)
                    .with_classes(config.model_classes.clone())
                    .with_auto_correct_threshold(config.auto_correct_threshold()),
            )
        } else if let Some(model) =
            ordering_model.or_else(|| load(&config.ordering_model_path, &mut fallbacks))
        {
            Box::new(
                ContextualOrderer::new(language_model, tokenizer.clone(), Some(model))
                    .with_context_length(config.context_length),
            )
        } else {
            Box::new(FeatureOrderer::new(language_model, tokenizer.clone(), params))
        };

        for fallback in &fallbacks {
            warn!("{fallback}");
        }
        info!(
            orderer = orderer.name(),
            policy = %params.policy,
            neutral_language_model,
            "suggestion ranker ready"
        );
        Ok(Self {
            orderer,
            tokenizer,
            tagger,
            fallbacks,
            neutral_language_model,
        })
    }

    /// Collaborators that were unavailable when the ranker was built.
    pub fn fallbacks(&self) -> &[Fallback] {
        &self.fallbacks
    }

    /// `true` when n-gram features come from the neutral mock model.
    pub fn uses_neutral_language_model(&self) -> bool {
        self.neutral_language_model
    }

    /// Name of the ordering mode in use.
    pub fn orderer_name(&self) -> &'static str {
        self.orderer.name()
    }

    /// Rank `suggestions` as replacements of `word`, which starts at
    /// character `start_pos` of `sentence`.
    pub fn rank_suggestions(
        &self,
        suggestions: &[String],
        word: &str,
        sentence: &AnalyzedSentence,
        start_pos: usize,
    ) -> RankedSuggestions {
        if suggestions.is_empty() {
            return RankedSuggestions::default();
        }
        if !self.orderer.is_ml_available() {
            return RankedSuggestions {
                suggestions: suggestions.iter().cloned().map(SuggestedReplacement::new).collect(),
                auto_correct: false,
            };
        }
        let ranked = self.orderer.order_suggestions(suggestions, word, sentence, start_pos);
        let auto_correct = self.orderer.should_auto_correct(&ranked);
        debug!(
            word,
            top = ranked.first().map(|s| s.replacement.as_str()),
            auto_correct,
            "ranked suggestions"
        );
        RankedSuggestions {
            suggestions: ranked,
            auto_correct,
        }
    }

    /// Like [`rank_suggestions`](Self::rank_suggestions) on raw text, which
    /// is analyzed only when there is something to rank.
    pub fn rank_text(
        &self,
        suggestions: &[String],
        word: &str,
        text: &str,
        start_pos: usize,
    ) -> RankedSuggestions {
        if suggestions.is_empty() {
            return RankedSuggestions::default();
        }
        let sentence = AnalyzedSentence::analyze(text, self.tokenizer.as_ref(), self.tagger.as_ref());
        self.rank_suggestions(suggestions, word, &sentence, start_pos)
    }
}

fn load_language_model(
    config: &RankerConfig,
    fallbacks: &mut Vec<Fallback>,
) -> Option<Arc<dyn LanguageModel>> {
    let Some(path) = &config.ngram_path else {
        fallbacks.push(Fallback::LanguageModel {
            reason: "no language model configured".to_string(),
        });
        return None;
    };
    match NgramCountModel::load(path) {
        Ok(model) => Some(Arc::new(model)),
        Err(e) => {
            fallbacks.push(Fallback::LanguageModel {
                reason: e.to_string(),
            });
            None
        }
    }
}

fn try_load_model(
    path: &Path,
    fallbacks: &mut Vec<Fallback>,
) -> Option<Arc<dyn ModelEvaluator>> {
    match load_model(path) {
        Ok(model) => Some(model),
        Err(e) => {
            fallbacks.push(Fallback::Model {
                path: path.display().to_string(),
                reason: e.to_string(),
            });
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spellrank_core::replacement::to_strings;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn ranker_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SuggestionRanker>();
    }

    #[test]
    fn defaults_use_policy_with_mock_model() {
        let ranker = SuggestionRanker::new(&RankerConfig::default(), Collaborators::default()).unwrap();
        assert_eq!(ranker.orderer_name(), "policy");
        assert!(matches!(ranker.fallbacks(), [Fallback::LanguageModel { .. }]));
        assert!(ranker.uses_neutral_language_model());
        let input = strings(&["hose", "house"]);
        let ranked = ranker.rank_text(&input, "hoose", "a hoose", 2);
        assert_eq!(to_strings(&ranked.suggestions), input);
        assert!(!ranked.auto_correct);
    }

    #[test]
    fn supplied_language_model_is_not_neutral() {
        let collaborators = Collaborators {
            language_model: Some(Arc::new(NgramCountModel::from_counts([(vec!["house"], 3)]))),
            ..Collaborators::default()
        };
        let ranker = SuggestionRanker::new(&RankerConfig::default(), collaborators).unwrap();
        assert!(ranker.fallbacks().is_empty());
        assert!(!ranker.uses_neutral_language_model());

        let mock = Collaborators {
            language_model: Some(Arc::new(MockLanguageModel)),
            ..Collaborators::default()
        };
        let ranker = SuggestionRanker::new(&RankerConfig::default(), mock).unwrap();
        assert!(ranker.fallbacks().is_empty());
        assert!(ranker.uses_neutral_language_model());
    }

    #[test]
    fn unreadable_models_fall_back_to_policy() {
        let config = RankerConfig {
            ngram_path: Some("/nonexistent/ngrams.tsv".into()),
            model_path: Some("/nonexistent/model.json".into()),
            ordering_model_path: Some("/nonexistent/ordering.json".into()),
            ..RankerConfig::default()
        };
        let ranker = SuggestionRanker::new(&config, Collaborators::default()).unwrap();
        assert_eq!(ranker.orderer_name(), "policy");
        assert_eq!(ranker.fallbacks().len(), 3);
        assert!(ranker.fallbacks()[1].to_string().contains("/nonexistent/model.json"));
    }

    #[test]
    fn invalid_config_is_fatal() {
        let config = RankerConfig {
            mistake_probability: -0.1,
            ..RankerConfig::default()
        };
        assert!(matches!(
            SuggestionRanker::new(&config, Collaborators::default()),
            Err(RankError::Config(_))
        ));
    }
}
