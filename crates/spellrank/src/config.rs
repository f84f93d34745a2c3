// Ranker configuration.
//
// Loaded from JSON. Every field has a default, so `{}` is a valid config
// that ranks with the n-gram policy and the neutral language model.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::DEFAULT_CONTEXT_LENGTH;
use crate::error::{ConfigError, RankError};
use crate::orderer::learned::DEFAULT_MODEL_CLASSES;
use crate::scoring::{ScoringParams, ScoringPolicy};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankerConfig {
    /// Language code used to pick the auto-correct threshold.
    pub language: Option<String>,
    /// Scoring policy name, validated when the ranker is built.
    pub policy: String,
    pub mistake_probability: f64,
    pub top_n: Option<usize>,
    pub context_length: usize,
    /// Minimum model confidence for automatic correction, per language.
    pub auto_correct_thresholds: BTreeMap<String, f32>,
    /// Class label of each output of the ranking model.
    pub model_classes: Vec<i32>,
    /// TSV n-gram count table.
    pub ngram_path: Option<PathBuf>,
    /// Tree ensemble ranking all candidates at once.
    pub model_path: Option<PathBuf>,
    /// Per-candidate model over context features.
    pub ordering_model_path: Option<PathBuf>,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            language: None,
            policy: ScoringPolicy::Ngrams.name().to_string(),
            mistake_probability: 1.0,
            top_n: None,
            context_length: DEFAULT_CONTEXT_LENGTH,
            auto_correct_thresholds: BTreeMap::from([("en-US".to_string(), 1.0)]),
            model_classes: DEFAULT_MODEL_CLASSES.to_vec(),
            ngram_path: None,
            model_path: None,
            ordering_model_path: None,
        }
    }
}

impl RankerConfig {
    /// Parse and validate a JSON config. Paths are kept as written.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: RankerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file. Relative paths inside it are resolved
    /// against the directory containing the file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_json_str(&json)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        debug!(path = %path.display(), ?config, "loaded ranker config");
        Ok(config)
    }

    /// Make relative data paths relative to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        for p in [
            &mut self.ngram_path,
            &mut self.model_path,
            &mut self.ordering_model_path,
        ]
        .into_iter()
        .flatten()
        {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.mistake_probability) {
            return Err(ConfigError::Invalid {
                field: "mistake_probability",
                reason: format!("{} is not in [0, 1]", self.mistake_probability),
            });
        }
        if self.context_length == 0 {
            return Err(ConfigError::Invalid {
                field: "context_length",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.model_classes.is_empty() {
            return Err(ConfigError::Invalid {
                field: "model_classes",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// The scoring policy and its parameters. Fails on an unknown policy
    /// name.
    pub fn scoring_params(&self) -> Result<ScoringParams, RankError> {
        let policy: ScoringPolicy = self.policy.parse()?;
        Ok(ScoringParams::new(policy)
            .with_mistake_probability(self.mistake_probability)
            .with_top_n(self.top_n))
    }

    /// Auto-correct threshold for the configured language; infinity (never
    /// auto-correct) when the language has none.
    pub fn auto_correct_threshold(&self) -> f32 {
        self.language
            .as_deref()
            .and_then(|lang| self.auto_correct_thresholds.get(lang))
            .copied()
            .unwrap_or(f32::INFINITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_object_uses_defaults() {
        let config = RankerConfig::from_json_str("{}").unwrap();
        assert_eq!(config, RankerConfig::default());
        assert_eq!(config.policy, "ngrams");
        assert_eq!(config.context_length, 2);
        assert_eq!(config.model_classes, vec![-1, 0, 1, 2, 3, 4]);
    }

    #[test]
    fn parse_full_config() {
        let json = json!({
            "language": "en-US",
            "policy": "ngrams+binomialLevensthein",
            "mistake_probability": 0.05,
            "top_n": 10,
            "context_length": 3,
            "ngram_path": "data/ngrams.tsv",
        });
        let config = RankerConfig::from_json_str(&json.to_string()).unwrap();
        let params = config.scoring_params().unwrap();
        assert_eq!(params.policy, ScoringPolicy::NgramsBinomialLevenshtein);
        assert_eq!(params.mistake_probability, 0.05);
        assert_eq!(params.top_n, Some(10));
        assert_eq!(config.context_length, 3);
        assert_eq!(config.auto_correct_threshold(), 1.0);
    }

    #[test]
    fn unknown_policy_fails_on_params() {
        let config = RankerConfig::from_json_str(r#"{"policy": "fastest"}"#).unwrap();
        assert!(matches!(
            config.scoring_params(),
            Err(RankError::UnknownPolicy(ref name)) if name == "fastest"
        ));
    }

    #[test]
    fn invalid_values() {
        let err = RankerConfig::from_json_str(r#"{"mistake_probability": 1.5}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "mistake_probability", .. }));
        let err = RankerConfig::from_json_str(r#"{"context_length": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "context_length", .. }));
        let err = RankerConfig::from_json_str(r#"{"model_classes": []}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "model_classes", .. }));
        assert!(matches!(
            RankerConfig::from_json_str("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn threshold_per_language() {
        let mut config = RankerConfig::default();
        assert_eq!(config.auto_correct_threshold(), f32::INFINITY);
        config.language = Some("de-DE".to_string());
        assert_eq!(config.auto_correct_threshold(), f32::INFINITY);
        config.auto_correct_thresholds.insert("de-DE".to_string(), 0.9);
        assert_eq!(config.auto_correct_threshold(), 0.9);
    }

    #[test]
    fn relative_paths_resolve_against_base() {
        let mut config = RankerConfig {
            ngram_path: Some(PathBuf::from("ngrams.tsv")),
            model_path: Some(PathBuf::from("/abs/model.json")),
            ..RankerConfig::default()
        };
        config.resolve_paths(Path::new("/etc/spellrank"));
        assert_eq!(config.ngram_path, Some(PathBuf::from("/etc/spellrank/ngrams.tsv")));
        assert_eq!(config.model_path, Some(PathBuf::from("/abs/model.json")));
        assert_eq!(config.ordering_model_path, None);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = RankerConfig::load(Path::new("/nonexistent/spellrank.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
