// Ranked suggestion output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A replacement suggestion as returned by the rankers.
///
/// `confidence` is only set by orderers that produce a probability (the
/// learned-model modes). `features` carries the named feature values that
/// were used to rank the candidate, kept sorted by name so that the map
/// can be flattened into a fixed-order model input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedReplacement {
    pub replacement: String,
    pub confidence: Option<f32>,
    pub features: BTreeMap<String, f32>,
}

impl SuggestedReplacement {
    pub fn new(replacement: impl Into<String>) -> Self {
        Self {
            replacement: replacement.into(),
            confidence: None,
            features: BTreeMap::new(),
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_features(mut self, features: BTreeMap<String, f32>) -> Self {
        self.features = features;
        self
    }
}

/// Convert plain strings into suggestions without confidence or features.
pub fn from_strings<I, S>(suggestions: I) -> Vec<SuggestedReplacement>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    suggestions.into_iter().map(SuggestedReplacement::new).collect()
}

/// Extract the replacement strings, preserving order.
pub fn to_strings(suggestions: &[SuggestedReplacement]) -> Vec<String> {
    suggestions.iter().map(|s| s.replacement.clone()).collect()
}
