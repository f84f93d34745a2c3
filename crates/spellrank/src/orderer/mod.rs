// Suggestion orderers
// Origin: SuggestionsOrderer.java
//
// An orderer turns the candidate list produced by a speller into a ranked
// list of suggestions. Three strategies:
//   - `policy`: score candidate features with a scoring policy and sort
//   - `learned`: one tree-ensemble evaluation over all candidates at once
//   - `contextual`: one model evaluation per candidate over context features
//
// Orderers never fail: model errors are logged and the input order is
// returned instead.

pub mod contextual;
pub mod learned;
pub mod policy;

use spellrank_core::SuggestedReplacement;

use crate::tagger::AnalyzedSentence;

pub use contextual::ContextualOrderer;
pub use learned::ModelOrderer;
pub use policy::FeatureOrderer;

/// Strategy for ordering spelling suggestions.
pub trait SuggestionsOrderer: Send + Sync {
    /// Short name used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Whether the orderer has what it needs to rank. When `false`, callers
    /// should keep the input order.
    fn is_ml_available(&self) -> bool;

    /// Rank `suggestions` as replacements of `word`, which starts at
    /// character `start_pos` of `sentence`.
    fn order_suggestions(
        &self,
        suggestions: &[String],
        word: &str,
        sentence: &AnalyzedSentence,
        start_pos: usize,
    ) -> Vec<SuggestedReplacement>;

    /// Whether the top suggestion of `ranked` is confident enough to be
    /// applied without asking.
    fn should_auto_correct(&self, _ranked: &[SuggestedReplacement]) -> bool {
        false
    }
}

/// Stable descending sort by confidence; suggestions without a confidence
/// sort as zero.
pub(crate) fn sort_by_confidence(suggestions: &mut [SuggestedReplacement]) {
    suggestions.sort_by(|a, b| {
        let a = a.confidence.unwrap_or(0.0);
        let b = b.confidence.unwrap_or(0.0);
        b.total_cmp(&a)
    });
}
