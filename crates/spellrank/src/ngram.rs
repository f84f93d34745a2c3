// Contextual n-gram probabilities of a replacement candidate.
// Origin: LanguageModelUtils.java
//
// The candidate is spliced into the sentence's n-gram tokens in place of
// the misspelled token, and the language model scores every window of the
// requested width that contains it. Windows are built by `get_context`.

use spellrank_core::{Probability, Token};
use tracing::{trace, warn};

use crate::language_model::LanguageModel;
use crate::tagger::AnalyzedSentence;
use crate::tokenizer::{WordTokenizer, ngram_strings};

/// Minimum coverage one of the windows must reach; below it on every window
/// the candidate's contextual probability is taken as zero.
pub const MIN_COVERAGE: f32 = 0.5;

/// Token appended when the right context runs past the end of the sentence.
pub const END_TOKEN: &str = ".";

/// Build the token window around `tokens[pos]` with `new_tokens` in its
/// place: `to_left` non-whitespace tokens before it and `to_right` after.
///
/// When the sentence start is reached before `to_left` tokens are found,
/// the window is every token before `pos` followed by `new_tokens`, with no
/// right context at all. Missing right context is padded with
/// [`END_TOKEN`].
pub fn get_context(
    pos: usize,
    tokens: &[Token],
    new_tokens: &[String],
    to_left: usize,
    to_right: usize,
) -> Vec<String> {
    let mut left = Vec::with_capacity(to_left);
    let mut i = 1;
    while left.len() < to_left {
        if i > pos {
            let mut result: Vec<String> = tokens[..pos.min(tokens.len())]
                .iter()
                .map(|t| t.text.clone())
                .collect();
            result.extend(new_tokens.iter().cloned());
            return result;
        }
        let token = &tokens[pos - i];
        if !token.is_whitespace() {
            left.push(token.text.clone());
        }
        i += 1;
    }
    left.reverse();

    let mut result = left;
    result.extend(new_tokens.iter().cloned());

    let mut added = 0;
    let mut i = 1;
    while added < to_right {
        match tokens.get(pos + i) {
            None => {
                result.push(END_TOKEN.to_string());
                added += 1;
            }
            Some(token) if !token.is_whitespace() => {
                result.push(token.text.clone());
                added += 1;
            }
            Some(_) => {}
        }
        i += 1;
    }
    result
}

/// Index of the n-gram token starting at character offset `position`,
/// skipping the sentence start marker.
pub fn token_index_at(tokens: &[Token], position: usize) -> Option<usize> {
    tokens
        .iter()
        .position(|t| t.pos == position && !t.is_sentence_start())
}

/// 3-gram probability of `candidate` replacing the token at `position`.
///
/// Returns 0.0 when no token starts at `position`, when the candidate
/// does not tokenize into one or two tokens, or when every window misses
/// [`MIN_COVERAGE`].
pub fn probability_3gram(
    lm: &dyn LanguageModel,
    tokenizer: &dyn WordTokenizer,
    sentence: &AnalyzedSentence,
    position: usize,
    candidate: &str,
) -> f64 {
    let tokens = sentence.ngram_tokens();
    let Some(index) = token_index_at(&tokens, position) else {
        warn!(sentence = sentence.text(), position, "no n-gram token at position");
        return 0.0;
    };
    probability_3gram_at(lm, &tokens, index, &ngram_strings(tokenizer, candidate))
}

/// 4-gram probability of `candidate` replacing the token at `position`.
///
/// Same fallbacks as [`probability_3gram`].
pub fn probability_4gram(
    lm: &dyn LanguageModel,
    tokenizer: &dyn WordTokenizer,
    sentence: &AnalyzedSentence,
    position: usize,
    candidate: &str,
) -> f64 {
    let tokens = sentence.ngram_tokens();
    let Some(index) = token_index_at(&tokens, position) else {
        warn!(sentence = sentence.text(), position, "no n-gram token at position");
        return 0.0;
    };
    probability_4gram_at(lm, &tokens, index, &ngram_strings(tokenizer, candidate))
}

/// 3-gram probability with the candidate already tokenized: the product of
/// the left, middle and right window probabilities.
///
/// A two-token candidate (e.g. a contraction split in two) is scored on
/// its two 3-token windows, with the middle window taken as their mean.
pub fn probability_3gram_at(
    lm: &dyn LanguageModel,
    tokens: &[Token],
    index: usize,
    candidate: &[String],
) -> f64 {
    let (left, middle, right) = match candidate.len() {
        1 => {
            let left = lm.pseudo_probability(&get_context(index, tokens, candidate, 0, 2));
            let middle = lm.pseudo_probability(&get_context(index, tokens, candidate, 1, 1));
            let right = lm.pseudo_probability(&get_context(index, tokens, candidate, 2, 0));
            (left, middle, right)
        }
        2 => {
            let left = lm.pseudo_probability(&get_context(index, tokens, candidate, 0, 1));
            let right = lm.pseudo_probability(&get_context(index, tokens, candidate, 1, 0));
            let middle = Probability::with_coverage((left.prob + right.prob) / 2.0, 1.0);
            (left, middle, right)
        }
        n => {
            warn!(?candidate, tokens = n, "only candidates of one or two tokens are supported");
            return 0.0;
        }
    };

    if [left.coverage, middle.coverage, right.coverage]
        .iter()
        .all(|&c| c < MIN_COVERAGE)
    {
        trace!(
            left = left.coverage,
            middle = middle.coverage,
            right = right.coverage,
            "minimum coverage not reached, assuming p=0"
        );
        return 0.0;
    }
    left.prob * middle.prob * right.prob
}

/// 4-gram probability with the candidate already tokenized: the exponent
/// of the summed log-probabilities of the four windows.
pub fn probability_4gram_at(
    lm: &dyn LanguageModel,
    tokens: &[Token],
    index: usize,
    candidate: &[String],
) -> f64 {
    let windows = match candidate.len() {
        1 => {
            let p = |l, r| lm.pseudo_probability(&get_context(index, tokens, candidate, l, r));
            [p(0, 3), p(2, 1), p(1, 2), p(3, 0)]
        }
        2 => {
            let p = |l, r| lm.pseudo_probability(&get_context(index, tokens, candidate, l, r));
            let middle = p(1, 1);
            [p(0, 2), middle, middle, p(2, 0)]
        }
        n => {
            warn!(?candidate, tokens = n, "only candidates of one or two tokens are supported");
            return 0.0;
        }
    };

    if windows.iter().all(|w| w.coverage < MIN_COVERAGE) {
        trace!("minimum coverage not reached on any 4-gram window, assuming p=0");
        return 0.0;
    }
    windows.iter().map(|w| w.log_prob()).sum::<f64>().exp()
}
