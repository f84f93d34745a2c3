// Textual context windows around a misspelled word.
// Origin: SuggestionsOrdererGSoC.java
//
// All offsets and lengths here are in characters. Word characters are
// whatever `\w` matches in the `regex` crate (Unicode aware).

use regex::Regex;
use tracing::trace;

/// Context length used when none is configured.
pub const DEFAULT_CONTEXT_LENGTH: usize = 2;

/// Left and right textual context of an error.
///
/// `left` ends with the error string and `right` starts with it. Either
/// side is empty when no word precedes (or follows) the error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextWindow {
    pub left: String,
    pub right: String,
    error_len: usize,
}

impl ContextWindow {
    pub fn new(left: impl Into<String>, right: impl Into<String>, error_len: usize) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            error_len,
        }
    }

    /// `true` when neither side has any context.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }

    /// Character offset of the error within `left`.
    pub fn error_index_in_left(&self) -> Option<usize> {
        if self.left.is_empty() {
            return None;
        }
        Some(self.left.chars().count().saturating_sub(self.error_len))
    }

    /// Character offset of the error within `right`.
    pub fn error_index_in_right(&self) -> Option<usize> {
        (!self.right.is_empty()).then_some(0)
    }

    /// The same window with the error replaced by `replacement` on both
    /// sides. Empty sides stay empty.
    pub fn with_replacement(&self, replacement: &str) -> ContextWindow {
        let left = if self.left.is_empty() {
            String::new()
        } else {
            let keep = self.left.chars().count().saturating_sub(self.error_len);
            let mut s: String = self.left.chars().take(keep).collect();
            s.push_str(replacement);
            s
        };
        let right = if self.right.is_empty() {
            String::new()
        } else {
            let mut s = replacement.to_string();
            s.extend(self.right.chars().skip(self.error_len));
            s
        };
        ContextWindow::new(left, right, replacement.chars().count())
    }
}

/// Extract the widest context window around the error that starts at
/// character `error_start` and spans `covered.chars().count()` characters.
///
/// Each side independently tries `context_length` words, then one less,
/// down to one. Returns an empty window when the error span lies outside
/// the sentence.
pub fn extract_context(
    sentence: &str,
    covered: &str,
    error_start: usize,
    context_length: usize,
) -> ContextWindow {
    let chars: Vec<char> = sentence.chars().collect();
    let error_len = covered.chars().count();
    let Some(error_end) = error_start.checked_add(error_len).filter(|&end| end <= chars.len())
    else {
        return ContextWindow::default();
    };
    let error: String = chars[error_start..error_end].iter().collect();

    let left = maximal_left_context(sentence, error_start, &error, context_length);
    let right = maximal_right_context(sentence, error_start, &error, context_length);
    trace!(%left, %right, "extracted context");
    ContextWindow::new(left, right, error_len)
}

/// Exactly `context_length` words followed by the error, ending where the
/// error ends. Empty when there are fewer words before the error.
pub fn left_context(
    sentence: &str,
    error_start: usize,
    error: &str,
    context_length: usize,
) -> String {
    let end = error_start.saturating_add(error.chars().count());
    let search: String = sentence.chars().take(end).collect();
    let pattern = format!(r"(?:\w+\W+){{{context_length}}}{}$", regex::escape(error));
    first_match(&pattern, &search)
}

/// The error followed by exactly `context_length` words. Empty when fewer
/// words follow the error.
pub fn right_context(
    sentence: &str,
    error_start: usize,
    error: &str,
    context_length: usize,
) -> String {
    let search: String = sentence.chars().skip(error_start).collect();
    let pattern = format!(r"^{}(?:\W+\w+){{{context_length}}}", regex::escape(error));
    first_match(&pattern, &search)
}

/// [`left_context`] with the longest length from `context_length` down to
/// one that matches.
pub fn maximal_left_context(
    sentence: &str,
    error_start: usize,
    error: &str,
    context_length: usize,
) -> String {
    (1..=context_length)
        .rev()
        .map(|n| left_context(sentence, error_start, error, n))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

/// [`right_context`] with the longest length from `context_length` down to
/// one that matches.
pub fn maximal_right_context(
    sentence: &str,
    error_start: usize,
    error: &str,
    context_length: usize,
) -> String {
    (1..=context_length)
        .rev()
        .map(|n| right_context(sentence, error_start, error, n))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

fn first_match(pattern: &str, haystack: &str) -> String {
    Regex::new(pattern)
        .ok()
        .and_then(|re| re.find(haystack).map(|m| m.as_str().to_string()))
        .unwrap_or_default()
}

/// First character offset at which `s1` and `s2` differ.
///
/// `None` when `s1` is equal to, or a prefix of, `s2`.
pub fn first_difference_position(s1: &str, s2: &str) -> Option<usize> {
    let mut other = s2.chars();
    s1.chars()
        .enumerate()
        .find(|(_, c)| other.next() != Some(*c))
        .map(|(i, _)| i)
}

/// Locate where `error` starts in `sentence`, given the offset at which the
/// sentence first differs from its corrected version.
///
/// The divergence can fall anywhere inside the error, so every occurrence
/// of the divergent character within `error` is tried as an alignment; the
/// first one under which `error` actually appears in the sentence wins.
pub fn start_of_error_string(sentence: &str, error: &str, difference: usize) -> Option<usize> {
    let chars: Vec<char> = sentence.chars().collect();
    let error: Vec<char> = error.chars().collect();
    let divergent = *chars.get(difference)?;

    error
        .iter()
        .enumerate()
        .filter(|&(_, &c)| c == divergent)
        .filter_map(|(i, _)| difference.checked_sub(i))
        .find(|&start| {
            let end = start + error.len();
            end <= chars.len() && chars[start..end] == error[..]
        })
}

/// Recover the error offset from a sentence and its corrected version, then
/// extract the context around it. Empty when the offset cannot be found.
pub fn context_for_correction(
    sentence: &str,
    corrected: &str,
    covered: &str,
    context_length: usize,
) -> ContextWindow {
    first_difference_position(sentence, corrected)
        .and_then(|diff| start_of_error_string(sentence, covered, diff))
        .map(|start| extract_context(sentence, covered, start, context_length))
        .unwrap_or_default()
}
