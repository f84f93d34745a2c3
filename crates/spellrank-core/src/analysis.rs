// Tagger readings attached to tokens.

use serde::{Deserialize, Serialize};

use crate::token::Token;

/// One reading of a word as reported by a tagger: a lemma and a
/// part-of-speech tag. Either may be absent for unknown words.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reading {
    pub lemma: Option<String>,
    pub pos_tag: Option<String>,
}

impl Reading {
    pub fn new(lemma: impl Into<String>, pos_tag: impl Into<String>) -> Self {
        Self {
            lemma: Some(lemma.into()),
            pos_tag: Some(pos_tag.into()),
        }
    }

    /// Check whether this reading carries a part-of-speech tag starting
    /// with `prefix`.
    pub fn has_pos_prefix(&self, prefix: &str) -> bool {
        self.pos_tag.as_deref().is_some_and(|t| t.starts_with(prefix))
    }
}

/// A token together with all readings the tagger produced for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzedToken {
    pub token: Token,
    pub readings: Vec<Reading>,
}

impl AnalyzedToken {
    pub fn new(token: Token, readings: Vec<Reading>) -> Self {
        Self { token, readings }
    }

    /// `true` when the tagger knows the word (at least one tagged reading).
    pub fn is_tagged(&self) -> bool {
        self.readings.iter().any(|r| r.pos_tag.is_some())
    }

    /// Distinct lemmas of this token, in reading order.
    pub fn lemmas(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for lemma in self.readings.iter().filter_map(|r| r.lemma.as_deref()) {
            if !out.contains(&lemma) {
                out.push(lemma);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenType;

    #[test]
    fn reading_pos_prefix() {
        let r = Reading::new("casa", "NCFS000");
        assert!(r.has_pos_prefix("NC"));
        assert!(!r.has_pos_prefix("V"));
        let empty = Reading { lemma: None, pos_tag: None };
        assert!(!empty.has_pos_prefix(""));
    }

    #[test]
    fn untagged_token() {
        let t = AnalyzedToken::new(Token::new(TokenType::Word, "xyz", 0), vec![]);
        assert!(!t.is_tagged());
        assert!(t.lemmas().is_empty());
    }

    #[test]
    fn lemmas_are_deduplicated() {
        let t = AnalyzedToken::new(
            Token::new(TokenType::Word, "canta", 0),
            vec![
                Reading::new("cantar", "VMIP3S0"),
                Reading::new("cantar", "VMM02S0"),
                Reading::new("canta", "NCFS000"),
            ],
        );
        assert!(t.is_tagged());
        assert_eq!(t.lemmas(), vec!["cantar", "canta"]);
    }
}
