// Tagger seam and analyzed sentences.

use spellrank_core::{AnalyzedToken, Reading, Token, TokenType};

use crate::tokenizer::WordTokenizer;

/// Part-of-speech tagger.
pub trait Tagger: Send + Sync {
    /// All readings of `word`; empty for unknown words.
    fn tag(&self, word: &str) -> Vec<Reading>;
}

/// Tagger that knows no words.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTagger;

impl Tagger for NoopTagger {
    fn tag(&self, _word: &str) -> Vec<Reading> {
        Vec::new()
    }
}

/// A sentence split into tokens, each word carrying its tagger readings.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedSentence {
    text: String,
    tokens: Vec<AnalyzedToken>,
}

impl AnalyzedSentence {
    /// Tokenize `text` and tag every word token.
    pub fn analyze(text: &str, tokenizer: &dyn WordTokenizer, tagger: &dyn Tagger) -> Self {
        let tokens = tokenizer
            .tokenize(text)
            .into_iter()
            .map(|token| {
                let readings = if token.token_type == TokenType::Word {
                    tagger.tag(&token.text)
                } else {
                    Vec::new()
                };
                AnalyzedToken::new(token, readings)
            })
            .collect();
        Self {
            text: text.to_string(),
            tokens,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[AnalyzedToken] {
        &self.tokens
    }

    /// The token starting at character offset `pos`, if any.
    pub fn token_at(&self, pos: usize) -> Option<&AnalyzedToken> {
        self.tokens.iter().find(|t| t.token.pos == pos)
    }

    /// Tokens as an n-gram index sees them: sentence start marker first,
    /// whitespace dropped.
    pub fn ngram_tokens(&self) -> Vec<Token> {
        std::iter::once(Token::sentence_start())
            .chain(
                self.tokens
                    .iter()
                    .filter(|t| !t.token.is_whitespace())
                    .map(|t| t.token.clone()),
            )
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::{SimpleWordTokenizer, ngram_tokens};

    struct MockTagger;

    impl Tagger for MockTagger {
        fn tag(&self, word: &str) -> Vec<Reading> {
            match word {
                "casa" => vec![Reading::new("casa", "NCFS000")],
                "blanca" => vec![Reading::new("blanc", "AQ0FS00")],
                _ => Vec::new(),
            }
        }
    }

    #[test]
    fn analyze_tags_words_only() {
        let s = AnalyzedSentence::analyze("La casa blanca.", &SimpleWordTokenizer, &MockTagger);
        assert_eq!(s.text(), "La casa blanca.");
        assert_eq!(s.tokens().len(), 6);
        let casa = s.token_at(3).unwrap();
        assert_eq!(casa.token.text, "casa");
        assert!(casa.is_tagged());
        assert_eq!(s.token_at(8).unwrap().lemmas(), vec!["blanc"]);
        assert!(!s.token_at(0).unwrap().is_tagged());
        assert!(s.token_at(14).unwrap().readings.is_empty());
        assert!(s.token_at(1).is_none());
    }

    #[test]
    fn noop_tagger_knows_nothing() {
        let s = AnalyzedSentence::analyze("La casa", &SimpleWordTokenizer, &NoopTagger);
        assert!(s.tokens().iter().all(|t| !t.is_tagged()));
    }

    #[test]
    fn ngram_tokens_match_tokenizer() {
        let text = "La casa, blanca.";
        let s = AnalyzedSentence::analyze(text, &SimpleWordTokenizer, &NoopTagger);
        assert_eq!(s.ngram_tokens(), ngram_tokens(&SimpleWordTokenizer, text, true));
    }
}
