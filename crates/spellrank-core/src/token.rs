// Token types produced by tokenizers and consumed by n-gram lookups.

use serde::{Deserialize, Serialize};

/// Token types for string tokenization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    /// Word token.
    Word,
    /// Punctuation token.
    Punctuation,
    /// Whitespace token.
    Whitespace,
    /// Synthetic sentence start marker (`_START_`).
    SentenceStart,
    /// Character not classified as any of the above.
    Unknown,
}

/// Marker token text used at the start of a sentence in n-gram lookups.
pub const SENTENCE_START: &str = "_START_";

/// A text token with its position in the sentence.
///
/// Positions and lengths are in characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// The type of this token.
    pub token_type: TokenType,

    /// The text content of this token.
    pub text: String,

    /// Length of the token in characters.
    pub token_len: usize,

    /// Character offset of the token within the sentence.
    pub pos: usize,
}

impl Token {
    /// Create a new token.
    pub fn new(token_type: TokenType, text: impl Into<String>, pos: usize) -> Self {
        let text = text.into();
        let token_len = text.chars().count();
        Self {
            token_type,
            text,
            token_len,
            pos,
        }
    }

    /// Create the zero-width sentence start marker.
    pub fn sentence_start() -> Self {
        Self {
            token_type: TokenType::SentenceStart,
            text: SENTENCE_START.to_string(),
            token_len: 0,
            pos: 0,
        }
    }

    /// Character offset one past the end of the token.
    pub fn end(&self) -> usize {
        self.pos + self.token_len
    }

    pub fn is_whitespace(&self) -> bool {
        self.token_type == TokenType::Whitespace
    }

    pub fn is_sentence_start(&self) -> bool {
        self.token_type == TokenType::SentenceStart
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_new() {
        let tok = Token::new(TokenType::Word, "casa", 3);
        assert_eq!(tok.token_type, TokenType::Word);
        assert_eq!(tok.text, "casa");
        assert_eq!(tok.token_len, 4);
        assert_eq!(tok.pos, 3);
        assert_eq!(tok.end(), 7);
    }

    #[test]
    fn token_unicode_length() {
        // "això" is 4 characters, 5 bytes in UTF-8
        let tok = Token::new(TokenType::Word, "aix\u{00F2}", 0);
        assert_eq!(tok.token_len, 4);
    }

    #[test]
    fn sentence_start_marker() {
        let tok = Token::sentence_start();
        assert!(tok.is_sentence_start());
        assert_eq!(tok.text, SENTENCE_START);
        assert_eq!(tok.token_len, 0);
        assert!(!tok.is_whitespace());
    }

    #[test]
    fn whitespace_check() {
        assert!(Token::new(TokenType::Whitespace, " ", 1).is_whitespace());
        assert!(!Token::new(TokenType::Punctuation, ".", 1).is_whitespace());
    }
}
