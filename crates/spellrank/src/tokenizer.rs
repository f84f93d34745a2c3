// Word tokenization for n-gram lookups.
// Origin: WordTokenizer.java

use spellrank_core::character::{CharType, get_char_type, is_apostrophe, is_word_char};
use spellrank_core::{Token, TokenType};

/// Splits a sentence into tokens with character offsets.
pub trait WordTokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

/// Tokenizer that groups runs of word characters and runs of whitespace;
/// every other character becomes a token of its own.
///
/// An apostrophe between two word characters starts a new word token that
/// keeps the suffix, so "you're" is `you` + `'re`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleWordTokenizer;

impl WordTokenizer for SimpleWordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let chars: Vec<char> = text.chars().collect();
        let mut tokens = Vec::new();
        let mut start = 0;

        while start < chars.len() {
            let c = chars[start];
            let suffix = is_apostrophe(c)
                && start > 0
                && is_word_char(chars[start - 1])
                && chars.get(start + 1).is_some_and(|&next| is_word_char(next));
            let (token_type, end) = if suffix {
                (TokenType::Word, run_end(&chars, start + 1, is_word_char))
            } else {
                match get_char_type(c) {
                    CharType::Word => (TokenType::Word, run_end(&chars, start, is_word_char)),
                    CharType::Whitespace => (
                        TokenType::Whitespace,
                        run_end(&chars, start, |c| get_char_type(c) == CharType::Whitespace),
                    ),
                    CharType::Punctuation => (TokenType::Punctuation, start + 1),
                    CharType::Unknown => (TokenType::Unknown, start + 1),
                }
            };
            let text: String = chars[start..end].iter().collect();
            tokens.push(Token::new(token_type, text, start));
            start = end;
        }

        tokens
    }
}

fn run_end(chars: &[char], start: usize, pred: impl Fn(char) -> bool) -> usize {
    chars[start..]
        .iter()
        .position(|&c| !pred(c))
        .map_or(chars.len(), |len| start + len)
}

/// Tokens as an n-gram index sees them: whitespace dropped, optionally
/// preceded by the zero-width sentence start marker.
pub fn ngram_tokens(tokenizer: &dyn WordTokenizer, text: &str, add_start: bool) -> Vec<Token> {
    let mut result = Vec::new();
    if add_start {
        result.push(Token::sentence_start());
    }
    result.extend(tokenizer.tokenize(text).into_iter().filter(|t| !t.is_whitespace()));
    result
}

/// Text of the n-gram tokens of `text`, without the start marker.
pub fn ngram_strings(tokenizer: &dyn WordTokenizer, text: &str) -> Vec<String> {
    ngram_tokens(tokenizer, text, false)
        .into_iter()
        .map(|t| t.text)
        .collect()
}
