// Character classification used by the tokenizer.
//
// Word characters approximate the `\w` class of the `regex` crate: they
// cover alphanumerics, the underscore and the common combining mark blocks,
// but not every connector punctuation or mark that `\w` accepts.

/// Character type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharType {
    /// See [`is_word_char`].
    Word,
    Whitespace,
    Punctuation,
    Unknown,
}

/// Returns the character type for a given character.
pub fn get_char_type(c: char) -> CharType {
    if is_word_char(c) {
        return CharType::Word;
    }
    if c.is_whitespace() || c == '\u{00A0}' || c == '\u{200B}' {
        return CharType::Whitespace;
    }
    if is_punctuation_char(c) {
        return CharType::Punctuation;
    }
    CharType::Unknown
}

/// Check whether a character is part of a word.
///
/// Letters, digits, the underscore, and combining marks count as word
/// characters.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || is_combining_mark(c)
}

/// Straight or typographic apostrophe.
pub fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

/// Combining diacritical marks that attach to the preceding letter.
fn is_combining_mark(c: char) -> bool {
    matches!(c as u32,
        0x0300..=0x036F | 0x1AB0..=0x1AFF | 0x1DC0..=0x1DFF | 0x20D0..=0x20FF | 0xFE20..=0xFE2F)
}

/// Punctuation recognized by the tokenizer.
fn is_punctuation_char(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(
            c,
            '\u{00AB}' // LEFT-POINTING DOUBLE ANGLE QUOTATION MARK
                | '\u{00BB}' // RIGHT-POINTING DOUBLE ANGLE QUOTATION MARK
                | '\u{00BF}' // INVERTED QUESTION MARK
                | '\u{00A1}' // INVERTED EXCLAMATION MARK
                | '\u{00B7}' // MIDDLE DOT
                | '\u{2010}'..='\u{2027}' // hyphens, dashes, quotes, ellipsis
                | '\u{2039}' | '\u{203A}'
        )
}
