//! Built-in tokenizer implementations.
//!
//! [`WordTokenizer`] is the always-available baseline used for every
//! language unless a specialized tokenizer is registered.
//! [`CjkTokenizer`] handles Han-script text where word boundaries are not
//! whitespace-delimited.

use unicode_segmentation::UnicodeSegmentation;

use crate::language::profile::Tokenizer;
use crate::types::{Token, TokenType};

/// Classify one word-boundary segment.
fn classify(segment: &str) -> Option<TokenType> {
    let mut chars = segment.chars();
    let first = chars.next()?;

    if segment.trim().is_empty() {
        return None; // whitespace between words
    }

    if segment.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') && first.is_ascii_digit()
    {
        return Some(TokenType::Numeric);
    }

    if segment.chars().any(|c| c.is_alphanumeric()) {
        return Some(TokenType::Word);
    }

    if segment.chars().all(|c| matches!(c, '.' | '!' | '?' | '\u{2026}')) {
        return Some(TokenType::SentenceBoundary);
    }

    if segment.chars().all(|c| c.is_ascii_punctuation()) {
        return Some(TokenType::Punctuation);
    }

    Some(TokenType::Symbol)
}

// ============================================================================
// WordTokenizer — the stateless baseline
// ============================================================================

/// Unicode-aware word tokenizer following UAX #29 word boundaries.
///
/// Stateless and infallible; this is the baseline every fallback decorator
/// substitutes when a specialized tokenizer is broken or unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer {
    _private: (),
}

impl WordTokenizer {
    /// Create a new baseline tokenizer
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, doc_idx: usize, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();

        for (start, segment) in text.split_word_bound_indices() {
            let Some(token_type) = classify(segment) else {
                continue;
            };
            tokens.push(Token::new(
                segment,
                token_type,
                doc_idx,
                start,
                start + segment.len(),
            ));
        }

        tokens
    }
}

// ============================================================================
// CjkTokenizer — per-grapheme segmentation for Han scripts
// ============================================================================

/// Tokenizer for Chinese text: emits one token per Han grapheme, falling
/// back to word-boundary segmentation for embedded Latin runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct CjkTokenizer {
    _private: (),
}

impl CjkTokenizer {
    /// Create a new CJK tokenizer
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a character belongs to a CJK script
    pub fn is_cjk(c: char) -> bool {
        matches!(c,
            '\u{4E00}'..='\u{9FFF}' |   // CJK Unified Ideographs
            '\u{3400}'..='\u{4DBF}' |   // CJK Extension A
            '\u{F900}'..='\u{FAFF}' |   // CJK Compatibility
            '\u{3040}'..='\u{309F}' |   // Hiragana
            '\u{30A0}'..='\u{30FF}' |   // Katakana
            '\u{AC00}'..='\u{D7AF}'     // Hangul
        )
    }
}

impl Tokenizer for CjkTokenizer {
    fn tokenize(&self, doc_idx: usize, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();

        for (seg_start, segment) in text.split_word_bound_indices() {
            let Some(token_type) = classify(segment) else {
                continue;
            };

            let is_cjk_segment =
                token_type == TokenType::Word && segment.chars().any(Self::is_cjk);

            if is_cjk_segment {
                for (g_start, grapheme) in segment.grapheme_indices(true) {
                    let start = seg_start + g_start;
                    tokens.push(Token::new(
                        grapheme,
                        TokenType::Word,
                        doc_idx,
                        start,
                        start + grapheme.len(),
                    ));
                }
            } else {
                tokens.push(Token::new(
                    segment,
                    token_type,
                    doc_idx,
                    seg_start,
                    seg_start + segment.len(),
                ));
            }
        }

        tokens
    }
}

// ============================================================================
// WhitespaceTokenizer — trivial splitter for tests and custom profiles
// ============================================================================

/// Splits on ASCII whitespace only; every token is a [`TokenType::Word`].
///
/// Useful for building trivial profiles in tests and demos.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer {
    _private: (),
}

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, doc_idx: usize, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut offset = 0;

        for part in text.split_whitespace() {
            // split_whitespace discards offsets; recover them by scanning.
            let start = text[offset..]
                .find(part)
                .map(|p| offset + p)
                .unwrap_or(offset);
            tokens.push(Token::new(
                part,
                TokenType::Word,
                doc_idx,
                start,
                start + part.len(),
            ));
            offset = start + part.len();
        }

        tokens
    }
}
