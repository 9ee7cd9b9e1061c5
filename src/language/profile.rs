//! Languages, tokenizer/stemmer traits, and the immutable language profile.

use std::fmt;
use std::sync::Arc;

use crate::language::stopwords::StopwordSet;
use crate::types::Token;

// ============================================================================
// Language
// ============================================================================

/// A language known to the registry, with a stable ISO-style code and a
/// human-readable label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    German,
    French,
    Spanish,
    Italian,
    Portuguese,
    Dutch,
    Russian,
    Polish,
    Turkish,
    Arabic,
    Chinese,
    Thai,
    Japanese,
}

impl Language {
    /// Every language the registry knows about.
    pub const ALL: [Language; 14] = [
        Language::English,
        Language::German,
        Language::French,
        Language::Spanish,
        Language::Italian,
        Language::Portuguese,
        Language::Dutch,
        Language::Russian,
        Language::Polish,
        Language::Turkish,
        Language::Arabic,
        Language::Chinese,
        Language::Thai,
        Language::Japanese,
    ];

    /// Stable two-letter code
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::German => "de",
            Language::French => "fr",
            Language::Spanish => "es",
            Language::Italian => "it",
            Language::Portuguese => "pt",
            Language::Dutch => "nl",
            Language::Russian => "ru",
            Language::Polish => "pl",
            Language::Turkish => "tr",
            Language::Arabic => "ar",
            Language::Chinese => "zh",
            Language::Thai => "th",
            Language::Japanese => "ja",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::German => "German",
            Language::French => "French",
            Language::Spanish => "Spanish",
            Language::Italian => "Italian",
            Language::Portuguese => "Portuguese",
            Language::Dutch => "Dutch",
            Language::Russian => "Russian",
            Language::Polish => "Polish",
            Language::Turkish => "Turkish",
            Language::Arabic => "Arabic",
            Language::Chinese => "Chinese",
            Language::Thai => "Thai",
            Language::Japanese => "Japanese",
        }
    }

    /// Look a language up by its two-letter code
    pub fn from_code(code: &str) -> Option<Language> {
        Language::ALL
            .iter()
            .copied()
            .find(|l| l.code() == code.to_lowercase())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Tokenizer / Stemmer traits
// ============================================================================

/// Splits field text into classified tokens.
///
/// Implementations must be deterministic: identical input text produces an
/// identical token sequence.
pub trait Tokenizer: Send {
    /// Tokenize `text`, tagging every produced token with `doc_idx`.
    fn tokenize(&self, doc_idx: usize, text: &str) -> Vec<Token>;
}

impl fmt::Debug for dyn Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("dyn Tokenizer")
    }
}

/// Reduces a normalized word to its stem form.
///
/// Implementations must be deterministic and total: every input yields a
/// stem (possibly the input itself).
pub trait Stemmer: Send {
    fn stem(&self, word: &str) -> String;
}

impl fmt::Debug for dyn Stemmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("dyn Stemmer")
    }
}

/// A shared, infallible factory producing component instances.
///
/// Factories returned by the registry never fail from the caller's point of
/// view: broken candidates have already been substituted with the baseline
/// by the fallback decorator.
pub type ComponentFactory<T> = Arc<dyn Fn() -> T + Send + Sync>;

// ============================================================================
// LanguageProfile
// ============================================================================

/// Immutable bundle of tokenizer factory, stemmer factory, and stop-word
/// set for one language.
///
/// Profiles are never mutated after creation and are cheap to clone (the
/// factories are shared).
#[derive(Clone)]
pub struct LanguageProfile {
    language: Language,
    tokenizer_factory: ComponentFactory<Box<dyn Tokenizer>>,
    stemmer_factory: ComponentFactory<Box<dyn Stemmer>>,
    stopwords: StopwordSet,
}

impl LanguageProfile {
    /// Create a profile from explicit factories and a stop-word set.
    pub fn new(
        language: Language,
        tokenizer_factory: ComponentFactory<Box<dyn Tokenizer>>,
        stemmer_factory: ComponentFactory<Box<dyn Stemmer>>,
        stopwords: StopwordSet,
    ) -> Self {
        Self {
            language,
            tokenizer_factory,
            stemmer_factory,
            stopwords,
        }
    }

    /// The profiled language
    pub fn language(&self) -> Language {
        self.language
    }

    /// Instantiate a tokenizer for one preprocessing run
    pub fn new_tokenizer(&self) -> Box<dyn Tokenizer> {
        (self.tokenizer_factory)()
    }

    /// Instantiate a stemmer for one preprocessing run
    pub fn new_stemmer(&self) -> Box<dyn Stemmer> {
        (self.stemmer_factory)()
    }

    /// Check a normalized/stem form against the stop-word set
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// The profile's stop-word set
    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }
}

impl fmt::Debug for LanguageProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageProfile")
            .field("language", &self.language)
            .field("stopwords", &self.stopwords.len())
            .finish()
    }
}
