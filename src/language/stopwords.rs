//! Per-language stop-word sets.
//!
//! Most languages load from the `stop-words` crate; Chinese and Thai carry
//! small built-in lists because the crate has no standard list for them.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

use crate::language::profile::Language;

/// An immutable set of stop words, matched against normalized token forms.
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: FxHashSet<String>,
}

impl StopwordSet {
    /// An empty set (no words are flagged)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from an explicit word list
    pub fn from_words(words: &[&str]) -> Self {
        Self {
            words: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Load the default stop-word set for a language
    pub fn for_language(language: Language) -> Self {
        let words: FxHashSet<String> = match language {
            Language::English => crate_list(LANGUAGE::English),
            Language::German => crate_list(LANGUAGE::German),
            Language::French => crate_list(LANGUAGE::French),
            Language::Spanish => crate_list(LANGUAGE::Spanish),
            Language::Italian => crate_list(LANGUAGE::Italian),
            Language::Portuguese => crate_list(LANGUAGE::Portuguese),
            Language::Dutch => crate_list(LANGUAGE::Dutch),
            Language::Russian => crate_list(LANGUAGE::Russian),
            Language::Polish => crate_list(LANGUAGE::Polish),
            Language::Turkish => crate_list(LANGUAGE::Turkish),
            Language::Arabic => crate_list(LANGUAGE::Arabic),
            Language::Chinese => chinese_stopwords(),
            // No standard lists available; an empty set means nothing is
            // flagged, which degrades quality but never correctness.
            Language::Thai | Language::Japanese => FxHashSet::default(),
        };
        Self { words }
    }

    /// Check membership (input is expected to be lowercase already)
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of words in the set
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn crate_list(language: LANGUAGE) -> FxHashSet<String> {
    get(language).iter().map(|s| s.to_string()).collect()
}

/// Common Chinese stopwords
fn chinese_stopwords() -> FxHashSet<String> {
    [
        "的", "是", "在", "有", "和", "与", "或", "不", "了", "也", "就", "都", "而", "及",
        "这", "那", "个", "为", "以", "等", "但", "被", "给", "让", "把", "从", "到", "对",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_stopwords() {
        let set = StopwordSet::for_language(Language::English);
        assert!(set.contains("the"));
        assert!(set.contains("of"));
        assert!(!set.contains("mining"));
    }

    #[test]
    fn test_chinese_stopwords() {
        let set = StopwordSet::for_language(Language::Chinese);
        assert!(set.contains("的"));
        assert!(!set.contains("数"));
    }

    #[test]
    fn test_empty_set_flags_nothing() {
        let set = StopwordSet::empty();
        assert!(set.is_empty());
        assert!(!set.contains("the"));
    }

    #[test]
    fn test_from_words_lowercases() {
        let set = StopwordSet::from_words(&["The", "OF"]);
        assert!(set.contains("the"));
        assert!(set.contains("of"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_thai_has_no_default_list() {
        let set = StopwordSet::for_language(Language::Thai);
        assert!(set.is_empty());
    }
}
