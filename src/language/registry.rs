//! The language registry: an immutable, explicitly constructed mapping from
//! language to verified tokenizer/stemmer factories.
//!
//! Construction starts every language on the shared baseline factories
//! ([`WordTokenizer`] / [`IdentityStemmer`]), overrides specific languages
//! with specialized factories, and marks explicitly unsupported languages so
//! resolution fails with
//! [`ClusterError::UnsupportedLanguage`] instead of silently falling back.
//! Every non-baseline factory is wrapped with the verified-fallback
//! decorator at build time.
//!
//! The built registry holds no external resources, is read-only, and is safe
//! for unsynchronized concurrent reads. It is a plain value: build it once
//! at process start and pass it by reference.

use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;

use crate::errors::{ClusterError, Result};
use crate::language::fallback::{with_fallback, FallibleFactory, LogSink, Probe, WarningSink};
use crate::language::profile::{
    ComponentFactory, Language, LanguageProfile, Stemmer, Tokenizer,
};
use crate::language::stemmers::{IdentityStemmer, LightStemmer};
use crate::language::stopwords::StopwordSet;
use crate::language::tokenizers::{CjkTokenizer, WordTokenizer};

type BoxedTokenizer = Box<dyn Tokenizer>;
type BoxedStemmer = Box<dyn Stemmer>;

enum RegistryEntry {
    Supported {
        tokenizer: ComponentFactory<BoxedTokenizer>,
        stemmer: ComponentFactory<BoxedStemmer>,
    },
    /// Explicit "not implemented" marker, distinct from a broken factory.
    Unsupported,
}

// ============================================================================
// LanguageRegistry
// ============================================================================

/// Immutable language-to-factory mapping with verified fallback.
pub struct LanguageRegistry {
    entries: FxHashMap<Language, RegistryEntry>,
}

impl LanguageRegistry {
    /// Start building a registry with the default warning sink.
    pub fn builder() -> LanguageRegistryBuilder {
        LanguageRegistryBuilder::new()
    }

    /// The default registry: baseline everywhere, a CJK tokenizer for
    /// Chinese, a light stemmer for English, Japanese unsupported.
    pub fn with_defaults() -> Self {
        Self::with_defaults_and_sink(Arc::new(LogSink))
    }

    /// The default registry with an explicit warning sink.
    pub fn with_defaults_and_sink(sink: Arc<dyn WarningSink>) -> Self {
        LanguageRegistryBuilder::new()
            .with_sink(sink)
            .override_tokenizer(Language::Chinese, Arc::new(|| {
                Ok(Box::new(CjkTokenizer::new()) as BoxedTokenizer)
            }))
            .override_stemmer(Language::English, Arc::new(|| {
                Ok(Box::new(LightStemmer::new()) as BoxedStemmer)
            }))
            .mark_unsupported(Language::Japanese)
            .build()
    }

    /// Resolve a tokenizer instance for `language`.
    ///
    /// Fails only for languages explicitly marked unsupported; broken
    /// specialized factories fall back to the baseline silently (plus one
    /// warning per resolution).
    pub fn resolve_tokenizer(&self, language: Language) -> Result<BoxedTokenizer> {
        match self.entries.get(&language) {
            Some(RegistryEntry::Supported { tokenizer, .. }) => Ok(tokenizer()),
            _ => Err(ClusterError::unsupported_language(language.label())),
        }
    }

    /// Resolve a stemmer instance for `language`.
    pub fn resolve_stemmer(&self, language: Language) -> Result<BoxedStemmer> {
        match self.entries.get(&language) {
            Some(RegistryEntry::Supported { stemmer, .. }) => Ok(stemmer()),
            _ => Err(ClusterError::unsupported_language(language.label())),
        }
    }

    /// Build the full language profile (factories plus stop-word set).
    pub fn profile(&self, language: Language) -> Result<LanguageProfile> {
        match self.entries.get(&language) {
            Some(RegistryEntry::Supported { tokenizer, stemmer }) => Ok(LanguageProfile::new(
                language,
                tokenizer.clone(),
                stemmer.clone(),
                StopwordSet::for_language(language),
            )),
            _ => Err(ClusterError::unsupported_language(language.label())),
        }
    }

    /// Check whether `language` is explicitly marked unsupported.
    pub fn is_unsupported(&self, language: Language) -> bool {
        matches!(self.entries.get(&language), Some(RegistryEntry::Unsupported))
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builds a [`LanguageRegistry`].
///
/// All decoration happens in [`build`](Self::build): overrides are wrapped
/// with the verified-fallback decorator against the shared baselines, and
/// the resulting mapping is immutable.
pub struct LanguageRegistryBuilder {
    sink: Arc<dyn WarningSink>,
    tokenizer_overrides: FxHashMap<Language, FallibleFactory<BoxedTokenizer>>,
    stemmer_overrides: FxHashMap<Language, FallibleFactory<BoxedStemmer>>,
    unsupported: FxHashSet<Language>,
}

impl LanguageRegistryBuilder {
    /// Create a builder with the `log`-backed warning sink.
    pub fn new() -> Self {
        Self {
            sink: Arc::new(LogSink),
            tokenizer_overrides: FxHashMap::default(),
            stemmer_overrides: FxHashMap::default(),
            unsupported: FxHashSet::default(),
        }
    }

    /// Replace the warning sink receiving fallback degradations.
    pub fn with_sink(mut self, sink: Arc<dyn WarningSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Override the tokenizer factory for one language.
    pub fn override_tokenizer(
        mut self,
        language: Language,
        factory: FallibleFactory<BoxedTokenizer>,
    ) -> Self {
        self.tokenizer_overrides.insert(language, factory);
        self
    }

    /// Override the stemmer factory for one language.
    pub fn override_stemmer(
        mut self,
        language: Language,
        factory: FallibleFactory<BoxedStemmer>,
    ) -> Self {
        self.stemmer_overrides.insert(language, factory);
        self
    }

    /// Mark a language as explicitly unsupported: resolution fails instead
    /// of falling back.
    pub fn mark_unsupported(mut self, language: Language) -> Self {
        self.unsupported.insert(language);
        self
    }

    /// Build the immutable registry, decorating every override with the
    /// verified-fallback wrapper.
    pub fn build(self) -> LanguageRegistry {
        let baseline_tokenizer: ComponentFactory<BoxedTokenizer> =
            Arc::new(|| Box::new(WordTokenizer::new()) as BoxedTokenizer);
        let baseline_stemmer: ComponentFactory<BoxedStemmer> =
            Arc::new(|| Box::new(IdentityStemmer) as BoxedStemmer);

        let mut entries = FxHashMap::default();

        for language in Language::ALL {
            if self.unsupported.contains(&language) {
                entries.insert(language, RegistryEntry::Unsupported);
                continue;
            }

            let tokenizer = match self.tokenizer_overrides.get(&language) {
                Some(factory) => with_fallback(
                    factory.clone(),
                    baseline_tokenizer.clone(),
                    tokenizer_probe(),
                    self.sink.clone(),
                    &degradation_template("Tokenizer", language),
                ),
                None => baseline_tokenizer.clone(),
            };

            let stemmer = match self.stemmer_overrides.get(&language) {
                Some(factory) => with_fallback(
                    factory.clone(),
                    baseline_stemmer.clone(),
                    stemmer_probe(),
                    self.sink.clone(),
                    &degradation_template("Stemmer", language),
                ),
                None => baseline_stemmer.clone(),
            };

            entries.insert(language, RegistryEntry::Supported { tokenizer, stemmer });
        }

        LanguageRegistry { entries }
    }
}

impl Default for LanguageRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Functional verification for tokenizers: a known input must yield tokens.
fn tokenizer_probe() -> Probe<BoxedTokenizer> {
    Arc::new(|tokenizer| {
        if tokenizer.tokenize(0, "verify").is_empty() {
            Err("produced no tokens for probe input".to_string())
        } else {
            Ok(())
        }
    })
}

/// Functional verification for stemmers: stemming must yield a non-empty form.
fn stemmer_probe() -> Probe<BoxedStemmer> {
    Arc::new(|stemmer| {
        if stemmer.stem("verify").is_empty() {
            Err("produced an empty stem for probe input".to_string())
        } else {
            Ok(())
        }
    })
}

fn degradation_template(component: &str, language: Language) -> String {
    format!(
        "{component} for {label} ({code}) is not available. \
         This may degrade clustering quality of {label} content. Cause: {{cause}}",
        label = language.label(),
        code = language.code(),
    )
}
