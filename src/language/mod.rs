//! Language-aware tokenization and stemming.
//!
//! This module resolves, per language, the tokenizer and stemmer to use:
//!
//! - [`profile`] defines the [`Language`] enum, the [`Tokenizer`] and
//!   [`Stemmer`] traits, and the immutable [`LanguageProfile`] bundle.
//! - [`tokenizers`] / [`stemmers`] hold the baseline and specialized
//!   implementations.
//! - [`fallback`] wraps non-baseline factories with a verification probe
//!   that substitutes the baseline on failure, warning through a
//!   [`WarningSink`](fallback::WarningSink).
//! - [`registry`] builds the immutable language-to-factory mapping.
//! - [`stopwords`] loads per-language stop-word sets.

pub mod fallback;
pub mod profile;
pub mod registry;
pub mod stemmers;
pub mod stopwords;
pub mod tokenizers;

pub use fallback::{with_fallback, LogSink, WarningSink};
pub use profile::{ComponentFactory, Language, LanguageProfile, Stemmer, Tokenizer};
pub use registry::{LanguageRegistry, LanguageRegistryBuilder};
pub use stemmers::{IdentityStemmer, LightStemmer};
pub use stopwords::StopwordSet;
pub use tokenizers::{CjkTokenizer, WordTokenizer};
