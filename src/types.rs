//! Core types for textclust
//!
//! This module defines the fundamental data structures used throughout the
//! library: documents, tokens, and clusters.

use serde::Serialize;

// ============================================================================
// Document
// ============================================================================

/// A field-bearing unit of input.
///
/// Documents expose their content only through the push-style field visitor
/// [`Document::for_each_field`]; there is intentionally no direct field
/// accessor. A document with zero fields is valid.
///
/// # Examples
///
/// ```
/// use textclust::types::Document;
///
/// let doc = Document::new()
///     .with_field("title", "Data Mining")
///     .with_field("snippet", "An introduction to data mining.");
///
/// let mut names = Vec::new();
/// doc.for_each_field(|name, _value| names.push(name.to_string()));
/// assert_eq!(names, ["title", "snippet"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    fields: Vec<(String, String)>,
}

impl Document {
    /// Create a new document with no fields
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: append a named field
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Invoke `f` once per field, in insertion order.
    ///
    /// This is the only way to observe a document's content.
    pub fn for_each_field(&self, mut f: impl FnMut(&str, &str)) {
        for (name, value) in &self.fields {
            f(name, value);
        }
    }

    /// Number of fields in this document
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Check if the document has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ============================================================================
// Token
// ============================================================================

/// Classification of a token produced by a tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenType {
    /// A regular word
    Word,
    /// A numeric token
    Numeric,
    /// Punctuation
    Punctuation,
    /// A symbol that is neither a word nor punctuation
    Symbol,
    /// A sentence boundary marker
    SentenceBoundary,
    /// A document boundary marker
    DocumentBoundary,
}

impl TokenType {
    /// Check if this token type carries indexable text
    pub fn is_textual(&self) -> bool {
        matches!(self, TokenType::Word | TokenType::Numeric)
    }
}

/// A classified text span produced by the preprocessing pipeline.
///
/// `normalized`, `stem`, and `is_stopword` start unset and are filled by the
/// case-normalization, stemming, and stop-word marking stages respectively.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// The surface form (original text)
    pub text: String,
    /// Token classification
    pub token_type: TokenType,
    /// Index of the document this token came from
    pub doc_idx: usize,
    /// Byte offset (start) within the source field text
    pub start: usize,
    /// Byte offset (end) within the source field text
    pub end: usize,
    /// Case-normalized form, absent until the normalization stage runs
    pub normalized: Option<String>,
    /// Stem form, absent until the stemming stage runs
    pub stem: Option<String>,
    /// Stop-word flag, false until the marking stage runs
    pub is_stopword: bool,
}

impl Token {
    /// Create a new token with unset derived fields
    pub fn new(
        text: impl Into<String>,
        token_type: TokenType,
        doc_idx: usize,
        start: usize,
        end: usize,
    ) -> Self {
        Self {
            text: text.into(),
            token_type,
            doc_idx,
            start,
            end,
            normalized: None,
            stem: None,
            is_stopword: false,
        }
    }

    /// The normalized form, falling back to the surface form
    pub fn normalized_or_text(&self) -> &str {
        self.normalized.as_deref().unwrap_or(&self.text)
    }

    /// The stem form, falling back to the normalized form
    pub fn stem_or_normalized(&self) -> &str {
        self.stem.as_deref().unwrap_or_else(|| self.normalized_or_text())
    }
}

// ============================================================================
// Cluster
// ============================================================================

/// A labeled group of documents, possibly with nested sub-clusters.
///
/// Clusters are produced only by clustering algorithms and are immutable
/// once returned: member documents are referenced by their index into the
/// input document sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    /// Human-readable cluster label
    pub label: String,
    /// Indices of member documents in the input sequence
    pub documents: Vec<usize>,
    /// Cluster score (algorithm-specific scale)
    pub score: f64,
    /// Nested sub-clusters
    pub subclusters: Vec<Cluster>,
}

impl Cluster {
    /// Create a new flat cluster
    pub fn new(label: impl Into<String>, documents: Vec<usize>, score: f64) -> Self {
        Self {
            label: label.into(),
            documents,
            score,
            subclusters: Vec::new(),
        }
    }

    /// Builder method: attach sub-clusters
    pub fn with_subclusters(mut self, subclusters: Vec<Cluster>) -> Self {
        self.subclusters = subclusters;
        self
    }

    /// Number of member documents (not counting sub-clusters)
    pub fn size(&self) -> usize {
        self.documents.len()
    }

    /// Stable tie-breaker comparator for deterministic cluster ordering.
    ///
    /// Orders by score descending; scores within `SCORE_EPSILON` are tied and
    /// break on label (lexicographic ascending), then on the smallest member
    /// document index. This guarantees a total, deterministic ordering
    /// regardless of platform or hash seed.
    pub fn stable_cmp(&self, other: &Self) -> std::cmp::Ordering {
        /// Two scores within this epsilon are considered tied.
        const SCORE_EPSILON: f64 = 1e-10;

        let score_diff = self.score - other.score;
        if score_diff.abs() > SCORE_EPSILON {
            return if score_diff > 0.0 {
                std::cmp::Ordering::Less
            } else {
                std::cmp::Ordering::Greater
            };
        }

        let label_ord = self.label.cmp(&other.label);
        if label_ord != std::cmp::Ordering::Equal {
            return label_ord;
        }

        let self_first = self.documents.first().copied().unwrap_or(usize::MAX);
        let other_first = other.documents.first().copied().unwrap_or(usize::MAX);
        self_first.cmp(&other_first)
    }
}
