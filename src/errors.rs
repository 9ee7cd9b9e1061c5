//! Error types for textclust
//!
//! This module defines the error types used throughout the library.
//! All errors are designed to be informative and actionable.

use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ClusterError>;

/// Main error type for textclust
#[derive(Error, Debug, Clone)]
pub enum ClusterError {
    /// The language has no configured tokenizer/stemmer at all.
    ///
    /// This is an explicit "not implemented" marker, distinct from
    /// "available but unverified" (which falls back silently).
    #[error("Unsupported language: {language}")]
    UnsupportedLanguage { language: String },

    /// An attribute map could not be bound to a component
    /// (unknown key or type-mismatched value).
    #[error("Attribute binding failed at '{path}': {message}")]
    AttributeBinding { path: String, message: String },

    /// One or more attribute descriptors are missing documentation.
    ///
    /// Violations are collected across the whole attribute tree so a
    /// single run reports every gap.
    #[error("Documentation check failed ({} violation(s)): {}", violations.len(), violations.join(", "))]
    DocumentationCheck { violations: Vec<String> },

    /// A clustering algorithm failed during execution.
    /// Propagated to the caller unchanged; never retried or swallowed.
    #[error("Algorithm '{algorithm}' failed: {message}")]
    AlgorithmExecution { algorithm: String, message: String },

    /// Internal invariant violation (should not occur in normal usage)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ClusterError {
    /// Create an unsupported language error
    pub fn unsupported_language(language: impl Into<String>) -> Self {
        Self::UnsupportedLanguage {
            language: language.into(),
        }
    }

    /// Create an attribute binding error
    pub fn attribute_binding(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AttributeBinding {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a documentation check error from collected violation paths
    pub fn documentation_check(violations: Vec<String>) -> Self {
        Self::DocumentationCheck { violations }
    }

    /// Create an algorithm execution error
    pub fn algorithm_execution(
        algorithm: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::AlgorithmExecution {
            algorithm: algorithm.into(),
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Check if this error is a documentation check failure
    /// (which carries the full list of violating attribute paths)
    pub fn is_documentation_check(&self) -> bool {
        matches!(self, Self::DocumentationCheck { .. })
    }
}
