//! # textclust
//!
//! Language-aware preprocessing and clustering of search-result documents.
//!
//! The crate is organized around four pieces:
//!
//! - [`language`] — per-language tokenizer/stemmer resolution with verified
//!   fallback to an always-available baseline;
//! - [`preprocess`] — a four-stage pipeline (tokenize, normalize case, stem,
//!   mark stop words) over a per-run [`PreprocessingContext`];
//! - [`attrs`] — a visitor-based attribute model for discovering,
//!   serializing, and binding component configuration;
//! - [`clustering`] — the [`ClusteringAlgorithm`] contract and a built-in
//!   stem-grouping baseline.
//!
//! # Example
//!
//! ```
//! use textclust::clustering::{ClusteringAlgorithm, StemGroupingAlgorithm};
//! use textclust::language::LanguageRegistry;
//! use textclust::types::Document;
//!
//! let registry = LanguageRegistry::with_defaults();
//! let profile = registry.profile(textclust::language::Language::English).unwrap();
//!
//! let documents = vec![
//!     Document::new().with_field("title", "Data Mining"),
//!     Document::new().with_field("title", "Data Warehousing"),
//! ];
//!
//! let algorithm = StemGroupingAlgorithm::new();
//! let clusters = algorithm.cluster(&documents, &profile).unwrap();
//! assert_eq!(clusters[0].label, "data");
//! ```

pub mod attrs;
pub mod clustering;
pub mod errors;
pub mod language;
pub mod preprocess;
pub mod types;

pub use attrs::{check_documentation, from_map, to_map, AttrComponent, AttrMap, AttrValue};
pub use clustering::{cluster_all, ClusteringAlgorithm, StemGroupingAlgorithm};
pub use errors::{ClusterError, Result};
pub use language::{Language, LanguageProfile, LanguageRegistry};
pub use preprocess::{PreprocessingContext, PreprocessingPipeline};
pub use types::{Cluster, Document, Token, TokenType};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
