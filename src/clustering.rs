//! The clustering algorithm contract and the built-in stem-grouping
//! algorithm.
//!
//! A [`ClusteringAlgorithm`] takes a read-only document batch plus a
//! language profile and produces labeled clusters. Implementations must be
//! deterministic: the same batch, configuration, and profile yield the same
//! clusters in the same order, even when many batches run concurrently over
//! one shared algorithm instance. All per-run state lives on the stack of
//! [`cluster`](ClusteringAlgorithm::cluster).

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::attrs::{AttrComponent, AttrDescriptor, AttrKind, AttrValue, AttrVisitor, Constraint};
use crate::errors::{ClusterError, Result};
use crate::language::LanguageProfile;
use crate::preprocess::PreprocessingPipeline;
use crate::types::{Cluster, Document, TokenType};

// ============================================================================
// ClusteringAlgorithm
// ============================================================================

/// A configurable, reusable clustering algorithm.
///
/// One instance may serve many concurrent `cluster` calls; implementations
/// keep no mutable per-run state on `&self`.
pub trait ClusteringAlgorithm: AttrComponent + Send + Sync {
    /// Stable algorithm identifier, used in error messages
    fn name(&self) -> &'static str;

    /// Cluster one document batch against a language profile.
    ///
    /// Returned clusters are ordered by [`Cluster::stable_cmp`]; member
    /// document indices are ascending. Errors propagate unchanged.
    fn cluster(&self, documents: &[Document], profile: &LanguageProfile) -> Result<Vec<Cluster>>;
}

/// Cluster several batches in parallel over one shared algorithm.
///
/// Results come back in batch order; the first error aborts the whole call.
pub fn cluster_all<A: ClusteringAlgorithm + ?Sized>(
    algorithm: &A,
    batches: &[Vec<Document>],
    profile: &LanguageProfile,
) -> Result<Vec<Vec<Cluster>>> {
    batches
        .par_iter()
        .map(|batch| algorithm.cluster(batch, profile))
        .collect()
}

// ============================================================================
// StemGroupingAlgorithm
// ============================================================================

/// Groups documents by shared non-stop-word stems.
///
/// Every stem occurring in at least `min_cluster_size` distinct documents
/// becomes a cluster; the label is the most frequent surface form of the
/// stem (lexicographically smallest on a tie) and the score is the member
/// count. Intended as a transparent baseline rather than a quality
/// reference.
#[derive(Debug, Clone, PartialEq)]
pub struct StemGroupingAlgorithm {
    /// Preprocessing configuration shared by every run
    pub pipeline: PreprocessingPipeline,
    /// Minimum number of distinct member documents per cluster
    pub min_cluster_size: i64,
    /// Maximum number of clusters returned (0 = unlimited)
    pub max_clusters: i64,
}

impl Default for StemGroupingAlgorithm {
    fn default() -> Self {
        Self {
            pipeline: PreprocessingPipeline::new(),
            min_cluster_size: 2,
            max_clusters: 0,
        }
    }
}

impl StemGroupingAlgorithm {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Per-stem accumulator built while scanning the token stream.
#[derive(Debug, Default)]
struct StemGroup {
    /// Member document indices, ascending and deduplicated
    documents: Vec<usize>,
    /// Occurrence count per normalized surface form
    forms: FxHashMap<String, usize>,
}

impl StemGroup {
    fn add(&mut self, doc_idx: usize, form: &str) {
        if self.documents.last() != Some(&doc_idx) {
            self.documents.push(doc_idx);
        }
        *self.forms.entry(form.to_string()).or_insert(0) += 1;
    }

    /// The most frequent surface form; ties break lexicographically.
    fn label(&self) -> String {
        self.forms
            .iter()
            .max_by(|(form_a, count_a), (form_b, count_b)| {
                count_a.cmp(count_b).then_with(|| form_b.cmp(form_a))
            })
            .map(|(form, _)| form.clone())
            .unwrap_or_default()
    }
}

impl ClusteringAlgorithm for StemGroupingAlgorithm {
    fn name(&self) -> &'static str {
        "stem-grouping"
    }

    fn cluster(&self, documents: &[Document], profile: &LanguageProfile) -> Result<Vec<Cluster>> {
        let ctx = self
            .pipeline
            .preprocess(documents, "", profile)
            .map_err(|err| ClusterError::algorithm_execution(self.name(), err.to_string()))?;

        // Tokens arrive in document order, so each group's document list
        // stays ascending without an extra sort.
        let mut groups: FxHashMap<String, StemGroup> = FxHashMap::default();
        for token in ctx.tokens() {
            if token.token_type != TokenType::Word || token.is_stopword {
                continue;
            }
            groups
                .entry(token.stem_or_normalized().to_string())
                .or_default()
                .add(token.doc_idx, token.normalized_or_text());
        }

        let min_size = self.min_cluster_size.max(1) as usize;
        let mut clusters: Vec<Cluster> = groups
            .into_values()
            .filter(|group| group.documents.len() >= min_size)
            .map(|group| {
                let score = group.documents.len() as f64;
                Cluster::new(group.label(), group.documents, score)
            })
            .collect();

        clusters.sort_by(|a, b| a.stable_cmp(b));
        if self.max_clusters > 0 {
            clusters.truncate(self.max_clusters as usize);
        }
        Ok(clusters)
    }
}

impl AttrComponent for StemGroupingAlgorithm {
    fn visit_attrs(&self, visitor: &mut dyn AttrVisitor) {
        visitor.visit_int(
            &AttrDescriptor::new("min_cluster_size", AttrKind::Int)
                .described("Minimum number of distinct member documents per cluster")
                .constrained(Constraint::IntRange {
                    min: 1,
                    max: i64::MAX,
                }),
            self.min_cluster_size,
        );
        visitor.visit_int(
            &AttrDescriptor::new("max_clusters", AttrKind::Int)
                .described("Maximum number of clusters returned; 0 means unlimited")
                .constrained(Constraint::IntRange {
                    min: 0,
                    max: i64::MAX,
                }),
            self.max_clusters,
        );
        visitor.visit_component(
            &AttrDescriptor::new("pipeline", AttrKind::Component)
                .described("Preprocessing pipeline configuration"),
            &self.pipeline,
        );
    }

    fn bind_attr(&mut self, key: &str, value: &AttrValue) -> Result<()> {
        match key {
            "min_cluster_size" => {
                self.min_cluster_size = value.expect_int(key)?;
                Ok(())
            }
            "max_clusters" => {
                self.max_clusters = value.expect_int(key)?;
                Ok(())
            }
            other => Err(ClusterError::attribute_binding(other, "unknown attribute")),
        }
    }

    fn child_mut(&mut self, key: &str) -> Option<&mut dyn AttrComponent> {
        match key {
            "pipeline" => Some(&mut self.pipeline),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::{from_map, to_map, AttrMap, IdentityMapper};
    use crate::language::profile::{Stemmer, Tokenizer};
    use crate::language::stopwords::StopwordSet;
    use crate::language::{IdentityStemmer, Language, LightStemmer, WordTokenizer};
    use std::sync::Arc;

    fn profile(stopwords: &[&str]) -> LanguageProfile {
        LanguageProfile::new(
            Language::English,
            Arc::new(|| Box::new(WordTokenizer::new()) as Box<dyn Tokenizer>),
            Arc::new(|| Box::new(LightStemmer::new()) as Box<dyn Stemmer>),
            StopwordSet::from_words(stopwords),
        )
    }

    fn sample_docs() -> Vec<Document> {
        vec![
            Document::new().with_field("title", "Data Mining"),
            Document::new().with_field("title", "Data Warehousing"),
            Document::new().with_field("title", "Mining Techniques"),
        ]
    }

    #[test]
    fn test_groups_by_shared_stem() {
        let algorithm = StemGroupingAlgorithm::new();
        let clusters = algorithm.cluster(&sample_docs(), &profile(&[])).unwrap();

        let data = clusters.iter().find(|c| c.label == "data").unwrap();
        assert_eq!(data.documents, [0, 1]);
        assert_eq!(data.score, 2.0);

        // "Mining" stems to "min" and the only surface form is "mining".
        let mining = clusters.iter().find(|c| c.label == "mining").unwrap();
        assert_eq!(mining.documents, [0, 2]);
    }

    #[test]
    fn test_min_cluster_size_filters_singletons() {
        let algorithm = StemGroupingAlgorithm::new();
        let clusters = algorithm.cluster(&sample_docs(), &profile(&[])).unwrap();

        // "warehousing" and "techniques" each occur in one document only.
        assert!(clusters.iter().all(|c| c.size() >= 2));

        let permissive = StemGroupingAlgorithm {
            min_cluster_size: 1,
            ..StemGroupingAlgorithm::new()
        };
        let all = permissive.cluster(&sample_docs(), &profile(&[])).unwrap();
        assert!(all.len() > clusters.len());
    }

    #[test]
    fn test_max_clusters_caps_output() {
        let algorithm = StemGroupingAlgorithm {
            min_cluster_size: 1,
            max_clusters: 2,
            ..StemGroupingAlgorithm::new()
        };
        let clusters = algorithm.cluster(&sample_docs(), &profile(&[])).unwrap();
        assert_eq!(clusters.len(), 2);
    }

    #[test]
    fn test_stopwords_never_label_clusters() {
        let docs = vec![
            Document::new().with_field("t", "the data"),
            Document::new().with_field("t", "the warehouse"),
        ];
        let algorithm = StemGroupingAlgorithm {
            min_cluster_size: 1,
            ..StemGroupingAlgorithm::new()
        };
        let clusters = algorithm.cluster(&docs, &profile(&["the"])).unwrap();
        assert!(clusters.iter().all(|c| c.label != "the"));
    }

    #[test]
    fn test_label_prefers_frequent_surface_form() {
        let docs = vec![
            Document::new().with_field("t", "cats cats cat"),
            Document::new().with_field("t", "cats"),
        ];
        let algorithm = StemGroupingAlgorithm {
            min_cluster_size: 1,
            ..StemGroupingAlgorithm::new()
        };
        let clusters = algorithm.cluster(&docs, &profile(&[])).unwrap();
        assert_eq!(clusters[0].label, "cats");
    }

    #[test]
    fn test_deterministic_output() {
        let algorithm = StemGroupingAlgorithm {
            min_cluster_size: 1,
            ..StemGroupingAlgorithm::new()
        };
        let docs = sample_docs();
        let p = profile(&[]);

        let first = algorithm.cluster(&docs, &p).unwrap();
        for _ in 0..10 {
            assert_eq!(algorithm.cluster(&docs, &p).unwrap(), first);
        }
    }

    #[test]
    fn test_empty_batch_yields_no_clusters() {
        let algorithm = StemGroupingAlgorithm::new();
        let clusters = algorithm.cluster(&[], &profile(&[])).unwrap();
        assert!(clusters.is_empty());
    }

    #[test]
    fn test_fieldless_documents_join_no_cluster() {
        let docs = vec![Document::new(), Document::new()];
        let algorithm = StemGroupingAlgorithm {
            min_cluster_size: 1,
            ..StemGroupingAlgorithm::new()
        };
        let clusters = algorithm.cluster(&docs, &profile(&[])).unwrap();
        assert!(clusters.is_empty());
    }

    #[test]
    fn test_cluster_all_preserves_batch_order() {
        let batches = vec![
            vec![Document::new().with_field("t", "alpha alpha")],
            vec![],
            vec![Document::new().with_field("t", "beta beta")],
        ];
        let algorithm = StemGroupingAlgorithm {
            min_cluster_size: 1,
            ..StemGroupingAlgorithm::new()
        };
        let results = cluster_all(&algorithm, &batches, &profile(&[])).unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0][0].label, "alpha");
        assert!(results[1].is_empty());
        assert_eq!(results[2][0].label, "beta");
    }

    #[test]
    fn test_attr_round_trip_including_pipeline() {
        let mut algorithm = StemGroupingAlgorithm::new();
        algorithm.max_clusters = 16;
        algorithm.pipeline.tokenize.max_field_length = 1024;

        let map = to_map(&algorithm, &IdentityMapper);
        assert_eq!(map["max_clusters"], AttrValue::Int(16));
        assert_eq!(map["pipeline.tokenize.max_field_length"], AttrValue::Int(1024));

        let mut rebuilt = StemGroupingAlgorithm::new();
        from_map(&mut rebuilt, &map, &IdentityMapper).unwrap();
        assert_eq!(rebuilt, algorithm);
    }

    #[test]
    fn test_bind_unknown_attr_fails() {
        let mut algorithm = StemGroupingAlgorithm::new();
        let mut map = AttrMap::new();
        map.insert("fuzziness".to_string(), AttrValue::Real(0.5));
        assert!(from_map(&mut algorithm, &map, &IdentityMapper).is_err());
    }

    #[test]
    fn test_identity_stemmer_profile_works() {
        let p = LanguageProfile::new(
            Language::English,
            Arc::new(|| Box::new(WordTokenizer::new()) as Box<dyn Tokenizer>),
            Arc::new(|| Box::new(IdentityStemmer) as Box<dyn Stemmer>),
            StopwordSet::empty(),
        );
        let docs = vec![
            Document::new().with_field("t", "rust"),
            Document::new().with_field("t", "rust"),
        ];
        let clusters = StemGroupingAlgorithm::new().cluster(&docs, &p).unwrap();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].label, "rust");
    }
}
