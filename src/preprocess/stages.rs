//! The four pipeline stages.
//!
//! Each stage is an independently configurable attribute component that
//! consumes and extends the shared [`PreprocessingContext`]. Stages run in
//! a fixed order (tokenize, normalize case, stem, mark stop words); the
//! ordering itself lives in
//! [`PreprocessingPipeline`](crate::preprocess::pipeline::PreprocessingPipeline).

use crate::attrs::{AttrComponent, AttrDescriptor, AttrKind, AttrValue, AttrVisitor, Constraint};
use crate::errors::{ClusterError, Result};
use crate::language::profile::{LanguageProfile, Stemmer, Tokenizer};
use crate::preprocess::context::PreprocessingContext;
use crate::types::Document;

// ============================================================================
// TokenizeStage
// ============================================================================

/// Stage 1: extract field text through the document visitor and tokenize.
///
/// Documents arrive as a finite, single-pass iterator; each document's
/// textual fields are concatenated through the scratch buffer and run
/// through the resolved tokenizer, recording per-document token ranges.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenizeStage {
    /// Maximum characters taken per field (0 = unlimited)
    pub max_field_length: i64,
}

impl Default for TokenizeStage {
    fn default() -> Self {
        Self {
            max_field_length: 0,
        }
    }
}

impl TokenizeStage {
    pub(crate) fn run<'a>(
        &self,
        ctx: &mut PreprocessingContext,
        documents: impl Iterator<Item = &'a Document>,
        tokenizer: &dyn Tokenizer,
    ) -> Result<()> {
        for (doc_idx, document) in documents.enumerate() {
            let limit = self.max_field_length;
            {
                let scratch = ctx.scratch_mut()?;
                scratch.field_buf.clear();
                document.for_each_field(|_name, value| {
                    let taken: &str = if limit > 0 {
                        truncate_chars(value, limit as usize)
                    } else {
                        value
                    };
                    if taken.is_empty() {
                        return;
                    }
                    if !scratch.field_buf.is_empty() {
                        scratch.field_buf.push('\n');
                    }
                    scratch.field_buf.push_str(taken);
                });
            }

            // Move the buffer out so the tokenizer can borrow it while the
            // context takes the produced tokens, then hand it back.
            let text = std::mem::take(&mut ctx.scratch_mut()?.field_buf);
            let tokens = tokenizer.tokenize(doc_idx, &text);
            ctx.push_document(tokens);
            ctx.scratch_mut()?.field_buf = text;
        }
        Ok(())
    }
}

/// Truncate at a char boundary after `max` chars.
fn truncate_chars(value: &str, max: usize) -> &str {
    match value.char_indices().nth(max) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

impl AttrComponent for TokenizeStage {
    fn visit_attrs(&self, visitor: &mut dyn AttrVisitor) {
        visitor.visit_int(
            &AttrDescriptor::new("max_field_length", AttrKind::Int)
                .described("Maximum characters taken from each document field; 0 means unlimited")
                .constrained(Constraint::IntRange {
                    min: 0,
                    max: i64::MAX,
                }),
            self.max_field_length,
        );
    }

    fn bind_attr(&mut self, key: &str, value: &AttrValue) -> Result<()> {
        match key {
            "max_field_length" => {
                self.max_field_length = value.expect_int(key)?;
                Ok(())
            }
            other => Err(ClusterError::attribute_binding(other, "unknown attribute")),
        }
    }

    fn child_mut(&mut self, _key: &str) -> Option<&mut dyn AttrComponent> {
        None
    }
}

// ============================================================================
// CaseNormalizeStage
// ============================================================================

/// Stage 2: collapse casing variants of the same surface form.
///
/// Normalized forms are interned through the scratch pool so repeated
/// surface forms share one canonicalization.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseNormalizeStage {
    /// Fold token text to lowercase
    pub fold_case: bool,
}

impl Default for CaseNormalizeStage {
    fn default() -> Self {
        Self { fold_case: true }
    }
}

impl CaseNormalizeStage {
    pub(crate) fn run(&self, ctx: &mut PreprocessingContext) -> Result<()> {
        let fold_case = self.fold_case;
        let (scratch, tokens) = ctx.scratch_and_tokens_mut()?;

        for token in tokens.iter_mut() {
            if !token.token_type.is_textual() {
                continue;
            }
            let normalized = if fold_case {
                token.text.to_lowercase()
            } else {
                token.text.clone()
            };
            let id = scratch.pool.intern(&normalized);
            // The pool owns the canonical copy; the token stores its own.
            token.normalized = scratch.pool.get(id).map(|s| s.to_string());
        }
        Ok(())
    }
}

impl AttrComponent for CaseNormalizeStage {
    fn visit_attrs(&self, visitor: &mut dyn AttrVisitor) {
        visitor.visit_bool(
            &AttrDescriptor::new("fold_case", AttrKind::Bool)
                .described("Collapse casing variants by lowercasing token text"),
            self.fold_case,
        );
    }

    fn bind_attr(&mut self, key: &str, value: &AttrValue) -> Result<()> {
        match key {
            "fold_case" => {
                self.fold_case = value.expect_bool(key)?;
                Ok(())
            }
            other => Err(ClusterError::attribute_binding(other, "unknown attribute")),
        }
    }

    fn child_mut(&mut self, _key: &str) -> Option<&mut dyn AttrComponent> {
        None
    }
}

// ============================================================================
// StemStage
// ============================================================================

/// Stage 3: produce a stem per token and stem the query.
///
/// The query string is threaded into this stage only; its stems are stored
/// on the context so algorithms can apply query-term boosting.
#[derive(Debug, Clone, PartialEq)]
pub struct StemStage {
    /// Record stemmed query terms on the context
    pub stem_query: bool,
}

impl Default for StemStage {
    fn default() -> Self {
        Self { stem_query: true }
    }
}

impl StemStage {
    pub(crate) fn run(
        &self,
        ctx: &mut PreprocessingContext,
        query: &str,
        stemmer: &dyn Stemmer,
    ) -> Result<()> {
        for token in ctx.tokens_mut() {
            if !token.token_type.is_textual() {
                continue;
            }
            let stem = stemmer.stem(token.normalized_or_text());
            token.stem = Some(stem);
        }

        if self.stem_query && !query.is_empty() {
            let stems = query
                .split_whitespace()
                .map(|term| stemmer.stem(&term.to_lowercase()))
                .collect();
            ctx.set_query_stems(stems);
        }
        Ok(())
    }
}

impl AttrComponent for StemStage {
    fn visit_attrs(&self, visitor: &mut dyn AttrVisitor) {
        visitor.visit_bool(
            &AttrDescriptor::new("stem_query", AttrKind::Bool)
                .described("Stem the query string and record its terms on the context"),
            self.stem_query,
        );
    }

    fn bind_attr(&mut self, key: &str, value: &AttrValue) -> Result<()> {
        match key {
            "stem_query" => {
                self.stem_query = value.expect_bool(key)?;
                Ok(())
            }
            other => Err(ClusterError::attribute_binding(other, "unknown attribute")),
        }
    }

    fn child_mut(&mut self, _key: &str) -> Option<&mut dyn AttrComponent> {
        None
    }
}

// ============================================================================
// StopMarkStage
// ============================================================================

/// Stage 4: flag tokens belonging to the profile's stop-word set.
#[derive(Debug, Clone, PartialEq)]
pub struct StopMarkStage {
    /// Also match stem forms against the stop-word set
    pub match_stems: bool,
}

impl Default for StopMarkStage {
    fn default() -> Self {
        Self { match_stems: true }
    }
}

impl StopMarkStage {
    pub(crate) fn run(
        &self,
        ctx: &mut PreprocessingContext,
        profile: &LanguageProfile,
    ) -> Result<()> {
        let match_stems = self.match_stems;
        for token in ctx.tokens_mut() {
            if !token.token_type.is_textual() {
                continue;
            }
            let mut stop = profile.is_stopword(token.normalized_or_text());
            if !stop && match_stems {
                if let Some(stem) = token.stem.as_deref() {
                    stop = profile.is_stopword(stem);
                }
            }
            token.is_stopword = stop;
        }
        Ok(())
    }
}

impl AttrComponent for StopMarkStage {
    fn visit_attrs(&self, visitor: &mut dyn AttrVisitor) {
        visitor.visit_bool(
            &AttrDescriptor::new("match_stems", AttrKind::Bool)
                .described("Match stem forms against the stop-word set in addition to normalized forms"),
            self.match_stems,
        );
    }

    fn bind_attr(&mut self, key: &str, value: &AttrValue) -> Result<()> {
        match key {
            "match_stems" => {
                self.match_stems = value.expect_bool(key)?;
                Ok(())
            }
            other => Err(ClusterError::attribute_binding(other, "unknown attribute")),
        }
    }

    fn child_mut(&mut self, _key: &str) -> Option<&mut dyn AttrComponent> {
        None
    }
}
