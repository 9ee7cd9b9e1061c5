//! The per-run preprocessing context.
//!
//! A [`PreprocessingContext`] is a scoped resource acquired for exactly one
//! pipeline run. It owns two structurally separate storage domains:
//!
//! - **scratch** — buffers used transiently while stages run (a string
//!   interning pool and a field-concatenation buffer), held in an `Option`
//!   so they can be dropped deterministically by
//!   [`release_scratch`](PreprocessingContext::release_scratch);
//! - **final** — the token array, per-document token ranges, and query
//!   stems consumed by algorithms after the pipeline call returns.
//!
//! # Invariant
//!
//! Releasing scratch must never invalidate the final arrays. The two
//! domains share no storage, so "release scratch, then return the result"
//! is safe by construction.

use rustc_hash::FxHashMap;
use std::ops::Range;
use std::sync::Arc;

use crate::errors::{ClusterError, Result};
use crate::types::Token;

// ============================================================================
// String interning (scratch domain)
// ============================================================================

/// A pool for string interning to reduce allocations and enable fast
/// comparisons while stages run.
#[derive(Debug, Default)]
pub struct StringPool {
    /// Maps strings to their interned IDs
    string_to_id: FxHashMap<Arc<str>, u32>,
    /// Maps IDs back to strings
    id_to_string: Vec<Arc<str>>,
}

impl StringPool {
    /// Create a new empty string pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string, returning its ID
    pub fn intern(&mut self, s: &str) -> u32 {
        if let Some(&id) = self.string_to_id.get(s) {
            return id;
        }

        let id = self.id_to_string.len() as u32;
        let arc: Arc<str> = s.into();
        self.string_to_id.insert(arc.clone(), id);
        self.id_to_string.push(arc);
        id
    }

    /// Get a string by its ID
    pub fn get(&self, id: u32) -> Option<&str> {
        self.id_to_string.get(id as usize).map(|s| s.as_ref())
    }

    /// Number of unique strings in the pool
    pub fn len(&self) -> usize {
        self.id_to_string.len()
    }

    /// Check if the pool is empty
    pub fn is_empty(&self) -> bool {
        self.id_to_string.is_empty()
    }
}

/// Transient buffers shared by pipeline stages.
#[derive(Debug, Default)]
pub(crate) struct Scratch {
    /// Interning pool caching normalized token forms
    pub pool: StringPool,
    /// Reusable buffer for concatenating a document's field text
    pub field_buf: String,
}

// ============================================================================
// PreprocessingContext
// ============================================================================

/// Per-run container of derived token/boundary data.
///
/// Created once per `preprocess` call and exclusively owned by the caller
/// thereafter; it has no identity outside that call and is never shared
/// across threads.
#[derive(Debug)]
pub struct PreprocessingContext {
    // Scratch domain: dropped by release_scratch().
    scratch: Option<Scratch>,

    // Final domain: remains valid and unchanged after scratch release.
    tokens: Vec<Token>,
    doc_ranges: Vec<Range<usize>>,
    query_stems: Vec<String>,
}

impl PreprocessingContext {
    /// Create an empty context with live scratch buffers
    pub fn new() -> Self {
        Self {
            scratch: Some(Scratch::default()),
            tokens: Vec::new(),
            doc_ranges: Vec::new(),
            query_stems: Vec::new(),
        }
    }

    /// All tokens across all documents, in document order
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Per-document token ranges, indexing into [`tokens`](Self::tokens)
    pub fn doc_ranges(&self) -> &[Range<usize>] {
        &self.doc_ranges
    }

    /// Number of documents this context was built from
    pub fn doc_count(&self) -> usize {
        self.doc_ranges.len()
    }

    /// The tokens of one document
    pub fn doc_tokens(&self, doc_idx: usize) -> &[Token] {
        match self.doc_ranges.get(doc_idx) {
            Some(range) => &self.tokens[range.clone()],
            None => &[],
        }
    }

    /// Stemmed query terms, filled by the stemming stage
    pub fn query_stems(&self) -> &[String] {
        &self.query_stems
    }

    /// Append one document's tokens and record its range
    pub(crate) fn push_document(&mut self, tokens: Vec<Token>) {
        let start = self.tokens.len();
        self.tokens.extend(tokens);
        self.doc_ranges.push(start..self.tokens.len());
    }

    pub(crate) fn tokens_mut(&mut self) -> &mut [Token] {
        &mut self.tokens
    }

    pub(crate) fn set_query_stems(&mut self, stems: Vec<String>) {
        self.query_stems = stems;
    }

    /// Access the scratch domain; fails if scratch was already released.
    pub(crate) fn scratch_mut(&mut self) -> Result<&mut Scratch> {
        self.scratch
            .as_mut()
            .ok_or_else(|| ClusterError::internal("scratch buffers accessed after release"))
    }

    /// Split-borrow scratch and tokens for stages that need both.
    pub(crate) fn scratch_and_tokens_mut(&mut self) -> Result<(&mut Scratch, &mut [Token])> {
        match self.scratch.as_mut() {
            Some(scratch) => Ok((scratch, &mut self.tokens)),
            None => Err(ClusterError::internal(
                "scratch buffers accessed after release",
            )),
        }
    }

    /// Drop the scratch domain.
    ///
    /// Idempotent. The final arrays remain valid and unchanged.
    pub fn release_scratch(&mut self) {
        self.scratch = None;
    }

    /// Check whether scratch has been released
    pub fn scratch_released(&self) -> bool {
        self.scratch.is_none()
    }
}

impl Default for PreprocessingContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TokenType;

    fn word(text: &str, doc_idx: usize) -> Token {
        Token::new(text, TokenType::Word, doc_idx, 0, text.len())
    }

    #[test]
    fn test_string_pool_dedup() {
        let mut pool = StringPool::new();
        let id1 = pool.intern("hello");
        let id2 = pool.intern("world");
        let id3 = pool.intern("hello");

        assert_eq!(id1, id3);
        assert_ne!(id1, id2);
        assert_eq!(pool.get(id1), Some("hello"));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_push_document_records_ranges() {
        let mut ctx = PreprocessingContext::new();
        ctx.push_document(vec![word("a", 0), word("b", 0)]);
        ctx.push_document(vec![word("c", 1)]);
        ctx.push_document(vec![]); // fieldless document: zero tokens

        assert_eq!(ctx.tokens().len(), 3);
        assert_eq!(ctx.doc_ranges(), &[0..2, 2..3, 3..3]);
        assert_eq!(ctx.doc_tokens(0).len(), 2);
        assert_eq!(ctx.doc_tokens(2).len(), 0);
        assert_eq!(ctx.doc_tokens(99).len(), 0);
    }

    #[test]
    fn test_release_scratch_preserves_final_arrays() {
        let mut ctx = PreprocessingContext::new();
        ctx.push_document(vec![word("alpha", 0)]);
        ctx.scratch_mut().unwrap().pool.intern("alpha");

        let tokens_before = ctx.tokens().to_vec();
        let ranges_before = ctx.doc_ranges().to_vec();

        ctx.release_scratch();
        assert!(ctx.scratch_released());
        assert_eq!(ctx.tokens(), tokens_before.as_slice());
        assert_eq!(ctx.doc_ranges(), ranges_before.as_slice());
    }

    #[test]
    fn test_scratch_access_after_release_fails() {
        let mut ctx = PreprocessingContext::new();
        ctx.release_scratch();

        assert!(ctx.scratch_mut().is_err());
        assert!(ctx.scratch_and_tokens_mut().is_err());
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut ctx = PreprocessingContext::new();
        ctx.push_document(vec![word("x", 0)]);
        ctx.release_scratch();
        ctx.release_scratch();
        assert_eq!(ctx.tokens().len(), 1);
    }

    #[test]
    fn test_empty_context_is_valid() {
        let mut ctx = PreprocessingContext::new();
        ctx.release_scratch();
        assert!(ctx.tokens().is_empty());
        assert_eq!(ctx.doc_count(), 0);
    }
}
