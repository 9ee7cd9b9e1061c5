//! The ordered stage composition.

use crate::attrs::{AttrComponent, AttrDescriptor, AttrKind, AttrValue, AttrVisitor};
use crate::errors::{ClusterError, Result};
use crate::language::LanguageProfile;
use crate::preprocess::context::PreprocessingContext;
use crate::preprocess::stages::{CaseNormalizeStage, StemStage, StopMarkStage, TokenizeStage};
use crate::types::Document;

/// Runs the four preprocessing stages in their fixed order over one batch
/// of documents.
///
/// The pipeline itself is stateless across runs; every call to
/// [`preprocess`](Self::preprocess) builds a fresh [`PreprocessingContext`],
/// instantiates fresh tokenizer/stemmer components from the profile, and
/// releases the context's scratch buffers before returning. Two calls with
/// identical inputs produce identical contexts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreprocessingPipeline {
    pub tokenize: TokenizeStage,
    pub normalize: CaseNormalizeStage,
    pub stem: StemStage,
    pub stop_mark: StopMarkStage,
}

impl PreprocessingPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preprocess a batch of documents against a language profile.
    ///
    /// `documents` is consumed in a single pass; `query` may be empty. The
    /// returned context has its scratch domain already released.
    pub fn preprocess<'a>(
        &self,
        documents: impl IntoIterator<Item = &'a Document>,
        query: &str,
        profile: &LanguageProfile,
    ) -> Result<PreprocessingContext> {
        let mut ctx = PreprocessingContext::new();

        let tokenizer = profile.new_tokenizer();
        self.tokenize
            .run(&mut ctx, documents.into_iter(), tokenizer.as_ref())?;

        self.normalize.run(&mut ctx)?;

        let stemmer = profile.new_stemmer();
        self.stem.run(&mut ctx, query, stemmer.as_ref())?;

        self.stop_mark.run(&mut ctx, profile)?;

        ctx.release_scratch();
        Ok(ctx)
    }
}

impl AttrComponent for PreprocessingPipeline {
    fn visit_attrs(&self, visitor: &mut dyn AttrVisitor) {
        visitor.visit_component(
            &AttrDescriptor::new("tokenize", AttrKind::Component)
                .described("Field extraction and tokenization stage"),
            &self.tokenize,
        );
        visitor.visit_component(
            &AttrDescriptor::new("normalize", AttrKind::Component)
                .described("Case normalization stage"),
            &self.normalize,
        );
        visitor.visit_component(
            &AttrDescriptor::new("stem", AttrKind::Component)
                .described("Stemming stage, including query-term stemming"),
            &self.stem,
        );
        visitor.visit_component(
            &AttrDescriptor::new("stop_mark", AttrKind::Component)
                .described("Stop-word marking stage"),
            &self.stop_mark,
        );
    }

    fn bind_attr(&mut self, key: &str, _value: &AttrValue) -> Result<()> {
        Err(ClusterError::attribute_binding(
            key,
            "pipeline has no leaf attributes of its own",
        ))
    }

    fn child_mut(&mut self, key: &str) -> Option<&mut dyn AttrComponent> {
        match key {
            "tokenize" => Some(&mut self.tokenize),
            "normalize" => Some(&mut self.normalize),
            "stem" => Some(&mut self.stem),
            "stop_mark" => Some(&mut self.stop_mark),
            _ => None,
        }
    }
}
