//! Multi-stage preprocessing of document batches.
//!
//! [`PreprocessingPipeline`] runs four ordered stages (tokenize, normalize
//! case, stem, mark stop words) over a shared [`PreprocessingContext`]. The
//! context keeps transient scratch buffers structurally separate from the
//! final token/boundary arrays so scratch can be released before the result
//! is handed to the caller.

pub mod context;
pub mod pipeline;
pub mod stages;

pub use context::{PreprocessingContext, StringPool};
pub use pipeline::PreprocessingPipeline;
pub use stages::{CaseNormalizeStage, StemStage, StopMarkStage, TokenizeStage};
