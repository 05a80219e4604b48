//! Pipelines.
//!
//! The module provides a light [pipeline::Pipeline] trait
//! and the corpus building pipeline, [corpus::CorpusBuilder].
pub mod corpus;
#[allow(clippy::module_inception)]
pub mod pipeline;
pub mod report;

pub use corpus::CorpusBuilder;
pub use pipeline::Pipeline;
pub use report::{DatasetReport, RunReport};
