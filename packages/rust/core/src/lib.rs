//! Batch orchestration and index building for TopicPress.
//!
//! This crate ties the content requester and the renderer together into the
//! end-to-end `generate` workflow, and owns the index/navigation builder.

pub mod indexes;
pub mod pipeline;
pub mod writer;

pub use indexes::build_indexes;
pub use pipeline::{
    BatchOptions, BatchRunner, BatchSummary, FailedTopic, FailureKind, IndexReport,
    ProgressReporter, SilentProgress, write_indexes,
};
