//! Status and timeline derivation for the incubator dashboard.
//! This crate owns the rules that turn contract, task and experiment state
//! into display projections.

pub mod classify;
pub mod logging;
pub mod model;
pub mod projection;

pub use classify::{classify, classify_raw, Bucket, Classify, StatusDomain, Tone};
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig};
pub use model::document::{
    Document, DocumentId, DocumentStatus, ModelValidationError, Signatory, SignatoryId,
    SignatoryStatus,
};
pub use model::work_item::{
    Experiment, ExperimentId, ExperimentStatus, Task, TaskId, TaskStatus,
};
pub use model::StatusEnum;
pub use projection::kanban::{group_by_status, Board, Column, StatusKeyed};
pub use projection::timeline::{build_timeline, build_timeline_at, Timeline, TimelineEvent};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
