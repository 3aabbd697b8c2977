//! Display projections derived from entity state.
//!
//! # Responsibility
//! - Turn documents into signing timelines.
//! - Turn task/experiment lists into kanban boards.
//!
//! # Invariants
//! - Projections are recomputed on demand and never persisted.
//! - Building a projection never fails for well-typed input.

pub mod kanban;
pub mod timeline;
