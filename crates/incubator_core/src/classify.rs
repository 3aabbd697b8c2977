//! Status-to-bucket classification for badges and board columns.
//!
//! # Responsibility
//! - Map every status value to a display label and severity tone.
//! - Map raw status strings from the backend without failing.
//!
//! # Invariants
//! - Classification is pure and total over each status enum.
//! - Unrecognized raw strings map to `Bucket::NEUTRAL`.
//! - `Bucket::key` equals the status wire string.

use crate::model::document::{DocumentStatus, SignatoryStatus};
use crate::model::work_item::{ExperimentStatus, TaskStatus};
use crate::model::StatusEnum;
use log::debug;
use serde::Serialize;

/// Severity tag driving badge color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Neutral,
    Info,
    Warning,
    Success,
    Danger,
}

/// Presentation bucket for one status value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Bucket {
    /// Status wire string, also used as kanban column key.
    pub key: &'static str,
    pub label: &'static str,
    pub tone: Tone,
}

impl Bucket {
    /// Fallback for values no status enum recognizes.
    pub const NEUTRAL: Bucket = Bucket {
        key: "unknown",
        label: "Unknown",
        tone: Tone::Neutral,
    };

    const fn new(key: &'static str, label: &'static str, tone: Tone) -> Self {
        Self { key, label, tone }
    }
}

/// Status enums with a presentation bucket.
pub trait Classify: StatusEnum {
    fn bucket(self) -> Bucket;
}

/// Classifies a typed status value.
pub fn classify<S: Classify>(status: S) -> Bucket {
    status.bucket()
}

/// Which status enum a raw string belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusDomain {
    Signatory,
    Document,
    Task,
    Experiment,
}

impl StatusDomain {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "signatory" => Some(Self::Signatory),
            "document" => Some(Self::Document),
            "task" => Some(Self::Task),
            "experiment" => Some(Self::Experiment),
            _ => None,
        }
    }
}

/// Classifies a raw status string from `domain`.
///
/// Never fails: values added on the backend before this crate knows about
/// them land in `Bucket::NEUTRAL`.
pub fn classify_raw(domain: StatusDomain, raw: &str) -> Bucket {
    match domain {
        StatusDomain::Signatory => classify_parsed::<SignatoryStatus>(raw),
        StatusDomain::Document => classify_parsed::<DocumentStatus>(raw),
        StatusDomain::Task => classify_parsed::<TaskStatus>(raw),
        StatusDomain::Experiment => classify_parsed::<ExperimentStatus>(raw),
    }
}

fn classify_parsed<S: Classify>(raw: &str) -> Bucket {
    match S::parse(raw) {
        Some(status) => status.bucket(),
        None => {
            debug!(
                "event=status_classify module=classify status=fallback bucket={} raw_len={}",
                Bucket::NEUTRAL.key,
                raw.len()
            );
            Bucket::NEUTRAL
        }
    }
}

impl Classify for SignatoryStatus {
    fn bucket(self) -> Bucket {
        let key = self.as_str();
        match self {
            Self::NotSigned => Bucket::new(key, "Not signed", Tone::Warning),
            Self::Viewed => Bucket::new(key, "Viewed", Tone::Info),
            Self::Signed => Bucket::new(key, "Signed", Tone::Success),
        }
    }
}

impl Classify for DocumentStatus {
    fn bucket(self) -> Bucket {
        let key = self.as_str();
        match self {
            Self::OutForSignature => Bucket::new(key, "Out for signature", Tone::Info),
            Self::PartiallySigned => Bucket::new(key, "Partially signed", Tone::Warning),
            Self::Completed => Bucket::new(key, "Completed", Tone::Success),
            Self::Voided => Bucket::new(key, "Voided", Tone::Danger),
        }
    }
}

impl Classify for TaskStatus {
    fn bucket(self) -> Bucket {
        let key = self.as_str();
        match self {
            Self::Todo => Bucket::new(key, "To do", Tone::Neutral),
            Self::InProgress => Bucket::new(key, "In progress", Tone::Info),
            Self::Done => Bucket::new(key, "Done", Tone::Success),
        }
    }
}

impl Classify for ExperimentStatus {
    fn bucket(self) -> Bucket {
        let key = self.as_str();
        match self {
            Self::Planned => Bucket::new(key, "Planned", Tone::Neutral),
            Self::Running => Bucket::new(key, "Running", Tone::Info),
            Self::Concluded => Bucket::new(key, "Concluded", Tone::Success),
            Self::Abandoned => Bucket::new(key, "Abandoned", Tone::Danger),
        }
    }
}
