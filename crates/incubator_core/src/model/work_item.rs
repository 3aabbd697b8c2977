//! Task and experiment records shown on startup kanban boards.
//!
//! # Invariants
//! - `due_date` is optional; items without one are never overdue.
//! - Terminal statuses are never overdue regardless of `due_date`.

use super::StatusEnum;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TaskId = Uuid;
pub type ExperimentId = Uuid;

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn is_terminal(self) -> bool {
        self == Self::Done
    }
}

impl StatusEnum for TaskStatus {
    const ALL: &'static [Self] = &[Self::Todo, Self::InProgress, Self::Done];

    fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }
}

/// Growth experiment lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperimentStatus {
    Planned,
    Running,
    /// Finished with a recorded outcome.
    Concluded,
    /// Stopped before an outcome was recorded.
    Abandoned,
}

impl ExperimentStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Concluded | Self::Abandoned)
    }
}

impl StatusEnum for ExperimentStatus {
    const ALL: &'static [Self] = &[
        Self::Planned,
        Self::Running,
        Self::Concluded,
        Self::Abandoned,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Running => "running",
            Self::Concluded => "concluded",
            Self::Abandoned => "abandoned",
        }
    }
}

/// Actionable item on a startup's task board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a `todo` task with a generated ID.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            status: TaskStatus::Todo,
            due_date: None,
        }
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        is_past_due(self.due_date, now) && !self.status.is_terminal()
    }
}

/// Hypothesis-driven experiment tracked by a startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experiment {
    pub id: ExperimentId,
    pub title: String,
    #[serde(default)]
    pub hypothesis: String,
    pub status: ExperimentStatus,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

impl Experiment {
    /// Creates a `planned` experiment with a generated ID.
    pub fn new(title: impl Into<String>, hypothesis: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            hypothesis: hypothesis.into(),
            status: ExperimentStatus::Planned,
            due_date: None,
        }
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        is_past_due(self.due_date, now) && !self.status.is_terminal()
    }
}

fn is_past_due(due_date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    due_date.is_some_and(|due| due < now)
}
