//! Kanban board grouping for tasks and experiments.
//!
//! # Invariants
//! - One column per declared status, in `StatusEnum::ALL` order, even
//!   when empty.
//! - Items keep their input order within a column.
//! - Every input item lands in exactly one column.

use crate::model::work_item::{Experiment, ExperimentStatus, Task, TaskStatus};
use crate::model::StatusEnum;

/// Items that can be placed on a status board.
pub trait StatusKeyed {
    type Status: StatusEnum;

    fn status_key(&self) -> Self::Status;
}

impl StatusKeyed for Task {
    type Status = TaskStatus;

    fn status_key(&self) -> TaskStatus {
        self.status
    }
}

impl StatusKeyed for Experiment {
    type Status = ExperimentStatus;

    fn status_key(&self) -> ExperimentStatus {
        self.status
    }
}

/// One board column.
#[derive(Debug)]
pub struct Column<'a, T: StatusKeyed> {
    pub status: T::Status,
    pub items: Vec<&'a T>,
}

/// Items partitioned by status.
#[derive(Debug)]
pub struct Board<'a, T: StatusKeyed> {
    columns: Vec<Column<'a, T>>,
}

impl<'a, T: StatusKeyed> Board<'a, T> {
    pub fn columns(&self) -> &[Column<'a, T>] {
        &self.columns
    }

    pub fn column(&self, status: T::Status) -> Option<&Column<'a, T>> {
        self.columns.iter().find(|column| column.status == status)
    }

    /// Total number of items across all columns.
    pub fn len(&self) -> usize {
        self.columns.iter().map(|column| column.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_columns(self) -> Vec<Column<'a, T>> {
        self.columns
    }
}

/// Partitions `items` into status columns.
pub fn group_by_status<T: StatusKeyed>(items: &[T]) -> Board<'_, T> {
    let mut columns: Vec<Column<'_, T>> = <T::Status as StatusEnum>::ALL
        .iter()
        .map(|&status| Column {
            status,
            items: Vec::new(),
        })
        .collect();

    for item in items {
        let status = item.status_key();
        if let Some(column) = columns.iter_mut().find(|column| column.status == status) {
            column.items.push(item);
        }
    }
    debug_assert_eq!(
        columns.iter().map(|column| column.items.len()).sum::<usize>(),
        items.len(),
        "a status is missing from StatusEnum::ALL"
    );

    Board { columns }
}
