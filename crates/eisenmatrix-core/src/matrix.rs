//! Quadrant buckets for the matrix view.
//!
//! Every [`MatrixAggregate::rebuild`] recomputes all four buckets from the
//! task list and the supplied `now`, returning a fresh [`MatrixState`]. There
//! is no incremental patching and no cached state between calls, so two
//! rebuilds with identical inputs produce identical snapshots. Renderers that
//! want to animate transitions diff consecutive snapshots themselves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::classifier::{ClassificationPolicy, Classifier};
use crate::error::ValidationError;
use crate::frame::Rect;
use crate::quadrant::Quadrant;
use crate::task::{Task, TaskStatus};

/// One quadrant's tasks and counters.
///
/// `tasks` holds only tasks in progress, in input order. `completed_count`
/// counts completed tasks from the same input whose classification falls in
/// this quadrant; they are not drawn but are reported alongside.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuadrantBucket {
    pub tasks: Vec<Task>,
    pub count: usize,
    pub overdue_count: usize,
    pub completed_count: usize,
}

impl QuadrantBucket {
    pub fn stats(&self) -> QuadrantStats {
        QuadrantStats {
            count: self.count,
            overdue_count: self.overdue_count,
            completed_count: self.completed_count,
        }
    }
}

/// Counters for one quadrant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuadrantStats {
    pub count: usize,
    pub overdue_count: usize,
    pub completed_count: usize,
}

/// Immutable snapshot of the matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixState {
    /// Instant the snapshot was computed for
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub computed_at: DateTime<Utc>,
    pub quadrants: BTreeMap<Quadrant, QuadrantBucket>,
}

impl MatrixState {
    fn empty(computed_at: DateTime<Utc>) -> Self {
        Self {
            computed_at,
            quadrants: Quadrant::ALL
                .into_iter()
                .map(|q| (q, QuadrantBucket::default()))
                .collect(),
        }
    }

    fn bucket_mut(&mut self, quadrant: Quadrant) -> &mut QuadrantBucket {
        self.quadrants.entry(quadrant).or_default()
    }

    /// Bucket for `quadrant`.
    pub fn bucket(&self, quadrant: Quadrant) -> Option<&QuadrantBucket> {
        self.quadrants.get(&quadrant)
    }

    /// Tasks in `quadrant`, in input order.
    pub fn tasks(&self, quadrant: Quadrant) -> &[Task] {
        self.bucket(quadrant)
            .map(|b| b.tasks.as_slice())
            .unwrap_or(&[])
    }

    /// Per-quadrant counters.
    pub fn stats(&self) -> BTreeMap<Quadrant, QuadrantStats> {
        self.quadrants.iter().map(|(q, b)| (*q, b.stats())).collect()
    }

    /// Number of tasks across all buckets.
    pub fn total_count(&self) -> usize {
        self.quadrants.values().map(|b| b.count).sum()
    }

    /// Bucket holding the task with `id`, if it is on the matrix.
    pub fn quadrant_of(&self, id: &str) -> Option<Quadrant> {
        self.quadrants
            .iter()
            .find(|(_, b)| b.tasks.iter().any(|t| t.id == id))
            .map(|(q, _)| *q)
    }
}

/// Builds matrix snapshots under one classification policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatrixAggregate {
    classifier: Classifier,
}

impl MatrixAggregate {
    /// Aggregate using the live policy.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: ClassificationPolicy) -> Self {
        Self {
            classifier: Classifier::new(policy),
        }
    }

    pub fn policy(&self) -> &ClassificationPolicy {
        self.classifier.policy()
    }

    /// Recompute all buckets from `tasks` at `now`.
    ///
    /// Only tasks with status `doing` are bucketed. Completed tasks are
    /// classified for `completed_count`; pending and rejected tasks are
    /// skipped without validation.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] naming the first task that lacks
    /// importance or a due date; no partial snapshot is produced.
    pub fn rebuild(
        &self,
        tasks: &[Task],
        now: DateTime<Utc>,
    ) -> Result<MatrixState, ValidationError> {
        let mut state = MatrixState::empty(now);

        for task in tasks {
            if matches!(task.status, TaskStatus::Pending | TaskStatus::Rejected) {
                continue;
            }
            let classification = self.classifier.classify_task(task, now)?;
            let bucket = state.bucket_mut(classification.quadrant);
            if task.status == TaskStatus::Doing {
                bucket.tasks.push(task.clone());
                bucket.count += 1;
                if classification.is_overdue {
                    bucket.overdue_count += 1;
                }
            } else {
                bucket.completed_count += 1;
            }
        }

        tracing::debug!(
            input = tasks.len(),
            bucketed = state.total_count(),
            policy = ?self.policy().kind,
            "matrix rebuilt"
        );
        Ok(state)
    }

    /// Layout rectangle of `quadrant` on a `width` x `height` canvas.
    pub fn quadrant_bounds(quadrant: Quadrant, width: f64, height: f64) -> Rect {
        quadrant.bounds(width, height)
    }
}
