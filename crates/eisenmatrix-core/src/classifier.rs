//! Quadrant classification.
//!
//! Two policies coexist and are always chosen explicitly:
//!
//! | Policy | Important when | Used for |
//! |--------|----------------|----------|
//! | [`ClassificationPolicy::live`] | importance >= 5 | matrix bucketing |
//! | [`ClassificationPolicy::analytics`] | importance >= 5.5 | reports |
//!
//! Both share the urgency rule: a task is urgent when the time remaining is
//! at most `urgent_threshold_hours`. Overdue tasks are therefore urgent.
//! Completed tasks are never urgent.
//!
//! The continuous urgency score is independent of the binary flag and is
//! a piecewise-linear function of days remaining:
//!
//! | Days remaining | Score |
//! |----------------|-------|
//! | overdue        | 1.0 |
//! | 0–1            | 0.8–1.0 |
//! | 1–3            | 0.6–0.8 |
//! | 3–7            | 0.4–0.6 |
//! | 7–30           | 0.2–0.4 |
//! | > 30           | 0.2 |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::quadrant::Quadrant;
use crate::task::{clamp_importance, Task, TaskStatus, MS_PER_HOUR};

const MS_PER_DAY: f64 = 24.0 * MS_PER_HOUR;

/// Default urgency window.
pub const DEFAULT_URGENT_THRESHOLD_HOURS: f64 = 24.0;
/// Importance threshold of the live policy.
pub const LIVE_IMPORTANCE_THRESHOLD: f64 = 5.0;
/// Importance threshold of the analytics policy.
pub const ANALYTICS_IMPORTANCE_THRESHOLD: f64 = 5.5;

/// Which named policy a [`ClassificationPolicy`] was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Matrix rendering
    #[default]
    Live,
    /// Reporting
    Analytics,
}

/// Thresholds that turn importance and time remaining into flags.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationPolicy {
    pub kind: PolicyKind,
    /// Minimum importance counted as important
    pub importance_threshold: f64,
    /// Maximum hours remaining counted as urgent
    pub urgent_threshold_hours: f64,
}

impl ClassificationPolicy {
    /// Policy used for matrix bucketing.
    pub fn live() -> Self {
        Self {
            kind: PolicyKind::Live,
            importance_threshold: LIVE_IMPORTANCE_THRESHOLD,
            urgent_threshold_hours: DEFAULT_URGENT_THRESHOLD_HOURS,
        }
    }

    /// Policy used for analytics reports.
    pub fn analytics() -> Self {
        Self {
            kind: PolicyKind::Analytics,
            importance_threshold: ANALYTICS_IMPORTANCE_THRESHOLD,
            urgent_threshold_hours: DEFAULT_URGENT_THRESHOLD_HOURS,
        }
    }

    pub fn for_kind(kind: PolicyKind) -> Self {
        match kind {
            PolicyKind::Live => Self::live(),
            PolicyKind::Analytics => Self::analytics(),
        }
    }

    pub fn with_urgent_threshold_hours(mut self, hours: f64) -> Self {
        self.urgent_threshold_hours = hours;
        self
    }

    pub fn with_importance_threshold(mut self, threshold: f64) -> Self {
        self.importance_threshold = threshold;
        self
    }

    fn urgent_threshold_ms(&self) -> f64 {
        self.urgent_threshold_hours * MS_PER_HOUR
    }
}

/// Outcome of classifying one task.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub is_important: bool,
    pub is_urgent: bool,
    pub is_overdue: bool,
    pub quadrant: Quadrant,
    /// Continuous time pressure in `[0, 1]`
    pub urgency_score: f64,
}

/// Continuous urgency score for `days_remaining` (negative when overdue).
pub fn urgency_score(days_remaining: f64) -> f64 {
    let d = days_remaining;
    if d < 0.0 {
        1.0
    } else if d <= 1.0 {
        0.8 + (1.0 - d) * 0.2
    } else if d <= 3.0 {
        0.6 + (3.0 - d) / 2.0 * 0.2
    } else if d <= 7.0 {
        0.4 + (7.0 - d) / 4.0 * 0.2
    } else if d <= 30.0 {
        0.2 + (30.0 - d) / 23.0 * 0.2
    } else {
        0.2
    }
}

/// Classifier bound to one policy.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    policy: ClassificationPolicy,
}

impl Classifier {
    pub fn new(policy: ClassificationPolicy) -> Self {
        Self { policy }
    }

    pub fn live() -> Self {
        Self::new(ClassificationPolicy::live())
    }

    pub fn analytics() -> Self {
        Self::new(ClassificationPolicy::analytics())
    }

    pub fn policy(&self) -> &ClassificationPolicy {
        &self.policy
    }

    /// Classify raw attributes. Importance is clamped to `[1, 10]` first.
    pub fn classify(
        &self,
        importance: f64,
        due_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Classification {
        let importance = clamp_importance(importance);
        let remaining_ms = due_at.signed_duration_since(now).num_milliseconds() as f64;

        let is_important = importance >= self.policy.importance_threshold;
        let is_urgent = remaining_ms <= self.policy.urgent_threshold_ms();

        Classification {
            is_important,
            is_urgent,
            is_overdue: remaining_ms < 0.0,
            quadrant: Quadrant::from_flags(is_important, is_urgent),
            urgency_score: urgency_score(remaining_ms / MS_PER_DAY),
        }
    }

    /// Classify a task record, honoring its status.
    ///
    /// Completed tasks are never urgent; their urgency score still follows
    /// the time remaining. Only open tasks (pending or doing) can be overdue.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the task lacks importance or a due
    /// date.
    pub fn classify_task(
        &self,
        task: &Task,
        now: DateTime<Utc>,
    ) -> Result<Classification, ValidationError> {
        let importance = task.require_importance()?;
        let due_at = task.require_due_at()?;
        let mut classification = self.classify(importance, due_at, now);

        if task.status == TaskStatus::Completed {
            classification.is_urgent = false;
            classification.quadrant = Quadrant::from_flags(classification.is_important, false);
        }
        if !task.status.is_open() {
            classification.is_overdue = false;
        }

        Ok(classification)
    }

    /// Classify every task, failing on the first invalid one.
    pub fn classify_all(
        &self,
        tasks: &[Task],
        now: DateTime<Utc>,
    ) -> Result<Vec<(String, Classification)>, ValidationError> {
        tasks
            .iter()
            .map(|task| Ok((task.id.clone(), self.classify_task(task, now)?)))
            .collect()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::live()
    }
}
