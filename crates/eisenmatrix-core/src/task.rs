//! Task records consumed by the engine.
//!
//! Tasks are owned by an external store; the engine only reads them. The wire
//! shape is camelCase JSON with `dueAt` in epoch milliseconds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::frame::Point;

/// Lowest importance on the canonical scale.
pub const MIN_IMPORTANCE: f64 = 1.0;
/// Highest importance on the canonical scale.
pub const MAX_IMPORTANCE: f64 = 10.0;

/// Milliseconds in one hour.
pub const MS_PER_HOUR: f64 = 3_600_000.0;

/// Task lifecycle status.
///
/// `Overdue` is not a stored status; it is derived from `due_at` and `now`
/// by the classifier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Not started yet (initial state)
    #[default]
    Pending,
    /// In progress; the only status shown on the matrix
    Doing,
    /// Finished (terminal)
    Completed,
    /// Dropped by the user (terminal)
    #[serde(alias = "cancelled")]
    Rejected,
}

impl TaskStatus {
    /// Whether the task can still become overdue.
    pub fn is_open(&self) -> bool {
        matches!(self, TaskStatus::Pending | TaskStatus::Doing)
    }
}

/// Scale an importance value was recorded on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ImportanceScaleKind {
    /// Canonical 1..=10 scale
    #[default]
    OneToTen,
    /// Legacy 0..=5 scale used by older analytics records
    ZeroToFive,
}

/// Map an importance value from `kind` onto the canonical 1..=10 scale.
///
/// Values outside the source range are clamped, never rejected.
pub fn normalize_importance(value: f64, kind: ImportanceScaleKind) -> f64 {
    let canonical = match kind {
        ImportanceScaleKind::OneToTen => value,
        ImportanceScaleKind::ZeroToFive => {
            MIN_IMPORTANCE + value / 5.0 * (MAX_IMPORTANCE - MIN_IMPORTANCE)
        }
    };
    clamp_importance(canonical)
}

/// Clamp an importance value into `[1, 10]`.
pub fn clamp_importance(value: f64) -> f64 {
    if value < MIN_IMPORTANCE || value > MAX_IMPORTANCE {
        tracing::trace!(value, "clamping out-of-range importance");
    }
    value.clamp(MIN_IMPORTANCE, MAX_IMPORTANCE)
}

/// User-pinned canvas position.
///
/// Either coordinate may be absent in stored records; the override only
/// applies when both are present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExplicitCoordinates {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
}

impl ExplicitCoordinates {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }

    /// The pinned point, if both coordinates are defined.
    pub fn point(&self) -> Option<Point> {
        match (self.x, self.y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some(Point::new(x, y)),
            _ => None,
        }
    }
}

/// A task as seen by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque stable identifier
    pub id: String,
    /// Importance on the canonical 1..=10 scale
    #[serde(default)]
    pub importance: Option<f64>,
    /// Absolute due instant
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub due_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: TaskStatus,
    /// User override of the computed canvas position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explicit_coordinates: Option<ExplicitCoordinates>,
}

impl Task {
    /// Create a pending task with the given importance and due instant.
    pub fn new(id: impl Into<String>, importance: f64, due_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            importance: Some(importance),
            due_at: Some(due_at),
            status: TaskStatus::Pending,
            explicit_coordinates: None,
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_explicit_coordinates(mut self, x: f64, y: f64) -> Self {
        self.explicit_coordinates = Some(ExplicitCoordinates::new(x, y));
        self
    }

    /// Drop a user-pinned position so the computed one applies again.
    pub fn clear_explicit_coordinates(&mut self) {
        self.explicit_coordinates = None;
    }

    /// Pinned point, if any.
    pub fn pinned_point(&self) -> Option<Point> {
        self.explicit_coordinates.as_ref().and_then(ExplicitCoordinates::point)
    }

    /// Convert the stored importance from `kind` to the canonical scale.
    pub fn normalize_importance(&mut self, kind: ImportanceScaleKind) {
        if let Some(value) = self.importance {
            if value.is_finite() {
                self.importance = Some(normalize_importance(value, kind));
            }
        }
    }

    /// Importance clamped to `[1, 10]`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when importance is missing or not a finite
    /// number.
    pub fn require_importance(&self) -> Result<f64, ValidationError> {
        let value = self.importance.ok_or_else(|| ValidationError::MissingField {
            id: self.id.clone(),
            field: "importance",
        })?;
        if !value.is_finite() {
            return Err(ValidationError::InvalidValue {
                id: self.id.clone(),
                field: "importance",
                message: format!("is not a finite number ({value})"),
            });
        }
        Ok(clamp_importance(value))
    }

    /// Due instant.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the due date is missing.
    pub fn require_due_at(&self) -> Result<DateTime<Utc>, ValidationError> {
        self.due_at.ok_or_else(|| ValidationError::MissingField {
            id: self.id.clone(),
            field: "due date",
        })
    }

    /// Fractional hours from `now` until the task is due (negative when past).
    pub fn hours_until_due(&self, now: DateTime<Utc>) -> Result<f64, ValidationError> {
        let due = self.require_due_at()?;
        Ok(hours_between(now, due))
    }
}

/// Fractional hours from `from` to `to`.
pub fn hours_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    to.signed_duration_since(from).num_milliseconds() as f64 / MS_PER_HOUR
}
