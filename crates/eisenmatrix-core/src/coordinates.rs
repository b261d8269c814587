//! Canvas placement of tasks and the inverse mapping used to create tasks
//! by pointing at the canvas.
//!
//! Placement is independent of quadrant bucketing: the matrix buckets use
//! the classifier's thresholds, while positions come from the axis scales.
//! A task near a threshold can therefore be drawn on one side of the center
//! line and bucketed on the other.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::classifier::Classifier;
use crate::error::ValidationError;
use crate::frame::{CanvasFrame, Point};
use crate::quadrant::Quadrant;
use crate::scale::{ImportanceScale, TimeScale};
use crate::task::{clamp_importance, hours_between, Task, MS_PER_HOUR};

/// Importance proposed for tasks created in an important quadrant.
pub const IMPORTANT_DEFAULT: f64 = 8.0;
/// Importance proposed for tasks created in a non-important quadrant.
pub const NOT_IMPORTANT_DEFAULT: f64 = 3.0;

/// Time-axis movement, in hours, an edit may cause without moving the task.
pub const POSITION_TOLERANCE_HOURS: f64 = 1.0;

const Y_EPSILON: f64 = 1e-6;

/// Per-task engine output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPlacement {
    pub id: String,
    pub quadrant: Quadrant,
    pub x: f64,
    pub y: f64,
    pub is_overdue: bool,
    pub is_urgent: bool,
    pub urgency_score: f64,
}

/// Attributes proposed for a task created on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDefaults {
    pub importance: f64,
    pub due_offset_ms: i64,
}

impl TaskDefaults {
    /// Absolute due instant relative to `now`.
    pub fn due_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + Duration::milliseconds(self.due_offset_ms)
    }

    /// Fallback defaults when only the quadrant is known.
    pub fn for_quadrant(quadrant: Quadrant) -> Self {
        let importance = if quadrant.is_important() {
            IMPORTANT_DEFAULT
        } else {
            NOT_IMPORTANT_DEFAULT
        };
        let due_offset_ms = match quadrant {
            Quadrant::Q1 => Duration::hours(1),
            Quadrant::Q2 => Duration::days(7),
            Quadrant::Q3 => Duration::hours(6),
            Quadrant::Q4 => Duration::days(30),
        }
        .num_milliseconds();

        Self {
            importance,
            due_offset_ms,
        }
    }
}

/// Where a new task was requested.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// A precise canvas point
    At(Point),
    /// Somewhere inside a quadrant, position unknown
    InQuadrant(Quadrant),
}

/// Attributes captured when a task was created from a canvas point.
///
/// Used to tell the user that an edit will move the task away from where
/// they clicked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionAnchor {
    pub point: Point,
    pub importance: f64,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub due_at: DateTime<Utc>,
}

/// Maps tasks to canvas positions and back.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateEngine {
    frame: CanvasFrame,
    classifier: Classifier,
    time_scale: TimeScale,
    importance_scale: ImportanceScale,
}

impl CoordinateEngine {
    /// Engine using the live classification policy.
    pub fn new(frame: CanvasFrame) -> Self {
        Self::with_classifier(frame, Classifier::live())
    }

    pub fn with_classifier(frame: CanvasFrame, classifier: Classifier) -> Self {
        Self {
            frame,
            classifier,
            time_scale: TimeScale::new(frame),
            importance_scale: ImportanceScale::new(frame),
        }
    }

    pub fn frame(&self) -> &CanvasFrame {
        &self.frame
    }

    pub fn time_scale(&self) -> &TimeScale {
        &self.time_scale
    }

    pub fn importance_scale(&self) -> &ImportanceScale {
        &self.importance_scale
    }

    /// Canvas position of `task` at `now`.
    ///
    /// A pinned position is returned verbatim. Otherwise the position is
    /// computed from the axis scales and clamped into the drawable area.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when a task without pinned coordinates
    /// lacks importance or a due date.
    pub fn compute_position(
        &self,
        task: &Task,
        now: DateTime<Utc>,
    ) -> Result<Point, ValidationError> {
        if let Some(pinned) = task.pinned_point() {
            return Ok(pinned);
        }

        let hours = task.hours_until_due(now)?;
        let importance = task.require_importance()?;
        Ok(self.position_for(importance, hours))
    }

    fn position_for(&self, importance: f64, hours_from_now: f64) -> Point {
        self.frame.clamp(Point::new(
            self.time_scale.hours_to_x(hours_from_now),
            self.importance_scale.importance_to_y(importance),
        ))
    }

    /// Classification and position of one task.
    pub fn evaluate(
        &self,
        task: &Task,
        now: DateTime<Utc>,
    ) -> Result<TaskPlacement, ValidationError> {
        let classification = self.classifier.classify_task(task, now)?;
        let point = self.compute_position(task, now)?;
        Ok(TaskPlacement {
            id: task.id.clone(),
            quadrant: classification.quadrant,
            x: point.x,
            y: point.y,
            is_overdue: classification.is_overdue,
            is_urgent: classification.is_urgent,
            urgency_score: classification.urgency_score,
        })
    }

    /// Evaluate every task, failing on the first invalid one.
    pub fn evaluate_all(
        &self,
        tasks: &[Task],
        now: DateTime<Utc>,
    ) -> Result<Vec<TaskPlacement>, ValidationError> {
        tasks.iter().map(|task| self.evaluate(task, now)).collect()
    }

    /// Importance and due offset implied by a canvas point.
    pub fn defaults_at(&self, point: Point) -> TaskDefaults {
        let importance = self.importance_scale.y_to_importance(point.y);
        let hours = self.time_scale.x_to_hours(point.x);
        TaskDefaults {
            importance,
            due_offset_ms: (hours * MS_PER_HOUR).round() as i64,
        }
    }

    /// Proposed attributes for a task created at `placement`.
    pub fn compute_defaults_from_position(&self, placement: Placement) -> TaskDefaults {
        match placement {
            Placement::At(point) => self.defaults_at(point),
            Placement::InQuadrant(quadrant) => {
                tracing::debug!(%quadrant, "no canvas point, using quadrant defaults");
                TaskDefaults::for_quadrant(quadrant)
            }
        }
    }

    /// Record the attributes a click at `point` proposed.
    pub fn anchor_at(&self, point: Point, now: DateTime<Utc>) -> PositionAnchor {
        let defaults = self.defaults_at(point);
        PositionAnchor {
            point,
            importance: defaults.importance,
            due_at: defaults.due_at(now),
        }
    }

    /// Whether editing a click-created task to `importance` and `due_at`
    /// moves it away from where it was created.
    ///
    /// The edited position is recomputed at `now` and compared with the
    /// anchor point. Horizontal movement is measured on the time axis and
    /// must exceed [`POSITION_TOLERANCE_HOURS`]; any vertical movement counts.
    pub fn position_will_change(
        &self,
        anchor: &PositionAnchor,
        importance: f64,
        due_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> bool {
        let before = self.frame.clamp(anchor.point);
        let after = self.position_for(clamp_importance(importance), hours_between(now, due_at));
        let hours_moved =
            (self.time_scale.x_to_hours(after.x) - self.time_scale.x_to_hours(before.x)).abs();
        hours_moved > POSITION_TOLERANCE_HOURS || (after.y - before.y).abs() > Y_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStatus;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 7, 20, 14, 0, 0).unwrap()
    }

    fn engine() -> CoordinateEngine {
        CoordinateEngine::new(CanvasFrame::new(480.0, 450.0, 30.0).unwrap())
    }

    #[test]
    fn test_top_center_for_max_importance_due_in_a_day() {
        let task = Task::new("t", 10.0, now() + Duration::hours(24));
        let p = engine().compute_position(&task, now()).unwrap();
        assert_eq!(p, Point::new(240.0, 30.0));
    }

    #[test]
    fn test_explicit_coordinates_win() {
        let task = Task::new("pinned", 1.0, now() + Duration::days(90))
            .with_explicit_coordinates(50.0, 50.0);
        assert_eq!(engine().compute_position(&task, now()).unwrap(), Point::new(50.0, 50.0));
    }

    #[test]
    fn test_explicit_coordinates_outside_canvas_not_clamped() {
        let task = Task::new("pinned", 1.0, now()).with_explicit_coordinates(-10.0, 900.0);
        assert_eq!(engine().compute_position(&task, now()).unwrap(), Point::new(-10.0, 900.0));
    }

    #[test]
    fn test_pinned_task_needs_no_due_date() {
        let mut task = Task::new("pinned", 1.0, now()).with_explicit_coordinates(5.0, 6.0);
        task.due_at = None;
        assert!(engine().compute_position(&task, now()).is_ok());
    }

    #[test]
    fn test_overdue_at_right_edge() {
        let task = Task::new("late", 4.0, now() - Duration::hours(1)).with_status(TaskStatus::Doing);
        let placement = engine().evaluate(&task, now()).unwrap();
        assert_eq!(placement.x, 450.0);
        assert_eq!(placement.urgency_score, 1.0);
        assert!(placement.is_overdue);
    }

    #[test]
    fn test_evaluate_reports_missing_importance() {
        let mut task = Task::new("noimp", 4.0, now());
        task.importance = None;
        let err = engine().evaluate(&task, now()).unwrap_err();
        assert_eq!(err.task_id(), "noimp");
    }

    #[test]
    fn test_defaults_at_point() {
        let e = engine();
        let defaults = e.defaults_at(Point::new(397.5, 30.0));
        assert_eq!(defaults.importance, 10.0);
        assert_eq!(defaults.due_offset_ms, 3_600_000);

        let defaults = e.defaults_at(Point::new(30.0, 420.0));
        assert_eq!(defaults.importance, 1.0);
        assert_eq!(defaults.due_offset_ms, 744 * 3_600_000_i64);
    }

    #[test]
    fn test_defaults_right_edge_is_due_now() {
        let defaults = engine().defaults_at(Point::new(470.0, 225.0));
        assert_eq!(defaults.due_offset_ms, 0);
    }

    #[test]
    fn test_quadrant_fallback_defaults() {
        let e = engine();
        let expect = [
            (Quadrant::Q1, 8.0, 3_600_000_i64),
            (Quadrant::Q2, 8.0, 7 * 24 * 3_600_000),
            (Quadrant::Q3, 3.0, 6 * 3_600_000),
            (Quadrant::Q4, 3.0, 30 * 24 * 3_600_000),
        ];
        for (q, importance, offset) in expect {
            let d = e.compute_defaults_from_position(Placement::InQuadrant(q));
            assert_eq!(d.importance, importance, "{q}");
            assert_eq!(d.due_offset_ms, offset, "{q}");
        }
    }

    #[test]
    fn test_defaults_feed_back_to_same_position() {
        let e = engine();
        let click = Point::new(345.0, 160.0);
        let defaults = e.compute_defaults_from_position(Placement::At(click));
        let task = Task::new("new", defaults.importance, defaults.due_at(now()));
        let p = e.compute_position(&task, now()).unwrap();
        assert_eq!(p.x, click.x);
        assert!((p.y - click.y).abs() < 1e-9);
    }

    #[test]
    fn test_position_change_detection() {
        let e = engine();
        let anchor = e.anchor_at(Point::new(240.0, 30.0), now());
        assert_eq!(anchor.importance, 10.0);
        assert_eq!(anchor.due_at, now() + Duration::hours(24));

        assert!(!e.position_will_change(&anchor, 10.0, anchor.due_at, now()));
        // moves to the 72h anchor
        assert!(e.position_will_change(&anchor, 10.0, now() + Duration::hours(72), now()));
        assert!(e.position_will_change(&anchor, 9.0, anchor.due_at, now()));
        // clamped values land on the same row
        assert!(!e.position_will_change(&anchor, 12.0, anchor.due_at, now()));
    }

    #[test]
    fn test_due_edit_within_same_anchor_keeps_position() {
        let e = engine();
        let anchor = e.anchor_at(Point::new(240.0, 30.0), now());
        assert!(!e.position_will_change(&anchor, 10.0, anchor.due_at + Duration::hours(2), now()));

        let far = e.anchor_at(Point::new(30.0, 30.0), now());
        assert_eq!(far.due_at, now() + Duration::hours(744));
        assert!(!e.position_will_change(&far, 10.0, far.due_at + Duration::days(5), now()));
    }

    #[test]
    fn test_click_in_margin_is_not_a_change() {
        let e = engine();
        let anchor = e.anchor_at(Point::new(240.0, 5.0), now());
        assert!(!e.position_will_change(&anchor, anchor.importance, anchor.due_at, now()));
    }
}
