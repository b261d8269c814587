//! Integration tests for the full classify → bucket → place workflow.
//!
//! Tasks enter as JSON the way an external store hands them over.

use chrono::{DateTime, Duration, TimeZone, Utc};
use eisenmatrix_core::{
    CanvasFrame, CoordinateEngine, MatrixAggregate, Placement, Point, Quadrant, Task,
    TaskStatus, ValidationError,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()
}

fn frame() -> CanvasFrame {
    CanvasFrame::new(480.0, 450.0, 30.0).unwrap()
}

fn task_json(id: &str, importance: f64, due_in: Duration, status: &str) -> String {
    format!(
        r#"{{"id":"{id}","importance":{importance},"dueAt":{},"status":"{status}"}}"#,
        (now() + due_in).timestamp_millis()
    )
}

fn parse(tasks: &[String]) -> Vec<Task> {
    serde_json::from_str(&format!("[{}]", tasks.join(","))).unwrap()
}

#[test]
fn test_boundary_scenarios() {
    let tasks = parse(&[
        task_json("boundary", 5.0, Duration::minutes(30), "doing"),
        task_json("far", 3.0, Duration::hours(1000), "doing"),
        task_json("late", 7.0, -Duration::hours(1), "doing"),
        task_json("top", 10.0, Duration::hours(24), "doing"),
    ]);

    let state = MatrixAggregate::new().rebuild(&tasks, now()).unwrap();
    assert_eq!(state.quadrant_of("boundary"), Some(Quadrant::Q1));
    assert_eq!(state.quadrant_of("far"), Some(Quadrant::Q4));
    assert_eq!(state.quadrant_of("late"), Some(Quadrant::Q1));
    assert_eq!(state.quadrant_of("top"), Some(Quadrant::Q1));

    let engine = CoordinateEngine::new(frame());
    let placements = engine.evaluate_all(&tasks, now()).unwrap();

    let late = &placements[2];
    assert_eq!(late.x, 450.0);
    assert_eq!(late.urgency_score, 1.0);
    assert!(late.is_overdue);

    let top = &placements[3];
    assert_eq!((top.x, top.y), (240.0, 30.0));
}

#[test]
fn test_bucket_totals_match_doing_count() {
    let mut raw = Vec::new();
    for i in 0..40 {
        let status = match i % 4 {
            0 => "pending",
            1 => "completed",
            2 => "rejected",
            _ => "doing",
        };
        let importance = (i % 10 + 1) as f64;
        raw.push(task_json(&format!("t{i}"), importance, Duration::hours(i * 7 - 20), status));
    }
    let tasks = parse(&raw);
    let doing = tasks.iter().filter(|t| t.status == TaskStatus::Doing).count();

    let state = MatrixAggregate::new().rebuild(&tasks, now()).unwrap();
    let total: usize = state.quadrants.values().map(|b| b.tasks.len()).sum();
    assert_eq!(total, doing);
    assert_eq!(state.total_count(), doing);
}

#[test]
fn test_position_and_bucket_use_independent_thresholds() {
    // 30h out is not urgent (bucket Q2) but snaps to the 24h anchor,
    // i.e. exactly on the center line
    let tasks = parse(&[task_json("edge", 9.0, Duration::hours(30), "doing")]);
    let state = MatrixAggregate::new().rebuild(&tasks, now()).unwrap();
    assert_eq!(state.quadrant_of("edge"), Some(Quadrant::Q2));

    let point = CoordinateEngine::new(frame()).compute_position(&tasks[0], now()).unwrap();
    assert_eq!(point.x, frame().center_x());
}

#[test]
fn test_pinned_task_keeps_position_as_time_passes() {
    let tasks = parse(&[format!(
        r#"{{"id":"pinned","importance":2,"dueAt":{},"status":"doing","explicitCoordinates":{{"x":50,"y":50}}}}"#,
        (now() + Duration::days(20)).timestamp_millis()
    )]);
    let engine = CoordinateEngine::new(frame());
    for hours in [0, 100, 480, 1000] {
        let at = now() + Duration::hours(hours);
        assert_eq!(engine.compute_position(&tasks[0], at).unwrap(), Point::new(50.0, 50.0));
    }
}

#[test]
fn test_missing_due_date_names_task() {
    let tasks: Vec<Task> = serde_json::from_str(
        r#"[{"id":"ok","importance":4,"dueAt":0,"status":"doing"},
            {"id":"undated","importance":4,"status":"doing"}]"#,
    )
    .unwrap();

    let err = MatrixAggregate::new().rebuild(&tasks, now()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::MissingField {
            id: "undated".into(),
            field: "due date"
        }
    );
    assert!(err.to_string().contains("undated"));

    assert!(CoordinateEngine::new(frame()).evaluate_all(&tasks, now()).is_err());
}

#[test]
fn test_create_from_click_then_rebuild() {
    let engine = CoordinateEngine::new(frame());
    // click in the upper right: important and due within the hour
    let defaults = engine.compute_defaults_from_position(Placement::At(Point::new(400.0, 40.0)));
    assert_eq!(defaults.importance, 10.0);
    assert_eq!(defaults.due_offset_ms, 3_600_000);

    let task = Task::new("clicked", defaults.importance, defaults.due_at(now()))
        .with_status(TaskStatus::Doing);
    let state = MatrixAggregate::new().rebuild(&[task], now()).unwrap();
    assert_eq!(state.quadrant_of("clicked"), Some(Quadrant::Q1));
}

#[test]
fn test_quadrant_fallback_lands_in_requested_quadrant() {
    let engine = CoordinateEngine::new(frame());
    for quadrant in Quadrant::ALL {
        let defaults = engine.compute_defaults_from_position(Placement::InQuadrant(quadrant));
        let task = Task::new("q", defaults.importance, defaults.due_at(now()))
            .with_status(TaskStatus::Doing);
        let state = MatrixAggregate::new().rebuild(&[task], now()).unwrap();
        assert_eq!(state.quadrant_of("q"), Some(quadrant));
    }
}
