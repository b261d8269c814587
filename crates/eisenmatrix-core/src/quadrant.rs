//! The four Eisenhower quadrants and their layout on the canvas.
//!
//! Quadrant rectangles are a plain quartering of the canvas. They are a
//! layout aid for renderers and are unrelated to the continuous coordinate
//! system tasks are positioned with: urgent is the right half, important the
//! top half.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::frame::{Point, Rect};

/// Eisenhower quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quadrant {
    /// Important and urgent: do first
    Q1,
    /// Important, not urgent: schedule
    Q2,
    /// Urgent, not important: delegate
    Q3,
    /// Neither: eliminate
    Q4,
}

impl Quadrant {
    /// All quadrants in canonical order.
    pub const ALL: [Quadrant; 4] = [Quadrant::Q1, Quadrant::Q2, Quadrant::Q3, Quadrant::Q4];

    pub fn from_flags(is_important: bool, is_urgent: bool) -> Self {
        match (is_important, is_urgent) {
            (true, true) => Quadrant::Q1,
            (true, false) => Quadrant::Q2,
            (false, true) => Quadrant::Q3,
            (false, false) => Quadrant::Q4,
        }
    }

    pub fn is_important(&self) -> bool {
        matches!(self, Quadrant::Q1 | Quadrant::Q2)
    }

    pub fn is_urgent(&self) -> bool {
        matches!(self, Quadrant::Q1 | Quadrant::Q3)
    }

    /// Stable lowercase key (`"q1"` .. `"q4"`).
    pub fn key(&self) -> &'static str {
        match self {
            Quadrant::Q1 => "q1",
            Quadrant::Q2 => "q2",
            Quadrant::Q3 => "q3",
            Quadrant::Q4 => "q4",
        }
    }

    /// Short display label.
    pub fn label(&self) -> &'static str {
        match self {
            Quadrant::Q1 => "Do first",
            Quadrant::Q2 => "Schedule",
            Quadrant::Q3 => "Delegate",
            Quadrant::Q4 => "Eliminate",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Quadrant::Q1 => "Important and urgent",
            Quadrant::Q2 => "Important but not urgent",
            Quadrant::Q3 => "Urgent but not important",
            Quadrant::Q4 => "Neither urgent nor important",
        }
    }

    /// Rectangle this quadrant occupies on a `width` x `height` canvas.
    pub fn bounds(&self, width: f64, height: f64) -> Rect {
        let half_w = width / 2.0;
        let half_h = height / 2.0;
        let x = if self.is_urgent() { half_w } else { 0.0 };
        let y = if self.is_important() { 0.0 } else { half_h };
        Rect {
            x,
            y,
            width: half_w,
            height: half_h,
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Quadrant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "q1" => Ok(Quadrant::Q1),
            "q2" => Ok(Quadrant::Q2),
            "q3" => Ok(Quadrant::Q3),
            "q4" => Ok(Quadrant::Q4),
            other => Err(format!("unknown quadrant: {other}")),
        }
    }
}

/// Layout rectangle for `quadrant` on a `width` x `height` canvas.
pub fn quadrant_bounds(quadrant: Quadrant, width: f64, height: f64) -> Rect {
    quadrant.bounds(width, height)
}

/// Quadrant under `point`, or `None` off the canvas.
///
/// The center lines belong to the urgent and non-important halves. Points
/// on the right and bottom canvas edges fall in the adjoining quadrant.
pub fn quadrant_at(point: Point, width: f64, height: f64) -> Option<Quadrant> {
    let canvas = Rect {
        x: 0.0,
        y: 0.0,
        width,
        height,
    };
    if !canvas.contains_closed(point) {
        return None;
    }
    Some(Quadrant::from_flags(
        point.y < height / 2.0,
        point.x >= width / 2.0,
    ))
}
