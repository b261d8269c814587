//! Linear importance axis.
//!
//! Importance 10 sits on the top margin edge, importance 1 on the bottom
//! one. Unlike the time axis this mapping is continuous and its inverse is
//! exact on integer importances.

use crate::frame::CanvasFrame;
use crate::task::{MAX_IMPORTANCE, MIN_IMPORTANCE};

const IMPORTANCE_SPAN: f64 = MAX_IMPORTANCE - MIN_IMPORTANCE;

/// Importance axis bound to a canvas frame.
#[derive(Debug, Clone, Copy)]
pub struct ImportanceScale {
    frame: CanvasFrame,
}

impl ImportanceScale {
    pub fn new(frame: CanvasFrame) -> Self {
        Self { frame }
    }

    /// Canvas y for an importance value; out-of-range values are clamped.
    pub fn importance_to_y(&self, importance: f64) -> f64 {
        let relative = ((importance - MIN_IMPORTANCE) / IMPORTANCE_SPAN).clamp(0.0, 1.0);
        self.frame.top() + (1.0 - relative) * self.frame.inner_height()
    }

    /// Importance implied by a canvas y, rounded to a whole step in `[1, 10]`.
    pub fn y_to_importance(&self, y: f64) -> f64 {
        let relative = 1.0 - ((y - self.frame.top()) / self.frame.inner_height()).clamp(0.0, 1.0);
        (MIN_IMPORTANCE + relative * IMPORTANCE_SPAN)
            .round()
            .clamp(MIN_IMPORTANCE, MAX_IMPORTANCE)
    }
}

/// Convenience function for a one-off forward mapping
pub fn importance_to_y(importance: f64, frame: &CanvasFrame) -> f64 {
    ImportanceScale::new(*frame).importance_to_y(importance)
}

/// Convenience function for a one-off inverse mapping
pub fn y_to_importance(y: f64, frame: &CanvasFrame) -> f64 {
    ImportanceScale::new(*frame).y_to_importance(y)
}
