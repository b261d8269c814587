//! Canvas geometry: the bounded drawing surface tasks are placed on.

use serde::{Deserialize, Serialize};

use crate::error::FrameError;

/// Default inset from every canvas edge.
pub const DEFAULT_MARGIN: f64 = 30.0;

/// A position on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Whether `point` lies inside the rectangle (left/top edges inclusive).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    /// Whether `point` lies inside the rectangle or on any of its edges.
    pub fn contains_closed(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Validated canvas dimensions.
///
/// Fields are private so that every frame in circulation has passed the
/// margin check in [`CanvasFrame::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CanvasFrame {
    width: f64,
    height: f64,
    margin: f64,
}

impl CanvasFrame {
    /// Build a frame, clamping negative values to zero.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError`] when any value is not finite or when the margin
    /// is not strictly smaller than half of either dimension.
    pub fn new(width: f64, height: f64, margin: f64) -> Result<Self, FrameError> {
        for (field, value) in [("width", width), ("height", height), ("margin", margin)] {
            if !value.is_finite() {
                return Err(FrameError::NonFinite { field });
            }
        }

        let width = width.max(0.0);
        let height = height.max(0.0);
        let margin = margin.max(0.0);

        if margin >= width / 2.0 {
            return Err(FrameError::MarginExceedsWidth { width, margin });
        }
        if margin >= height / 2.0 {
            return Err(FrameError::MarginExceedsHeight { height, margin });
        }

        Ok(Self {
            width,
            height,
            margin,
        })
    }

    /// Build a frame with [`DEFAULT_MARGIN`].
    pub fn with_default_margin(width: f64, height: f64) -> Result<Self, FrameError> {
        Self::new(width, height, DEFAULT_MARGIN)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Leftmost drawable x.
    pub fn left(&self) -> f64 {
        self.margin
    }

    /// Rightmost drawable x.
    pub fn right(&self) -> f64 {
        self.width - self.margin
    }

    /// Topmost drawable y.
    pub fn top(&self) -> f64 {
        self.margin
    }

    /// Bottommost drawable y.
    pub fn bottom(&self) -> f64 {
        self.height - self.margin
    }

    /// Horizontal center of the canvas.
    pub fn center_x(&self) -> f64 {
        self.width / 2.0
    }

    /// Height of the drawable band between the top and bottom margins.
    pub fn inner_height(&self) -> f64 {
        self.height - 2.0 * self.margin
    }

    /// Clamp a point into the drawable area.
    pub fn clamp(&self, point: Point) -> Point {
        Point {
            x: point.x.clamp(self.left(), self.right()),
            y: point.y.clamp(self.top(), self.bottom()),
        }
    }
}

impl<'de> Deserialize<'de> for CanvasFrame {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawFrame {
            width: f64,
            height: f64,
            #[serde(default = "default_margin")]
            margin: f64,
        }

        fn default_margin() -> f64 {
            DEFAULT_MARGIN
        }

        let raw = RawFrame::deserialize(deserializer)?;
        CanvasFrame::new(raw.width, raw.height, raw.margin).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_accepts_default_margin() {
        let frame = CanvasFrame::with_default_margin(480.0, 450.0).unwrap();
        assert_eq!(frame.margin(), 30.0);
        assert_eq!(frame.right(), 450.0);
        assert_eq!(frame.bottom(), 420.0);
        assert_eq!(frame.center_x(), 240.0);
    }

    #[test]
    fn test_frame_rejects_margin_equal_to_half_width() {
        let err = CanvasFrame::new(60.0, 400.0, 30.0).unwrap_err();
        assert!(matches!(err, FrameError::MarginExceedsWidth { .. }));
    }

    #[test]
    fn test_frame_rejects_margin_too_large_for_height() {
        let err = CanvasFrame::new(400.0, 50.0, 30.0).unwrap_err();
        assert!(matches!(err, FrameError::MarginExceedsHeight { .. }));
    }

    #[test]
    fn test_negative_dimensions_clamp_then_fail() {
        let err = CanvasFrame::new(-100.0, 400.0, 30.0).unwrap_err();
        assert_eq!(
            err,
            FrameError::MarginExceedsWidth {
                width: 0.0,
                margin: 30.0
            }
        );
    }

    #[test]
    fn test_negative_margin_clamps_to_zero() {
        let frame = CanvasFrame::new(100.0, 100.0, -5.0).unwrap();
        assert_eq!(frame.margin(), 0.0);
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = CanvasFrame::new(f64::NAN, 100.0, 10.0).unwrap_err();
        assert_eq!(err, FrameError::NonFinite { field: "width" });
    }

    #[test]
    fn test_clamp_point() {
        let frame = CanvasFrame::new(200.0, 100.0, 10.0).unwrap();
        let clamped = frame.clamp(Point::new(-4.0, 500.0));
        assert_eq!(clamped, Point::new(10.0, 90.0));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: CanvasFrame = serde_json::from_str(r#"{"width": 480, "height": 450}"#).unwrap();
        assert_eq!(ok.margin(), DEFAULT_MARGIN);

        let bad = serde_json::from_str::<CanvasFrame>(r#"{"width": 40, "height": 450}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_rect_edges() {
        let r = Rect {
            x: 0.0,
            y: 0.0,
            width: 240.0,
            height: 225.0,
        };
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(!r.contains(Point::new(240.0, 100.0)));
        assert!(r.contains_closed(Point::new(240.0, 225.0)));
        assert!(!r.contains_closed(Point::new(240.5, 225.0)));
    }
}
