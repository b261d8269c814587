//! Non-linear time axis.
//!
//! The x axis is anchored by nine ticks at fixed offsets from an origin that
//! moves with the clock (`origin = now + 24h`). Everything due within a day
//! shares the right half of the canvas; one day to one month shares the left
//! half:
//!
//! ```text
//!  31d   14d   7d    3d   24h   12h   6h    1h   Now
//!   |-----|-----|-----|-----|-----|-----|-----|-----|
//! left                   center                  right
//! ```
//!
//! Positions snap to the nearest tick rather than interpolating between
//! them, so the forward mapping yields nine discrete urgency bands. The
//! inverse is exact for tick positions and quantized everywhere else; its
//! output is only fit for placement, not for computing remaining time.

use serde::Serialize;

use crate::frame::CanvasFrame;

/// Hours between `now` and the axis origin.
pub const ORIGIN_OFFSET_HOURS: f64 = 24.0;

/// A fixed point on the time axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub label: &'static str,
    /// Hours relative to the origin (`now + 24h`)
    pub offset_hours: f64,
}

impl Anchor {
    const fn new(label: &'static str, offset_hours: f64) -> Self {
        Self {
            label,
            offset_hours,
        }
    }

    /// Hours from `now` this anchor stands for.
    pub fn hours_from_now(&self) -> f64 {
        self.offset_hours + ORIGIN_OFFSET_HOURS
    }
}

/// Axis anchors, most urgent first.
pub const ANCHORS: [Anchor; 9] = [
    Anchor::new("Now", -24.0),
    Anchor::new("1h", -23.0),
    Anchor::new("6h", -18.0),
    Anchor::new("12h", -12.0),
    Anchor::new("24h", 0.0),
    Anchor::new("3d", 48.0),
    Anchor::new("7d", 144.0),
    Anchor::new("14d", 312.0),
    Anchor::new("31d", 720.0),
];

/// Index of the anchor that sits on the horizontal center.
const CENTER_INDEX: usize = 4;

/// A rendered axis tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tick {
    pub label: &'static str,
    pub hours_from_now: f64,
    pub x: f64,
}

/// Time axis bound to a canvas frame.
#[derive(Debug, Clone, Copy)]
pub struct TimeScale {
    frame: CanvasFrame,
}

impl TimeScale {
    pub fn new(frame: CanvasFrame) -> Self {
        Self { frame }
    }

    /// Canvas x of the anchor at `index` in [`ANCHORS`].
    fn anchor_x(&self, index: usize) -> f64 {
        let center = self.frame.center_x();
        let steps = CENTER_INDEX as f64;
        if index <= CENTER_INDEX {
            let step = (self.frame.right() - center) / steps;
            self.frame.right() - index as f64 * step
        } else {
            let step = (center - self.frame.left()) / steps;
            center - (index - CENTER_INDEX) as f64 * step
        }
    }

    /// Map hours-until-due to a canvas x.
    ///
    /// Overdue (`hours_from_now <= 0`) maps to the right margin edge.
    /// Otherwise the nearest anchor by time offset wins; ties go to the
    /// earlier anchor in [`ANCHORS`].
    pub fn hours_to_x(&self, hours_from_now: f64) -> f64 {
        if hours_from_now <= 0.0 {
            return self.frame.right();
        }

        let offset = hours_from_now - ORIGIN_OFFSET_HOURS;
        let index = nearest(ANCHORS.iter().map(|a| (offset - a.offset_hours).abs()));
        self.anchor_x(index)
    }

    /// Map a canvas x back to hours from now.
    ///
    /// Returns the hour value of the nearest anchor by x distance, floored
    /// at zero.
    pub fn x_to_hours(&self, x: f64) -> f64 {
        let index = nearest((0..ANCHORS.len()).map(|i| (x - self.anchor_x(i)).abs()));
        ANCHORS[index].hours_from_now().max(0.0)
    }

    /// All anchors with their canvas positions, most urgent first.
    pub fn ticks(&self) -> Vec<Tick> {
        ANCHORS
            .iter()
            .enumerate()
            .map(|(i, anchor)| Tick {
                label: anchor.label,
                hours_from_now: anchor.hours_from_now(),
                x: self.anchor_x(i),
            })
            .collect()
    }
}

/// Index of the smallest distance; the first one wins on ties.
fn nearest(distances: impl Iterator<Item = f64>) -> usize {
    let mut best_index = 0;
    let mut best = f64::INFINITY;
    for (i, d) in distances.enumerate() {
        if d < best {
            best = d;
            best_index = i;
        }
    }
    best_index
}

/// Convenience function for a one-off forward mapping
pub fn hours_to_x(hours_from_now: f64, frame: &CanvasFrame) -> f64 {
    TimeScale::new(*frame).hours_to_x(hours_from_now)
}

/// Convenience function for a one-off inverse mapping
pub fn x_to_hours(x: f64, frame: &CanvasFrame) -> f64 {
    TimeScale::new(*frame).x_to_hours(x)
}

/// Hour values the inverse mapping can produce.
pub fn canonical_hours() -> [f64; 9] {
    ANCHORS.map(|a| a.hours_from_now())
}
