//! Axis mappings between task attributes and canvas coordinates.
//!
//! - [`TimeScale`]: hours until due <-> x, quantized to nine anchors
//! - [`ImportanceScale`]: importance <-> y, linear

mod importance;
mod time;

pub use importance::{importance_to_y, y_to_importance, ImportanceScale};
pub use time::{
    canonical_hours, hours_to_x, x_to_hours, Anchor, Tick, TimeScale, ANCHORS,
    ORIGIN_OFFSET_HOURS,
};
