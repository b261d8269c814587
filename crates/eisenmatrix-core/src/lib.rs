//! # Eisenmatrix Core Library
//!
//! Classification and coordinate engine for an Eisenhower matrix
//! (urgency × importance). Given task records, a canvas frame and the
//! current instant, it decides which quadrant each task belongs to and where
//! on the canvas it is drawn. It also maps a canvas point back to the
//! importance and due offset a new task created there should get.
//!
//! ## Architecture
//!
//! - **Scales**: a quantized, nine-anchor time axis (x) and a linear
//!   importance axis (y), each with its inverse
//! - **Classifier**: binary important/urgent flags under an explicit policy,
//!   plus a continuous urgency score
//! - **Coordinate engine**: task → canvas point, canvas point → task
//!   defaults, and edit detection for click-created tasks
//! - **Matrix aggregate**: four quadrant buckets rebuilt from scratch on
//!   every call
//!
//! The engine never reads the clock. Callers capture `now` once per logical
//! operation and pass it to every call so that forward and inverse mappings
//! agree.
//!
//! ## Key Components
//!
//! - [`CoordinateEngine`]: placement and inverse mapping
//! - [`MatrixAggregate`]: quadrant bucketing and statistics
//! - [`Classifier`] / [`ClassificationPolicy`]: quadrant rules
//! - [`Config`]: TOML configuration

pub mod classifier;
pub mod config;
pub mod coordinates;
pub mod error;
pub mod frame;
pub mod matrix;
pub mod quadrant;
pub mod scale;
pub mod task;

pub use classifier::{urgency_score, Classification, ClassificationPolicy, Classifier, PolicyKind};
pub use config::Config;
pub use coordinates::{CoordinateEngine, Placement, PositionAnchor, TaskDefaults, TaskPlacement};
pub use error::{ConfigError, CoreError, FrameError, ValidationError};
pub use frame::{CanvasFrame, Point, Rect};
pub use matrix::{MatrixAggregate, MatrixState, QuadrantBucket, QuadrantStats};
pub use quadrant::{quadrant_at, quadrant_bounds, Quadrant};
pub use scale::{ImportanceScale, Tick, TimeScale};
pub use task::{normalize_importance, ExplicitCoordinates, ImportanceScaleKind, Task, TaskStatus};
