//! Hand cursor input
//!
//! Turns raw hand samples from a tracking sensor into per-region
//! enter/move/leave events, optionally smoothing the cursor first.

pub mod hit_test;
pub mod smoothing;
pub mod source;
pub mod types;

pub use hit_test::{Bounds, HandCursorRouter, RegionId, RoutedEvent};
pub use smoothing::{HandCursorSmoother, SmoothingConfig, Spring2D, SpringConfig, SpringState};
pub use source::{load_trace, HandTrackingSource, JsonLinesSource, ReplaySource};
pub use types::{HandCursorEvent, HandCursorSample, HandPosition};
