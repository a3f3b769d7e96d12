//! Dwell-based click gestures
//!
//! Converts continuous hand presence over a region into discrete click and
//! unclick notifications.

pub mod clock;
pub mod detector;
pub mod dwell;
pub mod events;

pub use clock::{Clock, ManualClock, SystemClock};
pub use detector::GestureClickDetector;
pub use dwell::{DwellConfig, DwellMode, DwellTimer};
pub use events::{ButtonGestureState, DetectorPhase, GestureEvent, GestureObserver, ObserverId};
