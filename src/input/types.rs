use serde::{Deserialize, Serialize};

/// One hand cursor reading from the tracking sensor, in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandCursorSample {
    pub x: f64,
    pub y: f64,
    /// Time in milliseconds from the start of tracking
    #[serde(default)]
    pub process_time_ms: f64,
    /// False when the sensor lost the hand for this frame
    #[serde(default = "default_tracked")]
    pub tracked: bool,
}

fn default_tracked() -> bool {
    true
}

impl HandCursorSample {
    pub fn new(x: f64, y: f64, process_time_ms: f64) -> Self {
        Self {
            x,
            y,
            process_time_ms,
            tracked: true,
        }
    }

    /// A frame in which the hand was not tracked
    pub fn lost(process_time_ms: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            process_time_ms,
            tracked: false,
        }
    }

    pub fn position(&self) -> HandPosition {
        HandPosition::new(self.x, self.y)
    }
}

/// Last known hand position over a region
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HandPosition {
    pub x: f64,
    pub y: f64,
}

impl HandPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Presence event for a single interactive region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HandCursorEvent {
    Enter { position: HandPosition },
    Move { position: HandPosition },
    Leave,
}
