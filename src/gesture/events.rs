use crate::input::types::HandPosition;
use serde::{Deserialize, Serialize};

/// Discrete interaction state of one region, read by the visual layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonGestureState {
    /// Set when a click fires; drives the "pressed" scale animation
    pub is_clicked: bool,
    /// Pulses true for one notification when the cooldown ends, to undo the scale
    pub is_unclicked: bool,
}

/// Where a region is in its dwell cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DetectorPhase {
    #[default]
    Idle,
    Hovering,
    Clicked,
    CoolingDown,
}

/// Notification emitted by a detector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GestureEvent {
    /// The hand dwelled long enough; carries the last known hand position
    Click { position: HandPosition },
    /// The post-click cooldown finished
    UnclickPulse,
    StateChanged {
        previous: ButtonGestureState,
        current: ButtonGestureState,
    },
}

/// Receives detector notifications synchronously on the detector's thread
pub trait GestureObserver: Send {
    fn on_gesture(&mut self, event: &GestureEvent);
}

impl<F> GestureObserver for F
where
    F: FnMut(&GestureEvent) + Send,
{
    fn on_gesture(&mut self, event: &GestureEvent) {
        self(event)
    }
}

/// Handle returned by observer registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) u64);
