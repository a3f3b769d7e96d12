//! Dwell click detection for a single hand-cursor region
//!
//! A region is "pressed" by holding the hand over it. The detector runs two
//! dwell timers, never at the same time:
//!
//! - the enter dwell starts when the hand enters and fires a click when it
//!   expires,
//! - the cooldown dwell starts after the click and, when it expires, pulses
//!   `is_unclicked` so the visual layer can undo its press animation.
//!
//! Leaving the region cancels whichever timer is running.

use crate::gesture::clock::Clock;
use crate::gesture::dwell::{DwellConfig, DwellTimer};
use crate::gesture::events::{
    ButtonGestureState, DetectorPhase, GestureEvent, GestureObserver, ObserverId,
};
use crate::input::types::{HandCursorEvent, HandPosition};
use std::sync::Arc;
use tracing::debug;

/// Dwell click state machine for one interactive region
pub struct GestureClickDetector {
    config: DwellConfig,
    clock: Arc<dyn Clock>,
    phase: DetectorPhase,
    state: ButtonGestureState,
    enter_dwell: DwellTimer,
    cooldown_dwell: DwellTimer,
    last_position: HandPosition,
    hand_present: bool,
    observers: Vec<(ObserverId, Box<dyn GestureObserver>)>,
    next_observer_id: u64,
}

impl GestureClickDetector {
    /// Create an idle detector; dwell periods are measured against `clock`
    pub fn new(config: DwellConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            phase: DetectorPhase::Idle,
            state: ButtonGestureState::default(),
            enter_dwell: DwellTimer::new(),
            cooldown_dwell: DwellTimer::new(),
            last_position: HandPosition::default(),
            hand_present: false,
            observers: Vec::new(),
            next_observer_id: 0,
        }
    }

    /// Register an observer for clicks, unclick pulses and state changes
    pub fn subscribe(&mut self, observer: impl GestureObserver + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// Current visual state flags
    pub fn state(&self) -> ButtonGestureState {
        self.state
    }

    /// Current position in the dwell cycle
    pub fn phase(&self) -> DetectorPhase {
        self.phase
    }

    /// Last hand position seen by enter or move
    pub fn last_position(&self) -> HandPosition {
        self.last_position
    }

    /// Whether the hand is currently over the region
    pub fn is_hand_present(&self) -> bool {
        self.hand_present
    }

    /// Ticks counted by whichever dwell timer is running
    pub fn active_ticks(&self) -> u32 {
        if self.cooldown_dwell.is_running() {
            self.cooldown_dwell.ticks()
        } else {
            self.enter_dwell.ticks()
        }
    }

    /// Dispatch a routed hand cursor event
    pub fn handle(&mut self, event: HandCursorEvent) {
        match event {
            HandCursorEvent::Enter { position } => self.on_hand_enter(position.x, position.y),
            HandCursorEvent::Move { position } => self.on_hand_move(position.x, position.y),
            HandCursorEvent::Leave => self.on_hand_leave(),
        }
    }

    /// Hand entered the region: start the enter dwell when idle
    pub fn on_hand_enter(&mut self, x: f64, y: f64) {
        self.hand_present = true;
        self.last_position = HandPosition::new(x, y);

        // A cooldown in progress must resolve before a new dwell can begin
        if self.phase != DetectorPhase::Idle {
            return;
        }

        self.enter_dwell.start(self.clock.now());
        self.phase = DetectorPhase::Hovering;
        debug!("Hand entered at ({:.1}, {:.1}), dwell started", x, y);
    }

    /// Hand moved within the region; only the position is recorded
    pub fn on_hand_move(&mut self, x: f64, y: f64) {
        self.last_position = HandPosition::new(x, y);
    }

    /// Hand left the region: cancel any running dwell and clear `is_clicked`
    pub fn on_hand_leave(&mut self) {
        self.hand_present = false;

        if self.phase != DetectorPhase::Idle {
            debug!(
                "Hand left during {:?} after {} ticks, dwell cancelled",
                self.phase,
                self.active_ticks()
            );
        }

        self.enter_dwell.stop();
        self.cooldown_dwell.stop();
        self.phase = DetectorPhase::Idle;
        self.set_state(ButtonGestureState {
            is_clicked: false,
            ..self.state
        });
    }

    /// Advance the running dwell timer by one tick
    pub fn on_tick(&mut self) {
        let now = self.clock.now();

        match self.phase {
            DetectorPhase::Idle => {}
            DetectorPhase::Hovering => {
                if self.enter_dwell.tick(now, &self.config) {
                    self.fire_click();
                }
            }
            DetectorPhase::Clicked | DetectorPhase::CoolingDown => {
                if self.cooldown_dwell.tick(now, &self.config) {
                    self.finish_cooldown();
                } else {
                    self.phase = DetectorPhase::CoolingDown;
                }
            }
        }
    }

    /// Apply a click to the visual state, whatever its origin
    pub fn on_click(&mut self, x: f64, y: f64) {
        debug!("Click at ({:.1}, {:.1})", x, y);
        self.set_state(ButtonGestureState {
            is_clicked: true,
            is_unclicked: false,
        });
    }

    /// Stop all timers and drop observers
    pub fn shutdown(&mut self) {
        self.enter_dwell.stop();
        self.cooldown_dwell.stop();
        self.phase = DetectorPhase::Idle;
        self.hand_present = false;
        self.observers.clear();
    }

    fn fire_click(&mut self) {
        self.enter_dwell.stop();
        self.set_state(ButtonGestureState {
            is_clicked: false,
            ..self.state
        });

        let position = self.last_position;
        self.notify(&GestureEvent::Click { position });
        self.on_click(position.x, position.y);

        self.cooldown_dwell.start(self.clock.now());
        self.phase = DetectorPhase::Clicked;
    }

    fn finish_cooldown(&mut self) {
        self.cooldown_dwell.stop();
        self.phase = DetectorPhase::Idle;

        // is_clicked drops first so the pulse never overlaps it
        self.set_state(ButtonGestureState {
            is_clicked: false,
            is_unclicked: true,
        });
        self.set_state(ButtonGestureState {
            is_clicked: false,
            is_unclicked: false,
        });
        self.notify(&GestureEvent::UnclickPulse);
        debug!("Cooldown finished");
    }

    fn set_state(&mut self, next: ButtonGestureState) {
        debug_assert!(!(next.is_clicked && next.is_unclicked));

        if next == self.state {
            return;
        }
        let previous = self.state;
        self.state = next;
        self.notify(&GestureEvent::StateChanged {
            previous,
            current: next,
        });
    }

    fn notify(&mut self, event: &GestureEvent) {
        for (_, observer) in self.observers.iter_mut() {
            observer.on_gesture(event);
        }
    }
}

impl Drop for GestureClickDetector {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for GestureClickDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureClickDetector")
            .field("config", &self.config)
            .field("phase", &self.phase)
            .field("state", &self.state)
            .field("last_position", &self.last_position)
            .field("observers", &self.observers.len())
            .finish()
    }
}
