//! Spring smoothing for the hand cursor
//!
//! Depth-sensor hand positions jitter by several pixels per frame. A damped
//! spring follows the raw position so that hovering over a button reads as a
//! steady dwell instead of a stream of enter/leave flickers at its edges.

use crate::input::types::HandCursorSample;
use serde::{Deserialize, Serialize};

/// Spring physics parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 470.0,
            damping: 70.0,
            mass: 3.0,
        }
    }
}

/// Default teleport detection threshold in pixels
/// If the hand moves more than this distance between samples, reset the spring
pub const DEFAULT_TELEPORT_THRESHOLD: f64 = 400.0;

/// Hand cursor smoothing settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SmoothingConfig {
    pub enabled: bool,
    pub spring: SpringConfig,
    pub teleport_threshold: f64,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            spring: SpringConfig::default(),
            teleport_threshold: DEFAULT_TELEPORT_THRESHOLD,
        }
    }
}

/// Largest simulation step in seconds; longer gaps are split into sub-steps
pub const MAX_STEP_S: f64 = 1.0 / 60.0;

/// Sample gap in milliseconds past which the spring is considered stale and reset
pub const STALL_RESET_MS: f64 = 500.0;

/// 1D spring state tracking position and velocity
#[derive(Debug, Clone)]
pub struct SpringState {
    pub position: f64,
    pub velocity: f64,
}

impl SpringState {
    /// Create a new spring state at the given position with zero velocity
    pub fn new(initial: f64) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
        }
    }

    /// Advance the spring simulation by dt seconds toward the target
    ///
    /// Uses the damped harmonic oscillator equation:
    /// F = -k * x - c * v
    /// where k = stiffness, c = damping, x = displacement, v = velocity.
    /// Only stable for small dt; callers go through `Spring2D::advance`.
    pub fn step(&mut self, target: f64, config: &SpringConfig, dt: f64) {
        let displacement = self.position - target;
        let spring_force = -config.stiffness * displacement;
        let damping_force = -config.damping * self.velocity;
        let acceleration = (spring_force + damping_force) / config.mass;

        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }
}

/// 2D spring for the hand cursor (X and Y axes)
#[derive(Debug, Clone)]
pub struct Spring2D {
    pub x: SpringState,
    pub y: SpringState,
}

impl Spring2D {
    /// Create a new 2D spring at the given position
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: SpringState::new(x),
            y: SpringState::new(y),
        }
    }

    /// Advance both X and Y springs toward the target position by one step
    pub fn step(&mut self, target_x: f64, target_y: f64, config: &SpringConfig, dt: f64) {
        self.x.step(target_x, config, dt);
        self.y.step(target_y, config, dt);
    }

    /// Advance by dt seconds in sub-steps no longer than `MAX_STEP_S`
    pub fn advance(&mut self, target_x: f64, target_y: f64, config: &SpringConfig, dt: f64) {
        if dt <= 0.0 {
            return;
        }
        let steps = (dt / MAX_STEP_S).ceil().max(1.0) as u32;
        let sub_dt = dt / f64::from(steps);
        for _ in 0..steps {
            self.step(target_x, target_y, config, sub_dt);
        }
    }

    /// Get the current smoothed position
    pub fn position(&self) -> (f64, f64) {
        (self.x.position, self.y.position)
    }

    /// Reset the spring to a new position with zero velocity (for teleports)
    pub fn reset(&mut self, x: f64, y: f64) {
        self.x = SpringState::new(x);
        self.y = SpringState::new(y);
    }
}

/// Live smoother applied to each incoming hand sample
#[derive(Debug, Clone)]
pub struct HandCursorSmoother {
    config: SmoothingConfig,
    spring: Option<Spring2D>,
    last_raw: Option<HandCursorSample>,
}

impl HandCursorSmoother {
    /// Create a smoother; the spring starts at the first tracked sample
    pub fn new(config: SmoothingConfig) -> Self {
        Self {
            config,
            spring: None,
            last_raw: None,
        }
    }

    /// Smooth one sample. Untracked samples pass through and reset the spring.
    ///
    /// A jump past the teleport threshold or a gap longer than
    /// `STALL_RESET_MS` snaps to the raw position. Samples that repeat or go
    /// back in time advance the spring by one `MAX_STEP_S` frame.
    pub fn smooth(&mut self, raw: HandCursorSample) -> HandCursorSample {
        if !raw.tracked {
            self.reset();
            return raw;
        }

        let Some(last) = self.last_raw else {
            self.spring = Some(Spring2D::new(raw.x, raw.y));
            self.last_raw = Some(raw);
            return raw;
        };
        let spring = self
            .spring
            .get_or_insert_with(|| Spring2D::new(last.x, last.y));

        let dx = raw.x - last.x;
        let dy = raw.y - last.y;
        let distance = (dx * dx + dy * dy).sqrt();
        let gap_ms = raw.process_time_ms - last.process_time_ms;

        if distance > self.config.teleport_threshold || gap_ms > STALL_RESET_MS {
            spring.reset(raw.x, raw.y);
        } else {
            let dt = if gap_ms > 0.0 { gap_ms / 1000.0 } else { MAX_STEP_S };
            spring.advance(raw.x, raw.y, &self.config.spring, dt);
        }

        self.last_raw = Some(raw);
        let (x, y) = spring.position();
        HandCursorSample { x, y, ..raw }
    }

    /// Forget the spring; the next tracked sample passes through unchanged
    pub fn reset(&mut self) {
        self.spring = None;
        self.last_raw = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spring_approaches_target() {
        let config = SpringConfig::default();
        let mut state = SpringState::new(0.0);

        for _ in 0..60 {
            state.step(100.0, &config, 1.0 / 60.0);
        }

        assert!(
            (state.position - 100.0).abs() < 5.0,
            "Position {} should be close to 100",
            state.position
        );
    }

    #[test]
    fn test_first_sample_passes_through() {
        let mut smoother = HandCursorSmoother::new(SmoothingConfig::default());
        let out = smoother.smooth(HandCursorSample::new(120.0, 80.0, 0.0));
        assert_eq!(out.x, 120.0);
        assert_eq!(out.y, 80.0);
    }

    #[test]
    fn test_jitter_is_damped() {
        let mut smoother = HandCursorSmoother::new(SmoothingConfig::default());
        smoother.smooth(HandCursorSample::new(100.0, 100.0, 0.0));

        // Alternating +/-10px jitter at 30Hz around (100, 100)
        let mut max_dev = 0.0f64;
        for i in 1..60 {
            let jitter = if i % 2 == 0 { 10.0 } else { -10.0 };
            let out = smoother.smooth(HandCursorSample::new(100.0 + jitter, 100.0, i as f64 * 33.3));
            max_dev = max_dev.max((out.x - 100.0).abs());
        }

        assert!(max_dev < 10.0, "Smoothed deviation {} should be below raw jitter", max_dev);
    }

    #[test]
    fn test_slow_source_stays_bounded() {
        let mut smoother = HandCursorSmoother::new(SmoothingConfig::default());

        // 4Hz tracker alternating between 100 and 110
        let mut max_dev = 0.0f64;
        for i in 0..12 {
            let x = if i % 2 == 0 { 100.0 } else { 110.0 };
            let out = smoother.smooth(HandCursorSample::new(x, 100.0, i as f64 * 250.0));
            max_dev = max_dev.max((out.x - 105.0).abs());
        }

        assert!(max_dev < 50.0, "Smoothed x deviated by {} on 250ms gaps", max_dev);
    }

    #[test]
    fn test_irregular_gaps_converge() {
        let mut smoother = HandCursorSmoother::new(SmoothingConfig::default());
        smoother.smooth(HandCursorSample::new(0.0, 0.0, 0.0));

        let times = [5.0, 90.0, 95.0, 400.0, 410.0, 700.0, 1000.0];
        let mut last = HandCursorSample::new(0.0, 0.0, 0.0);
        for t in times {
            last = smoother.smooth(HandCursorSample::new(200.0, 100.0, t));
            assert!(last.x.is_finite() && last.x <= 210.0, "x {} at {}ms", last.x, t);
        }
        assert!((last.x - 200.0).abs() < 5.0, "x {} should settle near 200", last.x);
        assert!((last.y - 100.0).abs() < 5.0, "y {} should settle near 100", last.y);
    }

    #[test]
    fn test_stall_snaps_to_raw() {
        let mut smoother = HandCursorSmoother::new(SmoothingConfig::default());
        smoother.smooth(HandCursorSample::new(0.0, 0.0, 0.0));

        let out = smoother.smooth(HandCursorSample::new(150.0, 50.0, 2000.0));
        assert_eq!((out.x, out.y), (150.0, 50.0));
    }

    #[test]
    fn test_repeated_timestamps_still_move() {
        let mut smoother = HandCursorSmoother::new(SmoothingConfig::default());
        smoother.smooth(HandCursorSample::new(100.0, 100.0, 50.0));

        let first = smoother.smooth(HandCursorSample::new(200.0, 100.0, 50.0));
        assert!(first.x > 100.0, "zero gap should not freeze the spring");

        // Out-of-order timestamp
        let mut out = first;
        for _ in 0..60 {
            out = smoother.smooth(HandCursorSample::new(200.0, 100.0, 10.0));
        }
        assert!((out.x - 200.0).abs() < 5.0, "x {} should reach 200", out.x);
    }

    #[test]
    fn test_advance_splits_long_steps() {
        let config = SpringConfig::default();
        let mut spring = Spring2D::new(0.0, 0.0);
        spring.advance(100.0, 100.0, &config, 1.0);

        let (x, y) = spring.position();
        assert!((x - 100.0).abs() < 5.0, "X {} should be close to 100", x);
        assert!((y - 100.0).abs() < 5.0, "Y {} should be close to 100", y);
    }

    #[test]
    fn test_teleport_resets_spring() {
        let mut smoother = HandCursorSmoother::new(SmoothingConfig::default());
        smoother.smooth(HandCursorSample::new(0.0, 0.0, 0.0));
        smoother.smooth(HandCursorSample::new(10.0, 10.0, 33.3));

        let out = smoother.smooth(HandCursorSample::new(1000.0, 1000.0, 66.6));
        assert_eq!(out.x, 1000.0);
        assert_eq!(out.y, 1000.0);
    }

    #[test]
    fn test_lost_tracking_resets() {
        let mut smoother = HandCursorSmoother::new(SmoothingConfig::default());
        smoother.smooth(HandCursorSample::new(0.0, 0.0, 0.0));
        let lost = smoother.smooth(HandCursorSample::lost(33.3));
        assert!(!lost.tracked);

        // Next tracked sample starts a fresh spring at its own position
        let out = smoother.smooth(HandCursorSample::new(50.0, 60.0, 66.6));
        assert_eq!((out.x, out.y), (50.0, 60.0));
    }
}
