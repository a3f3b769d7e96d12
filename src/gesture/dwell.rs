//! Dwell timers
//!
//! A dwell timer counts scheduler ticks from the moment it starts. It expires
//! on the first tick past the configured dwell, measured either as a tick
//! count or as elapsed time on a monotonic clock.

use crate::error::{FittingRoomError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Number of ticks a hand must dwell before a click
pub const DEFAULT_CLICK_TIMEOUT_TICKS: u32 = 20;

/// Nominal scheduler tick interval in milliseconds
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1;

/// How a dwell period is measured
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DwellMode {
    /// Count ticks; expiry depends on how regularly the scheduler ticks
    #[default]
    Ticks,
    /// Compare elapsed clock time against `click_timeout_ticks * tick_interval`
    Clock,
}

/// Dwell detection parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DwellConfig {
    /// Ticks that must elapse before the dwell expires (expiry is on the next one)
    pub click_timeout_ticks: u32,
    /// Interval between scheduler ticks in milliseconds
    pub tick_interval_ms: u64,
    pub mode: DwellMode,
}

impl Default for DwellConfig {
    fn default() -> Self {
        Self {
            click_timeout_ticks: DEFAULT_CLICK_TIMEOUT_TICKS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            mode: DwellMode::Ticks,
        }
    }
}

impl DwellConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Dwell length as a duration
    pub fn dwell_duration(&self) -> Duration {
        self.tick_interval() * self.click_timeout_ticks
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(FittingRoomError::ConfigurationError(
                "tickIntervalMs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// One dwell period counter
#[derive(Debug, Clone, Default)]
pub struct DwellTimer {
    running: bool,
    ticks: u32,
    started_at: Duration,
}

impl DwellTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting from zero. Starting a running timer keeps its count.
    pub fn start(&mut self, now: Duration) {
        if self.running {
            return;
        }
        self.running = true;
        self.ticks = 0;
        self.started_at = now;
    }

    /// Stop and zero the counter
    pub fn stop(&mut self) {
        self.running = false;
        self.ticks = 0;
        self.started_at = Duration::ZERO;
    }

    /// Count one tick. Returns true on the tick where the dwell expires.
    pub fn tick(&mut self, now: Duration, config: &DwellConfig) -> bool {
        if !self.running {
            return false;
        }
        self.ticks = self.ticks.saturating_add(1);

        match config.mode {
            DwellMode::Ticks => self.ticks > config.click_timeout_ticks,
            DwellMode::Clock => now.saturating_sub(self.started_at) > config.dwell_duration(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }
}
