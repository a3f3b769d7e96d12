//! Fitting room session
//!
//! Owns one dwell detector per clothing button and drives them from a single
//! task: hand samples are smoothed, hit-tested and dispatched to the buttons
//! they touch, and the dwell timers advance on every scheduler tick. Clicks
//! reach the session as `RegionEvent` messages and put the bound clothing
//! item on.

use crate::config::FittingRoomConfig;
use crate::error::{FittingRoomError, Result};
use crate::gesture::{
    ButtonGestureState, Clock, DetectorPhase, GestureClickDetector, GestureEvent, ManualClock,
};
use crate::input::{
    HandCursorRouter, HandCursorSample, HandCursorSmoother, HandPosition, HandTrackingSource,
    RegionId,
};
use crate::wardrobe::{ClothingButtonViewModel, ClothingItem, ClothingManager, SharedClothingManager};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Longest trace `replay` accepts, in scheduler ticks
pub const MAX_REPLAY_TICKS: u64 = 10_000_000;

/// Detector notification tagged with the button it came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionEvent {
    pub region: RegionId,
    pub event: GestureEvent,
}

/// Outcome of a gesture, as reported to the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionEvent {
    #[serde(rename_all = "camelCase")]
    Clicked {
        region: RegionId,
        item: String,
        position: HandPosition,
        /// False when the item was already being worn
        newly_chosen: bool,
    },
    Unclicked { region: RegionId },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub samples: usize,
    pub ticks: u64,
    pub clicks: usize,
    pub unclicks: usize,
    /// Names of the clothes being worn at the end of the session
    pub chosen: Vec<String>,
}

/// Result of an offline replay
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReplayOutcome {
    pub events: Vec<SessionEvent>,
    pub summary: SessionSummary,
}

struct SessionButton {
    detector: GestureClickDetector,
    item: ClothingItem,
}

pub struct FittingRoomSession {
    config: FittingRoomConfig,
    router: HandCursorRouter,
    smoother: Option<HandCursorSmoother>,
    buttons: BTreeMap<RegionId, SessionButton>,
    view_model: ClothingButtonViewModel,
    events_rx: UnboundedReceiver<RegionEvent>,
    summary: SessionSummary,
}

impl FittingRoomSession {
    pub fn new(config: FittingRoomConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let mut router = HandCursorRouter::new();
        let mut buttons = BTreeMap::new();

        for layout in &config.buttons {
            let item = config
                .catalog
                .by_name(&layout.item)
                .cloned()
                .ok_or_else(|| FittingRoomError::UnknownClothingItem(layout.item.clone()))?;

            let mut detector = GestureClickDetector::new(config.dwell, clock.clone());
            detector.subscribe(forward_to(layout.id, events_tx.clone()));

            router.add_region(layout.id, layout.bounds);
            buttons.insert(layout.id, SessionButton { detector, item });
        }

        let mut view_model = ClothingButtonViewModel::new(ClothingManager::shared());
        view_model.set_clothes(buttons.values().map(|b| b.item.clone()).collect());

        let smoother = config
            .smoothing
            .enabled
            .then(|| HandCursorSmoother::new(config.smoothing));

        tracing::info!(
            "Fitting room session ready ({} buttons, dwell {:?}, {:?} mode)",
            buttons.len(),
            config.dwell.dwell_duration(),
            config.dwell.mode
        );

        Ok(Self {
            config,
            router,
            smoother,
            buttons,
            view_model,
            events_rx,
            summary: SessionSummary::default(),
        })
    }

    pub fn config(&self) -> &FittingRoomConfig {
        &self.config
    }

    pub fn manager(&self) -> &SharedClothingManager {
        self.view_model.manager()
    }

    pub fn view_model(&self) -> &ClothingButtonViewModel {
        &self.view_model
    }

    pub fn button_state(&self, region: RegionId) -> Option<ButtonGestureState> {
        self.buttons.get(&region).map(|b| b.detector.state())
    }

    pub fn button_phase(&self, region: RegionId) -> Option<DetectorPhase> {
        self.buttons.get(&region).map(|b| b.detector.phase())
    }

    /// Feed one hand sample from the tracker
    pub fn handle_sample(&mut self, sample: HandCursorSample) -> Vec<SessionEvent> {
        self.summary.samples += 1;

        let sample = match self.smoother.as_mut() {
            Some(smoother) => smoother.smooth(sample),
            None => sample,
        };

        for routed in self.router.route(&sample) {
            if let Some(button) = self.buttons.get_mut(&routed.region) {
                button.detector.handle(routed.event);
            }
        }
        self.drain_events()
    }

    /// Advance every button's dwell timer by one tick
    pub fn tick(&mut self) -> Vec<SessionEvent> {
        self.summary.ticks += 1;
        for button in self.buttons.values_mut() {
            button.detector.on_tick();
        }
        self.drain_events()
    }

    /// Summary so far, with the currently worn clothes
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            chosen: self
                .manager()
                .lock()
                .chosen()
                .iter()
                .map(|item| item.name.clone())
                .collect(),
            ..self.summary.clone()
        }
    }

    /// Drive the session from a live source until it runs dry
    pub async fn run<S>(
        &mut self,
        source: &mut S,
        mut on_event: impl FnMut(&SessionEvent),
    ) -> Result<SessionSummary>
    where
        S: HandTrackingSource + ?Sized,
    {
        let mut ticker = tokio::time::interval(self.config.dwell.tick_interval());
        tracing::info!("Session started");

        loop {
            tokio::select! {
                sample = source.next_sample() => {
                    match sample? {
                        Some(sample) => {
                            for event in self.handle_sample(sample) {
                                on_event(&event);
                            }
                        }
                        None => break,
                    }
                }
                _ = ticker.tick() => {
                    for event in self.tick() {
                        on_event(&event);
                    }
                }
            }
        }

        let summary = self.summary();
        tracing::info!(
            "Session ended (samples={}, ticks={}, clicks={})",
            summary.samples,
            summary.ticks,
            summary.clicks
        );
        Ok(summary)
    }

    /// Replay a recorded trace on logical time, one tick interval per step.
    ///
    /// After the last sample, ticking continues long enough for a pending
    /// dwell and its cooldown to resolve.
    pub fn replay(config: FittingRoomConfig, samples: &[HandCursorSample]) -> Result<ReplayOutcome> {
        let clock = ManualClock::new();
        let mut session = Self::new(config, Arc::new(clock.clone()))?;

        if let Some(bad) = samples.iter().find(|s| !s.process_time_ms.is_finite()) {
            return Err(FittingRoomError::SourceError(format!(
                "trace has a non-finite timestamp ({})",
                bad.process_time_ms
            )));
        }

        let mut samples = samples.to_vec();
        samples.sort_by(|a, b| a.process_time_ms.total_cmp(&b.process_time_ms));

        let interval = session.config.dwell.tick_interval();
        let interval_ms = interval.as_secs_f64() * 1000.0;
        let settle_ticks = 2 * (u64::from(session.config.dwell.click_timeout_ticks) + 1);
        let last_ms = samples.last().map(|s| s.process_time_ms).unwrap_or(0.0);
        let end_ms = last_ms + settle_ticks as f64 * interval_ms;

        let total_ticks = (end_ms / interval_ms).ceil();
        if total_ticks > MAX_REPLAY_TICKS as f64 {
            return Err(FittingRoomError::SourceError(format!(
                "replay would take {} ticks of {:?} (trace ends at {:.0}ms), limit is {}",
                total_ticks, interval, last_ms, MAX_REPLAY_TICKS
            )));
        }

        let mut events = Vec::new();
        let mut next = 0;
        let mut step: u64 = 0;

        loop {
            let now_ms = step as f64 * interval_ms;
            if now_ms > end_ms {
                break;
            }

            while next < samples.len() && samples[next].process_time_ms <= now_ms {
                events.extend(session.handle_sample(samples[next]));
                next += 1;
            }

            step += 1;
            clock.set(interval.saturating_mul(u32::try_from(step).unwrap_or(u32::MAX)));
            events.extend(session.tick());
        }

        tracing::debug!("Replayed {} samples over {} ticks", samples.len(), step);

        Ok(ReplayOutcome {
            events,
            summary: session.summary(),
        })
    }

    pub fn shutdown(&mut self) {
        for button in self.buttons.values_mut() {
            button.detector.shutdown();
        }
    }

    fn drain_events(&mut self) -> Vec<SessionEvent> {
        let mut out = Vec::new();

        while let Ok(RegionEvent { region, event }) = self.events_rx.try_recv() {
            let Some(button) = self.buttons.get(&region) else {
                continue;
            };

            match event {
                GestureEvent::Click { position } => {
                    let newly_chosen = self.view_model.cloth_command(&button.item);
                    self.summary.clicks += 1;
                    tracing::info!(
                        "Button {} clicked at ({:.1}, {:.1}): {}",
                        region,
                        position.x,
                        position.y,
                        button.item.name
                    );
                    out.push(SessionEvent::Clicked {
                        region,
                        item: button.item.name.clone(),
                        position,
                        newly_chosen,
                    });
                }
                GestureEvent::UnclickPulse => {
                    self.summary.unclicks += 1;
                    out.push(SessionEvent::Unclicked { region });
                }
                GestureEvent::StateChanged { previous, current } => {
                    tracing::trace!("Button {} state {:?} -> {:?}", region, previous, current);
                }
            }
        }
        out
    }
}

/// Observer that forwards detector notifications onto the session channel
fn forward_to(
    region: RegionId,
    tx: UnboundedSender<RegionEvent>,
) -> impl FnMut(&GestureEvent) + Send + 'static {
    move |event: &GestureEvent| {
        // The receiver lives as long as the session that owns the detector
        let _ = tx.send(RegionEvent {
            region,
            event: *event,
        });
    }
}

/// Nominal time from a hand entering a button to its click
pub fn dwell_click_latency(config: &FittingRoomConfig) -> Duration {
    config.dwell.tick_interval() * (config.dwell.click_timeout_ticks + 1)
}
