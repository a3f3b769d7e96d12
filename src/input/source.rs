//! Hand tracking sources
//!
//! The depth sensor and its skeletal tracking live outside this crate. A
//! source only has to hand over cursor samples one at a time; it can be a
//! bridge process writing JSON lines or a recorded trace replayed in real
//! time.

use crate::error::{FittingRoomError, Result};
use crate::input::types::HandCursorSample;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::time::Instant;

/// A stream of hand cursor samples
///
/// `next_sample` must be cancel safe: the live session polls it inside
/// `tokio::select!` next to the dwell ticker.
#[async_trait]
pub trait HandTrackingSource: Send {
    /// Get the next sample, or `None` when the source is exhausted
    async fn next_sample(&mut self) -> Result<Option<HandCursorSample>>;
}

/// Reads one JSON-encoded sample per line
pub struct JsonLinesSource<R> {
    lines: Lines<R>,
    line_number: usize,
}

impl<R: AsyncBufRead + Unpin + Send> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
        }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> HandTrackingSource for JsonLinesSource<R> {
    async fn next_sample(&mut self) -> Result<Option<HandCursorSample>> {
        loop {
            let Some(line) = self.lines.next_line().await? else {
                return Ok(None);
            };
            self.line_number += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let sample = serde_json::from_str(trimmed).map_err(|e| {
                FittingRoomError::SourceError(format!("line {}: {}", self.line_number, e))
            })?;
            return Ok(Some(sample));
        }
    }
}

/// Replays a recorded trace, pacing samples by their `process_time_ms`
pub struct ReplaySource {
    samples: Vec<HandCursorSample>,
    index: usize,
    start: Option<Instant>,
}

impl ReplaySource {
    pub fn new(samples: Vec<HandCursorSample>) -> Self {
        Self {
            samples,
            index: 0,
            start: None,
        }
    }

    pub fn remaining(&self) -> usize {
        self.samples.len() - self.index
    }
}

#[async_trait]
impl HandTrackingSource for ReplaySource {
    async fn next_sample(&mut self) -> Result<Option<HandCursorSample>> {
        let Some(sample) = self.samples.get(self.index).copied() else {
            return Ok(None);
        };

        let start = *self.start.get_or_insert_with(Instant::now);
        let offset = Duration::try_from_secs_f64(sample.process_time_ms.max(0.0) / 1000.0)
            .map_err(|e| {
                FittingRoomError::SourceError(format!(
                    "sample {}: bad timestamp {}: {}",
                    self.index, sample.process_time_ms, e
                ))
            })?;
        tokio::time::sleep_until(start + offset).await;

        // Advance only after the sleep so a cancelled call replays the same sample
        self.index += 1;
        Ok(Some(sample))
    }
}

/// Load a recorded trace (JSON array of samples)
pub fn load_trace(path: &Path) -> Result<Vec<HandCursorSample>> {
    let content = std::fs::read_to_string(path)?;
    let samples: Vec<HandCursorSample> = serde_json::from_str(&content)?;

    tracing::debug!("Loaded {} hand samples from {:?}", samples.len(), path);
    Ok(samples)
}
