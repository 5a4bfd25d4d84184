//! Fixed-rate frame pacing
//!
//! Turns animation-frame timestamps into a whole number of simulation steps
//! so motion and trail fading run at the same rate on every display.

use crate::consts::{FRAME_DT, MAX_SUBSTEPS};

/// Longest frame delta honoured (seconds); longer gaps are treated as a stall
const MAX_FRAME_DELTA: f32 = 0.1;

#[derive(Debug, Clone, Default)]
pub struct FramePacer {
    accumulator: f32,
    last_time: Option<f64>,
}

impl FramePacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Steps to run for an animation frame at `time_ms` (a
    /// `requestAnimationFrame` timestamp). The first frame runs one step.
    pub fn frame(&mut self, time_ms: f64) -> u32 {
        let dt = match self.last_time {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            None => FRAME_DT,
        };
        self.last_time = Some(time_ms);
        self.advance(dt)
    }

    /// Add `dt` seconds of wall-clock time and take the whole steps it buys
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DELTA);

        let mut steps = 0;
        while self.accumulator >= FRAME_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= FRAME_DT;
            steps += 1;
        }

        // Drop backlog we could not catch up on
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(FRAME_DT);
        }
        steps
    }
}
