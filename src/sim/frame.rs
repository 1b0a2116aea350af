//! Frame timing
//!
//! The host feeds display-refresh timestamps in; the clock hands back a
//! clamped variable delta for gameplay plus zero or more 60 Hz fixed steps
//! drained from an accumulator, with the leftover fraction exposed for
//! render interpolation. Registering and cancelling the actual per-frame
//! callback is the host's job.

use crate::consts::{FIXED_STEP_MS, MAX_FRAME_DELTA_MS};

/// Timing for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTiming {
    /// Clamped wall-clock delta for the variable-step update
    pub delta_ms: f32,
    /// Number of fixed steps to run this frame
    pub fixed_steps: u32,
    /// Accumulator fraction of a fixed step, for motion smoothing
    pub interpolation: f32,
}

/// Two-rate frame clock
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    running: bool,
    paused: bool,
    /// Take the next timestamp as the new baseline instead of producing a
    /// delta - set on start and resume so pauses never cause catch-up bursts
    rebaseline: bool,
    last_time_ms: f64,
    accumulator_ms: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin delivering frames. No-op if already running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.paused = false;
        self.rebaseline = true;
        self.accumulator_ms = 0.0;
    }

    /// Tear down. Idempotent - stopping a stopped clock does nothing.
    pub fn stop(&mut self) {
        self.running = false;
        self.paused = false;
        self.accumulator_ms = 0.0;
    }

    /// Suspend tick delivery; no time accrues while paused
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume. The next timestamp becomes the new baseline, so the pause gap
    /// produces no catch-up burst.
    pub fn resume(&mut self) {
        if !self.running {
            return;
        }
        self.paused = false;
        self.rebaseline = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Process one display-refresh timestamp. Returns `None` while stopped
    /// or paused, and on the baseline frame right after start/resume.
    pub fn frame(&mut self, now_ms: f64) -> Option<FrameTiming> {
        if !self.running || self.paused {
            return None;
        }
        if self.rebaseline {
            self.rebaseline = false;
            self.last_time_ms = now_ms;
            return None;
        }

        // Spiral-of-death guard: a stalled tab gets one clamped step, not a
        // runaway catch-up
        let delta_ms = ((now_ms - self.last_time_ms) as f32).clamp(0.0, MAX_FRAME_DELTA_MS);
        self.last_time_ms = now_ms;

        self.accumulator_ms += delta_ms;
        let mut fixed_steps = 0;
        while self.accumulator_ms >= FIXED_STEP_MS {
            self.accumulator_ms -= FIXED_STEP_MS;
            fixed_steps += 1;
        }

        Some(FrameTiming {
            delta_ms,
            fixed_steps,
            interpolation: self.accumulator_ms / FIXED_STEP_MS,
        })
    }
}
