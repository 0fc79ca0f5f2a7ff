//! Fixed timestep scheduling
//!
//! Decouples the 60 Hz simulation from the display refresh rate. Each
//! display frame feeds its wall-time delta into the accumulator; the
//! caller runs one `tick` per step returned. Deltas are clamped so a
//! backgrounded tab does not replay seconds of simulation on resume.

use crate::consts::{MAX_DELTA_MS, STEP_MS};

/// Accumulator-based step counter
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f64,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one display frame's elapsed milliseconds; returns how many
    /// simulation steps to run. The remainder stays in the accumulator
    /// for the next frame, so no simulated time is lost or duplicated.
    pub fn advance(&mut self, delta_ms: f64) -> u32 {
        self.accumulator += delta_ms.clamp(0.0, MAX_DELTA_MS);

        let mut steps = 0;
        while self.accumulator >= STEP_MS {
            self.accumulator -= STEP_MS;
            steps += 1;
        }
        steps
    }

    /// Drop any banked time (on restart, so the first frame of a new
    /// session never multi-steps)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
