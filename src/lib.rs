//! Knightfall - a three-act action platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, combat, boss AI, act control)
//! - `render`: Canvas-2d frame drawing (reads sim state, never mutates it)
//! - `progress`: Session progress persisted to LocalStorage
//! - `audio`: Procedurally generated sound cues
//! - `tuning`: Data-driven game balance

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod progress;
#[cfg(target_arch = "wasm32")]
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use progress::SessionProgress;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation step (60 Hz)
    pub const STEP_MS: f64 = 1000.0 / 60.0;
    /// Largest wall-time delta fed to the accumulator per display frame.
    /// Absorbs tab-suspend gaps without a burst of catch-up steps.
    pub const MAX_DELTA_MS: f64 = 200.0;

    /// World dimensions in pixels
    pub const WORLD_W: f32 = 800.0;
    pub const WORLD_H: f32 = 500.0;

    /// Falling below this line is a pit death
    pub const PIT_Y: f32 = WORLD_H + 40.0;

    /// Ground slabs are this tall; anything shorter is a floating platform
    pub const GROUND_H: f32 = 40.0;
    /// Top surface of the ground slabs
    pub const GROUND_Y: f32 = WORLD_H - GROUND_H;
}
