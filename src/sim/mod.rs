//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! Update order within one tick is load-bearing: player physics runs
//! before combat (combat reads the sword hitbox armed this tick), combat
//! before projectile motion, projectiles before effect aging.

pub mod acts;
pub mod boss;
pub mod combat;
pub mod physics;
pub mod rect;
pub mod scheduler;
pub mod state;
pub mod tick;

pub use acts::{ActConfig, ActId, Background};
pub use rect::Rect;
pub use scheduler::FixedStep;
pub use state::{
    Arrow, Boss, BossPhase, Enemy, EnemyKind, Facing, Fireball, FloatingText, GameEvent, GamePhase,
    GameState, Particle, Player, Princess, SoundCue, is_floating,
};
pub use tick::{TickInput, tick};
