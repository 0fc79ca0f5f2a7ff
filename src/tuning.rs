//! Data-driven game balance
//!
//! Every physics constant and tick count lives here, grouped per entity
//! kind, so a number like "15" has exactly one name and one meaning.
//! All durations are in 60 Hz simulation ticks; all distances in world
//! pixels; all speeds in pixels per tick.

/// Player movement and combat
pub mod player {
    pub const WIDTH: f32 = 24.0;
    pub const HEIGHT: f32 = 36.0;
    pub const SPAWN_X: f32 = 60.0;
    pub const SPAWN_Y: f32 = 0.0;

    pub const SPEED: f32 = 3.5;
    /// Acceleration applied per tick while a direction key is held
    pub const ACCEL: f32 = SPEED * 0.4;
    pub const GRAVITY: f32 = 0.55;
    pub const FRICTION: f32 = 0.82;
    pub const JUMP_FORCE: f32 = -11.0;
    /// Air charges; re-armed to this on landing
    pub const MAX_JUMPS: u8 = 2;

    /// Contact-damage grace window
    pub const INVINCIBLE_TICKS: u32 = 60;
    /// Animation frame advance period
    pub const ANIM_PERIOD: u32 = 8;
}

/// Collision classification tolerances
pub mod collision {
    /// A landing/ceiling reads as such if the pre-step edge was within
    /// this band of the platform face
    pub const VERTICAL_TOLERANCE: f32 = 4.0;
    pub const SIDE_TOLERANCE: f32 = 2.0;
}

/// Sword swing hitbox and timing
pub mod sword {
    pub const WIDTH: f32 = 30.0;
    pub const HEIGHT: f32 = 20.0;
    /// Vertical offset of the hitbox from the player's top edge
    pub const OFFSET_Y: f32 = 6.0;
    /// Swing duration when the sword is the equipped weapon
    pub const SWING_TICKS: u32 = 12;
    /// Shorter follow-through swing fired alongside arrows in the boss act
    pub const COMBO_SWING_TICKS: u32 = 10;
    pub const COOLDOWN: u32 = 18;
}

/// Arrow projectile
pub mod arrow {
    pub const WIDTH: f32 = 14.0;
    pub const HEIGHT: f32 = 3.0;
    pub const SPEED: f32 = 9.0;
    pub const LIFE_TICKS: u32 = 60;
    pub const COOLDOWN: u32 = 14;
    /// Spawn height below the player's top edge
    pub const OFFSET_Y: f32 = 12.0;
}

/// Slime enemy
pub mod slime {
    pub const WIDTH: f32 = 24.0;
    pub const HEIGHT: f32 = 24.0;
    pub const SPEED: f32 = 1.0;
    pub const HP: i32 = 2;
    pub const PATROL_RANGE: f32 = 60.0;
    pub const XP: u32 = 15;
    pub const COLOR: &str = "#00FF00";
}

/// Bat enemy
pub mod bat {
    pub const WIDTH: f32 = 26.0;
    pub const HEIGHT: f32 = 18.0;
    pub const SPEED: f32 = 1.8;
    pub const HP: i32 = 1;
    pub const PATROL_RANGE: f32 = 80.0;
    /// Vertical oscillation: `base_y + sin(anim * FLAP_RATE) * FLAP_AMPLITUDE`
    pub const FLAP_RATE: f32 = 0.08;
    pub const FLAP_AMPLITUDE: f32 = 20.0;
    pub const XP: u32 = 20;
    pub const COLOR: &str = "#AA44FF";
}

/// Dracula
pub mod boss {
    pub const WIDTH: f32 = 36.0;
    pub const HEIGHT: f32 = 56.0;
    pub const START_X: f32 = 600.0;
    pub const HP: i32 = 30;
    /// Falls a little slower than the player
    pub const GRAVITY_SCALE: f32 = 0.8;
    /// Idle drift toward the player, sign-only
    pub const DRIFT_SPEED: f32 = 1.0;

    /// Per-tick transition probability out of idle, once off cooldown
    pub const TELEPORT_CHANCE: f32 = 0.015;
    pub const ATTACK_CHANCE: f32 = 0.02;
    /// Cooldowns at act entry (shorter, so the fight opens calmly but soon)
    pub const TELEPORT_COOLDOWN_INITIAL: u32 = 120;
    pub const ATTACK_COOLDOWN_INITIAL: u32 = 80;
    /// Cooldowns re-armed whenever the phase triggers
    pub const TELEPORT_COOLDOWN: u32 = 150;
    pub const ATTACK_COOLDOWN: u32 = 90;

    /// Teleport phase: blink until the relocation tick, solid after
    pub const TELEPORT_RELOCATE_TICK: u32 = 15;
    pub const TELEPORT_PHASE_TICKS: u32 = 30;
    /// Fallback landing zone when no floating platform exists
    pub const TELEPORT_MIN_X: f32 = 100.0;
    pub const TELEPORT_MAX_X: f32 = 650.0;
    /// Safety respawn height after falling out of the world
    pub const FALL_RESET_Y: f32 = 100.0;

    /// Attack phase: aimed shot, then the enraged spread
    pub const ATTACK_FIRE_TICK: u32 = 10;
    pub const ENRAGE_FIRE_TICK: u32 = 30;
    pub const ENRAGE_SPREAD_X: f32 = 40.0;
    pub const ATTACK_PHASE_TICKS: u32 = 40;

    /// Post-hit grace windows (prevents hit-stacking in one burst)
    pub const MELEE_DAMAGE: i32 = 2;
    pub const MELEE_INVINCIBLE_TICKS: u32 = 20;
    pub const ARROW_DAMAGE: i32 = 1;
    pub const ARROW_INVINCIBLE_TICKS: u32 = 15;

    pub const DEFEAT_XP: u32 = 100;
    pub const COLOR: &str = "#FF0000";
}

/// Dracula's fireball
pub mod fireball {
    pub const WIDTH: f32 = 12.0;
    pub const HEIGHT: f32 = 12.0;
    /// Velocity components along the aim angle; the slight vertical
    /// squash gives the shots a shallow, dodgeable arc
    pub const SPEED_X: f32 = 4.0;
    pub const SPEED_Y: f32 = 3.0;
    pub const LIFE_TICKS: u32 = 120;
}

/// Ephemeral visual feedback
pub mod effects {
    pub const HIT_FLASH_TICKS: u32 = 6;
    pub const BOSS_FLASH_TICKS: u32 = 8;

    /// Particle spawn ranges (uniform)
    pub const PARTICLE_VX: (f32, f32) = (-3.0, 3.0);
    pub const PARTICLE_VY: (f32, f32) = (-4.0, 1.0);
    pub const PARTICLE_LIFE: (f32, f32) = (15.0, 30.0);
    pub const PARTICLE_SIZE: (f32, f32) = (2.0, 5.0);
    /// Downward drift applied to particles each tick
    pub const PARTICLE_GRAVITY: f32 = 0.12;
    /// Alpha denominator: particles fade from this much remaining life
    pub const PARTICLE_FADE_LIFE: f32 = 30.0;

    pub const TEXT_LIFE_TICKS: u32 = 50;
    pub const TEXT_RISE: f32 = 0.8;

    pub const GOLD: &str = "#FFD700";
    pub const DAMAGE_RED: &str = "#FF4444";
}

/// Act sequencing
pub mod acts {
    /// Experience needed to unlock the act 1 exit. The standalone act
    /// pages used 45/145 and the single-page build used 100/250; the
    /// per-act pair is canonical here, the other kept for reference.
    pub const ACT1_EXIT_XP: u32 = 45;
    pub const ACT2_EXIT_XP: u32 = 145;
    pub const ACT1_EXIT_XP_UNIFIED: u32 = 100;
    pub const ACT2_EXIT_XP_UNIFIED: u32 = 250;

    /// The exit triggers when the player's right edge is this close to
    /// the world's right edge
    pub const EXIT_MARGIN: f32 = 5.0;

    /// Act title banner duration; fades over the last FADE ticks
    pub const BANNER_TICKS: u32 = 90;
    pub const BANNER_FADE_TICKS: u32 = 30;

    /// Ticks between the boss's defeat and the princess appearing
    pub const PRINCESS_REVEAL_DELAY: u32 = 30;
}

/// Rescued princess
pub mod princess {
    pub const WIDTH: f32 = 20.0;
    pub const HEIGHT: f32 = 36.0;
}
