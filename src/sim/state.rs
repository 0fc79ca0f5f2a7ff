//! Game state and core simulation types
//!
//! Plain records for every entity, plus the `GameState` that owns them
//! all. Nothing here is global; subsystems borrow the state they need.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::acts::ActId;
use super::rect::Rect;
use crate::consts::*;
use crate::progress::SessionProgress;
use crate::tuning;

/// Which screen the session is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the player to begin
    Title,
    /// Live gameplay in one of the three acts
    Act(ActId),
    /// Out of lives; terminal until restart
    GameOver,
    /// Princess rescued
    Victory,
}

impl GamePhase {
    pub fn act(&self) -> Option<ActId> {
        match self {
            GamePhase::Act(id) => Some(*id),
            _ => None,
        }
    }
}

/// Horizontal heading; doubles as the sign for sword reach and arrows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    #[inline]
    pub fn sign(&self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// The knight
#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    pub vx: f32,
    pub vy: f32,
    pub facing: Facing,
    pub on_ground: bool,
    /// Contact damage is ignored while this runs down (pits excepted)
    pub invincible_ticks: u32,
    /// The sword hitbox exists only while this runs down
    pub sword_ticks: u32,
    /// Air charges left; landing re-arms to MAX_JUMPS
    pub jumps_left: u8,
    /// Set on key release; a fresh press is required per jump so holding
    /// the key cannot chain both charges
    pub(crate) jump_released: bool,
    pub anim_frame: u8,
    pub anim_ticks: u32,
}

impl Player {
    pub fn new() -> Self {
        Self {
            rect: Rect::new(
                tuning::player::SPAWN_X,
                tuning::player::SPAWN_Y,
                tuning::player::WIDTH,
                tuning::player::HEIGHT,
            ),
            vx: 0.0,
            vy: 0.0,
            facing: Facing::Right,
            on_ground: false,
            invincible_ticks: 0,
            sword_ticks: 0,
            jumps_left: tuning::player::MAX_JUMPS,
            jump_released: true,
            anim_frame: 0,
            anim_ticks: 0,
        }
    }

    /// Back to spawn with cleared kinematics; experience and lives are
    /// session progress and untouched here
    pub fn reset(&mut self) {
        self.rect.x = tuning::player::SPAWN_X;
        self.rect.y = tuning::player::SPAWN_Y;
        self.vx = 0.0;
        self.vy = 0.0;
        self.on_ground = false;
        self.invincible_ticks = 0;
        self.sword_ticks = 0;
        self.jumps_left = tuning::player::MAX_JUMPS;
    }

    /// The melee hitbox, present only mid-swing: a fixed box off the
    /// leading edge
    pub fn sword_hitbox(&self) -> Option<Rect> {
        if self.sword_ticks == 0 {
            return None;
        }
        let x = match self.facing {
            Facing::Right => self.rect.right(),
            Facing::Left => self.rect.x - tuning::sword::WIDTH,
        };
        Some(Rect::new(
            x,
            self.rect.y + tuning::sword::OFFSET_Y,
            tuning::sword::WIDTH,
            tuning::sword::HEIGHT,
        ))
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// Regular enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Slime,
    Bat,
}

/// A patrolling enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub rect: Rect,
    pub vx: f32,
    pub hp: i32,
    pub patrol_left: f32,
    pub patrol_right: f32,
    /// Bats oscillate vertically around this; unused by slimes
    pub base_y: f32,
    pub xp_value: u32,
    pub flash_ticks: u32,
    pub anim_ticks: u32,
    pub color: &'static str,
}

impl Enemy {
    pub fn slime(x: f32, y: f32) -> Self {
        use crate::tuning::slime::*;
        Self {
            kind: EnemyKind::Slime,
            rect: Rect::new(x, y, WIDTH, HEIGHT),
            vx: SPEED,
            hp: HP,
            patrol_left: x - PATROL_RANGE,
            patrol_right: x + PATROL_RANGE,
            base_y: y,
            xp_value: XP,
            flash_ticks: 0,
            anim_ticks: 0,
            color: COLOR,
        }
    }

    pub fn bat(x: f32, y: f32) -> Self {
        use crate::tuning::bat::*;
        Self {
            kind: EnemyKind::Bat,
            rect: Rect::new(x, y, WIDTH, HEIGHT),
            vx: SPEED,
            hp: HP,
            patrol_left: x - PATROL_RANGE,
            patrol_right: x + PATROL_RANGE,
            base_y: y,
            xp_value: XP,
            flash_ticks: 0,
            anim_ticks: 0,
            color: COLOR,
        }
    }
}

/// Dracula's behavior states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossPhase {
    /// Drifting toward the player, rolling for the next move
    Idle,
    /// Blinking out, then reappearing on a floating platform
    Teleport,
    /// Telegraph, then fireballs
    Attack,
}

/// Dracula
#[derive(Debug, Clone)]
pub struct Boss {
    pub rect: Rect,
    pub vy: f32,
    pub hp: i32,
    pub max_hp: i32,
    pub phase: BossPhase,
    /// Ticks since entering the current phase. Phase side effects fire on
    /// exact values of this counter, once per phase instance.
    pub phase_ticks: u32,
    pub teleport_cooldown: u32,
    pub attack_cooldown: u32,
    pub flash_ticks: u32,
    pub invincible_ticks: u32,
    /// False before act 3 and after defeat
    pub active: bool,
}

impl Boss {
    /// The dormant boss carried through acts 1 and 2
    pub fn inactive() -> Self {
        use crate::tuning::boss::*;
        Self {
            rect: Rect::new(START_X, GROUND_Y - HEIGHT, WIDTH, HEIGHT),
            vy: 0.0,
            hp: HP,
            max_hp: HP,
            phase: BossPhase::Idle,
            phase_ticks: 0,
            teleport_cooldown: 0,
            attack_cooldown: 0,
            flash_ticks: 0,
            invincible_ticks: 0,
            active: false,
        }
    }

    /// Fresh fight state at the boss act entry
    pub fn reset(&mut self) {
        use crate::tuning::boss::*;
        self.rect.x = START_X;
        self.rect.y = GROUND_Y - HEIGHT;
        self.vy = 0.0;
        self.hp = HP;
        self.phase = BossPhase::Idle;
        self.phase_ticks = 0;
        self.teleport_cooldown = TELEPORT_COOLDOWN_INITIAL;
        self.attack_cooldown = ATTACK_COOLDOWN_INITIAL;
        self.flash_ticks = 0;
        self.invincible_ticks = 0;
        self.active = true;
    }

    /// Teleport telegraph: hidden on alternating 2-tick windows until
    /// the relocation tick
    pub fn hidden(&self) -> bool {
        self.phase == BossPhase::Teleport
            && self.phase_ticks < tuning::boss::TELEPORT_RELOCATE_TICK
            && (self.phase_ticks / 2) % 2 == 0
    }

    pub fn enraged(&self) -> bool {
        self.hp * 2 < self.max_hp
    }
}

/// The knight's projectile; horizontal, single-use
#[derive(Debug, Clone)]
pub struct Arrow {
    pub rect: Rect,
    pub vx: f32,
    pub life_ticks: u32,
}

/// Dracula's projectile; aimed at the player's position at spawn time,
/// not homing
#[derive(Debug, Clone)]
pub struct Fireball {
    pub rect: Rect,
    pub vel: Vec2,
    pub life_ticks: u32,
}

impl Fireball {
    /// Aim from `(x, y)` toward the captured target point
    pub fn aimed(x: f32, y: f32, target: Vec2) -> Self {
        use crate::tuning::fireball::*;
        let angle = (target.y - y).atan2(target.x - x);
        Self {
            rect: Rect::new(x, y, WIDTH, HEIGHT),
            vel: Vec2::new(angle.cos() * SPEED_X, angle.sin() * SPEED_Y),
            life_ticks: LIFE_TICKS,
        }
    }
}

/// Pure-visual debris; no collision
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub color: &'static str,
    pub size: f32,
}

/// Rising, fading reward text ("+15 XP")
#[derive(Debug, Clone)]
pub struct FloatingText {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub color: &'static str,
    pub life: u32,
}

/// The rescue target; appears after the boss falls
#[derive(Debug, Clone)]
pub struct Princess {
    pub rect: Rect,
    pub visible: bool,
}

impl Princess {
    pub fn new() -> Self {
        use crate::tuning::princess::*;
        Self {
            rect: Rect::new(700.0, GROUND_Y - HEIGHT, WIDTH, HEIGHT),
            visible: false,
        }
    }
}

impl Default for Princess {
    fn default() -> Self {
        Self::new()
    }
}

/// Ground slabs are full-height; everything shorter floats. The boss
/// only teleports onto floating platforms.
#[inline]
pub fn is_floating(platform: &Rect) -> bool {
    platform.h < GROUND_H
}

/// Named one-shot sound cues; the shell fires them and never waits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Jump,
    Hit,
    Sword,
    Arrow,
    Boss,
    Win,
    Die,
}

/// Side effects the simulation wants the shell to perform. Drained once
/// per display frame; the simulation itself never touches storage, audio
/// or the DOM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Sound(SoundCue),
    /// Experience or lives changed; persist immediately
    ProgressChanged,
    ActEntered(ActId),
    BossDefeated,
    GameOver,
    Victory,
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub progress: SessionProgress,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub boss: Boss,
    pub princess: Princess,
    pub platforms: Vec<Rect>,
    pub arrows: Vec<Arrow>,
    pub fireballs: Vec<Fireball>,
    pub particles: Vec<Particle>,
    pub floating_texts: Vec<FloatingText>,
    /// Shared weapon cooldown (sword and bow)
    pub attack_cooldown: u32,
    /// Act title banner countdown
    pub banner_ticks: u32,
    pub banner_text: &'static str,
    /// Screen shake feedback, applied render-side only
    pub shake_ticks: u32,
    pub shake_mag: f32,
    pub boss_defeated: bool,
    /// Counts down from the boss's defeat to the princess's reveal
    pub(crate) princess_reveal_ticks: u32,
    /// Fire-once guard for the act exit while the player lingers at
    /// the edge
    pub(crate) exit_latched: bool,
    /// Restart is edge-triggered so a held key cannot double-reset
    pub(crate) restart_released: bool,
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// A fresh session at the title screen
    pub fn new(seed: u64) -> Self {
        Self {
            phase: GamePhase::Title,
            progress: SessionProgress::new(),
            player: Player::new(),
            enemies: Vec::new(),
            boss: Boss::inactive(),
            princess: Princess::new(),
            platforms: Vec::new(),
            arrows: Vec::new(),
            fireballs: Vec::new(),
            particles: Vec::new(),
            floating_texts: Vec::new(),
            attack_cooldown: 0,
            banner_ticks: 0,
            banner_text: "",
            shake_ticks: 0,
            shake_mag: 0.0,
            boss_defeated: false,
            princess_reveal_ticks: 0,
            exit_latched: false,
            restart_released: true,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Launch straight into an act with previously persisted progress
    /// (the per-act page mode; no title screen)
    pub fn new_at_act(act: ActId, progress: SessionProgress, seed: u64) -> Self {
        let mut state = Self::new(seed);
        state.progress = progress;
        state.enter_act(act);
        state
    }

    /// Full reset: zero progress, back to act 1
    pub fn start_game(&mut self) {
        self.progress.reset();
        self.push_event(GameEvent::ProgressChanged);
        self.enter_act(ActId::One);
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn sound(&mut self, cue: SoundCue) {
        self.events.push(GameEvent::Sound(cue));
    }

    /// Hand the accumulated side effects to the shell
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn trigger_shake(&mut self, ticks: u32, magnitude: f32) {
        self.shake_ticks = ticks;
        self.shake_mag = magnitude;
    }

    /// Burst of debris at a point
    pub(crate) fn spawn_particles(&mut self, x: f32, y: f32, color: &'static str, count: u32) {
        use crate::tuning::effects::*;
        for _ in 0..count {
            let vx = self.rng.random_range(PARTICLE_VX.0..PARTICLE_VX.1);
            let vy = self.rng.random_range(PARTICLE_VY.0..PARTICLE_VY.1);
            let life = self.rng.random_range(PARTICLE_LIFE.0..PARTICLE_LIFE.1);
            let size = self.rng.random_range(PARTICLE_SIZE.0..PARTICLE_SIZE.1);
            self.particles.push(Particle {
                pos: Vec2::new(x, y),
                vel: Vec2::new(vx, vy),
                life,
                color,
                size,
            });
        }
    }

    pub(crate) fn spawn_floating_text(&mut self, x: f32, y: f32, text: String, color: &'static str) {
        self.floating_texts.push(FloatingText {
            x,
            y,
            text,
            color,
            life: tuning::effects::TEXT_LIFE_TICKS,
        });
    }
}
