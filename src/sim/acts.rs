//! Act control: per-act level tables and transition rules
//!
//! One controller drives all three acts from data. Each act names its
//! platform layout, enemy roster, weapon loadout, exit threshold and
//! backdrop; entering an act rebuilds the world from the table and
//! clears every transient collection.

use super::rect::Rect;
use super::state::{Enemy, GameEvent, GamePhase, GameState, Princess, SoundCue};
use crate::consts::*;
use crate::tuning;

/// The three level segments, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActId {
    One,
    Two,
    Three,
}

/// Backdrop identifier for the render layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Morning,
    Dusk,
    Night,
}

/// Everything that differs between acts
#[derive(Debug)]
pub struct ActConfig {
    pub banner: &'static str,
    pub hud_title: &'static str,
    pub background: Background,
    /// Experience gate on the right-edge exit; `None` means the act ends
    /// some other way (the rescue)
    pub exit_xp: Option<u32>,
    pub has_boss: bool,
    pub sword: bool,
    pub bow: bool,
}

const ACT_1: ActConfig = ActConfig {
    banner: "Act I: The Morning",
    hud_title: "ACT I: THE MORNING",
    background: Background::Morning,
    exit_xp: Some(tuning::acts::ACT1_EXIT_XP),
    has_boss: false,
    sword: true,
    bow: false,
};

const ACT_2: ActConfig = ActConfig {
    banner: "Act II: The Evening",
    hud_title: "ACT II: THE EVENING",
    background: Background::Dusk,
    exit_xp: Some(tuning::acts::ACT2_EXIT_XP),
    has_boss: false,
    sword: false,
    bow: true,
};

const ACT_3: ActConfig = ActConfig {
    banner: "Act III: The Night",
    hud_title: "ACT III: THE NIGHT",
    background: Background::Night,
    exit_xp: None,
    has_boss: true,
    sword: true,
    bow: true,
};

impl ActId {
    pub fn config(&self) -> &'static ActConfig {
        match self {
            ActId::One => &ACT_1,
            ActId::Two => &ACT_2,
            ActId::Three => &ACT_3,
        }
    }

    pub fn next(&self) -> Option<ActId> {
        match self {
            ActId::One => Some(ActId::Two),
            ActId::Two => Some(ActId::Three),
            ActId::Three => None,
        }
    }

    pub fn number(&self) -> u32 {
        match self {
            ActId::One => 1,
            ActId::Two => 2,
            ActId::Three => 3,
        }
    }

    pub fn from_number(n: u32) -> Option<ActId> {
        match n {
            1 => Some(ActId::One),
            2 => Some(ActId::Two),
            3 => Some(ActId::Three),
            _ => None,
        }
    }

    /// Platform layout: ground slabs (pits between them) plus floating
    /// stepping stones
    pub fn platforms(&self) -> Vec<Rect> {
        match self {
            ActId::One => vec![
                Rect::new(0.0, GROUND_Y, 250.0, GROUND_H),
                Rect::new(300.0, GROUND_Y, 180.0, GROUND_H),
                Rect::new(530.0, GROUND_Y, 270.0, GROUND_H),
                Rect::new(130.0, 340.0, 90.0, 16.0),
                Rect::new(320.0, 290.0, 100.0, 16.0),
                Rect::new(520.0, 260.0, 90.0, 16.0),
                Rect::new(680.0, 200.0, 90.0, 16.0),
                // exit perch, high right
                Rect::new(730.0, 150.0, 70.0, 16.0),
            ],
            ActId::Two => vec![
                Rect::new(0.0, GROUND_Y, 160.0, GROUND_H),
                Rect::new(210.0, GROUND_Y, 120.0, GROUND_H),
                Rect::new(400.0, GROUND_Y, 100.0, GROUND_H),
                Rect::new(570.0, GROUND_Y, 110.0, GROUND_H),
                Rect::new(720.0, GROUND_Y, 80.0, GROUND_H),
                Rect::new(100.0, 340.0, 70.0, 16.0),
                Rect::new(250.0, 280.0, 80.0, 16.0),
                Rect::new(420.0, 230.0, 70.0, 16.0),
                Rect::new(550.0, 310.0, 80.0, 16.0),
                Rect::new(660.0, 190.0, 90.0, 16.0),
                Rect::new(740.0, 130.0, 60.0, 16.0),
            ],
            // flat arena, unbroken floor
            ActId::Three => vec![
                Rect::new(0.0, GROUND_Y, WORLD_W, GROUND_H),
                Rect::new(50.0, 340.0, 100.0, 16.0),
                Rect::new(650.0, 340.0, 100.0, 16.0),
                Rect::new(300.0, 260.0, 200.0, 16.0),
                Rect::new(100.0, 180.0, 120.0, 16.0),
                Rect::new(580.0, 180.0, 120.0, 16.0),
            ],
        }
    }

    /// Enemy roster at act entry. Act 3 fields only the boss.
    pub fn enemies(&self) -> Vec<Enemy> {
        let slime_y = GROUND_Y - tuning::slime::HEIGHT;
        match self {
            ActId::One => vec![
                Enemy::slime(180.0, slime_y),
                Enemy::slime(400.0, slime_y),
                Enemy::slime(600.0, slime_y),
                Enemy::slime(340.0, 290.0 - tuning::slime::HEIGHT),
            ],
            ActId::Two => vec![
                Enemy::bat(200.0, 200.0),
                Enemy::bat(450.0, 160.0),
                Enemy::bat(650.0, 140.0),
                Enemy::slime(250.0, slime_y),
                Enemy::slime(580.0, slime_y),
                Enemy::bat(120.0, 280.0),
            ],
            ActId::Three => Vec::new(),
        }
    }
}

impl GameState {
    /// Rebuild the world from the act table. Session progress carries
    /// over; everything transient is cleared.
    pub fn enter_act(&mut self, act: ActId) {
        let config = act.config();
        self.phase = GamePhase::Act(act);
        self.platforms = act.platforms();
        self.enemies = act.enemies();
        self.arrows.clear();
        self.fireballs.clear();
        self.particles.clear();
        self.floating_texts.clear();
        self.player.reset();
        self.princess = Princess::new();
        self.boss.active = false;
        self.boss_defeated = false;
        self.princess_reveal_ticks = 0;
        self.exit_latched = false;
        self.attack_cooldown = 0;
        if config.has_boss {
            self.boss.reset();
        }
        self.banner_ticks = tuning::acts::BANNER_TICKS;
        self.banner_text = config.banner;
        log::info!("entering act {} ({})", act.number(), config.banner);
        self.push_event(GameEvent::ActEntered(act));
    }

    /// Right-edge exit, gated on experience. Latched so one crossing
    /// fires one transition even if the condition stays true.
    pub(crate) fn check_act_exit(&mut self) {
        let Some(act) = self.phase.act() else { return };
        let Some(threshold) = act.config().exit_xp else {
            return;
        };
        if self.exit_latched {
            return;
        }
        if self.progress.xp >= threshold
            && self.player.rect.right() >= WORLD_W - tuning::acts::EXIT_MARGIN
        {
            self.exit_latched = true;
            if let Some(next) = act.next() {
                self.enter_act(next);
            }
        }
    }

    /// Touching the revealed princess ends the game
    pub(crate) fn check_princess(&mut self) {
        if !self.princess.visible {
            return;
        }
        if self.player.rect.intersects(&self.princess.rect) {
            self.phase = GamePhase::Victory;
            self.sound(SoundCue::Win);
            self.push_event(GameEvent::Victory);
            log::info!("victory at {} xp", self.progress.xp);
        }
    }

    pub(crate) fn trigger_game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        self.sound(SoundCue::Die);
        self.push_event(GameEvent::GameOver);
        log::info!("game over at {} xp", self.progress.xp);
    }
}
