//! Fixed timestep simulation tick
//!
//! Advances the whole world by one 60 Hz step. Subsystem order matters
//! and is fixed: player physics, act exit check, enemies and combat,
//! boss, projectiles, ephemeral effects, rescue check, then timer decay.

use super::boss;
use super::combat;
use super::physics;
use super::state::{GamePhase, GameState};
use crate::consts::*;
use crate::tuning;

/// Held-key snapshot for one tick. The shell maps physical keys; the
/// simulation only ever sees these booleans.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub attack: bool,
    pub restart: bool,
}

/// Advance the game by one fixed step
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Restart (and, on overlays, attack) is edge-triggered: one reset
    // per press, no matter how long the key is held
    let overlay = state.phase.act().is_none();
    let confirm = if overlay {
        input.attack || input.restart
    } else {
        input.restart
    };
    let confirm_edge = confirm && state.restart_released;
    state.restart_released = !confirm;

    if overlay {
        if confirm_edge {
            state.start_game();
        }
        return;
    }
    if confirm_edge {
        state.start_game();
        return;
    }

    state.time_ticks += 1;

    physics::update_player(state, input);
    if state.phase.act().is_none() {
        // Pit death spent the last life
        return;
    }
    state.check_act_exit();

    combat::update_enemies(state);
    if state.phase.act().is_none() {
        return;
    }

    boss::update_boss(state);
    combat::update_boss_combat(state);
    if state.phase.act().is_none() {
        return;
    }

    update_arrows(state);
    update_fireballs(state);
    if state.phase.act().is_none() {
        return;
    }

    update_particles(state);
    update_floating_texts(state);

    // The princess steps out a moment after the boss falls
    if state.boss_defeated && state.princess_reveal_ticks > 0 {
        state.princess_reveal_ticks -= 1;
        if state.princess_reveal_ticks == 0 {
            state.princess.visible = true;
            state.princess.rect.x = state.boss.rect.x;
            state.princess.rect.y = GROUND_Y - state.princess.rect.h;
        }
    }
    state.check_princess();

    if state.banner_ticks > 0 {
        state.banner_ticks -= 1;
    }
    if state.shake_ticks > 0 {
        state.shake_ticks -= 1;
    }
}

fn update_arrows(state: &mut GameState) {
    state.arrows.retain_mut(|a| {
        a.rect.x += a.vx;
        a.life_ticks = a.life_ticks.saturating_sub(1);
        a.life_ticks > 0 && a.rect.x > -20.0 && a.rect.x < WORLD_W + 20.0
    });
}

fn update_fireballs(state: &mut GameState) {
    let player_rect = state.player.rect;
    let vulnerable = state.player.invincible_ticks == 0;
    let mut hit_player = false;
    state.fireballs.retain_mut(|f| {
        f.rect.x += f.vel.x;
        f.rect.y += f.vel.y;
        f.life_ticks = f.life_ticks.saturating_sub(1);
        if f.life_ticks == 0
            || f.rect.x < -20.0
            || f.rect.x > WORLD_W + 20.0
            || f.rect.y > WORLD_H + 20.0
        {
            return false;
        }
        if vulnerable && !hit_player && f.rect.intersects(&player_rect) {
            hit_player = true;
            return false;
        }
        true
    });
    if hit_player {
        combat::hurt_player(state, false);
    }
}

fn update_particles(state: &mut GameState) {
    state.particles.retain_mut(|p| {
        p.pos += p.vel;
        p.vel.y += tuning::effects::PARTICLE_GRAVITY;
        p.life -= 1.0;
        p.life > 0.0
    });
}

fn update_floating_texts(state: &mut GameState) {
    state.floating_texts.retain_mut(|t| {
        t.y -= tuning::effects::TEXT_RISE;
        t.life = t.life.saturating_sub(1);
        t.life > 0
    });
}
