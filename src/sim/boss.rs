//! Dracula's behavior state machine
//!
//! idle → (roll) → teleport → idle, or idle → (roll) → attack → idle.
//! Rolls are gated by per-move cooldowns that re-arm on trigger,
//! independent of outcome. Phase side effects fire on exact values of
//! the phase-local tick counter, exactly once per phase instance.

use glam::Vec2;
use rand::Rng;

use super::physics::land_on_platforms;
use super::state::{BossPhase, Fireball, GameState, SoundCue, is_floating};
use crate::consts::*;
use crate::tuning;
use crate::tuning::boss::*;

pub(crate) fn update_boss(state: &mut GameState) {
    if !state.boss.active {
        return;
    }

    if state.boss.flash_ticks > 0 {
        state.boss.flash_ticks -= 1;
    }
    if state.boss.invincible_ticks > 0 {
        state.boss.invincible_ticks -= 1;
    }
    if state.boss.teleport_cooldown > 0 {
        state.boss.teleport_cooldown -= 1;
    }
    if state.boss.attack_cooldown > 0 {
        state.boss.attack_cooldown -= 1;
    }
    state.boss.phase_ticks += 1;

    let phase = state.boss.phase;
    match phase {
        BossPhase::Idle => {
            // Sign-only drift toward the player
            let dx = state.player.rect.x - state.boss.rect.x;
            if dx > 0.0 {
                state.boss.rect.x += DRIFT_SPEED;
            } else if dx < 0.0 {
                state.boss.rect.x -= DRIFT_SPEED;
            }

            if state.boss.teleport_cooldown == 0 && state.rng.random::<f32>() < TELEPORT_CHANCE {
                state.boss.phase = BossPhase::Teleport;
                state.boss.phase_ticks = 0;
                state.boss.teleport_cooldown = TELEPORT_COOLDOWN;
                let (cx, cy) = (state.boss.rect.center_x(), state.boss.rect.center_y());
                state.spawn_particles(cx, cy, COLOR, 15);
                state.sound(SoundCue::Boss);
            }
            if state.boss.attack_cooldown == 0 && state.rng.random::<f32>() < ATTACK_CHANCE {
                state.boss.phase = BossPhase::Attack;
                state.boss.phase_ticks = 0;
                state.boss.attack_cooldown = ATTACK_COOLDOWN;
            }
        }

        BossPhase::Teleport => {
            if state.boss.phase_ticks == TELEPORT_RELOCATE_TICK {
                relocate(state);
                let (cx, cy) = (state.boss.rect.center_x(), state.boss.rect.center_y());
                state.spawn_particles(cx, cy, COLOR, 15);
            }
            if state.boss.phase_ticks > TELEPORT_PHASE_TICKS {
                state.boss.phase = BossPhase::Idle;
                state.boss.phase_ticks = 0;
            }
        }

        BossPhase::Attack => {
            if state.boss.phase_ticks == ATTACK_FIRE_TICK {
                let target = Vec2::new(
                    state.player.rect.center_x(),
                    state.player.rect.center_y(),
                );
                fire(state, target);
                state.sound(SoundCue::Boss);
            }
            // Enraged: a wider spread aimed at where the player just was
            if state.boss.phase_ticks == ENRAGE_FIRE_TICK && state.boss.enraged() {
                let px = state.player.rect.center_x();
                let py = state.player.rect.y;
                fire(state, Vec2::new(px + ENRAGE_SPREAD_X, py));
                fire(state, Vec2::new(px - ENRAGE_SPREAD_X, py));
            }
            if state.boss.phase_ticks > ATTACK_PHASE_TICKS {
                state.boss.phase = BossPhase::Idle;
                state.boss.phase_ticks = 0;
            }
        }
    }

    // Same gravity/landing treatment as the player, landings only
    state.boss.vy += tuning::player::GRAVITY * GRAVITY_SCALE;
    state.boss.rect.y += state.boss.vy;
    land_on_platforms(&mut state.boss.rect, &mut state.boss.vy, &state.platforms);

    // Safety net: never lose the boss down a pit
    if state.boss.rect.y > WORLD_H {
        state.boss.rect.y = FALL_RESET_Y;
        state.boss.vy = 0.0;
    }
}

/// Reappear centered on a random floating platform, or over a random
/// stretch of ground when an arena has none
fn relocate(state: &mut GameState) {
    let targets: Vec<_> = state
        .platforms
        .iter()
        .copied()
        .filter(|p| is_floating(p))
        .collect();
    if targets.is_empty() {
        state.boss.rect.x = state.rng.random_range(TELEPORT_MIN_X..TELEPORT_MAX_X);
        state.boss.rect.y = GROUND_Y - state.boss.rect.h;
    } else {
        let platform = targets[state.rng.random_range(0..targets.len())];
        state.boss.rect.x = platform.center_x() - state.boss.rect.w / 2.0;
        state.boss.rect.y = platform.y - state.boss.rect.h;
    }
}

fn fire(state: &mut GameState, target: Vec2) {
    let x = state.boss.rect.center_x();
    let y = state.boss.rect.y + 10.0;
    state.fireballs.push(Fireball::aimed(x, y, target));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::acts::ActId;
    use crate::sim::rect::Rect;

    fn arena() -> GameState {
        let mut state = GameState::new(1234);
        state.enter_act(ActId::Three);
        state
    }

    #[test]
    fn test_idle_drifts_toward_player() {
        let mut state = arena();
        // High cooldowns so no roll can leave idle
        state.boss.teleport_cooldown = 10_000;
        state.boss.attack_cooldown = 10_000;

        state.player.rect.x = 60.0;
        let x0 = state.boss.rect.x;
        update_boss(&mut state);
        assert_eq!(state.boss.rect.x, x0 - DRIFT_SPEED);

        state.player.rect.x = 790.0;
        let x1 = state.boss.rect.x;
        update_boss(&mut state);
        assert_eq!(state.boss.rect.x, x1 + DRIFT_SPEED);
    }

    #[test]
    fn test_cooldowns_pin_the_boss_in_idle() {
        let mut state = arena();
        state.boss.teleport_cooldown = 10_000;
        state.boss.attack_cooldown = 10_000;
        for _ in 0..200 {
            update_boss(&mut state);
            assert_eq!(state.boss.phase, BossPhase::Idle);
        }
    }

    #[test]
    fn test_boss_eventually_leaves_idle_once_off_cooldown() {
        let mut state = arena();
        state.boss.teleport_cooldown = 0;
        state.boss.attack_cooldown = 0;
        let mut left_idle = false;
        for _ in 0..2000 {
            update_boss(&mut state);
            if state.boss.phase != BossPhase::Idle {
                left_idle = true;
                break;
            }
        }
        assert!(left_idle, "boss never rolled a phase change in 2000 ticks");
    }

    #[test]
    fn test_teleport_relocates_on_exact_tick() {
        let mut state = arena();
        state.boss.phase = BossPhase::Teleport;
        state.boss.phase_ticks = TELEPORT_RELOCATE_TICK - 1;

        update_boss(&mut state);

        // Landed centered on one of the arena's floating platforms
        let on_a_platform = state
            .platforms
            .iter()
            .filter(|p| is_floating(p))
            .any(|p| {
                (state.boss.rect.center_x() - p.center_x()).abs() < 0.5
                    && (state.boss.rect.bottom() - p.y).abs() < 2.0
            });
        assert!(on_a_platform);
        assert!(!state.particles.is_empty());
    }

    #[test]
    fn test_teleport_without_floating_platforms_uses_ground() {
        let mut state = arena();
        state.platforms = vec![Rect::new(0.0, GROUND_Y, WORLD_W, GROUND_H)];
        state.boss.phase = BossPhase::Teleport;
        state.boss.phase_ticks = TELEPORT_RELOCATE_TICK - 1;

        update_boss(&mut state);

        assert!(state.boss.rect.x >= TELEPORT_MIN_X);
        assert!(state.boss.rect.x < TELEPORT_MAX_X);
        assert_eq!(state.boss.rect.bottom(), GROUND_Y);
    }

    #[test]
    fn test_teleport_phase_ends_after_its_window() {
        let mut state = arena();
        state.boss.phase = BossPhase::Teleport;
        state.boss.phase_ticks = TELEPORT_PHASE_TICKS;

        update_boss(&mut state);

        assert_eq!(state.boss.phase, BossPhase::Idle);
        assert_eq!(state.boss.phase_ticks, 0);
    }

    #[test]
    fn test_attack_fires_once_at_the_telegraph_tick() {
        let mut state = arena();
        state.boss.phase = BossPhase::Attack;
        state.boss.phase_ticks = ATTACK_FIRE_TICK - 1;

        update_boss(&mut state);
        assert_eq!(state.fireballs.len(), 1);

        update_boss(&mut state);
        assert_eq!(state.fireballs.len(), 1);
    }

    #[test]
    fn test_attack_aims_at_player_center() {
        let mut state = arena();
        state.player.rect.x = 60.0;
        state.boss.rect.x = 600.0;
        state.boss.phase = BossPhase::Attack;
        state.boss.phase_ticks = ATTACK_FIRE_TICK - 1;

        update_boss(&mut state);

        // Player is to the left; the shot heads left
        assert!(state.fireballs[0].vel.x < 0.0);
    }

    #[test]
    fn test_enrage_adds_spread_below_half_hp() {
        let mut state = arena();
        state.boss.hp = 10;
        state.boss.phase = BossPhase::Attack;
        state.boss.phase_ticks = ENRAGE_FIRE_TICK - 1;

        update_boss(&mut state);
        assert_eq!(state.fireballs.len(), 2);

        // At full health the same tick fires nothing extra
        let mut state = arena();
        state.boss.phase = BossPhase::Attack;
        state.boss.phase_ticks = ENRAGE_FIRE_TICK - 1;
        update_boss(&mut state);
        assert!(state.fireballs.is_empty());
    }

    #[test]
    fn test_attack_phase_ends_after_its_window() {
        let mut state = arena();
        state.boss.phase = BossPhase::Attack;
        state.boss.phase_ticks = ATTACK_PHASE_TICKS;

        update_boss(&mut state);

        assert_eq!(state.boss.phase, BossPhase::Idle);
    }

    #[test]
    fn test_boss_lands_on_the_arena_floor() {
        let mut state = arena();
        state.boss.teleport_cooldown = 10_000;
        state.boss.attack_cooldown = 10_000;
        state.boss.rect.y = GROUND_Y - state.boss.rect.h - 30.0;
        state.boss.vy = 0.0;
        for _ in 0..120 {
            update_boss(&mut state);
        }
        assert_eq!(state.boss.rect.bottom(), GROUND_Y);
        assert_eq!(state.boss.vy, 0.0);
    }

    #[test]
    fn test_fall_safety_reset() {
        let mut state = arena();
        state.boss.teleport_cooldown = 10_000;
        state.boss.attack_cooldown = 10_000;
        state.platforms.clear();
        state.boss.rect.y = WORLD_H + 10.0;

        update_boss(&mut state);

        assert_eq!(state.boss.rect.y, FALL_RESET_Y);
        assert_eq!(state.boss.vy, 0.0);
    }

    #[test]
    fn test_inactive_boss_does_nothing() {
        let mut state = arena();
        state.boss.active = false;
        let before = state.boss.clone();
        update_boss(&mut state);
        assert_eq!(state.boss.rect, before.rect);
        assert_eq!(state.boss.phase_ticks, before.phase_ticks);
    }
}
