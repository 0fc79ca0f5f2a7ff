//! Player physics and platform collision resolution
//!
//! Velocity integration is explicit Euler at 60 Hz. Collision
//! classification compares the pre-step position (implied by
//! `position - velocity`) against platform edges, so a fast fall still
//! reads as a landing rather than a side hit. Exactly one classification
//! applies per overlapping platform; landing and ceiling take priority
//! over side resolution.

use super::combat;
use super::rect::Rect;
use super::state::{Arrow, Facing, GameState, SoundCue};
use super::tick::TickInput;
use crate::consts::*;
use crate::tuning;
use crate::tuning::collision::{SIDE_TOLERANCE, VERTICAL_TOLERANCE};

pub(crate) fn update_player(state: &mut GameState, input: &TickInput) {
    let Some(act) = state.phase.act() else { return };
    let config = act.config();

    // Held-direction acceleration; friction below is the only speed cap
    if input.left {
        state.player.vx -= tuning::player::ACCEL;
        state.player.facing = Facing::Left;
    }
    if input.right {
        state.player.vx += tuning::player::ACCEL;
        state.player.facing = Facing::Right;
    }

    // Jumping spends one air charge per release-then-press edge
    if input.jump {
        if state.player.jump_released && state.player.jumps_left > 0 {
            state.player.vy = tuning::player::JUMP_FORCE;
            state.player.on_ground = false;
            state.player.jumps_left -= 1;
            state.player.jump_released = false;
            state.sound(SoundCue::Jump);
        }
    } else {
        state.player.jump_released = true;
    }

    if state.attack_cooldown > 0 {
        state.attack_cooldown -= 1;
    }
    if input.attack && state.attack_cooldown == 0 {
        if config.bow {
            spawn_arrow(state);
            state.attack_cooldown = tuning::arrow::COOLDOWN;
            // In the boss act the swing rides along with the shot
            if config.sword {
                state.player.sword_ticks = tuning::sword::COMBO_SWING_TICKS;
            }
        } else if config.sword {
            state.player.sword_ticks = tuning::sword::SWING_TICKS;
            state.attack_cooldown = tuning::sword::COOLDOWN;
            state.sound(SoundCue::Sword);
        }
    }

    let p = &mut state.player;
    p.vy += tuning::player::GRAVITY;
    p.vx *= tuning::player::FRICTION;
    p.rect.x += p.vx;
    p.rect.y += p.vy;

    if p.sword_ticks > 0 {
        p.sword_ticks -= 1;
    }
    if p.invincible_ticks > 0 {
        p.invincible_ticks -= 1;
    }

    p.on_ground = false;
    for platform in &state.platforms {
        if !p.rect.intersects(platform) {
            continue;
        }
        if p.vy > 0.0 && p.rect.bottom() - p.vy <= platform.y + VERTICAL_TOLERANCE {
            // Landing
            p.rect.y = platform.y - p.rect.h;
            p.vy = 0.0;
            p.on_ground = true;
            p.jumps_left = tuning::player::MAX_JUMPS;
        } else if p.vy < 0.0 && p.rect.y - p.vy >= platform.bottom() - VERTICAL_TOLERANCE {
            // Ceiling
            p.rect.y = platform.bottom();
            p.vy = 0.0;
        } else if p.vx > 0.0 && p.rect.right() - p.vx <= platform.x + SIDE_TOLERANCE {
            p.rect.x = platform.x - p.rect.w;
            p.vx = 0.0;
        } else if p.vx < 0.0 && p.rect.x - p.vx >= platform.right() - SIDE_TOLERANCE {
            p.rect.x = platform.right();
            p.vx = 0.0;
        }
    }

    // The world edges are walls
    if p.rect.x < 0.0 {
        p.rect.x = 0.0;
        p.vx = 0.0;
    }
    if p.rect.right() > WORLD_W {
        p.rect.x = WORLD_W - p.rect.w;
        p.vx = 0.0;
    }

    p.anim_ticks += 1;
    if p.anim_ticks > tuning::player::ANIM_PERIOD {
        p.anim_ticks = 0;
        p.anim_frame = (p.anim_frame + 1) % 4;
    }

    // Pits bypass invincibility
    if state.player.rect.y > PIT_Y {
        combat::hurt_player(state, true);
    }
}

fn spawn_arrow(state: &mut GameState) {
    state.sound(SoundCue::Arrow);
    let p = &state.player;
    let x = match p.facing {
        Facing::Right => p.rect.right(),
        Facing::Left => p.rect.x - 8.0,
    };
    state.arrows.push(Arrow {
        rect: Rect::new(
            x,
            p.rect.y + tuning::arrow::OFFSET_Y,
            tuning::arrow::WIDTH,
            tuning::arrow::HEIGHT,
        ),
        vx: p.facing.sign() * tuning::arrow::SPEED,
        life_ticks: tuning::arrow::LIFE_TICKS,
    });
}

/// Landing-only resolution shared with the boss: stops on top surfaces,
/// ignores ceilings and sides.
pub(crate) fn land_on_platforms(rect: &mut Rect, vy: &mut f32, platforms: &[Rect]) -> bool {
    let mut landed = false;
    for platform in platforms {
        if rect.intersects(platform)
            && *vy > 0.0
            && rect.bottom() - *vy <= platform.y + VERTICAL_TOLERANCE
        {
            rect.y = platform.y - rect.h;
            *vy = 0.0;
            landed = true;
        }
    }
    landed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::acts::ActId;

    fn act1_state() -> GameState {
        let mut state = GameState::new(42);
        state.enter_act(ActId::One);
        state
    }

    fn held(left: bool, right: bool, jump: bool) -> TickInput {
        TickInput {
            left,
            right,
            jump,
            attack: false,
            restart: false,
        }
    }

    #[test]
    fn test_gravity_and_friction() {
        let mut state = act1_state();
        state.player.rect.y = 100.0;
        state.player.vx = 10.0;
        let vy0 = state.player.vy;

        update_player(&mut state, &TickInput::default());

        assert_eq!(state.player.vy, vy0 + tuning::player::GRAVITY);
        assert!((state.player.vx - 10.0 * tuning::player::FRICTION).abs() < 1e-5);
    }

    #[test]
    fn test_landing_zeroes_fall_and_restores_jumps() {
        let mut state = act1_state();
        // Just above the first ground slab, falling
        state.player.rect.x = 100.0;
        state.player.rect.y = GROUND_Y - state.player.rect.h - 1.0;
        state.player.vy = 5.0;
        state.player.jumps_left = 0;

        update_player(&mut state, &TickInput::default());

        assert!(state.player.on_ground);
        assert_eq!(state.player.vy, 0.0);
        assert_eq!(state.player.rect.bottom(), GROUND_Y);
        assert_eq!(state.player.jumps_left, tuning::player::MAX_JUMPS);
    }

    #[test]
    fn test_ceiling_hit_zeroes_upward_velocity() {
        let mut state = act1_state();
        state.platforms = vec![Rect::new(0.0, 100.0, 800.0, 16.0)];
        state.player.rect.x = 50.0;
        state.player.rect.y = 117.0;
        state.player.vy = -6.0;

        update_player(&mut state, &TickInput::default());

        assert_eq!(state.player.vy, 0.0);
        assert_eq!(state.player.rect.y, 116.0);
        assert!(!state.player.on_ground);
    }

    #[test]
    fn test_side_hit_clamps_to_edge() {
        let mut state = act1_state();
        // A wall-ish block ahead, player running right into it at foot level
        state.platforms = vec![
            Rect::new(0.0, GROUND_Y, 800.0, GROUND_H),
            Rect::new(300.0, 400.0, 40.0, 60.0),
        ];
        state.player.rect.x = 272.0;
        state.player.rect.y = 410.0;
        state.player.vx = 6.0;
        state.player.vy = 0.0;

        update_player(&mut state, &TickInput::default());

        assert_eq!(state.player.rect.right(), 300.0);
        assert_eq!(state.player.vx, 0.0);
    }

    #[test]
    fn test_double_jump_requires_release_edge() {
        let mut state = act1_state();
        state.player.on_ground = true;

        // First press: one charge spent
        update_player(&mut state, &held(false, false, true));
        assert_eq!(state.player.jumps_left, 1);
        let vy_after_first = state.player.vy;
        assert!(vy_after_first < 0.0);

        // Held across ticks: no second jump
        update_player(&mut state, &held(false, false, true));
        update_player(&mut state, &held(false, false, true));
        assert_eq!(state.player.jumps_left, 1);

        // Release, then press again: second charge
        update_player(&mut state, &held(false, false, false));
        update_player(&mut state, &held(false, false, true));
        assert_eq!(state.player.jumps_left, 0);

        // No charges left; a third edge does nothing
        update_player(&mut state, &held(false, false, false));
        update_player(&mut state, &held(false, false, true));
        assert_eq!(state.player.jumps_left, 0);
    }

    #[test]
    fn test_world_bounds_clamp() {
        let mut state = act1_state();
        state.player.rect.x = 1.0;
        state.player.vx = -50.0;
        update_player(&mut state, &held(true, false, false));
        assert_eq!(state.player.rect.x, 0.0);
        assert_eq!(state.player.vx, 0.0);

        state.player.rect.x = WORLD_W - state.player.rect.w - 1.0;
        state.player.vx = 50.0;
        update_player(&mut state, &held(false, true, false));
        assert_eq!(state.player.rect.right(), WORLD_W);
    }

    #[test]
    fn test_sword_swing_in_act_one() {
        let mut state = act1_state();
        let input = TickInput {
            attack: true,
            ..Default::default()
        };
        update_player(&mut state, &input);
        // Armed this tick, minus the same-tick decrement
        assert_eq!(state.player.sword_ticks, tuning::sword::SWING_TICKS - 1);
        assert_eq!(state.attack_cooldown, tuning::sword::COOLDOWN);
        assert!(state.arrows.is_empty());
    }

    #[test]
    fn test_bow_in_act_two_and_combo_in_act_three() {
        let mut state = GameState::new(42);
        state.enter_act(ActId::Two);
        let input = TickInput {
            attack: true,
            ..Default::default()
        };
        update_player(&mut state, &input);
        assert_eq!(state.arrows.len(), 1);
        assert_eq!(state.player.sword_ticks, 0);
        assert_eq!(state.arrows[0].vx, tuning::arrow::SPEED);

        let mut state = GameState::new(42);
        state.enter_act(ActId::Three);
        update_player(&mut state, &input);
        assert_eq!(state.arrows.len(), 1);
        assert_eq!(
            state.player.sword_ticks,
            tuning::sword::COMBO_SWING_TICKS - 1
        );
    }

    #[test]
    fn test_attack_cooldown_blocks_repeat() {
        let mut state = act1_state();
        let input = TickInput {
            attack: true,
            ..Default::default()
        };
        update_player(&mut state, &input);
        let swing = state.player.sword_ticks;
        update_player(&mut state, &input);
        // Still the first swing winding down, not a fresh one
        assert_eq!(state.player.sword_ticks, swing - 1);
    }

    #[test]
    fn test_collision_containment_over_a_fall() {
        // Drop from high up; after every resolved tick the player must not
        // be inside any platform beyond the tolerance band
        let mut state = act1_state();
        state.player.rect.x = 100.0;
        state.player.rect.y = 0.0;
        for _ in 0..300 {
            update_player(&mut state, &TickInput::default());
            for platform in &state.platforms {
                if state.player.rect.intersects(platform) {
                    let overlap = state.player.rect.bottom() - platform.y;
                    assert!(
                        overlap <= VERTICAL_TOLERANCE,
                        "player sank {overlap}px into a platform"
                    );
                }
            }
        }
        assert!(state.player.on_ground);
    }

    #[test]
    fn test_boss_landing_helper() {
        let platforms = vec![Rect::new(0.0, 460.0, 800.0, 40.0)];
        let mut rect = Rect::new(100.0, 460.0 - 56.0 - 1.0, 36.0, 56.0);
        let mut vy = 4.0;
        rect.y += vy;

        assert!(land_on_platforms(&mut rect, &mut vy, &platforms));
        assert_eq!(rect.bottom(), 460.0);
        assert_eq!(vy, 0.0);

        // Rising through from below is ignored
        let mut rect = Rect::new(100.0, 470.0, 36.0, 56.0);
        let mut vy = -4.0;
        assert!(!land_on_platforms(&mut rect, &mut vy, &platforms));
    }
}
