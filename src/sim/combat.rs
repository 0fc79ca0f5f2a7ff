//! Combat resolution
//!
//! Hit detection between the sword/arrow hitboxes and damageable
//! entities, damage application with flash feedback and reward emission,
//! plus the single player-damage path shared by contact, fireballs and
//! pits. Enemies at 0 hp are removed in the same tick that kills them;
//! the active list never holds a dead entry across ticks.

use super::state::{Enemy, EnemyKind, GameEvent, GameState, SoundCue};
use crate::tuning;

/// Patrol movement, weapon hits and contact damage for the regular
/// enemy roster
pub(crate) fn update_enemies(state: &mut GameState) {
    let sword = state.player.sword_hitbox();

    let mut i = 0;
    while i < state.enemies.len() {
        {
            let e = &mut state.enemies[i];
            e.anim_ticks += 1;
            if e.flash_ticks > 0 {
                e.flash_ticks -= 1;
            }

            e.rect.x += e.vx;
            if e.kind == EnemyKind::Bat {
                e.rect.y = e.base_y
                    + (e.anim_ticks as f32 * tuning::bat::FLAP_RATE).sin()
                        * tuning::bat::FLAP_AMPLITUDE;
            }
            if e.rect.x <= e.patrol_left || e.rect.right() >= e.patrol_right {
                e.vx = -e.vx;
            }
        }

        // Sword: damages on every overlapping tick of the swing
        if let Some(hb) = sword
            && hb.intersects(&state.enemies[i].rect)
        {
            let (cx, cy, color) = {
                let e = &mut state.enemies[i];
                e.hp -= 1;
                e.flash_ticks = tuning::effects::HIT_FLASH_TICKS;
                (e.rect.center_x(), e.rect.center_y(), e.color)
            };
            state.trigger_shake(5, 3.0);
            state.spawn_particles(cx, cy, color, 6);
            if state.enemies[i].hp <= 0 {
                let e = state.enemies.remove(i);
                award_enemy_kill(state, &e);
                continue;
            }
        }

        // Arrows are single-use: the first enemy hit consumes the arrow
        let mut killed = false;
        let mut j = 0;
        while j < state.arrows.len() {
            if state.arrows[j].rect.intersects(&state.enemies[i].rect) {
                state.arrows.remove(j);
                let (cx, cy, color) = {
                    let e = &mut state.enemies[i];
                    e.hp -= 1;
                    e.flash_ticks = tuning::effects::HIT_FLASH_TICKS;
                    (e.rect.center_x(), e.rect.center_y(), e.color)
                };
                state.trigger_shake(4, 2.0);
                state.spawn_particles(cx, cy, color, 6);
                if state.enemies[i].hp <= 0 {
                    let e = state.enemies.remove(i);
                    award_enemy_kill(state, &e);
                    killed = true;
                    break;
                }
            } else {
                j += 1;
            }
        }
        if killed {
            continue;
        }

        if state.enemies[i].rect.intersects(&state.player.rect)
            && state.player.invincible_ticks == 0
        {
            hurt_player(state, false);
        }

        i += 1;
    }
}

fn award_enemy_kill(state: &mut GameState, enemy: &Enemy) {
    state.progress.xp += enemy.xp_value;
    state.push_event(GameEvent::ProgressChanged);
    state.spawn_floating_text(
        enemy.rect.x,
        enemy.rect.y - 10.0,
        format!("+{} XP", enemy.xp_value),
        tuning::effects::GOLD,
    );
    state.spawn_particles(
        enemy.rect.center_x(),
        enemy.rect.center_y(),
        enemy.color,
        12,
    );
    state.sound(SoundCue::Hit);
}

/// The one player-damage path. Contact sources respect the invincibility
/// window; pits do not, and also send the player back to spawn.
pub(crate) fn hurt_player(state: &mut GameState, pit: bool) {
    if state.player.invincible_ticks > 0 && !pit {
        return;
    }
    state.progress.lives = state.progress.lives.saturating_sub(1);
    state.push_event(GameEvent::ProgressChanged);
    state.sound(SoundCue::Hit);
    state.trigger_shake(12, 5.0);
    if state.progress.lives == 0 {
        state.trigger_game_over();
        return;
    }
    state.player.invincible_ticks = tuning::player::INVINCIBLE_TICKS;
    if pit {
        state.player.reset();
    }
    let (cx, cy) = (state.player.rect.center_x(), state.player.rect.center_y());
    state.spawn_particles(cx, cy, tuning::effects::DAMAGE_RED, 10);
}

/// Weapon hits, contact damage and the defeat sequence for the boss
pub(crate) fn update_boss_combat(state: &mut GameState) {
    if !state.boss.active {
        return;
    }
    use crate::tuning::boss::*;

    if let Some(hb) = state.player.sword_hitbox()
        && hb.intersects(&state.boss.rect)
        && state.boss.invincible_ticks == 0
    {
        state.boss.hp -= MELEE_DAMAGE;
        state.boss.flash_ticks = tuning::effects::BOSS_FLASH_TICKS;
        state.boss.invincible_ticks = MELEE_INVINCIBLE_TICKS;
        state.trigger_shake(8, 5.0);
        let (cx, cy) = (state.boss.rect.center_x(), state.boss.rect.center_y());
        state.spawn_particles(cx, cy, COLOR, 10);
        state.sound(SoundCue::Hit);
    }

    let mut j = 0;
    while j < state.arrows.len() {
        if state.arrows[j].rect.intersects(&state.boss.rect) && state.boss.invincible_ticks == 0 {
            state.arrows.remove(j);
            state.boss.hp -= ARROW_DAMAGE;
            state.boss.flash_ticks = tuning::effects::BOSS_FLASH_TICKS;
            state.boss.invincible_ticks = ARROW_INVINCIBLE_TICKS;
            state.trigger_shake(5, 3.0);
            let (cx, cy) = (state.boss.rect.center_x(), state.boss.rect.center_y());
            state.spawn_particles(cx, cy, COLOR, 8);
            state.sound(SoundCue::Hit);
        } else {
            j += 1;
        }
    }

    if state.boss.rect.intersects(&state.player.rect) && state.player.invincible_ticks == 0 {
        hurt_player(state, false);
    }

    if state.boss.hp <= 0 {
        state.boss.active = false;
        let (cx, cy) = (state.boss.rect.center_x(), state.boss.rect.center_y());
        state.spawn_particles(cx, cy, COLOR, 30);
        state.spawn_floating_text(
            state.boss.rect.x,
            state.boss.rect.y - 20.0,
            "DRACULA DEFEATED!".to_string(),
            tuning::effects::GOLD,
        );
        state.progress.xp += DEFEAT_XP;
        state.push_event(GameEvent::ProgressChanged);
        state.sound(SoundCue::Win);
        state.trigger_shake(20, 8.0);
        state.boss_defeated = true;
        state.princess_reveal_ticks = tuning::acts::PRINCESS_REVEAL_DELAY;
        state.push_event(GameEvent::BossDefeated);
        log::info!("boss defeated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::acts::ActId;
    use crate::sim::rect::Rect;
    use crate::sim::state::Arrow;
    use crate::tuning;

    fn state_with_slime() -> GameState {
        let mut state = GameState::new(9);
        state.enter_act(ActId::One);
        state.enemies.clear();
        // One slime parked right in front of the player, patrol wide
        // enough that it stays put for a few ticks
        let mut slime = Enemy::slime(state.player.rect.right() + 5.0, state.player.rect.y + 10.0);
        slime.vx = 0.0;
        slime.patrol_left = 0.0;
        slime.patrol_right = WORLD_W;
        state.enemies.push(slime);
        state
    }

    #[test]
    fn test_slime_dies_to_two_melee_ticks() {
        let mut state = state_with_slime();
        state.player.sword_ticks = 5;

        update_enemies(&mut state);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].hp, 1);
        assert_eq!(
            state.enemies[0].flash_ticks,
            tuning::effects::HIT_FLASH_TICKS
        );

        update_enemies(&mut state);
        assert!(state.enemies.is_empty());
        assert_eq!(state.progress.xp, tuning::slime::XP);
        let texts: Vec<_> = state.floating_texts.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["+15 XP"]);
    }

    #[test]
    fn test_dead_enemies_never_linger() {
        let mut state = state_with_slime();
        state.player.sword_ticks = 5;
        for _ in 0..4 {
            update_enemies(&mut state);
            assert!(state.enemies.iter().all(|e| e.hp > 0));
        }
    }

    #[test]
    fn test_arrow_is_single_use() {
        let mut state = state_with_slime();
        // Slime has 2 hp; one arrow overlapping it
        let target = state.enemies[0].rect;
        state.arrows.push(Arrow {
            rect: Rect::new(target.x, target.y + 5.0, 14.0, 3.0),
            vx: 9.0,
            life_ticks: 60,
        });

        update_enemies(&mut state);

        assert!(state.arrows.is_empty());
        assert_eq!(state.enemies[0].hp, 1);
        assert_eq!(state.progress.xp, 0);
    }

    #[test]
    fn test_arrow_kill_awards_bat_xp() {
        let mut state = GameState::new(9);
        state.enter_act(ActId::Two);
        state.enemies.clear();
        let mut bat = Enemy::bat(400.0, 100.0);
        bat.vx = 0.0;
        bat.patrol_left = 0.0;
        bat.patrol_right = WORLD_W;
        // Park the player far away so contact can't interfere
        state.player.rect.x = 60.0;
        state.enemies.push(bat);
        state.arrows.push(Arrow {
            rect: Rect::new(400.0, 100.0 + 5.0, 14.0, 3.0),
            vx: 9.0,
            life_ticks: 60,
        });

        update_enemies(&mut state);

        assert!(state.enemies.is_empty());
        assert_eq!(state.progress.xp, tuning::bat::XP);
    }

    #[test]
    fn test_contact_damage_grants_invincibility() {
        let mut state = state_with_slime();
        state.enemies[0].rect = state.player.rect;

        update_enemies(&mut state);
        assert_eq!(state.progress.lives, 2);
        assert_eq!(
            state.player.invincible_ticks,
            tuning::player::INVINCIBLE_TICKS
        );
        // Position is NOT reset on contact damage
        assert_eq!(state.player.rect.x, tuning::player::SPAWN_X);

        // Still overlapping next tick: the window blocks a second hit
        update_enemies(&mut state);
        assert_eq!(state.progress.lives, 2);
    }

    #[test]
    fn test_pit_fall_bypasses_invincibility_and_resets() {
        let mut state = state_with_slime();
        state.player.invincible_ticks = 50;
        state.player.rect.x = 400.0;
        state.player.rect.y = PIT_Y + 1.0;
        let xp_before = state.progress.xp;

        hurt_player(&mut state, true);

        assert_eq!(state.progress.lives, 2);
        assert_eq!(state.player.rect.x, tuning::player::SPAWN_X);
        assert_eq!(state.player.rect.y, tuning::player::SPAWN_Y);
        assert_eq!(state.progress.xp, xp_before);
    }

    #[test]
    fn test_last_life_is_game_over() {
        let mut state = state_with_slime();
        state.progress.lives = 1;

        hurt_player(&mut state, false);

        assert_eq!(state.progress.lives, 0);
        assert_eq!(state.phase, crate::sim::state::GamePhase::GameOver);
        assert!(state.drain_events().contains(&GameEvent::GameOver));
    }

    fn boss_state() -> GameState {
        let mut state = GameState::new(9);
        state.enter_act(ActId::Three);
        // Boss away from the player so contact stays out of the picture,
        // player standing on the arena floor at boss height
        state.boss.rect.x = 400.0;
        state.player.rect.x = 60.0;
        state.player.rect.y = GROUND_Y - state.player.rect.h;
        state
    }

    #[test]
    fn test_boss_melee_damage_and_grace_window() {
        let mut state = boss_state();
        state.player.rect.x = state.boss.rect.x - state.player.rect.w - 10.0;
        state.player.facing = crate::sim::state::Facing::Right;
        state.player.sword_ticks = 8;

        update_boss_combat(&mut state);
        assert_eq!(state.boss.hp, tuning::boss::HP - tuning::boss::MELEE_DAMAGE);
        assert_eq!(
            state.boss.invincible_ticks,
            tuning::boss::MELEE_INVINCIBLE_TICKS
        );

        // Second tick of the same swing is absorbed by the window
        update_boss_combat(&mut state);
        assert_eq!(state.boss.hp, tuning::boss::HP - tuning::boss::MELEE_DAMAGE);
    }

    #[test]
    fn test_boss_arrow_damage() {
        let mut state = boss_state();
        state.arrows.push(Arrow {
            rect: Rect::new(state.boss.rect.x, state.boss.rect.y + 10.0, 14.0, 3.0),
            vx: 9.0,
            life_ticks: 60,
        });

        update_boss_combat(&mut state);

        assert!(state.arrows.is_empty());
        assert_eq!(state.boss.hp, tuning::boss::HP - tuning::boss::ARROW_DAMAGE);
        assert_eq!(
            state.boss.invincible_ticks,
            tuning::boss::ARROW_INVINCIBLE_TICKS
        );
    }

    #[test]
    fn test_boss_defeat_sequence() {
        let mut state = boss_state();
        state.boss.hp = 2;
        state.player.rect.x = state.boss.rect.x - state.player.rect.w - 10.0;
        state.player.facing = crate::sim::state::Facing::Right;
        state.player.sword_ticks = 8;
        let xp_before = state.progress.xp;

        update_boss_combat(&mut state);

        assert!(!state.boss.active);
        assert!(state.boss_defeated);
        assert_eq!(state.progress.xp, xp_before + tuning::boss::DEFEAT_XP);
        assert_eq!(
            state.princess_reveal_ticks,
            tuning::acts::PRINCESS_REVEAL_DELAY
        );
        assert!(!state.princess.visible);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::BossDefeated));
        assert!(
            state
                .floating_texts
                .iter()
                .any(|t| t.text == "DRACULA DEFEATED!")
        );
    }

    #[test]
    fn test_experience_only_increases() {
        let mut state = state_with_slime();
        let mut last = state.progress.xp;
        state.player.sword_ticks = 12;
        for _ in 0..20 {
            update_enemies(&mut state);
            assert!(state.progress.xp >= last);
            last = state.progress.xp;
        }
    }
}
