//! Canvas-2d frame drawing
//!
//! A pure read of simulation state; nothing here mutates the game.
//! Shapes reproduce gameplay geometry (hitboxes, platforms, telegraphs);
//! art stays at flat fills.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{Background, EnemyKind, Facing, GamePhase, GameState, is_floating};
use crate::tuning;

/// Draw one frame of the current state
pub fn draw(ctx: &CanvasRenderingContext2d, state: &GameState, settings: &Settings) {
    ctx.save();

    if settings.effective_screen_shake() && state.shake_ticks > 0 {
        let mag = state.shake_mag as f64;
        let _ = ctx.translate(
            (js_sys::Math::random() - 0.5) * mag * 2.0,
            (js_sys::Math::random() - 0.5) * mag * 2.0,
        );
    }

    ctx.clear_rect(
        -10.0,
        -10.0,
        WORLD_W as f64 + 20.0,
        WORLD_H as f64 + 20.0,
    );

    match state.phase {
        GamePhase::Act(act) => draw_act(ctx, state, act, settings),
        // Title/game-over/victory backdrops; the overlay text itself is DOM
        _ => fill_rect(ctx, 0.0, 0.0, WORLD_W, WORLD_H, "#0A0A2E"),
    }

    ctx.restore();
}

fn draw_act(
    ctx: &CanvasRenderingContext2d,
    state: &GameState,
    act: crate::sim::ActId,
    settings: &Settings,
) {
    let config = act.config();

    let sky = match config.background {
        Background::Morning => "#87CEEB",
        Background::Dusk => "#FF8C61",
        Background::Night => "#0A0A2E",
    };
    fill_rect(ctx, 0.0, 0.0, WORLD_W, WORLD_H, sky);

    let (ground_lip, ground_body, floating) = match config.background {
        Background::Morning => ("#4A8C3F", "#6B4226", "#7B5B3A"),
        Background::Dusk => ("#8B6914", "#5C4033", "#8B7355"),
        Background::Night => ("#3A3A5C", "#2A2A3E", "#4A4A6C"),
    };
    for p in &state.platforms {
        if is_floating(p) {
            fill_rect(ctx, p.x, p.y, p.w, p.h, floating);
        } else {
            fill_rect(ctx, p.x, p.y, p.w, 8.0, ground_lip);
            fill_rect(ctx, p.x, p.y + 8.0, p.w, p.h - 8.0, ground_body);
        }
    }

    if state.princess.visible {
        let p = &state.princess.rect;
        fill_rect(ctx, p.x + 2.0, p.y + 14.0, p.w - 4.0, p.h - 14.0, "#FFFF00");
        fill_rect(ctx, p.x + 4.0, p.y, 12.0, 12.0, "#FFCCAA");
        fill_rect(ctx, p.x + 4.0, p.y - 4.0, 12.0, 5.0, "#FFD700");
    }

    draw_boss(ctx, state);

    for e in &state.enemies {
        let color = if e.flash_ticks > 0 { "#FFFFFF" } else { e.color };
        fill_rect(ctx, e.rect.x, e.rect.y, e.rect.w, e.rect.h, color);
        if e.kind == EnemyKind::Slime {
            fill_rect(ctx, e.rect.x + 5.0, e.rect.y + 6.0, 4.0, 4.0, "#000000");
            fill_rect(ctx, e.rect.x + 14.0, e.rect.y + 6.0, 4.0, 4.0, "#000000");
        } else {
            fill_rect(ctx, e.rect.x + 10.0, e.rect.y + 6.0, 2.0, 2.0, "#FF0000");
            fill_rect(ctx, e.rect.x + 15.0, e.rect.y + 6.0, 2.0, 2.0, "#FF0000");
        }
    }

    ctx.set_fill_style_str("#FFDD44");
    for a in &state.arrows {
        ctx.fill_rect(
            a.rect.x as f64,
            a.rect.y as f64,
            a.rect.w as f64,
            a.rect.h as f64,
        );
    }

    for f in &state.fireballs {
        let (cx, cy) = (f.rect.center_x() as f64, f.rect.center_y() as f64);
        fill_circle(ctx, cx, cy, 12.0, "rgba(255,100,0,0.3)");
        fill_circle(ctx, cx, cy, 6.0, "#FF4400");
        fill_circle(ctx, cx, cy, 3.0, "#FFAA00");
    }

    draw_player(ctx, state);

    if settings.particles {
        for p in &state.particles {
            ctx.set_global_alpha((p.life / tuning::effects::PARTICLE_FADE_LIFE).min(1.0) as f64);
            fill_rect(ctx, p.pos.x, p.pos.y, p.size, p.size, p.color);
        }
        ctx.set_global_alpha(1.0);
    }

    ctx.set_font("bold 14px 'Courier New'");
    ctx.set_text_align("center");
    for t in &state.floating_texts {
        ctx.set_global_alpha((t.life as f64) / tuning::effects::TEXT_LIFE_TICKS as f64);
        ctx.set_fill_style_str(t.color);
        let _ = ctx.fill_text(&t.text, t.x as f64, t.y as f64);
    }
    ctx.set_global_alpha(1.0);

    draw_exit_indicator(ctx, state, act);
    draw_banner(ctx, state);
}

fn draw_player(ctx: &CanvasRenderingContext2d, state: &GameState) {
    let p = &state.player;
    // Invincibility blink
    if p.invincible_ticks > 0 && (p.invincible_ticks / 3) % 2 == 0 {
        return;
    }
    let r = &p.rect;
    // Body and helmet
    fill_rect(ctx, r.x + 2.0, r.y + 12.0, r.w - 4.0, 16.0, "#4488CC");
    fill_rect(ctx, r.x + 4.0, r.y, r.w - 8.0, 14.0, "#AAAAAA");
    // Legs
    fill_rect(ctx, r.x + 4.0, r.y + 28.0, 7.0, 8.0, "#335577");
    fill_rect(ctx, r.x + 13.0, r.y + 28.0, 7.0, 8.0, "#335577");
    // The actual melee hitbox, drawn as the blade
    if let Some(hb) = p.sword_hitbox() {
        let blade_x = match p.facing {
            Facing::Right => hb.x,
            Facing::Left => hb.x + 4.0,
        };
        fill_rect(ctx, blade_x, hb.y + 6.0, hb.w - 4.0, 4.0, "#CCCCCC");
    }
}

fn draw_boss(ctx: &CanvasRenderingContext2d, state: &GameState) {
    let boss = &state.boss;
    if !boss.active || boss.hidden() {
        return;
    }
    let flash = boss.flash_ticks > 0 && (boss.flash_ticks / 2) % 2 == 0;
    let r = &boss.rect;
    // Cape, body, head
    fill_rect(
        ctx,
        r.x - 4.0,
        r.y + 10.0,
        r.w + 8.0,
        r.h - 10.0,
        if flash { "#FFFFFF" } else { "#880000" },
    );
    fill_rect(
        ctx,
        r.x + 4.0,
        r.y + 8.0,
        r.w - 8.0,
        r.h - 16.0,
        if flash { "#FFFFFF" } else { "#222222" },
    );
    fill_rect(
        ctx,
        r.x + 8.0,
        r.y,
        20.0,
        16.0,
        if flash { "#FFFFFF" } else { "#DDCCCC" },
    );
    fill_rect(ctx, r.x + 12.0, r.y + 5.0, 4.0, 4.0, "#FF0000");
    fill_rect(ctx, r.x + 20.0, r.y + 5.0, 4.0, 4.0, "#FF0000");

    // HP bar
    let bar_w = 60.0;
    let bar_x = r.center_x() - bar_w / 2.0;
    let bar_y = r.y - 14.0;
    let frac = (boss.hp.max(0) as f32) / boss.max_hp as f32;
    fill_rect(ctx, bar_x, bar_y, bar_w, 6.0, "#333333");
    fill_rect(ctx, bar_x, bar_y, bar_w * frac, 6.0, "#FF0000");
    ctx.set_stroke_style_str("#000000");
    ctx.stroke_rect(bar_x as f64, bar_y as f64, bar_w as f64, 6.0);

    ctx.set_fill_style_str("#FF0000");
    ctx.set_font("bold 16px 'Courier New'");
    ctx.set_text_align("center");
    let _ = ctx.fill_text("COUNT DRACULA", WORLD_W as f64 / 2.0, 30.0);
}

fn draw_exit_indicator(
    ctx: &CanvasRenderingContext2d,
    state: &GameState,
    act: crate::sim::ActId,
) {
    let Some(threshold) = act.config().exit_xp else {
        return;
    };
    if state.progress.xp < threshold {
        return;
    }
    // Blink at roughly 300ms
    if (state.time_ticks / 18) % 2 == 0 {
        ctx.set_fill_style_str("#FFD700");
        ctx.set_font("20px 'Courier New'");
        ctx.set_text_align("center");
        let _ = ctx.fill_text(
            "→ EXIT →",
            WORLD_W as f64 - 50.0,
            WORLD_H as f64 / 2.0,
        );
    }
}

fn draw_banner(ctx: &CanvasRenderingContext2d, state: &GameState) {
    if state.banner_ticks == 0 {
        return;
    }
    let alpha =
        (state.banner_ticks as f64 / tuning::acts::BANNER_FADE_TICKS as f64).min(1.0);
    ctx.set_global_alpha(alpha);
    fill_rect(
        ctx,
        0.0,
        WORLD_H / 2.0 - 40.0,
        WORLD_W,
        80.0,
        "rgba(0,0,0,0.6)",
    );
    ctx.set_fill_style_str("#FFD700");
    ctx.set_font("bold 28px 'Courier New'");
    ctx.set_text_align("center");
    let _ = ctx.fill_text(
        state.banner_text,
        WORLD_W as f64 / 2.0,
        WORLD_H as f64 / 2.0 + 8.0,
    );
    ctx.set_global_alpha(1.0);
}

fn fill_rect(ctx: &CanvasRenderingContext2d, x: f32, y: f32, w: f32, h: f32, color: &str) {
    ctx.set_fill_style_str(color);
    ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
}

fn fill_circle(ctx: &CanvasRenderingContext2d, cx: f64, cy: f64, radius: f64, color: &str) {
    ctx.set_fill_style_str(color);
    ctx.begin_path();
    let _ = ctx.arc(cx, cy, radius, 0.0, TAU);
    ctx.fill();
}
