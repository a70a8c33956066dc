//! Canvas drawing for a [`Session`]. Sprites are built from 2D primitives so
//! the game runs without any image assets.

use std::f64::consts::{PI, TAU};

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::sim::entities::{Body, Enemy, EnemyKind, Player, PlayerState, Projectile};
use crate::sim::particles::Particle;
use crate::sim::Session;

const LABEL_FONT: &str = "20px 'Press Start 2P', 'Fira Code', monospace";
const MATCHED_COLOR: &str = "#ff0000";
const REST_COLOR: &str = "#ffffff";

pub fn draw(ctx: &CanvasRenderingContext2d, session: &Session) -> Result<(), JsValue> {
    let view = session.viewport();
    ctx.save();
    let (sx, sy) = session.shake_offset();
    ctx.translate(sx, sy)?;

    draw_background(ctx, session)?;
    draw_terrain(ctx, session, view.width, view.height);
    draw_player(ctx, session.player())?;
    for enemy in session.enemies() {
        draw_enemy(ctx, enemy)?;
        draw_label(ctx, session, enemy)?;
    }
    for p in session.projectiles() {
        draw_projectile(ctx, p)?;
    }
    for p in session.particles() {
        draw_particle(ctx, p);
    }

    ctx.restore();
    Ok(())
}

fn draw_background(ctx: &CanvasRenderingContext2d, session: &Session) -> Result<(), JsValue> {
    let view = session.viewport();
    let sky = ctx.create_linear_gradient(0.0, 0.0, 0.0, view.height);
    sky.add_color_stop(0.0, "#2b1d12")?;
    sky.add_color_stop(0.6, "#1a1510")?;
    sky.add_color_stop(1.0, "#0f0c08")?;
    ctx.set_fill_style_canvas_gradient(&sky);
    ctx.fill_rect(0.0, 0.0, view.width, view.height);

    // two tiled copies of a jungle silhouette strip, scrolled by background_x
    ctx.set_fill_style_str("rgba(20,40,18,0.85)");
    let base = view.height - 160.0;
    for copy in 0..2 {
        let origin = session.background_x() + f64::from(copy) * view.width;
        let mut x = 0.0;
        let mut i = 0u32;
        while x < view.width {
            let h = 60.0 + f64::from((i * 37) % 90);
            ctx.begin_path();
            ctx.move_to(origin + x, base);
            ctx.line_to(origin + x + 30.0, base - h);
            ctx.line_to(origin + x + 60.0, base);
            ctx.close_path();
            ctx.fill();
            x += 45.0;
            i += 1;
        }
    }
    ctx.fill_rect(0.0, base, view.width, view.height - base);
    Ok(())
}

fn draw_terrain(ctx: &CanvasRenderingContext2d, session: &Session, width: f64, height: f64) {
    ctx.set_fill_style_str("#0a0805");
    ctx.begin_path();
    ctx.move_to(0.0, height);
    let mut x = 0.0;
    while x <= width {
        ctx.line_to(x, session.ground_height(x));
        x += 10.0;
    }
    ctx.line_to(width, session.ground_height(width));
    ctx.line_to(width, height);
    ctx.close_path();
    ctx.fill();
}

/// Mirrors the drawing space around the sprite's vertical centre line when
/// `flip` is set, leaving the origin at the sprite's top centre.
fn enter_sprite(
    ctx: &CanvasRenderingContext2d,
    body: &impl Body,
    flip: bool,
) -> Result<(), JsValue> {
    let (x, y) = body.position();
    let (w, _) = body.size();
    ctx.save();
    ctx.translate(x + w / 2.0, y)?;
    if flip {
        ctx.scale(-1.0, 1.0)?;
    }
    Ok(())
}

fn draw_player(ctx: &CanvasRenderingContext2d, player: &Player) -> Result<(), JsValue> {
    enter_sprite(ctx, player, player.facing_left)?;
    let s = player.width / 128.0;
    let bob = match player.state {
        PlayerState::Running => [0.0, -4.0, 0.0, 2.0][player.animation.frame % 4] * s,
        PlayerState::Attacking => 0.0,
    };

    ctx.set_fill_style_str("#1c1c1c");
    ctx.set_stroke_style_str("#f5d76e");
    ctx.set_line_width(2.0);

    // tail
    ctx.begin_path();
    ctx.move_to(-30.0 * s, 70.0 * s + bob);
    ctx.quadratic_curve_to(-60.0 * s, 40.0 * s, -50.0 * s, 20.0 * s + bob);
    ctx.set_line_width(8.0 * s);
    ctx.set_stroke_style_str("#1c1c1c");
    ctx.stroke();

    // body
    ctx.begin_path();
    ctx.ellipse(0.0, 80.0 * s + bob, 36.0 * s, 22.0 * s, 0.0, 0.0, TAU)?;
    ctx.fill();

    // head and ears
    ctx.begin_path();
    ctx.arc(34.0 * s, 56.0 * s + bob, 18.0 * s, 0.0, TAU)?;
    ctx.fill();
    for ear in [22.0, 40.0] {
        ctx.begin_path();
        ctx.move_to((ear - 6.0) * s, 44.0 * s + bob);
        ctx.line_to(ear * s, 30.0 * s + bob);
        ctx.line_to((ear + 6.0) * s, 44.0 * s + bob);
        ctx.close_path();
        ctx.fill();
    }

    // eye
    ctx.set_fill_style_str("#f5d76e");
    ctx.begin_path();
    ctx.arc(40.0 * s, 54.0 * s + bob, 3.0 * s, 0.0, TAU)?;
    ctx.fill();

    // legs: stride while running, planted paw forward while attacking
    ctx.set_stroke_style_str("#1c1c1c");
    ctx.set_line_width(6.0 * s);
    let stride = match player.state {
        PlayerState::Running => [10.0, 4.0, -10.0, -4.0][player.animation.frame % 4],
        PlayerState::Attacking => 0.0,
    } * s;
    for (hip, dir) in [(-20.0, 1.0), (20.0, -1.0)] {
        ctx.begin_path();
        ctx.move_to(hip * s, 95.0 * s + bob);
        ctx.line_to(hip * s + stride * dir, 100.0 * s);
        ctx.stroke();
    }
    if player.state == PlayerState::Attacking {
        ctx.set_stroke_style_str("#f5d76e");
        ctx.set_line_width(3.0 * s);
        for k in 0..3 {
            let dy = f64::from(k) * 6.0 * s;
            ctx.begin_path();
            ctx.move_to(56.0 * s, 60.0 * s + dy);
            ctx.line_to(72.0 * s, 52.0 * s + dy);
            ctx.stroke();
        }
    }

    ctx.restore();
    Ok(())
}

fn draw_enemy(ctx: &CanvasRenderingContext2d, enemy: &Enemy) -> Result<(), JsValue> {
    // sprites are drawn facing right; flip when walking left
    enter_sprite(ctx, enemy, enemy.facing_left)?;
    let s = enemy.width / 128.0;
    let frame = enemy.animation.frame;
    match enemy.kind {
        EnemyKind::Ground => {
            ctx.set_fill_style_str("#3d6b2a");
            // body + tail
            ctx.begin_path();
            ctx.move_to(-60.0 * s, 60.0 * s);
            ctx.line_to(10.0 * s, 50.0 * s);
            ctx.line_to(20.0 * s, 85.0 * s);
            ctx.line_to(-20.0 * s, 85.0 * s);
            ctx.close_path();
            ctx.fill();
            // neck + head
            ctx.begin_path();
            ctx.ellipse(32.0 * s, 38.0 * s, 22.0 * s, 12.0 * s, -0.3, 0.0, TAU)?;
            ctx.fill();
            ctx.fill_rect(8.0 * s, 40.0 * s, 14.0 * s, 24.0 * s);
            // legs alternate per walk frame
            ctx.set_stroke_style_str("#2c4f1e");
            ctx.set_line_width(8.0 * s);
            let swing = if frame % 2 == 0 { 12.0 } else { -12.0 } * s;
            for (hip, dir) in [(-10.0, 1.0), (8.0, -1.0)] {
                ctx.begin_path();
                ctx.move_to(hip * s, 80.0 * s);
                ctx.line_to(hip * s + swing * dir, 100.0 * s);
                ctx.stroke();
            }
            // eye
            ctx.set_fill_style_str("#e8d44d");
            ctx.begin_path();
            ctx.arc(40.0 * s, 34.0 * s, 3.0 * s, 0.0, TAU)?;
            ctx.fill();
        }
        EnemyKind::Flying => {
            ctx.set_fill_style_str("#7a4b2a");
            let lift = if frame % 2 == 0 { -30.0 } else { 10.0 } * s;
            for dir in [-1.0, 1.0] {
                ctx.begin_path();
                ctx.move_to(0.0, 60.0 * s);
                ctx.line_to(dir * 60.0 * s, 60.0 * s + lift);
                ctx.line_to(dir * 20.0 * s, 72.0 * s);
                ctx.close_path();
                ctx.fill();
            }
            ctx.begin_path();
            ctx.ellipse(0.0, 66.0 * s, 24.0 * s, 10.0 * s, 0.0, 0.0, TAU)?;
            ctx.fill();
            // beak and crest
            ctx.begin_path();
            ctx.move_to(20.0 * s, 60.0 * s);
            ctx.line_to(52.0 * s, 66.0 * s);
            ctx.line_to(20.0 * s, 70.0 * s);
            ctx.move_to(18.0 * s, 60.0 * s);
            ctx.line_to(4.0 * s, 48.0 * s);
            ctx.line_to(12.0 * s, 62.0 * s);
            ctx.fill();
        }
    }
    ctx.restore();
    Ok(())
}

/// Word box above the enemy; the locked enemy shows its typed prefix in red.
fn draw_label(
    ctx: &CanvasRenderingContext2d,
    session: &Session,
    enemy: &Enemy,
) -> Result<(), JsValue> {
    ctx.set_font(LABEL_FONT);
    let word_w = ctx.measure_text(&enemy.word)?.width();
    let center_x = enemy.x + enemy.width / 2.0;
    let text_y = enemy.y - 12.0;

    ctx.set_fill_style_str("rgba(0,0,0,0.7)");
    ctx.fill_rect(center_x - word_w / 2.0 - 5.0, enemy.y - 35.0, word_w + 10.0, 30.0);

    let (matched, rest) = session.word_label(enemy);
    let start_x = center_x - word_w / 2.0;
    ctx.set_text_align("left");
    ctx.set_fill_style_str(MATCHED_COLOR);
    ctx.fill_text(matched, start_x, text_y)?;
    let matched_w = ctx.measure_text(matched)?.width();
    ctx.set_fill_style_str(REST_COLOR);
    ctx.fill_text(rest, start_x + matched_w, text_y)?;
    Ok(())
}

/// Eight-point shuriken.
fn draw_projectile(ctx: &CanvasRenderingContext2d, p: &Projectile) -> Result<(), JsValue> {
    ctx.save();
    ctx.translate(p.x, p.y)?;
    ctx.rotate(p.rotation * TAU)?;
    ctx.scale(1.5, 1.5)?;
    ctx.set_fill_style_str("#eee");
    ctx.set_stroke_style_str("#111");
    ctx.set_line_width(2.0);
    ctx.begin_path();
    for i in 0..8 {
        let angle = f64::from(i) * PI / 4.0 - PI / 2.0;
        let r = if i % 2 == 0 { 10.0 } else { 4.2 };
        let (x, y) = (r * angle.cos(), r * angle.sin());
        if i == 0 {
            ctx.move_to(x, y);
        } else {
            ctx.line_to(x, y);
        }
    }
    ctx.close_path();
    ctx.fill();
    ctx.stroke();
    ctx.restore();
    Ok(())
}

fn draw_particle(ctx: &CanvasRenderingContext2d, p: &Particle) {
    let (r, g, b) = p.color;
    ctx.set_fill_style_str(&format!("rgb({r},{g},{b})"));
    ctx.set_global_alpha(p.life.clamp(0.0, 1.0));
    ctx.fill_rect(p.x, p.y, p.size, p.size);
    ctx.set_global_alpha(1.0);
}
