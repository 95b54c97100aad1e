/// Rendering layer — translates world state into canvas draw calls.
///
/// No simulation logic is performed; this module only turns the current
/// `World` into shapes, in back-to-front order: grid, player, beams,
/// projectiles, boss, HUD.

use std::f64::consts::TAU;

use arena_boss::canvas::Canvas;
use arena_boss::compute::BEAM_COUNT;
use arena_boss::entities::{BossAction, World};
use arena_boss::palette::{self, mix, Rgb};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BOSS: Rgb = Rgb::from_hex(0xff0000);
const C_PLAYER: Rgb = palette::BLUE;
const C_BEAM: Rgb = palette::YELLOW;
const C_PROJECTILE: Rgb = palette::YELLOW;

/// Darkened-outline weight shared by player, beam and projectile strokes.
const OUTLINE_MIX: f64 = 0.65;
const OUTLINE_WIDTH: f64 = 6.0;

/// Grid pitch in world units.
const GRID_STEP: f64 = 7.5;
const GRID_LINES: i32 = 300;

/// The logical rectangle currently mapped onto the canvas.
pub struct View {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Draw one complete frame into the canvas buffer.
pub fn render(c: &mut Canvas, world: &World, view: &View) {
    draw_grid(c);
    draw_player(c, world);
    if world.boss.action == BossAction::EnergyBeam && world.boss.beam_length > 0.0 {
        draw_beams(c, world);
    }
    draw_projectiles(c, world);
    draw_boss(c, world);
    draw_hud(c, world, view);
}

// ── Background ────────────────────────────────────────────────────────────────

fn draw_grid(c: &mut Canvas) {
    let line = mix(palette::LGRAY, palette::PURE_BLACK, 0.1);
    // The darkened backdrop doubles as the out-of-bounds color.
    c.clear(line);
    c.box_at(0.0, 0.0, 6000.0, 6000.0, 0.0, Some(palette::LGRAY), None, 0.0);
    for i in -GRID_LINES..=GRID_LINES {
        let at = f64::from(i) * GRID_STEP;
        c.box_at(0.0, at, 12000.0, 2.0, 0.0, Some(line), None, 0.0);
        c.box_at(at, 0.0, 2.0, 12000.0, 0.0, Some(line), None, 0.0);
    }
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player(c: &mut Canvas, world: &World) {
    let p = &world.player;
    c.circle(
        p.x,
        p.y,
        p.size,
        Some(C_PLAYER),
        Some(mix(C_PLAYER, palette::BLACK, OUTLINE_MIX)),
        OUTLINE_WIDTH,
    );
}

fn draw_beams(c: &mut Canvas, world: &World) {
    let b = &world.boss;
    let stroke = mix(C_BEAM, palette::BLACK, OUTLINE_MIX);
    for i in 0..BEAM_COUNT {
        let angle = TAU / BEAM_COUNT as f64 * i as f64 + b.beam_rot;
        c.box_at(
            b.x,
            b.y,
            6.0,
            b.beam_length,
            angle,
            Some(C_BEAM),
            Some(stroke),
            OUTLINE_WIDTH,
        );
    }
}

fn draw_projectiles(c: &mut Canvas, world: &World) {
    let stroke = mix(C_PROJECTILE, palette::BLACK, OUTLINE_MIX);
    for p in &world.boss.projectiles {
        c.circle(p.x, p.y, 6.0, Some(C_PROJECTILE), Some(stroke), OUTLINE_WIDTH);
    }
}

fn draw_boss(c: &mut Canvas, world: &World) {
    let b = &world.boss;
    c.box_at(b.x, b.y, b.size, b.size, 0.0, Some(C_BOSS), None, 0.0);
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn action_name(action: BossAction) -> &'static str {
    match action {
        BossAction::Idle => "idle",
        BossAction::Move => "move",
        BossAction::EnergyBeam => "energy beam",
        BossAction::FireProjectiles => "firing",
        BossAction::HomingTorpedos => "torpedos",
    }
}

fn draw_hud(c: &mut Canvas, world: &World, view: &View) {
    let hud = format!(
        "boss: {:<11}  shots: {:>3}   q: quit",
        action_name(world.boss.action),
        world.boss.projectiles.len()
    );
    c.text(view.x + view.w * 0.5, view.y + view.h * 0.02, 20.0, &hud);
}
