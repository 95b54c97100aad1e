/// Pure simulation functions.
///
/// Every public function takes an immutable reference to the current `World`
/// (plus the per-frame input snapshot, elapsed wall time and tick-counter
/// sample) and returns a brand-new `World`.  Side effects are limited to the
/// injected RNG.

use std::f64::consts::TAU;

use rand::Rng;

use crate::entities::{Boss, BossAction, InputSnapshot, Player, Point, Projectile, World};

// ── Behavior constants ───────────────────────────────────────────────────────

/// Nominal logical ticks per second (the tick thread's rate).
pub const TICK_RATE: u64 = 60;

/// The boss considers repositioning once its rest point is this far from the
/// player.
pub const ROAM_DISTANCE: f64 = 200.0;
/// New movement goals land exactly this far from the player, at a uniform
/// random angle.
pub const FOLLOW_RANGE: f64 = 150.0;
/// Within this distance of the goal the boss snaps back to idle.
pub const NEAR_GOAL: f64 = 25.0;
/// Movement easing is normalized over this many milliseconds.
pub const MOVE_DURATION_MS: f64 = 600.0;

/// Beam growth is normalized over this many milliseconds.  Deliberately not
/// the same scheme constant as `MOVE_DURATION_MS`.
pub const BEAM_DURATION_MS: f64 = 1e5;
/// Asymptotic beam length.
pub const BEAM_MAX: f64 = 500.0;
/// Crossing this length ends the beam.
pub const BEAM_DONE: f64 = 450.0;
/// Number of beams radiating from the boss.
pub const BEAM_COUNT: usize = 8;

/// Projectiles per burst, and the number of fixed direction lanes.
pub const BURST_SIZE: usize = 16;
/// World units a projectile travels per frame.
pub const PROJECTILE_SPEED: f64 = 1.6;
/// Live-projectile cap; overflowing bursts evict the oldest.
pub const MAX_PROJECTILES: usize = 512;

// ── Geometry helpers ──────────────────────────────────────────────────────────

/// Cubic ease (3x² − 2x³): zero velocity at both ends, clamped to [0, 1].
pub fn smooth_step(x: f64) -> f64 {
    if x > 1.0 {
        1.0
    } else if x > 0.0 {
        3.0 * x * x - 2.0 * x * x * x
    } else {
        0.0
    }
}

pub fn distance(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// A point at exactly `range` from the origin, uniform in angle.
pub fn random_radial(range: f64, rng: &mut impl Rng) -> Point {
    let angle = rng.gen_range(0.0..TAU);
    Point::new(angle.cos() * range, angle.sin() * range)
}

/// Pick a spot near `target` to settle at.
pub fn follow(target: Point, range: f64, rng: &mut impl Rng) -> Point {
    let offset = random_radial(range, rng);
    Point::new(target.x + offset.x, target.y + offset.y)
}

/// Direction of a projectile lane, in radians.
pub fn lane_angle(lane: u8) -> f64 {
    TAU / BURST_SIZE as f64 * f64::from(lane)
}

// ── Constructors ──────────────────────────────────────────────────────────────

/// Build the initial world: the player parked at the origin until the first
/// pointer event arrives, the boss idle at (150, 150).
pub fn init_world() -> World {
    World {
        player: Player { x: 0.0, y: 0.0, size: 5.0 },
        boss: Boss {
            x: 150.0,
            y: 150.0,
            start: Point::new(0.0, 0.0),
            goal: Point::new(0.0, 0.0),
            beam_length: 0.0,
            to: 0.0,
            beam_rot: 0.0,
            size: 20.0,
            action: BossAction::Idle,
            projectiles: Vec::new(),
        },
    }
}

// ── Per-frame step ────────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
///
/// `elapsed_ms` is the wall time since the previous frame (zero on the
/// first).  `ticks` is a snapshot of the 60 Hz tick counter, sampled once by
/// the frame driver; it gates the periodic behavior switches and is not
/// phase-locked to frames.  All randomness comes through `rng` so callers
/// control determinism.
pub fn step(
    world: &World,
    input: &InputSnapshot,
    elapsed_ms: f64,
    ticks: u64,
    rng: &mut impl Rng,
) -> World {
    let mut next = world.clone();

    // The player mirrors the pointer before the boss thinks, so range checks
    // see this frame's position.
    next.player.x = input.pointer.x;
    next.player.y = input.pointer.y;

    think(&mut next.boss, &next.player, elapsed_ms, ticks, rng);
    advance_projectiles(&mut next.boss);

    next
}

/// One pass of the boss behavior state machine, in transition-precedence
/// order: beam gate, burst gate, roam check, then the action itself.
fn think(boss: &mut Boss, player: &Player, elapsed_ms: f64, ticks: u64, rng: &mut impl Rng) {
    if ticks % (TICK_RATE * 3) == 0 && boss.action == BossAction::Idle {
        boss.action = BossAction::EnergyBeam;
    } else if ticks % TICK_RATE == 0
        && boss.action != BossAction::EnergyBeam
        && boss.action != BossAction::FireProjectiles
    {
        boss.action = BossAction::FireProjectiles;
    }

    // Too far from the player?  Settle somewhere near them.  Measured from
    // the last rest point, not the live position.
    let player_at = Point::new(player.x, player.y);
    if distance(boss.start, player_at) >= ROAM_DISTANCE && boss.action == BossAction::Idle {
        boss.goal = follow(player_at, FOLLOW_RANGE, rng);
        boss.action = BossAction::Move;
    }

    match boss.action {
        BossAction::Idle => {}
        BossAction::Move => {
            if distance(Point::new(boss.x, boss.y), boss.goal) <= NEAR_GOAL {
                boss.action = BossAction::Idle;
                boss.to = 0.0;
                boss.start = Point::new(boss.x, boss.y);
            } else {
                ease_move(boss, elapsed_ms);
            }
        }
        BossAction::EnergyBeam => {
            if boss.beam_length > BEAM_DONE {
                boss.action = BossAction::Idle;
                boss.to = 0.0;
                boss.beam_length = 0.0;
            } else {
                grow_beam(boss, elapsed_ms, rng);
            }
        }
        BossAction::FireProjectiles => {
            fire_projectiles(boss, false);
            // Straight to Move without choosing a goal; the boss glides
            // toward whatever goal is left over.  Kept as the original
            // behaved pending a product decision.
            boss.action = BossAction::Move;
        }
        BossAction::HomingTorpedos => {
            fire_projectiles(boss, true);
            boss.action = BossAction::Move;
        }
    }
}

fn ease_move(boss: &mut Boss, elapsed_ms: f64) {
    boss.to += elapsed_ms / MOVE_DURATION_MS;
    boss.to = boss.to.clamp(0.0, 1.0);
    let s = smooth_step(boss.to);
    boss.x = boss.start.x + s * (boss.goal.x - boss.start.x);
    boss.y = boss.start.y + s * (boss.goal.y - boss.start.y);
}

fn grow_beam(boss: &mut Boss, elapsed_ms: f64, rng: &mut impl Rng) {
    boss.beam_rot = rng.gen_range(0.0..TAU);
    boss.to += elapsed_ms / BEAM_DURATION_MS;
    boss.to = boss.to.clamp(0.0, 1.0);
    boss.beam_length += smooth_step(boss.to) * (BEAM_MAX - boss.beam_length);
}

/// Append one burst of `BURST_SIZE` projectiles at the boss's position, one
/// per direction lane.  The homing request is recorded as always-on for every
/// projectile, matching the firing behavior this was transcribed from; the
/// flag never alters a trajectory.
pub fn fire_projectiles(boss: &mut Boss, _homing: bool) {
    let base = boss.projectiles.len();
    for k in 0..BURST_SIZE {
        boss.projectiles.push(Projectile {
            x: boss.x,
            y: boss.y,
            lane: ((base + k) % BURST_SIZE) as u8,
            homing: true,
        });
    }
    // Cap the buffer, dropping the oldest first.
    if boss.projectiles.len() > MAX_PROJECTILES {
        let overflow = boss.projectiles.len() - MAX_PROJECTILES;
        boss.projectiles.drain(..overflow);
    }
}

/// Every live projectile advances along its lane at constant speed,
/// regardless of what the boss is doing.
fn advance_projectiles(boss: &mut Boss) {
    for p in &mut boss.projectiles {
        let angle = lane_angle(p.lane);
        p.x += angle.cos() * PROJECTILE_SPEED;
        p.y += angle.sin() * PROJECTILE_SPEED;
    }
}
