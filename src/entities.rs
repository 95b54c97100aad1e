/// All simulation entity types — pure data, no logic.

/// A position in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// What the boss is currently busy with.  Exactly one action is live per
/// frame; transitions are decided in `compute::step`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossAction {
    Idle,
    /// Easing from `start` toward `goal`.
    Move,
    /// Growing the rotating 8-way beam.
    EnergyBeam,
    /// One 16-projectile burst, then straight back to `Move`.
    FireProjectiles,
    /// Identical burst; the homing request is accepted but has no effect on
    /// trajectories.
    HomingTorpedos,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// A boss projectile.  `lane` (spawn index mod 16) fixes its travel
/// direction for the rest of its life.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projectile {
    pub x: f64,
    pub y: f64,
    pub lane: u8,
    pub homing: bool,
}

// ── Player & boss ─────────────────────────────────────────────────────────────

/// The pointer-driven dot.  Position mirrors the input snapshot each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    /// Disc radius in world units.
    pub size: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Boss {
    pub x: f64,
    pub y: f64,
    /// Last rest position; movement eases from here and the range check
    /// against the player measures from here, not from the live position.
    pub start: Point,
    pub goal: Point,
    pub beam_length: f64,
    /// Normalized easing progress in [0, 1], shared by move and beam growth.
    pub to: f64,
    /// Beam rotation for the current frame, re-rolled while beaming.
    pub beam_rot: f64,
    /// Side length of the drawn square.
    pub size: f64,
    pub action: BossAction,
    pub projectiles: Vec<Projectile>,
}

// ── Simulation context ────────────────────────────────────────────────────────

/// The entire simulation state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    pub player: Player,
    pub boss: Boss,
}

/// Input captured once per frame, already mapped into world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputSnapshot {
    pub pointer: Point,
}
