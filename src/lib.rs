//! Boss-arena sketch: a pointer-driven player dot and an AI boss that cycles
//! between idling, repositioning near the player, firing projectile bursts,
//! and growing a rotating energy beam.
//!
//! Layout:
//! - `entities` — pure data, no logic
//! - `palette`  — RGB colors and channel-wise mixing
//! - `compute`  — pure per-frame simulation, RNG injected
//! - `canvas`   — logical-unit drawing surface presented as terminal
//!   half-blocks
//!
//! The binary adds a `scene` module (world → canvas draw calls) and the
//! frame/input/tick wiring.

pub mod canvas;
pub mod compute;
pub mod entities;
pub mod palette;
