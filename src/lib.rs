//! Physics-driven character locomotion for bevy + avian3d.
//!
//! Contacts reported by the physics engine are classified every fixed tick
//! into ground, steep and climbable surfaces; a small state machine turns
//! them (plus water submergence) into a locomotion mode, and the velocity
//! integrator and jump arbiter produce the next rigid-body velocity.

pub mod content;
pub mod core;
pub mod movement;
