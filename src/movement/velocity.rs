//! Movement domain: movement profiles and velocity integration.
//!
//! The profile decides acceleration, deceleration and top speed for the
//! tick; the integrator then nudges the velocity toward the desired
//! input-relative velocity without ever setting it directly, so gravity
//! and jump impulses compose with it.

use bevy::prelude::*;

use crate::movement::math::{lerp_unclamped, project_direction_on_plane};
use crate::movement::water::swim_factor;
use crate::movement::{LocomotionMode, MovementTuning};

/// Share of the climb acceleration that pulls a climber into the wall.
pub const CLIMB_GRIP_FACTOR: f32 = 0.9;

/// Below this squared speed a grounded character counts as idle.
pub const IDLE_SPEED_SQUARED: f32 = 0.01;

/// Player-selected gait, toggled by the boost/brake triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gait {
    #[default]
    Base,
    Boosted,
}

impl Gait {
    /// Apply this tick's discrete triggers.
    pub fn with_triggers(self, boost_requested: bool, brake_requested: bool) -> Gait {
        match self {
            Gait::Base if boost_requested => Gait::Boosted,
            Gait::Boosted if brake_requested => Gait::Base,
            gait => gait,
        }
    }

    fn limits(self, tuning: &MovementTuning, on_ground: bool, desires_climbing: bool) -> MotionLimits {
        let acceleration = if on_ground {
            tuning.ground_acceleration
        } else {
            tuning.aerial_acceleration
        };
        match self {
            Gait::Base => MotionLimits {
                acceleration,
                deceleration: if on_ground {
                    tuning.ground_deceleration
                } else {
                    tuning.aerial_deceleration
                },
                // Slow down before the climb starts so it can't be entered at full tilt.
                top_speed: if on_ground && desires_climbing {
                    tuning.max_climb_speed
                } else {
                    tuning.base_top_speed
                },
            },
            // Boosted brakes as hard as it accelerates on the ground.
            Gait::Boosted => MotionLimits {
                acceleration,
                deceleration: if on_ground {
                    tuning.ground_acceleration
                } else {
                    tuning.aerial_deceleration
                },
                top_speed: tuning.boosted_top_speed,
            },
        }
    }
}

/// Movement profile for one tick, in priority order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovementProfile {
    Climbing,
    Submerged { swim_factor: f32 },
    Walking(Gait),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionLimits {
    pub acceleration: f32,
    pub deceleration: f32,
    pub top_speed: f32,
}

impl MovementProfile {
    pub fn resolve(mode: LocomotionMode, submergence: f32, swim_threshold: f32, gait: Gait) -> Self {
        if mode == LocomotionMode::Climbing {
            MovementProfile::Climbing
        } else if submergence > 0.0 {
            MovementProfile::Submerged {
                swim_factor: swim_factor(submergence, swim_threshold),
            }
        } else {
            MovementProfile::Walking(gait)
        }
    }

    pub fn limits(
        &self,
        tuning: &MovementTuning,
        on_ground: bool,
        desires_climbing: bool,
    ) -> MotionLimits {
        match *self {
            MovementProfile::Climbing => MotionLimits {
                acceleration: tuning.max_climb_acceleration,
                deceleration: tuning.max_climb_acceleration,
                top_speed: tuning.max_climb_speed,
            },
            MovementProfile::Submerged { swim_factor } => {
                let (acceleration, deceleration) = if on_ground {
                    (tuning.ground_acceleration, tuning.ground_deceleration)
                } else {
                    (tuning.aerial_acceleration, tuning.aerial_deceleration)
                };
                MotionLimits {
                    acceleration: lerp_unclamped(
                        acceleration,
                        tuning.max_swim_acceleration,
                        swim_factor,
                    ),
                    deceleration: lerp_unclamped(
                        deceleration,
                        tuning.max_swim_acceleration,
                        swim_factor,
                    ),
                    top_speed: lerp_unclamped(
                        tuning.base_top_speed,
                        tuning.max_swim_speed,
                        swim_factor,
                    ),
                }
            }
            MovementProfile::Walking(gait) => gait.limits(tuning, on_ground, desires_climbing),
        }
    }

    /// Unprojected (x, z) movement axes for this profile.
    pub fn axes(&self, frame: &InputFrame) -> (Vec3, Vec3) {
        match self {
            // The climber faces into the wall, so their right is up x normal.
            MovementProfile::Climbing => (frame.up.cross(frame.contact_normal), frame.up),
            _ => (frame.right, frame.forward),
        }
    }
}

/// Orientation data the integrator works in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputFrame {
    pub up: Vec3,
    /// Input right axis, already flattened against up
    pub right: Vec3,
    /// Input forward axis, already flattened against up
    pub forward: Vec3,
    pub contact_normal: Vec3,
}

/// Per-tick player intent and reference motion for [`adjust_velocity`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustInput {
    /// x = right, y = up (swimming only), z = forward; magnitude <= 1
    pub intent: Vec3,
    pub swimming: bool,
    pub connection_velocity: Vec3,
    pub dt: f32,
}

/// Accelerate toward the desired velocity relative to the support frame.
pub fn adjust_velocity(
    velocity: Vec3,
    profile: MovementProfile,
    limits: MotionLimits,
    frame: &InputFrame,
    input: &AdjustInput,
) -> Vec3 {
    let (x_axis, z_axis) = profile.axes(frame);
    let x_axis = project_direction_on_plane(x_axis, frame.contact_normal);
    let z_axis = project_direction_on_plane(z_axis, frame.contact_normal);

    let relative_velocity = velocity - input.connection_velocity;
    let speed = limits.top_speed;
    let intent = if input.swimming {
        input.intent
    } else {
        input.intent.with_y(0.0)
    };

    let mut adjustment = Vec3::new(
        intent.x * speed - relative_velocity.dot(x_axis),
        0.0,
        intent.z * speed - relative_velocity.dot(z_axis),
    );
    if input.swimming {
        adjustment.y = intent.y * speed - relative_velocity.dot(frame.up);
    }

    // Coast to a stop at the deceleration rate when there is no input.
    let rate = if intent != Vec3::ZERO {
        limits.acceleration
    } else {
        limits.deceleration
    };
    let adjustment = adjustment.clamp_length_max((rate * input.dt).max(0.0));

    let mut velocity = velocity + x_axis * adjustment.x + z_axis * adjustment.z;
    if input.swimming {
        velocity += frame.up * adjustment.y;
    }
    velocity
}

/// Slow a character moving through water.
pub fn apply_water_drag(velocity: Vec3, water_drag: f32, submergence: f32, dt: f32) -> Vec3 {
    velocity * (1.0 - water_drag * submergence * dt).max(0.0)
}

/// State the gravity step branches on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityInput {
    pub gravity: Vec3,
    pub mode: LocomotionMode,
    pub on_ground: bool,
    pub submergence: f32,
    pub desires_climbing: bool,
    pub contact_normal: Vec3,
    pub dt: f32,
}

/// Apply gravity (or its climbing/swimming/idle substitutes) for one tick.
pub fn apply_gravity(velocity: Vec3, input: &GravityInput, tuning: &MovementTuning) -> Vec3 {
    let dt = input.dt;
    let grip = tuning.max_climb_acceleration * CLIMB_GRIP_FACTOR;

    if input.mode == LocomotionMode::Climbing {
        velocity - input.contact_normal * (grip * dt)
    } else if input.submergence > 0.0 {
        velocity + input.gravity * ((1.0 - tuning.buoyancy * input.submergence) * dt)
    } else if input.on_ground && velocity.length_squared() < IDLE_SPEED_SQUARED {
        // Keep only the part of gravity pressing into the slope so idle
        // characters don't slide.
        velocity + input.contact_normal * (input.gravity.dot(input.contact_normal) * dt)
    } else if input.on_ground && input.desires_climbing {
        velocity + (input.gravity - input.contact_normal * grip) * dt
    } else {
        velocity + input.gravity * dt
    }
}
