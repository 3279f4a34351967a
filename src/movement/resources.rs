//! Movement domain: tuning, derived thresholds, and input resources.

use avian3d::prelude::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::{GameLayer, jump};

/// Flat set of locomotion tunables. Angles are in degrees; masks are
/// physics layer bit sets.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    pub base_top_speed: f32,
    pub boosted_top_speed: f32,
    pub max_climb_speed: f32,
    pub max_swim_speed: f32,
    pub ground_acceleration: f32,
    pub ground_deceleration: f32,
    pub aerial_acceleration: f32,
    pub aerial_deceleration: f32,
    pub max_climb_acceleration: f32,
    pub max_swim_acceleration: f32,
    pub jump_height: f32,
    /// Maximum air jumps (0 = no double jump, 1 = double jump, ...)
    pub max_air_jumps: u8,
    /// Seconds off the ground before the first air jump is honored.
    pub coyote_grace: f32,
    pub max_ground_angle: f32,
    pub max_stairs_angle: f32,
    pub max_climb_angle: f32,
    /// Steepest averaged normal of several steep contacts that still counts
    /// as ground. Falls back to `max_ground_angle`.
    pub steep_recovery_angle: Option<f32>,
    /// Steepest summed climb normal of several climb contacts that is still
    /// trusted as a wall rather than replaced. Falls back to `max_ground_angle`.
    pub climb_fallback_angle: Option<f32>,
    pub max_snap_speed: f32,
    pub probe_distance: f32,
    pub submergence_offset: f32,
    pub submergence_range: f32,
    pub buoyancy: f32,
    pub water_drag: f32,
    pub swim_threshold: f32,
    pub probe_mask: u32,
    pub stairs_mask: u32,
    pub climb_mask: u32,
    pub water_mask: u32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            base_top_speed: 7.75,
            boosted_top_speed: 13.5,
            max_climb_speed: 4.0,
            max_swim_speed: 5.0,
            ground_acceleration: 67.5,
            ground_deceleration: 50.0,
            aerial_acceleration: 20.0,
            aerial_deceleration: 20.0,
            max_climb_acceleration: 20.0,
            max_swim_acceleration: 5.0,
            jump_height: 2.35,
            max_air_jumps: 1,
            coyote_grace: 0.2,
            max_ground_angle: 15.0,
            max_stairs_angle: 50.0,
            max_climb_angle: 140.0,
            steep_recovery_angle: None,
            climb_fallback_angle: None,
            max_snap_speed: 100.0,
            probe_distance: 1.0,
            submergence_offset: 0.5,
            submergence_range: 1.0,
            buoyancy: 1.0,
            water_drag: 1.0,
            swim_threshold: 0.5,
            probe_mask: GameLayer::Default.to_bits()
                | GameLayer::Ground.to_bits()
                | GameLayer::Stairs.to_bits()
                | GameLayer::Climbable.to_bits()
                | GameLayer::Platform.to_bits(),
            stairs_mask: GameLayer::Stairs.to_bits(),
            climb_mask: GameLayer::Climbable.to_bits(),
            water_mask: GameLayer::Water.to_bits(),
        }
    }
}

impl MovementTuning {
    /// Initial speed needed to reach `jump_height` under `gravity_magnitude`.
    pub fn jump_speed(&self, gravity_magnitude: f32) -> f32 {
        jump::jump_speed(gravity_magnitude, self.jump_height)
    }

    /// Check every tunable and report all problems at once.
    /// Returns an empty list when the tuning is usable as-is.
    pub fn validate(&self) -> Vec<TuningError> {
        let mut errors = Vec::new();

        for (field, degrees) in [
            ("max_ground_angle", self.max_ground_angle),
            ("max_stairs_angle", self.max_stairs_angle),
            ("max_climb_angle", self.max_climb_angle),
        ]
        .into_iter()
        .chain(
            [
                ("steep_recovery_angle", self.steep_recovery_angle),
                ("climb_fallback_angle", self.climb_fallback_angle),
            ]
            .into_iter()
            .filter_map(|(field, degrees)| degrees.map(|d| (field, d))),
        ) {
            if !(0.0..=180.0).contains(&degrees) {
                errors.push(TuningError::AngleOutOfRange { field, degrees });
            }
        }

        for (field, value) in [
            ("base_top_speed", self.base_top_speed),
            ("boosted_top_speed", self.boosted_top_speed),
            ("max_climb_speed", self.max_climb_speed),
            ("max_swim_speed", self.max_swim_speed),
            ("ground_acceleration", self.ground_acceleration),
            ("ground_deceleration", self.ground_deceleration),
            ("aerial_acceleration", self.aerial_acceleration),
            ("aerial_deceleration", self.aerial_deceleration),
            ("max_climb_acceleration", self.max_climb_acceleration),
            ("max_swim_acceleration", self.max_swim_acceleration),
            ("jump_height", self.jump_height),
            ("coyote_grace", self.coyote_grace),
            ("max_snap_speed", self.max_snap_speed),
            ("probe_distance", self.probe_distance),
            ("buoyancy", self.buoyancy),
            ("water_drag", self.water_drag),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(TuningError::Negative { field, value });
            }
        }

        if !self.submergence_offset.is_finite() {
            errors.push(TuningError::Negative {
                field: "submergence_offset",
                value: self.submergence_offset,
            });
        }
        if !(self.submergence_range > 0.0 && self.submergence_range.is_finite()) {
            errors.push(TuningError::NotPositive {
                field: "submergence_range",
                value: self.submergence_range,
            });
        }
        if !(self.swim_threshold > 0.0 && self.swim_threshold <= 1.0) {
            errors.push(TuningError::SwimThreshold(self.swim_threshold));
        }

        errors
    }
}

/// A tunable that cannot be used as configured.
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    AngleOutOfRange { field: &'static str, degrees: f32 },
    Negative { field: &'static str, value: f32 },
    NotPositive { field: &'static str, value: f32 },
    SwimThreshold(f32),
}

impl std::fmt::Display for TuningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TuningError::AngleOutOfRange { field, degrees } => write!(
                f,
                "'{}' is {} degrees, expected 0..=180 (clamped)",
                field, degrees
            ),
            TuningError::Negative { field, value } => {
                write!(f, "'{}' must be finite and >= 0, got {}", field, value)
            }
            TuningError::NotPositive { field, value } => {
                write!(f, "'{}' must be finite and > 0, got {}", field, value)
            }
            TuningError::SwimThreshold(value) => {
                write!(f, "'swim_threshold' must be in (0, 1], got {}", value)
            }
        }
    }
}

/// Cosine thresholds derived once from the tuning angles, plus the layer
/// masks the classifier needs.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SurfaceThresholds {
    pub min_ground_dot: f32,
    pub min_stairs_dot: f32,
    pub min_climb_dot: f32,
    /// Averaged steep contacts at or above this up-dot are promoted to ground
    pub steep_recovery_dot: f32,
    /// Summed climb normals at or above this up-dot are replaced by a single
    /// wall normal
    pub climb_fallback_dot: f32,
    pub stairs_mask: u32,
    pub climb_mask: u32,
}

impl Default for SurfaceThresholds {
    fn default() -> Self {
        Self::from_tuning(&MovementTuning::default())
    }
}

impl SurfaceThresholds {
    pub fn from_tuning(tuning: &MovementTuning) -> Self {
        let min_ground_dot = min_dot_for_angle(tuning.max_ground_angle, 15.0);
        let or_ground = |degrees: Option<f32>| {
            degrees
                .filter(|d| d.is_finite())
                .map_or(min_ground_dot, |d| min_dot_for_angle(d, 15.0))
        };
        Self {
            min_ground_dot,
            min_stairs_dot: min_dot_for_angle(tuning.max_stairs_angle, 50.0),
            min_climb_dot: min_dot_for_angle(tuning.max_climb_angle, 140.0),
            steep_recovery_dot: or_ground(tuning.steep_recovery_angle),
            climb_fallback_dot: or_ground(tuning.climb_fallback_angle),
            stairs_mask: tuning.stairs_mask,
            climb_mask: tuning.climb_mask,
        }
    }

    /// Minimum up-dot for a surface on the given layers to count as ground.
    pub fn min_dot(&self, layers: u32) -> f32 {
        if layers & self.stairs_mask == 0 {
            self.min_ground_dot
        } else {
            self.min_stairs_dot
        }
    }

    pub fn is_climbable(&self, layers: u32) -> bool {
        layers & self.climb_mask != 0
    }
}

fn min_dot_for_angle(degrees: f32, fallback: f32) -> f32 {
    let degrees = if degrees.is_finite() { degrees } else { fallback };
    degrees.clamp(0.0, 180.0).to_radians().cos()
}

/// Player intent sampled every frame and consumed by the fixed step.
/// Edge-triggered requests stay latched until a fixed step consumes them.
#[derive(Resource, Debug, Default)]
pub struct MovementInput {
    /// x = right, y = forward; magnitude clamped to 1
    pub axis: Vec2,
    /// Up/down, only honored while swimming
    pub vertical: f32,
    pub jump_requested: bool,
    pub climb_held: bool,
    pub boost_requested: bool,
    pub brake_requested: bool,
    /// Orientation whose right/forward axes steer the input (usually the camera)
    pub input_space: Option<Quat>,
}

impl MovementInput {
    /// Clear the latched edge-triggered requests after a fixed step.
    pub fn consume_requests(&mut self) {
        self.jump_requested = false;
        self.boost_requested = false;
        self.brake_requested = false;
    }
}
