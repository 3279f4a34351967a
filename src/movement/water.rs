//! Movement domain: submergence in water volumes.

use bevy::prelude::*;

use crate::movement::{MovementTuning, SurfaceProbe};

/// Measure how deep the character sits in the water volume it overlaps.
///
/// Probes down from slightly above the character; the closer the water
/// surface is to the probe origin, the deeper the character is. No hit
/// while overlapping water means the surface is above the probe origin.
pub fn evaluate_submergence(
    probe: &impl SurfaceProbe,
    position: Vec3,
    up: Vec3,
    tuning: &MovementTuning,
) -> f32 {
    let range = tuning.submergence_range;
    if !(range > 0.0) {
        return 0.0;
    }
    let origin = position + up * tuning.submergence_offset;
    let depth = match probe.cast(origin, -up, range + 1.0, tuning.water_mask) {
        Some(hit) => 1.0 - hit.distance / range,
        None => 1.0,
    };
    if depth.is_finite() {
        depth.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Fraction of the way from surface movement to full swimming.
pub fn swim_factor(submergence: f32, swim_threshold: f32) -> f32 {
    if swim_threshold > 0.0 {
        (submergence / swim_threshold).min(1.0)
    } else {
        1.0
    }
}
