//! Movement domain: jump budget tracking and jump impulses.

use bevy::prelude::*;

use crate::movement::SurfaceState;
use crate::movement::math::normalize_or;

/// Durable jump bookkeeping carried across ticks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JumpState {
    /// Jumps used since last landing (0 = none yet)
    pub phase: u32,
    /// -1 right after a snap cancellation
    pub steps_since_jump: i32,
    pub steps_since_grounded: i32,
    /// Seconds since the character last ended a tick on the ground
    pub coyote_timer: f32,
}

/// Which branch granted a jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Ground,
    Wall,
    Air,
}

/// Inputs to [`JumpState::try_jump`] beyond the current velocity.
#[derive(Debug, Clone, Copy)]
pub struct JumpContext<'a> {
    pub up: Vec3,
    pub gravity_magnitude: f32,
    pub surface: &'a SurfaceState,
    pub submergence: f32,
    pub swim_threshold: f32,
    pub jump_height: f32,
    pub max_air_jumps: u8,
    pub coyote_grace: f32,
}

/// Initial speed needed to reach `jump_height` under `gravity_magnitude`.
/// Uses physics formula: v = sqrt(2gh)
pub fn jump_speed(gravity_magnitude: f32, jump_height: f32) -> f32 {
    (2.0 * gravity_magnitude * jump_height).max(0.0).sqrt()
}

impl JumpState {
    pub(crate) fn advance_steps(&mut self) {
        self.steps_since_grounded = self.steps_since_grounded.saturating_add(1);
        self.steps_since_jump = self.steps_since_jump.saturating_add(1);
    }

    /// Record a supported tick; grants a fresh budget once a jump is behind us.
    pub(crate) fn mark_supported(&mut self) {
        self.steps_since_grounded = 0;
        if self.steps_since_jump > 1 {
            self.phase = 0;
        }
    }

    /// Keep the next ground snap from pulling the character back down.
    /// Calling this repeatedly within a tick has the same effect as once.
    pub fn prevent_snap_to_ground(&mut self) {
        self.steps_since_jump = -1;
    }

    pub(crate) fn update_coyote(&mut self, on_ground: bool, dt: f32) {
        if on_ground {
            self.coyote_timer = 0.0;
        } else {
            self.coyote_timer += dt.max(0.0);
        }
    }

    /// Arbitrate a jump request and add the impulse to `velocity`.
    /// Returns `None` and leaves all state untouched when no jump is allowed.
    pub fn try_jump(&mut self, velocity: &mut Vec3, ctx: &JumpContext) -> Option<JumpKind> {
        let surface = ctx.surface;
        let (kind, direction) = if surface.on_ground() {
            (JumpKind::Ground, surface.contact_normal)
        } else if surface.on_steep() {
            // Wall jumps restore the whole air budget.
            self.phase = 0;
            (JumpKind::Wall, surface.steep_normal)
        } else if ctx.max_air_jumps > 0 && self.phase <= u32::from(ctx.max_air_jumps) {
            if self.phase == 0 {
                if self.coyote_timer < ctx.coyote_grace {
                    return None;
                }
                // Walking off a ledge spends the first air jump.
                self.phase = 1;
            }
            (JumpKind::Air, surface.contact_normal)
        } else {
            return None;
        };

        self.steps_since_jump = 0;
        self.phase += 1;

        let mut jump_speed = jump_speed(ctx.gravity_magnitude, ctx.jump_height);
        if ctx.submergence > 0.0 && ctx.swim_threshold > 0.0 {
            jump_speed *= (1.0 - ctx.submergence / ctx.swim_threshold).max(0.0);
        }

        let direction = normalize_or(direction + ctx.up, ctx.up);
        let aligned_speed = velocity.dot(direction);
        if aligned_speed > 0.0 {
            jump_speed = (jump_speed - aligned_speed).max(0.0);
        } else if aligned_speed < 0.0 {
            jump_speed -= aligned_speed;
        }

        *velocity += direction * jump_speed;
        Some(kind)
    }
}
