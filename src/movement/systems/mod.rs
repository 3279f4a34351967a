//! Movement domain: system modules for locomotion updates.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;
pub(crate) mod physics;

pub(crate) use collisions::{evaluate_water, gather_contacts};
pub(crate) use input::read_input;
pub(crate) use movement::{apply_snap_cancellations, refresh_surface_thresholds, step_locomotion};
