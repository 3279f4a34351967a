//! Core domain: world-level resources shared by every character.

mod gravity;

pub use gravity::{GravityField, STANDARD_GRAVITY};

use bevy::prelude::*;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GravityField>();
    }
}
