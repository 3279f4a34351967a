//! Content domain: data-driven tuning loaded at startup.

mod loader;

pub use loader::{
    ContentLoadError, TUNING_PATH, load_movement_tuning, parse_movement_tuning,
};

use bevy::prelude::*;

use crate::content::loader::load_tuning_on_startup;

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_tuning_on_startup);
    }
}
