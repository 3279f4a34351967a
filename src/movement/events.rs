//! Movement domain: locomotion messages.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Ask a character to skip ground snapping on its next tick, so scripted
/// launches are not immediately pulled back onto the ground.
#[derive(Debug)]
pub struct CancelGroundSnap {
    pub entity: Entity,
}

impl Message for CancelGroundSnap {}
