//! Player module: движение по input + гравитация kinematic тела

use bevy::prelude::*;

use crate::physics::apply_gravity;
use crate::SimulationSet;

pub mod mover;

pub use mover::{PlayerMover, MOVE_INPUT_THRESHOLD};

/// Player Plugin
///
/// Movement set: move_player → apply_gravity (y после горизонтального шага)
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (mover::move_player, apply_gravity)
                .chain()
                .in_set(SimulationSet::Movement),
        );
    }
}
