//! Physics simulation module
//!
//! Kinematic контроллер (гравитация, ground snap) и bounded overlap queries.

pub mod movement;
pub mod overlap;

// Re-export основных типов
pub use movement::{
    apply_gravity, horizontal_direction, horizontal_distance, look_rotation, rotate_towards,
    KinematicController, GROUNDED_VELOCITY,
};
pub use overlap::{enemy_groups, layers, player_groups, projectile_groups, OverlapScratch};
