//! Player animator: Speed / Shoot / Hit / Dead

use bevy::prelude::*;

use crate::animation::{params, AnimatorParams};
use crate::combat::{ActorHit, EntityDied, PlayerCombat};
use crate::player::PlayerMover;

/// Marker: entity управляет player animator
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PlayerAnimator;

/// Speed = 1 пока есть movement input
pub fn locomotion_speed(is_moving: bool) -> f32 {
    if is_moving {
        1.0
    } else {
        0.0
    }
}

/// System: locomotion + shoot params
pub fn update_player_animation(
    mut animators: Query<
        (&mut AnimatorParams, Option<&PlayerMover>, Option<&PlayerCombat>),
        With<PlayerAnimator>,
    >,
) {
    for (mut sink, mover, combat) in animators.iter_mut() {
        if let Some(mover) = mover {
            sink.set_float(params::SPEED, locomotion_speed(mover.is_moving));
        }
        if let Some(combat) = combat {
            sink.set_bool(params::SHOOT, combat.shooting);
        }
    }
}

/// System: ActorHit → Hit trigger
pub fn react_player_hits(
    mut hit_events: EventReader<ActorHit>,
    mut animators: Query<Option<&mut AnimatorParams>, With<PlayerAnimator>>,
) {
    for event in hit_events.read() {
        let Ok(Some(mut sink)) = animators.get_mut(event.entity) else {
            continue;
        };
        sink.set_trigger(params::HIT);
    }
}

/// System: EntityDied → Dead = true (lock)
pub fn react_player_death(
    mut death_events: EventReader<EntityDied>,
    mut animators: Query<Option<&mut AnimatorParams>, With<PlayerAnimator>>,
) {
    for event in death_events.read() {
        let Ok(Some(mut sink)) = animators.get_mut(event.entity) else {
            continue;
        };
        sink.mark_dead(params::DEAD);
        crate::log(&format!("Player {:?}: death animation", event.entity));
    }
}
