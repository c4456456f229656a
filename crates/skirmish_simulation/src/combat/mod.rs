//! Combat module
//!
//! Enemy melee, player auto-fire, projectiles, damage pipeline, смерть и деспавн.

use bevy::prelude::*;

use crate::SimulationSet;

pub mod damage;
pub mod enemy_combat;
pub mod player_combat;
pub mod projectile;


// Re-export основных типов
pub use damage::{
    death_despawn_delay, ActorHit, DamageRequest, Dead, DespawnAfter, EntityDied, HealthChanged,
    DEATH_CLIP_PADDING, DEFAULT_DEATH_DESPAWN_DELAY,
};
pub use enemy_combat::EnemyCombater;
pub use player_combat::{PlayerCombat, PLAYER_SCRATCH_CAPACITY};
pub use projectile::{spawn_projectile, Projectile};

/// Combat Plugin
///
/// Порядок выполнения (FixedUpdate):
/// 1. player_attack, enemy_attack: DamageRequest / spawn projectiles (Combat)
/// 2. move_projectiles → detect_projectile_hits (Projectiles)
/// 3. apply_damage → disable_behaviors_on_death → schedule_enemy_despawn (Damage)
/// 4. despawn_after_timeout (Cleanup)
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DamageRequest>()
            .add_event::<HealthChanged>()
            .add_event::<ActorHit>()
            .add_event::<EntityDied>();

        app.add_systems(
            FixedUpdate,
            (player_combat::player_attack, enemy_combat::enemy_attack).in_set(SimulationSet::Combat),
        );

        app.add_systems(
            FixedUpdate,
            (projectile::move_projectiles, projectile::detect_projectile_hits)
                .chain()
                .in_set(SimulationSet::Projectiles),
        );

        app.add_systems(
            FixedUpdate,
            (
                damage::apply_damage,
                damage::disable_behaviors_on_death,
                damage::schedule_enemy_despawn,
            )
                .chain()
                .in_set(SimulationSet::Damage),
        );

        app.add_systems(
            FixedUpdate,
            damage::despawn_after_timeout.in_set(SimulationSet::Cleanup),
        );
    }
}
