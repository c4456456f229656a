//! Damage pipeline и death handling
//!
//! DamageRequest (combaters, projectiles) → apply_damage → Health::apply_damage
//! → HealthChanged / ActorHit / EntityDied.
//!
//! Варианты:
//! - Enemy: ActorHit отправляется ДО вызова Health (hit reaction даже на
//!   проигнорированный урон: animator сам игнорирует, если мертв)
//! - Player: ActorHit только если урон применён
//!
//! Смерть: Dead маркер, DisableOnDeath, у врага ещё DespawnAfter по длине death клипа.

use bevy::prelude::*;

use crate::ai::{EnemyMover, PlayerDetector};
use crate::animation::AnimationClips;
use crate::clock::GameClock;
use crate::combat::{EnemyCombater, PlayerCombat};
use crate::components::{Behavior, CurrentTarget, DamageOutcome, DisableOnDeath, Enemy, Health, Player};
use crate::player::PlayerMover;

/// Fallback задержка деспавна, если death клип не найден (секунды)
pub const DEFAULT_DEATH_DESPAWN_DELAY: f32 = 1.5;

/// Запас после death клипа перед деспавном (секунды)
pub const DEATH_CLIP_PADDING: f32 = 1.0;

/// Запрос на урон (единственный путь к Health из систем)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageRequest {
    /// Кто наносит (None: окружение)
    pub source: Option<Entity>,
    pub target: Entity,
    pub amount: f32,
}

/// Событие: здоровье изменилось (новое значение)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct HealthChanged {
    pub entity: Entity,
    pub current: f32,
}

/// Событие: hit reaction (анимация Hit)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ActorHit {
    pub entity: Entity,
}

/// Событие: entity умер (ровно один раз на актора)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Компонент-маркер: entity мертв
#[derive(Component, Debug)]
pub struct Dead;

/// Компонент-маркер: деспавн entity после указанного времени
///
/// Система `despawn_after_timeout` сравнивает с GameClock и удаляет entity.
#[derive(Component, Debug, Clone, Copy)]
pub struct DespawnAfter {
    /// Время деспавна (секунды GameClock)
    pub despawn_time: f32,
}

/// Задержка деспавна врага: death клип + padding, иначе fallback
pub fn death_despawn_delay(clips: Option<&AnimationClips>) -> f32 {
    clips
        .and_then(|clips| clips.length_containing("Death"))
        .map(|length| length + DEATH_CLIP_PADDING)
        .unwrap_or(DEFAULT_DEATH_DESPAWN_DELAY)
}

/// Система: apply damage от DamageRequest событий
pub fn apply_damage(
    mut requests: EventReader<DamageRequest>,
    mut targets: Query<(&mut Health, Has<Player>, Has<Enemy>)>,
    mut health_changed_events: EventWriter<HealthChanged>,
    mut hit_events: EventWriter<ActorHit>,
    mut entity_died_events: EventWriter<EntityDied>,
) {
    for request in requests.read() {
        let Ok((mut health, is_player, is_enemy)) = targets.get_mut(request.target) else {
            crate::log(&format!(
                "DamageRequest: target {:?} has no Health (despawned?), dropped",
                request.target
            ));
            continue;
        };

        if is_enemy {
            hit_events.write(ActorHit {
                entity: request.target,
            });
        }

        let outcome = health.apply_damage(request.amount);
        if !outcome.is_applied() {
            continue;
        }

        health_changed_events.write(HealthChanged {
            entity: request.target,
            current: health.current(),
        });

        if is_player {
            hit_events.write(ActorHit {
                entity: request.target,
            });
        }

        if outcome == DamageOutcome::Killed {
            entity_died_events.write(EntityDied {
                entity: request.target,
                killer: request.source,
            });

            crate::log_info(&format!(
                "💀 Entity {:?} killed by {:?}",
                request.target, request.source
            ));
        }
    }
}

/// Система: отключение поведений при смерти + Dead маркер
pub fn disable_behaviors_on_death(
    mut commands: Commands,
    mut death_events: EventReader<EntityDied>,
    mut actors: Query<(
        Option<&DisableOnDeath>,
        Option<&mut PlayerDetector>,
        Option<&mut EnemyMover>,
        Option<&mut EnemyCombater>,
        Option<&mut PlayerMover>,
        Option<&mut PlayerCombat>,
        Option<&mut CurrentTarget>,
    )>,
) {
    for event in death_events.read() {
        let Ok((disable, detector, enemy_mover, enemy_combat, player_mover, player_combat, current_target)) =
            actors.get_mut(event.entity)
        else {
            continue;
        };

        if let Some(disable) = disable {
            if disable.contains(Behavior::Detector) {
                if let Some(mut detector) = detector {
                    detector.enabled = false;
                }
            }
            if disable.contains(Behavior::EnemyMover) {
                if let Some(mut mover) = enemy_mover {
                    mover.enabled = false;
                }
            }
            if disable.contains(Behavior::EnemyCombat) {
                if let Some(mut combater) = enemy_combat {
                    combater.enabled = false;
                    combater.target_in_range = false;
                }
            }
            if disable.contains(Behavior::PlayerMover) {
                if let Some(mut mover) = player_mover {
                    mover.enabled = false;
                    mover.is_moving = false;
                }
            }
            if disable.contains(Behavior::PlayerCombat) {
                if let Some(mut combat) = player_combat {
                    combat.enabled = false;
                    combat.shooting = false;
                    if let Some(mut current_target) = current_target {
                        current_target.clear();
                    }
                }
            }
        }

        if let Ok(mut entity_commands) = commands.get_entity(event.entity) {
            entity_commands.insert(Dead);
        }

        crate::log(&format!("Disabled behaviors for dead entity {:?}", event.entity));
    }
}

/// Система: враг → деспавн после death анимации
pub fn schedule_enemy_despawn(
    mut commands: Commands,
    mut death_events: EventReader<EntityDied>,
    enemies: Query<Option<&AnimationClips>, With<Enemy>>,
    clock: Res<GameClock>,
) {
    for event in death_events.read() {
        let Ok(clips) = enemies.get(event.entity) else {
            continue;
        };

        let delay = death_despawn_delay(clips);
        commands.entity(event.entity).insert(DespawnAfter {
            despawn_time: clock.now() + delay,
        });

        crate::log(&format!("Enemy {:?} despawns in {:.2}s", event.entity, delay));
    }
}

/// Система: деспавн по таймауту (projectiles, мёртвые враги)
pub fn despawn_after_timeout(
    mut commands: Commands,
    query: Query<(Entity, &DespawnAfter)>,
    clock: Res<GameClock>,
) {
    let now = clock.now();

    for (entity, despawn_after) in query.iter() {
        if now >= despawn_after.despawn_time {
            if let Ok(mut entity_commands) = commands.get_entity(entity) {
                entity_commands.despawn();
            }
        }
    }
}
