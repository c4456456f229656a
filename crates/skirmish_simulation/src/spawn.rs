//! Spawn helpers: player, enemy, UI canvas, input reader
//!
//! Собирают полный набор компонентов актора из `TuningConfig`.

use bevy::prelude::*;

use crate::ai::{EnemyMover, PlayerDetector};
use crate::animation::{AnimationClipInfo, AnimationClips, AnimatorParams, EnemyAnimator, PlayerAnimator};
use crate::combat::{EnemyCombater, PlayerCombat};
use crate::components::{Actor, ActorTag, Behavior, DisableOnDeath, Enemy, Health, MovementInput, Player};
use crate::config::{EnemyTuning, TuningConfig};
use crate::input::{CanvasRect, InputReader};
use crate::physics::{enemy_groups, player_groups, KinematicController};
use crate::player::PlayerMover;

/// Имя death клипа врага
pub const ENEMY_DEATH_CLIP: &str = "Death";

/// Клипы врага из tuning (death клип опционален)
pub fn enemy_clips(tuning: &EnemyTuning) -> AnimationClips {
    AnimationClips::new(
        tuning
            .death_clip_length
            .map(|length| vec![AnimationClipInfo::new(ENEMY_DEATH_CLIP, length)])
            .unwrap_or_default(),
    )
}

/// Spawn игрока
///
/// Создает entity с полным набором компонентов:
/// - Actor (tag Player) + Health
/// - Collision groups (layer PLAYER)
/// - PlayerMover + MovementInput + KinematicController
/// - PlayerCombat (auto-fire)
/// - Animator (PlayerAnimator + AnimatorParams)
/// - DisableOnDeath: mover, combat
pub fn spawn_player(commands: &mut Commands, position: Vec3, tuning: &TuningConfig) -> Entity {
    let entity = commands
        .spawn((
            Transform::from_translation(position),
            Player,
            Actor::new(ActorTag::Player),
            Health::new(tuning.player.max_health),
            player_groups(),
            (
                PlayerMover::from_tuning(&tuning.player),
                MovementInput::default(),
                KinematicController::default(),
            ),
            PlayerCombat::from_tuning(&tuning.player),
            (PlayerAnimator, AnimatorParams::default()),
            DisableOnDeath(vec![Behavior::PlayerMover, Behavior::PlayerCombat]),
        ))
        .id();

    crate::log(&format!("Spawned player {:?} at {:?}", entity, position));
    entity
}

/// Spawn врага
///
/// Detector → mover → combater цепочка, hit reaction окно из tuning,
/// death клип для задержки деспавна.
pub fn spawn_enemy(commands: &mut Commands, position: Vec3, tuning: &TuningConfig) -> Entity {
    let enemy_tuning = &tuning.enemy;

    let entity = commands
        .spawn((
            Transform::from_translation(position),
            Enemy,
            Actor::new(ActorTag::Enemy),
            Health::new(enemy_tuning.max_health),
            enemy_groups(),
            KinematicController::default(),
            (
                PlayerDetector::from_tuning(enemy_tuning),
                EnemyMover::from_tuning(enemy_tuning),
                EnemyCombater::from_tuning(enemy_tuning),
            ),
            (
                EnemyAnimator {
                    recovery_window: enemy_tuning.hit_recovery,
                    ..default()
                },
                AnimatorParams::default(),
                enemy_clips(enemy_tuning),
            ),
            DisableOnDeath(vec![Behavior::Detector, Behavior::EnemyMover, Behavior::EnemyCombat]),
        ))
        .id();

    crate::log(&format!("Spawned enemy {:?} at {:?}", entity, position));
    entity
}

/// Spawn UI canvas
pub fn spawn_canvas(commands: &mut Commands, rect: CanvasRect) -> Entity {
    commands.spawn(rect).id()
}

/// Spawn input reader (джойстик → MovementInput receiver)
pub fn spawn_input_reader(commands: &mut Commands, receiver: Entity, canvas: Entity) -> Entity {
    commands.spawn(InputReader::new(receiver, canvas)).id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_clips_from_tuning() {
        let tuning = EnemyTuning::default();
        assert_eq!(enemy_clips(&tuning).length_containing("Death"), Some(2.0));

        let tuning = EnemyTuning {
            death_clip_length: None,
            ..default()
        };
        assert!(enemy_clips(&tuning).clips.is_empty());
    }

    #[test]
    fn test_spawn_enemy_components() {
        let mut world = World::new();
        let tuning = TuningConfig::default();

        let enemy = spawn_enemy(&mut world.commands(), Vec3::new(3.0, 0.0, 0.0), &tuning);
        world.flush();

        assert!(world.get::<Enemy>(enemy).is_some());
        assert_eq!(world.get::<Health>(enemy).unwrap().max(), 100.0);
        assert!(world.get::<PlayerDetector>(enemy).is_some());
        assert!(world.get::<crate::components::CurrentTarget>(enemy).is_some());
        assert_eq!(world.get::<Actor>(enemy).unwrap().tag, ActorTag::Enemy);
    }
}
