//! Enemy chase mover
//!
//! FSM: Idle → Chasing → AtTarget
//! - TargetAcquired → Chasing (если у детектора есть валидная цель)
//! - Chasing: поворот к цели (slerp) + движение по XZ до stopping distance
//! - Цель пропала/умерла посреди погони → Idle

use bevy::prelude::*;

use crate::ai::TargetAcquired;
use crate::clock::GameClock;
use crate::components::{CurrentTarget, Health};
use crate::config::EnemyTuning;
use crate::physics::{horizontal_direction, horizontal_distance, rotate_towards};

/// Состояние погони
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum ChaseState {
    #[default]
    Idle,
    Chasing,
    AtTarget,
}

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct EnemyMover {
    /// m/s
    pub move_speed: f32,
    /// Коэффициент slerp в секунду
    pub rotation_speed: f32,
    pub stopping_distance: f32,
    pub state: ChaseState,
    /// Цель, записанная при последнем TargetAcquired
    pub target: Option<Entity>,
    pub enabled: bool,
}

impl Default for EnemyMover {
    fn default() -> Self {
        Self {
            move_speed: 3.0,
            rotation_speed: 5.0,
            stopping_distance: 1.5,
            state: ChaseState::Idle,
            target: None,
            enabled: true,
        }
    }
}

impl EnemyMover {
    pub fn from_tuning(tuning: &EnemyTuning) -> Self {
        Self {
            move_speed: tuning.move_speed,
            rotation_speed: tuning.rotation_speed,
            stopping_distance: tuning.stopping_distance,
            ..default()
        }
    }

    pub fn is_chasing(&self) -> bool {
        self.state == ChaseState::Chasing
    }

    pub fn is_at_target(&self) -> bool {
        self.state == ChaseState::AtTarget
    }

    /// Включить/выключить погоню
    ///
    /// `chasing == true` без валидной цели у провайдера: тихий no-op.
    pub fn set_chasing(&mut self, chasing: bool, provider_target: Option<Entity>) {
        if chasing {
            if provider_target.is_none() {
                return;
            }
            self.state = ChaseState::Chasing;
        } else {
            self.state = ChaseState::Idle;
        }
    }

    /// Реакция на TargetAcquired
    pub fn on_target_acquired(&mut self, provider_target: Option<Entity>) {
        self.set_chasing(true, provider_target);
        self.target = provider_target;
    }

    /// Один tick погони к позиции цели
    pub fn chase_step(&mut self, transform: &mut Transform, target_position: Vec3, delta: f32) {
        let position = transform.translation;
        let direction = horizontal_direction(position, target_position);

        if let Some(direction) = direction {
            transform.rotation = rotate_towards(transform.rotation, direction, self.rotation_speed * delta);
        }

        if horizontal_distance(position, target_position) <= self.stopping_distance {
            self.state = ChaseState::AtTarget;
            return;
        }

        if let Some(direction) = direction {
            transform.translation += direction * self.move_speed * delta;
        }
    }
}

/// System: TargetAcquired → начать погоню
pub fn start_chase_on_target_acquired(
    mut acquired_events: EventReader<TargetAcquired>,
    mut movers: Query<(&mut EnemyMover, &CurrentTarget)>,
    healths: Query<&Health>,
) {
    for event in acquired_events.read() {
        let Ok((mut mover, current_target)) = movers.get_mut(event.observer) else {
            continue;
        };

        // Выключенный mover не подписан на детектор
        if !mover.enabled {
            continue;
        }

        let provider_target = current_target
            .get()
            .filter(|target| healths.get(*target).map(|h| h.is_alive()).unwrap_or(false));

        mover.on_target_acquired(provider_target);
    }
}

/// System: погоня
pub fn chase_target(
    mut movers: Query<(Entity, &mut Transform, &mut EnemyMover)>,
    targets: Query<(&Transform, &Health), Without<EnemyMover>>,
    clock: Res<GameClock>,
) {
    let delta = clock.delta();

    for (entity, mut transform, mut mover) in movers.iter_mut() {
        if !mover.enabled || mover.state != ChaseState::Chasing {
            continue;
        }

        let target_position = mover
            .target
            .and_then(|target| targets.get(target).ok())
            .filter(|(_, health)| health.is_alive())
            .map(|(target_transform, _)| target_transform.translation);

        let Some(target_position) = target_position else {
            crate::log(&format!("Enemy {:?}: chase target invalid, back to Idle", entity));
            mover.set_chasing(false, None);
            continue;
        };

        mover.chase_step(&mut transform, target_position, delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_chasing_without_target_is_noop() {
        let mut mover = EnemyMover::default();
        mover.set_chasing(true, None);
        assert_eq!(mover.state, ChaseState::Idle);

        mover.state = ChaseState::AtTarget;
        mover.set_chasing(true, None);
        assert_eq!(mover.state, ChaseState::AtTarget);
    }

    #[test]
    fn test_set_chasing_false_clears_at_target() {
        let mut mover = EnemyMover {
            state: ChaseState::AtTarget,
            ..default()
        };
        mover.set_chasing(false, None);
        assert_eq!(mover.state, ChaseState::Idle);
    }

    #[test]
    fn test_target_acquired_starts_chase() {
        let mut mover = EnemyMover::default();
        let target = Entity::from_raw(5);

        mover.on_target_acquired(Some(target));

        assert!(mover.is_chasing());
        assert_eq!(mover.target, Some(target));
    }

    #[test]
    fn test_chase_step_moves_horizontally() {
        let mut mover = EnemyMover {
            state: ChaseState::Chasing,
            ..default()
        };
        let mut transform = Transform::from_xyz(0.0, 0.0, 0.0);

        mover.chase_step(&mut transform, Vec3::new(10.0, 3.0, 0.0), 1.0);

        assert_eq!(mover.state, ChaseState::Chasing);
        assert!((transform.translation.x - 3.0).abs() < 1e-5);
        assert_eq!(transform.translation.y, 0.0);
    }

    #[test]
    fn test_chase_step_stops_inside_stopping_distance() {
        let mut mover = EnemyMover {
            state: ChaseState::Chasing,
            ..default()
        };
        let mut transform = Transform::from_xyz(0.0, 0.0, 0.0);

        mover.chase_step(&mut transform, Vec3::new(1.0, 0.0, 1.0), 1.0 / 60.0);

        assert!(mover.is_at_target());
        assert_eq!(transform.translation, Vec3::ZERO);
    }
}
