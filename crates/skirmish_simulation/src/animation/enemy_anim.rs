//! Enemy animator: hit reaction window, death, locomotion params
//!
//! Hit reaction:
//! - ActorHit → Hit trigger, mover выключен, погоня остановлена
//! - через `recovery_window` секунд → mover включён, погоня к цели детектора
//! - во время окна (и после смерти) новые hits игнорируются
//!
//! Death: Dead = true (sink заблокирован), mover и combater выключены.

use bevy::prelude::*;

use crate::ai::{ChaseState, EnemyMover};
use crate::animation::{params, AnimatorParams};
use crate::clock::GameClock;
use crate::combat::{ActorHit, EnemyCombater, EntityDied};
use crate::components::{CurrentTarget, Health};

/// Длительность hit reaction окна (секунды)
pub const HIT_RECOVERY_WINDOW: f32 = 0.1;

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct EnemyAnimator {
    /// Внутри hit reaction окна
    pub hit: bool,
    pub dead: bool,
    pub movement_disabled: bool,
    /// GameClock время окончания hit окна
    pub recover_at: f32,
    pub recovery_window: f32,
}

impl Default for EnemyAnimator {
    fn default() -> Self {
        Self {
            hit: false,
            dead: false,
            movement_disabled: false,
            recover_at: 0.0,
            recovery_window: HIT_RECOVERY_WINDOW,
        }
    }
}

impl EnemyAnimator {
    /// Начать hit окно; false: hit проигнорирован
    pub fn begin_hit(&mut self, now: f32) -> bool {
        if self.dead || self.hit {
            return false;
        }
        self.hit = true;
        self.movement_disabled = true;
        self.recover_at = now + self.recovery_window;
        true
    }

    /// Закончить hit окно если время пришло
    pub fn try_recover(&mut self, now: f32) -> bool {
        if !self.hit || self.dead || now < self.recover_at {
            return false;
        }
        self.hit = false;
        self.movement_disabled = false;
        true
    }
}

/// Speed parameter по состоянию погони
pub fn chase_speed(state: ChaseState) -> f32 {
    match state {
        ChaseState::Chasing => 1.0,
        ChaseState::AtTarget | ChaseState::Idle => 0.0,
    }
}

/// System: ActorHit → hit reaction
pub fn react_enemy_hits(
    mut hit_events: EventReader<ActorHit>,
    mut enemies: Query<(&mut EnemyAnimator, Option<&mut AnimatorParams>, Option<&mut EnemyMover>)>,
    clock: Res<GameClock>,
) {
    for event in hit_events.read() {
        let Ok((mut animator, anim_params, mover)) = enemies.get_mut(event.entity) else {
            continue;
        };

        if !animator.begin_hit(clock.now()) {
            continue;
        }

        if let Some(mut sink) = anim_params {
            sink.set_trigger(params::HIT);
        }

        if let Some(mut mover) = mover {
            mover.enabled = false;
            mover.set_chasing(false, None);
        }
    }
}

/// System: EntityDied → death animation
pub fn react_enemy_death(
    mut death_events: EventReader<EntityDied>,
    mut enemies: Query<(
        &mut EnemyAnimator,
        Option<&mut AnimatorParams>,
        Option<&mut EnemyMover>,
        Option<&mut EnemyCombater>,
    )>,
) {
    for event in death_events.read() {
        let Ok((mut animator, anim_params, mover, combater)) = enemies.get_mut(event.entity) else {
            continue;
        };

        animator.dead = true;
        animator.hit = false;

        if let Some(mut sink) = anim_params {
            sink.mark_dead(params::DEAD);
        }

        if let Some(mut mover) = mover {
            mover.enabled = false;
            mover.set_chasing(false, None);
        }

        if let Some(mut combater) = combater {
            combater.enabled = false;
            combater.target_in_range = false;
        }

        crate::log(&format!("Enemy {:?}: death animation", event.entity));
    }
}

/// System: конец hit окна → погоня к текущей цели детектора
pub fn recover_from_hit(
    mut enemies: Query<(&mut EnemyAnimator, Option<&mut EnemyMover>, Option<&CurrentTarget>)>,
    healths: Query<&Health>,
    clock: Res<GameClock>,
) {
    let now = clock.now();

    for (mut animator, mover, current_target) in enemies.iter_mut() {
        if !animator.try_recover(now) {
            continue;
        }

        let Some(mut mover) = mover else {
            continue;
        };

        let target = current_target
            .and_then(|t| t.get())
            .filter(|target| healths.get(*target).map(|h| h.is_alive()).unwrap_or(false));

        mover.enabled = true;
        mover.set_chasing(true, target);
        if target.is_some() {
            mover.target = target;
        }
    }
}

/// System: Speed / IsAttacking params
pub fn update_enemy_animation(
    mut enemies: Query<(
        &EnemyAnimator,
        &mut AnimatorParams,
        Option<&EnemyMover>,
        Option<&EnemyCombater>,
    )>,
) {
    for (animator, mut sink, mover, combater) in enemies.iter_mut() {
        if !animator.movement_disabled {
            let speed = mover.map(|m| chase_speed(m.state)).unwrap_or(0.0);
            sink.set_float(params::SPEED, speed);
        }

        if let Some(combater) = combater {
            sink.set_bool(params::IS_ATTACKING, combater.target_in_range);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_window_ignores_repeated_hits() {
        let mut animator = EnemyAnimator::default();

        assert!(animator.begin_hit(1.0));
        assert!(!animator.begin_hit(1.05));
        assert!(animator.movement_disabled);

        assert!(!animator.try_recover(1.05));
        assert!(animator.try_recover(1.15));
        assert!(!animator.movement_disabled);

        assert!(animator.begin_hit(1.2));
    }

    #[test]
    fn test_dead_animator_ignores_hits() {
        let mut animator = EnemyAnimator {
            dead: true,
            ..default()
        };
        assert!(!animator.begin_hit(0.0));
        assert!(!animator.try_recover(10.0));
    }

    #[test]
    fn test_chase_speed_mapping() {
        assert_eq!(chase_speed(ChaseState::Chasing), 1.0);
        assert_eq!(chase_speed(ChaseState::AtTarget), 0.0);
        assert_eq!(chase_speed(ChaseState::Idle), 0.0);
    }
}
