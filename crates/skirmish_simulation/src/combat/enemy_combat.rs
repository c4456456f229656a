//! Enemy combater: melee атака по цели детектора
//!
//! Каждый tick: цель из CurrentTarget (валидируется), range check.
//! Cooldown готов + цель в радиусе → развернуться к цели, DamageRequest,
//! cooldown = now + 1/attack_rate.

use bevy::prelude::*;

use crate::clock::GameClock;
use crate::combat::DamageRequest;
use crate::components::{Cooldown, CurrentTarget, Health};
use crate::config::EnemyTuning;
use crate::physics::{horizontal_direction, look_rotation};

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(CurrentTarget)]
pub struct EnemyCombater {
    /// Радиус атаки (метры)
    pub attack_range: f32,
    /// Атак в секунду
    pub attack_rate: f32,
    pub attack_damage: f32,
    pub cooldown: Cooldown,
    /// Цель в радиусе атаки (читает animation)
    pub target_in_range: bool,
    pub enabled: bool,
}

impl Default for EnemyCombater {
    fn default() -> Self {
        Self {
            attack_range: 2.0,
            attack_rate: 1.0,
            attack_damage: 10.0,
            cooldown: Cooldown::default(),
            target_in_range: false,
            enabled: true,
        }
    }
}

impl EnemyCombater {
    pub fn from_tuning(tuning: &EnemyTuning) -> Self {
        Self {
            attack_range: tuning.attack_range,
            attack_rate: tuning.attack_rate,
            attack_damage: tuning.attack_damage,
            ..default()
        }
    }

    /// Обновить range flag; true: атака разрешена в этот tick (cooldown re-armed)
    pub fn try_attack(&mut self, now: f32, distance_to_target: Option<f32>) -> bool {
        self.target_in_range = distance_to_target
            .map(|distance| distance <= self.attack_range)
            .unwrap_or(false);

        if !self.target_in_range || !self.cooldown.is_ready(now) {
            return false;
        }

        self.cooldown.trigger(now, self.attack_rate);
        true
    }
}

/// System: enemy attack
pub fn enemy_attack(
    mut combaters: Query<(Entity, &mut Transform, &mut EnemyCombater, &CurrentTarget)>,
    targets: Query<(&Transform, &Health), Without<EnemyCombater>>,
    clock: Res<GameClock>,
    mut damage_events: EventWriter<DamageRequest>,
) {
    let now = clock.now();

    for (entity, mut transform, mut combater, current_target) in combaters.iter_mut() {
        if !combater.enabled {
            combater.target_in_range = false;
            continue;
        }

        let target = current_target
            .get()
            .and_then(|target| targets.get(target).ok().map(|(t, h)| (target, t.translation, h)))
            .filter(|(_, _, health)| health.is_alive());

        let distance = target.map(|(_, position, _)| transform.translation.distance(position));

        if !combater.try_attack(now, distance) {
            continue;
        }

        let Some((target, target_position, _)) = target else {
            continue;
        };

        if let Some(direction) = horizontal_direction(transform.translation, target_position) {
            transform.rotation = look_rotation(direction);
        }

        damage_events.write(DamageRequest {
            source: Some(entity),
            target,
            amount: combater.attack_damage,
        });

        crate::log(&format!(
            "⚔️ Enemy {:?} hits {:?} for {}",
            entity, target, combater.attack_damage
        ));
    }
}
