//! Player auto-targeting + стрельба
//!
//! Цель НЕ кешируется: каждый tick overlap query (≤ 25 кандидатов),
//! ближайший живой враг → CurrentTarget. Урон игрок наносит только
//! через projectiles.

use bevy::prelude::*;
use bevy_rapier3d::prelude::{CollisionGroups, Group};

use crate::clock::GameClock;
use crate::combat::spawn_projectile;
use crate::components::{Cooldown, CurrentTarget, Enemy, Health, Player};
use crate::config::{PlayerTuning, TuningConfig};
use crate::physics::{horizontal_direction, layers, rotate_towards, OverlapScratch};

/// Ёмкость scratch буфера игрока
pub const PLAYER_SCRATCH_CAPACITY: usize = 25;

#[derive(Component, Debug, Clone)]
#[require(CurrentTarget)]
pub struct PlayerCombat {
    /// Радиус автонаведения (метры)
    pub attack_radius: f32,
    /// Выстрелов в секунду
    pub attack_rate: f32,
    pub rotation_speed: f32,
    pub projectile_speed: f32,
    /// Fire point в локальных координатах игрока
    pub fire_point_offset: Vec3,
    pub enemy_mask: Group,
    pub cooldown: Cooldown,
    /// Стреляет (читает animation)
    pub shooting: bool,
    pub enabled: bool,
    scratch: OverlapScratch,
}

impl Default for PlayerCombat {
    fn default() -> Self {
        Self {
            attack_radius: 10.0,
            attack_rate: 1.0,
            rotation_speed: 8.0,
            projectile_speed: 20.0,
            fire_point_offset: Vec3::new(0.0, 1.0, -0.5),
            enemy_mask: layers::ENEMY,
            cooldown: Cooldown::default(),
            shooting: false,
            enabled: true,
            scratch: OverlapScratch::with_capacity(PLAYER_SCRATCH_CAPACITY),
        }
    }
}

impl PlayerCombat {
    pub fn from_tuning(tuning: &PlayerTuning) -> Self {
        Self {
            attack_radius: tuning.attack_radius,
            attack_rate: tuning.attack_rate,
            rotation_speed: tuning.combat_rotation_speed,
            projectile_speed: tuning.projectile_speed,
            fire_point_offset: Vec3::from_array(tuning.fire_point_offset),
            ..default()
        }
    }

    /// Fire point в мировых координатах
    pub fn fire_point(&self, transform: &Transform) -> Vec3 {
        transform.translation + transform.rotation * self.fire_point_offset
    }

    /// Ближайший из последних overlap hits, прошедший фильтр
    pub fn closest_target(
        &self,
        origin: Vec3,
        mut position_if_valid: impl FnMut(Entity) -> Option<Vec3>,
    ) -> Option<Entity> {
        self.scratch
            .hits()
            .iter()
            .filter_map(|&entity| position_if_valid(entity).map(|p| (entity, p.distance_squared(origin))))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(entity, _)| entity)
    }
}

/// System: player targeting + fire
pub fn player_attack(
    mut commands: Commands,
    mut players: Query<(Entity, &mut Transform, &mut PlayerCombat, &mut CurrentTarget), With<Player>>,
    enemies: Query<(Entity, &Transform, &CollisionGroups, &Health), (With<Enemy>, Without<Player>)>,
    clock: Res<GameClock>,
    tuning: Res<TuningConfig>,
) {
    let now = clock.now();
    let delta = clock.delta();

    for (entity, mut transform, mut combat, mut current_target) in players.iter_mut() {
        if !combat.enabled {
            continue;
        }

        let origin = transform.translation;
        let radius = combat.attack_radius;
        let mask = combat.enemy_mask;

        combat.scratch.overlap_sphere(
            origin,
            radius,
            mask,
            enemies
                .iter()
                .map(|(enemy, t, groups, _)| (enemy, t.translation, groups.memberships)),
        );

        let target = combat.closest_target(origin, |candidate| {
            enemies
                .get(candidate)
                .ok()
                .filter(|(_, _, _, health)| health.is_alive())
                .map(|(_, t, _, _)| t.translation)
        });

        current_target.set(target);

        let Some(target) = target else {
            combat.shooting = false;
            continue;
        };

        if !combat.cooldown.is_ready(now) {
            continue;
        }

        let Ok((_, target_transform, _, _)) = enemies.get(target) else {
            continue;
        };
        let target_position = target_transform.translation;

        if let Some(direction) = horizontal_direction(origin, target_position) {
            transform.rotation = rotate_towards(transform.rotation, direction, combat.rotation_speed * delta);
        }

        let fire_point = combat.fire_point(&transform);
        let aim = (target_position - fire_point)
            .try_normalize()
            .unwrap_or(transform.forward().as_vec3());

        spawn_projectile(
            &mut commands,
            Some(entity),
            fire_point,
            aim * combat.projectile_speed,
            &tuning.projectile,
            now,
        );

        combat.shooting = true;
        let rate = combat.attack_rate;
        combat.cooldown.trigger(now, rate);

        crate::log(&format!("🔫 Player {:?} fires at {:?}", entity, target));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_combat_defaults() {
        let combat = PlayerCombat::default();
        assert_eq!(combat.attack_radius, 10.0);
        assert_eq!(combat.attack_rate, 1.0);
        assert_eq!(combat.enemy_mask, layers::ENEMY);
        assert_eq!(combat.scratch.capacity(), PLAYER_SCRATCH_CAPACITY);
    }

    #[test]
    fn test_closest_target_skips_invalid() {
        let mut combat = PlayerCombat::default();

        let far = Entity::from_raw(1);
        let dead_near = Entity::from_raw(2);
        let mid = Entity::from_raw(3);

        combat.scratch.overlap_sphere(
            Vec3::ZERO,
            10.0,
            layers::ENEMY,
            vec![
                (far, Vec3::new(8.0, 0.0, 0.0), layers::ENEMY),
                (dead_near, Vec3::new(1.0, 0.0, 0.0), layers::ENEMY),
                (mid, Vec3::new(0.0, 0.0, 4.0), layers::ENEMY),
            ],
        );

        let target = combat.closest_target(Vec3::ZERO, |entity| match entity {
            e if e == far => Some(Vec3::new(8.0, 0.0, 0.0)),
            e if e == mid => Some(Vec3::new(0.0, 0.0, 4.0)),
            _ => None,
        });

        assert_eq!(target, Some(mid));
    }

    #[test]
    fn test_fire_point_follows_rotation() {
        let combat = PlayerCombat::default();
        let transform = Transform::from_xyz(1.0, 0.0, 1.0)
            .with_rotation(Quat::from_rotation_y(std::f32::consts::PI));

        let fire_point = combat.fire_point(&transform);

        // Развёрнут на 180° → fire point смотрит в +Z
        assert!((fire_point - Vec3::new(1.0, 1.0, 1.5)).length() < 1e-5);
    }
}
