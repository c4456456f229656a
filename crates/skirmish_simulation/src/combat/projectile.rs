//! Projectile игрока
//!
//! - Lifetime через DespawnAfter: уничтожается по таймеру независимо от попаданий
//! - Движение: прямолинейное, без гравитации
//! - Урон на overlap ENTER с врагом (уже пересекающийся враг не получает
//!   урон повторно; вышел и вошёл снова: получает). Сам projectile летит дальше.
//! - Мёртвый враг тоже получает DamageRequest (Health его игнорирует)

use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionGroups;

use crate::clock::GameClock;
use crate::combat::{DamageRequest, DespawnAfter};
use crate::components::{Enemy, Health};
use crate::config::ProjectileTuning;
use crate::physics::{look_rotation, projectile_groups};

#[derive(Component, Debug, Clone)]
#[require(Transform)]
pub struct Projectile {
    pub damage: f32,
    /// Радиус overlap (пуля + тело врага)
    pub radius: f32,
    /// m/s
    pub velocity: Vec3,
    pub shooter: Option<Entity>,
    /// Враги, пересекавшиеся на прошлом tick
    overlapping: Vec<Entity>,
}

impl Projectile {
    pub fn new(damage: f32, radius: f32, velocity: Vec3, shooter: Option<Entity>) -> Self {
        Self {
            damage,
            radius,
            velocity,
            shooter,
            overlapping: Vec::new(),
        }
    }

    /// Обновить набор пересечений, вернуть только новые (enter)
    pub fn update_overlaps(&mut self, current: Vec<Entity>) -> Vec<Entity> {
        let entered = current
            .iter()
            .copied()
            .filter(|entity| !self.overlapping.contains(entity))
            .collect();
        self.overlapping = current;
        entered
    }
}

/// Spawn projectile с lifetime
pub fn spawn_projectile(
    commands: &mut Commands,
    shooter: Option<Entity>,
    position: Vec3,
    velocity: Vec3,
    tuning: &ProjectileTuning,
    now: f32,
) -> Entity {
    let mut transform = Transform::from_translation(position);
    if let Some(direction) = velocity.try_normalize() {
        transform.rotation = look_rotation(direction);
    }

    commands
        .spawn((
            Projectile::new(tuning.damage, tuning.radius, velocity, shooter),
            transform,
            projectile_groups(),
            DespawnAfter {
                despawn_time: now + tuning.lifetime,
            },
        ))
        .id()
}

/// System: интеграция velocity → position
pub fn move_projectiles(mut projectiles: Query<(&mut Transform, &Projectile)>, clock: Res<GameClock>) {
    let delta = clock.delta();

    for (mut transform, projectile) in projectiles.iter_mut() {
        transform.translation += projectile.velocity * delta;
    }
}

/// System: overlap enter → DamageRequest
pub fn detect_projectile_hits(
    mut projectiles: Query<(Entity, &Transform, &mut Projectile, Option<&CollisionGroups>)>,
    enemies: Query<(Entity, &Transform, Option<&CollisionGroups>), (With<Enemy>, With<Health>, Without<Projectile>)>,
    mut damage_events: EventWriter<DamageRequest>,
) {
    for (projectile_entity, transform, mut projectile, groups) in projectiles.iter_mut() {
        let radius_sq = projectile.radius * projectile.radius;
        let filter = groups.map(|g| g.filters);

        let current: Vec<Entity> = enemies
            .iter()
            .filter(|(_, _, enemy_groups)| match (filter, enemy_groups) {
                (Some(filter), Some(enemy_groups)) => enemy_groups.memberships.intersects(filter),
                _ => true,
            })
            .filter(|(_, enemy_transform, _)| {
                enemy_transform.translation.distance_squared(transform.translation) <= radius_sq
            })
            .map(|(enemy, _, _)| enemy)
            .collect();

        for enemy in projectile.update_overlaps(current) {
            damage_events.write(DamageRequest {
                source: projectile.shooter,
                target: enemy,
                amount: projectile.damage,
            });

            crate::log(&format!(
                "🎯 Projectile {:?} hit {:?} for {}",
                projectile_entity, enemy, projectile.damage
            ));
        }
    }
}
