//! Bounded overlap queries (sphere vs actor positions)
//!
//! Синхронный broad-phase без аллокаций на запрос: результат пишется в
//! scratch буфер фиксированной ёмкости, которым владеет вызывающий компонент.
//! Фильтрация по слоям: через rapier `CollisionGroups` / `Group`.

use bevy::prelude::*;
use bevy_rapier3d::prelude::{CollisionGroups, Group};

/// Collision layers
pub mod layers {
    use bevy_rapier3d::prelude::Group;

    pub const PLAYER: Group = Group::GROUP_8;
    pub const ENEMY: Group = Group::GROUP_9;
    pub const PROJECTILE: Group = Group::GROUP_10;
}

/// Collision groups игрока (collide со всеми)
pub fn player_groups() -> CollisionGroups {
    CollisionGroups::new(layers::PLAYER, Group::ALL)
}

/// Collision groups врага
pub fn enemy_groups() -> CollisionGroups {
    CollisionGroups::new(layers::ENEMY, Group::ALL)
}

/// Collision groups projectile (только враги)
pub fn projectile_groups() -> CollisionGroups {
    CollisionGroups::new(layers::PROJECTILE, layers::ENEMY)
}

/// Scratch буфер для overlap запросов (ёмкость фиксирована при создании)
#[derive(Debug, Clone, Default)]
pub struct OverlapScratch {
    hits: Vec<Entity>,
    capacity: usize,
}

impl OverlapScratch {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            hits: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn hits(&self) -> &[Entity] {
        &self.hits
    }

    /// Sphere overlap: кандидаты в радиусе с пересекающимся слоем
    ///
    /// Возвращает количество попаданий (никогда больше `capacity`).
    pub fn overlap_sphere(
        &mut self,
        center: Vec3,
        radius: f32,
        mask: Group,
        candidates: impl IntoIterator<Item = (Entity, Vec3, Group)>,
    ) -> usize {
        self.hits.clear();
        let radius_sq = radius * radius;

        for (entity, position, memberships) in candidates {
            if self.hits.len() >= self.capacity {
                break;
            }

            if !memberships.intersects(mask) {
                continue;
            }

            if position.distance_squared(center) <= radius_sq {
                self.hits.push(entity);
            }
        }

        self.hits.len()
    }
}
