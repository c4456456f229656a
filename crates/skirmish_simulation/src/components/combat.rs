//! Combat компоненты: target provider, cooldown, disable-on-death

use bevy::prelude::*;

/// Target provider: "моя текущая цель"
///
/// Пишут: `PlayerDetector` (враг) и player targeting.
/// Читают: movers, combaters, animation.
///
/// Handle принадлежит ссылающемуся актору, не цели. Перед использованием
/// каждый tick валидируется (entity существует и жив).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CurrentTarget(pub Option<Entity>);

impl CurrentTarget {
    pub fn get(&self) -> Option<Entity> {
        self.0
    }

    pub fn set(&mut self, target: Option<Entity>) {
        self.0 = target;
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }
}

/// Cooldown: timestamp следующего разрешённого действия
///
/// Монотонный: двигается только через `trigger` (успешное действие).
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct Cooldown {
    pub next_ready: f32,
}

impl Cooldown {
    pub fn is_ready(&self, now: f32) -> bool {
        now >= self.next_ready
    }

    /// Перезарядка на `1 / rate` секунд от `now`
    ///
    /// rate ≤ 0: действие больше никогда не станет ready.
    pub fn trigger(&mut self, now: f32, rate: f32) {
        let next = if rate > 0.0 { now + 1.0 / rate } else { f32::INFINITY };
        self.next_ready = self.next_ready.max(next);
    }
}

/// Поведение, которое можно отключить при смерти актора
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum Behavior {
    Detector,
    EnemyMover,
    EnemyCombat,
    PlayerMover,
    PlayerCombat,
}

/// Список поведений, отключаемых при смерти (конфигурируется при спавне)
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct DisableOnDeath(pub Vec<Behavior>);

impl DisableOnDeath {
    pub fn contains(&self, behavior: Behavior) -> bool {
        self.0.contains(&behavior)
    }
}
