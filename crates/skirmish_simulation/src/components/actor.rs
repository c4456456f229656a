//! Базовые компоненты акторов: Actor, ActorTag, Health

use bevy::prelude::*;

/// Тег актора (фильтр для detection, аналог tag сцены)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum ActorTag {
    #[default]
    Untagged,
    Player,
    Enemy,
}

/// Актор (игрок или враг): базовый компонент для живых существ
///
/// Автоматически добавляет Health и Transform через Required Components.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Health, Transform)]
pub struct Actor {
    pub tag: ActorTag,
}

impl Actor {
    pub fn new(tag: ActorTag) -> Self {
        Self { tag }
    }
}

/// Результат единственной точки входа урона [`Health::apply_damage`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// amount ≤ 0 или актор уже мертв: ничего не изменилось
    Ignored,
    /// Урон применён, актор жив
    Damaged { current: f32 },
    /// Урон применён и здоровье впервые дошло до 0
    Killed,
}

impl DamageOutcome {
    pub fn is_applied(&self) -> bool {
        !matches!(self, DamageOutcome::Ignored)
    }
}

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max. После `dead == true` current остаётся 0,
/// урон больше не применяется. Меняется только через `apply_damage`.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Health {
    current: f32,
    max: f32,
    dead: bool,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0) // Default 100 HP
    }
}

impl Health {
    pub fn new(max: f32) -> Self {
        let max = max.max(0.0);
        Self {
            current: max,
            max,
            dead: false,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn is_alive(&self) -> bool {
        !self.dead && self.current > 0.0
    }

    /// Начало сессии: полное здоровье, не мертв
    pub fn reset(&mut self) {
        self.current = self.max;
        self.dead = false;
    }

    pub fn apply_damage(&mut self, amount: f32) -> DamageOutcome {
        // NaN тоже отсекается этим сравнением
        if self.dead || !(amount > 0.0) {
            return DamageOutcome::Ignored;
        }

        self.current = (self.current - amount).clamp(0.0, self.max);

        if self.current <= 0.0 {
            self.current = 0.0;
            self.dead = true;
            DamageOutcome::Killed
        } else {
            DamageOutcome::Damaged {
                current: self.current,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_sequence_40_40_40() {
        let mut health = Health::new(100.0);

        assert_eq!(health.apply_damage(40.0), DamageOutcome::Damaged { current: 60.0 });
        assert_eq!(health.apply_damage(40.0), DamageOutcome::Damaged { current: 20.0 });
        assert_eq!(health.apply_damage(40.0), DamageOutcome::Killed);

        assert_eq!(health.current(), 0.0);
        assert!(!health.is_alive());
        assert!(health.is_dead());
    }

    #[test]
    fn test_non_positive_damage_ignored() {
        let mut health = Health::new(100.0);

        for amount in [0.0, -5.0, -0.001, f32::NAN, f32::NEG_INFINITY] {
            assert_eq!(health.apply_damage(amount), DamageOutcome::Ignored);
            assert_eq!(health.current(), 100.0);
        }
    }

    #[test]
    fn test_dead_health_ignores_damage() {
        let mut health = Health::new(50.0);
        assert_eq!(health.apply_damage(500.0), DamageOutcome::Killed);

        // Повторное пересечение 0: no-op
        assert_eq!(health.apply_damage(10.0), DamageOutcome::Ignored);
        assert_eq!(health.current(), 0.0);
    }

    #[test]
    fn test_health_stays_in_bounds() {
        let mut health = Health::new(100.0);
        let mut deaths = 0;

        for amount in [3.5, 0.0, 17.0, -4.0, 25.0, 33.3, 99.0, 12.0, 1.0] {
            if health.apply_damage(amount) == DamageOutcome::Killed {
                deaths += 1;
            }
            assert!(health.current() >= 0.0 && health.current() <= health.max());
        }

        assert_eq!(deaths, 1);
    }

    #[test]
    fn test_reset_restores_max() {
        let mut health = Health::new(80.0);
        health.apply_damage(100.0);
        health.reset();

        assert_eq!(health.current(), 80.0);
        assert!(health.is_alive());
    }
}
