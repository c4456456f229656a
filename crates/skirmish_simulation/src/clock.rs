//! Игровые часы симуляции
//!
//! Все rate-limited системы (detection scan, attack cooldown, hit recovery,
//! delayed despawn) сравнивают сохранённое "next allowed time" с `GameClock`,
//! а не с wall clock. Часы двигаются только из FixedUpdate.

use bevy::prelude::*;
use std::time::Duration;

/// Частота simulation tick
pub const TICK_HZ: f64 = 60.0;

/// Длительность одного fixed tick
///
/// Одно и то же значение используется для `Time<Fixed>` и для
/// `TimeUpdateStrategy::ManualDuration`, чтобы один `app.update()` == один tick.
pub fn tick_duration() -> Duration {
    Duration::from_secs_f64(1.0 / TICK_HZ)
}

/// Монотонные игровые часы (секунды с начала сессии)
#[derive(Resource, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Resource)]
pub struct GameClock {
    pub elapsed: f32,
    pub delta: f32,
}

impl GameClock {
    pub fn now(&self) -> f32 {
        self.elapsed
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Продвинуть часы на `delta` секунд (отрицательные значения игнорируются)
    pub fn advance(&mut self, delta: f32) {
        self.delta = delta.max(0.0);
        self.elapsed += self.delta;
    }
}

/// System: первая система каждого fixed tick
pub fn advance_game_clock(time: Res<Time<Fixed>>, mut clock: ResMut<GameClock>) {
    clock.advance(time.delta_secs());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_advances_monotonically() {
        let mut clock = GameClock::default();
        clock.advance(0.5);
        clock.advance(0.25);
        assert_eq!(clock.now(), 0.75);
        assert_eq!(clock.delta(), 0.25);

        clock.advance(-1.0);
        assert_eq!(clock.now(), 0.75);
        assert_eq!(clock.delta(), 0.0);
    }

    #[test]
    fn test_tick_duration_matches_hz() {
        let secs = tick_duration().as_secs_f64();
        assert!((secs - 1.0 / 60.0).abs() < 1e-6);
    }
}
