//! Kinematic контроллер для NPC/игрока
//!
//! Архитектура:
//! - Custom vertical velocity integration (гравитация + ground snap)
//! - Горизонтальное движение пишут movers (player input, enemy chase)
//! - Поворот: yaw-only, forward = -Z
//!
//! Детерминизм: fixed timestep (60Hz), dt берётся из GameClock

use bevy::prelude::*;
use crate::clock::GameClock;

/// Вертикальная скорость "прилипания" к земле
///
/// Небольшое отрицательное значение: grounded регистрируется каждый frame,
/// но скорость падения не накапливается.
pub const GROUNDED_VELOCITY: f32 = -2.0;

/// Kinematic контроллер компонент
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct KinematicController {
    /// Сила гравитации (m/s²)
    pub gravity: f32,
    /// Текущая вертикальная скорость (m/s)
    pub vertical_velocity: f32,
    /// На земле ли персонаж
    pub grounded: bool,
    /// Высота пола (плоская арена)
    pub ground_height: f32,
}

impl Default for KinematicController {
    fn default() -> Self {
        Self {
            gravity: -9.81,
            vertical_velocity: 0.0,
            grounded: false,
            ground_height: 0.0,
        }
    }
}

impl KinematicController {
    /// Один шаг гравитации: возвращает новую высоту
    pub fn step(&mut self, y: f32, delta: f32) -> f32 {
        self.vertical_velocity += self.gravity * delta;
        let mut new_y = y + self.vertical_velocity * delta;

        if new_y <= self.ground_height {
            new_y = self.ground_height;
            self.grounded = true;
        } else {
            self.grounded = false;
        }

        if self.grounded && self.vertical_velocity < 0.0 {
            self.vertical_velocity = GROUNDED_VELOCITY;
        }

        new_y
    }
}

/// Система применения gravity + ground detection
pub fn apply_gravity(
    mut query: Query<(&mut Transform, &mut KinematicController)>,
    clock: Res<GameClock>,
) {
    let delta = clock.delta();

    for (mut transform, mut controller) in query.iter_mut() {
        let y = controller.step(transform.translation.y, delta);
        transform.translation.y = y;
    }
}

/// Горизонтальное (XZ) направление from → to, None если цели совпадают
pub fn horizontal_direction(from: Vec3, to: Vec3) -> Option<Vec3> {
    let mut direction = to - from;
    direction.y = 0.0;
    direction.try_normalize()
}

/// Горизонтальная дистанция (игнорируем высоту)
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    Vec2::new(a.x - b.x, a.z - b.z).length()
}

/// Yaw-rotation, при которой forward (-Z) смотрит в `direction`
pub fn look_rotation(direction: Vec3) -> Quat {
    Quat::from_rotation_y(f32::atan2(-direction.x, -direction.z))
}

/// Плавный поворот к направлению (slerp, factor clamp 0..1)
pub fn rotate_towards(current: Quat, direction: Vec3, factor: f32) -> Quat {
    current.slerp(look_rotation(direction), factor.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_accumulates_in_air() {
        let mut controller = KinematicController::default();
        let delta = 1.0 / 60.0;

        let y = controller.step(10.0, delta);

        // velocity.y = -9.81 * (1/60) ≈ -0.1635
        assert!(controller.vertical_velocity < -0.16);
        assert!(controller.vertical_velocity > -0.17);
        assert!(y < 10.0);
        assert!(!controller.grounded);
    }

    #[test]
    fn test_grounded_velocity_floor() {
        let mut controller = KinematicController::default();
        let delta = 1.0 / 60.0;

        // Много тиков на земле: скорость не убегает
        let mut y = 0.0;
        for _ in 0..600 {
            y = controller.step(y, delta);
        }

        assert!(controller.grounded);
        assert_eq!(controller.vertical_velocity, GROUNDED_VELOCITY);
        assert_eq!(y, 0.0);
    }

    #[test]
    fn test_look_rotation_faces_direction() {
        for direction in [Vec3::X, Vec3::NEG_X, Vec3::Z, Vec3::NEG_Z, Vec3::new(1.0, 0.0, 1.0).normalize()] {
            let forward = look_rotation(direction) * Vec3::NEG_Z;
            assert!(forward.distance(direction) < 1e-4, "direction {:?} → forward {:?}", direction, forward);
        }
    }

    #[test]
    fn test_horizontal_helpers_ignore_height() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(3.0, 10.0, 4.0);

        assert_eq!(horizontal_distance(a, b), 5.0);
        let direction = horizontal_direction(a, b).unwrap();
        assert_eq!(direction.y, 0.0);
        assert!(horizontal_direction(a, Vec3::new(0.0, 5.0, 0.0)).is_none());
    }
}
