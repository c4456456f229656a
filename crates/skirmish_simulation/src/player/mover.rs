//! Player mover: движение по input джойстика + поворот
//!
//! - input (x, y) → мир (x, 0, -y), forward = -Z
//! - длина > 1 → нормализация
//! - камера задана → вектор поворачивается на yaw камеры
//! - есть цель → смотрим на цель (стрейф), иначе по направлению движения

use bevy::prelude::*;

use crate::clock::GameClock;
use crate::components::{CurrentTarget, MovementInput, Player};
use crate::config::PlayerTuning;
use crate::physics::{horizontal_direction, rotate_towards};

/// Порог |input|², ниже которого игрок считается стоящим
pub const MOVE_INPUT_THRESHOLD: f32 = 0.1;

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(MovementInput)]
pub struct PlayerMover {
    /// m/s
    pub move_speed: f32,
    /// Коэффициент slerp в секунду
    pub rotation_speed: f32,
    /// Камера, относительно которой интерпретируется input
    pub camera: Option<Entity>,
    pub is_moving: bool,
    pub enabled: bool,
}

impl Default for PlayerMover {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            rotation_speed: 10.0,
            camera: None,
            is_moving: false,
            enabled: true,
        }
    }
}

impl PlayerMover {
    pub fn from_tuning(tuning: &PlayerTuning) -> Self {
        Self {
            move_speed: tuning.move_speed,
            rotation_speed: tuning.rotation_speed,
            ..default()
        }
    }

    /// Input → мировой вектор движения (|v| ≤ 1, y = 0)
    pub fn plan_move(axis: Vec2, camera_rotation: Option<Quat>) -> Vec3 {
        let mut movement = Vec3::new(axis.x, 0.0, -axis.y);
        if movement.length_squared() > 1.0 {
            movement = movement.normalize();
        }

        if let Some(rotation) = camera_rotation {
            let (yaw, _, _) = rotation.to_euler(EulerRot::YXZ);
            movement = Quat::from_rotation_y(yaw) * movement;
            movement.y = 0.0;
        }

        movement
    }
}

/// System: движение игрока
pub fn move_player(
    mut players: Query<
        (&mut Transform, &mut PlayerMover, &MovementInput, Option<&CurrentTarget>),
        With<Player>,
    >,
    others: Query<&Transform, Without<PlayerMover>>,
    clock: Res<GameClock>,
) {
    let delta = clock.delta();

    for (mut transform, mut mover, input, current_target) in players.iter_mut() {
        if !mover.enabled {
            mover.is_moving = false;
            continue;
        }

        mover.is_moving = input.axis.length_squared() > MOVE_INPUT_THRESHOLD;

        let camera_rotation = mover
            .camera
            .and_then(|camera| others.get(camera).ok())
            .map(|camera| camera.rotation);
        // Внутри мёртвой зоны тело стоит (Speed = 0 и нулевое смещение)
        let movement = if mover.is_moving {
            PlayerMover::plan_move(input.axis, camera_rotation)
        } else {
            Vec3::ZERO
        };

        let target_position = current_target
            .and_then(|t| t.get())
            .and_then(|target| others.get(target).ok())
            .map(|t| t.translation);

        let facing = match target_position {
            Some(target_position) => horizontal_direction(transform.translation, target_position),
            None if mover.is_moving => movement.try_normalize(),
            None => None,
        };

        if let Some(direction) = facing {
            transform.rotation = rotate_towards(transform.rotation, direction, mover.rotation_speed * delta);
        }

        transform.translation += movement * mover.move_speed * delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick_clock(mut clock: ResMut<GameClock>) {
        clock.advance(1.0 / 60.0);
    }

    fn mover_app() -> App {
        let mut app = App::new();
        app.insert_resource(GameClock::default())
            .add_systems(Update, (tick_clock, move_player).chain());
        app
    }

    fn spawn_mover(app: &mut App, axis: Vec2) -> Entity {
        app.world_mut()
            .spawn((
                Player,
                Transform::default(),
                PlayerMover::default(),
                MovementInput { axis },
            ))
            .id()
    }

    #[test]
    fn test_input_inside_dead_zone_does_not_move() {
        let mut app = mover_app();
        let player = spawn_mover(&mut app, Vec2::new(0.3, 0.0));

        for _ in 0..60 {
            app.update();
        }

        let world = app.world();
        assert_eq!(world.get::<Transform>(player).unwrap().translation, Vec3::ZERO);
        assert!(!world.get::<PlayerMover>(player).unwrap().is_moving);
    }

    #[test]
    fn test_input_above_dead_zone_moves() {
        let mut app = mover_app();
        let player = spawn_mover(&mut app, Vec2::new(0.0, 1.0));

        for _ in 0..10 {
            app.update();
        }

        let world = app.world();
        assert!(world.get::<PlayerMover>(player).unwrap().is_moving);
        assert!(world.get::<Transform>(player).unwrap().translation.z < 0.0);
    }

    #[test]
    fn test_plan_move_maps_forward_to_negative_z() {
        let movement = PlayerMover::plan_move(Vec2::new(0.0, 1.0), None);
        assert_eq!(movement, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_plan_move_normalizes_long_input() {
        let movement = PlayerMover::plan_move(Vec2::new(3.0, 4.0), None);
        assert!((movement.length() - 1.0).abs() < 1e-5);

        // Короткий input не растягивается
        let movement = PlayerMover::plan_move(Vec2::new(0.3, 0.0), None);
        assert!((movement.length() - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_plan_move_relative_to_camera_yaw() {
        // Камера повёрнута на 90° влево: forward камеры = -X
        let camera = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let movement = PlayerMover::plan_move(Vec2::new(0.0, 1.0), Some(camera));

        assert!((movement - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_camera_pitch_ignored() {
        let camera = Quat::from_rotation_x(-0.8);
        let movement = PlayerMover::plan_move(Vec2::new(0.0, 1.0), Some(camera));

        assert!((movement - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }
}
