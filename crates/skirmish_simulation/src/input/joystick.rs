//! Virtual joystick + UI canvas rect

use bevy::prelude::*;

/// Прямоугольник UI canvas в экранных координатах
///
/// Local координаты canvas отсчитываются от точки pivot
/// (`position + size * pivot`), как anchored position в UI.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CanvasRect {
    /// Нижний левый угол на экране
    pub position: Vec2,
    pub size: Vec2,
    /// 0..1, (0.5, 0.5): центр
    pub pivot: Vec2,
}

impl Default for CanvasRect {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            size: Vec2::new(1920.0, 1080.0),
            pivot: Vec2::splat(0.5),
        }
    }
}

impl CanvasRect {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            ..default()
        }
    }

    fn pivot_point(&self) -> Vec2 {
        self.position + self.size * self.pivot
    }

    pub fn screen_to_local(&self, screen: Vec2) -> Vec2 {
        screen - self.pivot_point()
    }

    pub fn local_to_screen(&self, local: Vec2) -> Vec2 {
        local + self.pivot_point()
    }
}

/// Шаблон джойстика (размер фона)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct JoystickTemplate {
    pub background_size: Vec2,
}

impl Default for JoystickTemplate {
    fn default() -> Self {
        Self {
            background_size: Vec2::splat(100.0),
        }
    }
}

/// Экранный джойстик, живёт один жест (press → release)
///
/// `input_vector` всегда внутри единичного круга.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct VirtualJoystick {
    /// Anchored position (local координаты canvas)
    pub origin: Vec2,
    pub background_size: Vec2,
    pub input_vector: Vec2,
    /// Смещение ручки от центра (пиксели)
    pub handle_position: Vec2,
    pub dragging: bool,
    /// InputReader, создавший джойстик
    pub owner: Entity,
}

impl VirtualJoystick {
    pub fn new(origin: Vec2, template: &JoystickTemplate, owner: Entity) -> Self {
        Self {
            origin,
            background_size: template.background_size,
            input_vector: Vec2::ZERO,
            handle_position: Vec2::ZERO,
            dragging: true,
            owner,
        }
    }

    /// Pointer в экранных координатах → input vector
    pub fn update(&mut self, screen: Vec2, canvas: &CanvasRect) {
        if !self.dragging {
            return;
        }

        let center = canvas.local_to_screen(self.origin);
        let half_size = self.background_size * 0.5;
        let local = screen - center;

        let scaled = if half_size.x > 0.0 && half_size.y > 0.0 {
            local / half_size
        } else {
            Vec2::ZERO
        };

        self.input_vector = scaled.clamp_length_max(1.0);
        self.handle_position = self.input_vector * half_size;
    }

    pub fn release(&mut self) {
        self.dragging = false;
        self.input_vector = Vec2::ZERO;
        self.handle_position = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas_200() -> CanvasRect {
        CanvasRect::new(Vec2::ZERO, Vec2::splat(200.0))
    }

    #[test]
    fn test_press_anchors_at_canvas_center() {
        let canvas = canvas_200();
        assert_eq!(canvas.screen_to_local(Vec2::new(100.0, 100.0)), Vec2::ZERO);
        assert_eq!(canvas.local_to_screen(Vec2::ZERO), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_drag_right_full_deflection() {
        let canvas = canvas_200();
        let origin = canvas.screen_to_local(Vec2::new(100.0, 100.0));
        let mut joystick = VirtualJoystick::new(origin, &JoystickTemplate::default(), Entity::from_raw(1));

        joystick.update(Vec2::new(150.0, 100.0), &canvas);

        assert!((joystick.input_vector - Vec2::new(1.0, 0.0)).length() < 1e-5);
        assert!((joystick.handle_position - Vec2::new(50.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_vector_clamped_to_unit_circle() {
        let canvas = canvas_200();
        let mut joystick = VirtualJoystick::new(Vec2::ZERO, &JoystickTemplate::default(), Entity::from_raw(1));

        for screen in [
            Vec2::new(10_000.0, 100.0),
            Vec2::new(-500.0, 900.0),
            Vec2::new(130.0, 130.0),
            Vec2::new(100.0, 100.0),
        ] {
            joystick.update(screen, &canvas);
            assert!(joystick.input_vector.length() <= 1.0 + 1e-5);
        }
    }

    #[test]
    fn test_release_zeroes_and_stops_updates() {
        let canvas = canvas_200();
        let mut joystick = VirtualJoystick::new(Vec2::ZERO, &JoystickTemplate::default(), Entity::from_raw(1));
        joystick.update(Vec2::new(120.0, 100.0), &canvas);

        joystick.release();
        joystick.update(Vec2::new(150.0, 100.0), &canvas);

        assert!(!joystick.dragging);
        assert_eq!(joystick.input_vector, Vec2::ZERO);
        assert_eq!(joystick.handle_position, Vec2::ZERO);
    }
}
