//! Pointer input events
//!
//! События генерирует хост (мышь / touch) и обрабатывает `InputReader`.

use bevy::prelude::{Entity, Event, Vec2};

/// Pointer событие в экранных координатах
///
/// # Coordinate System
/// - `x`: вправо
/// - `y`: вверх (drag вверх = движение вперёд)
///
/// # Поток
/// - Emit: хост, один раз на изменение состояния pointer
/// - Consume: `read_pointer_input` (Update)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    /// Нажатие (mouse down / touch began)
    Pressed { position: Vec2 },
    /// Перемещение зажатого pointer
    Moved { position: Vec2 },
    /// Отпускание (mouse up / touch ended)
    Released,
    /// Touch прерван системой (cancelled)
    TouchLost,
}

/// Джойстик отпущен (перед деспавном)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct JoystickReleased {
    pub joystick: Entity,
}
