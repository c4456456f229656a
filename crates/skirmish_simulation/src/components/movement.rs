//! Movement компоненты

use bevy::prelude::*;

/// Входные данные для движения игрока (виртуальный джойстик)
///
/// Пишет `InputReader` (каждый frame пока тянем джойстик, ноль на release).
/// Читает `PlayerMover`. Для headless тестов: mock input через этот компонент.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MovementInput {
    /// x: вправо, y: вперёд; |axis| ≤ 1 от джойстика
    pub axis: Vec2,
}

impl MovementInput {
    pub fn set(&mut self, axis: Vec2) {
        self.axis = axis;
    }
}
