//! Маркеры вариантов акторов: Player, Enemy
//!
//! Вариант выбирает поведение health-пайплайна (hit reaction, death handling)
//! через `With<Player>` / `With<Enemy>` фильтры вместо наследования.

use bevy::prelude::Component;

/// Marker component для player-controlled entity
///
/// В single-player режиме обычно только один entity имеет этот компонент.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Marker component для врага (цель player combat и projectiles)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Enemy;
