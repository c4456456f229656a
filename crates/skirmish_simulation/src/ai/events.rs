//! AI Events

use bevy::prelude::*;

/// Детектор нашёл валидную цель
///
/// Отправляется КАЖДЫЙ scan interval, пока цель остаётся валидной
/// (не только при первом обнаружении). Подписчик: `EnemyMover`.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TargetAcquired {
    /// Entity наблюдателя (у кого детектор)
    pub observer: Entity,
    /// Entity цели
    pub target: Entity,
}
