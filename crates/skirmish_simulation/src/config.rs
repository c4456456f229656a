//! Tuning config (data-driven параметры акторов)
//!
//! Defaults совпадают со значениями по умолчанию в инспекторе оригинальных префабов.
//! Файл TOML может переопределить любое поле (`#[serde(default)]`).
//!
//! ```toml
//! [enemy]
//! detection_radius = 9.0
//! attack_rate = 2.0
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Ошибка загрузки конфига
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Параметры игрока
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub max_health: f32,
    pub move_speed: f32,
    pub rotation_speed: f32,
    pub attack_radius: f32,
    pub attack_rate: f32,
    pub combat_rotation_speed: f32,
    pub projectile_speed: f32,
    /// Смещение точки выстрела в local space игрока
    pub fire_point_offset: [f32; 3],
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            move_speed: 5.0,
            rotation_speed: 10.0,
            attack_radius: 10.0,
            attack_rate: 1.0,
            combat_rotation_speed: 8.0,
            projectile_speed: 20.0,
            fire_point_offset: [0.0, 1.0, -0.5],
        }
    }
}

/// Параметры врага
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub max_health: f32,
    pub detection_radius: f32,
    /// Сканов в секунду
    pub detection_check_rate: f32,
    pub move_speed: f32,
    pub rotation_speed: f32,
    pub stopping_distance: f32,
    pub attack_range: f32,
    pub attack_rate: f32,
    pub attack_damage: f32,
    /// Окно восстановления после hit reaction (секунды)
    pub hit_recovery: f32,
    /// Длина death клипа (None: fallback задержка деспавна)
    pub death_clip_length: Option<f32>,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            detection_radius: 7.0,
            detection_check_rate: 1.0,
            move_speed: 3.0,
            rotation_speed: 5.0,
            stopping_distance: 1.5,
            attack_range: 2.0,
            attack_rate: 1.0,
            attack_damage: 10.0,
            hit_recovery: 0.1,
            death_clip_length: Some(2.0),
        }
    }
}

/// Параметры projectile игрока
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub damage: f32,
    pub lifetime: f32,
    pub radius: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            damage: 10.0,
            lifetime: 2.0,
            radius: 0.5,
        }
    }
}

/// Все tuning параметры сессии
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningConfig {
    pub player: PlayerTuning,
    pub enemy: EnemyTuning,
    pub projectile: ProjectileTuning,
}

impl TuningConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&source)
    }
}
