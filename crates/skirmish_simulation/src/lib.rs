//! Skirmish Simulation Core
//!
//! Headless ECS-симуляция top-down action боя на Bevy 0.16:
//! игрок с автонаведением против волны врагов (detect → chase → attack →
//! hit-react → die), общая модель здоровья, projectiles, virtual joystick.
//!
//! Рендер, физический движок и проигрывание анимаций остаются на стороне хоста;
//! симуляция пишет Transform, AnimatorParams и события.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod animation;
pub mod clock;
pub mod combat;
pub mod components;
pub mod config;
pub mod input;
pub mod logger;
pub mod physics;
pub mod player;
pub mod spawn;

// Re-export базовых компонентов для удобства
pub use ai::{AIPlugin, ChaseState, EnemyMover, PlayerDetector, TargetAcquired};
pub use animation::{AnimationClips, AnimationPlugin, AnimatorParams, EnemyAnimator, PlayerAnimator};
pub use clock::{tick_duration, GameClock, TICK_HZ};
pub use combat::{
    ActorHit, CombatPlugin, DamageRequest, Dead, DespawnAfter, EnemyCombater, EntityDied, HealthChanged,
    PlayerCombat, Projectile,
};
pub use components::*;
pub use config::{ConfigError, TuningConfig};
pub use input::{CanvasRect, InputPlugin, InputReader, JoystickReleased, PointerInput, VirtualJoystick};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, LogLevel};
pub use physics::KinematicController;
pub use player::{PlayerMover, PlayerPlugin};
pub use spawn::{spawn_canvas, spawn_enemy, spawn_input_reader, spawn_player};

/// Порядок фаз simulation tick (FixedUpdate)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// GameClock.advance
    Clock,
    /// Periodic scans (детектор врага)
    Detection,
    /// Player mover, погоня, гравитация
    Movement,
    /// Атаки (DamageRequest, spawn projectiles)
    Combat,
    /// Полёт projectiles + overlap hits
    Projectiles,
    /// DamageRequest → Health → смерть
    Damage,
    /// AnimatorParams
    Animation,
    /// Отложенный деспавн
    Cleanup,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameClock>()
            // Default tuning, если хост не вставил свой до plugin
            .init_resource::<TuningConfig>()
            .register_type::<GameClock>()
            .register_type::<Health>()
            .register_type::<CurrentTarget>()
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Clock,
                    SimulationSet::Detection,
                    SimulationSet::Movement,
                    SimulationSet::Combat,
                    SimulationSet::Projectiles,
                    SimulationSet::Damage,
                    SimulationSet::Animation,
                    SimulationSet::Cleanup,
                )
                    .chain(),
            )
            .add_systems(FixedUpdate, clock::advance_game_clock.in_set(SimulationSet::Clock))
            .add_plugins((AIPlugin, PlayerPlugin, CombatPlugin, AnimationPlugin, InputPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время двигается вручную: каждый `app.update()` (после первого,
/// warm-up с нулевым delta) == ровно один fixed tick 60Hz.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_duration(tick_duration()))
        .insert_resource(TimeUpdateStrategy::ManualDuration(tick_duration()));

    app
}

/// Debug-дамп всех `T` в порядке entity index
///
/// Байты сравниваются между прогонами с одним seed.
pub fn world_snapshot<T: Component + std::fmt::Debug>(world: &mut World) -> Vec<u8> {
    let mut rows: Vec<(u32, String)> = world
        .query::<(Entity, &T)>()
        .iter(world)
        .map(|(entity, component)| (entity.index(), format!("{:?}", component)))
        .collect();
    rows.sort_unstable_by_key(|(index, _)| *index);

    rows.into_iter()
        .flat_map(|(index, dump)| index.to_le_bytes().into_iter().chain(dump.into_bytes()))
        .collect()
}
