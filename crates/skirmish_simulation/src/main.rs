//! Headless симуляция Skirmish
//!
//! Игрок в центре, волна врагов по кругу (seeded), 1200 тиков (20 секунд).
//! Аргумент: опциональный путь к tuning TOML.

use bevy::prelude::*;
use rand::Rng;
use skirmish_simulation::{
    create_headless_app, log_error, log_info, spawn_enemy, spawn_player, DeterministicRng, Enemy, Health,
    SimulationPlugin, TuningConfig,
};

const SEED: u64 = 42;
const ENEMY_COUNT: usize = 6;
const TICK_COUNT: usize = 1200;

fn main() {
    let mut app = create_headless_app(SEED);

    let tuning = match std::env::args().nth(1) {
        Some(path) => match TuningConfig::load(&path) {
            Ok(tuning) => tuning,
            Err(err) => {
                log_error(&format!("Tuning {}: {}, using defaults", path, err));
                TuningConfig::default()
            }
        },
        None => TuningConfig::default(),
    };

    log_info(&format!("Starting Skirmish headless simulation (seed: {})", SEED));

    app.insert_resource(tuning.clone());
    app.add_plugins(SimulationPlugin);

    let positions: Vec<Vec3> = {
        let mut rng = app.world_mut().resource_mut::<DeterministicRng>();
        (0..ENEMY_COUNT)
            .map(|_| {
                let angle = rng.rng.gen_range(0.0..std::f32::consts::TAU);
                let distance = rng.rng.gen_range(4.0..12.0);
                Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance)
            })
            .collect()
    };

    let player = spawn_player(&mut app.world_mut().commands(), Vec3::ZERO, &tuning);
    for position in positions {
        spawn_enemy(&mut app.world_mut().commands(), position, &tuning);
    }

    for tick in 0..TICK_COUNT {
        app.update();

        if tick % 120 == 0 {
            let world = app.world_mut();
            let alive = world
                .query_filtered::<&Health, With<Enemy>>()
                .iter(world)
                .filter(|h| h.is_alive())
                .count();
            let player_health = world.get::<Health>(player).map(|h| h.current()).unwrap_or(0.0);

            log_info(&format!(
                "Tick {}: player hp {:.0}, enemies alive {}",
                tick, player_health, alive
            ));
        }
    }

    let player_alive = app
        .world()
        .get::<Health>(player)
        .map(|h| h.is_alive())
        .unwrap_or(false);

    log_info(&format!(
        "Simulation complete! Player {}",
        if player_alive { "survived" } else { "died" }
    ));
}
