//! Enemy AI module
//!
//! detect → chase. Attack/hit-react/die живут в combat и animation.

use bevy::prelude::*;

use crate::SimulationSet;

pub mod chase;
pub mod detector;
pub mod events;

// Re-export основных типов
pub use chase::{ChaseState, EnemyMover};
pub use detector::{PlayerDetector, DETECTOR_SCRATCH_CAPACITY};
pub use events::TargetAcquired;

/// AI Plugin
///
/// Порядок выполнения:
/// 1. scan_for_targets: periodic detection (SimulationSet::Detection)
/// 2. start_chase_on_target_acquired: TargetAcquired → Chasing
/// 3. chase_target: поворот + движение к цели
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TargetAcquired>();

        app.add_systems(
            FixedUpdate,
            detector::scan_for_targets.in_set(SimulationSet::Detection),
        );

        app.add_systems(
            FixedUpdate,
            (chase::start_chase_on_target_acquired, chase::chase_target)
                .chain()
                .in_set(SimulationSet::Movement),
        );
    }
}
