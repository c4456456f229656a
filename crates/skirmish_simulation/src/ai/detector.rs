//! Player detector: периодический proximity scan врага
//!
//! Работает не каждый tick, а с частотой `check_rate` (scan/сек) по GameClock:
//! 1. Bounded overlap вокруг позиции (маска слоя цели, ≤ 10 кандидатов)
//! 2. Первый кандидат с нужным тегом и живым Health → CurrentTarget
//! 3. TargetAcquired каждый interval пока цель валидна, иначе цель сбрасывается

use bevy::prelude::*;
use bevy_rapier3d::prelude::{CollisionGroups, Group};

use crate::ai::TargetAcquired;
use crate::clock::GameClock;
use crate::components::{Actor, ActorTag, Cooldown, CurrentTarget, Health};
use crate::config::EnemyTuning;
use crate::physics::{layers, OverlapScratch};

/// Ёмкость scratch буфера детектора
pub const DETECTOR_SCRATCH_CAPACITY: usize = 10;

#[derive(Component, Debug, Clone)]
#[require(CurrentTarget)]
pub struct PlayerDetector {
    /// Радиус обнаружения (метры)
    pub detection_radius: f32,
    /// Сканов в секунду
    pub check_rate: f32,
    /// Слой цели
    pub target_mask: Group,
    /// Тег цели
    pub target_tag: ActorTag,
    pub cooldown: Cooldown,
    pub enabled: bool,
    scratch: OverlapScratch,
}

impl Default for PlayerDetector {
    fn default() -> Self {
        Self {
            detection_radius: 7.0,
            check_rate: 1.0,
            target_mask: layers::PLAYER,
            target_tag: ActorTag::Player,
            cooldown: Cooldown::default(),
            enabled: true,
            scratch: OverlapScratch::with_capacity(DETECTOR_SCRATCH_CAPACITY),
        }
    }
}

impl PlayerDetector {
    pub fn from_tuning(tuning: &EnemyTuning) -> Self {
        Self {
            detection_radius: tuning.detection_radius,
            check_rate: tuning.detection_check_rate,
            ..default()
        }
    }

    /// Пора ли сканировать; если да: re-arm cooldown
    pub fn begin_scan(&mut self, now: f32) -> bool {
        if !self.enabled || !self.cooldown.is_ready(now) {
            return false;
        }
        self.cooldown.trigger(now, self.check_rate);
        true
    }

    /// Первый из последних overlap hits, прошедший фильтр
    pub fn select_target(&self, mut qualifies: impl FnMut(Entity) -> bool) -> Option<Entity> {
        self.scratch.hits().iter().copied().find(|&entity| qualifies(entity))
    }
}

/// System: periodic scan
pub fn scan_for_targets(
    mut detectors: Query<(Entity, &Transform, &mut PlayerDetector, &mut CurrentTarget)>,
    candidates: Query<(Entity, &Transform, &CollisionGroups, &Actor, &Health)>,
    clock: Res<GameClock>,
    mut acquired_events: EventWriter<TargetAcquired>,
) {
    let now = clock.now();

    for (entity, transform, mut detector, mut current_target) in detectors.iter_mut() {
        if !detector.begin_scan(now) {
            continue;
        }

        let center = transform.translation;
        let radius = detector.detection_radius;
        let mask = detector.target_mask;
        let tag = detector.target_tag;

        detector.scratch.overlap_sphere(
            center,
            radius,
            mask,
            candidates
                .iter()
                .map(|(candidate, t, groups, _, _)| (candidate, t.translation, groups.memberships)),
        );

        let found = detector.select_target(|candidate| {
            candidates
                .get(candidate)
                .map(|(_, _, _, actor, health)| actor.tag == tag && health.is_alive())
                .unwrap_or(false)
        });

        match found {
            Some(target) => {
                if current_target.get() != Some(target) {
                    crate::log(&format!("👁️ Detector {:?} acquired target {:?}", entity, target));
                }
                current_target.set(Some(target));
                acquired_events.write(TargetAcquired {
                    observer: entity,
                    target,
                });
            }
            None => {
                if current_target.get().is_some() {
                    crate::log(&format!("👻 Detector {:?} lost its target", entity));
                }
                current_target.clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::player_groups;

    fn scan_app() -> App {
        let mut app = App::new();
        app.insert_resource(GameClock::default())
            .add_event::<TargetAcquired>()
            .add_systems(Update, scan_for_targets);
        app
    }

    fn spawn_candidate(app: &mut App, tag: ActorTag, position: Vec3) -> Entity {
        app.world_mut()
            .spawn((
                Transform::from_translation(position),
                Actor::new(tag),
                Health::new(100.0),
                player_groups(),
            ))
            .id()
    }

    #[test]
    fn test_candidate_with_wrong_tag_is_skipped() {
        let mut app = scan_app();
        let detector = app
            .world_mut()
            .spawn((Transform::default(), PlayerDetector::default()))
            .id();
        // На слое игрока, живой, но тег не тот
        spawn_candidate(&mut app, ActorTag::Untagged, Vec3::new(1.0, 0.0, 0.0));

        app.update();

        assert_eq!(app.world().get::<CurrentTarget>(detector).unwrap().get(), None);
        let events = app.world().resource::<Events<TargetAcquired>>();
        assert!(events.is_empty());
    }

    #[test]
    fn test_tagged_candidate_found_behind_decoy() {
        let mut app = scan_app();
        let detector = app
            .world_mut()
            .spawn((Transform::default(), PlayerDetector::default()))
            .id();
        spawn_candidate(&mut app, ActorTag::Enemy, Vec3::new(1.0, 0.0, 0.0));
        let player = spawn_candidate(&mut app, ActorTag::Player, Vec3::new(0.0, 0.0, 5.0));

        app.update();

        assert_eq!(app.world().get::<CurrentTarget>(detector).unwrap().get(), Some(player));
    }

    #[test]
    fn test_detector_defaults() {
        let detector = PlayerDetector::default();
        assert_eq!(detector.detection_radius, 7.0);
        assert_eq!(detector.check_rate, 1.0);
        assert_eq!(detector.target_tag, ActorTag::Player);
        assert_eq!(detector.scratch.capacity(), DETECTOR_SCRATCH_CAPACITY);
    }

    #[test]
    fn test_scan_is_rate_limited() {
        let mut detector = PlayerDetector {
            check_rate: 2.0,
            ..default()
        };

        assert!(detector.begin_scan(0.0));
        assert!(!detector.begin_scan(0.1));
        assert!(!detector.begin_scan(0.49));
        assert!(detector.begin_scan(0.5));
    }

    #[test]
    fn test_disabled_detector_never_scans() {
        let mut detector = PlayerDetector {
            enabled: false,
            ..default()
        };
        assert!(!detector.begin_scan(100.0));
    }
}
