//! Animation puppeting
//!
//! Симуляция не проигрывает клипы: только пишет параметры аниматора
//! (`AnimatorParams`), которые хост читает каждый frame. Клипы описаны
//! `AnimationClips` (имя + длина): нужны для задержки деспавна.
//!
//! Порядок внутри tick: hit reaction → death → recovery → locomotion params.
//! Hit перед death: смертельный удар всё ещё ставит Hit trigger.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::SimulationSet;

pub mod enemy_anim;
pub mod player_anim;

pub use enemy_anim::{EnemyAnimator, HIT_RECOVERY_WINDOW};
pub use player_anim::PlayerAnimator;

/// Имена параметров аниматора
pub mod params {
    pub const SPEED: &str = "Speed";
    pub const SHOOT: &str = "Shoot";
    pub const IS_ATTACKING: &str = "IsAttacking";
    pub const HIT: &str = "Hit";
    pub const DEAD: &str = "Dead";
}

/// Sink параметров аниматора (float / bool / one-shot triggers)
///
/// После `mark_dead` sink заблокирован: все последующие записи игнорируются.
#[derive(Component, Debug, Clone, Default)]
pub struct AnimatorParams {
    floats: HashMap<&'static str, f32>,
    bools: HashMap<&'static str, bool>,
    triggers: Vec<&'static str>,
    locked: bool,
}

impl AnimatorParams {
    pub fn set_float(&mut self, name: &'static str, value: f32) {
        if self.locked {
            return;
        }
        self.floats.insert(name, value);
    }

    pub fn set_bool(&mut self, name: &'static str, value: bool) {
        if self.locked {
            return;
        }
        self.bools.insert(name, value);
    }

    /// One-shot trigger (повторный до consume: дубликат не добавляется)
    pub fn set_trigger(&mut self, name: &'static str) {
        if self.locked || self.triggers.contains(&name) {
            return;
        }
        self.triggers.push(name);
    }

    /// Death bool + lock
    pub fn mark_dead(&mut self, name: &'static str) {
        if self.locked {
            return;
        }
        self.bools.insert(name, true);
        self.locked = true;
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        self.floats.get(name).copied()
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        self.bools.get(name).copied()
    }

    pub fn has_trigger(&self, name: &str) -> bool {
        self.triggers.iter().any(|t| *t == name)
    }

    /// Хост забирает pending triggers (consume)
    pub fn take_triggers(&mut self) -> Vec<&'static str> {
        std::mem::take(&mut self.triggers)
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClipInfo {
    pub name: String,
    /// Секунды
    pub length: f32,
}

impl AnimationClipInfo {
    pub fn new(name: impl Into<String>, length: f32) -> Self {
        Self {
            name: name.into(),
            length,
        }
    }
}

/// Клипы модели (заполняет хост или spawn из tuning)
#[derive(Component, Debug, Clone, Default)]
pub struct AnimationClips {
    pub clips: Vec<AnimationClipInfo>,
}

impl AnimationClips {
    pub fn new(clips: Vec<AnimationClipInfo>) -> Self {
        Self { clips }
    }

    /// Длина первого клипа, имя которого содержит `pattern`
    pub fn length_containing(&self, pattern: &str) -> Option<f32> {
        self.clips
            .iter()
            .find(|clip| clip.name.contains(pattern))
            .map(|clip| clip.length)
    }
}

/// Animation Plugin
pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                (player_anim::react_player_hits, player_anim::react_player_death).chain(),
                (
                    enemy_anim::react_enemy_hits,
                    enemy_anim::react_enemy_death,
                    enemy_anim::recover_from_hit,
                )
                    .chain(),
                player_anim::update_player_animation,
                enemy_anim::update_enemy_animation,
            )
                .chain()
                .in_set(SimulationSet::Animation),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_locked_after_death() {
        let mut sink = AnimatorParams::default();
        sink.set_float(params::SPEED, 1.0);
        sink.mark_dead(params::DEAD);

        sink.set_float(params::SPEED, 0.0);
        sink.set_bool(params::IS_ATTACKING, true);
        sink.set_trigger(params::HIT);

        assert!(sink.is_locked());
        assert_eq!(sink.float(params::SPEED), Some(1.0));
        assert_eq!(sink.bool(params::DEAD), Some(true));
        assert_eq!(sink.bool(params::IS_ATTACKING), None);
        assert!(!sink.has_trigger(params::HIT));
    }

    #[test]
    fn test_triggers_deduplicated_until_consumed() {
        let mut sink = AnimatorParams::default();
        sink.set_trigger(params::HIT);
        sink.set_trigger(params::HIT);

        assert_eq!(sink.take_triggers(), vec![params::HIT]);
        assert!(!sink.has_trigger(params::HIT));
    }

    #[test]
    fn test_clip_length_lookup() {
        let clips = AnimationClips::new(vec![
            AnimationClipInfo::new("Idle", 1.2),
            AnimationClipInfo::new("Death_A", 2.0),
        ]);

        assert_eq!(clips.length_containing("Death"), Some(2.0));
        assert_eq!(clips.length_containing("Attack"), None);
    }
}
