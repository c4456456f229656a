//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: базовые характеристики (Actor, ActorTag, Health)
//! - combat: target provider, cooldown, disable-on-death
//! - movement: input для player mover (MovementInput)
//! - player: маркеры вариантов (Player, Enemy)

pub mod actor;
pub mod combat;
pub mod movement;
pub mod player;

// Re-exports для удобного импорта
pub use actor::*;
pub use combat::*;
pub use movement::*;
pub use player::*;
