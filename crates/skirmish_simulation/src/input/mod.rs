//! Virtual joystick input module
//!
//! # Архитектура
//!
//! ```text
//! Хост (mouse / touch)
//!     ↓
//! PointerInput (ECS event) - events.rs
//!     ↓
//! InputReader (state machine) - reader.rs
//!     ↓
//! VirtualJoystick (per gesture) - joystick.rs
//!     ↓
//! MovementInput (player mover)
//! ```
//!
//! Работает в `Update` (frame-driven), не в FixedUpdate.

use bevy::prelude::*;

pub mod events;
pub mod joystick;
pub mod reader;

pub use events::*;
pub use joystick::*;
pub use reader::{despawn_orphaned_joysticks, read_pointer_input, InputReader};

/// Input Plugin
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PointerInput>()
            .add_event::<JoystickReleased>()
            .add_systems(Update, (read_pointer_input, despawn_orphaned_joysticks).chain());
    }
}
