//! Input reader: pointer → virtual joystick → MovementInput
//!
//! # Состояния
//! - Idle: нет джойстика, `tracking == false`
//! - Dragging: press создал джойстик, каждый frame его вектор уходит в receiver
//!
//! # Поток
//! ```text
//! PointerInput (хост)
//!     ↓
//! read_pointer_input (Update)
//!     ↓
//! VirtualJoystick.update → MovementInput.axis (receiver)
//! ```
//!
//! # Cleanup
//! Release / TouchLost / disable / новый press: джойстик отпущен,
//! `JoystickReleased`, деспавн, receiver получает ноль в тот же frame.
//! Повторный cleanup: no-op. Джойстик, чей reader исчез, деспавнит
//! `despawn_orphaned_joysticks`.

use bevy::prelude::*;

use crate::components::MovementInput;
use crate::input::{CanvasRect, JoystickReleased, JoystickTemplate, PointerInput, VirtualJoystick};

/// Reader pointer input (по одному джойстику на reader)
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct InputReader {
    /// Нет шаблона → reader ничего не делает
    pub template: Option<JoystickTemplate>,
    /// Entity с `MovementInput`
    pub receiver: Option<Entity>,
    /// Entity с `CanvasRect`
    pub canvas: Option<Entity>,
    /// Активный джойстик
    pub joystick: Option<Entity>,
    pub tracking: bool,
    /// Последняя позиция pointer (экран)
    pub pointer: Option<Vec2>,
    pub enabled: bool,
}

impl Default for InputReader {
    fn default() -> Self {
        Self {
            template: Some(JoystickTemplate::default()),
            receiver: None,
            canvas: None,
            joystick: None,
            tracking: false,
            pointer: None,
            enabled: true,
        }
    }
}

impl InputReader {
    pub fn new(receiver: Entity, canvas: Entity) -> Self {
        Self {
            receiver: Some(receiver),
            canvas: Some(canvas),
            ..default()
        }
    }
}

/// Рабочая копия джойстика на время обработки frame
///
/// Свежий джойстик существует только как зарезервированный id до применения
/// commands, поэтому состояние хранится локально и пишется обратно в конце.
struct ActiveJoystick {
    entity: Entity,
    state: VirtualJoystick,
    spawned: bool,
}

fn forward(receivers: &mut Query<&mut MovementInput>, receiver: Option<Entity>, axis: Vec2) {
    let Some(receiver) = receiver else {
        return;
    };
    if let Ok(mut input) = receivers.get_mut(receiver) {
        input.set(axis);
    }
}

/// Отпустить и уничтожить джойстик (idempotent)
fn cleanup(
    commands: &mut Commands,
    receivers: &mut Query<&mut MovementInput>,
    released: &mut EventWriter<JoystickReleased>,
    reader: &mut InputReader,
    active: &mut Option<ActiveJoystick>,
) {
    let had_state = active.is_some() || reader.tracking;

    if let Some(mut joystick) = active.take() {
        joystick.state.release();
        released.write(JoystickReleased {
            joystick: joystick.entity,
        });
        if let Ok(mut entity_commands) = commands.get_entity(joystick.entity) {
            entity_commands.despawn();
        }
        crate::log(&format!("🕹️ Joystick {:?} released", joystick.entity));
    }

    reader.joystick = None;
    reader.tracking = false;
    reader.pointer = None;

    if had_state {
        forward(receivers, reader.receiver, Vec2::ZERO);
    }
}

/// System: обработка pointer событий всеми включёнными readers
pub fn read_pointer_input(
    mut commands: Commands,
    mut pointer_events: EventReader<PointerInput>,
    mut readers: Query<(Entity, &mut InputReader)>,
    mut joysticks: Query<&mut VirtualJoystick>,
    canvases: Query<&CanvasRect>,
    mut receivers: Query<&mut MovementInput>,
    mut released: EventWriter<JoystickReleased>,
) {
    let events: Vec<PointerInput> = pointer_events.read().copied().collect();

    for (reader_entity, mut reader) in readers.iter_mut() {
        let mut active = reader.joystick.and_then(|entity| {
            joysticks.get(entity).ok().map(|state| ActiveJoystick {
                entity,
                state: state.clone(),
                spawned: false,
            })
        });

        if active.is_none() && reader.joystick.is_some() {
            // Джойстик уничтожен извне
            reader.joystick = None;
            reader.tracking = false;
        }

        if !reader.enabled {
            cleanup(&mut commands, &mut receivers, &mut released, &mut reader, &mut active);
            continue;
        }

        let Some(template) = reader.template else {
            continue;
        };

        let canvas = reader.canvas.and_then(|canvas| canvases.get(canvas).ok()).copied();

        for event in &events {
            match *event {
                PointerInput::Pressed { position } => {
                    cleanup(&mut commands, &mut receivers, &mut released, &mut reader, &mut active);

                    let Some(canvas) = canvas else {
                        crate::log_warning(&format!(
                            "InputReader {:?}: no canvas, joystick not spawned",
                            reader_entity
                        ));
                        continue;
                    };

                    let origin = canvas.screen_to_local(position);
                    let entity = commands.spawn_empty().id();
                    active = Some(ActiveJoystick {
                        entity,
                        state: VirtualJoystick::new(origin, &template, reader_entity),
                        spawned: true,
                    });

                    reader.joystick = Some(entity);
                    reader.tracking = true;
                    reader.pointer = Some(position);

                    crate::log(&format!(
                        "🕹️ Joystick {:?} spawned at {:?} (reader {:?})",
                        entity, origin, reader_entity
                    ));
                }
                PointerInput::Moved { position } => {
                    if reader.tracking {
                        reader.pointer = Some(position);
                    }
                }
                PointerInput::Released | PointerInput::TouchLost => {
                    cleanup(&mut commands, &mut receivers, &mut released, &mut reader, &mut active);
                }
            }
        }

        let Some(mut joystick) = active else {
            continue;
        };

        if reader.tracking {
            if let (Some(pointer), Some(canvas)) = (reader.pointer, canvas) {
                joystick.state.update(pointer, &canvas);
            }
            forward(&mut receivers, reader.receiver, joystick.state.input_vector);
        }

        if joystick.spawned {
            commands.entity(joystick.entity).insert(joystick.state);
        } else if let Ok(mut stored) = joysticks.get_mut(joystick.entity) {
            *stored = joystick.state;
        }
    }
}

/// System: деспавн джойстиков без живого reader
pub fn despawn_orphaned_joysticks(
    mut commands: Commands,
    joysticks: Query<(Entity, &VirtualJoystick)>,
    readers: Query<&InputReader>,
) {
    for (entity, joystick) in joysticks.iter() {
        let owned = readers
            .get(joystick.owner)
            .map(|reader| reader.joystick == Some(entity))
            .unwrap_or(false);

        if !owned {
            crate::log(&format!("🕹️ Orphaned joystick {:?} despawned", entity));
            commands.entity(entity).despawn();
        }
    }
}
