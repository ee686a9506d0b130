//! Input: devices → `WeaponInput` messages → state machine.
//!
//! `gather_weapon_input` is the only system that touches devices. It re-projects
//! the cursor through the main camera every frame (the camera moves) and emits
//! `PointerMoved` in world space. `drain_weapon_input` then applies the queue
//! to the runtimes once per tick.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use super::components::TriggerBinding;
use super::config::WeaponConfig;
use super::messages::{TriggerEvent, WeaponInput};
use super::state::WeaponRuntime;
use crate::plugins::camera::MainCamera;

pub fn gather_weapon_input(
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    keys: Option<Res<ButtonInput<KeyCode>>>,
    windows: Query<&Window>,
    q_camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    q_weapons: Query<(Entity, &TriggerBinding), With<WeaponRuntime>>,
    mut writer: MessageWriter<WeaponInput>,
) {
    if q_weapons.is_empty() {
        return;
    }

    let pointer = world_cursor(&windows, &q_camera);

    for (weapon, binding) in &q_weapons {
        if let Some(p) = pointer {
            writer.write(WeaponInput::new(weapon, TriggerEvent::PointerMoved(p)));
        }

        if let Some(buttons) = buttons.as_deref() {
            if buttons.just_pressed(binding.fire) {
                writer.write(WeaponInput::new(weapon, TriggerEvent::FirePressed));
            }
            if buttons.just_released(binding.fire) {
                writer.write(WeaponInput::new(weapon, TriggerEvent::FireReleased));
            }
        }

        if let (Some(keys), Some(hold)) = (keys.as_deref(), binding.hold) {
            if keys.pressed(hold) {
                writer.write(WeaponInput::new(weapon, TriggerEvent::FirePressed));
            }
        }
    }
}

fn world_cursor(
    windows: &Query<&Window>,
    q_camera: &Query<(&Camera, &GlobalTransform), With<MainCamera>>,
) -> Option<Vec2> {
    let window = match windows.single() {
        Ok(w) => w,
        Err(e) => {
            debug!("No single Window: {e:?}");
            return None;
        }
    };
    let Some(cursor) = window.cursor_position() else {
        debug!("Cursor position is None");
        return None;
    };
    let (camera, camera_tf) = match q_camera.single() {
        Ok(v) => v,
        Err(e) => {
            debug!("No single MainCamera: {e:?}");
            return None;
        }
    };
    match camera.viewport_to_world_2d(camera_tf, cursor) {
        Ok(p) => Some(p),
        Err(e) => {
            debug!("viewport_to_world_2d failed: {e:?}");
            None
        }
    }
}

/// Apply buffered input to the runtimes.
///
/// Releases that don't match a Shooting state are logged and dropped.
pub fn drain_weapon_input(
    mut reader: MessageReader<WeaponInput>,
    mut q: Query<(&WeaponConfig, &mut WeaponRuntime)>,
) {
    for msg in reader.read() {
        let Ok((config, mut runtime)) = q.get_mut(msg.weapon) else {
            debug!("Input for inactive weapon {}", msg.weapon);
            continue;
        };

        match msg.event {
            TriggerEvent::FirePressed => {
                if !runtime.press(config) {
                    debug!("Fire press on {} ignored during cessation lockout", msg.weapon);
                }
            }
            TriggerEvent::FireReleased => {
                if let Err(e) = runtime.release() {
                    warn!("Weapon {}: {e}", msg.weapon);
                }
            }
            TriggerEvent::PointerMoved(p) => runtime.point_at(p),
        }
    }
}
