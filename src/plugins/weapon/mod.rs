//! Weapon plugin: trigger input → firing state machine → volleys of
//! projectiles + casings, recoil and feedback.
//!
//! # Data flow (one Update tick)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │ (A) attach_weapons                                                      │
//! │     - validates config / shooter / pivot / casing container             │
//! │     - inserts WeaponRuntime (Idle) once everything exists               │
//! │                                                                         │
//! │ (B) gather_weapon_input → WeaponInput messages                          │
//! │     - cursor → world via MainCamera, mouse button edges, hold key       │
//! │                                                                         │
//! │ (C) drain_weapon_input                                                  │
//! │     - press / release / point_at on WeaponRuntime (single writer)       │
//! │                                                                         │
//! │ (D) update_gun_state                                                    │
//! │     - entry hooks (flip lock / unlock on ShooterBody)                   │
//! │     - Shooting: resolve aim, flip shooter, set pivot rotation           │
//! │     - Cessation: grace timer; Alignment: ease pivot back to neutral     │
//! │                                                                         │
//! │ (E) fire_volleys                                                        │
//! │     - cooldown gate, pellet fan                                         │
//! │     - ShotDispatcher per pellet: spawn projectile, recoil request,      │
//! │       gun knockback, shake, ShotFired, sound, flash, spawn casing       │
//! │                                                                         │
//! │ (F) apply_impulse_requests (avian Forces)                               │
//! │ (G) animate_gun_knockback                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! The chain keeps aim ahead of the cooldown check, the check ahead of spawns,
//! and spawns ahead of impulses, so every pellet uses this tick's orientation.

pub mod aim;
pub mod attach;
pub mod components;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod input;
pub mod messages;
pub mod state;
pub mod systems;
pub mod volley;

use bevy::prelude::*;

use crate::common::state::GameState;

pub use components::{GunKnockback, TriggerBinding, Weapon, WeaponMounts, WeaponRig, WeaponRng};
pub use config::{WeaponConfig, WeaponPreset};
pub use error::WeaponError;
pub use messages::{ImpulseRequest, ShakeRequest, ShotFired, SoundCue, TriggerEvent, VfxKind, VfxRequest, WeaponInput};
pub use state::{GunState, WeaponRuntime};

/// Ordering handle for systems that react to this tick's shots.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct WeaponSystems;

pub struct WeaponPlugin;

impl Plugin for WeaponPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<WeaponInput>()
            .add_message::<ImpulseRequest>()
            .add_message::<ShotFired>()
            .add_message::<ShakeRequest>()
            .add_message::<SoundCue>()
            .add_message::<VfxRequest>();

        app.add_systems(
            Update,
            (
                attach::attach_weapons,
                input::gather_weapon_input,
                input::drain_weapon_input,
                systems::update_gun_state,
                systems::fire_volleys,
                systems::apply_impulse_requests,
                systems::animate_gun_knockback,
            )
                .chain()
                .in_set(WeaponSystems)
                .run_if(in_state(GameState::InGame)),
        );
    }
}
