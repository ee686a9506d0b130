//! Attach-time validation.
//!
//! This is the boundary where weapon invariants get established. A weapon
//! without a `WeaponRuntime` is inert: it reads no input and never fires.
//! Once everything it needs exists, it gets a fresh runtime (Idle, timers
//! zeroed) and the per-tick systems may treat the rig as valid.
//!
//! Failures are configuration errors. They are logged once per weapon and
//! retried every frame, so spawn order between the shooter, the world and
//! the weapon does not matter.

use avian2d::prelude::*;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use super::components::{Weapon, WeaponRig};
use super::config::WeaponConfig;
use super::error::{Result, WeaponError};
use super::state::WeaponRuntime;
use crate::plugins::player::ShooterBody;
use crate::plugins::projectiles::CasingContainer;

/// Pick the casing container: the explicit one, else the only one in the world.
pub fn resolve_casing_container(
    explicit: Option<Entity>,
    candidates: impl IntoIterator<Item = Entity>,
) -> Result<Entity> {
    if let Some(e) = explicit {
        return Ok(e);
    }
    let found: Vec<Entity> = candidates.into_iter().collect();
    match found.as_slice() {
        [only] => Ok(*only),
        _ => Err(WeaponError::UnresolvedCasingContainer { found: found.len() }),
    }
}

pub fn attach_weapons(
    mut commands: Commands,
    mut q_pending: Query<(Entity, &WeaponConfig, &mut WeaponRig), (With<Weapon>, Without<WeaponRuntime>)>,
    q_shooters: Query<(), (With<ShooterBody>, With<RigidBody>)>,
    q_transforms: Query<(), With<Transform>>,
    q_containers: Query<Entity, With<CasingContainer>>,
    mut reported: Local<HashSet<Entity>>,
) {
    for (weapon, config, mut rig) in &mut q_pending {
        let resolved = config
            .validate()
            .and_then(|_| {
                if q_shooters.contains(rig.shooter) {
                    Ok(())
                } else {
                    Err(WeaponError::MissingShooter(rig.shooter))
                }
            })
            .and_then(|_| {
                if q_transforms.contains(rig.rotate_point) {
                    Ok(())
                } else {
                    Err(WeaponError::MissingRotatePoint(rig.rotate_point))
                }
            })
            .and_then(|_| resolve_casing_container(rig.casing_container, q_containers.iter()));

        match resolved {
            Ok(container) => {
                rig.casing_container = Some(container);
                commands.entity(weapon).insert(WeaponRuntime::default());
                reported.remove(&weapon);
                info!("Weapon {weapon} attached to shooter {}", rig.shooter);
            }
            Err(e) => {
                if reported.insert(weapon) {
                    error!("Weapon {weapon} is not active: {e}");
                }
            }
        }
    }
}
