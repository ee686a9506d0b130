use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use super::aim::MountFrame;
use super::components::{GunKnockback, WeaponMounts, WeaponRig};
use super::config::WeaponConfig;
use super::dispatch::{ShotDispatcher, VolleyContext};
use super::messages::ImpulseRequest;
use super::state::{FlipLockAction, WeaponRuntime};
use super::volley::volley;
use crate::plugins::player::ShooterBody;

/// Aim + state machine tick, then push the results onto the shooter and the pivot.
///
/// Query disjointness: shooters carry `ShooterBody`, pivots never do.
pub fn update_gun_state(
    time: Res<Time>,
    mut q_weapons: Query<(&WeaponConfig, &mut WeaponRuntime, &WeaponRig, &WeaponMounts)>,
    mut q_shooters: Query<(&Transform, &mut ShooterBody)>,
    mut q_pivots: Query<&mut Transform, Without<ShooterBody>>,
) {
    let dt = time.delta_secs();

    for (config, mut runtime, rig, mounts) in &mut q_weapons {
        let Ok((shooter_tf, mut body)) = q_shooters.get_mut(rig.shooter) else {
            debug!("Shooter {} is gone; skipping weapon tick", rig.shooter);
            continue;
        };

        let report = runtime.tick(config, dt, shooter_tf.translation.truncate(), mounts.pivot);

        match report.lock {
            Some(FlipLockAction::Lock) => body.lock_flip(),
            Some(FlipLockAction::Unlock) => body.unlock_flip(),
            None => {}
        }
        if let Some(right) = report.facing {
            body.flip(right);
        }

        if let Ok(mut pivot_tf) = q_pivots.get_mut(rig.rotate_point) {
            pivot_tf.rotation = Quat::from_rotation_z(runtime.mount_angle().to_radians());
        }
    }
}

/// Cooldown check + volley dispatch. Runs after `update_gun_state` so pellets
/// leave along this tick's aim.
pub fn fire_volleys(
    time: Res<Time>,
    mut q_weapons: Query<(Entity, &WeaponConfig, &mut WeaponRuntime, &WeaponRig, &WeaponMounts)>,
    q_shooters: Query<(&Transform, &ShooterBody)>,
    mut dispatcher: ShotDispatcher,
) {
    let now = time.elapsed_secs();

    for (weapon, config, mut runtime, rig, mounts) in &mut q_weapons {
        let Ok((shooter_tf, body)) = q_shooters.get(rig.shooter) else {
            continue;
        };
        if !runtime.try_fire(config, now) {
            continue;
        }

        let facing_right = body.facing_right();
        let frame = MountFrame {
            pivot: MountFrame::pivot_for(shooter_tf.translation.truncate(), mounts.pivot, facing_right),
            mount_angle: runtime.mount_angle(),
            facing_right,
        };
        let ctx = VolleyContext {
            weapon,
            config,
            rig,
            mounts,
            frame,
            now,
        };

        for angles in volley(config, frame.angle(0.0), frame.angle(mounts.shell_angle)) {
            dispatcher.dispatch(&ctx, angles);
        }
    }
}

/// Apply queued impulses to existing bodies.
///
/// A target that was despawned in the meantime is skipped. A live target
/// without a rigid body is a setup bug: loud in debug builds, logged otherwise.
pub fn apply_impulse_requests(
    mut reader: MessageReader<ImpulseRequest>,
    q_alive: Query<()>,
    mut q_bodies: Query<Forces>,
) {
    for req in reader.read() {
        match q_bodies.get_mut(req.target) {
            Ok(mut forces) => {
                forces.apply_linear_impulse(req.linear);
                if req.angular != 0.0 {
                    forces.apply_angular_impulse(req.angular);
                }
            }
            Err(_) if !q_alive.contains(req.target) => {
                debug!("Impulse target {} no longer exists", req.target);
            }
            Err(e) => {
                error!("Impulse target {} has no dynamic body: {e:?}", req.target);
                debug_assert!(false, "impulse requested on an entity without a rigid body");
            }
        }
    }
}

pub fn animate_gun_knockback(time: Res<Time>, mut q: Query<(&mut GunKnockback, &mut Transform)>) {
    let dt = time.delta_secs();
    for (mut gun, mut tf) in &mut q {
        if gun.offset() == 0.0 && tf.translation == gun.translation() {
            continue;
        }
        gun.tick(dt);
        tf.translation = gun.translation();
    }
}
