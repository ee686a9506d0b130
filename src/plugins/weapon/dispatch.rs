//! Spawn & impulse dispatch: one projectile + one casing per pellet.
//!
//! Split in two:
//! - [`plan_pellet`] does every random draw and all the vector math. Pure, so
//!   scatter / recoil / ejection ranges can be tested without a `World`.
//! - [`ShotDispatcher`] carries a plan out against the ECS in a fixed order:
//!   projectile, recoil, gun knockback, shake, notification, sound + flash,
//!   casing.
//!
//! Freshly spawned bodies get their launch impulse as an initial velocity
//! (`impulse / mass` against an explicit mass), so nothing waits on avian to
//! finish setting them up. The shooter already exists, so its recoil goes
//! through `ImpulseRequest`.

use bevy::ecs::message::MessageWriter;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use rand::Rng;

use super::aim::{forward, MountFrame};
use super::components::{GunKnockback, WeaponMounts, WeaponRig, WeaponRng};
use super::config::WeaponConfig;
use super::messages::{ImpulseRequest, ShakeRequest, ShotFired, SoundCue, VfxKind, VfxRequest};
use super::volley::PelletAngles;
use crate::plugins::projectiles::{casing_bundle, projectile_bundle, CasingLaunch};

/// Everything random or derived about one pellet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PelletPlan {
    /// Scattered projectile angle, degrees.
    pub projectile_angle: f32,
    pub projectile_impulse: Vec2,
    /// Impulse on the shooter body.
    pub recoil: Vec2,
    /// Scattered ejection angle, degrees.
    pub casing_angle: f32,
    /// Cosmetic spawn rotation of the casing, degrees.
    pub casing_rotation: f32,
    pub casing_impulse: Vec2,
    pub casing_torque: f32,
}

#[inline]
pub fn scatter<R: Rng + ?Sized>(rng: &mut R, angle: f32, range: f32) -> f32 {
    angle + (rng.gen_range(0.0..1.0f32) - 0.5) * range
}

/// `1 - uniform[0, range)`; exactly 1 when `range` is 0.
#[inline]
pub fn ejection_factor<R: Rng + ?Sized>(rng: &mut R, range: f32) -> f32 {
    if range > 0.0 {
        1.0 - rng.gen_range(0.0..range)
    } else {
        1.0
    }
}

/// Recoil never pushes the shooter down.
#[inline]
pub fn recoil_impulse(projectile_forward: Vec2, magnitude: f32) -> Vec2 {
    let mut knockback = -projectile_forward * magnitude;
    knockback.y = knockback.y.max(0.0);
    knockback
}

pub fn plan_pellet<R: Rng + ?Sized>(
    rng: &mut R,
    config: &WeaponConfig,
    angles: PelletAngles,
) -> PelletPlan {
    let projectile_angle = scatter(rng, angles.projectile, config.scatter);
    let projectile_forward = forward(projectile_angle);

    let casing_angle = scatter(rng, angles.casing, config.shell_scatter);
    let casing_rotation = rng.gen_range(0.0..360.0f32);
    let casing_impulse = forward(casing_angle)
        * config.shell_force
        * ejection_factor(rng, config.shell_random_range);
    let casing_torque = config.shell_force * ejection_factor(rng, config.shell_random_range);

    PelletPlan {
        projectile_angle,
        projectile_impulse: projectile_forward * config.bullet_force,
        recoil: recoil_impulse(projectile_forward, config.player_knockback),
        casing_angle,
        casing_rotation,
        casing_impulse,
        casing_torque,
    }
}

/// Per-volley context shared by all pellets.
#[derive(Debug, Clone, Copy)]
pub struct VolleyContext<'a> {
    pub weapon: Entity,
    pub config: &'a WeaponConfig,
    pub rig: &'a WeaponRig,
    pub mounts: &'a WeaponMounts,
    pub frame: MountFrame,
    pub now: f32,
}

#[derive(SystemParam)]
pub struct ShotDispatcher<'w, 's> {
    commands: Commands<'w, 's>,
    rng: ResMut<'w, WeaponRng>,
    actuators: Query<'w, 's, &'static mut GunKnockback>,
    impulses: MessageWriter<'w, ImpulseRequest>,
    shots: MessageWriter<'w, ShotFired>,
    shakes: MessageWriter<'w, ShakeRequest>,
    sounds: MessageWriter<'w, SoundCue>,
    vfx: MessageWriter<'w, VfxRequest>,
}

impl ShotDispatcher<'_, '_> {
    pub fn dispatch(&mut self, volley: &VolleyContext, angles: PelletAngles) -> PelletPlan {
        let config = volley.config;
        let plan = plan_pellet(&mut self.rng.0, config, angles);

        let muzzle = volley.frame.point(volley.mounts.fire_point);
        let mount_forward = forward(volley.frame.angle(0.0));
        let projectile_forward = forward(plan.projectile_angle);

        self.commands.spawn(projectile_bundle(
            muzzle,
            plan.projectile_angle,
            plan.projectile_impulse,
            config.projectile,
        ));

        self.impulses.write(ImpulseRequest {
            target: volley.rig.shooter,
            linear: plan.recoil,
            angular: 0.0,
        });

        if let (Some(actuator), Some(knock)) = (volley.rig.actuator, config.gun_knockback) {
            match self.actuators.get_mut(actuator) {
                Ok(mut gun) => gun.trigger(knock.magnitude, knock.duration),
                Err(e) => debug!("Gun knockback actuator {actuator} unavailable: {e:?}"),
            }
        }

        if let Some(shake) = config.camera_shake {
            self.shakes.write(ShakeRequest {
                amplitude: shake.common_amplitude,
                direction: None,
            });
            self.shakes.write(ShakeRequest {
                amplitude: shake.direct_amplitude,
                direction: Some(mount_forward),
            });
        }

        self.shots.write(ShotFired {
            weapon: volley.weapon,
            shooter: volley.rig.shooter,
            origin: muzzle,
            direction: projectile_forward,
        });

        if let Some(path) = &config.shoot_sound {
            self.sounds.write(SoundCue { path: path.clone() });
        }
        if config.muzzle_flash {
            self.vfx.write(VfxRequest {
                kind: VfxKind::MuzzleFlash,
                at: muzzle,
                rotation: volley.frame.angle(0.0),
                delay: 0.0,
            });
        }

        let casing = self
            .commands
            .spawn(casing_bundle(CasingLaunch {
                at: volley.frame.point(volley.mounts.shell_point),
                rotation: plan.casing_rotation,
                impulse: plan.casing_impulse,
                torque: plan.casing_torque,
                spawned_at: volley.now,
            }))
            .id();
        if let Some(container) = volley.rig.casing_container {
            self.commands.entity(casing).insert(ChildOf(container));
        }

        plan
    }
}
