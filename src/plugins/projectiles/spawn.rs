//! Spawn bundles for projectiles and casings.
//!
//! Both bodies carry an explicit mass (auto mass off), so a launch impulse can
//! be applied as the initial velocity `impulse / mass` directly in the bundle.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use super::components::{Casing, Lifetime, Projectile, ProjectileStats};
use crate::common::{layers::Layer, state::GameState};

pub const PROJECTILE_MASS: f32 = 1.0;
pub const CASING_MASS: f32 = 1.0;
pub const CASING_ANGULAR_INERTIA: f32 = 20.0;

#[inline]
pub fn projectile_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Projectile, [Layer::World, Layer::Target])
}

#[inline]
pub fn casing_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Casing, [Layer::World])
}

/// `angle` is the world angle in degrees; the projectile's local +X points along it.
pub fn projectile_bundle(at: Vec2, angle: f32, impulse: Vec2, stats: ProjectileStats) -> impl Bundle {
    (
        Name::new("Projectile"),
        Projectile { stats },
        Lifetime(Timer::from_seconds(stats.lifetime, TimerMode::Once)),
        Sprite {
            color: Color::srgb(1.0, 0.85, 0.3),
            custom_size: Some(Vec2::new(8.0, 3.0)),
            ..default()
        },
        Transform::from_translation(at.extend(2.0))
            .with_rotation(Quat::from_rotation_z(angle.to_radians())),
        (
            RigidBody::Dynamic,
            Collider::circle(2.0),
            Mass(PROJECTILE_MASS),
            NoAutoMass,
            GravityScale(0.0),
            projectile_layers(),
            LinearVelocity(impulse / PROJECTILE_MASS),
            // Avian only emits CollisionStart if one collider opts in.
            CollisionEventsEnabled,
        ),
        DespawnOnExit(GameState::InGame),
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CasingLaunch {
    pub at: Vec2,
    /// Spawn rotation, degrees.
    pub rotation: f32,
    pub impulse: Vec2,
    pub torque: f32,
    pub spawned_at: f32,
}

pub fn casing_bundle(launch: CasingLaunch) -> impl Bundle {
    (
        Name::new("Casing"),
        Casing {
            spawned_at: launch.spawned_at,
        },
        Sprite {
            color: Color::srgb(0.85, 0.65, 0.2),
            custom_size: Some(Vec2::new(4.0, 2.0)),
            ..default()
        },
        Transform::from_translation(launch.at.extend(1.5))
            .with_rotation(Quat::from_rotation_z(launch.rotation.to_radians())),
        (
            RigidBody::Dynamic,
            Collider::rectangle(4.0, 2.0),
            Mass(CASING_MASS),
            NoAutoMass,
            AngularInertia(CASING_ANGULAR_INERTIA),
            NoAutoAngularInertia,
            casing_layers(),
            LinearVelocity(launch.impulse / CASING_MASS),
            AngularVelocity(launch.torque / CASING_ANGULAR_INERTIA),
        ),
        DespawnOnExit(GameState::InGame),
    )
}
