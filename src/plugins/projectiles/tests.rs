//! Projectiles plugin tests, deterministic.
//!
//! Collisions are injected as `CollisionStart` messages rather than produced by
//! the physics pipeline, then the hit system runs once.
use avian2d::prelude::*;
use bevy::{ecs::message::Messages, prelude::*};

use super::{cap_casings, collision, components::*, spawn, tick_projectile_lifetime};
use crate::common::layers::Layer;
use crate::common::test_utils::{collect_messages, ensure_messages, run_system_once, time_after};
use crate::common::tunables::Tunables;
use crate::plugins::weapon::ImpulseRequest;

// --------------------------------------------------------------------------------------
// Helpers
// --------------------------------------------------------------------------------------

fn write_collision_start(world: &mut World, collider1: Entity, collider2: Entity) {
    ensure_messages::<CollisionStart>(world);
    world.write_message(CollisionStart {
        collider1,
        collider2,
        body1: Some(collider1),
        body2: Some(collider2),
    });
}

fn spawn_projectile(world: &mut World, velocity: Vec2, stats: ProjectileStats) -> Entity {
    world
        .spawn((
            Projectile { stats },
            LinearVelocity(velocity),
            spawn::projectile_layers(),
        ))
        .id()
}

fn hit_world() -> World {
    let mut world = World::new();
    ensure_messages::<ImpulseRequest>(&mut world);
    ensure_messages::<CollisionStart>(&mut world);
    world
}

// --------------------------------------------------------------------------------------
// Bundles
// --------------------------------------------------------------------------------------

#[test]
fn projectile_bundle_launches_with_impulse_over_mass_and_copies_stats() {
    let mut world = World::new();
    let stats = ProjectileStats {
        lifetime: 3.0,
        damage: 7.0,
        knockback: 50.0,
    };

    let e = world
        .spawn(spawn::projectile_bundle(
            Vec2::new(5.0, 6.0),
            90.0,
            Vec2::new(0.0, 900.0),
            stats,
        ))
        .id();

    let vel = world.get::<LinearVelocity>(e).unwrap();
    assert_eq!(vel.0, Vec2::new(0.0, 900.0) / spawn::PROJECTILE_MASS);

    let tf = world.get::<Transform>(e).unwrap();
    assert_eq!(tf.translation.truncate(), Vec2::new(5.0, 6.0));
    let (_, angle) = tf.rotation.to_axis_angle();
    assert!((angle.to_degrees() - 90.0).abs() < 1e-3);

    assert_eq!(world.get::<Projectile>(e).unwrap().stats, stats);
    assert_eq!(world.get::<GravityScale>(e).unwrap().0, 0.0);

    let layers = world.get::<CollisionLayers>(e).unwrap();
    assert!(layers.memberships.has_all(Layer::Projectile));
    assert!(layers.filters.has_all(Layer::World));
    assert!(layers.filters.has_all(Layer::Target));
}

#[test]
fn projectile_stats_are_a_copy_per_projectile() {
    let mut world = World::new();
    let mut stats = ProjectileStats::default();

    let a = world
        .spawn(spawn::projectile_bundle(Vec2::ZERO, 0.0, Vec2::X, stats))
        .id();
    stats.damage = 999.0;
    let b = world
        .spawn(spawn::projectile_bundle(Vec2::ZERO, 0.0, Vec2::X, stats))
        .id();

    world.get_mut::<Projectile>(b).unwrap().stats.knockback = 0.0;

    let pa = world.get::<Projectile>(a).unwrap().stats;
    assert_eq!(pa, ProjectileStats::default());
    assert_eq!(world.get::<Projectile>(b).unwrap().stats.damage, 999.0);
}

#[test]
fn casing_bundle_carries_velocity_and_spin() {
    let mut world = World::new();
    let e = world
        .spawn(spawn::casing_bundle(spawn::CasingLaunch {
            at: Vec2::new(1.0, 2.0),
            rotation: 45.0,
            impulse: Vec2::new(-40.0, 60.0),
            torque: 10.0,
            spawned_at: 1.5,
        }))
        .id();

    assert_eq!(
        world.get::<LinearVelocity>(e).unwrap().0,
        Vec2::new(-40.0, 60.0) / spawn::CASING_MASS
    );
    assert!(
        (world.get::<AngularVelocity>(e).unwrap().0 - 10.0 / spawn::CASING_ANGULAR_INERTIA).abs()
            < 1e-6
    );
    assert_eq!(world.get::<Casing>(e).unwrap().spawned_at, 1.5);

    let layers = world.get::<CollisionLayers>(e).unwrap();
    assert!(layers.memberships.has_all(Layer::Casing));
    assert!(!layers.filters.has_all(Layer::Target));
}

// --------------------------------------------------------------------------------------
// Lifetime
// --------------------------------------------------------------------------------------

#[test]
fn projectile_expires_after_lifetime() {
    let mut world = World::new();
    let stats = ProjectileStats {
        lifetime: 0.5,
        ..default()
    };
    let e = world
        .spawn((
            Projectile { stats },
            Lifetime(Timer::from_seconds(stats.lifetime, TimerMode::Once)),
        ))
        .id();

    world.insert_resource(time_after(0.25));
    run_system_once(&mut world, tick_projectile_lifetime);
    assert!(world.get_entity(e).is_ok());

    world.insert_resource(time_after(0.3));
    run_system_once(&mut world, tick_projectile_lifetime);
    assert!(world.get_entity(e).is_err());
}

// --------------------------------------------------------------------------------------
// Hits
// --------------------------------------------------------------------------------------

#[test]
fn hit_on_target_applies_damage_knockback_and_consumes_projectile() {
    let mut world = hit_world();
    let stats = ProjectileStats {
        lifetime: 1.0,
        damage: 15.0,
        knockback: 200.0,
    };
    let projectile = spawn_projectile(&mut world, Vec2::new(300.0, 0.0), stats);
    let target = world
        .spawn((
            CollisionLayers::new(Layer::Target, [Layer::Projectile]),
            Health { hp: 40.0 },
        ))
        .id();

    write_collision_start(&mut world, target, projectile);
    run_system_once(&mut world, collision::process_projectile_hits);

    assert_eq!(world.get::<Health>(target).unwrap().hp, 25.0);
    assert!(world.get_entity(projectile).is_err());

    let impulses = collect_messages::<ImpulseRequest>(&mut world);
    assert_eq!(impulses.len(), 1);
    assert_eq!(impulses[0].target, target);
    assert_eq!(impulses[0].linear, Vec2::new(200.0, 0.0));
}

#[test]
fn hit_on_world_consumes_projectile_without_impulse() {
    let mut world = hit_world();
    let projectile = spawn_projectile(&mut world, Vec2::new(0.0, -100.0), ProjectileStats::default());
    let wall = world
        .spawn(CollisionLayers::new(Layer::World, [Layer::Projectile]))
        .id();

    write_collision_start(&mut world, projectile, wall);
    run_system_once(&mut world, collision::process_projectile_hits);

    assert!(world.get_entity(projectile).is_err());
    assert!(collect_messages::<ImpulseRequest>(&mut world).is_empty());
}

#[test]
fn projectile_resolves_only_one_hit_per_frame() {
    let mut world = hit_world();
    let projectile = spawn_projectile(
        &mut world,
        Vec2::X * 10.0,
        ProjectileStats {
            damage: 10.0,
            ..default()
        },
    );
    let a = world
        .spawn((
            CollisionLayers::new(Layer::Target, [Layer::Projectile]),
            Health { hp: 30.0 },
        ))
        .id();
    let b = world
        .spawn((
            CollisionLayers::new(Layer::Target, [Layer::Projectile]),
            Health { hp: 30.0 },
        ))
        .id();

    write_collision_start(&mut world, projectile, a);
    write_collision_start(&mut world, projectile, b);
    run_system_once(&mut world, collision::process_projectile_hits);

    assert_eq!(world.get::<Health>(a).unwrap().hp, 20.0);
    assert_eq!(world.get::<Health>(b).unwrap().hp, 30.0);
}

#[test]
fn projectile_ignores_other_projectiles_and_casings() {
    let mut world = hit_world();
    let p1 = spawn_projectile(&mut world, Vec2::X, ProjectileStats::default());
    let p2 = spawn_projectile(&mut world, Vec2::X, ProjectileStats::default());
    let casing = world
        .spawn((Casing { spawned_at: 0.0 }, spawn::casing_layers()))
        .id();

    write_collision_start(&mut world, p1, p2);
    write_collision_start(&mut world, p1, casing);
    run_system_once(&mut world, collision::process_projectile_hits);

    assert!(world.get_entity(p1).is_ok());
    assert!(world.get_entity(p2).is_ok());
    assert_eq!(
        world.resource::<Messages<ImpulseRequest>>().len(),
        0,
        "no knockback for non-targets"
    );
}

// --------------------------------------------------------------------------------------
// Casing cap
// --------------------------------------------------------------------------------------

#[test]
fn cap_casings_despawns_oldest_first() {
    let mut world = World::new();
    world.insert_resource(Tunables {
        max_casings: 2,
        ..default()
    });

    let oldest = world.spawn(Casing { spawned_at: 0.1 }).id();
    let newest = world.spawn(Casing { spawned_at: 0.9 }).id();
    let middle = world.spawn(Casing { spawned_at: 0.5 }).id();

    run_system_once(&mut world, cap_casings);

    assert!(world.get_entity(oldest).is_err());
    assert!(world.get_entity(middle).is_ok());
    assert!(world.get_entity(newest).is_ok());
}

#[test]
fn cap_casings_is_noop_under_limit() {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    let e = world.spawn(Casing { spawned_at: 0.0 }).id();

    run_system_once(&mut world, cap_casings);

    assert!(world.get_entity(e).is_ok());
}
