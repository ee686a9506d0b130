use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::common::test_utils::run_system_once;
use crate::plugins::projectiles::CasingContainer;

#[test]
fn spawns_walls_on_enter() {
    let mut world = World::new();
    run_system_once(&mut world, super::spawn_arena);

    let walls = world
        .query::<(&Name, &RigidBody)>()
        .iter(&world)
        .filter(|(n, rb)| n.as_str().starts_with("Wall") && matches!(**rb, RigidBody::Static))
        .count();
    assert_eq!(walls, 4);
}

#[test]
fn walls_stop_projectiles_and_casings() {
    let layers = super::world_layers();
    assert!(layers.filters.has_all(Layer::Projectile));
    assert!(layers.filters.has_all(Layer::Casing));
    assert!(layers.filters.has_all(Layer::Player));
}

#[test]
fn spawns_exactly_one_casing_container() {
    let mut world = World::new();
    run_system_once(&mut world, super::spawn_casing_container);

    let count = world.query::<&CasingContainer>().iter(&world).count();
    assert_eq!(count, 1);
}
