use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use super::components::{Health, Projectile};
use crate::common::layers::Layer;
use crate::plugins::weapon::ImpulseRequest;

#[derive(Clone, Copy, Debug)]
struct CollisionTarget {
    collider: Entity,
    body: Option<Entity>,
}

impl CollisionTarget {
    #[inline]
    fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
fn targets(ev: &CollisionStart) -> (CollisionTarget, CollisionTarget) {
    (
        CollisionTarget {
            collider: ev.collider1,
            body: ev.body1,
        },
        CollisionTarget {
            collider: ev.collider2,
            body: ev.body2,
        },
    )
}

#[inline]
fn is_in_layer(layers: &CollisionLayers, layer: Layer) -> bool {
    layers.memberships.has_all(layer)
}

/// Resolve projectile hits.
///
/// - World: the projectile is consumed.
/// - Target: damage from the projectile's own stats, knockback along its
///   travel direction, projectile consumed.
///
/// A projectile resolves at most one hit per frame.
pub fn process_projectile_hits(
    mut commands: Commands,
    mut started: MessageReader<CollisionStart>,
    q_projectiles: Query<(&Projectile, &LinearVelocity)>,
    q_layers: Query<&CollisionLayers>,
    mut q_health: Query<&mut Health>,
    mut impulses: MessageWriter<ImpulseRequest>,
    mut seen: Local<HashSet<Entity>>,
) {
    seen.clear();

    for ev in started.read() {
        let (t1, t2) = targets(ev);

        let p1 = q_projectiles.contains(t1.collider);
        let p2 = q_projectiles.contains(t2.collider);
        if !(p1 ^ p2) {
            continue;
        }
        let (projectile_side, other_side) = if p1 { (t1, t2) } else { (t2, t1) };

        if !seen.insert(projectile_side.collider) {
            continue;
        }

        let Ok(other_layers) = q_layers.get(other_side.collider) else {
            continue;
        };
        let Ok((projectile, velocity)) = q_projectiles.get(projectile_side.collider) else {
            continue;
        };

        if is_in_layer(other_layers, Layer::Target) {
            let target = other_side.gameplay_owner();
            let stats = projectile.stats;

            if let Ok(mut hp) = q_health.get_mut(target) {
                hp.hp -= stats.damage;
            }

            let dir = velocity.0.normalize_or_zero();
            if dir != Vec2::ZERO && stats.knockback > 0.0 {
                impulses.write(ImpulseRequest {
                    target,
                    linear: dir * stats.knockback,
                    angular: 0.0,
                });
            }
        } else if !is_in_layer(other_layers, Layer::World) {
            continue;
        }

        commands.entity(projectile_side.collider).try_despawn();
    }
}
