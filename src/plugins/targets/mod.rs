//! Targets plugin: training dummies to shoot at.
//!
//! Dummies are dynamic bodies so knockback impulses visibly push them around.
//! `Health` is gameplay truth, written by the projectile hit system; this
//! module reads it and drives a small lifecycle:
//!
//! ```text
//! Alive ──hp <= 0──> Dying (shrink + fade, no collisions) ──> Dead + PendingDespawn
//! ```
//!
//! Despawning is deferred to PostUpdate so nothing in the fixed step still
//! has queued work for the entity.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy::time::Fixed;
use bevy_firefly::prelude::Occluder2d;

use crate::common::{layers::Layer, state::GameState};
use crate::plugins::projectiles::Health;
use crate::plugins::projectiles::collision::process_projectile_hits;

const DUMMY_SIZE: Vec2 = Vec2::new(24.0, 40.0);
const DUMMY_HP: f32 = 100.0;
const DUMMY_MASS: f32 = 15.0;
const DYING_SECS: f32 = 0.35;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Target;

#[derive(Component, Debug, Clone)]
pub enum TargetLifeState {
    Alive,
    Dying { timer: Timer },
    Dead,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDespawn;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_targets)
        .add_systems(
            FixedPostUpdate,
            (target_death_trigger, target_death_progress)
                .chain()
                .after(process_projectile_hits)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            PostUpdate,
            despawn_marked_targets.run_if(in_state(GameState::InGame)),
        );
}

pub fn target_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Target, [Layer::World, Layer::Player, Layer::Projectile])
}

/// Membership kept, filters cleared: a dying dummy stops interacting at once.
#[inline]
fn non_interacting_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Target, [] as [Layer; 0])
}

fn spawn_targets(mut commands: Commands) {
    for (i, x) in [-320.0, 240.0, 420.0].into_iter().enumerate() {
        commands.spawn((
            Name::new(format!("Dummy{i}")),
            Target,
            Health { hp: DUMMY_HP },
            TargetLifeState::Alive,
            Sprite {
                color: Color::srgb(0.9, 0.25, 0.25),
                custom_size: Some(DUMMY_SIZE),
                ..default()
            },
            Transform::from_xyz(x, -200.0, 1.0),
            RigidBody::Dynamic,
            Collider::rectangle(DUMMY_SIZE.x, DUMMY_SIZE.y),
            Mass(DUMMY_MASS),
            NoAutoMass,
            LockedAxes::ROTATION_LOCKED,
            target_layers(),
            Occluder2d::circle(DUMMY_SIZE.x * 0.5),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

fn target_death_trigger(
    mut q: Query<
        (&Health, &mut TargetLifeState, &mut CollisionLayers, &mut Sprite),
        (With<Target>, Without<PendingDespawn>),
    >,
) {
    for (hp, mut life, mut layers, mut sprite) in &mut q {
        if !matches!(*life, TargetLifeState::Alive) || hp.hp > 0.0 {
            continue;
        }
        *life = TargetLifeState::Dying {
            timer: Timer::from_seconds(DYING_SECS, TimerMode::Once),
        };
        *layers = non_interacting_layers();
        sprite.color = Color::srgba(0.8, 0.8, 0.8, 1.0);
    }
}

fn target_death_progress(
    time: Res<Time<Fixed>>,
    mut commands: Commands,
    mut q: Query<
        (Entity, &mut TargetLifeState, &mut Sprite, &mut Transform),
        (With<Target>, Without<PendingDespawn>),
    >,
) {
    for (e, mut life, mut sprite, mut tf) in &mut q {
        let TargetLifeState::Dying { timer } = &mut *life else {
            continue;
        };

        timer.tick(time.delta());

        let dur = timer.duration().as_secs_f32().max(0.0001);
        let t = (timer.elapsed_secs() / dur).clamp(0.0, 1.0);

        tf.scale = Vec3::splat(1.0 - t);
        let mut c = sprite.color.to_srgba();
        c.alpha = 1.0 - t;
        sprite.color = c.into();

        if timer.is_finished() {
            *life = TargetLifeState::Dead;
            commands.entity(e).insert(PendingDespawn);
            debug!("Target {e} finished dying");
        }
    }
}

fn despawn_marked_targets(mut commands: Commands, q: Query<Entity, With<PendingDespawn>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}
