//! Projectiles plugin: what happens to a pellet and its casing after the
//! weapon spawns them.
//!
//! # Data flow
//! ```text
//!   Update (weapon)            fire_volleys spawns Projectile + Casing bundles
//!                                   │
//!                                   v
//!   FixedUpdate                tick_projectile_lifetime  (expiry → despawn)
//!                                   │
//!   FixedPostUpdate            Avian emits CollisionStart
//!                              process_projectile_hits
//!                                - Target: Health -= damage, ImpulseRequest knockback
//!                                - World: consumed
//!                                   │
//!   PostUpdate                 cap_casings (oldest first past Tunables::max_casings)
//! ```
//!
//! Nothing here is pooled. Each shot spawns fresh entities and each hit or
//! expiry despawns them.

pub mod collision;
pub mod components;
pub mod spawn;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::{state::GameState, tunables::Tunables};

pub use components::{Casing, CasingContainer, Health, Lifetime, Projectile, ProjectileStats};
pub use spawn::{CasingLaunch, casing_bundle, casing_layers, projectile_bundle, projectile_layers};

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            tick_projectile_lifetime.run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedPostUpdate,
            collision::process_projectile_hits
                .after(CollisionEventSystems)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(PostUpdate, cap_casings.run_if(in_state(GameState::InGame)));
    }
}

pub fn tick_projectile_lifetime(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut Lifetime), With<Projectile>>,
) {
    for (e, mut lifetime) in &mut q {
        lifetime.tick(time.delta());
        if lifetime.is_finished() {
            commands.entity(e).try_despawn();
        }
    }
}

/// Keep at most `Tunables::max_casings` casings alive, dropping the oldest.
pub fn cap_casings(
    mut commands: Commands,
    tunables: Res<Tunables>,
    q: Query<(Entity, &Casing)>,
) {
    let count = q.iter().count();
    if count <= tunables.max_casings {
        return;
    }

    let mut casings: Vec<(Entity, f32)> = q.iter().map(|(e, c)| (e, c.spawned_at)).collect();
    casings.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

    let excess = count - tunables.max_casings;
    debug!("Casing cap reached; despawning {excess} oldest");
    for (e, _) in casings.into_iter().take(excess) {
        commands.entity(e).try_despawn();
    }
}

#[cfg(test)]
mod tests;
