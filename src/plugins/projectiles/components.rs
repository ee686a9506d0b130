use bevy::prelude::*;
use serde::Deserialize;

/// Stats a projectile carries. Copied out of `WeaponConfig` at spawn time.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ProjectileStats {
    /// Seconds before the projectile expires on its own.
    pub lifetime: f32,
    pub damage: f32,
    /// Impulse magnitude applied to whatever it hits.
    pub knockback: f32,
}

impl Default for ProjectileStats {
    fn default() -> Self {
        Self {
            lifetime: 10.0,
            damage: 20.0,
            knockback: 3000.0,
        }
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Projectile {
    pub stats: ProjectileStats,
}

#[derive(Component, Deref, DerefMut)]
pub struct Lifetime(pub Timer);

/// Spent casing. `spawned_at` (elapsed seconds) orders casings for the cap.
#[derive(Component, Debug, Clone, Copy)]
pub struct Casing {
    pub spawned_at: f32,
}

/// Grouping node casings are parented under. No gameplay meaning.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct CasingContainer;

#[derive(Component, Debug, Clone)]
pub struct Health {
    pub hp: f32,
}
