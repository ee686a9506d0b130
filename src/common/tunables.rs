//! Tunable gameplay constants.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    pub gravity: Vec2,
    pub player_speed: f32,
    /// Horizontal steering rate (px/s²). Finite so recoil is not erased in one step.
    pub player_accel: f32,
    pub max_casings: usize,
    pub rng_seed: u64,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,
            gravity: Vec2::new(0.0, -980.0),
            player_speed: 260.0,
            player_accel: 1800.0,
            max_casings: 200,
            rng_seed: 0x5EED_2D5E,
        }
    }
}
