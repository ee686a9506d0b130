//! Shot sequencing: cooldown gate + pellet fan.

use super::config::WeaponConfig;
use super::state::{GunState, WeaponRuntime};

/// Launch angles for one pellet, before scatter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PelletAngles {
    pub projectile: f32,
    pub casing: f32,
}

/// `count` angles centred on `base`, `between` degrees apart.
pub fn fan(base: f32, count: u32, between: f32) -> impl Iterator<Item = f32> {
    let start = base - count.saturating_sub(1) as f32 * between / 2.0;
    (0..count).map(move |i| start + i as f32 * between)
}

/// One volley's worth of pellet angle pairs.
pub fn volley(
    config: &WeaponConfig,
    projectile_base: f32,
    casing_base: f32,
) -> impl Iterator<Item = PelletAngles> {
    let n = config.pellet_count;
    let between = config.angle_between_pellets;
    fan(projectile_base, n, between)
        .zip(fan(casing_base, n, between))
        .map(|(projectile, casing)| PelletAngles { projectile, casing })
}

impl WeaponRuntime {
    /// Cooldown gate. Charges the cooldown and returns `true` when a volley is due.
    pub fn try_fire(&mut self, config: &WeaponConfig, now: f32) -> bool {
        if self.state() != GunState::Shooting || now - self.last_shot_time <= config.cooldown {
            return false;
        }
        self.last_shot_time = now;
        true
    }
}
