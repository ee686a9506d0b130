//! Per-weapon tunables.
//!
//! `WeaponConfig` is attached to the weapon entity at construction and never
//! written afterwards. Values that end up on a projectile are copied out via
//! [`ProjectileStats`], so a live projectile can't reach back into the config.

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use super::error::{Result, WeaponError};
use crate::plugins::projectiles::ProjectileStats;

/// Default location of the player weapon preset, relative to the working dir.
pub const WEAPON_CONFIG_PATH: &str = "config/weapon.toml";

#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FireButton {
    #[default]
    Left,
    Right,
}

impl FireButton {
    pub fn mouse_button(self) -> MouseButton {
        match self {
            FireButton::Left => MouseButton::Left,
            FireButton::Right => MouseButton::Right,
        }
    }
}

/// Camera shake amplitudes (trauma units, 0..1).
#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct ShakeConfig {
    pub common_amplitude: f32,
    pub direct_amplitude: f32,
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            common_amplitude: 0.12,
            direct_amplitude: 0.35,
        }
    }
}

/// Stylised gun push, independent of the physics recoil.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct GunKnockbackConfig {
    /// Pixels along the gun's local -X.
    pub magnitude: f32,
    pub duration: f32,
}

impl Default for GunKnockbackConfig {
    fn default() -> Self {
        Self {
            magnitude: 6.0,
            duration: 0.08,
        }
    }
}

#[derive(Component, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct WeaponConfig {
    /// Seconds between volleys.
    pub cooldown: f32,
    /// Full projectile scatter range in degrees.
    pub scatter: f32,
    /// Full casing scatter range in degrees.
    pub shell_scatter: f32,
    pub bullet_force: f32,
    pub shell_force: f32,
    /// Upper bound of the random reduction applied to casing impulses, in [0, 1].
    pub shell_random_range: f32,
    pub pellet_count: u32,
    /// Degrees between neighbouring pellets of one volley.
    pub angle_between_pellets: f32,
    /// Recoil impulse magnitude applied to the shooter body.
    pub player_knockback: f32,
    pub gun_knockback: Option<GunKnockbackConfig>,
    pub camera_shake: Option<ShakeConfig>,
    /// Seconds to wait after release before realigning.
    pub inactive_time: f32,
    pub alignment_speed: f32,
    /// When set, presses during Cessation are ignored.
    pub lock_out_during_cessation: bool,
    pub projectile: ProjectileStats,
    /// Asset path of the shot sound.
    pub shoot_sound: Option<String>,
    pub muzzle_flash: bool,
    pub fire_button: FireButton,
    /// Keeps the trigger asserted every tick while held.
    pub hold_to_fire: bool,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            cooldown: 0.2,
            scatter: 2.0,
            shell_scatter: 2.0,
            bullet_force: 900.0,
            shell_force: 100.0,
            shell_random_range: 0.2,
            pellet_count: 1,
            angle_between_pellets: 0.0,
            player_knockback: 6000.0,
            gun_knockback: Some(GunKnockbackConfig::default()),
            camera_shake: Some(ShakeConfig::default()),
            inactive_time: 1.0,
            alignment_speed: 1.0,
            lock_out_during_cessation: false,
            projectile: ProjectileStats::default(),
            shoot_sound: None,
            muzzle_flash: true,
            fire_button: FireButton::Left,
            hold_to_fire: false,
        }
    }
}

impl WeaponConfig {
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let config: WeaponConfig =
            toml::from_str(src).map_err(|e| WeaponError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a preset. A missing file yields `Ok(None)`.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(path)
            .map_err(|e| WeaponError::config_read(path.display().to_string(), e.to_string()))?;
        Self::from_toml_str(&raw).map(Some)
    }

    pub fn validate(&self) -> Result<()> {
        if self.pellet_count < 1 {
            return Err(WeaponError::invalid("pellet_count must be >= 1"));
        }
        if !(self.cooldown > 0.0) {
            return Err(WeaponError::invalid("cooldown must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.shell_random_range) {
            return Err(WeaponError::invalid("shell_random_range must be within [0, 1]"));
        }
        if self.scatter < 0.0 || self.shell_scatter < 0.0 {
            return Err(WeaponError::invalid("scatter ranges must be >= 0"));
        }
        if self.inactive_time < 0.0 {
            return Err(WeaponError::invalid("inactive_time must be >= 0"));
        }
        if !(self.alignment_speed > 0.0) {
            return Err(WeaponError::invalid("alignment_speed must be > 0"));
        }
        if !(self.projectile.lifetime > 0.0) {
            return Err(WeaponError::invalid("projectile.lifetime must be > 0"));
        }
        Ok(())
    }
}

/// The preset new player weapons are built from.
#[derive(Resource, Debug, Clone, Default)]
pub struct WeaponPreset(pub WeaponConfig);
