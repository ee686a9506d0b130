//! Core plugin: shared resources and global settings.
//!
//! The weapon preset is read from `config/weapon.toml`. A missing file means
//! defaults; a file that fails to parse or validate stops startup.

use std::path::Path;

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::weapon::config::WEAPON_CONFIG_PATH;
use crate::plugins::weapon::{WeaponConfig, WeaponPreset, WeaponRng};

pub fn plugin(app: &mut App) {
    let tunables = Tunables::default();
    app.insert_resource(WeaponRng::seeded(tunables.rng_seed));
    app.insert_resource(tunables);
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));

    let preset = load_preset(Path::new(WEAPON_CONFIG_PATH))
        .unwrap_or_else(|e| panic!("Weapon preset rejected: {e}"));
    app.insert_resource(preset);
}

fn load_preset(path: &Path) -> crate::plugins::weapon::error::Result<WeaponPreset> {
    match WeaponConfig::load(path)? {
        Some(config) => {
            info!("Loaded weapon preset from {}", path.display());
            Ok(WeaponPreset(config))
        }
        None => {
            info!("No weapon preset at {}; using defaults", path.display());
            Ok(WeaponPreset::default())
        }
    }
}

#[cfg(test)]
mod tests;
