use std::path::Path;

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::core;
use crate::plugins::weapon::{WeaponConfig, WeaponPreset, WeaponRng};

#[test]
fn inserts_resources() {
    let mut app = App::new();
    core::plugin(&mut app);
    assert!(app.world().get_resource::<Tunables>().is_some());
    assert!(app.world().get_resource::<ClearColor>().is_some());
    assert!(app.world().get_resource::<WeaponRng>().is_some());
    assert!(app.world().get_resource::<WeaponPreset>().is_some());
}

#[test]
fn missing_preset_falls_back_to_defaults() {
    let preset = super::load_preset(Path::new("config/does-not-exist.toml")).unwrap();
    assert_eq!(preset.0, WeaponConfig::default());
}

#[test]
fn shipped_preset_is_valid() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/weapon.toml");
    let preset = super::load_preset(&path).unwrap();
    assert!(preset.0.validate().is_ok());
}
