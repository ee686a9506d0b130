//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `gunplay::game::configure_headless` to install gameplay plugins.
//! - time advances by a fixed step per `update()`, so cooldowns are deterministic.

#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

pub const STEP: Duration = Duration::from_micros(16_667);

pub fn app_headless() -> App {
    let mut app = App::new();

    // AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(STEP));

    gunplay::game::configure_headless(&mut app);
    // `App::run` does this; manual `update()` loops must do it themselves so
    // plugins' `finish` hooks (e.g. avian's diagnostics resources) run.
    app.finish();
    app.cleanup();
    app
}

pub fn run_updates(app: &mut App, n: usize) {
    for _ in 0..n {
        app.update();
    }
}
