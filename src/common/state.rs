//! Global state machine.
//!
//! Everything the weapon spawns is scoped to `InGame` via `DespawnOnExit`.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
}
