//! Weapon error type.

use bevy::prelude::*;
use thiserror::Error;

use super::state::GunState;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WeaponError {
    /// Config file could not be read from disk
    #[error("failed to read weapon config '{path}': {reason}")]
    ConfigRead { path: String, reason: String },

    /// Config file is not valid TOML for `WeaponConfig`
    #[error("failed to parse weapon config: {0}")]
    ConfigParse(String),

    /// Config parsed but breaks an invariant
    #[error("invalid weapon config: {0}")]
    InvalidConfig(String),

    #[error("shooter {0} does not exist or has no ShooterBody/RigidBody")]
    MissingShooter(Entity),

    #[error("gun pivot {0} does not exist or has no Transform")]
    MissingRotatePoint(Entity),

    /// Zero or several `CasingContainer`s and none set explicitly
    #[error("no casing container set and {found} found in the world (need exactly one)")]
    UnresolvedCasingContainer { found: usize },

    #[error("fire released while {0:?}; expected Shooting")]
    ReleaseWithoutPress(GunState),
}

impl WeaponError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        WeaponError::InvalidConfig(reason.into())
    }

    pub fn config_read(path: impl Into<String>, reason: impl Into<String>) -> Self {
        WeaponError::ConfigRead {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WeaponError>;
