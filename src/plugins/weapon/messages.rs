//! Buffered weapon messages.
//!
//! Input arrives as [`WeaponInput`] and is drained once per tick, so the state
//! machine is never mutated mid-tick. Everything the dispatcher asks of the
//! outside world (impulses on existing bodies, feedback) leaves as a message
//! too; any number of readers can fan out from them.

use bevy::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TriggerEvent {
    FirePressed,
    FireReleased,
    /// World-space pointer position.
    PointerMoved(Vec2),
}

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct WeaponInput {
    pub weapon: Entity,
    pub event: TriggerEvent,
}

impl WeaponInput {
    pub fn new(weapon: Entity, event: TriggerEvent) -> Self {
        Self { weapon, event }
    }
}

/// Instantaneous impulse on an existing rigid body.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct ImpulseRequest {
    pub target: Entity,
    pub linear: Vec2,
    pub angular: f32,
}

/// One pellet left the barrel.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct ShotFired {
    pub weapon: Entity,
    pub shooter: Entity,
    pub origin: Vec2,
    pub direction: Vec2,
}

/// Camera shake intent. `direction: None` is omnidirectional.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct ShakeRequest {
    pub amplitude: f32,
    pub direction: Option<Vec2>,
}

#[derive(Message, Clone, Debug, PartialEq)]
pub struct SoundCue {
    pub path: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VfxKind {
    MuzzleFlash,
}

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct VfxRequest {
    pub kind: VfxKind,
    pub at: Vec2,
    /// World angle, degrees.
    pub rotation: f32,
    /// Seconds before the effect shows.
    pub delay: f32,
}
