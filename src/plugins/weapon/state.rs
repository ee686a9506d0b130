//! Firing state machine.
//!
//! ```text
//!            press                release              elapsed > inactive_time
//!   Idle ───────────▶ Shooting ───────────▶ Cessation ──────────────────────▶ Alignment
//!    ▲                   ▲                                                       │
//!    │                   └──────────────────── press ────────────────────────────┤
//!    └──────────────────────────── mount angle ≈ neutral ────────────────────────┘
//! ```
//!
//! Input (`press` / `release` / `point_at`) only mutates fields. All timing and
//! orientation work happens in [`WeaponRuntime::tick`], once per frame.
//!
//! Entry actions run at the start of the tick following a state change, detected
//! by comparing `state` with `previous_state`. Only Shooting, Cessation and
//! Alignment have entry actions (facing lock / unlock).

use bevy::prelude::*;

use super::aim::{lerp_degrees, resolve_mount_aim, AimSolution};
use super::config::WeaponConfig;
use super::error::{Result, WeaponError};

/// Mount angles closer than this to neutral count as aligned.
pub const ALIGN_EPSILON_DEG: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GunState {
    #[default]
    Idle,
    Shooting,
    Cessation,
    Alignment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipLockAction {
    Lock,
    Unlock,
}

/// What the shooter body has to do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    pub lock: Option<FlipLockAction>,
    /// `Some(right)` while aiming; the shooter should flip to match.
    pub facing: Option<bool>,
}

/// Mutable per-weapon state. Exactly one per attached weapon; only the weapon
/// systems write it.
#[derive(Component, Debug, Clone, Default)]
pub struct WeaponRuntime {
    state: GunState,
    previous_state: GunState,
    cessation_elapsed: f32,
    pub(super) last_shot_time: f32,
    aim_locked: bool,
    pointer: Vec2,
    mount_angle: f32,
    aim: AimSolution,
}

impl WeaponRuntime {
    pub fn state(&self) -> GunState {
        self.state
    }

    pub fn cessation_elapsed(&self) -> f32 {
        self.cessation_elapsed
    }

    pub fn last_shot_time(&self) -> f32 {
        self.last_shot_time
    }

    pub fn aim_locked(&self) -> bool {
        self.aim_locked
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Local rotation of the gun pivot, degrees.
    pub fn mount_angle(&self) -> f32 {
        self.mount_angle
    }

    pub fn aim(&self) -> AimSolution {
        self.aim
    }

    /// Fire pressed (or a hold re-asserted). Returns `false` if ignored.
    ///
    /// Accepted from every state, so a press during Alignment goes straight
    /// back to Shooting. Only `lock_out_during_cessation` can refuse it.
    pub fn press(&mut self, config: &WeaponConfig) -> bool {
        if self.state == GunState::Cessation && config.lock_out_during_cessation {
            return false;
        }
        self.state = GunState::Shooting;
        true
    }

    pub fn release(&mut self) -> Result<()> {
        if self.state != GunState::Shooting {
            return Err(WeaponError::ReleaseWithoutPress(self.state));
        }
        self.state = GunState::Cessation;
        self.cessation_elapsed = 0.0;
        Ok(())
    }

    pub fn point_at(&mut self, world: Vec2) {
        self.pointer = world;
    }

    /// Advance one frame. `shooter` is the shooter's world origin and
    /// `pivot_offset` the gun pivot's shooter-local mount.
    pub fn tick(
        &mut self,
        config: &WeaponConfig,
        dt: f32,
        shooter: Vec2,
        pivot_offset: Vec2,
    ) -> TickReport {
        let mut report = TickReport::default();

        if self.state != self.previous_state {
            report.lock = self.on_enter(self.state);
        }
        self.previous_state = self.state;

        match self.state {
            GunState::Idle => {}
            GunState::Shooting => {
                self.aim = resolve_mount_aim(shooter, pivot_offset, self.pointer);
                self.mount_angle = self.aim.mount_angle;
                report.facing = Some(self.aim.facing_right);
            }
            GunState::Cessation => {
                self.cessation_elapsed += dt;
                if self.cessation_elapsed > config.inactive_time {
                    self.state = GunState::Alignment;
                }
            }
            GunState::Alignment => {
                if self.mount_angle.abs() < ALIGN_EPSILON_DEG {
                    self.mount_angle = 0.0;
                    self.state = GunState::Idle;
                } else {
                    self.mount_angle =
                        lerp_degrees(self.mount_angle, 0.0, config.alignment_speed * dt);
                }
            }
        }

        report
    }

    fn on_enter(&mut self, state: GunState) -> Option<FlipLockAction> {
        match state {
            GunState::Shooting | GunState::Cessation if !self.aim_locked => {
                self.aim_locked = true;
                Some(FlipLockAction::Lock)
            }
            GunState::Alignment if self.aim_locked => {
                self.aim_locked = false;
                Some(FlipLockAction::Unlock)
            }
            _ => None,
        }
    }
}
