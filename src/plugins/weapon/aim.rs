//! Aim resolution and mount geometry.
//!
//! All angles are degrees, counter-clockwise from +X.
//!
//! The gun pivot lives under the shooter's facing visual, whose `scale.x` is
//! -1 when facing left. A mount angle `m` therefore points along world angle
//! `m` when facing right and `180 - m` when facing left. [`resolve_aim`] picks
//! `m` so the world direction always matches the pointer, and [`MountFrame`]
//! maps mount-local offsets back into world space without waiting for
//! transform propagation.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimSolution {
    /// World-space angle from the pivot to the pointer.
    pub angle: f32,
    /// Local rotation to write on the gun pivot.
    pub mount_angle: f32,
    pub facing_right: bool,
}

impl Default for AimSolution {
    fn default() -> Self {
        Self {
            angle: 0.0,
            mount_angle: 0.0,
            facing_right: true,
        }
    }
}

pub fn resolve_aim(shooter: Vec2, pointer: Vec2) -> AimSolution {
    aim_along(pointer - shooter, pointer.x > shooter.x)
}

/// Aim for a gun pivot mounted at `pivot_offset` on the shooter.
///
/// Facing comes from the shooter origin, never from the pivot, whose position
/// itself depends on facing. The angle is then measured from the pivot placed
/// for that facing.
pub fn resolve_mount_aim(shooter: Vec2, pivot_offset: Vec2, pointer: Vec2) -> AimSolution {
    let facing_right = pointer.x > shooter.x;
    let pivot = MountFrame::pivot_for(shooter, pivot_offset, facing_right);
    aim_along(pointer - pivot, facing_right)
}

fn aim_along(direction: Vec2, facing_right: bool) -> AimSolution {
    let angle = direction.y.atan2(direction.x).to_degrees();
    let mount_angle = if facing_right { angle } else { 180.0 - angle };

    AimSolution {
        angle,
        mount_angle: wrap_degrees(mount_angle),
        facing_right,
    }
}

/// Wrap into (-180, 180].
#[inline]
pub fn wrap_degrees(deg: f32) -> f32 {
    let wrapped = (deg + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 { 180.0 } else { wrapped }
}

/// Step `from` toward `to` along the shorter arc by fraction `t` (clamped to [0, 1]).
#[inline]
pub fn lerp_degrees(from: f32, to: f32, t: f32) -> f32 {
    let delta = wrap_degrees(to - from);
    wrap_degrees(from + delta * t.clamp(0.0, 1.0))
}

/// Unit vector for a world angle.
#[inline]
pub fn forward(deg: f32) -> Vec2 {
    Vec2::from_angle(deg.to_radians())
}

/// World-space view of a mount for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MountFrame {
    pub pivot: Vec2,
    pub mount_angle: f32,
    pub facing_right: bool,
}

impl MountFrame {
    /// Pivot position given the shooter's origin and a shooter-local offset.
    pub fn pivot_for(shooter: Vec2, pivot_offset: Vec2, facing_right: bool) -> Vec2 {
        shooter + mirror(pivot_offset, facing_right)
    }

    /// Mount-local point → world.
    pub fn point(&self, local: Vec2) -> Vec2 {
        let rotated = forward(self.mount_angle).rotate(local);
        self.pivot + mirror(rotated, self.facing_right)
    }

    /// Mount-local angle → world.
    pub fn angle(&self, local: f32) -> f32 {
        let a = self.mount_angle + local;
        wrap_degrees(if self.facing_right { a } else { 180.0 - a })
    }
}

#[inline]
fn mirror(v: Vec2, facing_right: bool) -> Vec2 {
    if facing_right { v } else { Vec2::new(-v.x, v.y) }
}
