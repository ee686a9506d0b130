use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::config::FireButton;

/// Marker for weapon entities. A weapon only becomes active once
/// `attach_weapons` has validated it and inserted a `WeaponRuntime`.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Weapon;

/// Entities a weapon drives.
#[derive(Component, Debug, Clone, Copy)]
pub struct WeaponRig {
    pub shooter: Entity,
    /// Gun pivot; its local rotation is the mount angle.
    pub rotate_point: Entity,
    /// Gun sprite carrying a `GunKnockback`.
    pub actuator: Option<Entity>,
    /// `None` means "the only `CasingContainer` in the world".
    pub casing_container: Option<Entity>,
}

/// Mount geometry.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct WeaponMounts {
    /// Gun pivot, shooter-local (right-facing).
    pub pivot: Vec2,
    /// Muzzle, mount-local.
    pub fire_point: Vec2,
    /// Ejection port, mount-local.
    pub shell_point: Vec2,
    /// Ejection direction relative to the mount, degrees.
    pub shell_angle: f32,
}

impl Default for WeaponMounts {
    fn default() -> Self {
        Self {
            pivot: Vec2::new(4.0, 2.0),
            fire_point: Vec2::new(22.0, 2.0),
            shell_point: Vec2::new(8.0, 3.0),
            shell_angle: 100.0,
        }
    }
}

/// Which physical inputs drive this weapon.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct TriggerBinding {
    pub fire: MouseButton,
    /// Re-asserts the trigger every tick while held.
    pub hold: Option<KeyCode>,
}

impl TriggerBinding {
    pub fn new(button: FireButton, hold_to_fire: bool) -> Self {
        Self {
            fire: button.mouse_button(),
            hold: hold_to_fire.then_some(KeyCode::KeyE),
        }
    }
}

/// Stylised gun push: the sprite slides back along local -X and recovers linearly.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct GunKnockback {
    rest: Vec3,
    magnitude: f32,
    duration: f32,
    remaining: f32,
}

impl GunKnockback {
    pub fn at_rest(rest: Vec3) -> Self {
        Self {
            rest,
            magnitude: 0.0,
            duration: 0.0,
            remaining: 0.0,
        }
    }

    pub fn trigger(&mut self, magnitude: f32, duration: f32) {
        self.magnitude = magnitude;
        self.duration = duration.max(0.0);
        self.remaining = self.duration;
    }

    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    /// Current push along local -X.
    pub fn offset(&self) -> f32 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        self.magnitude * (self.remaining / self.duration)
    }

    pub fn translation(&self) -> Vec3 {
        self.rest - Vec3::X * self.offset()
    }
}

/// Seeded randomness for scatter and casing ejection.
#[derive(Resource)]
pub struct WeaponRng(pub ChaCha8Rng);

impl WeaponRng {
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}
