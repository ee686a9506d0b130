//! Player plugin: the shooter body and its gun rig.
//!
//! Pipeline:
//! - OnEnter(InGame): spawn body → visual → gun pivot → gun sprite, then the weapon entity
//! - Update: sample movement keys, write PlayerInput resource
//! - FixedUpdate: steer horizontal velocity toward the target speed
//! - PostUpdate: mirror the visual child to match `ShooterBody` facing
//!
//! The body is a dynamic rigid body so recoil impulses move it. Facing is
//! applied to the visual child only; the physics root never gets a negative scale.
//!
//! While a weapon holds the flip lock, movement no longer changes facing and
//! the weapon's aim decides it instead.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::weapon::{GunKnockback, TriggerBinding, Weapon, WeaponMounts, WeaponPreset, WeaponRig};

#[derive(Component)]
pub struct Player;

#[derive(Resource, Default, Debug)]
pub struct PlayerEntity(pub Option<Entity>);

/// Weapon entity carried by the player.
#[derive(Resource, Default, Debug)]
pub struct PlayerWeapon(pub Option<Entity>);

/// Facing and flip lock of anything that can hold a weapon.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ShooterBody {
    facing_right: bool,
    flip_locked: bool,
    /// Child whose `scale.x` mirrors the facing.
    pub visual: Option<Entity>,
}

impl Default for ShooterBody {
    fn default() -> Self {
        Self {
            facing_right: true,
            flip_locked: false,
            visual: None,
        }
    }
}

impl ShooterBody {
    pub fn with_visual(visual: Entity) -> Self {
        Self {
            visual: Some(visual),
            ..default()
        }
    }

    pub fn facing_right(&self) -> bool {
        self.facing_right
    }

    pub fn is_flip_locked(&self) -> bool {
        self.flip_locked
    }

    /// Unconditional flip; the weapon uses this while it holds the lock.
    pub fn flip(&mut self, right: bool) {
        self.facing_right = right;
    }

    /// Movement-driven facing. Ignored while locked.
    pub fn steer_facing(&mut self, right: bool) {
        if !self.flip_locked {
            self.facing_right = right;
        }
    }

    pub fn lock_flip(&mut self) {
        self.flip_locked = true;
    }

    pub fn unlock_flip(&mut self) {
        self.flip_locked = false;
    }
}

#[derive(Resource, Default, Debug)]
struct PlayerInput {
    move_axis: f32,
}

const BODY_SIZE: Vec2 = Vec2::new(18.0, 28.0);
/// Explicit so recoil impulses read the same whatever the collider shape.
pub const PLAYER_MASS: f32 = 20.0;

pub fn plugin(app: &mut App) {
    app.insert_resource(PlayerInput::default())
        .init_resource::<PlayerEntity>()
        .init_resource::<PlayerWeapon>()
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(Update, gather_input.run_if(in_state(GameState::InGame)))
        .add_systems(FixedUpdate, apply_movement.run_if(in_state(GameState::InGame)))
        .add_systems(
            PostUpdate,
            apply_facing
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn(mut commands: Commands, preset: Option<Res<WeaponPreset>>) {
    let config = preset.map(|p| p.0.clone()).unwrap_or_default();
    let mounts = WeaponMounts::default();

    let layers = CollisionLayers::new(Layer::Player, [Layer::World, Layer::Target]);

    let player = commands
        .spawn((
            Name::new("Player"),
            Player,
            Transform::from_xyz(0.0, 0.0, 1.0),
            RigidBody::Dynamic,
            Collider::capsule(BODY_SIZE.x * 0.5, BODY_SIZE.y - BODY_SIZE.x),
            Mass(PLAYER_MASS),
            NoAutoMass,
            LockedAxes::ROTATION_LOCKED,
            layers,
            LinearVelocity::ZERO,
            DespawnOnExit(GameState::InGame),
        ))
        .id();

    let visual = commands
        .spawn((
            Name::new("PlayerVisual"),
            Sprite {
                color: Color::srgb(0.2, 0.75, 0.9),
                custom_size: Some(BODY_SIZE),
                ..default()
            },
            Transform::default(),
            ChildOf(player),
        ))
        .id();
    commands.entity(player).insert(ShooterBody::with_visual(visual));

    let pivot = commands
        .spawn((
            Name::new("GunPivot"),
            Transform::from_translation(mounts.pivot.extend(0.5)),
            Visibility::default(),
            ChildOf(visual),
        ))
        .id();

    let gun_rest = Vec3::new(mounts.fire_point.x * 0.5, mounts.fire_point.y, 0.0);
    let gun = commands
        .spawn((
            Name::new("Gun"),
            Sprite {
                color: Color::srgb(0.35, 0.35, 0.4),
                custom_size: Some(Vec2::new(mounts.fire_point.x, 5.0)),
                ..default()
            },
            Transform::from_translation(gun_rest),
            GunKnockback::at_rest(gun_rest),
            ChildOf(pivot),
        ))
        .id();

    let binding = TriggerBinding::new(config.fire_button, config.hold_to_fire);
    let weapon = commands
        .spawn((
            Name::new("PlayerWeapon"),
            Weapon,
            config,
            WeaponRig {
                shooter: player,
                rotate_point: pivot,
                actuator: Some(gun),
                casing_container: None,
            },
            mounts,
            binding,
            DespawnOnExit(GameState::InGame),
        ))
        .id();

    commands.insert_resource(PlayerEntity(Some(player)));
    commands.insert_resource(PlayerWeapon(Some(weapon)));
}

fn gather_input(keys: Option<Res<ButtonInput<KeyCode>>>, mut input: ResMut<PlayerInput>) {
    let Some(keys) = keys else {
        return;
    };

    let mut axis = 0.0;
    if keys.pressed(KeyCode::KeyA) {
        axis -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        axis += 1.0;
    }
    input.move_axis = axis;
}

/// Steer horizontal velocity with a finite acceleration so recoil impulses
/// survive more than one step. Vertical velocity belongs to gravity.
fn apply_movement(
    time: Res<Time>,
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    mut q_player: Query<(&mut LinearVelocity, &mut ShooterBody), With<Player>>,
) {
    let Ok((mut vel, mut body)) = q_player.single_mut() else {
        return;
    };

    let target = input.move_axis * tunables.player_speed;
    let max_step = tunables.player_accel * time.delta_secs();
    vel.x += (target - vel.x).clamp(-max_step, max_step);

    if input.move_axis != 0.0 {
        body.steer_facing(input.move_axis > 0.0);
    }
}

fn apply_facing(
    q_bodies: Query<&ShooterBody, Changed<ShooterBody>>,
    mut q_visuals: Query<&mut Transform, Without<ShooterBody>>,
) {
    for body in &q_bodies {
        let Some(visual) = body.visual else {
            continue;
        };
        if let Ok(mut tf) = q_visuals.get_mut(visual) {
            let sign = if body.facing_right() { 1.0 } else { -1.0 };
            tf.scale.x = sign * tf.scale.x.abs();
        }
    }
}
