//! Camera plugin (render-only).
//!
//! ```text
//! OnEnter(InGame): spawn MainCamera -> write MainCameraEntity resource
//! PostUpdate:      follow_player, then apply_camera_shake
//! ```
//!
//! A system cannot hold `Query<&Transform>` and `Query<&mut Transform>` unless
//! Bevy can prove the queries disjoint, so the player and camera queries carry
//! `Without<...>` filters against each other.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::plugins::feedback::CameraShake;
use crate::plugins::player::{Player, PlayerEntity};

#[derive(Component)]
pub struct MainCamera {
    pub responsiveness: f32,
}

#[derive(Resource, Default, Debug)]
pub struct MainCameraEntity(pub Option<Entity>);

pub fn plugin(app: &mut App) {
    app.init_resource::<MainCameraEntity>()
        .add_systems(OnEnter(GameState::InGame), spawn_camera)
        .add_systems(
            PostUpdate,
            (follow_player, apply_camera_shake)
                .chain()
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn_camera(mut commands: Commands) {
    let e = commands
        .spawn((
            Name::new("MainCamera"),
            Camera2d,
            MainCamera { responsiveness: 5.0 },
            FireflyConfig::default(),
            Transform::from_xyz(0.0, 0.0, 999.0),
            DespawnOnExit(GameState::InGame),
        ))
        .id();

    commands.insert_resource(MainCameraEntity(Some(e)));
}

/// Follow the player on the un-shaken camera position.
fn follow_player(
    time: Res<Time>,
    player_e: Res<PlayerEntity>,
    cam_e: Res<MainCameraEntity>,
    mut shake: ResMut<CameraShake>,
    q_player: Query<&Transform, (With<Player>, Without<MainCamera>)>,
    mut q_cam: Query<(&mut Transform, &MainCamera), Without<Player>>,
) {
    let Some(cam) = cam_e.0 else {
        return;
    };
    let Ok((mut tf_cam, main_cam)) = q_cam.get_mut(cam) else {
        debug!("MainCameraEntity {cam} is not a MainCamera");
        return;
    };

    // Remove last frame's offset first so the shake never drifts the camera.
    let prev = shake.prev_offset;
    tf_cam.translation.x -= prev.x;
    tf_cam.translation.y -= prev.y;
    shake.prev_offset = Vec2::ZERO;

    let Some(tf_player) = player_e.0.and_then(|p| q_player.get(p).ok()) else {
        return;
    };

    let dt = time.delta_secs();
    let alpha = 1.0 - (-main_cam.responsiveness * dt).exp();

    tf_cam.translation.x += (tf_player.translation.x - tf_cam.translation.x) * alpha;
    tf_cam.translation.y += (tf_player.translation.y - tf_cam.translation.y) * alpha;
}

fn apply_camera_shake(
    cam_e: Res<MainCameraEntity>,
    mut shake: ResMut<CameraShake>,
    mut q_cam: Query<&mut Transform, With<MainCamera>>,
) {
    let Some(cam) = cam_e.0 else {
        return;
    };
    let Ok(mut tf_cam) = q_cam.get_mut(cam) else {
        return;
    };

    let offset = shake.offset();
    tf_cam.translation.x += offset.x;
    tf_cam.translation.y += offset.y;
    shake.prev_offset = offset;
}
