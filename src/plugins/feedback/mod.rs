//! Feedback plugin: turns weapon notifications into things the player feels.
//!
//! ```text
//! ShakeRequest  ─> CameraShake (trauma + directional kick) ─> camera (render)
//! VfxRequest    ─> MuzzleFlash entities (delay, short life) ─> lighting (render)
//! ShotFired     ─> ShotStats
//! SoundCue      ─> AudioPlayer (full app only)
//! ```
//!
//! `CameraShake` is the single source of truth for camera offsets. It only
//! computes the offset; the camera plugin is the only writer to the camera
//! transform.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::plugins::weapon::{ShakeRequest, ShotFired, SoundCue, VfxKind, VfxRequest, WeaponSystems};

/// Pixels of camera offset at full trauma.
const SHAKE_MAX_OFFSET: f32 = 24.0;
/// Pixels of kick per unit of directional amplitude.
const KICK_SCALE: f32 = 18.0;
/// Trauma lost per second.
const TRAUMA_DECAY: f32 = 1.6;
/// Exponential decay rate of the directional kick (1/s).
const KICK_DECAY: f32 = 14.0;
const MUZZLE_FLASH_LIFE: f32 = 0.05;

#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct CameraShake {
    trauma: f32,
    phase: f32,
    kick: Vec2,
    /// Offset the camera carried last frame, removed before applying the next.
    pub prev_offset: Vec2,
}

impl CameraShake {
    /// Omnidirectional requests add trauma; directional ones push the camera
    /// against `direction`.
    pub fn add(&mut self, request: &ShakeRequest) {
        match request.direction {
            None => self.trauma = (self.trauma + request.amplitude).clamp(0.0, 1.0),
            Some(dir) => self.kick -= dir.normalize_or_zero() * request.amplitude * KICK_SCALE,
        }
    }

    pub fn trauma(&self) -> f32 {
        self.trauma
    }

    pub fn kick(&self) -> Vec2 {
        self.kick
    }

    pub fn decay(&mut self, dt: f32) {
        self.phase += dt;
        self.trauma = (self.trauma - TRAUMA_DECAY * dt).max(0.0);
        self.kick *= (-KICK_DECAY * dt).exp();
        if self.kick.length_squared() < 1e-4 {
            self.kick = Vec2::ZERO;
        }
    }

    pub fn is_idle(&self) -> bool {
        self.trauma == 0.0 && self.kick == Vec2::ZERO
    }

    /// Camera offset for this frame: squared-trauma noise plus the kick.
    pub fn offset(&self) -> Vec2 {
        let strength = self.trauma * self.trauma;
        let tau = std::f32::consts::TAU;
        let x = (self.phase * 37.0 * tau).sin() + 0.5 * (self.phase * 61.0 * tau).sin();
        let y = (self.phase * 41.0 * tau).cos() + 0.5 * (self.phase * 53.0 * tau).cos();
        Vec2::new(x, y).clamp_length_max(1.0) * SHAKE_MAX_OFFSET * strength + self.kick
    }
}

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct ShotStats {
    pub shots_fired: u64,
    pub last_origin: Option<Vec2>,
}

/// Short-lived flash at a muzzle. Hidden until `delay` runs out.
#[derive(Component, Debug, Clone)]
pub struct MuzzleFlash {
    pub delay: Timer,
    pub life: Timer,
}

pub fn plugin(app: &mut App) {
    app.init_resource::<CameraShake>()
        .init_resource::<ShotStats>()
        .add_systems(
            Update,
            (
                collect_shake_requests,
                decay_camera_shake,
                count_shots,
                spawn_vfx,
                tick_muzzle_flashes,
            )
                .chain()
                .after(WeaponSystems)
                .run_if(in_state(GameState::InGame)),
        );
}

/// Render-only half: audio needs the asset server and the audio backend.
pub fn render_plugin(app: &mut App) {
    app.add_systems(
        Update,
        play_sound_cues
            .after(WeaponSystems)
            .run_if(in_state(GameState::InGame)),
    );
}

pub fn collect_shake_requests(mut reader: MessageReader<ShakeRequest>, mut shake: ResMut<CameraShake>) {
    for req in reader.read() {
        shake.add(req);
    }
}

pub fn decay_camera_shake(time: Res<Time>, mut shake: ResMut<CameraShake>) {
    if shake.is_idle() {
        return;
    }
    shake.decay(time.delta_secs());
}

pub fn count_shots(mut reader: MessageReader<ShotFired>, mut stats: ResMut<ShotStats>) {
    for shot in reader.read() {
        stats.shots_fired += 1;
        stats.last_origin = Some(shot.origin);
    }
}

pub fn spawn_vfx(mut commands: Commands, mut reader: MessageReader<VfxRequest>) {
    for req in reader.read() {
        match req.kind {
            VfxKind::MuzzleFlash => {
                let visibility = if req.delay > 0.0 {
                    Visibility::Hidden
                } else {
                    Visibility::Inherited
                };
                commands.spawn((
                    Name::new("MuzzleFlash"),
                    MuzzleFlash {
                        delay: Timer::from_seconds(req.delay.max(0.0), TimerMode::Once),
                        life: Timer::from_seconds(MUZZLE_FLASH_LIFE, TimerMode::Once),
                    },
                    Sprite {
                        color: Color::srgb(1.0, 0.95, 0.6),
                        custom_size: Some(Vec2::new(10.0, 6.0)),
                        ..default()
                    },
                    Transform::from_translation(req.at.extend(3.0))
                        .with_rotation(Quat::from_rotation_z(req.rotation.to_radians())),
                    visibility,
                    DespawnOnExit(GameState::InGame),
                ));
            }
        }
    }
}

pub fn tick_muzzle_flashes(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut MuzzleFlash, &mut Visibility)>,
) {
    for (e, mut flash, mut vis) in &mut q {
        if !flash.delay.is_finished() {
            flash.delay.tick(time.delta());
            if flash.delay.is_finished() {
                *vis = Visibility::Inherited;
            }
            continue;
        }
        flash.life.tick(time.delta());
        if flash.life.is_finished() {
            commands.entity(e).try_despawn();
        }
    }
}

fn play_sound_cues(mut commands: Commands, assets: Res<AssetServer>, mut reader: MessageReader<SoundCue>) {
    for cue in reader.read() {
        commands.spawn((
            AudioPlayer::new(assets.load(cue.path.clone())),
            PlaybackSettings::DESPAWN,
        ));
    }
}
