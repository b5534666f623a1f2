//! Level domain: the demo level layout.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::audio::MusicTrack;
use crate::content::SequenceTimings;
use crate::core::Spin;
use crate::movement::{ClimbableWall, GameLayer, Ground};
use crate::upgrades::{EndPortal, Pickup, UpgradeKind};

/// Full-screen background image that fades with the scene.
#[derive(Component, Debug)]
pub struct Backdrop;

/// The level's looping music track.
#[derive(Component, Debug)]
pub struct LevelMusic;

const GROUND_COLOR: Color = Color::srgb(0.35, 0.22, 0.3);
const PLATFORM_COLOR: Color = Color::srgb(0.5, 0.3, 0.38);
const WALL_COLOR: Color = Color::srgb(0.42, 0.5, 0.34);

fn pickup_color(kind: UpgradeKind) -> Color {
    match kind {
        UpgradeKind::Nucleus => Color::srgb(0.4, 0.5, 1.0),
        UpgradeKind::Mitochondria => Color::srgb(1.0, 0.5, 0.3),
        UpgradeKind::Gogli => Color::srgb(0.9, 0.4, 0.9),
    }
}

fn spawn_block(commands: &mut Commands, center: Vec2, size: Vec2, climbable: bool) {
    let mut block = commands.spawn((
        Sprite {
            color: if climbable { WALL_COLOR } else { PLATFORM_COLOR },
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(center.extend(0.0)),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
    ));

    if climbable {
        block.insert((
            ClimbableWall,
            CollisionLayers::new(GameLayer::Climbable, [GameLayer::Player]),
        ));
    } else {
        block.insert((
            Ground,
            CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]),
        ));
    }
}

fn spawn_pickup(commands: &mut Commands, kind: UpgradeKind, position: Vec2) {
    commands.spawn((
        Pickup { kind },
        Spin::default(),
        Sprite {
            color: pickup_color(kind),
            custom_size: Some(Vec2::splat(0.6)),
            ..default()
        },
        Transform::from_translation(position.extend(0.5)),
        Collider::circle(0.3),
        Sensor,
        CollisionEventsEnabled,
        CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
    ));
}

pub(crate) fn spawn_demo_level(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    timings: Res<SequenceTimings>,
) {
    // Backdrop, fades in from transparent
    commands.spawn((
        Backdrop,
        Sprite {
            color: Color::srgba(0.16, 0.08, 0.14, 0.0),
            custom_size: Some(Vec2::new(40.0, 24.0)),
            ..default()
        },
        Transform::from_xyz(0.0, 2.0, -10.0),
    ));

    // Ground
    commands.spawn((
        Ground,
        Sprite {
            color: GROUND_COLOR,
            custom_size: Some(Vec2::new(30.0, 1.0)),
            ..default()
        },
        Transform::from_xyz(0.0, -3.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(30.0, 1.0),
        CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]),
    ));

    // Boundary walls
    spawn_block(&mut commands, Vec2::new(-15.5, 2.0), Vec2::new(1.0, 11.0), true);
    spawn_block(&mut commands, Vec2::new(15.5, 2.0), Vec2::new(1.0, 11.0), true);

    // Low ledge, reachable with a single jump
    spawn_block(&mut commands, Vec2::new(-3.0, -1.7), Vec2::new(3.0, 0.4), false);

    // Pillar to climb, and the ledge holding the portal
    spawn_block(&mut commands, Vec2::new(7.0, 0.5), Vec2::new(1.0, 7.0), true);
    spawn_block(&mut commands, Vec2::new(10.0, 3.8), Vec2::new(5.0, 0.4), false);

    spawn_pickup(&mut commands, UpgradeKind::Nucleus, Vec2::new(-7.0, -2.0));
    spawn_pickup(&mut commands, UpgradeKind::Mitochondria, Vec2::new(-3.0, -1.0));
    spawn_pickup(&mut commands, UpgradeKind::Gogli, Vec2::new(3.0, -2.0));

    // End portal
    commands.spawn((
        EndPortal,
        Spin::default(),
        Sprite {
            color: Color::srgb(0.3, 0.95, 0.85),
            custom_size: Some(Vec2::splat(1.2)),
            ..default()
        },
        Transform::from_xyz(11.0, 4.8, 0.5),
        Collider::circle(0.6),
        Sensor,
        CollisionEventsEnabled,
        CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
    ));

    // Music starts paused; the fade-in task starts it
    commands.spawn((
        LevelMusic,
        MusicTrack::new(timings.music_volume),
        AudioPlayer::new(asset_server.load("audio/game_music.ogg")),
        PlaybackSettings {
            paused: true,
            ..PlaybackSettings::LOOP
        },
    ));

    info!("Demo level spawned");
}
