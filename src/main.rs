use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use rand::Rng;
mod components;
mod events;
mod resources;
mod systems;

use components::*;
use resources::*;

const EGG_COUNT: usize = 6;
const EGG_RADIUS: f32 = 0.12;
const COUNTER_PANEL_SIZE: Vec2 = Vec2::new(320.0, 64.0);

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Egg Hunt".into(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        .insert_resource(GameSettings::from_env())
        .add_plugins((systems::plugin, systems::interaction::plugin))
        .add_systems(Startup, setup_scene)
        .run();
}

fn setup_scene(
    mut commands: Commands,
    settings: Res<GameSettings>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Player head, with the reach sensor held out in front of it
    let viewpoint = commands
        .spawn((
            Camera3d::default(),
            Transform::from_xyz(0.0, 1.6, 4.0).looking_at(Vec3::new(0.0, 0.8, 0.0), Vec3::Y),
            Viewpoint,
            FlyControls::default(),
        ))
        .id();
    commands
        .spawn((
            Hand,
            Transform::from_xyz(0.0, -0.9, -0.5),
            RigidBody::KinematicPositionBased,
            Collider::ball(settings.grab_reach),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_STATIC,
        ))
        .set_parent(viewpoint);

    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(20.0, 20.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.35, 0.6, 0.3), // Grass
            ..default()
        })),
    ));

    // Eggs scattered around the player's start
    let egg_sound = settings
        .egg_sound
        .as_deref()
        .map(|path| EggSound(asset_server.load(path.to_string())));
    if egg_sound.is_none() {
        info!("{} not set, eggs will be silent", SOUND_ENV_VAR);
    }

    let egg_mesh = meshes.add(Sphere::new(EGG_RADIUS));
    let egg_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.95, 0.85, 0.6),
        ..default()
    });
    let mut rng = rand::rng();

    for _ in 0..EGG_COUNT {
        let x = rng.random_range(-6.0..6.0);
        let z = rng.random_range(-6.0..3.0);

        let mut egg = commands.spawn((
            Egg,
            Grabbable,
            Mesh3d(egg_mesh.clone()),
            MeshMaterial3d(egg_material.clone()),
            Transform::from_xyz(x, EGG_RADIUS * 1.3, z).with_scale(Vec3::new(1.0, 1.3, 1.0)),
            Collider::ball(EGG_RADIUS),
        ));
        if let Some(sound) = &egg_sound {
            egg.insert(sound.clone());
        }
    }

    // Counter panel is UI pinned to a point in the world; it is re-anchored in
    // front of the player on pickup
    let counter_panel = commands
        .spawn((
            CounterPanel,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Px(COUNTER_PANEL_SIZE.x),
                height: Val::Px(COUNTER_PANEL_SIZE.y),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
            Visibility::Hidden,
        ))
        .id();
    let counter_text = commands
        .spawn((
            CounterText,
            Text::new(""),
            TextFont {
                font_size: 32.0,
                ..default()
            },
            TextColor(Color::WHITE),
        ))
        .set_parent(counter_panel)
        .id();

    // Result banner is screen space
    let result_panel = commands
        .spawn((
            ResultPanel,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                top: Val::Percent(40.0),
                padding: UiRect::all(Val::Px(24.0)),
                justify_content: JustifyContent::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
            Visibility::Hidden,
        ))
        .id();
    let result_text = commands
        .spawn((
            ResultText,
            Text::new(""),
            TextFont {
                font_size: 48.0,
                ..default()
            },
            TextColor(Color::WHITE),
        ))
        .set_parent(result_panel)
        .id();

    commands.insert_resource(HudHandles {
        counter_panel: Some(counter_panel),
        counter_text: Some(counter_text),
        result_panel: Some(result_panel),
        result_text: Some(result_text),
    });

    info!("Scene ready with {} eggs", EGG_COUNT);
}
