// Desktop stand-in for the XR grab interactor: a reach sensor on the player's
// head plus a grab button.
use crate::components::{Egg, FlyControls, Grabbable, Hand};
use crate::events::EggGrabbed;
use crate::resources::EggsInReach;
use crate::systems::EggHuntSet;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

pub fn plugin(app: &mut App) {
    app.init_resource::<EggsInReach>().add_systems(
        Update,
        (fly_controls_system, track_reach_system, grab_input_system)
            .chain()
            .before(EggHuntSet),
    );
}

// Keeps `EggsInReach` in sync with the hand sensor's contacts
pub fn track_reach_system(
    mut collision_events: EventReader<CollisionEvent>,
    hand_query: Query<(), With<Hand>>,
    egg_query: Query<(), With<Egg>>,
    mut reach: ResMut<EggsInReach>,
) {
    for event in collision_events.read() {
        let (a, b, started) = match *event {
            CollisionEvent::Started(a, b, _) => (a, b, true),
            CollisionEvent::Stopped(a, b, _) => (a, b, false),
        };

        // Either side of the pair may be the hand
        let egg = if hand_query.contains(a) && egg_query.contains(b) {
            b
        } else if hand_query.contains(b) && egg_query.contains(a) {
            a
        } else {
            continue;
        };

        if started {
            reach.0.insert(egg);
        } else {
            reach.0.remove(&egg);
        }
    }
}

// One grab per press: the closest egg in reach that can still be collected
pub fn grab_input_system(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mouse_input: Res<ButtonInput<MouseButton>>,
    mut reach: ResMut<EggsInReach>,
    hand_query: Query<&GlobalTransform, With<Hand>>,
    egg_query: Query<&GlobalTransform, (With<Egg>, With<Grabbable>)>,
    mut grabbed_events: EventWriter<EggGrabbed>,
) {
    // Collected or despawned eggs drop out of reach
    reach.0.retain(|egg| egg_query.contains(*egg));

    if !keyboard_input.just_pressed(KeyCode::KeyE) && !mouse_input.just_pressed(MouseButton::Left)
    {
        return;
    }

    let Ok(hand) = hand_query.get_single() else {
        return;
    };
    let hand_pos = hand.translation();

    let closest = reach
        .0
        .iter()
        .filter_map(|egg| {
            egg_query
                .get(*egg)
                .ok()
                .map(|transform| (*egg, transform.translation().distance_squared(hand_pos)))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(egg, _)| egg);

    match closest {
        Some(egg) => {
            grabbed_events.send(EggGrabbed { egg });
        }
        None => debug!("Grab pressed with nothing in reach"),
    }
}

pub fn fly_controls_system(
    time: Res<Time>,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut query: Query<(&mut Transform, &FlyControls)>,
) {
    let dt = time.delta_secs();

    for (mut transform, controls) in query.iter_mut() {
        let mut turn = 0.0;
        if keyboard_input.pressed(KeyCode::ArrowLeft) {
            turn += 1.0;
        }
        if keyboard_input.pressed(KeyCode::ArrowRight) {
            turn -= 1.0;
        }
        transform.rotate_y(turn * controls.turn_speed * dt);

        // Walk on the ground plane, whatever the head pitch
        let forward = transform.forward().with_y(0.0).normalize_or_zero();
        let right = transform.right().with_y(0.0).normalize_or_zero();

        let mut direction = Vec3::ZERO;
        if keyboard_input.pressed(KeyCode::KeyW) || keyboard_input.pressed(KeyCode::ArrowUp) {
            direction += forward;
        }
        if keyboard_input.pressed(KeyCode::KeyS) || keyboard_input.pressed(KeyCode::ArrowDown) {
            direction -= forward;
        }
        if keyboard_input.pressed(KeyCode::KeyD) {
            direction += right;
        }
        if keyboard_input.pressed(KeyCode::KeyA) {
            direction -= right;
        }

        transform.translation += direction.normalize_or_zero() * controls.speed * dt;
    }
}
