use crate::components::{Viewpoint, WorldAnchor};
use crate::events::{EggCollected, RunEnded};
use crate::resources::{DeferredAction, DeferredActions, GameSettings, HudHandles};
use bevy::prelude::*;

// The point `distance` meters straight ahead of the viewer
pub fn point_in_front_of(viewer: &GlobalTransform, distance: f32) -> Vec3 {
    viewer.translation() + viewer.forward() * distance
}

// Centers a fixed-size absolute node on a viewport position. Nodes without a
// pixel size are left alone.
pub fn center_node_on(node: &mut Node, screen: Vec2) {
    let (Val::Px(width), Val::Px(height)) = (node.width, node.height) else {
        return;
    };
    node.left = Val::Px(screen.x - width / 2.0);
    node.top = Val::Px(screen.y - height / 2.0);
}

pub fn show_counter_system(
    mut commands: Commands,
    settings: Res<GameSettings>,
    hud: Res<HudHandles>,
    mut deferred: ResMut<DeferredActions>,
    mut collected_events: EventReader<EggCollected>,
    viewpoint_query: Query<&GlobalTransform, With<Viewpoint>>,
    mut text_query: Query<&mut Text>,
    mut visibility_query: Query<&mut Visibility>,
) {
    for event in collected_events.read() {
        let (Some(panel), Some(label)) = (hud.counter_panel, hud.counter_text) else {
            continue;
        };
        let Ok(mut text) = text_query.get_mut(label) else {
            continue;
        };
        let Ok(mut visibility) = visibility_query.get_mut(panel) else {
            continue;
        };

        text.0 = format!("Egg Collected: {}", event.collected);

        // No viewpoint: the panel keeps its previous spot
        match viewpoint_query.get_single() {
            Ok(viewer) => {
                let anchor = point_in_front_of(viewer, settings.panel_distance);
                commands.entity(panel).insert(WorldAnchor(anchor));
            }
            Err(_) => debug!("No viewpoint to place the counter panel in front of"),
        }

        *visibility = Visibility::Visible;
        deferred.schedule(settings.counter_display_secs, DeferredAction::Hide(panel));
    }
}

// Keeps anchored panels over their world point as the viewpoint moves
pub fn follow_world_anchors_system(
    camera_query: Query<(&Camera, &GlobalTransform), With<Viewpoint>>,
    mut panel_query: Query<(&WorldAnchor, &mut Node)>,
) {
    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };

    for (anchor, mut node) in panel_query.iter_mut() {
        // Behind the camera or outside the view: leave the panel where it was
        if let Ok(screen) = camera.world_to_viewport(camera_transform, anchor.0) {
            center_node_on(&mut node, screen);
        }
    }
}

pub fn show_result_system(
    settings: Res<GameSettings>,
    hud: Res<HudHandles>,
    mut deferred: ResMut<DeferredActions>,
    mut ended_events: EventReader<RunEnded>,
    mut text_query: Query<&mut Text>,
    mut visibility_query: Query<&mut Visibility>,
) {
    for event in ended_events.read() {
        info!("{}", event.outcome.message());

        let (Some(panel), Some(label)) = (hud.result_panel, hud.result_text) else {
            continue;
        };
        let Ok(mut text) = text_query.get_mut(label) else {
            continue;
        };
        let Ok(mut visibility) = visibility_query.get_mut(panel) else {
            continue;
        };

        text.0 = event.outcome.message().to_string();
        *visibility = Visibility::Visible;
        deferred.schedule(settings.result_display_secs, DeferredAction::Hide(panel));
    }
}

#[cfg(test)]
mod tests {
    use super::{center_node_on, point_in_front_of};
    use crate::components::{Viewpoint, WorldAnchor};
    use crate::resources::HudHandles;
    use crate::systems::test_support::*;
    use bevy::prelude::*;

    fn label(app: &App, entity: Entity) -> String {
        app.world()
            .get::<Text>(entity)
            .map(|text| text.0.clone())
            .unwrap_or_default()
    }

    #[test]
    fn anchor_sits_straight_ahead_of_the_viewer() {
        let viewer = GlobalTransform::from(
            Transform::from_xyz(1.0, 1.6, 0.0).looking_to(Vec3::X, Vec3::Y),
        );
        let point = point_in_front_of(&viewer, 1.2);

        assert!(point.abs_diff_eq(Vec3::new(2.2, 1.6, 0.0), 1e-5));
    }

    #[test]
    fn node_is_centered_on_the_projected_point() {
        let mut node = Node {
            width: Val::Px(320.0),
            height: Val::Px(64.0),
            ..default()
        };
        center_node_on(&mut node, Vec2::new(640.0, 360.0));

        assert_eq!(node.left, Val::Px(480.0));
        assert_eq!(node.top, Val::Px(328.0));

        let mut stretchy = Node::default();
        center_node_on(&mut stretchy, Vec2::new(640.0, 360.0));
        assert_eq!(stretchy.left, Val::Auto);
    }

    #[test]
    fn counter_updates_on_each_pickup_and_hides_after_two_seconds() {
        let mut app = headless_app(50.0);
        let scene = spawn_scene(&mut app, 3);
        let head = Transform::from_xyz(0.0, 1.6, 0.0).looking_to(Vec3::NEG_Z, Vec3::Y);
        app.world_mut()
            .spawn((Viewpoint, head, GlobalTransform::from(head)));
        app.update();

        grab(&mut app, scene.eggs[0]);
        step(&mut app, 1.0);
        assert_eq!(label(&app, scene.counter_text), "Egg Collected: 1");
        assert_eq!(visibility(&app, scene.counter_panel), Visibility::Visible);
        let anchor = app.world().get::<WorldAnchor>(scene.counter_panel).copied();
        assert!(anchor
            .map(|WorldAnchor(point)| point.abs_diff_eq(Vec3::new(0.0, 1.6, -1.2), 1e-5))
            .unwrap_or(false));

        step(&mut app, 1.0);
        assert_eq!(visibility(&app, scene.counter_panel), Visibility::Visible);
        step(&mut app, 1.0);
        assert_eq!(visibility(&app, scene.counter_panel), Visibility::Hidden);

        grab(&mut app, scene.eggs[1]);
        step(&mut app, 1.0);
        assert_eq!(label(&app, scene.counter_text), "Egg Collected: 2");
        assert_eq!(visibility(&app, scene.counter_panel), Visibility::Visible);
    }

    #[test]
    fn counter_is_screen_space_ui_text() {
        let mut app = headless_app(50.0);
        let scene = spawn_scene(&mut app, 2);
        app.update();

        grab(&mut app, scene.eggs[0]);
        step(&mut app, 1.0);

        // Drawn by the UI pass, which every camera gets, not the 2D sprite pass
        assert!(app.world().get::<Text2d>(scene.counter_text).is_none());
        assert!(app.world().get::<Node>(scene.counter_panel).is_some());
        assert_eq!(label(&app, scene.counter_text), "Egg Collected: 1");
    }

    #[test]
    fn earlier_hide_still_fires_when_pickups_overlap() {
        let mut app = headless_app(50.0);
        let scene = spawn_scene(&mut app, 3);
        app.update();

        grab(&mut app, scene.eggs[0]);
        step(&mut app, 1.0);
        grab(&mut app, scene.eggs[1]);
        step(&mut app, 1.0);
        assert_eq!(label(&app, scene.counter_text), "Egg Collected: 2");

        // The first pickup's hide comes due one frame later
        step(&mut app, 1.0);
        assert_eq!(visibility(&app, scene.counter_panel), Visibility::Hidden);
    }

    #[test]
    fn missing_hud_only_skips_the_display() {
        let mut app = headless_app(50.0);
        let scene = spawn_scene(&mut app, 1);
        app.insert_resource(HudHandles::default());
        app.update();

        grab(&mut app, scene.eggs[0]);
        step(&mut app, 1.0);

        assert_eq!(run_state(&app).collected(), 1);
        assert!(run_state(&app).outcome().is_some());
        assert_eq!(label(&app, scene.counter_text), "");
        assert_eq!(label(&app, scene.result_text), "");
    }
}
