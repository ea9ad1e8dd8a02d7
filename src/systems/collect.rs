use crate::components::{Egg, EggSound, Grabbable};
use crate::events::{EggCollected, EggGrabbed, RunEnded};
use crate::resources::{DeferredAction, DeferredActions, GameSettings, RunState};
use bevy::prelude::*;

pub fn collect_eggs_system(
    mut commands: Commands,
    settings: Res<GameSettings>,
    mut run: ResMut<RunState>,
    mut deferred: ResMut<DeferredActions>,
    mut grabbed_events: EventReader<EggGrabbed>,
    egg_query: Query<Option<&EggSound>, (With<Egg>, With<Grabbable>)>,
    mut collected_events: EventWriter<EggCollected>,
    mut ended_events: EventWriter<RunEnded>,
) {
    // Grabbable is removed through commands, so repeated grabs of the same egg
    // within one frame have to be filtered here
    let mut handled: Vec<Entity> = Vec::new();

    for event in grabbed_events.read() {
        if !run.is_active() {
            debug!("Ignoring grab of {:?}, the run is over", event.egg);
            continue;
        }

        let Ok(sound) = egg_query.get(event.egg) else {
            debug!("Ignoring grab of {:?}, not a collectible egg", event.egg);
            continue;
        };
        if handled.contains(&event.egg) {
            continue;
        }

        let Some(collection) = run.collect() else {
            continue;
        };
        handled.push(event.egg);

        commands.entity(event.egg).remove::<Grabbable>();

        if let Some(sound) = sound {
            commands.spawn((AudioPlayer::new(sound.0.clone()), PlaybackSettings::DESPAWN));
        }

        deferred.schedule(
            settings.counter_display_secs,
            DeferredAction::Despawn(event.egg),
        );

        info!(
            "Egg collected: {}/{}",
            collection.collected,
            run.total()
        );
        collected_events.send(EggCollected {
            collected: collection.collected,
        });

        if let Some(outcome) = collection.outcome {
            info!("All eggs collected with {:.1}s to spare", run.time_remaining());
            ended_events.send(RunEnded { outcome });
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::components::{EggSound, Grabbable};
    use crate::events::{RunEnded, RunOutcome};
    use crate::systems::test_support::*;
    use bevy::prelude::*;

    #[test]
    fn three_eggs_collected_in_time_is_a_win() {
        let mut app = headless_app(50.0);
        let scene = spawn_scene(&mut app, 3);
        app.update();

        for (egg, at) in scene.eggs.iter().zip([5, 10, 15]) {
            run_until(&mut app, at - 1);
            grab(&mut app, *egg);
            step(&mut app, 1.0);
        }

        let run = run_state(&app);
        assert_eq!(run.collected(), 3);
        assert_eq!(run.outcome(), Some(RunOutcome::Won));
        assert_eq!(run.time_remaining(), 35.0);
        assert_eq!(
            app.world().get::<Text>(scene.result_text).map(|t| t.0.as_str()),
            Some("You Win!")
        );
        assert_eq!(visibility(&app, scene.result_panel), Visibility::Visible);

        run_until(&mut app, 19);
        assert_eq!(visibility(&app, scene.result_panel), Visibility::Visible);
        step(&mut app, 1.0);
        assert_eq!(visibility(&app, scene.result_panel), Visibility::Hidden);

        // Timer stopped at the win; running past the deadline changes nothing
        run_until(&mut app, 60);
        assert_eq!(run_state(&app).time_remaining(), 35.0);
        assert_eq!(run_state(&app).outcome(), Some(RunOutcome::Won));
    }

    #[test]
    fn collected_egg_is_removed_after_the_display_delay() {
        let mut app = headless_app(50.0);
        let scene = spawn_scene(&mut app, 2);
        app.update();

        grab(&mut app, scene.eggs[0]);
        step(&mut app, 1.0);
        assert!(app.world().get::<Grabbable>(scene.eggs[0]).is_none());
        assert!(app.world().entities().contains(scene.eggs[0]));

        step(&mut app, 1.0);
        assert!(app.world().entities().contains(scene.eggs[0]));
        step(&mut app, 1.0);
        assert!(!app.world().entities().contains(scene.eggs[0]));
        assert!(app.world().entities().contains(scene.eggs[1]));
    }

    #[test]
    fn regrabbing_a_collected_egg_does_not_count_twice() {
        let mut app = headless_app(50.0);
        let scene = spawn_scene(&mut app, 3);
        app.update();

        grab(&mut app, scene.eggs[0]);
        grab(&mut app, scene.eggs[0]);
        step(&mut app, 1.0);
        grab(&mut app, scene.eggs[0]);
        step(&mut app, 1.0);

        assert_eq!(run_state(&app).collected(), 1);
    }

    #[test]
    fn late_grab_after_the_run_ended_is_ignored() {
        let mut app = headless_app(50.0);
        let scene = spawn_scene(&mut app, 2);
        app.update();

        grab(&mut app, scene.eggs[0]);
        step(&mut app, 1.0);
        run_until(&mut app, 50);
        assert_eq!(run_state(&app).outcome(), Some(RunOutcome::Lost));

        grab(&mut app, scene.eggs[1]);
        step(&mut app, 1.0);

        let run = run_state(&app);
        assert_eq!(run.collected(), 1);
        assert_eq!(run.outcome(), Some(RunOutcome::Lost));
        assert!(app.world().get::<Grabbable>(scene.eggs[1]).is_some());
        assert_eq!(
            app.world().get::<Text>(scene.result_text).map(|t| t.0.as_str()),
            Some("Your time is out! You lose!")
        );

        // Still around long after a removal would have fired
        run_until(&mut app, 60);
        assert!(app.world().entities().contains(scene.eggs[1]));
        let ended = app.world().resource::<Events<RunEnded>>();
        assert!(ended.is_empty());
    }

    #[test]
    fn egg_sound_plays_on_pickup() {
        let mut app = headless_app(50.0);
        let scene = spawn_scene(&mut app, 2);
        app.world_mut()
            .entity_mut(scene.eggs[0])
            .insert(EggSound(Handle::default()));
        app.update();

        grab(&mut app, scene.eggs[1]);
        step(&mut app, 1.0);
        let players = app
            .world_mut()
            .query::<&AudioPlayer>()
            .iter(app.world())
            .count();
        assert_eq!(players, 0);

        grab(&mut app, scene.eggs[0]);
        step(&mut app, 1.0);
        let players = app
            .world_mut()
            .query::<&AudioPlayer>()
            .iter(app.world())
            .count();
        assert_eq!(players, 1);
    }
}
