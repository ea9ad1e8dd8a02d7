use crate::components::Egg;
use crate::events::RunEnded;
use crate::resources::{GameSettings, HudHandles, RunState};
use bevy::prelude::*;

// Runs once, after the scene has been spawned
pub fn start_run(
    settings: Res<GameSettings>,
    hud: Res<HudHandles>,
    mut run: ResMut<RunState>,
    egg_query: Query<(), With<Egg>>,
    mut visibility_query: Query<&mut Visibility>,
) {
    // Both panels start hidden
    for panel in [hud.counter_panel, hud.result_panel].into_iter().flatten() {
        if let Ok(mut visibility) = visibility_query.get_mut(panel) {
            *visibility = Visibility::Hidden;
        }
    }

    let total = egg_query.iter().count() as u32;
    run.start(total, settings.game_duration);

    info!(
        "Egg hunt started: {} eggs, {}s on the clock",
        total, settings.game_duration
    );
}

// Eggs spawned while the run is in progress raise the total. Eggs that exist
// before the run starts are counted by `start_run` instead.
pub fn count_late_eggs(trigger: Trigger<OnAdd, Egg>, mut run: ResMut<RunState>) {
    if run.is_active() {
        run.add_eggs(1);
        debug!(
            "Egg {:?} joined the run, total is now {}",
            trigger.entity(),
            run.total()
        );
    }
}

pub fn countdown_system(
    time: Res<Time>,
    mut run: ResMut<RunState>,
    mut ended_events: EventWriter<RunEnded>,
) {
    if let Some(outcome) = run.tick(time.delta_secs()) {
        info!(
            "Time is up with {}/{} eggs collected",
            run.collected(),
            run.total()
        );
        ended_events.send(RunEnded { outcome });
    }
}
