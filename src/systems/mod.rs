pub mod collect;
pub mod deferred;
pub mod hud;
pub mod interaction;
pub mod run;

use crate::events::{EggCollected, EggGrabbed, RunEnded};
use crate::resources::{DeferredActions, GameSettings, HudHandles, RunState};
use bevy::prelude::*;

use collect::collect_eggs_system;
use deferred::run_deferred_actions_system;
use hud::{follow_world_anchors_system, show_counter_system, show_result_system};
use run::{countdown_system, count_late_eggs, start_run};

// Per-frame game logic. Ordered so that deferred actions only see delays
// scheduled on earlier frames, and the countdown wins ties with a grab.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct EggHuntSet;

pub fn plugin(app: &mut App) {
    app.add_event::<EggGrabbed>()
        .add_event::<EggCollected>()
        .add_event::<RunEnded>()
        .init_resource::<GameSettings>()
        .init_resource::<RunState>()
        .init_resource::<HudHandles>()
        .init_resource::<DeferredActions>()
        .add_observer(count_late_eggs)
        .add_systems(PostStartup, start_run)
        .add_systems(
            Update,
            (
                run_deferred_actions_system,
                countdown_system,
                collect_eggs_system,
                show_counter_system,
                follow_world_anchors_system,
                show_result_system,
            )
                .chain()
                .in_set(EggHuntSet),
        );
}
