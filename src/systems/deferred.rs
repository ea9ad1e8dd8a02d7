use crate::resources::{DeferredAction, DeferredActions};
use bevy::prelude::*;

// Resumes hide/despawn actions whose delay has elapsed. A target that is gone
// by then is skipped.
pub fn run_deferred_actions_system(
    time: Res<Time>,
    mut commands: Commands,
    mut deferred: ResMut<DeferredActions>,
    mut visibility_query: Query<&mut Visibility>,
) {
    for action in deferred.tick(time.delta()) {
        match action {
            DeferredAction::Hide(entity) => {
                if let Ok(mut visibility) = visibility_query.get_mut(entity) {
                    *visibility = Visibility::Hidden;
                }
            }
            DeferredAction::Despawn(entity) => match commands.get_entity(entity) {
                Some(entity_commands) => entity_commands.despawn_recursive(),
                None => debug!("{:?} was already gone", entity),
            },
        }
    }
}
