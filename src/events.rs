use bevy::prelude::*;

// Sent by the interaction layer when the player picks up an item
#[derive(Event, Debug, Clone, Copy)]
pub struct EggGrabbed {
    pub egg: Entity,
}

// Sent once per successful collection, after the counter was bumped
#[derive(Event, Debug, Clone, Copy)]
pub struct EggCollected {
    pub collected: u32,
}

// Sent exactly once per run, when it is won or lost
#[derive(Event, Debug, Clone, Copy)]
pub struct RunEnded {
    pub outcome: RunOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Won,  // Every egg collected before the timer ran out
    Lost, // Timer reached zero first
}

impl RunOutcome {
    pub fn message(self) -> &'static str {
        match self {
            RunOutcome::Won => "You Win!",
            RunOutcome::Lost => "Your time is out! You lose!",
        }
    }
}
