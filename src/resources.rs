// resources.rs
use crate::events::RunOutcome;
use bevy::prelude::*;
use std::collections::HashSet;

pub const DURATION_ENV_VAR: &str = "EGG_HUNT_DURATION";
pub const SOUND_ENV_VAR: &str = "EGG_HUNT_SOUND";

#[derive(Resource, Clone, Debug)]
pub struct GameSettings {
    pub game_duration: f32,
    pub counter_display_secs: f32,
    pub result_display_secs: f32,
    pub panel_distance: f32,
    pub grab_reach: f32,
    pub egg_sound: Option<String>, // Asset path of the pickup cue, relative to the asset root
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            game_duration: 50.0,       // Seconds to collect every egg
            counter_display_secs: 2.0, // Counter panel and collected egg linger this long
            result_display_secs: 5.0,
            panel_distance: 1.2, // Meters in front of the viewpoint
            grab_reach: 0.6,
            egg_sound: None,
        }
    }
}

impl GameSettings {
    // Defaults, with `game_duration` taken from `EGG_HUNT_DURATION` when it
    // holds a positive number of seconds, and the pickup cue from `EGG_HUNT_SOUND`.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Ok(raw) = std::env::var(DURATION_ENV_VAR) {
            match parse_duration(&raw) {
                Some(secs) => settings.game_duration = secs,
                None => warn!(
                    "Ignoring {}={:?}, keeping {}s",
                    DURATION_ENV_VAR, raw, settings.game_duration
                ),
            }
        }
        settings.egg_sound = std::env::var(SOUND_ENV_VAR)
            .ok()
            .and_then(|raw| parse_sound_path(&raw));
        settings
    }
}

fn parse_duration(raw: &str) -> Option<f32> {
    raw.trim()
        .parse::<f32>()
        .ok()
        .filter(|secs| secs.is_finite() && *secs > 0.0)
}

fn parse_sound_path(raw: &str) -> Option<String> {
    let path = raw.trim();
    (!path.is_empty()).then(|| path.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunPhase {
    #[default]
    Pending, // Scene loaded, run not started yet
    Active,
    Ended(RunOutcome),
}

// Shared state of the single playthrough. Every egg contributes to it.
#[derive(Resource, Debug, Default)]
pub struct RunState {
    collected: u32,
    total: u32,
    time_remaining: f32,
    phase: RunPhase,
}

// What a successful collection did to the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collection {
    pub collected: u32,
    pub outcome: Option<RunOutcome>,
}

impl RunState {
    pub fn start(&mut self, total: u32, duration: f32) {
        self.collected = 0;
        self.total = total;
        self.time_remaining = duration;
        self.phase = RunPhase::Active;
    }

    pub fn collected(&self) -> u32 {
        self.collected
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    #[cfg(test)]
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == RunPhase::Active
    }

    #[cfg(test)]
    pub fn outcome(&self) -> Option<RunOutcome> {
        match self.phase {
            RunPhase::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    // Eggs that show up after the run started join the total; counters are
    // never reset mid-run.
    pub fn add_eggs(&mut self, count: u32) {
        if self.is_active() {
            self.total += count;
        }
    }

    // Counts one egg. `None` once the run is over (or not yet started).
    pub fn collect(&mut self) -> Option<Collection> {
        if !self.is_active() {
            return None;
        }
        self.collected += 1;
        let outcome = if self.collected >= self.total {
            self.finish(RunOutcome::Won)
        } else {
            None
        };
        Some(Collection {
            collected: self.collected,
            outcome,
        })
    }

    // Advances the countdown. Returns `Lost` on the frame the timer expires.
    pub fn tick(&mut self, delta_secs: f32) -> Option<RunOutcome> {
        if !self.is_active() {
            return None;
        }
        self.time_remaining -= delta_secs;
        if self.time_remaining <= 0.0 {
            self.finish(RunOutcome::Lost)
        } else {
            None
        }
    }

    // Records the outcome. Only the first call of a run has any effect.
    pub fn finish(&mut self, outcome: RunOutcome) -> Option<RunOutcome> {
        if !self.is_active() {
            return None;
        }
        self.phase = RunPhase::Ended(outcome);
        Some(outcome)
    }
}

// HUD entities, wired when the scene is built. Any of them may be missing.
#[derive(Resource, Default, Debug, Clone)]
pub struct HudHandles {
    pub counter_panel: Option<Entity>,
    pub counter_text: Option<Entity>,
    pub result_panel: Option<Entity>,
    pub result_text: Option<Entity>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    Hide(Entity),
    Despawn(Entity),
}

// Actions resumed on a later frame once their delay has elapsed. Nothing is
// ever cancelled: each scheduled action fires exactly once.
#[derive(Resource, Default)]
pub struct DeferredActions {
    pending: Vec<(Timer, DeferredAction)>,
}

impl DeferredActions {
    pub fn schedule(&mut self, delay_secs: f32, action: DeferredAction) {
        self.pending
            .push((Timer::from_seconds(delay_secs, TimerMode::Once), action));
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    // Ticks every timer and drains the actions that came due, in scheduling order.
    pub fn tick(&mut self, delta: std::time::Duration) -> Vec<DeferredAction> {
        let mut due = Vec::new();
        self.pending.retain_mut(|(timer, action)| {
            if timer.tick(delta).finished() {
                due.push(*action);
                false
            } else {
                true
            }
        });
        due
    }
}

// Eggs currently touching the hand sensor
#[derive(Resource, Default)]
pub struct EggsInReach(pub HashSet<Entity>);
