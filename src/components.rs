// components.rs
use bevy::prelude::*;

// A collectible egg. Every entity carrying this counts toward the run total.
#[derive(Component)]
pub struct Egg;

// Present while the egg can still be collected. Removed on pickup so a second
// grab on the same egg (before it despawns) is ignored.
#[derive(Component)]
pub struct Grabbable;

// Optional pickup cue for an egg
#[derive(Component, Clone)]
pub struct EggSound(pub Handle<AudioSource>);

// The active viewpoint (the player's head / main camera)
#[derive(Component)]
pub struct Viewpoint;

// Reach sensor attached to the viewpoint
#[derive(Component)]
pub struct Hand;

#[derive(Component)]
pub struct CounterPanel;

#[derive(Component)]
pub struct CounterText;

// World point a screen-space panel is pinned to. The panel is moved every frame
// to wherever the viewpoint sees that point.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct WorldAnchor(pub Vec3);

#[derive(Component)]
pub struct ResultPanel;

#[derive(Component)]
pub struct ResultText;

// Simple desktop fly controls for the viewpoint
#[derive(Component)]
pub struct FlyControls {
    pub speed: f32,
    pub turn_speed: f32,
}

impl Default for FlyControls {
    fn default() -> Self {
        Self {
            speed: 3.0,      // meters per second
            turn_speed: 1.8, // radians per second
        }
    }
}
