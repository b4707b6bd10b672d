//! Data-driven world configuration
//!
//! One parametrized model covers every variant of the game family: a ground
//! runner and a pipe glider are the same simulation with different numbers.
//! All types are serde-friendly so tunings can live in JSON.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// What happens when the player touches the floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FloorPolicy {
    /// Land: clamp position to the floor and zero velocity
    Clamp,
    /// Floor contact ends the run
    Terminate,
}

/// What happens when the player touches the ceiling
///
/// Variants disagree here, so it is a flag rather than a fixed rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CeilingPolicy {
    /// Clamp position to the ceiling and zero velocity
    Clamp,
    /// Ceiling contact ends the run
    Terminate,
}

/// Controlled entity tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Fixed horizontal position of the left edge
    pub x: f32,
    pub width: f32,
    pub height: f32,
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    /// Velocity assigned by an accepted impulse (px/s, negative = up)
    pub impulse_velocity: f32,
    /// Ground variants only accept a jump while standing on the floor
    pub impulse_needs_ground: bool,
    pub floor_policy: FloorPolicy,
    pub ceiling_policy: CeilingPolicy,
}

/// Geometry family the obstacle scheduler spawns from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObstacleShape {
    /// Floor-standing rectangles; one (width, height) entry is chosen
    /// uniformly per spawn
    Ground { sizes: Vec<(f32, f32)> },
    /// Vertical pipe pairs with a traversable gap
    ///
    /// The sampled top height always satisfies
    /// `min_top <= top <= playfield_h - gap - min_bottom`, so the opening
    /// never touches a playfield edge.
    PipePair {
        width: f32,
        gap: f32,
        min_top: f32,
        min_bottom: f32,
    },
}

/// Obstacle spawn scheduler tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleConfig {
    pub shape: ObstacleShape,
    /// Leftward speed (px/s)
    pub speed: f32,
    /// Countdown reset is `base + uniform(0, range)` seconds
    pub spawn_base: f32,
    pub spawn_range: f32,
}

/// Roaming hazard tuning (the "gnome": bobs on a sine wave of its own x)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoamerConfig {
    pub width: f32,
    pub height: f32,
    /// Independent leftward speed (px/s)
    pub speed: f32,
    /// Vertical bob: `y = base_y + amplitude * sin(frequency * x)`
    pub amplitude: f32,
    /// Radians per pixel of horizontal travel
    pub frequency: f32,
    pub spawn_base: f32,
    pub spawn_range: f32,
}

/// Collectible tuning; pickups spawn as a Bernoulli trial alongside obstacles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupConfig {
    pub radius: f32,
    /// Probability that an obstacle spawn also drops a pickup
    pub chance: f64,
    /// Score awarded on collection
    pub bonus: u64,
}

/// Complete tuning for one game variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    pub playfield_width: f32,
    pub playfield_height: f32,
    pub player: PlayerConfig,
    pub obstacles: ObstacleConfig,
    /// Roaming hazards are absent in most variants
    pub roamer: Option<RoamerConfig>,
    /// Pickups are absent in most variants
    pub pickups: Option<PickupConfig>,
}

impl WorldConfig {
    /// The astronaut runner: grounded jumps over floor-standing asteroids
    pub fn ground_runner() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            player: PlayerConfig {
                x: PLAYER_X,
                width: PLAYER_WIDTH,
                height: PLAYER_HEIGHT,
                gravity: GRAVITY,
                impulse_velocity: IMPULSE_VELOCITY,
                impulse_needs_ground: true,
                floor_policy: FloorPolicy::Clamp,
                ceiling_policy: CeilingPolicy::Clamp,
            },
            obstacles: ObstacleConfig {
                shape: ObstacleShape::Ground {
                    sizes: vec![(30.0, 30.0), (50.0, 50.0), (25.0, 60.0)],
                },
                speed: OBSTACLE_SPEED,
                spawn_base: OBSTACLE_SPAWN_BASE,
                spawn_range: OBSTACLE_SPAWN_RANGE,
            },
            roamer: None,
            pickups: None,
        }
    }

    /// The flappy variant: airborne flaps through pipe gaps, with coins and
    /// a roaming gnome
    pub fn pipe_glider() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            player: PlayerConfig {
                x: PLAYER_X,
                width: 40.0,
                height: 30.0,
                gravity: GRAVITY * 0.6,
                impulse_velocity: IMPULSE_VELOCITY * 0.55,
                impulse_needs_ground: false,
                floor_policy: FloorPolicy::Terminate,
                ceiling_policy: CeilingPolicy::Clamp,
            },
            obstacles: ObstacleConfig {
                shape: ObstacleShape::PipePair {
                    width: PIPE_WIDTH,
                    gap: PIPE_GAP,
                    min_top: PIPE_MIN_TOP,
                    min_bottom: PIPE_MIN_BOTTOM,
                },
                speed: OBSTACLE_SPEED * 0.7,
                spawn_base: 1.8,
                spawn_range: 0.6,
            },
            roamer: Some(RoamerConfig {
                width: ROAMER_WIDTH,
                height: ROAMER_HEIGHT,
                speed: ROAMER_SPEED,
                amplitude: ROAMER_AMPLITUDE,
                frequency: ROAMER_FREQUENCY,
                spawn_base: ROAMER_SPAWN_BASE,
                spawn_range: ROAMER_SPAWN_RANGE,
            }),
            pickups: Some(PickupConfig {
                radius: PICKUP_RADIUS,
                chance: PICKUP_CHANCE,
                bonus: PICKUP_BONUS,
            }),
        }
    }

    /// Floor y-coordinate for the player (top edge when standing)
    #[inline]
    pub fn floor_y(&self) -> f32 {
        self.playfield_height - self.player.height
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::ground_runner()
    }
}
