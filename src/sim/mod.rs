//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, owned by the world
//! - Explicit `step(world, input, dt)` advance, no host callbacks
//! - No rendering or platform dependencies

pub mod collision;
pub mod config;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod step;

pub use collision::{hazard_collision, pickup_collision, pipe_pair_collision};
pub use config::{
    CeilingPolicy, FloorPolicy, ObstacleConfig, ObstacleShape, PickupConfig, PlayerConfig,
    RoamerConfig, WorldConfig,
};
pub use rect::Rect;
pub use spawn::sample_pipe_top;
pub use state::{GameEvent, Hazard, HazardKind, Phase, Pickup, Player, SpawnTimers, World};
pub use step::{StepInput, integrate, step};
