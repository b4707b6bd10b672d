//! Gap Runner - A side-scrolling obstacle-dodge arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `highscores`: Top-10 leaderboard with LocalStorage persistence
//! - `audio`: Procedural sound cues (Web Audio)
//! - `settings`: Player preferences

pub mod audio;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
///
/// The per-second values are the classic per-frame tunings of the browser
/// originals converted for a nominal 60 Hz frame rate.
pub mod consts {
    /// Frame deltas above this are treated as a host stall and skipped
    pub const MAX_STEP_DT: f32 = 0.1;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 400.0;

    /// Player defaults - horizontal position never changes
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;

    /// Downward acceleration (px/s²)
    pub const GRAVITY: f32 = 2160.0;
    /// Velocity assigned by a jump/flap impulse (px/s, negative = up)
    pub const IMPULSE_VELOCITY: f32 = -720.0;

    /// Obstacle defaults
    pub const OBSTACLE_SPEED: f32 = 300.0;
    pub const OBSTACLE_SPAWN_BASE: f32 = 1.25;
    pub const OBSTACLE_SPAWN_RANGE: f32 = 0.85;

    /// Pipe-pair defaults
    pub const PIPE_WIDTH: f32 = 80.0;
    pub const PIPE_GAP: f32 = 150.0;
    pub const PIPE_MIN_TOP: f32 = 40.0;
    pub const PIPE_MIN_BOTTOM: f32 = 40.0;

    /// Pickup defaults
    pub const PICKUP_RADIUS: f32 = 12.0;
    pub const PICKUP_CHANCE: f64 = 0.3;
    pub const PICKUP_BONUS: u64 = 5;

    /// Roaming hazard defaults
    pub const ROAMER_WIDTH: f32 = 36.0;
    pub const ROAMER_HEIGHT: f32 = 36.0;
    pub const ROAMER_SPEED: f32 = 390.0;
    pub const ROAMER_AMPLITUDE: f32 = 60.0;
    pub const ROAMER_FREQUENCY: f32 = 0.02;
    pub const ROAMER_SPAWN_BASE: f32 = 4.0;
    pub const ROAMER_SPAWN_RANGE: f32 = 3.0;
}
