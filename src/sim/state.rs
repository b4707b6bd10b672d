//! Game state and core simulation types
//!
//! A single `World` owns everything the step function mutates; the driver
//! holds exactly one and threads it through `step`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::config::WorldConfig;
use super::rect::Rect;

/// Lifecycle phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Display-only; the first impulse starts a run
    NotStarted,
    /// Simulation advances every frame
    Running,
    /// Terminal; only an explicit restart leaves this phase
    GameOver,
}

/// Things that happened during a step, for audio/HUD/persistence collaborators
///
/// The simulation never depends on anyone observing these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A run was (re)initialized and is now running
    Started,
    /// An impulse was accepted this step
    Flapped,
    /// A hazard was passed; `total` is the score after the increment
    Scored { total: u64 },
    /// A pickup was collected; `total` is the score after the bonus
    PickupCollected { total: u64 },
    /// The run ended with this final score
    GameOver { score: u64 },
}

/// The controlled entity
///
/// Horizontal position and size are fixed configuration; only the vertical
/// coordinate and velocity are state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    /// Top edge (canvas coordinates, y grows downward)
    pub y: f32,
    /// Vertical velocity (px/s, positive = falling)
    pub vel_y: f32,
}

/// Hazard categories, each carrying only its own geometry
#[derive(Debug, Clone, PartialEq)]
pub enum HazardKind {
    /// Floor-standing rectangle
    Ground { width: f32, height: f32 },
    /// Pipe pair: solid above `top_height` and below `top_height + gap`
    PipePair {
        width: f32,
        top_height: f32,
        gap: f32,
    },
    /// Rectangle bobbing on a sine wave of its own horizontal position
    Roamer {
        width: f32,
        height: f32,
        base_y: f32,
        amplitude: f32,
        frequency: f32,
        speed: f32,
    },
}

/// A hazard instance moving leftward across the playfield
#[derive(Debug, Clone, PartialEq)]
pub struct Hazard {
    pub id: u32,
    pub kind: HazardKind,
    /// Left edge; decreases every step
    pub x: f32,
    /// One-shot scoring guard; flips false→true at most once
    pub passed: bool,
}

impl Hazard {
    #[inline]
    pub fn width(&self) -> f32 {
        match self.kind {
            HazardKind::Ground { width, .. } => width,
            HazardKind::PipePair { width, .. } => width,
            HazardKind::Roamer { width, .. } => width,
        }
    }

    /// Trailing edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width()
    }

    /// Leftward speed; roamers carry their own, everything else shares the
    /// obstacle speed
    pub fn speed(&self, config: &WorldConfig) -> f32 {
        match self.kind {
            HazardKind::Roamer { speed, .. } => speed,
            _ => config.obstacles.speed,
        }
    }

    /// Whether passing this hazard scores a point
    pub fn scores_on_pass(&self) -> bool {
        !matches!(self.kind, HazardKind::Roamer { .. })
    }

    /// Body rectangle for AABB hazards; `None` for pipe pairs, which collide
    /// as two half-planes instead
    pub fn body(&self, playfield_height: f32) -> Option<Rect> {
        match self.kind {
            HazardKind::Ground { width, height } => Some(Rect::new(
                self.x,
                playfield_height - height,
                width,
                height,
            )),
            HazardKind::Roamer {
                width,
                height,
                base_y,
                amplitude,
                frequency,
                ..
            } => {
                let y = base_y + amplitude * (frequency * self.x).sin();
                let y = y.clamp(0.0, playfield_height - height);
                Some(Rect::new(self.x, y, width, height))
            }
            HazardKind::PipePair { .. } => None,
        }
    }
}

/// A circular collectible
#[derive(Debug, Clone, PartialEq)]
pub struct Pickup {
    pub id: u32,
    /// Center
    pub pos: Vec2,
    pub radius: f32,
}

impl Pickup {
    /// Trailing edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }
}

/// Countdown timers, one per spawnable category (seconds)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnTimers {
    pub obstacle: f32,
    pub roamer: f32,
}

/// Complete world state for one run
#[derive(Debug, Clone)]
pub struct World {
    pub config: WorldConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: Phase,
    pub score: u64,
    pub player: Player,
    /// Spawn order, which is also render order
    pub hazards: Vec<Hazard>,
    pub pickups: Vec<Pickup>,
    pub timers: SpawnTimers,
    /// Total simulated time this run (seconds)
    pub elapsed: f32,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl World {
    /// Create a world in the display-only `NotStarted` phase
    pub fn new(config: WorldConfig, seed: u64) -> Self {
        let player = Player {
            y: Self::start_y(&config),
            vel_y: 0.0,
        };
        let timers = SpawnTimers {
            obstacle: config.obstacles.spawn_base,
            roamer: config.roamer.as_ref().map_or(0.0, |r| r.spawn_base),
        };
        Self {
            config,
            seed,
            phase: Phase::NotStarted,
            score: 0,
            player,
            hazards: Vec::new(),
            pickups: Vec::new(),
            timers,
            elapsed: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Initial vertical position: on the floor for ground variants, mid-field
    /// for airborne ones
    fn start_y(config: &WorldConfig) -> f32 {
        if config.player.impulse_needs_ground {
            config.floor_y()
        } else {
            (config.playfield_height - config.player.height) / 2.0
        }
    }

    /// Wipe the previous run and begin a new one
    ///
    /// The RNG stream continues rather than reseeding, so a whole session
    /// stays reproducible from the initial seed.
    pub fn reset(&mut self) {
        self.player = Player {
            y: Self::start_y(&self.config),
            vel_y: 0.0,
        };
        self.hazards.clear();
        self.pickups.clear();
        self.score = 0;
        self.elapsed = 0.0;
        self.timers = SpawnTimers {
            obstacle: self.config.obstacles.spawn_base,
            roamer: self.config.roamer.as_ref().map_or(0.0, |r| r.spawn_base),
        };
        self.phase = Phase::Running;
    }

    /// Allocate a new entity ID
    pub(crate) fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Player bounding rectangle
    pub fn player_rect(&self) -> Rect {
        Rect::new(
            self.config.player.x,
            self.player.y,
            self.config.player.width,
            self.config.player.height,
        )
    }

    /// Floor y-coordinate for the player's top edge
    #[inline]
    pub fn floor_y(&self) -> f32 {
        self.config.floor_y()
    }

    /// Whether the player is standing on the floor
    #[inline]
    pub fn grounded(&self) -> bool {
        self.player.y >= self.floor_y()
    }
}
