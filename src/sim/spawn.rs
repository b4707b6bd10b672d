//! Spawn scheduling
//!
//! One countdown timer per hazard category; expiry emits a hazard at the
//! playfield's trailing edge with geometry drawn from the world's seeded RNG,
//! then resets to `base + uniform(0, range)`. Pickups have no timer of their
//! own; they are a Bernoulli trial piggybacking on obstacle spawns.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::config::{ObstacleShape, RoamerConfig};
use super::state::{Hazard, HazardKind, Pickup, World};

/// Advance both category timers and spawn whatever came due
pub(crate) fn run_schedulers(world: &mut World, dt: f32) {
    world.timers.obstacle -= dt;
    if world.timers.obstacle <= 0.0 {
        spawn_obstacle(world);
        let base = world.config.obstacles.spawn_base;
        let range = world.config.obstacles.spawn_range;
        world.timers.obstacle = reset_timer(&mut world.rng, base, range);
    }

    if let Some(roamer) = world.config.roamer.clone() {
        world.timers.roamer -= dt;
        if world.timers.roamer <= 0.0 {
            spawn_roamer(world, &roamer);
            world.timers.roamer = reset_timer(&mut world.rng, roamer.spawn_base, roamer.spawn_range);
        }
    }
}

/// Fresh countdown: `base + uniform(0, range)` seconds
fn reset_timer(rng: &mut Pcg32, base: f32, range: f32) -> f32 {
    if range > 0.0 {
        base + rng.random_range(0.0..range)
    } else {
        base
    }
}

/// Sample a pipe top height such that the gap never touches a playfield edge
///
/// Guarantees `min_top <= top <= playfield_height - gap - min_bottom`.
pub fn sample_pipe_top(
    rng: &mut Pcg32,
    playfield_height: f32,
    gap: f32,
    min_top: f32,
    min_bottom: f32,
) -> f32 {
    let max_top = playfield_height - gap - min_bottom;
    if max_top <= min_top {
        // Misconfigured geometry; pin to the only defensible value
        return min_top;
    }
    rng.random_range(min_top..=max_top)
}

fn spawn_obstacle(world: &mut World) {
    let x = world.config.playfield_width;

    let kind = match world.config.obstacles.shape.clone() {
        ObstacleShape::Ground { sizes } => {
            if sizes.is_empty() {
                return;
            }
            let (width, height) = sizes[world.rng.random_range(0..sizes.len())];
            HazardKind::Ground { width, height }
        }
        ObstacleShape::PipePair {
            width,
            gap,
            min_top,
            min_bottom,
        } => {
            let playfield_height = world.config.playfield_height;
            let top_height =
                sample_pipe_top(&mut world.rng, playfield_height, gap, min_top, min_bottom);
            HazardKind::PipePair {
                width,
                top_height,
                gap,
            }
        }
    };

    // Pickup ride-along, centered on whatever opening the hazard leaves
    if let Some(pickups) = world.config.pickups.clone() {
        if world.rng.random_bool(pickups.chance) {
            let pos = match kind {
                HazardKind::PipePair {
                    width,
                    top_height,
                    gap,
                } => Vec2::new(x + width / 2.0, top_height + gap / 2.0),
                _ => {
                    let y = world
                        .rng
                        .random_range(world.config.playfield_height * 0.25
                            ..world.config.playfield_height * 0.6);
                    Vec2::new(x + world.config.obstacles.speed * 0.3, y)
                }
            };
            let id = world.next_entity_id();
            world.pickups.push(Pickup {
                id,
                pos,
                radius: pickups.radius,
            });
        }
    }

    let id = world.next_entity_id();
    world.hazards.push(Hazard {
        id,
        kind,
        x,
        passed: false,
    });
}

fn spawn_roamer(world: &mut World, roamer: &RoamerConfig) {
    let playfield_height = world.config.playfield_height;

    // Keep the whole bob inside the playfield when there is room for it
    let lo = roamer.amplitude;
    let hi = playfield_height - roamer.height - roamer.amplitude;
    let base_y = if hi > lo {
        world.rng.random_range(lo..=hi)
    } else {
        (playfield_height - roamer.height) / 2.0
    };

    let id = world.next_entity_id();
    world.hazards.push(Hazard {
        id,
        kind: HazardKind::Roamer {
            width: roamer.width,
            height: roamer.height,
            base_y,
            amplitude: roamer.amplitude,
            frequency: roamer.frequency,
            speed: roamer.speed,
        },
        x: world.config.playfield_width,
        passed: false,
    });
}
