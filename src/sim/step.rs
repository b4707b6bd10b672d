//! Per-frame simulation step
//!
//! The whole game advances through `step(world, input, dt)`: physics, spawn
//! scheduling, motion, retirement, scoring and collision in one pass. The
//! driver owns the loop; the step owns the rules.

use super::collision::{hazard_collision, pickup_collision};
use super::config::{CeilingPolicy, FloorPolicy};
use super::spawn;
use super::state::{GameEvent, Phase, World};
use crate::consts::MAX_STEP_DT;

/// Input flags for a single step (latest-pending wins; impulses are
/// idempotent overrides, not increments)
#[derive(Debug, Clone, Copy, Default)]
pub struct StepInput {
    /// Jump/flap requested since the last step
    pub impulse: bool,
    /// Restart requested since the last step
    pub restart: bool,
}

/// Velocity-then-position Euler integration
///
/// The order is part of the contract: `vel' = vel + g·dt`, then
/// `pos' = pos + vel'·dt`.
#[inline]
pub fn integrate(vel: f32, pos: f32, dt: f32, gravity: f32) -> (f32, f32) {
    let vel = vel + gravity * dt;
    let pos = pos + vel * dt;
    (vel, pos)
}

/// Advance the world by one frame, returning the events that occurred
pub fn step(world: &mut World, input: &StepInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match world.phase {
        Phase::NotStarted => {
            // First control input starts the run; nothing else does anything
            if input.impulse || input.restart {
                world.reset();
                events.push(GameEvent::Started);
            }
            return events;
        }
        Phase::GameOver => {
            // Impulses are ignored; only an explicit restart leaves this phase
            if input.restart {
                world.reset();
                events.push(GameEvent::Started);
            }
            return events;
        }
        Phase::Running => {}
    }

    if dt <= 0.0 {
        return events;
    }
    if dt > MAX_STEP_DT {
        // Host stalled (backgrounded tab etc.); integrating this delta would
        // tunnel the player through geometry and mass-spawn hazards
        log::debug!("skipping oversized frame delta: {dt:.3}s");
        return events;
    }

    world.elapsed += dt;

    // --- Physics ---
    let player_cfg = world.config.player.clone();
    let accepted_impulse =
        input.impulse && (!player_cfg.impulse_needs_ground || world.grounded());
    if accepted_impulse {
        // The impulse overrides velocity outright; gravity sits this step out
        world.player.vel_y = player_cfg.impulse_velocity;
        world.player.y += world.player.vel_y * dt;
        events.push(GameEvent::Flapped);
    } else {
        let (vel, y) = integrate(world.player.vel_y, world.player.y, dt, player_cfg.gravity);
        world.player.vel_y = vel;
        world.player.y = y;
    }

    // --- Boundaries ---
    let floor = world.floor_y();
    if world.player.y >= floor {
        match player_cfg.floor_policy {
            FloorPolicy::Clamp => {
                world.player.y = floor;
                world.player.vel_y = 0.0;
            }
            FloorPolicy::Terminate => {
                end_run(world, &mut events);
                return events;
            }
        }
    }
    if world.player.y <= 0.0 {
        match player_cfg.ceiling_policy {
            CeilingPolicy::Clamp => {
                world.player.y = 0.0;
                world.player.vel_y = 0.0;
            }
            CeilingPolicy::Terminate => {
                end_run(world, &mut events);
                return events;
            }
        }
    }

    // --- Hazard motion and pass scoring ---
    for hazard in &mut world.hazards {
        hazard.x -= hazard.speed(&world.config) * dt;
    }
    let player_x = world.config.player.x;
    for hazard in &mut world.hazards {
        if !hazard.passed && hazard.scores_on_pass() && hazard.right() < player_x {
            hazard.passed = true;
            world.score += 1;
            events.push(GameEvent::Scored { total: world.score });
        }
    }
    world.hazards.retain(|h| h.right() >= 0.0);

    // --- Pickup motion, retirement, collection ---
    let obstacle_speed = world.config.obstacles.speed;
    for pickup in &mut world.pickups {
        pickup.pos.x -= obstacle_speed * dt;
    }
    world.pickups.retain(|p| p.right() >= 0.0);

    let player_rect = world.player_rect();
    if let Some(pickup_cfg) = world.config.pickups.clone() {
        let mut collected = 0u32;
        world.pickups.retain(|p| {
            if pickup_collision(&player_rect, p) {
                collected += 1;
                false
            } else {
                true
            }
        });
        for _ in 0..collected {
            world.score += pickup_cfg.bonus;
            events.push(GameEvent::PickupCollected { total: world.score });
        }
    }

    // --- Spawn scheduling ---
    spawn::run_schedulers(world, dt);

    // --- Fatal collision ---
    let playfield_height = world.config.playfield_height;
    let fatal = world
        .hazards
        .iter()
        .any(|h| hazard_collision(&player_rect, h, playfield_height));
    if fatal {
        end_run(world, &mut events);
    }

    events
}

fn end_run(world: &mut World, events: &mut Vec<GameEvent>) {
    world.phase = Phase::GameOver;
    events.push(GameEvent::GameOver { score: world.score });
    log::info!("run over: score {}", world.score);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::config::WorldConfig;
    use crate::sim::state::{Hazard, HazardKind, Pickup};
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    /// A running world with spawning pushed far into the future, so tests
    /// control exactly which entities exist
    fn running_world(config: WorldConfig) -> World {
        let mut world = World::new(config, 4242);
        world.reset();
        world.timers.obstacle = f32::MAX;
        world.timers.roamer = f32::MAX;
        world
    }

    fn ground_hazard(x: f32, width: f32, height: f32) -> Hazard {
        Hazard {
            id: 1000,
            kind: HazardKind::Ground { width, height },
            x,
            passed: false,
        }
    }

    #[test]
    fn test_integrate_velocity_before_position() {
        let (vel, pos) = integrate(10.0, 100.0, 0.05, 2000.0);
        // vel' = 10 + 2000*0.05 = 110; pos' = 100 + 110*0.05 = 105.5
        assert_eq!(vel, 110.0);
        assert_eq!(pos, 105.5);
    }

    #[test]
    fn test_first_impulse_starts_run() {
        let mut world = World::new(WorldConfig::ground_runner(), 1);
        let events = step(
            &mut world,
            &StepInput {
                impulse: true,
                restart: false,
            },
            DT,
        );
        assert_eq!(world.phase, Phase::Running);
        assert_eq!(events, vec![GameEvent::Started]);
    }

    #[test]
    fn test_idle_not_started_stays_put() {
        let mut world = World::new(WorldConfig::ground_runner(), 1);
        let events = step(&mut world, &StepInput::default(), DT);
        assert_eq!(world.phase, Phase::NotStarted);
        assert!(events.is_empty());
    }

    #[test]
    fn test_floor_clamp_lands_exactly() {
        let mut world = running_world(WorldConfig::ground_runner());
        // 10px above the floor, falling fast enough to overshoot in one step
        world.player.y = world.floor_y() - 10.0;
        world.player.vel_y = 1000.0;
        step(&mut world, &StepInput::default(), DT);
        assert_eq!(world.player.y, world.floor_y());
        assert_eq!(world.player.vel_y, 0.0);
        assert_eq!(world.phase, Phase::Running);
    }

    #[test]
    fn test_floor_terminate_ends_run() {
        let mut world = running_world(WorldConfig::pipe_glider());
        world.player.y = world.floor_y() - 10.0;
        world.player.vel_y = 1000.0;
        let events = step(&mut world, &StepInput::default(), DT);
        assert_eq!(world.phase, Phase::GameOver);
        assert!(events.contains(&GameEvent::GameOver { score: 0 }));
    }

    #[test]
    fn test_ceiling_clamp_zeroes_velocity() {
        let mut world = running_world(WorldConfig::pipe_glider());
        world.player.y = 5.0;
        world.player.vel_y = -1000.0;
        step(&mut world, &StepInput::default(), DT);
        assert_eq!(world.player.y, 0.0);
        assert_eq!(world.player.vel_y, 0.0);
        assert_eq!(world.phase, Phase::Running);
    }

    #[test]
    fn test_ceiling_terminate_flag() {
        let mut config = WorldConfig::pipe_glider();
        config.player.ceiling_policy = crate::sim::config::CeilingPolicy::Terminate;
        let mut world = running_world(config);
        world.player.y = 5.0;
        world.player.vel_y = -1000.0;
        step(&mut world, &StepInput::default(), DT);
        assert_eq!(world.phase, Phase::GameOver);
    }

    #[test]
    fn test_grounded_gating_rejects_airborne_jump() {
        let mut world = running_world(WorldConfig::ground_runner());
        world.player.y = world.floor_y() - 100.0;
        world.player.vel_y = 0.0;
        let events = step(
            &mut world,
            &StepInput {
                impulse: true,
                restart: false,
            },
            DT,
        );
        assert!(!events.contains(&GameEvent::Flapped));
        // Gravity still applied
        assert!(world.player.vel_y > 0.0);
    }

    #[test]
    fn test_airborne_variant_flaps_anywhere() {
        let mut world = running_world(WorldConfig::pipe_glider());
        world.player.y = world.floor_y() / 2.0;
        let events = step(
            &mut world,
            &StepInput {
                impulse: true,
                restart: false,
            },
            DT,
        );
        assert!(events.contains(&GameEvent::Flapped));
        assert_eq!(world.player.vel_y, world.config.player.impulse_velocity);
    }

    #[test]
    fn test_scoring_is_idempotent_across_steps() {
        let mut world = running_world(WorldConfig::ground_runner());
        // Already past the crossing; stays past it for several steps
        world.hazards.push(ground_hazard(35.0, 10.0, 10.0));
        for _ in 0..5 {
            step(&mut world, &StepInput::default(), DT);
        }
        assert_eq!(world.score, 1);
    }

    #[test]
    fn test_roamer_pass_does_not_score() {
        let mut world = running_world(WorldConfig::pipe_glider());
        world.hazards.push(Hazard {
            id: 1000,
            kind: HazardKind::Roamer {
                width: 36.0,
                height: 36.0,
                base_y: 50.0,
                amplitude: 10.0,
                frequency: 0.02,
                speed: 390.0,
            },
            x: 30.0,
            passed: false,
        });
        step(&mut world, &StepInput::default(), DT);
        assert_eq!(world.score, 0);
    }

    #[test]
    fn test_retirement_after_full_crossing() {
        let mut world = running_world(WorldConfig::ground_runner());
        let width = 30.0;
        let speed = world.config.obstacles.speed;
        let mut hazard = ground_hazard(world.config.playfield_width, width, 30.0);
        hazard.id = 7;
        world.hazards.push(hazard);

        let crossing_time = (world.config.playfield_width + width) / speed;
        let steps = (crossing_time / DT).ceil() as usize + 2;
        for _ in 0..steps {
            // Pin the player high so the run survives the whole crossing
            world.player.y = 10.0;
            world.player.vel_y = 0.0;
            step(&mut world, &StepInput::default(), DT);
        }
        assert!(world.hazards.iter().all(|h| h.id != 7));
        // The pass was scored exactly once on the way out
        assert_eq!(world.score, 1);
    }

    #[test]
    fn test_fatal_collision_ends_run() {
        let mut world = running_world(WorldConfig::ground_runner());
        // Obstacle occupying the player's column at ground level
        world.hazards.push(ground_hazard(40.0, 60.0, 60.0));
        let events = step(&mut world, &StepInput::default(), DT);
        assert_eq!(world.phase, Phase::GameOver);
        assert!(matches!(events.last(), Some(GameEvent::GameOver { .. })));
    }

    #[test]
    fn test_pickup_collection_is_nonfatal() {
        let mut world = running_world(WorldConfig::pipe_glider());
        let bonus = world.config.pickups.as_ref().unwrap().bonus;
        let center = world.player_rect().center();
        world.pickups.push(Pickup {
            id: 50,
            pos: center + Vec2::new(2.0, 0.0),
            radius: 12.0,
        });
        let events = step(&mut world, &StepInput::default(), DT);
        assert_eq!(world.phase, Phase::Running);
        assert_eq!(world.score, bonus);
        assert!(world.pickups.is_empty());
        assert!(events.contains(&GameEvent::PickupCollected { total: bonus }));
    }

    #[test]
    fn test_oversized_delta_is_skipped() {
        let mut world = running_world(WorldConfig::ground_runner());
        world.timers.obstacle = 1.0;
        world.hazards.push(ground_hazard(400.0, 30.0, 30.0));
        let y_before = world.player.y;
        let timer_before = world.timers.obstacle;

        let events = step(&mut world, &StepInput::default(), 0.5);
        assert!(events.is_empty());
        assert_eq!(world.player.y, y_before);
        assert_eq!(world.timers.obstacle, timer_before);
        assert_eq!(world.hazards[0].x, 400.0);
    }

    #[test]
    fn test_impulse_while_game_over_is_ignored() {
        let mut world = running_world(WorldConfig::ground_runner());
        world.phase = Phase::GameOver;
        let events = step(
            &mut world,
            &StepInput {
                impulse: true,
                restart: false,
            },
            DT,
        );
        assert!(events.is_empty());
        assert_eq!(world.phase, Phase::GameOver);
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut world = running_world(WorldConfig::ground_runner());
        world.score = 9;
        world.hazards.push(ground_hazard(300.0, 30.0, 30.0));
        world.phase = Phase::GameOver;

        let events = step(
            &mut world,
            &StepInput {
                impulse: false,
                restart: true,
            },
            DT,
        );
        assert_eq!(world.phase, Phase::Running);
        assert_eq!(world.score, 0);
        assert!(world.hazards.is_empty());
        assert!(world.pickups.is_empty());
        assert_eq!(events, vec![GameEvent::Started]);
    }

    #[test]
    fn test_score_is_monotonic_while_running() {
        let mut world = World::new(WorldConfig::ground_runner(), 777);
        world.reset();
        let mut last = 0;
        for i in 0..2000 {
            let input = StepInput {
                // Hop periodically to dodge some obstacles
                impulse: i % 40 == 0,
                restart: false,
            };
            step(&mut world, &input, DT);
            assert!(world.score >= last);
            last = world.score;
            if world.phase == Phase::GameOver {
                break;
            }
        }
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = World::new(WorldConfig::pipe_glider(), 99999);
        let mut b = World::new(WorldConfig::pipe_glider(), 99999);
        a.reset();
        b.reset();
        for i in 0..600 {
            let input = StepInput {
                impulse: i % 20 == 0,
                restart: false,
            };
            step(&mut a, &input, DT);
            step(&mut b, &input, DT);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.hazards, b.hazards);
        assert_eq!(a.pickups, b.pickups);
        assert_eq!(a.player, b.player);
    }
}
