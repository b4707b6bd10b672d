//! Collision tests between the player and hazards/pickups
//!
//! Everything reduces to three checks: AABB overlap for solid hazards, a
//! two-half-plane test for pipe pairs, and closest-point distance for
//! circular pickups.

use super::rect::Rect;
use super::state::{Hazard, HazardKind, Pickup};

/// Pipe-pair test: the pair is solid above `top_height` and below
/// `bottom_y`, across `[pipe_x, pipe_x + width]`
///
/// While horizontally overlapping, the player's vertical extent must clear
/// both half-planes to survive.
pub fn pipe_pair_collision(
    player: &Rect,
    pipe_x: f32,
    width: f32,
    top_height: f32,
    bottom_y: f32,
) -> bool {
    let horizontal = player.x < pipe_x + width && player.right() > pipe_x;
    if !horizontal {
        return false;
    }
    player.y < top_height || player.bottom() > bottom_y
}

/// Whether the player overlaps a hazard of any category
pub fn hazard_collision(player: &Rect, hazard: &Hazard, playfield_height: f32) -> bool {
    match hazard.kind {
        HazardKind::PipePair {
            width,
            top_height,
            gap,
        } => pipe_pair_collision(player, hazard.x, width, top_height, top_height + gap),
        _ => match hazard.body(playfield_height) {
            Some(body) => player.overlaps(&body),
            None => false,
        },
    }
}

/// Whether the player touches a pickup (non-fatal; caller awards the bonus)
pub fn pickup_collision(player: &Rect, pickup: &Pickup) -> bool {
    player.intersects_circle(pickup.pos, pickup.radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipe(x: f32, top_height: f32, gap: f32) -> Hazard {
        Hazard {
            id: 1,
            kind: HazardKind::PipePair {
                width: 80.0,
                top_height,
                gap,
            },
            x,
            passed: false,
        }
    }

    #[test]
    fn test_pipe_pair_bottom_hit() {
        // Player {x:50, y:180, w:40, h:30}, pipe at x=40 with top 150 and
        // bottom opening at 190. Top edge 180 clears the top pipe, but the
        // bottom edge 210 reaches into the bottom pipe.
        let player = Rect::new(50.0, 180.0, 40.0, 30.0);
        assert!(pipe_pair_collision(&player, 40.0, 80.0, 150.0, 190.0));
    }

    #[test]
    fn test_pipe_pair_top_hit() {
        // Top edge 140 is above the 150 lip
        let player = Rect::new(50.0, 140.0, 40.0, 30.0);
        assert!(pipe_pair_collision(&player, 40.0, 80.0, 150.0, 250.0));
    }

    #[test]
    fn test_pipe_pair_threads_the_gap() {
        // Fully inside [150, 250]
        let player = Rect::new(50.0, 170.0, 40.0, 30.0);
        assert!(!pipe_pair_collision(&player, 40.0, 80.0, 150.0, 250.0));
    }

    #[test]
    fn test_pipe_pair_no_horizontal_overlap() {
        // Would hit vertically, but the pipe is far to the right
        let player = Rect::new(50.0, 100.0, 40.0, 30.0);
        assert!(!pipe_pair_collision(&player, 400.0, 80.0, 150.0, 250.0));
    }

    #[test]
    fn test_hazard_collision_dispatches_pipe() {
        let player = Rect::new(50.0, 180.0, 40.0, 30.0);
        // gap 40 puts bottom_y at 190, matching the bottom-hit case above
        assert!(hazard_collision(&player, &pipe(40.0, 150.0, 40.0), 400.0));
    }

    #[test]
    fn test_ground_hazard_aabb() {
        let playfield_h = 400.0;
        let hazard = Hazard {
            id: 1,
            kind: HazardKind::Ground {
                width: 30.0,
                height: 30.0,
            },
            x: 60.0,
            passed: false,
        };
        // Standing player overlapping the obstacle's column
        let hit = Rect::new(50.0, 350.0, 30.0, 50.0);
        assert!(hazard_collision(&hit, &hazard, playfield_h));
        // Player mid-jump, above the obstacle's top (370)
        let over = Rect::new(50.0, 310.0, 30.0, 50.0);
        assert!(!hazard_collision(&over, &hazard, playfield_h));
    }

    #[test]
    fn test_pickup_collision_uses_closest_point() {
        let player = Rect::new(50.0, 180.0, 40.0, 30.0);
        // Center just off the right edge (90), within radius
        let near = Pickup {
            id: 1,
            pos: glam::Vec2::new(100.0, 195.0),
            radius: 12.0,
        };
        assert!(pickup_collision(&player, &near));
        // Same center, too small to reach
        let far = Pickup {
            id: 2,
            pos: glam::Vec2::new(100.0, 195.0),
            radius: 9.0,
        };
        assert!(!pickup_collision(&player, &far));
    }
}
