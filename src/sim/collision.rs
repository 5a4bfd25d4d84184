//! Collision detection and response
//!
//! Responses overwrite velocity with a fixed speed along the contact normal
//! instead of exchanging momentum. That gives the snappy arcade bounce.

use glam::Vec2;

use super::state::Ball;
use crate::consts::{EMERGENCY_CLEARANCE, WALL_MARGIN};
use crate::outward_normal;
use crate::tuning::Tuning;

/// Resolve a ball-ball pair.
///
/// When the centres are closer than the scaled radius sum, both balls are
/// sent apart along the contact normal at boost speed and pushed apart by
/// half the overlap each. Returns true on contact.
pub fn resolve_pair(a: &mut Ball, b: &mut Ball, tuning: &Tuning) -> bool {
    let delta = b.pos - a.pos;
    let dist = delta.length();
    let min_dist = tuning.hit_distance(a.radius, b.radius);
    if dist >= min_dist {
        return false;
    }

    let normal = outward_normal(delta);
    a.vel = -normal * tuning.max_boost_speed;
    b.vel = normal * tuning.max_boost_speed;

    let half_overlap = (min_dist - dist) / 2.0;
    a.pos -= normal * half_overlap;
    b.pos += normal * half_overlap;
    true
}

/// Cursor contact details
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerHit {
    /// Point on the cursor's hit circle facing the ball
    pub contact: Vec2,
    /// Ball was near a wall and got the stronger push
    pub emergency: bool,
}

/// True when `pos` lies within the escalation margin of any edge
pub fn near_wall(pos: Vec2, size: Vec2) -> bool {
    pos.x < WALL_MARGIN
        || pos.x > size.x - WALL_MARGIN
        || pos.y < WALL_MARGIN
        || pos.y > size.y - WALL_MARGIN
}

/// Push a ball away from the cursor.
///
/// Balls close to a wall get emergency speed and extra clearance so they can
/// escape being pinned between the cursor and the edge.
pub fn repel_from_pointer(
    ball: &mut Ball,
    pointer: Vec2,
    size: Vec2,
    tuning: &Tuning,
) -> Option<PointerHit> {
    let delta = ball.pos - pointer;
    let dist = delta.length();
    let min_dist = tuning.hit_distance(ball.radius, tuning.mouse_radius);
    if dist >= min_dist {
        return None;
    }

    let emergency = near_wall(ball.pos, size);
    let normal = outward_normal(delta);
    let speed = if emergency {
        tuning.emergency_speed
    } else {
        tuning.max_boost_speed
    };
    ball.vel = normal * speed;

    let clearance = if emergency { EMERGENCY_CLEARANCE } else { 0.0 };
    ball.pos += normal * (min_dist - dist + clearance);

    Some(PointerHit {
        contact: pointer + normal * tuning.mouse_radius,
        emergency,
    })
}

/// Which edges a ball bounced off this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallBounce {
    pub x: bool,
    pub y: bool,
}

impl WallBounce {
    /// Number of collision effects to fire (one per axis)
    pub fn count(self) -> usize {
        self.x as usize + self.y as usize
    }
}

fn bounce_axis(pos: &mut f32, vel: &mut f32, radius: f32, extent: f32) -> bool {
    if *pos + radius > extent || *pos - radius < 0.0 {
        *vel = -*vel;
        *pos = if *pos < radius { radius } else { extent - radius };
        true
    } else {
        false
    }
}

/// Reflect off the surface edges, clamping the ball back inside
pub fn bounce_walls(ball: &mut Ball, size: Vec2) -> WallBounce {
    WallBounce {
        x: bounce_axis(&mut ball.pos.x, &mut ball.vel.x, ball.radius, size.x),
        y: bounce_axis(&mut ball.pos.y, &mut ball.vel.y, ball.radius, size.y),
    }
}

/// Friction toward the minimum speed.
///
/// Above the minimum the velocity decays geometrically but never below the
/// minimum; below it the velocity is rescaled up to exactly the minimum.
pub fn regulate_speed(vel: Vec2, min_speed: f32, friction: f32) -> Vec2 {
    let speed = vel.length();
    if speed > min_speed {
        let scaled = vel * friction;
        if scaled.length() < min_speed {
            vel * (min_speed / speed)
        } else {
            scaled
        }
    } else if speed < min_speed {
        outward_normal(vel) * min_speed
    } else {
        vel
    }
}
