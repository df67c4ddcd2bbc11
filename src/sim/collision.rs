//! Collision detection and response for the ball against rectangles
//!
//! The tricky part of a brick breaker: a circular ball overlapping an
//! axis-aligned rectangle has to be bounced off the face it actually came
//! through, using only the state of a single frame.
//!
//! The ball's position relative to the rectangle's center gives an approach
//! quadrant. Comparing that quadrant with the direction the ball is moving
//! tells which face was struck:
//!
//! - no axis disagrees: the ball is already moving away on both axes, bounce
//!   off the left/right face
//! - one axis disagrees: that axis is the one the ball crossed
//! - both disagree: a true corner hit, settled by tracing the ball's line of
//!   travel back to whichever near edge it meets first

use glam::Vec2;

use super::rect::Rect;
use super::state::Ball;
use crate::{sign, side_of};

/// Below this horizontal speed the travel line is treated as vertical
const MIN_RUN: f32 = 1e-4;

/// What the ball hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
    /// The paddle re-aims the ball by where it was struck
    Paddle { steer_speed: f32 },
    Brick,
}

/// Which velocity component a bounce flips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BounceAxis {
    /// Left/right face: x velocity flips
    Horizontal,
    /// Top/bottom face: y velocity flips
    Vertical,
}

/// Result of resolving one ball/rectangle overlap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub axis: BounceAxis,
    /// Sign pair of the ball's side of the rectangle center, each -1 or +1
    pub quadrant: Vec2,
    /// Number of axes (0-2) where the velocity disagrees with the quadrant
    pub mismatches: u32,
}

/// Whether the ball's bounding box overlaps the rectangle
#[inline]
pub fn ball_rect_overlap(ball: &Ball, rect: &Rect) -> bool {
    ball.bounds().intersects(rect)
}

/// Side of the rectangle's center the point lies on, per axis.
///
/// (-1,-1) top-left, (-1,+1) bottom-left, (+1,-1) top-right,
/// (+1,+1) bottom-right. A point exactly on a center line counts as -1.
pub fn approach_quadrant(pos: Vec2, rect: &Rect) -> Vec2 {
    let center = rect.center();
    Vec2::new(side_of(pos.x, center.x), side_of(pos.y, center.y))
}

/// Count the axes on which the velocity's sign differs from the quadrant's
pub fn mismatch_count(vel: Vec2, quadrant: Vec2) -> u32 {
    let mut count = 0;
    if sign(vel.x) != quadrant.x {
        count += 1;
    }
    if sign(vel.y) != quadrant.y {
        count += 1;
    }
    count
}

/// Re-aim the ball by where it struck the paddle.
///
/// Left edge sends it hard left, the middle straight up, the right edge hard
/// right. Only the x velocity changes.
pub fn steer_off_paddle(ball: &mut Ball, paddle: &Rect, steer_speed: f32) {
    let ratio = (paddle.left - ball.pos.x) / paddle.width * std::f32::consts::PI;
    ball.vel.x = -ratio.cos() * steer_speed;
}

/// Bounce the ball off `rect`, leaving it flush against the struck face.
///
/// Paddle steering runs first so the new x direction feeds the face choice.
pub fn resolve_bounce(ball: &mut Ball, rect: &Rect, target: Target, field: Vec2) -> Resolution {
    if let Target::Paddle { steer_speed } = target {
        steer_off_paddle(ball, rect, steer_speed);
    }

    let quadrant = approach_quadrant(ball.pos, rect);
    let mismatches = mismatch_count(ball.vel, quadrant);

    let axis = match mismatches {
        0 => BounceAxis::Horizontal,
        1 => {
            if sign(ball.vel.x) != quadrant.x {
                BounceAxis::Horizontal
            } else {
                BounceAxis::Vertical
            }
        }
        _ => corner_axis(ball, rect, quadrant),
    };

    bounce(ball, rect, axis, quadrant, field);

    Resolution {
        axis,
        quadrant,
        mismatches,
    }
}

/// Settle a corner hit by which near edge the line of travel meets first.
///
/// Both near edges are pushed out by the ball radius so the test is against
/// the region the ball's center can occupy while touching. The line through
/// the center is followed to the vertical edge; if it meets that edge while
/// still inside the horizontal one, the vertical edge came first.
fn corner_axis(ball: &Ball, rect: &Rect, quadrant: Vec2) -> BounceAxis {
    if ball.vel.x.abs() < MIN_RUN {
        return BounceAxis::Vertical;
    }
    let slope = ball.vel.y / ball.vel.x;
    let r = ball.radius;

    let (edge_x, edge_y) = match (quadrant.x < 0.0, quadrant.y < 0.0) {
        (true, true) => (rect.left - r, rect.top - r),
        (true, false) => (rect.left - r, rect.bottom() + r),
        (false, true) => (rect.right() + r, rect.top - r),
        (false, false) => (rect.right() + r, rect.bottom() + r),
    };

    let cross_y = ball.pos.y + slope * (edge_x - ball.pos.x);
    let meets_vertical_edge_first = if quadrant.y < 0.0 {
        cross_y >= edge_y
    } else {
        cross_y <= edge_y
    };

    if meets_vertical_edge_first {
        BounceAxis::Horizontal
    } else {
        BounceAxis::Vertical
    }
}

/// Flip one velocity component and move the ball flush against that face
fn bounce(ball: &mut Ball, rect: &Rect, axis: BounceAxis, quadrant: Vec2, field: Vec2) {
    let r = ball.radius;
    match axis {
        BounceAxis::Horizontal => {
            let x = if quadrant.x < 0.0 {
                rect.left - r
            } else {
                rect.right() + r
            };
            ball.vel.x = -ball.vel.x;
            ball.reposition(Vec2::new(x, ball.pos.y), field);
        }
        BounceAxis::Vertical => {
            let y = if quadrant.y < 0.0 {
                rect.top - r
            } else {
                rect.bottom() + r
            };
            ball.vel.y = -ball.vel.y;
            ball.reposition(Vec2::new(ball.pos.x, y), field);
        }
    }
}
