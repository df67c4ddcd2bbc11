//! Property checks for ball motion and bounce resolution

use brick_breaker::sim::{
    Ball, BounceAxis, Rect, Target, ball_rect_overlap, collision::steer_off_paddle, resolve_bounce,
};
use glam::Vec2;
use proptest::prelude::*;

const FIELD: Vec2 = Vec2::new(400.0, 750.0);

/// A brick well away from every wall
fn brick() -> Rect {
    Rect::new(150.0, 300.0, 48.0, 14.0)
}

proptest! {
    #[test]
    fn integrate_keeps_ball_off_walls_and_ceiling(
        x in 0.0f32..400.0,
        y in 0.0f32..750.0,
        vx in -20.0f32..20.0,
        vy in -20.0f32..20.0,
        r in 1u8..=20,
    ) {
        let r = r as f32;
        let mut ball = Ball::new(Vec2::new(x, y), Vec2::new(vx, vy), r);
        ball.integrate(FIELD);
        prop_assert!(ball.pos.x >= r && ball.pos.x <= FIELD.x - r);
        prop_assert!(ball.pos.y >= r);
        prop_assert_eq!(ball.vel.abs(), Vec2::new(vx, vy).abs());
    }

    #[test]
    fn reposition_keeps_ball_inside_field(
        x in -100.0f32..500.0,
        y in -100.0f32..850.0,
        r in 1u8..=20,
    ) {
        let r = r as f32;
        let mut ball = Ball::new(Vec2::ZERO, Vec2::new(3.0, -4.0), r);
        ball.reposition(Vec2::new(x, y), FIELD);
        prop_assert!(ball.pos.x >= r && ball.pos.x <= FIELD.x - r);
        prop_assert!(ball.pos.y >= r && ball.pos.y <= FIELD.y - r);
    }

    #[test]
    fn brick_bounce_flips_exactly_one_axis(
        dx in -27.0f32..27.0,
        dy in -14.0f32..14.0,
        vx in -8.0f32..8.0,
        vy in -8.0f32..8.0,
    ) {
        let rect = brick();
        let mut ball = Ball::new(rect.center() + Vec2::new(dx, dy), Vec2::new(vx, vy), 8.0);
        prop_assume!(ball_rect_overlap(&ball, &rect));

        let before = ball.vel;
        let res = resolve_bounce(&mut ball, &rect, Target::Brick, FIELD);
        prop_assert!(res.mismatches <= 2);
        match res.axis {
            BounceAxis::Horizontal => {
                prop_assert_eq!(ball.vel.x, -before.x);
                prop_assert_eq!(ball.vel.y, before.y);
                prop_assert!(ball.pos.x == rect.left - 8.0 || ball.pos.x == rect.right() + 8.0);
            }
            BounceAxis::Vertical => {
                prop_assert_eq!(ball.vel.y, -before.y);
                prop_assert_eq!(ball.vel.x, before.x);
                prop_assert!(ball.pos.y == rect.top - 8.0 || ball.pos.y == rect.bottom() + 8.0);
            }
        }
        prop_assert_eq!(ball.vel.length(), before.length());
    }

    #[test]
    fn paddle_steering_stays_within_steer_speed(
        offset in 0.0f32..=1.0,
        steer in 0.5f32..5.0,
    ) {
        let paddle = Rect::new(100.0, 700.0, 50.0, 10.0);
        let mut ball = Ball::new(Vec2::new(100.0 + offset * 50.0, 695.0), Vec2::new(0.0, 6.0), 8.0);
        steer_off_paddle(&mut ball, &paddle, steer);
        prop_assert!(ball.vel.x.abs() <= steer + 1e-5);
        prop_assert_eq!(ball.vel.y, 6.0);
    }

    #[test]
    fn paddle_steering_is_monotonic(
        a in 0.0f32..=50.0,
        b in 0.0f32..=50.0,
    ) {
        let paddle = Rect::new(100.0, 700.0, 50.0, 10.0);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let mut left = Ball::new(Vec2::new(100.0 + lo, 695.0), Vec2::ZERO, 8.0);
        let mut right = Ball::new(Vec2::new(100.0 + hi, 695.0), Vec2::ZERO, 8.0);
        steer_off_paddle(&mut left, &paddle, 2.0);
        steer_off_paddle(&mut right, &paddle, 2.0);
        prop_assert!(left.vel.x <= right.vel.x + 1e-5);
    }
}

#[test]
fn paddle_steering_endpoints() {
    let paddle = Rect::new(100.0, 700.0, 50.0, 10.0);
    let steer = |x: f32| {
        let mut ball = Ball::new(Vec2::new(x, 695.0), Vec2::new(0.0, 6.0), 8.0);
        steer_off_paddle(&mut ball, &paddle, 2.0);
        ball.vel.x
    };
    assert_eq!(steer(100.0), -2.0);
    assert!(steer(125.0).abs() < 1e-5);
    assert!((steer(150.0) - 2.0).abs() < 1e-5);
}
