//! Per-frame simulation tick
//!
//! One call advances the session by one rendered frame: move the paddle,
//! move every ball, bounce off the paddle and at most one brick per ball,
//! roll powerups, then check for a cleared round or an empty roster.

use glam::Vec2;
use rand::Rng;

use super::collision::{Target, ball_rect_overlap, resolve_bounce};
use super::state::{Ball, GameEvent, GamePhase, PowerupKind, Session};
use crate::error::Result;
use crate::levels::LevelSource;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Paddle left key held
    pub left: bool,
    /// Paddle right key held
    pub right: bool,
    /// Launch the served ball
    pub launch: bool,
    /// Pause toggle
    pub pause: bool,
    /// Autoplay - the paddle chases the lowest ball and serves on its own
    pub autoplay: bool,
}

/// Advance the session by one tick
///
/// Only fails when the next round's level cannot be loaded.
pub fn tick(
    session: &mut Session,
    input: &TickInput,
    levels: &dyn LevelSource,
) -> Result<Vec<GameEvent>> {
    let mut events = Vec::new();

    // Handle pause toggle
    if input.pause {
        match session.phase {
            GamePhase::Playing | GamePhase::Serve => {
                session.phase = GamePhase::Paused;
                return Ok(events);
            }
            GamePhase::Paused => {
                session.phase = if session.balls.iter().all(|b| b.vel == Vec2::ZERO) {
                    GamePhase::Serve
                } else {
                    GamePhase::Playing
                };
            }
            _ => {}
        }
    }

    match session.phase {
        GamePhase::Paused | GamePhase::Won | GamePhase::Lost => return Ok(events),
        _ => {}
    }

    let screen_width = session.settings.screen_width;
    if input.autoplay {
        match lowest_ball_x(&session.balls) {
            Some(x) => session.paddle.track(x, screen_width),
            None => session.paddle.move_by(input.left, input.right, screen_width),
        }
    } else {
        session.paddle.move_by(input.left, input.right, screen_width);
    }

    match session.phase {
        GamePhase::Serve => {
            let radius = session.settings.ball_radius;
            let rest = session.paddle.serve_position(radius);
            if let Some(ball) = session.balls.first_mut() {
                ball.pos = rest;
                ball.vel = Vec2::ZERO;
                if input.launch || input.autoplay {
                    ball.vel = Vec2::new(0.0, -session.settings.ball_speed);
                    session.phase = GamePhase::Playing;
                    events.push(GameEvent::Launched);
                }
            }
        }

        GamePhase::Playing => {
            step_balls(session, &mut events);

            if session.score >= session.target_score {
                advance_round(session, levels, &mut events)?;
            } else if session.balls.is_empty() {
                session.phase = GamePhase::Lost;
                log::info!(
                    "Out of balls in round {} with total score {}",
                    session.round,
                    session.total_score
                );
                events.push(GameEvent::Defeat {
                    total_score: session.total_score,
                });
            }
        }

        _ => {}
    }

    Ok(events)
}

/// Move every ball and resolve its collisions for this tick
fn step_balls(session: &mut Session, events: &mut Vec<GameEvent>) {
    let field = session.field();
    let paddle_rect = session.paddle.rect();
    let paddle_target = Target::Paddle {
        steer_speed: session.settings.paddle_steer_speed,
    };
    let chance = session.settings.powerup_chance;

    // Collect powerups to apply (deferred so new balls start moving next tick)
    let mut powerups: Vec<PowerupKind> = Vec::new();

    let mut lost = 0usize;
    session.balls.retain_mut(|ball| {
        ball.integrate(field);

        if ball.is_lost(field) {
            lost += 1;
            return false;
        }

        if ball_rect_overlap(ball, &paddle_rect) {
            resolve_bounce(ball, &paddle_rect, paddle_target, field);
            events.push(GameEvent::PaddleHit);
        }

        // First overlapping brick wins; the rest wait for a later tick
        if let Some(index) = session
            .bricks
            .iter()
            .position(|brick| ball_rect_overlap(ball, &brick.rect))
        {
            let brick = session.bricks.remove(index);
            resolve_bounce(ball, &brick.rect, Target::Brick, field);
            session.score += 1;
            session.total_score += 1;
            events.push(GameEvent::BrickHit { color: brick.color });
            log::debug!("Brick {:?} destroyed, round score {}", brick.rect, session.score);

            if let Some(kind) = roll_powerup(&mut session.rng, chance) {
                powerups.push(kind);
            }
        }

        true
    });

    for _ in 0..lost {
        events.push(GameEvent::BallLost);
    }

    for kind in powerups {
        apply_powerup(session, kind);
        events.push(GameEvent::Powerup(kind));
    }
}

/// Roll for a powerup: `chance` in ten, then an even pick between the kinds
pub fn roll_powerup<R: Rng + ?Sized>(rng: &mut R, chance: u32) -> Option<PowerupKind> {
    if rng.random_range(0..10) >= chance {
        return None;
    }
    if rng.random_bool(0.5) {
        Some(PowerupKind::ExtraBall)
    } else {
        Some(PowerupKind::LongPaddle)
    }
}

/// Apply a powerup to the session
pub fn apply_powerup(session: &mut Session, kind: PowerupKind) {
    let settings = &session.settings;
    match kind {
        PowerupKind::ExtraBall => {
            let radius = settings.ball_radius;
            let center = session.paddle.center();
            let pos = Vec2::new(center.x, center.y - session.paddle.height / 2.0 - radius);
            let vel = Vec2::new(0.0, -settings.ball_speed);
            session.balls.push(Ball::new(pos, vel, radius));
            log::debug!("Extra ball, {} in play", session.balls.len());
        }
        PowerupKind::LongPaddle => {
            session.paddle.grow(
                settings.paddle_growth,
                settings.paddle_max_width(),
                settings.screen_width,
            );
            log::debug!("Long paddle, width {}", session.paddle.width);
        }
    }
}

/// Move on after a cleared round: reset the paddle and score, keep a single
/// ball for the serve, and load the next layout (or finish the run)
pub fn advance_round(
    session: &mut Session,
    levels: &dyn LevelSource,
    events: &mut Vec<GameEvent>,
) -> Result<()> {
    let cleared = session.round;
    events.push(GameEvent::RoundCleared { round: cleared });

    session.paddle.reset(&session.settings);
    session.score = 0;
    session.round += 1;
    session.phase = GamePhase::Serve;

    session.balls.truncate(1);
    if session.balls.is_empty() {
        // Last ball dropped on the clearing tick; serve a fresh one
        let ball = session.serve_ball();
        session.balls.push(ball);
    }
    if let Some(ball) = session.balls.first_mut() {
        ball.vel = Vec2::ZERO;
    }

    if session.round > session.settings.round_count {
        session.phase = GamePhase::Won;
        log::info!("All rounds cleared, total score {}", session.total_score);
        events.push(GameEvent::Victory {
            total_score: session.total_score,
        });
        return Ok(());
    }

    session.load_round(levels)?;
    log::info!(
        "Round {} cleared; round {} has {} bricks, target {}",
        cleared,
        session.round,
        session.bricks.len(),
        session.target_score
    );
    Ok(())
}

/// x of the ball nearest the floor
fn lowest_ball_x(balls: &[Ball]) -> Option<f32> {
    balls
        .iter()
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|b| b.pos.x)
}
