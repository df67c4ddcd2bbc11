//! Brick Breaker - a paddle-and-ball arcade game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (ball, paddle, bricks, bounce resolution)
//! - `levels`: Level grids, map files and random layouts
//! - `highscores`: Endless-mode leaderboard
//! - `settings`: Data-driven game tuning
//! - `app`: Screen state machine driving a play session

pub mod app;
pub mod error;
pub mod highscores;
pub mod levels;
pub mod settings;
pub mod sim;

pub use app::{App, MenuAction, Screen};
pub use error::{Error, Result};
pub use highscores::HighScores;
pub use settings::Settings;

/// Default game configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 400.0;
    pub const SCREEN_HEIGHT: f32 = 750.0;

    /// Simulation ticks per second (one tick per rendered frame)
    pub const TICK_RATE: u32 = 60;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Units per tick
    pub const BALL_SPEED: f32 = 6.0;
    pub const BALL_COLOR: [u8; 3] = [255, 0, 0];

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 50.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    pub const PADDLE_SPEED: f32 = 5.0;
    /// Width added by a "long platform" powerup
    pub const PADDLE_GROWTH: f32 = 5.0;
    /// Horizontal launch speed at the paddle's extreme edges
    pub const PADDLE_STEER_SPEED: f32 = 2.0;

    /// Brick grid
    pub const GRID_COLUMNS: usize = 8;
    pub const MAX_LEVEL_ROWS: usize = 24;

    /// Powerup roll, out of ten
    pub const POWERUP_CHANCE: u32 = 4;

    /// Standard-level target grows by this much each round
    pub const ROUND_TARGET_STEP: u32 = 8;
    /// Rounds to clear for a win
    pub const ROUND_COUNT: u32 = 10;
}

/// Sign of a value as -1, 0 or +1
#[inline]
pub fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Which side of `pivot` a coordinate lies on; exactly on the pivot counts as -1
#[inline]
pub fn side_of(v: f32, pivot: f32) -> f32 {
    if v > pivot { 1.0 } else { -1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign() {
        assert_eq!(sign(3.5), 1.0);
        assert_eq!(sign(-0.1), -1.0);
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
    }

    #[test]
    fn test_side_of_ties_negative() {
        assert_eq!(side_of(100.0, 100.0), -1.0);
        assert_eq!(side_of(99.0, 100.0), -1.0);
        assert_eq!(side_of(101.0, 100.0), 1.0);
    }
}
