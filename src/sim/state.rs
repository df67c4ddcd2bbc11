//! Game state and core simulation types
//!
//! A `Session` owns everything that changes during play: the paddle, the ball
//! roster, the active brick set and the score counters. Nothing else holds on
//! to these between ticks.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::BALL_COLOR;
use crate::error::Result;
use crate::levels::{LevelGrid, LevelKind, LevelSource};
use crate::settings::Settings;

/// Current phase of a play session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball resting on the paddle, waiting for launch input
    Serve,
    /// Round running
    Playing,
    /// Game is paused
    Paused,
    /// Final round cleared
    Won,
    /// Ball roster ran out
    Lost,
}

/// Where a session's brick layouts come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// The shipped level sequence
    Levels,
    /// A fresh random layout every round
    Endless,
    /// Player-authored levels
    Custom,
}

impl GameMode {
    /// Level files backing this mode, if any
    pub fn level_kind(&self) -> Option<LevelKind> {
        match self {
            GameMode::Levels => Some(LevelKind::Standard),
            GameMode::Custom => Some(LevelKind::Custom),
            GameMode::Endless => None,
        }
    }
}

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: [u8; 3],
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel,
            radius,
            color: BALL_COLOR,
        }
    }

    /// Bounding box, always centered on the ball's position
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::centered_square(self.pos, self.radius)
    }

    /// Advance one tick and bounce off the side walls and the ceiling.
    ///
    /// The floor is left open: a ball that drops through it is lost.
    pub fn integrate(&mut self, field: Vec2) {
        self.pos += self.vel;
        self.reflect_off_walls(field, false);
    }

    /// Place the ball directly, then bounce it back inside all four walls
    pub fn reposition(&mut self, pos: Vec2, field: Vec2) {
        self.pos = pos;
        self.reflect_off_walls(field, true);
    }

    /// Center has passed the bottom of the playfield
    pub fn is_lost(&self, field: Vec2) -> bool {
        self.pos.y > field.y
    }

    fn reflect_off_walls(&mut self, field: Vec2, floor: bool) {
        let r = self.radius;
        if self.pos.x - r < 0.0 {
            self.pos.x = r;
            self.vel.x = -self.vel.x;
        }
        if self.pos.x + r > field.x {
            self.pos.x = field.x - r;
            self.vel.x = -self.vel.x;
        }
        if self.pos.y - r < 0.0 {
            self.pos.y = r;
            self.vel.y = -self.vel.y;
        }
        if floor && self.pos.y + r > field.y {
            self.pos.y = field.y - r;
            self.vel.y = -self.vel.y;
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Horizontal movement per tick
    pub speed: f32,
}

impl Paddle {
    pub fn new(settings: &Settings) -> Self {
        Self {
            pos: Vec2::new(settings.paddle_home_x(), settings.paddle_y()),
            width: settings.paddle_width,
            height: settings.paddle_height,
            speed: settings.paddle_speed,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Where a served ball rests: centered, sitting on the paddle's top edge
    pub fn serve_position(&self, ball_radius: f32) -> Vec2 {
        Vec2::new(self.center().x, self.pos.y - ball_radius)
    }

    /// Shift by one step per held direction, then clamp to the screen
    pub fn move_by(&mut self, left: bool, right: bool, screen_width: f32) {
        if left {
            self.pos.x -= self.speed;
        }
        if right {
            self.pos.x += self.speed;
        }
        self.clamp(screen_width);
    }

    /// Step toward centering on `target_x`, no faster than the paddle speed
    pub fn track(&mut self, target_x: f32, screen_width: f32) {
        let delta = target_x - self.center().x;
        self.pos.x += delta.clamp(-self.speed, self.speed);
        self.clamp(screen_width);
    }

    /// Widen the paddle, never beyond `max_width`
    pub fn grow(&mut self, amount: f32, max_width: f32, screen_width: f32) {
        self.width = (self.width + amount).min(max_width);
        self.clamp(screen_width);
    }

    /// Default width and speed, centered; height on screen is kept
    pub fn reset(&mut self, settings: &Settings) {
        self.width = settings.paddle_width;
        self.speed = settings.paddle_speed;
        self.pos.x = settings.paddle_home_x();
    }

    fn clamp(&mut self, screen_width: f32) {
        if self.pos.x + self.width > screen_width {
            self.pos.x = screen_width - self.width;
        }
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
        }
    }
}

/// A brick: one hit destroys it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    /// Palette index 0-9
    pub color: u8,
}

/// Bonus rolled when a brick breaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    /// Another ball launched from the paddle
    ExtraBall,
    /// Wider paddle
    LongPaddle,
}

/// Things that happened during a tick, for audio/HUD collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Launched,
    PaddleHit,
    BrickHit { color: u8 },
    Powerup(PowerupKind),
    BallLost,
    RoundCleared { round: u32 },
    Victory { total_score: u64 },
    Defeat { total_score: u64 },
}

/// One play-through: from the first round until a win or a loss
#[derive(Debug, Clone)]
pub struct Session {
    pub settings: Settings,
    pub mode: GameMode,
    pub phase: GamePhase,
    /// Current round, 1-based
    pub round: u32,
    /// Bricks destroyed this round
    pub score: u32,
    /// Bricks destroyed this session
    pub total_score: u64,
    /// Round score needed to advance
    pub target_score: u32,
    pub paddle: Paddle,
    pub balls: Vec<Ball>,
    pub bricks: Vec<Brick>,
    pub(crate) rng: Pcg32,
}

impl Session {
    /// Start at round one, loading that round's bricks for `mode`
    pub fn start(
        mode: GameMode,
        settings: Settings,
        seed: u64,
        levels: &dyn LevelSource,
    ) -> Result<Self> {
        let mut session = Self::with_bricks(mode, settings, seed, Vec::new(), 0);
        session.load_round(levels)?;
        log::info!(
            "Session started: {:?}, {} bricks, target {}",
            mode,
            session.bricks.len(),
            session.target_score
        );
        Ok(session)
    }

    /// Start at round one with a given brick set and target
    pub fn with_bricks(
        mode: GameMode,
        settings: Settings,
        seed: u64,
        bricks: Vec<Brick>,
        target_score: u32,
    ) -> Self {
        let paddle = Paddle::new(&settings);
        let mut session = Self {
            settings,
            mode,
            phase: GamePhase::Serve,
            round: 1,
            score: 0,
            total_score: 0,
            target_score,
            paddle,
            balls: Vec::new(),
            bricks,
            rng: Pcg32::seed_from_u64(seed),
        };
        session.balls.push(session.serve_ball());
        session
    }

    /// Playfield size
    #[inline]
    pub fn field(&self) -> Vec2 {
        self.settings.screen_size()
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::Won | GamePhase::Lost)
    }

    /// A motionless ball resting on the paddle
    pub fn serve_ball(&self) -> Ball {
        let radius = self.settings.ball_radius;
        Ball::new(self.paddle.serve_position(radius), Vec2::ZERO, radius)
    }

    /// Populate bricks and the target score for the current round
    pub fn load_round(&mut self, levels: &dyn LevelSource) -> Result<()> {
        match self.mode.level_kind() {
            Some(kind) => {
                let grid = levels.load_grid(kind, self.round)?;
                self.bricks = grid.bricks(&self.settings);
                if kind == LevelKind::Standard {
                    self.target_score += self.settings.round_target_step;
                } else {
                    self.target_score = self.bricks.len() as u32;
                }
            }
            None => {
                let grid = LevelGrid::random(
                    &mut self.rng,
                    self.settings.grid_columns,
                    self.settings.max_level_rows,
                );
                self.bricks = grid.bricks(&self.settings);
                self.target_score = self.bricks.len() as u32;
            }
        }
        Ok(())
    }
}
