//! Game tuning
//!
//! Every value has a default matching `consts`; a JSON file may override any
//! subset of them.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Data-driven gameplay parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Ticks per second the host loop should drive the simulation at
    pub tick_rate: u32,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_speed: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    pub paddle_growth: f32,
    /// Horizontal speed given to a ball leaving either paddle edge
    pub paddle_steer_speed: f32,

    // === Levels ===
    pub grid_columns: usize,
    pub max_level_rows: usize,
    pub round_count: u32,
    pub round_target_step: u32,

    // === Powerups ===
    /// Chance out of ten that a destroyed brick yields a powerup
    pub powerup_chance: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            tick_rate: TICK_RATE,

            ball_radius: BALL_RADIUS,
            ball_speed: BALL_SPEED,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            paddle_growth: PADDLE_GROWTH,
            paddle_steer_speed: PADDLE_STEER_SPEED,

            grid_columns: GRID_COLUMNS,
            max_level_rows: MAX_LEVEL_ROWS,
            round_count: ROUND_COUNT,
            round_target_step: ROUND_TARGET_STEP,

            powerup_chance: POWERUP_CHANCE,
        }
    }
}

impl Settings {
    /// Playfield size as a vector (width, height)
    #[inline]
    pub fn screen_size(&self) -> Vec2 {
        Vec2::new(self.screen_width, self.screen_height)
    }

    /// Width of one brick grid cell
    pub fn cell_width(&self) -> f32 {
        self.screen_width / self.grid_columns as f32
    }

    /// Height of one brick grid cell (a third of its width)
    pub fn cell_height(&self) -> f32 {
        self.cell_width() / 3.0
    }

    /// Left edge of a default-width paddle centered on the screen
    pub fn paddle_home_x(&self) -> f32 {
        (self.screen_width - self.paddle_width) / 2.0
    }

    /// Top edge of the paddle
    pub fn paddle_y(&self) -> f32 {
        self.screen_height * 15.0 / 16.0
    }

    /// Widest the paddle may grow
    pub fn paddle_max_width(&self) -> f32 {
        self.screen_width / 2.0
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let mut problems: Vec<String> = Vec::new();

        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("ball_radius", self.ball_radius),
            ("ball_speed", self.ball_speed),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                problems.push(format!("{name} must be > 0 (got {value})"));
            }
        }
        for (name, value) in [
            ("paddle_growth", self.paddle_growth),
            ("paddle_steer_speed", self.paddle_steer_speed),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                problems.push(format!("{name} must be >= 0 (got {value})"));
            }
        }

        if self.paddle_width > self.paddle_max_width() {
            problems.push(format!(
                "paddle_width {} wider than half the screen",
                self.paddle_width
            ));
        }
        if self.ball_radius * 2.0 >= self.screen_width.min(self.screen_height) {
            problems.push(format!(
                "ball_radius {} does not fit the playfield",
                self.ball_radius
            ));
        }
        if self.grid_columns == 0 {
            problems.push("grid_columns must be > 0".into());
        }
        if self.max_level_rows == 0 {
            problems.push("max_level_rows must be > 0".into());
        }
        if self.tick_rate == 0 {
            problems.push("tick_rate must be > 0".into());
        }
        if self.round_count == 0 {
            problems.push("round_count must be > 0".into());
        }
        if self.powerup_chance > 10 {
            problems.push(format!(
                "powerup_chance {} is out of ten",
                self.powerup_chance
            ));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidSettings(problems.join("; ")))
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file, falling back to defaults if it is missing
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(json) => {
                let settings = Self::from_json(&json)?;
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::warn!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved");
        Ok(())
    }
}
