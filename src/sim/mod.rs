//! Frame-stepped simulation module
//!
//! All gameplay logic lives here:
//! - One tick per rendered frame, no sub-frame collision sweeps
//! - Stable brick iteration order (top row first, left to right)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{BounceAxis, Resolution, Target, ball_rect_overlap, resolve_bounce};
pub use rect::Rect;
pub use state::{Ball, Brick, GameEvent, GameMode, GamePhase, Paddle, PowerupKind, Session};
pub use tick::{TickInput, advance_round, apply_powerup, roll_powerup, tick};
