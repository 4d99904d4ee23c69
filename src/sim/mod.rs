//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per rendered frame
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod particle;
pub mod rect;
pub mod state;
pub mod tick;

pub use particle::Particle;
pub use rect::Rect;
pub use state::{Ball, MatchState, Mode, Paddle, Side};
pub use tick::{TickInput, tick};
