//! Plasma Pong - a two-paddle arcade game with dynamic lighting
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, match state)
//! - `renderer`: Software rasterizer and additive lighting compositor
//! - `ui`: Menu and winner-screen collaborators

pub mod renderer;
pub mod sim;
pub mod ui;

use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions in pixels
    pub const WIDTH: u32 = 1200;
    pub const HEIGHT: u32 = 800;
    /// Target frame rate; the simulation runs one tick per rendered frame
    pub const FPS: u32 = 60;

    /// Paddle speed in pixels per frame
    pub const PLAYER_SPEED: f32 = 8.0;
    /// AI paddle speed as a fraction of PLAYER_SPEED
    pub const AI_SPEED_FACTOR: f32 = 0.75;
    /// Ball launch speed in pixels per frame
    pub const BALL_SPEED: f32 = 10.0;
    /// Launch angle magnitude in degrees, bounded away from vertical so the
    /// horizontal velocity component is never zero
    pub const MAX_ANGLE: f32 = 60.0;
    /// Horizontal speed multiplier on each paddle hit (uncapped)
    pub const PADDLE_BOOST: f32 = 1.1;

    /// Ball rectangle size (constant)
    pub const BALL_SIZE: f32 = 30.0;
    /// Paddle rectangle size (constant)
    pub const PADDLE_WIDTH: f32 = 20.0;
    pub const PADDLE_HEIGHT: f32 = 120.0;
    /// Corner rounding radius when drawing paddles
    pub const PADDLE_CORNER_RADIUS: i32 = 10;
    /// Margin of the paddle safe band at the top and bottom of the field
    pub const PADDLE_MARGIN: f32 = 50.0;
    /// Horizontal inset of each paddle from its edge of the field
    pub const PADDLE_INSET: f32 = 50.0;

    /// Radius of the precomputed light falloff texture
    pub const LIGHT_RADIUS: u32 = 400;

    /// Initial particle lifetime
    pub const PARTICLE_LIFETIME: i32 = 255;
    /// Lifetime lost per update tick
    pub const PARTICLE_DECAY: i32 = 8;
    /// Velocity damping factor applied each update tick
    pub const PARTICLE_DAMPING: f32 = 0.9;
    /// Drawn particle radius is lifetime / PARTICLE_RADIUS_SCALE
    pub const PARTICLE_RADIUS_SCALE: i32 = 50;
    /// Particle spawn velocity range, uniform per axis in [-MAX, MAX]
    pub const PARTICLE_MAX_SPEED: f32 = 5.0;
    /// Particles spawned by a paddle-hit explosion
    pub const EXPLOSION_PARTICLES: usize = 100;
    /// Ball trail capacity (FIFO)
    pub const TRAIL_LENGTH: usize = 10;
    /// Sparks emitted per tick while a paddle is moving
    pub const PADDLE_SPARKS_PER_TICK: usize = 2;

    /// Background fill color
    pub const BACKGROUND: super::Color = super::Color::new(10, 10, 30);

    /// Default target score offered by the menu
    pub const DEFAULT_TARGET_SCORE: u32 = 5;
}

/// RGB color triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Roll a bright random color (each channel in 100..=255)
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            r: rng.random_range(100..=255),
            g: rng.random_range(100..=255),
            b: rng.random_range(100..=255),
        }
    }
}
