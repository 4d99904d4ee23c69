//! Match state and entity types
//!
//! Everything a single match owns lives here: both paddles, the ball, the
//! score, the explosion pool, the light-source snapshot, and the match RNG.
//! One `Pcg32` seeded at construction is the only source of randomness, so
//! a match replays identically from its seed.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::particle::Particle;
use super::rect::Rect;
use crate::Color;
use crate::consts::*;

/// Opponent control mode, chosen in the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Second player on the arrow keys
    TwoPlayer,
    /// Opponent paddle tracks the ball at reduced speed
    VsComputer,
}

/// Which side of the field scored or won
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    /// Index into the score array
    pub fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Opponent => 1,
        }
    }
}

/// The ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub rect: Rect,
    pub vel: Vec2,
    pub color: Color,
    /// Center snapshot taken once per tick, consumed by the lighting pass
    pub light_pos: Vec2,
    /// Fixed-capacity FIFO of positional trail markers, oldest evicted first
    pub trail: VecDeque<Particle>,
}

impl Ball {
    pub fn new(rng: &mut Pcg32) -> Self {
        let mut ball = Self {
            rect: Rect::new(0.0, 0.0, BALL_SIZE, BALL_SIZE),
            vel: Vec2::ZERO,
            color: Color::random(rng),
            light_pos: Vec2::ZERO,
            trail: VecDeque::with_capacity(TRAIL_LENGTH),
        };
        ball.reset(rng);
        ball
    }

    /// Re-center and relaunch. The launch angle is ±MAX_ANGLE with an
    /// independently random horizontal sign; bounded away from vertical, the
    /// horizontal component can never be zero and the ball cannot stall.
    /// Clears the trail. The color is untouched (only paddle hits re-roll it).
    pub fn reset(&mut self, rng: &mut Pcg32) {
        self.rect = Rect::centered(
            Vec2::new(WIDTH as f32 / 2.0, HEIGHT as f32 / 2.0),
            BALL_SIZE,
            BALL_SIZE,
        );
        let angle = MAX_ANGLE.to_radians() * if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let dir = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.vel = Vec2::new(BALL_SPEED * angle.cos() * dir, BALL_SPEED * angle.sin());
        self.trail.clear();
    }

    /// Euler position step, light snapshot, trail maintenance
    pub fn update(&mut self, rng: &mut Pcg32) {
        self.rect.x += self.vel.x;
        self.rect.y += self.vel.y;
        self.light_pos = self.rect.center();

        if self.trail.len() == TRAIL_LENGTH {
            self.trail.pop_front();
        }
        self.trail
            .push_back(Particle::spawn(self.rect.center(), self.color, rng));
    }
}

/// A player or AI paddle. Moves only vertically.
#[derive(Debug, Clone)]
pub struct Paddle {
    pub rect: Rect,
    pub color: Color,
    /// Movement sparks; unbounded but culled by lifetime every tick
    pub sparks: Vec<Particle>,
}

impl Paddle {
    /// New paddle at horizontal position `x`, vertically centered
    pub fn new(x: f32, rng: &mut Pcg32) -> Self {
        Self {
            rect: Rect::new(
                x,
                HEIGHT as f32 / 2.0 - PADDLE_HEIGHT / 2.0,
                PADDLE_WIDTH,
                PADDLE_HEIGHT,
            ),
            color: Color::random(rng),
            sparks: Vec::new(),
        }
    }

    /// Apply a vertical displacement, clamp into the safe band, and emit
    /// sparks at the paddle center while moving
    pub fn update(&mut self, dy: f32, rng: &mut Pcg32) {
        self.rect.y = (self.rect.y + dy).clamp(PADDLE_MARGIN, Self::max_y());
        if dy != 0.0 {
            for _ in 0..PADDLE_SPARKS_PER_TICK {
                self.sparks
                    .push(Particle::spawn(self.rect.center(), self.color, rng));
            }
        }
    }

    /// Lowest y the paddle top may reach (bottom margin mirrors the top one)
    pub fn max_y() -> f32 {
        HEIGHT as f32 - PADDLE_MARGIN - PADDLE_HEIGHT
    }
}

/// Complete per-match state, owned by the frame loop
#[derive(Debug, Clone)]
pub struct MatchState {
    pub mode: Mode,
    pub target_score: u32,
    pub player: Paddle,
    pub opponent: Paddle,
    pub ball: Ball,
    /// score[0] is the player (left side), score[1] the opponent (right side)
    pub score: [u32; 2],
    /// Explosion pool; unbounded, culled by lifetime
    pub explosion: Vec<Particle>,
    /// Per-frame light sources: ball, player center, opponent center
    pub lights: [Vec2; 3],
    pub running: bool,
    pub winner: Option<Side>,
    /// Seed this match was created from, kept for logging/reproduction
    pub seed: u64,
    pub rng: Pcg32,
}

impl MatchState {
    pub fn new(mode: Mode, target_score: u32, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let player = Paddle::new(PADDLE_INSET, &mut rng);
        let opponent = Paddle::new(WIDTH as f32 - PADDLE_INSET - PADDLE_WIDTH, &mut rng);
        let ball = Ball::new(&mut rng);
        let lights = [
            ball.rect.center(),
            player.rect.center(),
            opponent.rect.center(),
        ];
        Self {
            mode,
            target_score,
            player,
            opponent,
            ball,
            score: [0, 0],
            explosion: Vec::new(),
            lights,
            running: true,
            winner: None,
            seed,
            rng,
        }
    }

    /// Spawn a fixed-size particle burst at `pos`
    pub fn spawn_explosion(&mut self, pos: Vec2, color: Color) {
        for _ in 0..EXPLOSION_PARTICLES {
            self.explosion.push(Particle::spawn(pos, color, &mut self.rng));
        }
    }
}
