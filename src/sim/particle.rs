//! Transient glowing particles
//!
//! Used three ways: as the ball's positional trail (never aged, only
//! evicted), as paddle movement sparks, and as paddle-hit explosions.

use glam::Vec2;
use rand::Rng;

use crate::Color;
use crate::consts::*;

/// A short-lived point light / spark
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    /// Remaining lifetime; drops by PARTICLE_DECAY per update
    pub lifetime: i32,
}

impl Particle {
    /// Spawn at `pos` with a random drift velocity
    pub fn spawn(pos: Vec2, color: Color, rng: &mut impl Rng) -> Self {
        Self {
            pos,
            vel: Vec2::new(
                rng.random_range(-PARTICLE_MAX_SPEED..PARTICLE_MAX_SPEED),
                rng.random_range(-PARTICLE_MAX_SPEED..PARTICLE_MAX_SPEED),
            ),
            color,
            lifetime: PARTICLE_LIFETIME,
        }
    }

    /// Advance position, decay lifetime, damp velocity
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.lifetime -= PARTICLE_DECAY;
        self.vel *= PARTICLE_DAMPING;
    }

    /// Drawn radius; at or below zero the particle is invisible
    pub fn radius(&self) -> i32 {
        self.lifetime / PARTICLE_RADIUS_SCALE
    }

    /// Draw alpha equals the remaining lifetime
    pub fn alpha(&self) -> u8 {
        self.lifetime.clamp(0, 255) as u8
    }

    /// Dead particles are culled from their owning pool
    pub fn alive(&self) -> bool {
        self.lifetime > 0
    }
}
