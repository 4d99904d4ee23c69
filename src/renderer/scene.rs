//! Match frame composition
//!
//! The draw order is fixed: background, paddles with their sparks, ball
//! trail and body, lighting composite, explosion particles, score text.
//! The lighting multiply runs before the explosion and score overlays so
//! those stay fully visible no matter where the lights are.

use super::frame::Frame;
use super::lighting::{FalloffTexture, LightOverlay};
use super::text;
use crate::Color;
use crate::consts::*;
use crate::sim::{Ball, MatchState, Paddle, Particle};

/// Score text color
const SCORE_COLOR: Color = Color::new(200, 200, 200);
const SCORE_SCALE: i32 = 6;

/// Owns the reusable compositing buffers; one per window
pub struct SceneRenderer {
    falloff: FalloffTexture,
    overlay: LightOverlay,
}

impl SceneRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            falloff: FalloffTexture::new(LIGHT_RADIUS),
            overlay: LightOverlay::new(width, height),
        }
    }

    /// Rasterize one match frame
    pub fn render(&mut self, frame: &mut Frame, state: &MatchState) {
        frame.clear(BACKGROUND);

        draw_paddle(frame, &state.player);
        draw_paddle(frame, &state.opponent);
        draw_ball(frame, &state.ball);

        self.overlay.accumulate(&self.falloff, &state.lights);
        self.overlay.apply(frame);

        for p in &state.explosion {
            draw_particle(frame, p);
        }

        let score = format!("{}  {}", state.score[0], state.score[1]);
        text::draw_text_centered(frame, &score, WIDTH as i32 / 2, 20, SCORE_SCALE, SCORE_COLOR);
    }
}

/// Skipped entirely once the lifetime-derived radius reaches zero
fn draw_particle(frame: &mut Frame, p: &Particle) {
    let radius = p.radius();
    if radius <= 0 {
        return;
    }
    frame.fill_circle_blend(p.pos.x as i32, p.pos.y as i32, radius, p.color, p.alpha());
}

fn draw_paddle(frame: &mut Frame, paddle: &Paddle) {
    frame.fill_rounded_rect(
        paddle.rect.x as i32,
        paddle.rect.y as i32,
        paddle.rect.w as i32,
        paddle.rect.h as i32,
        PADDLE_CORNER_RADIUS,
        paddle.color,
    );
    for p in &paddle.sparks {
        draw_particle(frame, p);
    }
}

/// Trail first, then the body on top of it
fn draw_ball(frame: &mut Frame, ball: &Ball) {
    for p in &ball.trail {
        draw_particle(frame, p);
    }
    let c = ball.rect.center();
    frame.fill_circle(c.x as i32, c.y as i32, (BALL_SIZE / 2.0) as i32, ball.color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Mode;
    use glam::Vec2;

    #[test]
    fn test_render_lights_the_bodies() {
        let mut renderer = SceneRenderer::new(WIDTH, HEIGHT);
        let mut frame = Frame::new(WIDTH, HEIGHT);
        let state = MatchState::new(Mode::TwoPlayer, 5, 3);

        renderer.render(&mut frame, &state);

        // The ball sits at a light source, so its body keeps its color
        let c = state.ball.rect.center();
        let px = frame.get_pixel(c.x as i32, c.y as i32).unwrap();
        assert_eq!(px, (state.ball.color.r, state.ball.color.g, state.ball.color.b));
    }

    #[test]
    fn test_render_darkens_far_corners() {
        let mut renderer = SceneRenderer::new(WIDTH, HEIGHT);
        let mut frame = Frame::new(WIDTH, HEIGHT);
        let mut state = MatchState::new(Mode::TwoPlayer, 5, 3);
        // Pull every light toward the center so the corners go dark
        state.lights = [Vec2::new(600.0, 400.0); 3];

        renderer.render(&mut frame, &state);

        assert_eq!(frame.get_pixel(2, HEIGHT as i32 - 2), Some((0, 0, 0)));
    }

    #[test]
    fn test_dead_particle_draws_nothing() {
        let mut frame = Frame::new(64, 64);
        frame.clear(Color::new(0, 0, 0));
        let mut state = MatchState::new(Mode::TwoPlayer, 5, 3);
        state.spawn_explosion(Vec2::new(32.0, 32.0), Color::WHITE);
        for p in state.explosion.iter_mut() {
            p.lifetime = 0;
        }
        for p in &state.explosion {
            draw_particle(&mut frame, p);
        }
        assert_eq!(frame.get_pixel(32, 32), Some((0, 0, 0)));
    }

    #[test]
    fn test_explosions_survive_the_light_mask() {
        let mut renderer = SceneRenderer::new(WIDTH, HEIGHT);
        let mut frame = Frame::new(WIDTH, HEIGHT);
        let mut state = MatchState::new(Mode::TwoPlayer, 5, 3);
        // Lights far away from a white burst in the bottom-left corner
        state.lights = [Vec2::new(1100.0, 100.0); 3];
        state.spawn_explosion(Vec2::new(100.0, 700.0), Color::WHITE);
        for p in state.explosion.iter_mut() {
            p.vel = Vec2::ZERO;
            p.pos = Vec2::new(100.0, 700.0);
        }

        renderer.render(&mut frame, &state);

        // Drawn after the multiply pass: still visible in an unlit region
        assert_ne!(frame.get_pixel(100, 700), Some((0, 0, 0)));
    }
}
