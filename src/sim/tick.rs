//! Per-frame match update
//!
//! One call advances the match by exactly one frame, in a fixed step order
//! that later steps depend on: input, opponent (keys or AI), ball motion,
//! collisions, scoring, win check, particle aging, light snapshot.
//! Drawing happens afterwards in the renderer; the sim never draws.

use super::state::{MatchState, Mode, Side};
use crate::Color;
use crate::consts::*;
use crate::sim::Particle;

/// Held directional keys for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub player_up: bool,
    pub player_down: bool,
    pub opponent_up: bool,
    pub opponent_down: bool,
}

/// Displacement for a pair of held keys; both or neither cancel out
fn paddle_delta(up: bool, down: bool) -> f32 {
    match (up, down) {
        (true, false) => -PLAYER_SPEED,
        (false, true) => PLAYER_SPEED,
        _ => 0.0,
    }
}

/// Advance the match by one frame
pub fn tick(state: &mut MatchState, input: &TickInput) {
    if !state.running {
        return;
    }

    // 1. Player paddle
    let dy = paddle_delta(input.player_up, input.player_down);
    state.player.update(dy, &mut state.rng);

    // 2. Opponent paddle
    match state.mode {
        Mode::TwoPlayer => {
            let dy = paddle_delta(input.opponent_up, input.opponent_down);
            state.opponent.update(dy, &mut state.rng);
        }
        Mode::VsComputer => drive_ai(state),
    }

    // 3. Ball motion
    state.ball.update(&mut state.rng);

    // 4a. Paddle collision: reverse and amplify horizontal speed (uncapped),
    // re-roll the ball color, burst at the impact point
    if state.ball.rect.intersects(&state.player.rect)
        || state.ball.rect.intersects(&state.opponent.rect)
    {
        state.ball.vel.x *= -PADDLE_BOOST;
        state.ball.color = Color::random(&mut state.rng);
        let (pos, color) = (state.ball.rect.center(), state.ball.color);
        state.spawn_explosion(pos, color);
    }

    // 4b. Top/bottom walls: vertical reflection only. May fire in the same
    // tick as a paddle hit.
    if state.ball.rect.top() <= 0.0 || state.ball.rect.bottom() >= HEIGHT as f32 {
        state.ball.vel.y = -state.ball.vel.y;
    }

    // 5. Scoring. The reset overrides any velocity set by step 4.
    if state.ball.rect.left() <= 0.0 {
        state.score[Side::Opponent.index()] += 1;
        state.ball.reset(&mut state.rng);
    }
    if state.ball.rect.right() >= WIDTH as f32 {
        state.score[Side::Player.index()] += 1;
        state.ball.reset(&mut state.rng);
    }

    // 6. Win check. The caller finishes this frame's draw before tearing the
    // match down.
    if state.score[Side::Player.index()] >= state.target_score {
        finish(state, Side::Player);
    } else if state.score[Side::Opponent.index()] >= state.target_score {
        finish(state, Side::Opponent);
    }

    // 7. Particle aging, culled in place
    age_particles(&mut state.explosion);
    age_particles(&mut state.player.sparks);
    age_particles(&mut state.opponent.sparks);

    // 8. Light source snapshot
    state.lights = [
        state.ball.light_pos,
        state.player.rect.center(),
        state.opponent.rect.center(),
    ];
}

fn finish(state: &mut MatchState, winner: Side) {
    state.running = false;
    state.winner = Some(winner);
    log::info!(
        "match over: {:?} wins {} - {}",
        winner,
        state.score[0],
        state.score[1]
    );
}

fn age_particles(pool: &mut Vec<Particle>) {
    for p in pool.iter_mut() {
        p.update();
    }
    pool.retain(Particle::alive);
}

/// Follow the ball's vertical center at reduced speed. Deliberately no dead
/// zone: the paddle oscillates by one step around exact alignment.
fn drive_ai(state: &mut MatchState) {
    let paddle_mid = state.opponent.rect.center().y;
    let ball_mid = state.ball.rect.center().y;
    let speed = PLAYER_SPEED * AI_SPEED_FACTOR;
    let dy = if paddle_mid < ball_mid {
        speed
    } else if paddle_mid > ball_mid {
        -speed
    } else {
        0.0
    };
    state.opponent.update(dy, &mut state.rng);
}
