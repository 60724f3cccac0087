//! Fixed-cadence simulation tick
//!
//! Advances the runner by one frame. Order while Running:
//! speed ramp → day/night → spawns → player physics → entity updates →
//! collisions → score → milestones.

use thiserror::Error;

use super::entities::{Frame, Pickup, advance_all, update_pickups};
use super::particles::Effect;
use super::physics::{self, Impact};
use super::state::{Cue, GamePhase, GameState};
use crate::consts::*;

/// Something went wrong inside a tick. Caught by the session, never fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimFault {
    #[error("non-finite {what} after tick {tick}")]
    NonFinite { what: &'static str, tick: u64 },
    #[error("internal invariant broken: {0}")]
    Invariant(String),
}

/// Advance the game state by one tick.
///
/// `dt` is a hint in seconds and only drives the day/night cycle; gameplay
/// runs on the fixed `FRAME_MS` clock.
pub fn tick(state: &mut GameState, dt: f32) -> Result<(), SimFault> {
    // Nothing moves unless running
    if state.phase != GamePhase::Running {
        return Ok(());
    }

    state.ticks += 1;
    state.clock_ms += FRAME_MS;
    let now = state.clock_ms;

    // Speed: ease toward the distance-driven target, plus a gentle wobble
    let target = state.target_speed();
    state.cruise += (target - state.cruise) * SPEED_SMOOTHING;
    state.cruise = state.cruise.clamp(MIN_SPEED, MAX_SPEED);
    let wobble = SPEED_WOBBLE * (state.ticks as f32 * 0.05).sin();
    state.speed = (state.cruise + wobble).clamp(MIN_SPEED, MAX_SPEED);

    // Day/night
    let dt = if dt.is_finite() && dt > 0.0 { dt.min(0.25) } else { FRAME_SECS };
    state.time_of_day = (state.time_of_day + dt / DAY_LENGTH_SECS).fract();

    // Expire timed effects
    if state.slowmo.is_some_and(|t| t.done(now)) {
        state.slowmo = None;
    }
    if state.banner.as_ref().is_some_and(|b| b.timer.done(now)) {
        state.banner = None;
    }
    if state.player.invulnerable.is_some_and(|t| t.done(now)) {
        state.player.invulnerable = None;
    }

    // Spawning
    let plan = state.poll_spawner();
    state.apply_spawns(&plan);
    state.recycle_ground();

    // Player physics
    let scale = state.speed_scale();
    let step = physics::step_player(&mut state.player, scale);
    if step.landed {
        state.push_cue(Cue::Land);
        let feet = state.player.feet();
        state.emit(Effect::LandDust, feet);
    }

    // Entities
    let speed = state.effective_speed();
    let frame = Frame {
        now,
        speed,
        player: state.player.hitbox(),
    };
    let mut picked = Vec::new();
    update_pickups(&mut state.coins, &frame, &mut picked);
    update_pickups(&mut state.power_ups, &frame, &mut picked);
    advance_all(&mut state.obstacles, &frame);
    advance_all(&mut state.clouds, &frame);
    advance_all(&mut state.ground, &frame);
    state.particles.update(now);

    for (pickup, at) in picked {
        match pickup {
            Pickup::Coin => {
                state.score += COIN_VALUE;
                state.push_cue(Cue::Coin);
                state.emit(Effect::CoinSparks, at);
                log::debug!("Coin collected, score {}", state.score);
            }
            Pickup::PowerUp(kind) => state.apply_power_up(kind, at),
        }
    }

    // Collisions
    let impacts = physics::resolve_collisions(&mut state.player, &mut state.obstacles, now);
    let mut fatal = false;
    for impact in impacts {
        match impact {
            Impact::Absorbed { index } => {
                let at = state.obstacles[index].pos;
                state.push_cue(Cue::ShieldBreak);
                state.emit(Effect::ShieldSpark, at);
                log::debug!("Shield absorbed a hit");
            }
            Impact::Fatal { .. } => fatal = true,
        }
    }
    state.obstacles.retain(|o| !o.dead);
    if fatal {
        state.game_over();
        return validate(state);
    }

    // Score and distance
    state.distance += speed;
    state.score += (speed * SCORE_RATE).floor() as u64;
    while state.score >= state.next_milestone() {
        state.push_cue(Cue::Milestone);
        state.advance_milestone();
    }
    state.announce_record();

    validate(state)
}

/// Reject states that would poison every later tick
fn validate(state: &GameState) -> Result<(), SimFault> {
    let tick = state.ticks;
    let player = &state.player;
    if !(player.pos.is_finite() && player.vel_y.is_finite()) {
        return Err(SimFault::NonFinite {
            what: "player position",
            tick,
        });
    }
    if !(state.speed.is_finite() && state.distance.is_finite()) {
        return Err(SimFault::NonFinite { what: "speed", tick });
    }
    if !(MIN_SPEED..=MAX_SPEED).contains(&state.speed) {
        return Err(SimFault::Invariant(format!(
            "speed {} outside [{}, {}]",
            state.speed, MIN_SPEED, MAX_SPEED
        )));
    }
    if state.obstacles.iter().any(|o| !o.pos.is_finite()) {
        return Err(SimFault::NonFinite {
            what: "obstacle position",
            tick,
        });
    }
    Ok(())
}
