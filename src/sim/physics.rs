//! Player physics and obstacle collision
//!
//! Constant-gravity projectile model: `vel += g * scale`, `pos += vel`, then
//! clamp to the ground resting height for the current (standing/ducking)
//! profile.

use super::entities::{Collidable, Obstacle, Player};
use super::timer::Timer;
use crate::consts::*;

/// Outcome of one gravity step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepResult {
    /// Airborne → grounded with a real downward speed
    pub landed: bool,
}

/// Integrate gravity and clamp to the ground
pub fn step_player(player: &mut Player, speed_scale: f32) -> StepResult {
    let was_airborne = !player.on_ground;

    player.vel_y += GRAVITY * speed_scale;
    player.pos.y += player.vel_y;

    // Top of the screen is a ceiling
    if player.pos.y < 0.0 {
        player.pos.y = 0.0;
        player.vel_y = player.vel_y.max(0.0);
    }

    let rest = player.rest_y();
    let mut result = StepResult::default();
    if player.pos.y >= rest {
        let impact = player.vel_y;
        player.pos.y = rest;
        player.vel_y = 0.0;
        player.on_ground = true;
        if was_airborne {
            // Latest duck input wins once we touch down
            player.ducking = player.duck_held;
            player.pos.y = player.rest_y();
            result.landed = impact > LAND_THRESHOLD;
        }
    } else {
        player.on_ground = false;
    }
    result
}

/// Start a jump if grounded; returns whether it happened
pub fn try_jump(player: &mut Player) -> bool {
    if !player.on_ground {
        return false;
    }
    player.vel_y = if player.ducking {
        DUCK_JUMP_VELOCITY
    } else {
        JUMP_VELOCITY
    };
    player.on_ground = false;
    true
}

/// Record duck input; the profile only changes while grounded
pub fn set_duck(player: &mut Player, held: bool) {
    player.duck_held = held;
    if player.on_ground && player.ducking != held {
        player.ducking = held;
        player.pos.y = player.rest_y();
    }
}

/// What the collision pass decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    /// Shield soaked a hit; obstacle at this index is removed
    Absorbed { index: usize },
    /// Unshielded hit; the run is over
    Fatal { index: usize },
}

/// Test the player's inset hit-box against every live obstacle.
///
/// A shielded player loses the shield and the obstacle dies instead; the
/// first unshielded overlap is fatal and stops the scan.
pub fn resolve_collisions(player: &mut Player, obstacles: &mut [Obstacle], now: u64) -> Vec<Impact> {
    let hitbox = player.hitbox();
    let mut impacts = Vec::new();
    for (index, obstacle) in obstacles.iter_mut().enumerate() {
        if obstacle.dead || !hitbox.intersects(&obstacle.rect()) {
            continue;
        }
        if player.shield {
            player.shield = false;
            player.invulnerable = Some(Timer::new(INVULNERABLE_MS, now));
            obstacle.dead = true;
            impacts.push(Impact::Absorbed { index });
        } else {
            impacts.push(Impact::Fatal { index });
            break;
        }
    }
    impacts
}
