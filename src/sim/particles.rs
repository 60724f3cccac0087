//! Short-lived visual effects
//!
//! Particles never feed back into gameplay. They draw from their own RNG
//! stream so that emitting more or fewer of them cannot shift spawn rolls.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::timer::Timer;
use crate::color::{Color, palette};

/// Maximum live particles
pub const MAX_PARTICLES: usize = 256;

/// Which emitter fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Jump take-off
    JumpDust,
    /// Touch-down
    LandDust,
    /// Coin pickup
    CoinSparks,
    /// Power-up pickup
    PowerBurst,
    /// Shield absorbing a hit
    ShieldSpark,
}

/// Sampling ranges for one effect (angles in degrees, 0 = right, 90 = down)
struct EmitterSpec {
    count: (u32, u32),
    angle: (f32, f32),
    speed: (f32, f32),
    size: (f32, f32),
    life_ms: (u64, u64),
    gravity: f32,
    color: Color,
}

impl Effect {
    fn spec(self) -> EmitterSpec {
        match self {
            Effect::JumpDust => EmitterSpec {
                count: (6, 10),
                angle: (-145.0, -35.0),
                speed: (0.8, 2.4),
                size: (2.0, 4.0),
                life_ms: (250, 450),
                gravity: 0.08,
                color: palette::DUST,
            },
            Effect::LandDust => EmitterSpec {
                count: (8, 12),
                angle: (10.0, 170.0),
                speed: (1.0, 3.0),
                size: (2.0, 4.5),
                life_ms: (200, 400),
                gravity: 0.0,
                color: palette::DUST,
            },
            Effect::CoinSparks => EmitterSpec {
                count: (10, 14),
                angle: (0.0, 360.0),
                speed: (1.5, 3.5),
                size: (1.5, 3.0),
                life_ms: (300, 500),
                gravity: 0.05,
                color: palette::SPARK,
            },
            Effect::PowerBurst => EmitterSpec {
                count: (20, 28),
                angle: (0.0, 360.0),
                speed: (2.0, 5.0),
                size: (2.0, 5.0),
                life_ms: (400, 700),
                gravity: 0.0,
                color: palette::SHIELD,
            },
            Effect::ShieldSpark => EmitterSpec {
                count: (5, 8),
                angle: (0.0, 360.0),
                speed: (1.0, 2.5),
                size: (1.5, 3.0),
                life_ms: (150, 300),
                gravity: 0.0,
                color: palette::SHIELD,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub gravity: f32,
    pub size: f32,
    pub color: Color,
    pub life: Timer,
}

impl Particle {
    /// 1 when fresh, 0 when expired
    pub fn alpha(&self, now: u64) -> f32 {
        1.0 - self.life.progress(now)
    }

    /// Fade toward the sky instead of real transparency
    pub fn tinted(&self, sky: Color, now: u64) -> Color {
        sky.blend(self.color, self.alpha(now))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Spawn one burst of `effect` at `origin`
    pub fn emit(&mut self, effect: Effect, origin: Vec2, now: u64, rng: &mut Pcg32) {
        let spec = effect.spec();
        let count = rng.random_range(spec.count.0..=spec.count.1);
        for _ in 0..count {
            if self.particles.len() >= MAX_PARTICLES {
                break;
            }
            let angle = rng.random_range(spec.angle.0..=spec.angle.1).to_radians();
            let speed = rng.random_range(spec.speed.0..=spec.speed.1);
            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                gravity: spec.gravity,
                size: rng.random_range(spec.size.0..=spec.size.1),
                color: spec.color,
                life: Timer::new(rng.random_range(spec.life_ms.0..=spec.life_ms.1), now),
            });
        }
    }

    /// Integrate motion and drop expired particles
    pub fn update(&mut self, now: u64) {
        for p in &mut self.particles {
            p.vel.y += p.gravity;
            p.pos += p.vel;
        }
        self.particles.retain(|p| !p.life.done(now));
    }
}
