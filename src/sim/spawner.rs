//! Spawn scheduling
//!
//! Three independent countdowns (obstacle, collectible, power-up) re-arm
//! themselves with a fresh random interval from the active preset the moment
//! they fire. Clouds roll a small chance every tick; ground recycling is
//! handled by the state since it only depends on the last segment.

use rand::Rng;
use rand_pcg::Pcg32;

use super::entities::{ObstacleKind, PowerUpKind};
use super::timer::Timer;
use crate::consts::CLOUD_CHANCE;
use crate::settings::DifficultyPreset;

/// What the scheduler wants spawned this tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpawnPlan {
    pub obstacle: Option<ObstacleKind>,
    pub collectible: bool,
    pub power_up: Option<PowerUpKind>,
    pub cloud: bool,
}

impl SpawnPlan {
    pub fn is_empty(&self) -> bool {
        self.obstacle.is_none() && !self.collectible && self.power_up.is_none() && !self.cloud
    }
}

#[derive(Debug, Clone)]
pub struct Spawner {
    pub obstacle: Timer,
    pub collectible: Timer,
    pub power_up: Timer,
}

/// Draw an interval from an inclusive range
fn roll_interval(range: (u64, u64), rng: &mut Pcg32) -> u64 {
    let (lo, hi) = range;
    if lo >= hi {
        lo
    } else {
        rng.random_range(lo..=hi)
    }
}

impl Spawner {
    pub fn new(preset: &DifficultyPreset, now: u64, rng: &mut Pcg32) -> Self {
        Self {
            obstacle: Timer::new(roll_interval(preset.obstacle_ms, rng), now),
            collectible: Timer::new(roll_interval(preset.collectible_ms, rng), now),
            power_up: Timer::new(roll_interval(preset.power_up_ms, rng), now),
        }
    }

    /// Re-arm every countdown (run start/restart)
    pub fn rearm_all(&mut self, preset: &DifficultyPreset, now: u64, rng: &mut Pcg32) {
        *self = Self::new(preset, now, rng);
    }

    /// Re-arm obstacle and collectible countdowns after a difficulty change
    pub fn rearm_for_difficulty(&mut self, preset: &DifficultyPreset, now: u64, rng: &mut Pcg32) {
        self.obstacle
            .reset(now, Some(roll_interval(preset.obstacle_ms, rng)));
        self.collectible
            .reset(now, Some(roll_interval(preset.collectible_ms, rng)));
    }

    /// Poll all countdowns; fired ones are re-armed immediately
    pub fn poll(&mut self, preset: &DifficultyPreset, now: u64, rng: &mut Pcg32) -> SpawnPlan {
        let mut plan = SpawnPlan::default();

        if self.obstacle.done(now) {
            // Ground hazards three times as often as birds
            plan.obstacle = Some(if rng.random_range(0..4) < 3 {
                ObstacleKind::Cactus {
                    arms: rng.random_range(0..=2),
                }
            } else {
                ObstacleKind::Bird {
                    lane: rng.random_range(0..3),
                }
            });
            self.obstacle
                .reset(now, Some(roll_interval(preset.obstacle_ms, rng)));
        }

        if self.collectible.done(now) {
            plan.collectible = true;
            self.collectible
                .reset(now, Some(roll_interval(preset.collectible_ms, rng)));
        }

        if self.power_up.done(now) {
            plan.power_up = Some(PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())]);
            self.power_up
                .reset(now, Some(roll_interval(preset.power_up_ms, rng)));
        }

        plan.cloud = rng.random_bool(CLOUD_CHANCE);
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Difficulty;
    use rand::SeedableRng;

    #[test]
    fn test_intervals_drawn_from_preset() {
        let mut rng = Pcg32::seed_from_u64(11);
        let preset = Difficulty::Hard.preset();
        for now in 0..50 {
            let s = Spawner::new(&preset, now, &mut rng);
            assert!((preset.obstacle_ms.0..=preset.obstacle_ms.1).contains(&s.obstacle.duration_ms));
            assert!(
                (preset.collectible_ms.0..=preset.collectible_ms.1)
                    .contains(&s.collectible.duration_ms)
            );
            assert!((preset.power_up_ms.0..=preset.power_up_ms.1).contains(&s.power_up.duration_ms));
        }
    }

    #[test]
    fn test_fires_and_rearms() {
        let mut rng = Pcg32::seed_from_u64(5);
        let preset = Difficulty::Normal.preset();
        let mut s = Spawner::new(&preset, 0, &mut rng);
        let due = s.obstacle.duration_ms;

        let plan = s.poll(&preset, due - 1, &mut rng);
        assert!(plan.obstacle.is_none());

        let plan = s.poll(&preset, due, &mut rng);
        assert!(plan.obstacle.is_some());
        assert_eq!(s.obstacle.start_ms, due);
        assert!(!s.obstacle.done(due));
    }

    #[test]
    fn test_ground_hazard_bias() {
        let mut rng = Pcg32::seed_from_u64(99);
        let preset = DifficultyPreset {
            base_speed: 7.5,
            obstacle_ms: (0, 0),
            collectible_ms: (100_000, 100_000),
            power_up_ms: (100_000, 100_000),
        };
        let mut s = Spawner::new(&preset, 0, &mut rng);
        let (mut cacti, mut birds) = (0, 0);
        for now in 0..4000 {
            match s.poll(&preset, now, &mut rng).obstacle {
                Some(ObstacleKind::Cactus { .. }) => cacti += 1,
                Some(ObstacleKind::Bird { .. }) => birds += 1,
                None => {}
            }
        }
        assert_eq!(cacti + birds, 4000);
        let ratio = cacti as f32 / birds as f32;
        assert!((2.5..3.6).contains(&ratio), "ratio {ratio}");
    }

    #[test]
    fn test_difficulty_rearm_uses_new_ranges() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut s = Spawner::new(&Difficulty::Easy.preset(), 0, &mut rng);
        let power_before = s.power_up;
        let hard = Difficulty::Hard.preset();
        s.rearm_for_difficulty(&hard, 500, &mut rng);
        assert_eq!(s.obstacle.start_ms, 500);
        assert!((hard.obstacle_ms.0..=hard.obstacle_ms.1).contains(&s.obstacle.duration_ms));
        assert!((hard.collectible_ms.0..=hard.collectible_ms.1).contains(&s.collectible.duration_ms));
        assert_eq!(s.power_up, power_before);
    }
}
