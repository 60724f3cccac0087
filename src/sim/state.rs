//! Game state and session-level transitions
//!
//! Everything the tick touches lives here. Two RNG streams: `rng` drives
//! gameplay rolls (spawns, obstacle shapes), `fx_rng` drives cosmetics
//! (particles, cloud shapes, pebbles) so visuals can never shift gameplay.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entities::{
    Cloud, Coin, GroundSeg, Obstacle, ObstacleKind, Pebble, Player, PowerUp, PowerUpKind,
};
use super::input::InputEvent;
use super::particles::{Effect, ParticleSystem};
use super::physics;
use super::spawner::{SpawnPlan, Spawner};
use super::timer::Timer;
use crate::color::{Color, palette};
use crate::consts::*;
use crate::settings::{Difficulty, DifficultyPreset, Settings};

/// Stream id mixed into the seed for the cosmetic RNG
const FX_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Fresh session, waiting for the first jump
    Ready,
    Running,
    Paused,
    GameOver,
}

/// Semantic sound cue. The simulation only names them; sinks decide how
/// they sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Jump,
    Land,
    Coin,
    Power,
    ShieldBreak,
    Hit,
    /// Score crossed a multiple of `MILESTONE_EVERY`
    Milestone,
}

/// Transient message across the top of the screen
#[derive(Debug, Clone)]
pub struct Banner {
    pub text: String,
    pub timer: Timer,
}

/// Complete runner state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    fx_rng: Pcg32,
    pub phase: GamePhase,
    /// Simulation clock (ms); advances only while Running
    pub clock_ms: u64,
    /// Running ticks since the run started
    pub ticks: u64,
    pub score: u64,
    pub high_score: u64,
    /// This run beat the stored high score
    pub new_high_score: bool,
    /// Total scrolled distance (px)
    pub distance: f32,
    /// Smoothed speed before wobble
    pub cruise: f32,
    /// Current scroll speed, clamped to [MIN_SPEED, MAX_SPEED]
    pub speed: f32,
    pub difficulty: Difficulty,
    /// Day/night phase in [0, 1); 0 = noon, 0.5 = midnight
    pub time_of_day: f32,
    pub slowmo: Option<Timer>,
    pub muted: bool,
    pub debug: bool,
    pub high_contrast: bool,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub coins: Vec<Coin>,
    pub power_ups: Vec<PowerUp>,
    pub clouds: Vec<Cloud>,
    pub ground: Vec<GroundSeg>,
    pub particles: ParticleSystem,
    pub spawner: Spawner,
    pub banner: Option<Banner>,
    next_milestone: u64,
    /// The "new high score" banner already fired this run
    record_announced: bool,
    cues: Vec<Cue>,
    pending_save: Option<u64>,
}

impl GameState {
    /// Create a new session in `Ready` with the given seed
    pub fn new(seed: u64, difficulty: Difficulty) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let fx_rng = Pcg32::seed_from_u64(seed ^ FX_STREAM);
        let preset = difficulty.preset();
        let spawner = Spawner::new(&preset, 0, &mut rng);

        let mut state = Self {
            seed,
            rng,
            fx_rng,
            phase: GamePhase::Ready,
            clock_ms: 0,
            ticks: 0,
            score: 0,
            high_score: 0,
            new_high_score: false,
            distance: 0.0,
            cruise: preset.base_speed,
            speed: preset.base_speed,
            difficulty,
            time_of_day: 0.0,
            slowmo: None,
            muted: false,
            debug: false,
            high_contrast: false,
            player: Player::default(),
            obstacles: Vec::new(),
            coins: Vec::new(),
            power_ups: Vec::new(),
            clouds: Vec::new(),
            ground: Vec::new(),
            particles: ParticleSystem::new(),
            spawner,
            banner: None,
            next_milestone: MILESTONE_EVERY,
            record_announced: false,
            cues: Vec::new(),
            pending_save: None,
        };
        state.reset_decor();
        state
    }

    /// Build from user settings
    pub fn with_settings(seed: u64, settings: &Settings) -> Self {
        let mut state = Self::new(seed, settings.difficulty);
        state.muted = settings.muted;
        state.debug = settings.debug;
        state.high_contrast = settings.high_contrast;
        state
    }

    pub fn preset(&self) -> DifficultyPreset {
        self.difficulty.preset()
    }

    /// Global time scale (slow-motion)
    pub fn speed_scale(&self) -> f32 {
        match self.slowmo {
            Some(t) if !t.done(self.clock_ms) => SLOWMO_SCALE,
            _ => 1.0,
        }
    }

    /// Scroll speed after slow-motion
    pub fn effective_speed(&self) -> f32 {
        self.speed * self.speed_scale()
    }

    /// Speed the cruise is easing toward
    pub fn target_speed(&self) -> f32 {
        self.preset().base_speed + (self.distance / SPEED_RAMP_DISTANCE).min(SPEED_RAMP_MAX)
    }

    /// 0 at noon, 1 at midnight
    pub fn night_factor(&self) -> f32 {
        (1.0 - (self.time_of_day * std::f32::consts::TAU).cos()) / 2.0
    }

    pub fn sky_color(&self) -> Color {
        let sky = palette::SKY_DAY.blend(palette::SKY_NIGHT, self.night_factor());
        if self.high_contrast { sky.invert() } else { sky }
    }

    pub fn stars_visible(&self) -> bool {
        self.night_factor() > STAR_THRESHOLD
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    // === Cues and persistence hand-off ===

    pub fn push_cue(&mut self, cue: Cue) {
        if !self.muted {
            self.cues.push(cue);
        }
    }

    /// Take the cues emitted since the last drain
    pub fn drain_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    /// A high score waiting to be written, if any
    pub fn take_pending_save(&mut self) -> Option<u64> {
        self.pending_save.take()
    }

    pub fn show_banner(&mut self, text: impl Into<String>) {
        self.banner = Some(Banner {
            text: text.into(),
            timer: Timer::new(BANNER_MS, self.clock_ms),
        });
    }

    pub fn emit(&mut self, effect: Effect, origin: Vec2) {
        self.particles
            .emit(effect, origin, self.clock_ms, &mut self.fx_rng);
    }

    // === Input ===

    /// Apply one input event immediately
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Jump => match self.phase {
                GamePhase::Ready => {
                    self.start();
                    self.jump();
                }
                GamePhase::Running => self.jump(),
                GamePhase::Paused | GamePhase::GameOver => {}
            },
            InputEvent::DuckStart | InputEvent::DuckEnd => {
                let held = event == InputEvent::DuckStart;
                if self.is_running() {
                    physics::set_duck(&mut self.player, held);
                } else {
                    self.player.duck_held = held;
                }
            }
            InputEvent::PauseToggle => match self.phase {
                GamePhase::Running => {
                    self.phase = GamePhase::Paused;
                    log::info!("Paused at score {}", self.score);
                }
                GamePhase::Paused => {
                    self.phase = GamePhase::Running;
                    // Duck changes made while paused apply on resume
                    let held = self.player.duck_held;
                    physics::set_duck(&mut self.player, held);
                    log::info!("Resumed");
                }
                GamePhase::Ready | GamePhase::GameOver => {}
            },
            InputEvent::Restart => self.start(),
            InputEvent::MuteToggle => {
                self.muted = !self.muted;
                if self.muted {
                    self.cues.clear();
                }
                log::info!("Muted: {}", self.muted);
            }
            InputEvent::DebugToggle => self.debug = !self.debug,
            InputEvent::ContrastToggle => self.high_contrast = !self.high_contrast,
            InputEvent::SelectDifficulty(level) => {
                if let Some(d) = Difficulty::from_level(level) {
                    self.select_difficulty(d);
                }
            }
        }
    }

    fn jump(&mut self) {
        if physics::try_jump(&mut self.player) {
            self.push_cue(Cue::Jump);
            let feet = self.player.feet();
            self.emit(Effect::JumpDust, feet);
        }
    }

    /// Switch preset, re-arm obstacle/collectible countdowns, show a notice
    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        let preset = difficulty.preset();
        let now = self.clock_ms;
        self.spawner
            .rearm_for_difficulty(&preset, now, &mut self.rng);
        self.show_banner(format!("Difficulty: {}", difficulty.as_str()));
        log::info!("Difficulty set to {}", difficulty.as_str());
    }

    // === Transitions ===

    /// Begin a fresh run (from any phase)
    pub fn start(&mut self) {
        if self.score > self.high_score {
            self.record_high_score();
        }
        let preset = self.preset();
        self.phase = GamePhase::Running;
        self.ticks = 0;
        self.score = 0;
        self.new_high_score = false;
        self.distance = 0.0;
        self.cruise = preset.base_speed;
        self.speed = preset.base_speed;
        self.slowmo = None;
        self.banner = None;
        self.next_milestone = MILESTONE_EVERY;
        self.record_announced = false;
        let duck_held = self.player.duck_held;
        self.player = Player::default();
        physics::set_duck(&mut self.player, duck_held);
        self.obstacles.clear();
        self.coins.clear();
        self.power_ups.clear();
        self.particles.clear();
        self.reset_decor();
        let now = self.clock_ms;
        self.spawner.rearm_all(&preset, now, &mut self.rng);
        log::info!(
            "Run started (seed {}, difficulty {})",
            self.seed,
            self.difficulty.as_str()
        );
    }

    /// Unshielded hit: freeze and record the high score
    pub fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        self.push_cue(Cue::Hit);
        if self.score > self.high_score {
            self.record_high_score();
        }
        log::info!(
            "Game over: score {}, distance {:.0}, high {}",
            self.score,
            self.distance,
            self.high_score
        );
    }

    fn record_high_score(&mut self) {
        self.high_score = self.score;
        self.new_high_score = true;
        self.pending_save = Some(self.score);
        log::info!("New high score: {}", self.score);
    }

    // === World building ===

    /// Reset decor to the small initial set: a few clouds, a full ground strip
    fn reset_decor(&mut self) {
        self.clouds.clear();
        for i in 0..INITIAL_CLOUDS {
            let x = WORLD_WIDTH * (i as f32 + 0.3) / INITIAL_CLOUDS as f32;
            let cloud = self.make_cloud(x);
            self.clouds.push(cloud);
        }
        self.ground.clear();
        let mut x = 0.0;
        while x < WORLD_WIDTH + GROUND_SEGMENT_WIDTH {
            let seg = self.make_ground(x);
            self.ground.push(seg);
            x += GROUND_SEGMENT_WIDTH;
        }
    }

    fn make_cloud(&mut self, x: f32) -> Cloud {
        let y = self.fx_rng.random_range(20.0..=110.0);
        let size = Vec2::new(
            self.fx_rng.random_range(50.0..=90.0),
            self.fx_rng.random_range(18.0..=28.0),
        );
        Cloud::new(Vec2::new(x, y), size)
    }

    fn make_ground(&mut self, x: f32) -> GroundSeg {
        let count = self.fx_rng.random_range(4..=9);
        let pebbles = (0..count)
            .map(|_| Pebble {
                dx: self.fx_rng.random_range(0.0..GROUND_SEGMENT_WIDTH),
                dy: self.fx_rng.random_range(6.0..=40.0),
                w: self.fx_rng.random_range(2.0..=6.0),
            })
            .collect();
        GroundSeg::new(x, pebbles)
    }

    /// Append ground while the last segment's right edge is on screen
    pub fn recycle_ground(&mut self) {
        loop {
            let next_x = match self.ground.last() {
                Some(last) if last.right() > WORLD_WIDTH => break,
                Some(last) => last.right(),
                None => 0.0,
            };
            let seg = self.make_ground(next_x);
            self.ground.push(seg);
        }
    }

    /// Ask the scheduler what is due now
    pub fn poll_spawner(&mut self) -> SpawnPlan {
        let preset = self.preset();
        self.spawner.poll(&preset, self.clock_ms, &mut self.rng)
    }

    /// Next score at which a milestone cue fires
    pub fn next_milestone(&self) -> u64 {
        self.next_milestone
    }

    pub fn advance_milestone(&mut self) {
        self.next_milestone += MILESTONE_EVERY;
    }

    /// Show the record banner the first time this run passes a stored high score
    pub fn announce_record(&mut self) {
        if !self.record_announced && self.high_score > 0 && self.score > self.high_score {
            self.record_announced = true;
            self.show_banner("New high score!");
            log::info!("Passed high score {} at {}", self.high_score, self.score);
        }
    }

    /// Turn a spawn plan into entities just past the right edge
    pub fn apply_spawns(&mut self, plan: &SpawnPlan) {
        if let Some(kind) = plan.obstacle {
            let obstacle = match kind {
                ObstacleKind::Cactus { arms } => {
                    let w = self.rng.random_range(18.0..=34.0);
                    let h = self.rng.random_range(35.0..=55.0);
                    Obstacle::cactus(SPAWN_X, w, h, arms)
                }
                ObstacleKind::Bird { lane } => Obstacle::bird(SPAWN_X, lane),
            };
            self.obstacles.push(obstacle);
        }

        if plan.collectible {
            let count = self.rng.random_range(1..=3);
            let y = self.rng.random_range((GROUND_Y - 140.0)..=(GROUND_Y - 30.0));
            for i in 0..count {
                self.coins
                    .push(Coin::new(Vec2::new(SPAWN_X + i as f32 * 30.0, y)));
            }
        }

        if let Some(kind) = plan.power_up {
            let y = GROUND_Y - self.rng.random_range(40.0..=110.0);
            self.power_ups.push(PowerUp::new(kind, Vec2::new(SPAWN_X, y)));
        }

        if plan.cloud {
            let cloud = self.make_cloud(SPAWN_X);
            self.clouds.push(cloud);
        }
    }

    /// Apply a power-up's effect
    pub fn apply_power_up(&mut self, kind: PowerUpKind, at: Vec2) {
        match kind {
            PowerUpKind::Shield => self.player.shield = true,
            PowerUpKind::SlowMo => self.slowmo = Some(Timer::new(SLOWMO_MS, self.clock_ms)),
        }
        self.push_cue(Cue::Power);
        self.emit(Effect::PowerBurst, at);
        self.show_banner(kind.label());
        log::debug!("Picked up {:?}", kind);
    }

    /// Entity count across every collection (debug panel)
    pub fn entity_count(&self) -> usize {
        1 + self.obstacles.len()
            + self.coins.len()
            + self.power_ups.len()
            + self.clouds.len()
            + self.ground.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_ready_with_decor() {
        let state = GameState::new(1, Difficulty::Normal);
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.clouds.len(), INITIAL_CLOUDS);
        assert!(state.ground.last().is_some_and(|g| g.right() > WORLD_WIDTH));
        assert!(state.obstacles.is_empty());
        assert_eq!(state.speed, 7.5);
    }

    #[test]
    fn test_jump_from_ready_starts_run() {
        let mut state = GameState::new(1, Difficulty::Normal);
        state.handle_input(InputEvent::Jump);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(!state.player.on_ground);
        assert_eq!(state.drain_cues(), vec![Cue::Jump]);
    }

    #[test]
    fn test_pause_toggle_only_while_playing() {
        let mut state = GameState::new(1, Difficulty::Normal);
        state.handle_input(InputEvent::PauseToggle);
        assert_eq!(state.phase, GamePhase::Ready);
        state.handle_input(InputEvent::Restart);
        state.handle_input(InputEvent::PauseToggle);
        assert_eq!(state.phase, GamePhase::Paused);
        state.handle_input(InputEvent::PauseToggle);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_mute_suppresses_cues() {
        let mut state = GameState::new(1, Difficulty::Normal);
        state.handle_input(InputEvent::MuteToggle);
        state.handle_input(InputEvent::Jump);
        assert!(state.drain_cues().is_empty());
    }

    #[test]
    fn test_toggles_and_unknown_difficulty() {
        let mut state = GameState::new(1, Difficulty::Normal);
        state.handle_input(InputEvent::DebugToggle);
        state.handle_input(InputEvent::ContrastToggle);
        assert!(state.debug && state.high_contrast);
        let day = palette::SKY_DAY.blend(palette::SKY_NIGHT, state.night_factor());
        assert_eq!(state.sky_color(), day.invert());

        state.handle_input(InputEvent::SelectDifficulty(7));
        assert_eq!(state.difficulty, Difficulty::Normal);
        assert!(state.banner.is_none());
        state.handle_input(InputEvent::SelectDifficulty(3));
        assert_eq!(state.difficulty, Difficulty::Hard);
        assert_eq!(state.banner.as_ref().map(|b| b.text.as_str()), Some("Difficulty: Hard"));
    }

    #[test]
    fn test_game_over_records_high_score_once() {
        let mut state = GameState::new(1, Difficulty::Normal);
        state.handle_input(InputEvent::Restart);
        state.score = 120;
        state.game_over();
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score, 120);
        assert!(state.new_high_score);
        assert_eq!(state.take_pending_save(), Some(120));
        assert_eq!(state.take_pending_save(), None);

        state.handle_input(InputEvent::Restart);
        assert_eq!(state.score, 0);
        assert!(!state.new_high_score);
        assert_eq!(state.take_pending_save(), None);
    }

    #[test]
    fn test_restart_clears_dynamic_entities() {
        let mut state = GameState::new(4, Difficulty::Normal);
        state.handle_input(InputEvent::Restart);
        state.apply_spawns(&SpawnPlan {
            obstacle: Some(ObstacleKind::Bird { lane: 0 }),
            collectible: true,
            power_up: Some(PowerUpKind::Shield),
            cloud: true,
        });
        state.player.shield = true;
        assert!(!state.obstacles.is_empty() && !state.coins.is_empty());
        assert_eq!(state.clouds.len(), INITIAL_CLOUDS + 1);

        state.handle_input(InputEvent::Restart);
        assert!(state.obstacles.is_empty());
        assert!(state.coins.is_empty());
        assert!(state.power_ups.is_empty());
        assert_eq!(state.clouds.len(), INITIAL_CLOUDS);
        assert!(!state.player.shield);
    }

    #[test]
    fn test_day_night_sky() {
        let mut state = GameState::new(1, Difficulty::Normal);
        assert_eq!(state.sky_color(), palette::SKY_DAY);
        assert!(!state.stars_visible());
        state.time_of_day = 0.5;
        assert_eq!(state.sky_color(), palette::SKY_NIGHT);
        assert!(state.stars_visible());
    }

    #[test]
    fn test_duck_held_while_paused_applies_on_resume() {
        let mut state = GameState::new(1, Difficulty::Normal);
        state.handle_input(InputEvent::Restart);
        state.handle_input(InputEvent::PauseToggle);
        state.handle_input(InputEvent::DuckStart);
        assert!(!state.player.ducking);

        state.handle_input(InputEvent::PauseToggle);
        assert!(state.player.ducking);
        assert_eq!(state.player.pos.y, state.player.rest_y());

        state.handle_input(InputEvent::PauseToggle);
        state.handle_input(InputEvent::DuckEnd);
        state.handle_input(InputEvent::PauseToggle);
        assert!(!state.player.ducking);
    }

    #[test]
    fn test_duck_held_across_restart() {
        let mut state = GameState::new(1, Difficulty::Normal);
        state.handle_input(InputEvent::DuckStart);
        state.handle_input(InputEvent::Restart);
        assert!(state.player.on_ground);
        assert!(state.player.ducking);
        assert_eq!(state.player.size(), Vec2::new(PLAYER_DUCK_WIDTH, PLAYER_DUCK_HEIGHT));
    }

    #[test]
    fn test_slowmo_halves_effective_speed() {
        let mut state = GameState::new(1, Difficulty::Normal);
        state.handle_input(InputEvent::Restart);
        state.apply_power_up(PowerUpKind::SlowMo, Vec2::ZERO);
        assert_eq!(state.effective_speed(), state.speed * SLOWMO_SCALE);
        state.clock_ms += SLOWMO_MS;
        assert_eq!(state.effective_speed(), state.speed);
    }
}
