//! Game session
//!
//! Owns the runner state and its high score store. Inputs go straight to the
//! state; `advance` runs one tick, writes any pending high score and catches
//! tick faults (including panics) into a frozen diagnostic overlay that
//! `Restart` clears.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::audio::{self, AudioSink};
use crate::persistence::{self, HighScoreStore};
use crate::render::{RenderSink, render_runner};
use crate::settings::Settings;
use crate::sim::{Cue, GameState, InputEvent, SimFault, tick};

pub struct Game {
    state: GameState,
    store: Box<dyn HighScoreStore>,
    /// Message of the last caught tick fault; the run is frozen while set
    fault: Option<String>,
}

impl Game {
    pub fn new(seed: u64, settings: &Settings, store: Box<dyn HighScoreStore>) -> Self {
        let mut state = GameState::with_settings(seed, settings);
        state.high_score = persistence::load_or_zero(store.as_ref());
        log::info!(
            "Session ready (seed {}, high score {})",
            seed,
            state.high_score
        );
        Self {
            state,
            store,
            fault: None,
        }
    }

    /// Seed from the settings, or a random one when unset
    pub fn from_settings(settings: &Settings, store: Box<dyn HighScoreStore>) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        Self::new(seed, settings, store)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for hosts and tests that stage scenes
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn fault(&self) -> Option<&str> {
        self.fault.as_deref()
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        if event == InputEvent::Restart && self.fault.take().is_some() {
            log::info!("Recovering from fault");
        }
        if self.fault.is_some() {
            return;
        }
        self.state.handle_input(event);
        self.flush_save();
    }

    /// Run one tick with the host's Δt hint in seconds
    pub fn advance(&mut self, dt: f32) {
        self.guarded_step(|state| tick(state, dt));
    }

    /// Run `step` unless frozen; an error or a panic freezes the session
    fn guarded_step(&mut self, step: impl FnOnce(&mut GameState) -> Result<(), SimFault>) {
        if self.fault.is_some() {
            return;
        }
        let state = &mut self.state;
        let message = match panic::catch_unwind(AssertUnwindSafe(|| step(state))) {
            Ok(Ok(())) => None,
            Ok(Err(fault)) => Some(fault.to_string()),
            Err(payload) => Some(format!("panic during tick: {}", panic_message(payload.as_ref()))),
        };
        if let Some(message) = message {
            log::error!("Tick {} faulted: {}", self.state.ticks, message);
            self.fault = Some(message);
        }
        self.flush_save();
    }

    pub fn render(&self, sink: &mut dyn RenderSink) {
        render_runner(&self.state, self.fault(), sink);
    }

    pub fn drain_cues(&mut self) -> Vec<Cue> {
        self.state.drain_cues()
    }

    /// Send the cues from the last tick(s) to `sink`
    pub fn play_cues(&mut self, sink: &mut dyn AudioSink) {
        audio::dispatch(self.state.drain_cues(), sink);
    }

    fn flush_save(&mut self) {
        if let Some(value) = self.state.take_pending_save() {
            persistence::save_or_warn(self.store.as_mut(), value);
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_SECS;
    use crate::persistence::MemoryStore;
    use crate::render::DrawCommand;
    use crate::sim::{GamePhase, Obstacle};

    fn game(store: &MemoryStore) -> Game {
        Game::new(5, &Settings::default(), Box::new(store.clone()))
    }

    fn crash(game: &mut Game) {
        let player = game.state().player.rect();
        let state = game.state_mut();
        state.obstacles.clear();
        state
            .obstacles
            .push(Obstacle::cactus(player.x + 4.0, 20.0, 60.0, 0));
        game.advance(FRAME_SECS);
        assert_eq!(game.state().phase, GamePhase::GameOver);
    }

    #[test]
    fn test_fresh_store_reads_zero() {
        let store = MemoryStore::new();
        assert_eq!(game(&store).state().high_score, 0);
    }

    #[test]
    fn test_high_score_survives_fresh_session() {
        let store = MemoryStore::new();
        let mut g = game(&store);
        g.handle_input(InputEvent::Restart);
        g.state_mut().score = 321;
        crash(&mut g);
        assert_eq!(store.stored(), Some(g.state().score));
        let saved = g.state().score;
        assert!(saved >= 321);

        let g2 = game(&store);
        assert_eq!(g2.state().high_score, saved);
    }

    #[test]
    fn test_lower_score_not_saved() {
        let store = MemoryStore::with_value(10_000);
        let mut g = game(&store);
        g.handle_input(InputEvent::Restart);
        crash(&mut g);
        assert_eq!(store.stored(), Some(10_000));
        assert!(!g.state().new_high_score);
    }

    #[test]
    fn test_fault_freezes_and_restart_recovers() {
        let store = MemoryStore::new();
        let mut g = game(&store);
        g.handle_input(InputEvent::Restart);
        g.state_mut().player.pos.y = f32::NAN;
        g.advance(FRAME_SECS);
        assert!(g.fault().is_some());

        let ticks = g.state().ticks;
        g.advance(FRAME_SECS);
        g.handle_input(InputEvent::Jump);
        assert_eq!(g.state().ticks, ticks);

        let mut sink: Vec<DrawCommand> = Vec::new();
        g.render(&mut sink);
        assert!(sink.iter().any(|c| matches!(
            c,
            DrawCommand::Text { text, .. } if text == "SIMULATION FAULT"
        )));

        g.handle_input(InputEvent::Restart);
        assert!(g.fault().is_none());
        g.advance(FRAME_SECS);
        assert_eq!(g.state().phase, GamePhase::Running);
        assert_eq!(g.state().ticks, 1);
    }

    #[test]
    fn test_panicking_tick_is_caught() {
        let store = MemoryStore::new();
        let mut g = game(&store);
        g.handle_input(InputEvent::Restart);
        g.guarded_step(|state| {
            state.score = 42;
            panic!("obstacle table corrupted");
        });
        assert_eq!(
            g.fault(),
            Some("panic during tick: obstacle table corrupted")
        );

        // Frozen until restart
        let ticks = g.state().ticks;
        g.advance(FRAME_SECS);
        assert_eq!(g.state().ticks, ticks);

        g.handle_input(InputEvent::Restart);
        assert!(g.fault().is_none());
        assert_eq!(g.state().score, 0);
        g.advance(FRAME_SECS);
        assert_eq!(g.state().phase, GamePhase::Running);
    }

    #[test]
    fn test_panic_message_formats() {
        let owned: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(owned.as_ref()), "owned");
        let other: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(other.as_ref()), "unknown payload");
    }

    #[test]
    fn test_cues_reach_audio_sink() {
        let store = MemoryStore::new();
        let mut g = game(&store);
        g.handle_input(InputEvent::Jump);
        let mut played: Vec<Cue> = Vec::new();
        g.play_cues(&mut played);
        assert_eq!(played, vec![Cue::Jump]);
        assert!(g.drain_cues().is_empty());
    }
}
