//! Sky Runner entry point
//!
//! Native builds run a headless driver: the session advances at the fixed
//! frame cadence under a scripted autopilot, renders every frame into a
//! counting sink and logs a summary. Usage: `sky-runner [runner|snake] [ticks]`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::Path;

    use sky_runner::audio::LogAudio;
    use sky_runner::consts::*;
    use sky_runner::grid::{Cell, Direction, GridInput, GridPhase, SnakeGame};
    use sky_runner::persistence::FileStore;
    use sky_runner::render::CountingSink;
    use sky_runner::render::grid::render_grid;
    use sky_runner::sim::{Collidable, GamePhase, GameState, InputEvent, ObstacleKind};
    use sky_runner::{Game, Settings};

    /// Look-ahead in ticks before an obstacle reaches the player
    const REACTION_TICKS: f32 = 9.0;
    /// Restarts before the driver gives up
    const MAX_RUNS: u32 = 5;

    /// What the autopilot wants this frame
    fn autopilot(state: &GameState) -> Option<InputEvent> {
        let player = state.player.rect();
        let reach = state.effective_speed() * REACTION_TICKS;
        let threat = state
            .obstacles
            .iter()
            .filter(|o| o.rect().right() > player.x)
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))?;
        let gap = threat.rect().x - player.right();
        if gap > reach {
            return state.player.ducking.then_some(InputEvent::DuckEnd);
        }
        match threat.kind {
            ObstacleKind::Cactus { .. } | ObstacleKind::Bird { lane: 0 } => {
                state.player.on_ground.then_some(InputEvent::Jump)
            }
            ObstacleKind::Bird { .. } => {
                (!state.player.ducking && state.player.on_ground).then_some(InputEvent::DuckStart)
            }
        }
    }

    pub fn run_runner(settings: &Settings, ticks: u64) {
        let store = FileStore::new(&settings.high_score_path);
        let mut game = Game::from_settings(settings, Box::new(store));
        let mut audio = LogAudio::default();
        let mut sink = CountingSink::default();
        let mut runs = 1;
        let mut best = 0;

        game.handle_input(InputEvent::Restart);
        for _ in 0..ticks {
            if let Some(event) = autopilot(game.state()) {
                game.handle_input(event);
            }
            game.advance(FRAME_SECS);
            game.render(&mut sink);
            game.play_cues(&mut audio);

            if game.fault().is_some() || game.state().phase == GamePhase::GameOver {
                best = best.max(game.state().score);
                if runs == MAX_RUNS {
                    break;
                }
                runs += 1;
                game.handle_input(InputEvent::Restart);
            }
        }
        best = best.max(game.state().score);

        let state = game.state();
        log::info!(
            "Runner done: {} run(s), best {}, high score {}, {:.0} px, {} draw commands, {} cues",
            runs,
            best,
            state.high_score,
            state.distance,
            sink.commands,
            audio.played
        );
    }

    /// Greedy step toward the food that does not die immediately
    fn snake_pilot(game: &SnakeGame) -> Option<Direction> {
        let head = game.head();
        let food = game.food();
        let body: Vec<Cell> = game.snake().collect();
        let mut options = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];
        options.sort_by_key(|&d| {
            let next = head.step(d);
            (next.x - food.x).abs() + (next.y - food.y).abs()
        });
        options.into_iter().find(|&d| {
            let next = head.step(d);
            d != game.direction().opposite() && next.in_bounds() && !body.contains(&next)
        })
    }

    pub fn run_snake(settings: &Settings, ticks: u64) {
        let store = FileStore::new(".snake_high_score.json");
        let seed = settings.seed.unwrap_or_else(rand::random);
        let mut game = SnakeGame::new(seed, Box::new(store));
        let mut sink = CountingSink::default();

        for _ in 0..ticks {
            if let Some(dir) = snake_pilot(&game) {
                game.handle_input(GridInput::Turn(dir));
            }
            game.advance(FRAME_MS);
            render_grid(&game, &mut sink);
            if matches!(game.phase, GridPhase::GameOver | GridPhase::Won) {
                break;
            }
        }
        log::info!(
            "Snake done ({:?}): score {}, length {}, high score {}, {} draw commands",
            game.phase,
            game.score,
            game.len(),
            game.high_score,
            sink.commands
        );
    }

    pub fn load_settings() -> Settings {
        Settings::load(Path::new(Settings::FILE_NAME))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sky Runner (native, headless) starting...");

    let settings = headless::load_settings();
    let mut args = std::env::args().skip(1);
    let mode = args.next().unwrap_or_else(|| "runner".to_string());
    let ticks = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(3_600);

    match mode.as_str() {
        "snake" => headless::run_snake(&settings, ticks),
        "runner" => headless::run_runner(&settings, ticks),
        other => log::error!("Unknown mode '{}', expected runner or snake", other),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive the library directly; nothing to do here
}
