//! Runner render pass
//!
//! Back-to-front: sky, stars, clouds, ground, coins, power-ups, obstacles,
//! player, particles, then HUD, banner, overlays and the debug panel.

use glam::Vec2;

use super::shapes;
use super::{Anchor, Canvas, RenderSink};
use crate::color::{Color, palette};
use crate::consts::*;
use crate::sim::particles::Particle;
use crate::sim::{
    Cloud, Coin, Collidable, GamePhase, GameState, GroundSeg, Obstacle, ObstacleKind, Player,
    PowerUp, PowerUpKind, Rect,
};

/// Number of stars in the night sky
const STAR_COUNT: u32 = 48;

/// Render contract for world objects
pub trait Drawable {
    fn draw(&self, canvas: &mut Canvas<'_>);
}

impl Drawable for Cloud {
    fn draw(&self, canvas: &mut Canvas<'_>) {
        let color = canvas.sky.blend(palette::CLOUD, 0.85);
        let (x, y) = (self.pos.x, self.pos.y);
        let (w, h) = (self.size.x, self.size.y);
        // Three overlapping puffs
        canvas.oval(Rect::new(x, y + h * 0.3, w * 0.55, h * 0.7), Some(color), None);
        canvas.oval(Rect::new(x + w * 0.25, y, w * 0.5, h), Some(color), None);
        canvas.oval(Rect::new(x + w * 0.5, y + h * 0.25, w * 0.5, h * 0.75), Some(color), None);
    }
}

impl Drawable for GroundSeg {
    fn draw(&self, canvas: &mut Canvas<'_>) {
        canvas.fill_rect(
            Rect::new(self.x, GROUND_Y, self.width, WORLD_HEIGHT - GROUND_Y),
            palette::GROUND,
        );
        canvas.line(
            Vec2::new(self.x, GROUND_Y),
            Vec2::new(self.right(), GROUND_Y),
            palette::GROUND_LINE,
            2.0,
        );
        for p in &self.pebbles {
            canvas.line(
                Vec2::new(self.x + p.dx, GROUND_Y + p.dy),
                Vec2::new(self.x + p.dx + p.w, GROUND_Y + p.dy),
                palette::PEBBLE,
                1.0,
            );
        }
    }
}

impl Drawable for Coin {
    fn draw(&self, canvas: &mut Canvas<'_>) {
        // Spin squashes the coin horizontally
        let w = (self.radius * 2.0 * self.spin.cos().abs()).max(2.0);
        let rect = Rect::centered(self.pos, Vec2::new(w, self.radius * 2.0));
        canvas.oval(rect, Some(palette::COIN), Some(palette::COIN_EDGE));
    }
}

impl Drawable for PowerUp {
    fn draw(&self, canvas: &mut Canvas<'_>) {
        let r = self.radius * (1.0 + 0.12 * self.pulse.sin());
        let (fill, ring) = match self.kind {
            PowerUpKind::Shield => (palette::SHIELD, Color::WHITE),
            PowerUpKind::SlowMo => (palette::SLOWMO, Color::WHITE),
        };
        canvas.oval(
            Rect::centered(self.pos, Vec2::splat(r * 2.0)),
            Some(fill),
            Some(ring),
        );
        match self.kind {
            PowerUpKind::Shield => {
                canvas.polygon(shapes::regular_polygon(self.pos, r * 0.55, 6), Color::WHITE);
            }
            PowerUpKind::SlowMo => {
                // Clock hands
                canvas.line(self.pos, self.pos + Vec2::new(0.0, -r * 0.6), Color::WHITE, 2.0);
                canvas.line(self.pos, self.pos + Vec2::new(r * 0.45, 0.0), Color::WHITE, 2.0);
            }
        }
    }
}

impl Drawable for Obstacle {
    fn draw(&self, canvas: &mut Canvas<'_>) {
        let rect = self.rect();
        match self.kind {
            ObstacleKind::Cactus { arms } => {
                let trunk_w = rect.w * 0.45;
                let trunk = Rect::new(rect.center().x - trunk_w / 2.0, rect.y, trunk_w, rect.h);
                canvas.fill_rect(trunk, palette::CACTUS);
                let arm_w = (rect.w - trunk_w) / 2.0;
                if arms >= 1 {
                    canvas.fill_rect(
                        Rect::new(rect.x, rect.y + rect.h * 0.25, arm_w, rect.h * 0.3),
                        palette::CACTUS,
                    );
                }
                if arms >= 2 {
                    canvas.fill_rect(
                        Rect::new(rect.right() - arm_w, rect.y + rect.h * 0.15, arm_w, rect.h * 0.3),
                        palette::CACTUS,
                    );
                }
            }
            ObstacleKind::Bird { .. } => {
                let body = Rect::new(rect.x + 6.0, rect.y + rect.h * 0.4, rect.w - 10.0, rect.h * 0.45);
                canvas.oval(body, Some(palette::BIRD), None);
                canvas.polygon(
                    shapes::wing(body.center(), rect.w * 0.8, self.flap),
                    palette::BIRD,
                );
                canvas.polygon(
                    shapes::beak(Vec2::new(body.x + 1.0, body.center().y), 7.0),
                    palette::COIN_EDGE,
                );
            }
        }
        if canvas.debug {
            canvas.outline_rect(rect, palette::DEBUG);
        }
    }
}

impl Drawable for Player {
    fn draw(&self, canvas: &mut Canvas<'_>) {
        let rect = self.rect();
        let flicker = self.is_invulnerable(canvas.now) && (canvas.now / 80) % 2 == 0;
        if !flicker {
            canvas.fill_rect(rect, palette::PLAYER);
            let eye = Vec2::new(rect.right() - 10.0, rect.y + 8.0);
            canvas.circle(eye, 3.0, palette::PLAYER_EYE);
            // Legs alternate while running on the ground
            if self.on_ground && !self.ducking {
                let stride = if (canvas.now / 100) % 2 == 0 { 6.0 } else { -6.0 };
                let hip = Vec2::new(rect.center().x, rect.bottom() - 2.0);
                canvas.line(hip, hip + Vec2::new(stride, 2.0), palette::PLAYER, 3.0);
            }
        }
        if self.shield {
            let aura = Rect::centered(rect.center(), Vec2::new(rect.w + 14.0, rect.h + 14.0));
            canvas.oval(aura, None, Some(palette::SHIELD));
        }
        if canvas.debug {
            canvas.outline_rect(self.hitbox(), palette::DEBUG);
        }
    }
}

impl Drawable for Particle {
    fn draw(&self, canvas: &mut Canvas<'_>) {
        let color = self.tinted(canvas.sky, canvas.now);
        canvas.fill_rect(Rect::centered(self.pos, Vec2::splat(self.size)), color);
    }
}

fn draw_all<D: Drawable>(items: &[D], canvas: &mut Canvas<'_>) {
    for item in items {
        item.draw(canvas);
    }
}

fn draw_stars(state: &GameState, canvas: &mut Canvas<'_>) {
    let strength = (state.night_factor() - STAR_THRESHOLD) / (1.0 - STAR_THRESHOLD);
    let color = canvas.sky.blend(palette::STAR, strength);
    for (pos, r) in shapes::star_field(STAR_COUNT) {
        // The brightest ones twinkle as little five-point stars
        if r > 1.5 {
            canvas.polygon(shapes::star(pos, r * 2.2, r * 0.8, 5), color);
        } else {
            canvas.circle(pos, r, color);
        }
    }
}

fn draw_hud(state: &GameState, canvas: &mut Canvas<'_>) {
    let ink = canvas.ink;
    canvas.text(
        Vec2::new(WORLD_WIDTH - 12.0, 12.0),
        format!("HI {:05}  {:05}", state.high_score, state.score),
        ink,
        16.0,
        Anchor::Right,
    );
    let mut status = Vec::new();
    if state.player.shield {
        status.push("SHIELD");
    }
    if state.speed_scale() < 1.0 {
        status.push("SLOW");
    }
    if state.muted {
        status.push("MUTED");
    }
    if !status.is_empty() {
        canvas.text(Vec2::new(12.0, 12.0), status.join("  "), ink, 12.0, Anchor::Left);
    }
    if let Some(banner) = &state.banner {
        canvas.text(
            Vec2::new(WORLD_WIDTH / 2.0, 40.0),
            banner.text.clone(),
            ink,
            18.0,
            Anchor::Center,
        );
    }
}

/// Dim the scene and show centred lines
fn draw_overlay(canvas: &mut Canvas<'_>, lines: &[String]) {
    let dim = canvas.sky.blend(palette::OVERLAY, 0.55);
    canvas.fill_rect(
        Rect::new(0.0, WORLD_HEIGHT / 2.0 - 40.0, WORLD_WIDTH, 80.0),
        dim,
    );
    for (i, line) in lines.iter().enumerate() {
        let size = if i == 0 { 22.0 } else { 14.0 };
        canvas.text(
            Vec2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0 - 18.0 + i as f32 * 26.0),
            line.clone(),
            palette::TEXT_LIGHT,
            size,
            Anchor::Center,
        );
    }
}

fn draw_debug(state: &GameState, canvas: &mut Canvas<'_>) {
    let lines = [
        format!("seed {}  tick {}  clock {}ms", state.seed, state.ticks, state.clock_ms),
        format!(
            "speed {:.2} (eff {:.2}, target {:.2})",
            state.speed,
            state.effective_speed(),
            state.target_speed()
        ),
        format!("distance {:.0}  day {:.2}", state.distance, state.time_of_day),
        format!(
            "entities {} (obs {} coins {} pow {} clouds {} ground {}) fx {}",
            state.entity_count(),
            state.obstacles.len(),
            state.coins.len(),
            state.power_ups.len(),
            state.clouds.len(),
            state.ground.len(),
            state.particles.len()
        ),
        format!(
            "next obs {}ms coin {}ms pow {}ms",
            state.spawner.obstacle.remaining(state.clock_ms),
            state.spawner.collectible.remaining(state.clock_ms),
            state.spawner.power_up.remaining(state.clock_ms)
        ),
        format!("difficulty {}", state.difficulty.as_str()),
    ];
    for (i, line) in lines.into_iter().enumerate() {
        canvas.text(
            Vec2::new(12.0, 32.0 + i as f32 * 14.0),
            line,
            palette::DEBUG,
            11.0,
            Anchor::Left,
        );
    }
}

/// Emit one full frame for the runner.
///
/// `fault` is the message of a caught tick fault, drawn over everything.
pub fn render_runner(state: &GameState, fault: Option<&str>, sink: &mut dyn RenderSink) {
    let sky = state.sky_color();
    let mut canvas = Canvas::new(sink, state.clock_ms, sky);
    canvas.debug = state.debug;

    canvas.clear(sky);
    canvas.fill_rect(Rect::new(0.0, 0.0, WORLD_WIDTH, GROUND_Y), sky);
    if state.stars_visible() {
        draw_stars(state, &mut canvas);
    }

    draw_all(&state.clouds, &mut canvas);
    draw_all(&state.ground, &mut canvas);
    draw_all(&state.coins, &mut canvas);
    draw_all(&state.power_ups, &mut canvas);
    draw_all(&state.obstacles, &mut canvas);
    state.player.draw(&mut canvas);
    draw_all(&state.particles.particles, &mut canvas);

    draw_hud(state, &mut canvas);

    match state.phase {
        GamePhase::Ready => draw_overlay(
            &mut canvas,
            &[
                "SKY RUNNER".to_string(),
                "Space: jump   Down: duck   1/2/3: difficulty".to_string(),
            ],
        ),
        GamePhase::Paused => draw_overlay(
            &mut canvas,
            &["PAUSED".to_string(), "P: resume".to_string()],
        ),
        GamePhase::GameOver => {
            let headline = if state.new_high_score {
                format!("GAME OVER - NEW HIGH SCORE {}", state.high_score)
            } else {
                "GAME OVER".to_string()
            };
            draw_overlay(&mut canvas, &[headline, "R: restart".to_string()]);
        }
        GamePhase::Running => {}
    }

    if state.debug {
        draw_debug(state, &mut canvas);
    }

    if let Some(message) = fault {
        canvas.fill_rect(
            Rect::new(0.0, WORLD_HEIGHT / 2.0 - 50.0, WORLD_WIDTH, 100.0),
            palette::OVERLAY,
        );
        canvas.text(
            Vec2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0 - 20.0),
            "SIMULATION FAULT",
            palette::FAULT,
            20.0,
            Anchor::Center,
        );
        canvas.text(
            Vec2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0 + 6.0),
            message,
            palette::TEXT_LIGHT,
            12.0,
            Anchor::Center,
        );
        canvas.text(
            Vec2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0 + 28.0),
            "R: restart",
            palette::TEXT_LIGHT,
            12.0,
            Anchor::Center,
        );
    }
}
