//! Game objects that scroll past the player
//!
//! A flat capability set: every entity has `update` + `is_dead`, collidable
//! ones also expose `rect`. Kinds are closed enums so the scheduler and the
//! collision pass stay exhaustive. Drawing lives in `render::scene`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::timer::Timer;
use crate::consts::*;

/// Read-only view of the world handed to every entity update
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    /// Simulation clock (ms)
    pub now: u64,
    /// Effective scroll speed this tick (px/tick, slow-motion applied)
    pub speed: f32,
    /// Player hit-box after physics
    pub player: Rect,
}

/// Something a self-resolving pickup reports back when taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pickup {
    Coin,
    PowerUp(PowerUpKind),
}

/// Per-tick behaviour shared by all scrolling entities
pub trait Entity {
    /// Advance one tick. Pickups test themselves against `frame.player`.
    fn update(&mut self, frame: &Frame) -> Option<Pickup>;
    fn is_dead(&self) -> bool;
}

/// Entities with a collision surface
pub trait Collidable {
    fn rect(&self) -> Rect;
}

/// Advance a collection, collect pickups, then prune the dead
pub fn update_pickups<E>(items: &mut Vec<E>, frame: &Frame, picked: &mut Vec<(Pickup, Vec2)>)
where
    E: Entity + Collidable,
{
    for item in items.iter_mut() {
        if let Some(p) = item.update(frame) {
            picked.push((p, item.rect().center()));
        }
    }
    items.retain(|e| !e.is_dead());
}

// === Player ===

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Vertical velocity (px/tick, positive = down)
    pub vel_y: f32,
    pub on_ground: bool,
    pub ducking: bool,
    /// Most recent duck input, applied on landing
    pub duck_held: bool,
    pub shield: bool,
    /// Post-hit flicker window
    pub invulnerable: Option<Timer>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, GROUND_Y - PLAYER_HEIGHT),
            vel_y: 0.0,
            on_ground: true,
            ducking: false,
            duck_held: false,
            shield: false,
            invulnerable: None,
        }
    }
}

impl Player {
    pub fn size(&self) -> Vec2 {
        if self.ducking {
            Vec2::new(PLAYER_DUCK_WIDTH, PLAYER_DUCK_HEIGHT)
        } else {
            Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)
        }
    }

    /// Top edge when standing on the ground in the current profile
    pub fn rest_y(&self) -> f32 {
        GROUND_Y - self.size().y
    }

    pub fn rect(&self) -> Rect {
        let size = self.size();
        Rect::new(self.pos.x, self.pos.y, size.x, size.y)
    }

    /// Forgiving hit-box used against obstacles and pickups
    pub fn hitbox(&self) -> Rect {
        self.rect().inset(PLAYER_INSET_X, PLAYER_INSET_Y)
    }

    pub fn feet(&self) -> Vec2 {
        let size = self.size();
        Vec2::new(self.pos.x + size.x / 2.0, self.pos.y + size.y)
    }

    pub fn is_invulnerable(&self, now: u64) -> bool {
        self.invulnerable.is_some_and(|t| !t.done(now))
    }
}

// === Obstacles ===

/// Bird lanes: bottom edge height above the ground
pub const BIRD_LANES: [f32; 3] = [22.0, 52.0, 88.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Ground hazard; `arms` is cosmetic
    Cactus { arms: u8 },
    /// Air hazard in one of `BIRD_LANES`
    Bird { lane: u8 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Wing animation phase (birds only)
    pub flap: f32,
    pub dead: bool,
}

impl Obstacle {
    pub fn cactus(x: f32, width: f32, height: f32, arms: u8) -> Self {
        Self {
            kind: ObstacleKind::Cactus { arms },
            pos: Vec2::new(x, GROUND_Y - height),
            size: Vec2::new(width, height),
            flap: 0.0,
            dead: false,
        }
    }

    pub fn bird(x: f32, lane: u8) -> Self {
        let size = Vec2::new(42.0, 26.0);
        let lift = BIRD_LANES[(lane as usize).min(BIRD_LANES.len() - 1)];
        Self {
            kind: ObstacleKind::Bird { lane },
            pos: Vec2::new(x, GROUND_Y - lift - size.y),
            size,
            flap: 0.0,
            dead: false,
        }
    }

    /// Horizontal displacement per tick at scroll speed `speed`
    pub fn step(&self, speed: f32) -> f32 {
        match self.kind {
            ObstacleKind::Cactus { .. } => speed,
            ObstacleKind::Bird { .. } => speed * BIRD_SPEED_FACTOR,
        }
    }
}

impl Entity for Obstacle {
    fn update(&mut self, frame: &Frame) -> Option<Pickup> {
        self.pos.x -= self.step(frame.speed);
        if matches!(self.kind, ObstacleKind::Bird { .. }) {
            self.flap = (self.flap + 0.25) % std::f32::consts::TAU;
        }
        if self.pos.x + self.size.x < 0.0 {
            self.dead = true;
        }
        None
    }

    fn is_dead(&self) -> bool {
        self.dead
    }
}

impl Collidable for Obstacle {
    fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }
}

// === Coins ===

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Vec2,
    pub radius: f32,
    /// Spin phase in radians, drives the squashed-oval render
    pub spin: f32,
    pub taken: bool,
    pub dead: bool,
}

impl Coin {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: 9.0,
            spin: 0.0,
            taken: false,
            dead: false,
        }
    }
}

impl Entity for Coin {
    fn update(&mut self, frame: &Frame) -> Option<Pickup> {
        self.pos.x -= frame.speed;
        self.spin = (self.spin + 0.15) % std::f32::consts::TAU;
        if !self.taken && self.rect().intersects(&frame.player) {
            self.taken = true;
            self.dead = true;
            return Some(Pickup::Coin);
        }
        if self.pos.x + self.radius < 0.0 {
            self.dead = true;
        }
        None
    }

    fn is_dead(&self) -> bool {
        self.dead
    }
}

impl Collidable for Coin {
    fn rect(&self) -> Rect {
        Rect::centered(self.pos, Vec2::splat(self.radius * 2.0))
    }
}

// === Power-ups ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// One-hit protection
    Shield,
    /// Timed global slow-down
    SlowMo,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 2] = [PowerUpKind::Shield, PowerUpKind::SlowMo];

    pub fn label(self) -> &'static str {
        match self {
            PowerUpKind::Shield => "Shield",
            PowerUpKind::SlowMo => "Slow motion",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub radius: f32,
    /// Pulse phase for rendering
    pub pulse: f32,
    pub dead: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            radius: 12.0,
            pulse: 0.0,
            dead: false,
        }
    }
}

impl Entity for PowerUp {
    fn update(&mut self, frame: &Frame) -> Option<Pickup> {
        self.pos.x -= frame.speed;
        self.pulse = (self.pulse + 0.1) % std::f32::consts::TAU;
        if !self.dead && self.rect().intersects(&frame.player) {
            self.dead = true;
            return Some(Pickup::PowerUp(self.kind));
        }
        if self.pos.x + self.radius < 0.0 {
            self.dead = true;
        }
        None
    }

    fn is_dead(&self) -> bool {
        self.dead
    }
}

impl Collidable for PowerUp {
    fn rect(&self) -> Rect {
        Rect::centered(self.pos, Vec2::splat(self.radius * 2.0))
    }
}

// === Decor ===

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub dead: bool,
}

impl Cloud {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            dead: false,
        }
    }
}

impl Entity for Cloud {
    fn update(&mut self, frame: &Frame) -> Option<Pickup> {
        self.pos.x -= frame.speed;
        if self.pos.x + self.size.x < 0.0 {
            self.dead = true;
        }
        None
    }

    fn is_dead(&self) -> bool {
        self.dead
    }
}

/// A cosmetic speck on a ground segment, relative to the segment's left edge
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pebble {
    pub dx: f32,
    pub dy: f32,
    pub w: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundSeg {
    pub x: f32,
    pub width: f32,
    pub pebbles: Vec<Pebble>,
    pub dead: bool,
}

impl GroundSeg {
    pub fn new(x: f32, pebbles: Vec<Pebble>) -> Self {
        Self {
            x,
            width: GROUND_SEGMENT_WIDTH,
            pebbles,
            dead: false,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

impl Entity for GroundSeg {
    fn update(&mut self, frame: &Frame) -> Option<Pickup> {
        self.x -= frame.speed;
        if self.right() < 0.0 {
            self.dead = true;
        }
        None
    }

    fn is_dead(&self) -> bool {
        self.dead
    }
}

/// Advance a collection that never yields pickups, then prune
pub fn advance_all<E: Entity>(items: &mut Vec<E>, frame: &Frame) {
    for item in items.iter_mut() {
        item.update(frame);
    }
    items.retain(|e| !e.is_dead());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(speed: f32, player: Rect) -> Frame {
        Frame {
            now: 0,
            speed,
            player,
        }
    }

    fn far_player() -> Rect {
        Rect::new(-1000.0, -1000.0, 1.0, 1.0)
    }

    #[test]
    fn test_cactus_scrolls_at_speed_and_bird_faster() {
        let f = frame(8.0, far_player());
        let mut cactus = Obstacle::cactus(500.0, 20.0, 40.0, 1);
        let mut bird = Obstacle::bird(500.0, 1);
        cactus.update(&f);
        bird.update(&f);
        assert_eq!(cactus.pos.x, 492.0);
        assert!((bird.pos.x - (500.0 - 8.0 * BIRD_SPEED_FACTOR)).abs() < 1e-4);
    }

    #[test]
    fn test_cactus_sits_on_ground() {
        let cactus = Obstacle::cactus(500.0, 20.0, 40.0, 0);
        assert_eq!(cactus.rect().bottom(), GROUND_Y);
    }

    #[test]
    fn test_bird_lanes() {
        for (lane, lift) in BIRD_LANES.iter().enumerate() {
            let bird = Obstacle::bird(0.0, lane as u8);
            assert!((GROUND_Y - bird.rect().bottom() - lift).abs() < 1e-4);
        }
    }

    #[test]
    fn test_obstacle_dies_off_screen() {
        let mut cactus = Obstacle::cactus(-15.0, 20.0, 40.0, 0);
        cactus.update(&frame(4.0, far_player()));
        assert!(!cactus.dead);
        cactus.update(&frame(4.0, far_player()));
        assert!(cactus.dead);
    }

    #[test]
    fn test_coin_collects_itself_once() {
        let mut coin = Coin::new(Vec2::new(110.0, 200.0));
        let player = Rect::new(90.0, 190.0, 20.0, 20.0);
        assert_eq!(coin.update(&frame(5.0, player)), Some(Pickup::Coin));
        assert!(coin.taken && coin.dead);
        assert_eq!(coin.update(&frame(5.0, player)), None);
    }

    #[test]
    fn test_power_up_reports_kind() {
        let mut p = PowerUp::new(PowerUpKind::SlowMo, Vec2::new(100.0, 100.0));
        let player = Rect::new(95.0, 95.0, 10.0, 10.0);
        assert_eq!(
            p.update(&frame(1.0, player)),
            Some(Pickup::PowerUp(PowerUpKind::SlowMo))
        );
        assert!(p.dead);
    }

    #[test]
    fn test_update_pickups_prunes_and_reports() {
        let mut coins = vec![
            Coin::new(Vec2::new(100.0, 100.0)),
            Coin::new(Vec2::new(600.0, 100.0)),
            Coin::new(Vec2::new(-30.0, 100.0)),
        ];
        let player = Rect::new(90.0, 90.0, 20.0, 20.0);
        let mut picked = Vec::new();
        update_pickups(&mut coins, &frame(2.0, player), &mut picked);
        assert_eq!(picked.len(), 1);
        assert_eq!(coins.len(), 1);
        assert_eq!(coins[0].pos.x, 598.0);
    }

    #[test]
    fn test_player_profiles() {
        let mut p = Player::default();
        assert_eq!(p.rect().bottom(), GROUND_Y);
        p.ducking = true;
        assert_eq!(p.rest_y(), GROUND_Y - PLAYER_DUCK_HEIGHT);
        assert!(p.hitbox().w < p.rect().w);
    }

    #[test]
    fn test_ground_segment_recycles_off_screen() {
        let mut seg = GroundSeg::new(-295.0, Vec::new());
        let mut segs = vec![seg.clone()];
        advance_all(&mut segs, &frame(10.0, far_player()));
        assert!(segs.is_empty());
        seg.update(&frame(1.0, far_player()));
        assert!(!seg.dead);
    }
}
