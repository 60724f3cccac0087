//! Draw-command rendering
//!
//! The core never rasterizes. Each frame it walks the world back-to-front and
//! emits primitive commands in world pixel coordinates into a `RenderSink`;
//! hosts translate those to whatever surface they own.

pub mod grid;
pub mod scene;
pub mod shapes;

use glam::Vec2;

use crate::color::Color;
use crate::sim::Rect;

pub use scene::{Drawable, render_runner};

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Left,
    Center,
    Right,
}

/// One primitive draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Wipe the whole surface
    Clear { color: Color },
    Rect {
        rect: Rect,
        fill: Option<Color>,
        outline: Option<Color>,
    },
    /// Ellipse inscribed in `rect`
    Oval {
        rect: Rect,
        fill: Option<Color>,
        outline: Option<Color>,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
    },
    Polygon { points: Vec<Vec2>, fill: Color },
    Text {
        pos: Vec2,
        text: String,
        color: Color,
        size: f32,
        anchor: Anchor,
    },
}

/// Anything that accepts draw commands
pub trait RenderSink {
    fn draw(&mut self, command: DrawCommand);
}

/// Recording sink, handy for tests and headless hosts
impl RenderSink for Vec<DrawCommand> {
    fn draw(&mut self, command: DrawCommand) {
        self.push(command);
    }
}

/// Counts commands without keeping them
#[derive(Debug, Default, Clone, Copy)]
pub struct CountingSink {
    pub commands: usize,
}

impl RenderSink for CountingSink {
    fn draw(&mut self, _command: DrawCommand) {
        self.commands += 1;
    }
}

/// Sink plus per-frame context shared by every `Drawable`
pub struct Canvas<'a> {
    sink: &'a mut dyn RenderSink,
    /// Simulation clock, for animations
    pub now: u64,
    /// Current sky color; particles fade toward it
    pub sky: Color,
    /// Color for HUD text that reads on the current sky
    pub ink: Color,
    pub debug: bool,
}

impl<'a> Canvas<'a> {
    pub fn new(sink: &'a mut dyn RenderSink, now: u64, sky: Color) -> Self {
        let ink = if sky.luma() > 0.5 {
            crate::color::palette::TEXT
        } else {
            crate::color::palette::TEXT_LIGHT
        };
        Self {
            sink,
            now,
            sky,
            ink,
            debug: false,
        }
    }

    pub fn clear(&mut self, color: Color) {
        self.sink.draw(DrawCommand::Clear { color });
    }

    pub fn fill_rect(&mut self, rect: Rect, fill: Color) {
        self.sink.draw(DrawCommand::Rect {
            rect,
            fill: Some(fill),
            outline: None,
        });
    }

    pub fn outline_rect(&mut self, rect: Rect, outline: Color) {
        self.sink.draw(DrawCommand::Rect {
            rect,
            fill: None,
            outline: Some(outline),
        });
    }

    pub fn oval(&mut self, rect: Rect, fill: Option<Color>, outline: Option<Color>) {
        self.sink.draw(DrawCommand::Oval {
            rect,
            fill,
            outline,
        });
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, fill: Color) {
        self.oval(Rect::centered(center, Vec2::splat(radius * 2.0)), Some(fill), None);
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        self.sink.draw(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    pub fn polygon(&mut self, points: Vec<Vec2>, fill: Color) {
        if points.len() >= 3 {
            self.sink.draw(DrawCommand::Polygon { points, fill });
        }
    }

    pub fn text(&mut self, pos: Vec2, text: impl Into<String>, color: Color, size: f32, anchor: Anchor) {
        self.sink.draw(DrawCommand::Text {
            pos,
            text: text.into(),
            color,
            size,
            anchor,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::palette;

    #[test]
    fn test_canvas_ink_follows_sky() {
        let mut sink: Vec<DrawCommand> = Vec::new();
        assert_eq!(Canvas::new(&mut sink, 0, palette::SKY_DAY).ink, palette::TEXT);
        assert_eq!(Canvas::new(&mut sink, 0, palette::SKY_NIGHT).ink, palette::TEXT_LIGHT);
    }

    #[test]
    fn test_degenerate_polygon_skipped() {
        let mut sink: Vec<DrawCommand> = Vec::new();
        let mut canvas = Canvas::new(&mut sink, 0, Color::WHITE);
        canvas.polygon(vec![Vec2::ZERO, Vec2::ONE], Color::BLACK);
        canvas.circle(Vec2::new(5.0, 5.0), 2.0, Color::BLACK);
        drop(canvas);
        assert_eq!(sink.len(), 1);
        assert!(matches!(sink[0], DrawCommand::Oval { .. }));
    }
}
