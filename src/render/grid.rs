//! Grid snake render pass

use glam::Vec2;

use super::{Anchor, Canvas, RenderSink};
use crate::color::palette;
use crate::grid::{CELL, COLS, Cell, GridPhase, ROWS, SnakeGame};
use crate::sim::Rect;

pub const BOARD_WIDTH: f32 = COLS as f32 * CELL;
pub const BOARD_HEIGHT: f32 = ROWS as f32 * CELL;

/// Cell rectangle with a 1 px gap on every side
fn cell_rect(cell: Cell) -> Rect {
    Rect::new(
        cell.x as f32 * CELL + 1.0,
        cell.y as f32 * CELL + 1.0,
        CELL - 2.0,
        CELL - 2.0,
    )
}

pub fn render_grid(game: &SnakeGame, sink: &mut dyn RenderSink) {
    let mut canvas = Canvas::new(sink, game.steps(), palette::BOARD);
    canvas.clear(palette::BOARD);

    for col in 0..COLS {
        let x = col as f32 * CELL;
        canvas.line(Vec2::new(x, 0.0), Vec2::new(x, BOARD_HEIGHT), palette::BOARD_LINE, 1.0);
    }
    for row in 0..ROWS {
        let y = row as f32 * CELL;
        canvas.line(Vec2::new(0.0, y), Vec2::new(BOARD_WIDTH, y), palette::BOARD_LINE, 1.0);
    }

    canvas.oval(cell_rect(game.food()), Some(palette::FOOD), None);
    for (i, cell) in game.snake().enumerate() {
        let color = if i == 0 { palette::SNAKE_HEAD } else { palette::SNAKE };
        canvas.fill_rect(cell_rect(cell), color);
    }

    canvas.text(
        Vec2::new(8.0, 8.0),
        format!("Score: {}   High: {}", game.score, game.high_score),
        palette::TEXT_LIGHT,
        14.0,
        Anchor::Left,
    );

    let message = match game.phase {
        GridPhase::Ready => Some("Press any arrow key to start"),
        GridPhase::Paused => Some("Paused - P to resume"),
        GridPhase::GameOver => Some("Game Over - R to restart"),
        GridPhase::Won => Some("Board cleared! - R to restart"),
        GridPhase::Running => None,
    };
    if let Some(message) = message {
        let dim = palette::BOARD.blend(palette::OVERLAY, 0.5);
        canvas.fill_rect(Rect::new(0.0, BOARD_HEIGHT / 2.0 - 30.0, BOARD_WIDTH, 60.0), dim);
        canvas.text(
            Vec2::new(BOARD_WIDTH / 2.0, BOARD_HEIGHT / 2.0),
            message,
            palette::TEXT_LIGHT,
            16.0,
            Anchor::Center,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Direction, GridInput};
    use crate::persistence::MemoryStore;
    use crate::render::DrawCommand;

    #[test]
    fn test_grid_frame_layers() {
        let mut game = SnakeGame::new(1, Box::new(MemoryStore::new()));
        let mut sink = Vec::new();
        render_grid(&game, &mut sink);

        let lines = sink
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count();
        assert_eq!(lines, (COLS + ROWS) as usize);
        let food = sink
            .iter()
            .position(|c| matches!(c, DrawCommand::Oval { fill: Some(f), .. } if *f == palette::FOOD))
            .unwrap();
        let head = sink
            .iter()
            .position(|c| matches!(c, DrawCommand::Rect { fill: Some(f), .. } if *f == palette::SNAKE_HEAD))
            .unwrap();
        assert!(food < head);
        assert!(sink.iter().any(|c| matches!(
            c,
            DrawCommand::Text { text, .. } if text.starts_with("Press any arrow")
        )));

        game.handle_input(GridInput::Turn(Direction::Down));
        let mut sink = Vec::new();
        render_grid(&game, &mut sink);
        assert!(matches!(sink.last(), Some(DrawCommand::Text { text, .. }) if text.starts_with("Score")));
    }
}
