use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    CELL_HEIGHT, CELL_WIDTH, GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD_DOWN,
    GLYPH_SNAKE_HEAD_LEFT, GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_UP, GLYPH_SNAKE_TAIL,
};
use crate::grid::Coordinate;
use crate::input::Direction;
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over_menu, render_start_menu, render_too_small};
use crate::view::SessionView;

/// Presentation flags owned by the front end rather than the session.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct FrameInfo {
    /// No directional input yet, so the tick timer is not running.
    pub waiting_for_input: bool,
    /// The terminal cannot fit the board; play is suspended.
    pub viewport_too_small: bool,
}

/// Renders the full game frame from a session view.
pub fn render(frame: &mut Frame<'_>, view: &SessionView, info: FrameInfo) {
    let area = frame.area();
    if info.viewport_too_small {
        render_too_small(frame, area);
        return;
    }

    let play_area = render_hud(frame, area, view);

    let block = Block::bordered().border_style(Style::new().fg(Color::DarkGray));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_food(frame, inner, view);
    render_snake(frame, inner, view);

    if view.is_finished() {
        render_game_over_menu(frame, play_area, view.score, view.finish_reason);
    } else if info.waiting_for_input {
        render_start_menu(frame, play_area);
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, view: &SessionView) {
    let buffer = frame.buffer_mut();
    for item in &view.food {
        if let Some((x, y)) = grid_to_terminal(inner, *item) {
            buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(Color::Red));
        }
    }
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, view: &SessionView) {
    let last = view.segments.len().saturating_sub(1);
    let buffer = frame.buffer_mut();

    // Tail first so the head wins when segments share a cell.
    for (index, segment) in view.segments.iter().enumerate().rev() {
        let Some((x, y)) = grid_to_terminal(inner, *segment) else {
            continue;
        };

        let (glyph, style) = if index == 0 {
            (
                head_glyph(view.facing),
                Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
            )
        } else if index == last {
            (GLYPH_SNAKE_TAIL, Style::new().fg(Color::DarkGray))
        } else {
            (GLYPH_SNAKE_BODY, Style::new().fg(Color::Green))
        };
        buffer.set_string(x, y, glyph, style);
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

/// Maps a grid cell to the terminal position of its left glyph.
///
/// Returns `None` for cells outside `inner`, such as a tail still trailing
/// off the board.
fn grid_to_terminal(inner: Rect, position: Coordinate) -> Option<(u16, u16)> {
    let row = u16::try_from(position.row).ok()?;
    let col = u16::try_from(position.col).ok()?;

    let x = inner.x.checked_add(col.checked_mul(CELL_WIDTH)?)?;
    let y = inner.y.checked_add(row.checked_mul(CELL_HEIGHT)?)?;
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use crate::config::{GLYPH_FOOD, GLYPH_SNAKE_HEAD_RIGHT, GameConfig};
    use crate::food::FoodPool;
    use crate::game::GameSession;
    use crate::grid::{Coordinate, Grid};

    use super::{FrameInfo, grid_to_terminal, render};

    #[test]
    fn cells_map_two_columns_wide() {
        let inner = Rect::new(1, 1, 20, 10);

        assert_eq!(grid_to_terminal(inner, Coordinate::new(0, 0)), Some((1, 1)));
        assert_eq!(grid_to_terminal(inner, Coordinate::new(2, 3)), Some((7, 3)));
        assert_eq!(grid_to_terminal(inner, Coordinate::new(0, 10)), None);
        assert_eq!(grid_to_terminal(inner, Coordinate::new(-1, 0)), None);
    }

    #[test]
    fn frame_shows_head_food_and_score() {
        let grid = Grid::new(5, 10).expect("grid should be valid");
        let mut session = GameSession::new_with_seed(grid, GameConfig::default(), 4);
        session.food = FoodPool::from_items(vec![Coordinate::new(2, 4)]);
        let view = session.view();

        let mut terminal = Terminal::new(TestBackend::new(22, 9)).expect("test terminal");
        terminal
            .draw(|frame| render(frame, &view, FrameInfo::default()))
            .expect("draw should succeed");

        let buffer = terminal.backend().buffer();
        let cell = |x: u16, y: u16| buffer[(x, y)].symbol().to_owned();
        let head: Vec<_> = GLYPH_SNAKE_HEAD_RIGHT.chars().map(String::from).collect();
        let food: Vec<_> = GLYPH_FOOD.chars().map(String::from).collect();

        assert_eq!(cell(1, 1), head[0]);
        assert_eq!(cell(2, 1), head[1]);
        assert_eq!(cell(9, 3), food[0]);
        assert_eq!(cell(10, 3), food[1]);

        let hud: String = (0..22).map(|x| cell(x, 7)).collect();
        assert!(hud.contains("Score 0"), "hud row was {hud:?}");
    }

    #[test]
    fn too_small_frame_replaces_the_board() {
        let grid = Grid::new(5, 10).expect("grid should be valid");
        let session = GameSession::new_with_seed(grid, GameConfig::default(), 4);
        let view = session.view();
        let info = FrameInfo {
            viewport_too_small: true,
            ..FrameInfo::default()
        };

        let mut terminal = Terminal::new(TestBackend::new(20, 3)).expect("test terminal");
        terminal
            .draw(|frame| render(frame, &view, info))
            .expect("draw should succeed");

        let buffer = terminal.backend().buffer();
        let first: String = (0..20).map(|x| buffer[(x, 0)].symbol().to_owned()).collect();
        assert!(first.contains("Terminal too small"), "row was {first:?}");
        assert!(!first.contains(GLYPH_SNAKE_HEAD_RIGHT));
    }
}
