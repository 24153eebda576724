use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::config::HUD_HEIGHT;
use crate::view::SessionView;

const HUD_MARGIN_X: u16 = 1;
const SPEED_BOOST_LABEL: &str = "+speed";

/// Renders the two-line HUD and returns the play area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, view: &SessionView) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(HUD_HEIGHT)]).areas(area);
    let [score_row, status_row] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(hud_area);

    let score_row = inset_horizontal(score_row, HUD_MARGIN_X);
    let status_row = inset_horizontal(status_row, HUD_MARGIN_X);

    frame.render_widget(Paragraph::new(score_line(view, score_row.width)), score_row);
    frame.render_widget(Paragraph::new(status_line(view, status_row.width)), status_row);

    play_area
}

fn score_line(view: &SessionView, width: u16) -> Line<'static> {
    let mut left = vec![Span::styled(
        format!("Score {}", view.score),
        Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
    )];
    if view.speed_boost {
        left.push(Span::raw(" "));
        left.push(Span::styled(SPEED_BOOST_LABEL, Style::new().fg(Color::Yellow)));
    }

    let right = format!("Length {}", view.segments.len());
    justify(left, right, width)
}

fn status_line(view: &SessionView, width: u16) -> Line<'static> {
    let left = vec![Span::styled(
        format!("{}ms/tick", view.speed_ms),
        Style::new().fg(Color::DarkGray),
    )];
    let right = format!("{}x{}  food {}", view.cols, view.rows, view.food.len());
    justify(left, right, width)
}

/// Puts `right` flush against the right edge, dropping it when it does not fit.
fn justify(mut left: Vec<Span<'static>>, right: String, width: u16) -> Line<'static> {
    let used: usize = left.iter().map(|span| span.content.width()).sum();
    let right_width = right.width();
    let available = usize::from(width);

    if used + 1 + right_width <= available {
        left.push(Span::raw(" ".repeat(available - used - right_width)));
        left.push(Span::styled(right, Style::new().fg(Color::DarkGray)));
    }

    Line::from(left)
}

fn inset_horizontal(area: Rect, margin: u16) -> Rect {
    let total_margin = margin.saturating_mul(2);
    Rect {
        x: area.x.saturating_add(margin),
        y: area.y,
        width: area.width.saturating_sub(total_margin),
        height: area.height,
    }
}
