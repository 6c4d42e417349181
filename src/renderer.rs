use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::{BOARD_BACKGROUND_COLOR, BORDER_COLOR, HUD_TEXT_COLOR};
use crate::grid::Cell;
use crate::round::{RoundStatus, Snapshot};

/// Terminal columns per grid cell; two columns make a cell roughly square.
pub const CELL_COLUMNS: u16 = 2;

const GLYPH_CELL: &str = "██";
const GLYPH_EMPTY: &str = "  ";

/// Renders the full game frame from a snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot) {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    let board_area = board_rect(play_area, snapshot);
    let block = Block::bordered()
        .title(" Snake ")
        .border_style(Style::new().fg(BORDER_COLOR))
        .style(Style::new().bg(BOARD_BACKGROUND_COLOR));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    let buffer = frame.buffer_mut();
    for cell in &snapshot.erased_cells {
        paint_cell(buffer, inner, *cell, GLYPH_EMPTY, BOARD_BACKGROUND_COLOR);
    }

    let (apple_cell, apple_color) = snapshot.apple;
    paint_cell(buffer, inner, apple_cell, GLYPH_CELL, apple_color);
    for barrier in &snapshot.barriers {
        paint_cell(buffer, inner, barrier.cell, GLYPH_CELL, barrier.color);
    }
    for segment in &snapshot.snake_segments {
        paint_cell(buffer, inner, *segment, GLYPH_CELL, snapshot.snake_color);
    }

    render_hud(frame, hud_area, snapshot);

    if snapshot.status == RoundStatus::Paused {
        render_pause_banner(frame, inner);
    }
}

/// Outer rectangle of the bordered board, clipped to `area`.
#[must_use]
pub fn board_rect(area: Rect, snapshot: &Snapshot) -> Rect {
    let width = snapshot
        .grid
        .width
        .saturating_mul(CELL_COLUMNS)
        .saturating_add(2);
    let height = snapshot.grid.height.saturating_add(2);

    Rect {
        x: area.x,
        y: area.y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot) {
    let label = Style::new().fg(Color::DarkGray);
    let value = Style::new().fg(HUD_TEXT_COLOR).add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::styled("Length ", label),
        Span::styled(snapshot.snake_segments.len().to_string(), value),
        Span::styled("  Round ", label),
        Span::styled(snapshot.round.to_string(), value),
        Span::styled("  [Arrows] Move  [Space] Pause  [Q] Quit", label),
    ];
    if snapshot.status == RoundStatus::Paused {
        spans.push(Span::styled("  PAUSED", value));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_pause_banner(frame: &mut Frame<'_>, inner: Rect) {
    let [_, row, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);

    frame.render_widget(Clear, row);
    frame.render_widget(
        Paragraph::new("PAUSED")
            .alignment(Alignment::Center)
            .style(Style::new().fg(HUD_TEXT_COLOR).add_modifier(Modifier::BOLD)),
        row,
    );
}

fn paint_cell(buffer: &mut Buffer, inner: Rect, cell: Cell, glyph: &str, color: Color) {
    let Some((x, y)) = logical_to_terminal(inner, cell) else {
        return;
    };

    buffer.set_string(x, y, glyph, Style::new().fg(color).bg(BOARD_BACKGROUND_COLOR));
}

fn logical_to_terminal(inner: Rect, cell: Cell) -> Option<(u16, u16)> {
    let x_offset = u16::try_from(cell.x).ok()?.checked_mul(CELL_COLUMNS)?;
    let y_offset = u16::try_from(cell.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_COLUMNS) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
