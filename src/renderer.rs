use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{GLYPH_CELL, Theme};
use crate::grid::{GridSize, Position};
use crate::snapshot::{CellTag, Snapshot};
use crate::ui::hud::render_hud;
use crate::ui::menu::render_pause_menu;

/// Terminal columns used for one grid cell, keeping cells roughly square.
const CELL_COLUMNS: u16 = 2;

/// Renders the full game frame from an engine snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot, paused: bool, theme: &Theme) {
    let area = frame.area();
    let below_hud = render_hud(frame, area, snapshot, theme);
    let play_area = centered_board(below_hud, snapshot.bounds);

    let block = Block::bordered()
        .border_style(Style::new().fg(theme.border_fg))
        .style(Style::new().bg(theme.play_bg));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_cells(frame, inner, snapshot, theme);

    if paused {
        render_pause_menu(frame, play_area, snapshot.max_length, theme);
    }
}

fn render_cells(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot, theme: &Theme) {
    let buffer = frame.buffer_mut();
    // Paint body before head and food so later tags win on shared cells.
    let mut cells = snapshot.cells.clone();
    cells.sort_by_key(|cell| draw_order(cell.tag));

    for cell in cells {
        let Some((x, y)) = logical_to_terminal(inner, snapshot.bounds, cell.position) else {
            continue;
        };
        buffer.set_string(x, y, GLYPH_CELL, cell_style(cell.tag, theme));
    }
}

fn draw_order(tag: CellTag) -> u8 {
    match tag {
        CellTag::Body => 0,
        CellTag::GoodFood | CellTag::BadFood => 1,
        CellTag::Head => 2,
    }
}

fn cell_style(tag: CellTag, theme: &Theme) -> Style {
    match tag {
        CellTag::Head => Style::new()
            .fg(theme.snake_head)
            .add_modifier(Modifier::BOLD),
        CellTag::Body => Style::new().fg(theme.snake_body),
        CellTag::GoodFood => Style::new().fg(theme.good_food),
        CellTag::BadFood => Style::new().fg(theme.bad_food),
    }
}

/// Centers a bordered board sized to the grid inside `area`.
fn centered_board(area: Rect, bounds: GridSize) -> Rect {
    let width = bounds.width.saturating_mul(CELL_COLUMNS).saturating_add(2);
    let height = bounds.height.saturating_add(2);

    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);
    board
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !bounds.contains(position) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_COLUMNS)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
