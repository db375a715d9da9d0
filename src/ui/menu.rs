use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::Theme;

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect, max_length: usize, theme: &Theme) {
    let popup = centered_popup(area, 60, 40);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("PAUSED").style(
            Style::default()
                .fg(theme.overlay_title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Max length: {max_length}")),
        Line::from(""),
        Line::from("[P] Resume  [Q]/[A] Speed"),
        Line::from("[Esc] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
