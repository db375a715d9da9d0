use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::Theme;
use crate::snapshot::Snapshot;

/// Renders the caption row and the status row, returning the area below them.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot, theme: &Theme) -> Rect {
    let [caption_area, status_area, play_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);

    let caption = fit_to_width(&snapshot.caption(), usize::from(caption_area.width));
    frame.render_widget(
        Paragraph::new(Line::from(caption))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.caption)
                    .add_modifier(Modifier::BOLD),
            ),
        caption_area,
    );

    frame.render_widget(
        Paragraph::new(status_line(snapshot, theme)).alignment(Alignment::Center),
        status_area,
    );

    play_area
}

fn status_line(snapshot: &Snapshot, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::raw("Length: "),
        Span::styled(
            snapshot.length.to_string(),
            Style::default().fg(theme.snake_head),
        ),
        Span::raw("  Good: "),
        Span::styled("■", Style::default().fg(theme.good_food)),
        Span::raw("  Bad: "),
        Span::styled("■", Style::default().fg(theme.bad_food)),
        Span::raw(format!(
            "  {}x{}",
            snapshot.bounds.width, snapshot.bounds.height
        )),
    ])
}

/// Truncates `text` to at most `width` terminal columns, marking the cut
/// with an ellipsis.
fn fit_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_owned();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width + 1 > width {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out.push('…');
    out
}
