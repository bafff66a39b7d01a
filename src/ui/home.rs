use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::{bold, dim, render_legend, render_message, HORIZONTAL_MARGIN, VERTICAL_MARGIN};
use crate::{app::App, clock::Clock, store::SessionStore};

pub fn render<S: SessionStore, C: Clock>(app: &App<S, C>, f: &mut Frame) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(0),    // top padding
            Constraint::Length(2), // title
            Constraint::Length(2), // tagline
            Constraint::Length(3), // input
            Constraint::Length(2), // message
            Constraint::Min(0),    // bottom padding
            Constraint::Length(1), // legend
        ])
        .split(area);

    let title = Paragraph::new(Span::styled("Schedyulah", bold().fg(Color::Magenta)))
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[1]);

    let tagline = Paragraph::new(Line::from(vec![
        Span::styled("Track your focus. ", dim()),
        Span::styled("What are you working on?", bold()),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(tagline, chunks[2]);

    let input_width = chunks[3].width.min(60);
    let input_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(input_width),
            Constraint::Min(0),
        ])
        .split(chunks[3])[1];

    let (text, style) = if app.input.is_empty() {
        ("e.g. Reading, Coding, Studying...", dim())
    } else {
        (app.input.as_str(), Style::default())
    };
    let input = Paragraph::new(Span::styled(text.to_string(), style)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta))
            .title("Activity"),
    );
    f.render_widget(input, input_area);

    f.set_cursor_position(Position::new(
        cursor_column(input_area, &app.input),
        input_area.y.saturating_add(1),
    ));

    render_message(f, chunks[4], app.message.as_deref());
    render_legend(
        f,
        chunks[6],
        &[("enter", "start timer"), ("tab", "dashboard"), ("esc", "quit")],
    );
}

/// Column just after the typed text, kept inside the input's border
fn cursor_column(area: Rect, input: &str) -> u16 {
    let text_width = u16::try_from(input.width()).unwrap_or(u16::MAX);
    let max_x = area.x.saturating_add(area.width.saturating_sub(2));
    area.x
        .saturating_add(1)
        .saturating_add(text_width)
        .min(max_x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_follows_display_width() {
        let area = Rect::new(10, 4, 40, 3);
        assert_eq!(cursor_column(area, ""), 11);
        assert_eq!(cursor_column(area, "Code"), 15);
        // wide glyphs take two columns each
        assert_eq!(cursor_column(area, "読書"), 15);
    }

    #[test]
    fn cursor_is_clamped_for_huge_input() {
        let area = Rect::new(10, 4, 40, 3);
        let pasted = "x".repeat(70_000);
        assert_eq!(cursor_column(area, &pasted), 48);
    }
}
