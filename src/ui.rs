pub mod dashboard;
pub mod home;
pub mod timer;

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    app::{App, Page},
    clock::Clock,
    store::SessionStore,
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

pub fn draw<S: SessionStore, C: Clock>(app: &App<S, C>, f: &mut Frame) {
    match app.page {
        Page::Home => home::render(app, f),
        Page::Timer => timer::render(app, f),
        Page::Dashboard => dashboard::render(app, f),
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

/// One-line key legend at the bottom of every page
fn render_legend(f: &mut Frame, area: Rect, keys: &[(&str, &str)]) {
    let mut spans = Vec::with_capacity(keys.len() * 3);
    for (idx, (key, label)) in keys.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled("   ", dim()));
        }
        spans.push(Span::styled(format!("({key})"), bold().fg(Color::Magenta)));
        spans.push(Span::styled(format!(" {label}"), dim()));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn render_message(f: &mut Frame, area: Rect, message: Option<&str>) {
    if let Some(message) = message {
        f.render_widget(
            Paragraph::new(Span::styled(
                message.to_string(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
            ))
            .alignment(Alignment::Center),
            area,
        );
    }
}
