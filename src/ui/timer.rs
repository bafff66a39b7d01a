use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{bold, dim, render_legend, render_message, HORIZONTAL_MARGIN, VERTICAL_MARGIN};
use crate::{
    app::App, clock::Clock, session::SessionSummary, store::SessionStore, timer::TimerStatus,
    util::format_clock,
};

pub fn render<S: SessionStore, C: Clock>(app: &App<S, C>, f: &mut Frame) {
    let area = f.area();
    match app.preview() {
        Some(summary) => render_summary(app, summary, f, area),
        None => render_stopwatch(app, f, area),
    }
}

fn render_stopwatch<S: SessionStore, C: Clock>(app: &App<S, C>, f: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(2), // activity
            Constraint::Length(2), // clock
            Constraint::Length(2), // active / total
            Constraint::Length(2), // status badge
            Constraint::Length(1), // message
            Constraint::Min(0),
            Constraint::Length(1), // legend
        ])
        .split(area);

    let engine = &app.engine;
    let display = engine.display();
    let status = engine.status();

    let activity = Paragraph::new(Span::styled(
        engine.activity().unwrap_or_default().to_string(),
        bold().fg(Color::Magenta),
    ))
    .alignment(Alignment::Center);
    f.render_widget(activity, chunks[1]);

    let clock_style = match status {
        TimerStatus::Running => bold().fg(Color::Green),
        TimerStatus::Paused => bold().add_modifier(Modifier::DIM),
        TimerStatus::Idle => bold(),
    };
    f.render_widget(
        Paragraph::new(Span::styled(format_clock(display.elapsed), clock_style))
            .alignment(Alignment::Center),
        chunks[2],
    );

    let totals = Paragraph::new(Line::from(vec![
        Span::styled("Active time ", dim()),
        Span::styled(format_clock(display.elapsed), bold()),
        Span::styled("   Total time ", dim()),
        Span::styled(format_clock(display.total), bold()),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(totals, chunks[3]);

    let (badge, badge_style) = match status {
        TimerStatus::Running => ("● Active", Style::default().fg(Color::Green)),
        TimerStatus::Paused => ("● Paused", Style::default().fg(Color::Gray)),
        TimerStatus::Idle => ("Ready", dim()),
    };
    f.render_widget(
        Paragraph::new(Span::styled(badge, badge_style)).alignment(Alignment::Center),
        chunks[4],
    );

    render_message(f, chunks[5], app.message.as_deref());

    let toggle = match status {
        TimerStatus::Running => "pause",
        TimerStatus::Paused => "resume",
        TimerStatus::Idle => "start",
    };
    let mut keys = vec![("space", toggle)];
    if engine.has_open_session() {
        keys.push(("e", "end session"));
    }
    keys.extend([("d", "dashboard"), ("h", "home")]);
    render_legend(f, chunks[7], &keys);
}

fn render_summary<S: SessionStore, C: Clock>(
    app: &App<S, C>,
    summary: &SessionSummary,
    f: &mut Frame,
    area: Rect,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(2), // heading
            Constraint::Length(3), // quote
            Constraint::Length(2), // figures
            Constraint::Length(1), // message
            Constraint::Min(0),
            Constraint::Length(1), // legend
        ])
        .split(area);

    let heading = Paragraph::new(Span::styled(
        format!("Session complete: {}", summary.activity),
        bold().fg(Color::Magenta),
    ))
    .alignment(Alignment::Center);
    f.render_widget(heading, chunks[1]);

    let quote_style = if app.quotes.is_visible() {
        Style::default().add_modifier(Modifier::ITALIC)
    } else {
        Style::default().fg(Color::Black)
    };
    f.render_widget(
        Paragraph::new(Span::styled(format!("\"{}\"", app.quotes.current()), quote_style))
            .alignment(Alignment::Center),
        chunks[2],
    );

    let figures = Paragraph::new(Line::from(vec![
        Span::styled("Active ", dim()),
        Span::styled(format_clock(summary.active_time), bold().fg(Color::Green)),
        Span::styled("   Total ", dim()),
        Span::styled(format_clock(summary.total_time), bold()),
        Span::styled("   Productivity ", dim()),
        Span::styled(format!("{}%", summary.productivity), bold().fg(Color::Cyan)),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(figures, chunks[3]);

    render_message(f, chunks[4], app.message.as_deref());
    render_legend(
        f,
        chunks[6],
        &[("enter", "save & view dashboard"), ("esc", "continue session")],
    );
}
