use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use super::{bold, dim, render_legend, render_message, HORIZONTAL_MARGIN, VERTICAL_MARGIN};
use crate::{
    app::App, clock::Clock, report::format_started_at, stats::Dashboard, store::SessionStore,
    util::format_duration,
};

const RANK_COLORS: [Color; 3] = [Color::LightRed, Color::LightMagenta, Color::LightGreen];

pub fn render<S: SessionStore, C: Clock>(app: &App<S, C>, f: &mut Frame) {
    let area = f.area();
    let dashboard = app.dashboard();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(2), // title
            Constraint::Length(4), // stat cards
            Constraint::Min(3),    // lists
            Constraint::Length(1), // message
            Constraint::Length(1), // legend
        ])
        .split(area);

    let title = Paragraph::new(Span::styled("Your Productivity Dashboard", bold().fg(Color::Magenta)))
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    render_cards(&dashboard, f, chunks[1]);

    if dashboard.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(Span::styled("No sessions yet", bold())),
            Line::from(Span::styled(
                "Start your first productivity session to see your stats here.",
                dim(),
            )),
        ])
        .alignment(Alignment::Center);
        f.render_widget(empty, chunks[2]);
    } else {
        let lists = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[2]);
        render_top_activities(&dashboard, f, lists[0]);
        render_recent_sessions(&dashboard, f, lists[1]);
    }

    render_message(f, chunks[3], app.message.as_deref());

    let mut keys = vec![("h", "home")];
    if app.engine.activity().is_some() {
        keys.push(("t", "timer"));
    }
    keys.push(("esc", "quit"));
    render_legend(f, chunks[4], &keys);
}

fn render_cards(dashboard: &Dashboard<'_>, f: &mut Frame, area: Rect) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let figures = [
        ("Total Active Time", format_duration(dashboard.total_active_time), Color::LightRed),
        ("Today's Focus", format_duration(dashboard.today_active_time), Color::LightMagenta),
        ("Avg Productivity", format!("{}%", dashboard.average_productivity), Color::LightGreen),
        ("Total Sessions", dashboard.total_sessions.to_string(), Color::Yellow),
    ];

    for ((label, value, color), card) in figures.into_iter().zip(cards.iter()) {
        let widget = Paragraph::new(Span::styled(value, bold()))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(label),
            );
        f.render_widget(widget, *card);
    }
}

fn render_top_activities(dashboard: &Dashboard<'_>, f: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = dashboard
        .top_activities
        .iter()
        .enumerate()
        .map(|(idx, activity)| {
            let rank_color = RANK_COLORS.get(idx).copied().unwrap_or(Color::Gray);
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!("{}. ", idx + 1), bold().fg(rank_color)),
                    Span::styled(activity.name.clone(), bold()),
                    Span::styled(format!("  {}", format_duration(activity.total_time)), dim()),
                ]),
                Line::from(Span::styled(
                    format!("   {} sessions", activity.session_count),
                    dim(),
                )),
            ])
        })
        .collect();

    f.render_widget(
        List::new(items).block(Block::default().borders(Borders::ALL).title("Top Activities")),
        area,
    );
}

fn render_recent_sessions(dashboard: &Dashboard<'_>, f: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = dashboard
        .recent_sessions
        .iter()
        .map(|session| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(session.activity.clone(), bold()),
                    Span::styled(format!("  {}", format_duration(session.duration)), bold()),
                ]),
                Line::from(vec![
                    Span::styled(format_started_at(session.start_time), dim()),
                    Span::styled(
                        format!("  {}% productive", session.productivity()),
                        Style::default().fg(Color::Cyan),
                    ),
                ]),
            ])
        })
        .collect();

    f.render_widget(
        List::new(items).block(Block::default().borders(Borders::ALL).title("Recent Sessions")),
        area,
    );
}
