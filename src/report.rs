use chrono::{Local, TimeZone};
use std::fmt::Write;

use crate::stats::Dashboard;
use crate::util::format_duration;

/// Local "YYYY-MM-DD at HH:MM" for a session start
pub fn format_started_at(ms: i64) -> String {
    match Local.timestamp_millis_opt(ms).earliest() {
        Some(dt) => dt.format("%Y-%m-%d at %H:%M").to_string(),
        None => "-".to_string(),
    }
}

/// Plain-text dashboard for non-interactive use
pub fn dashboard_text(dashboard: &Dashboard<'_>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Total active time:  {}", format_duration(dashboard.total_active_time));
    let _ = writeln!(out, "Today's focus:      {}", format_duration(dashboard.today_active_time));
    let _ = writeln!(out, "Avg productivity:   {}%", dashboard.average_productivity);
    let _ = writeln!(out, "Total sessions:     {}", dashboard.total_sessions);

    if dashboard.is_empty() {
        let _ = writeln!(out, "\nNo sessions yet. Start your first one to see it here.");
        return out;
    }

    let _ = writeln!(out, "\nTop activities");
    for (rank, activity) in dashboard.top_activities.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {} - {} ({} sessions)",
            rank + 1,
            activity.name,
            format_duration(activity.total_time),
            activity.session_count
        );
    }

    let _ = writeln!(out, "\nRecent sessions");
    for session in &dashboard.recent_sessions {
        let _ = writeln!(
            out,
            "  {} | {} | {} | {}% productive",
            session.activity,
            format_started_at(session.start_time),
            format_duration(session.duration),
            session.productivity()
        );
    }

    out
}
