use itertools::Itertools;
use serde::Serialize;
use std::collections::HashMap;

use crate::session::Session;
use crate::util::percent;

/// Per-activity totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRollup {
    pub name: String,
    pub total_time: u64,
    pub session_count: usize,
}

fn saturating_sum<I: IntoIterator<Item = u64>>(values: I) -> u64 {
    values.into_iter().fold(0, u64::saturating_add)
}

/// Sum of active time across sessions, saturating at `u64::MAX`
pub fn total_active_time(sessions: &[Session]) -> u64 {
    saturating_sum(sessions.iter().map(|s| s.duration))
}

/// Sum of wall-clock time across sessions, saturating at `u64::MAX`
pub fn total_wall_time(sessions: &[Session]) -> u64 {
    saturating_sum(sessions.iter().map(Session::wall_time))
}

/// Global active/wall ratio. Not the mean of per-session ratios: long
/// sessions weigh more than short ones.
pub fn average_productivity(sessions: &[Session]) -> u32 {
    percent(total_active_time(sessions), total_wall_time(sessions))
}

/// Sessions whose day label equals `today` exactly
pub fn today_sessions<'a>(sessions: &'a [Session], today: &str) -> Vec<&'a Session> {
    sessions.iter().filter(|s| s.date == today).collect()
}

pub fn today_active_time(sessions: &[Session], today: &str) -> u64 {
    saturating_sum(today_sessions(sessions, today).into_iter().map(|s| s.duration))
}

/// Group by exact activity label, in order of first appearance.
pub fn per_activity_rollup(sessions: &[Session]) -> Vec<ActivityRollup> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rollups: Vec<ActivityRollup> = Vec::new();

    for session in sessions {
        let slot = *index.entry(session.activity.as_str()).or_insert_with(|| {
            rollups.push(ActivityRollup {
                name: session.activity.clone(),
                total_time: 0,
                session_count: 0,
            });
            rollups.len() - 1
        });
        let rollup = &mut rollups[slot];
        rollup.total_time = rollup.total_time.saturating_add(session.duration);
        rollup.session_count += 1;
    }

    rollups
}

/// Activities ranked by total active time, ties kept in first-seen order.
pub fn top_activities(sessions: &[Session], limit: usize) -> Vec<ActivityRollup> {
    per_activity_rollup(sessions)
        .into_iter()
        .sorted_by(|a, b| b.total_time.cmp(&a.total_time))
        .take(limit)
        .collect()
}

/// Latest sessions first. Equal start times keep their input order.
pub fn recent_sessions(sessions: &[Session], limit: usize) -> Vec<&Session> {
    sessions
        .iter()
        .sorted_by(|a, b| b.start_time.cmp(&a.start_time))
        .take(limit)
        .collect()
}

/// List sizes for the dashboard views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardLimits {
    pub top_activities: usize,
    pub recent_sessions: usize,
}

impl Default for DashboardLimits {
    fn default() -> Self {
        Self {
            top_activities: 5,
            recent_sessions: 10,
        }
    }
}

/// Everything the dashboard shows, computed in one pass over a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard<'a> {
    pub total_sessions: usize,
    pub total_active_time: u64,
    pub today_active_time: u64,
    pub today_sessions: usize,
    pub average_productivity: u32,
    pub top_activities: Vec<ActivityRollup>,
    pub recent_sessions: Vec<&'a Session>,
}

impl<'a> Dashboard<'a> {
    pub fn build(sessions: &'a [Session], today: &str, limits: DashboardLimits) -> Self {
        let today_list = today_sessions(sessions, today);
        Self {
            total_sessions: sessions.len(),
            total_active_time: total_active_time(sessions),
            today_active_time: saturating_sum(today_list.iter().map(|s| s.duration)),
            today_sessions: today_list.len(),
            average_productivity: average_productivity(sessions),
            top_activities: top_activities(sessions, limits.top_activities),
            recent_sessions: recent_sessions(sessions, limits.recent_sessions),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_sessions == 0
    }
}
