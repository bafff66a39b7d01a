/// Integer percentage of `part` over `whole`, rounded half up.
///
/// A zero `whole` yields 0 rather than NaN/inf, so every productivity ratio
/// in the crate goes through here.
pub fn percent(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    let scaled = (part as u128 * 100 + whole as u128 / 2) / whole as u128;
    scaled.min(u32::MAX as u128) as u32
}

/// Non-negative span between two epoch-millisecond instants.
pub fn span_ms(from: i64, to: i64) -> u64 {
    to.saturating_sub(from).max(0) as u64
}

/// Stopwatch rendering: `mm:ss`, or `hh:mm:ss` once an hour has passed.
pub fn format_clock(ms: u64) -> String {
    let total_secs = ms / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// Dashboard rendering: `Xh Ym`, or just `Ym` under an hour.
pub fn format_duration(ms: u64) -> String {
    let total_secs = ms / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}
