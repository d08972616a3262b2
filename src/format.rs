//! Text helpers shared by the Markdown reports.

pub const UNKNOWN_DURATION: &str = "Unknown";

/// Format an ISO 8601 duration (`PT15M30S`) as `15:30`, or `1:02:03` when it
/// spans hours. Anything not starting with `PT` yields `Unknown`.
pub fn format_iso_duration(duration: &str) -> String {
    let Some(rest) = duration.strip_prefix("PT") else {
        return UNKNOWN_DURATION.to_string();
    };

    let (mut hours, mut minutes, mut seconds) = (0u64, 0u64, 0u64);
    let mut digits = String::new();
    // Units must appear in H, M, S order; parsing stops at the first surprise.
    let mut rank = 0;
    for ch in rest.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }
        let (slot, unit_rank) = match ch {
            'H' => (&mut hours, 1),
            'M' => (&mut minutes, 2),
            'S' => (&mut seconds, 3),
            _ => break,
        };
        if digits.is_empty() || unit_rank <= rank {
            break;
        }
        *slot = digits.parse().unwrap_or(0);
        digits.clear();
        rank = unit_rank;
    }

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Format a duration in seconds as `m:ss`. Minutes are not folded into hours.
pub fn format_seconds(duration: f64) -> String {
    let total = duration.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Insert thousands separators into a decimal count. Values that are not
/// plain digits are returned untouched.
pub fn group_thousands(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return value.to_string();
    }

    let mut grouped = String::with_capacity(value.len() + value.len() / 3);
    for (index, ch) in value.chars().enumerate() {
        if index > 0 && (value.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// First `limit` characters of `text`, with `...` appended when truncated.
pub fn preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Date portion (`YYYY-MM-DD`) of an RFC 3339 timestamp.
pub fn date_part(timestamp: &str) -> &str {
    match timestamp.char_indices().nth(10) {
        Some((cut, _)) => &timestamp[..cut],
        None => timestamp,
    }
}

pub fn watch_url(video_id: &str) -> String {
    format!("https://youtube.com/watch?v={video_id}")
}

pub fn playlist_url(playlist_id: &str) -> String {
    format!("https://youtube.com/playlist?list={playlist_id}")
}
