//! Markdown reports, one layout per source.

pub mod api;
pub mod extract;
pub mod feed;

/// `- [title](url)` followed by an optional ` - date` and ` (duration)`.
pub(crate) fn video_line(
    title: &str,
    url: &str,
    date: &str,
    duration: Option<&str>,
) -> String {
    let mut line = format!("- [{title}]({url})");
    if !date.is_empty() {
        line.push_str(" - ");
        line.push_str(date);
    }
    if let Some(duration) = duration {
        line.push_str(&format!(" ({duration})"));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_line_variants() {
        assert_eq!(video_line("A", "u", "", None), "- [A](u)");
        assert_eq!(video_line("A", "u", "2024-01-02", None), "- [A](u) - 2024-01-02");
        assert_eq!(video_line("A", "u", "", Some("2:05")), "- [A](u) (2:05)");
        assert_eq!(
            video_line("A", "u", "2024-01-02", Some("1:00")),
            "- [A](u) - 2024-01-02 (1:00)"
        );
    }
}
