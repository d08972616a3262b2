use std::collections::HashMap;
use std::fmt::{self, Write};

use super::video_line;
use crate::format::{format_iso_duration, group_thousands, playlist_url, preview, watch_url};
use crate::model::Snapshot;
use crate::sources::ApiChannelRecord;
use crate::youtube::models::{ChannelStatistics, SearchResult};

const ABOUT_PREVIEW: usize = 300;
const PLAYLIST_PREVIEW: usize = 150;
const MAX_BEGINNER: usize = 20;
const MAX_RECENT: usize = 15;

pub fn render(
    topic: &str,
    generated_at: &str,
    snapshot: &Snapshot<ApiChannelRecord>,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "# YouTube {topic} Channels - API Results\n")?;
    writeln!(out, "*Data fetched via YouTube Data API v3 on {generated_at}*\n")?;
    writeln!(out, "---\n")?;

    for (name, record) in snapshot.iter() {
        writeln!(out, "\n## {name}\n")?;
        writeln!(out, "**Channel:** [{name}]({})\n", record.url)?;

        if let Some(stats) = &record.channel_details.statistics {
            write_statistics(&mut out, stats)?;
        }

        let description = &record.channel_details.snippet.description;
        if !description.is_empty() {
            writeln!(out, "### About\n")?;
            writeln!(out, "{}\n", preview(description, ABOUT_PREVIEW))?;
        }

        write_playlists(&mut out, record)?;

        let durations: HashMap<&str, String> = record
            .video_details
            .iter()
            .filter_map(|video| {
                Some((video.id.as_str(), format_iso_duration(video.duration()?)))
            })
            .collect();

        if !record.beginner_videos.is_empty() {
            writeln!(
                out,
                "### Beginner-Friendly Videos ({} found)\n",
                record.beginner_videos.len()
            )?;
            for video in record.beginner_videos.iter().take(MAX_BEGINNER) {
                writeln!(out, "{}", search_line(video, &durations))?;
            }
            out.push('\n');
        }

        if !record.recent_videos.is_empty() {
            let shown = record.recent_videos.len().min(MAX_RECENT);
            writeln!(out, "### Recent Videos ({shown} shown)\n")?;
            for video in record.recent_videos.iter().take(MAX_RECENT) {
                writeln!(out, "{}", search_line(video, &durations))?;
            }
            out.push('\n');
        }

        writeln!(out, "---\n")?;
    }

    Ok(out)
}

fn write_statistics(out: &mut String, stats: &ChannelStatistics) -> fmt::Result {
    let count = |value: &Option<String>| {
        value.as_deref().map(group_thousands).unwrap_or_else(|| "Unknown".to_string())
    };
    let subscribers = if stats.hidden_subscriber_count {
        "Hidden".to_string()
    } else {
        count(&stats.subscriber_count)
    };

    writeln!(out, "### Channel Statistics\n")?;
    writeln!(out, "- **Subscribers:** {subscribers}")?;
    writeln!(out, "- **Total Videos:** {}", count(&stats.video_count))?;
    writeln!(out, "- **Total Views:** {}\n", count(&stats.view_count))
}

fn write_playlists(out: &mut String, record: &ApiChannelRecord) -> fmt::Result {
    if record.playlists.is_empty() {
        return Ok(());
    }

    writeln!(out, "### Playlists ({} total)\n", record.playlists.len())?;
    for playlist in &record.playlists {
        let title = non_empty_or(&playlist.snippet.title, "Unknown");
        writeln!(out, "**[{title}]({})**", playlist_url(&playlist.id))?;
        match playlist.item_count() {
            Some(count) => writeln!(out, "- {count} videos")?,
            None => writeln!(out, "- ? videos")?,
        }
        let description = &playlist.snippet.description;
        if !description.is_empty() {
            writeln!(out, "- {}", preview(description, PLAYLIST_PREVIEW))?;
        }
        if let Some(items) = record.playlist_items.get(&playlist.id) {
            for item in items {
                let url = item.video_id().map(watch_url).unwrap_or_default();
                let title = non_empty_or(&item.snippet.title, "Unknown");
                writeln!(out, "  - [{title}]({url})")?;
            }
        }
        out.push('\n');
    }
    Ok(())
}

fn search_line(video: &SearchResult, durations: &HashMap<&str, String>) -> String {
    let id = video.video_id().unwrap_or_default();
    video_line(
        non_empty_or(&video.snippet.title, "Unknown"),
        &watch_url(id),
        video.snippet.published_date(),
        durations.get(id).map(String::as_str),
    )
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}
