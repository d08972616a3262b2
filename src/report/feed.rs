use std::fmt::{self, Write};

use super::video_line;
use crate::feed::FeedEntry;
use crate::format::date_part;
use crate::model::Snapshot;
use crate::sources::FeedChannelRecord;

const MAX_RECENT: usize = 15;

pub fn render(
    topic: &str,
    recommended_terms: &[String],
    snapshot: &Snapshot<FeedChannelRecord>,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "# YouTube {topic} Channels - Recent Videos\n")?;
    writeln!(out, "*Data fetched from YouTube RSS feeds*\n")?;
    writeln!(out, "---\n")?;

    for (name, record) in snapshot.iter() {
        writeln!(out, "\n## {name}\n")?;
        writeln!(out, "**Channel:** [{name}]({})\n", record.url)?;

        if !record.curated_playlists.is_empty() {
            writeln!(out, "### Known Playlist Series\n")?;
            for series in &record.curated_playlists {
                writeln!(out, "**{}**", series.name)?;
                writeln!(out, "- {}", series.description)?;
                writeln!(out, "- Search for: {}\n", series.keywords.join(", "))?;
            }
        }

        if !record.beginner_videos.is_empty() {
            writeln!(out, "### Beginner-Related Videos (from recent uploads)\n")?;
            for video in &record.beginner_videos {
                writeln!(out, "{}", entry_line(video))?;
            }
            out.push('\n');
        }

        if !record.recent_videos.is_empty() {
            writeln!(out, "### Recent Videos (Latest {MAX_RECENT})\n")?;
            for video in record.recent_videos.iter().take(MAX_RECENT) {
                writeln!(out, "{}", entry_line(video))?;
            }
            out.push('\n');
        }

        writeln!(out, "---\n")?;
    }

    write_search_help(&mut out, recommended_terms)?;
    Ok(out)
}

fn entry_line(video: &FeedEntry) -> String {
    video_line(&video.title, &video.url, date_part(&video.published), None)
}

fn write_search_help(out: &mut String, recommended_terms: &[String]) -> fmt::Result {
    writeln!(out, "\n## How to Find More Videos\n")?;
    writeln!(out, "RSS feeds only list the most recent uploads. To find more content:\n")?;
    writeln!(out, "### On YouTube:")?;
    writeln!(out, "1. Visit the channel page")?;
    writeln!(out, "2. Click on the 'Playlists' tab to see organized content")?;
    writeln!(
        out,
        "3. Click on the 'Videos' tab and use the search icon to search within the channel"
    )?;
    writeln!(
        out,
        "4. Use YouTube's search with: `site:youtube.com @channelname keyword`\n"
    )?;

    if !recommended_terms.is_empty() {
        writeln!(out, "### Recommended Search Terms:")?;
        for term in recommended_terms {
            writeln!(out, "- {term}")?;
        }
        out.push('\n');
    }
    Ok(())
}
