use std::fmt::{self, Write};

use super::video_line;
use crate::format::format_seconds;
use crate::model::Snapshot;
use crate::sources::ExtractChannelRecord;
use crate::ytdlp::FlatEntry;

pub fn render(
    topic: &str,
    snapshot: &Snapshot<ExtractChannelRecord>,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "# YouTube {topic} Channels - Playlists and Videos\n")?;
    writeln!(out, "*This data was automatically fetched from YouTube*\n")?;

    for (name, record) in snapshot.iter() {
        writeln!(out, "\n## {name}\n")?;
        writeln!(out, "Channel: [{name}]({})\n", record.url)?;

        if !record.playlists.is_empty() {
            writeln!(out, "### Available Playlists\n")?;
            for playlist in &record.playlists {
                let title = playlist.title.as_deref().unwrap_or("Unknown Playlist");
                let count = playlist
                    .playlist_count
                    .map(|count| count.to_string())
                    .unwrap_or_else(|| "?".to_string());
                let url = playlist.playlist_url();
                writeln!(out, "- [{title}]({url}) - {count} videos")?;

                let videos =
                    playlist.id.as_deref().and_then(|id| record.playlist_videos.get(id));
                for video in videos.into_iter().flatten() {
                    writeln!(out, "  {}", entry_line(video))?;
                }
            }
            out.push('\n');
        }

        if !record.beginner_videos.is_empty() {
            writeln!(out, "### Beginner-Friendly Videos\n")?;
            for video in &record.beginner_videos {
                writeln!(out, "{}", entry_line(video))?;
            }
            out.push('\n');
        }
    }

    Ok(out)
}

fn entry_line(video: &FlatEntry) -> String {
    let duration = video.duration.filter(|seconds| *seconds > 0.0).map(format_seconds);
    video_line(
        video.title.as_deref().unwrap_or("Unknown"),
        &video.video_url(),
        "",
        duration.as_deref(),
    )
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn entry(id: &str, title: &str) -> FlatEntry {
        FlatEntry {
            id: Some(id.to_string()),
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn renders_playlists_and_videos() {
        let mut basics = entry("PL1", "Kitchen Basics");
        basics.playlist_count = Some(12);
        let mut knife = entry("v1", "Beginner Knife Skills");
        knife.duration = Some(125.0);

        let mut snapshot = Snapshot::new();
        snapshot.push(
            "Test Kitchen",
            ExtractChannelRecord {
                url: "https://youtube.com/@test".to_string(),
                playlists: vec![basics, FlatEntry { title: None, ..entry("PL2", "") }],
                playlist_videos: BTreeMap::from([("PL1".to_string(), vec![entry("v7", "Lesson")])]),
                beginner_videos: vec![knife, entry("v2", "Pantry Tips")],
            },
        );

        let md = render("Cooking", &snapshot).unwrap();
        assert!(md.starts_with("# YouTube Cooking Channels - Playlists and Videos\n\n"));
        assert!(md.contains("Channel: [Test Kitchen](https://youtube.com/@test)\n"));
        assert!(
            md.contains("- [Kitchen Basics](https://youtube.com/playlist?list=PL1) - 12 videos\n")
        );
        assert!(md.contains("  - [Lesson](https://youtube.com/watch?v=v7)\n"));
        assert!(
            md.contains("- [Unknown Playlist](https://youtube.com/playlist?list=PL2) - ? videos\n")
        );
        assert!(md.contains("- [Beginner Knife Skills](https://youtube.com/watch?v=v1) (2:05)\n"));
        assert!(md.contains("- [Pantry Tips](https://youtube.com/watch?v=v2)\n"));
    }

    #[test]
    fn empty_sections_are_omitted() {
        let mut snapshot = Snapshot::new();
        snapshot.push(
            "Empty",
            ExtractChannelRecord {
                url: "https://youtube.com/@empty".to_string(),
                playlists: Vec::new(),
                playlist_videos: BTreeMap::new(),
                beginner_videos: Vec::new(),
            },
        );
        let md = render("Cooking", &snapshot).unwrap();
        assert!(md.contains("## Empty"));
        assert!(!md.contains("###"));
    }
}
