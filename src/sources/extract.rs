use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

use super::{ChannelSource, or_empty};
use crate::config::{ChannelSpec, Config};
use crate::error::AppError;
use crate::filter::{KeywordFilter, MatchScope};
use crate::model::{Snapshot, Source};
use crate::report;
use crate::ytdlp::{FlatEntry, YtDlp};

#[derive(Debug, Clone, Serialize)]
pub struct ExtractChannelRecord {
    pub url: String,
    pub playlists: Vec<FlatEntry>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub playlist_videos: BTreeMap<String, Vec<FlatEntry>>,
    pub beginner_videos: Vec<FlatEntry>,
}

pub struct ExtractSource<'a> {
    tool: YtDlp,
    config: &'a Config,
    playlist_videos: usize,
}

impl<'a> ExtractSource<'a> {
    pub fn new(config: &'a Config, playlist_videos: usize) -> Self {
        Self { tool: YtDlp::new(config.extract.binary.clone()), config, playlist_videos }
    }
}

impl ChannelSource for ExtractSource<'_> {
    type Record = ExtractChannelRecord;

    fn source(&self) -> Source {
        Source::Extract
    }

    fn prepare(&self) -> Result<(), AppError> {
        self.tool.ensure_available()
    }

    fn collect(&self, channel: &ChannelSpec) -> Result<Option<ExtractChannelRecord>, AppError> {
        let settings = &self.config.extract;

        info!("Fetching playlists from: {}/playlists", channel.url);
        let mut playlists = or_empty("playlists", self.tool.channel_playlists(&channel.url));
        info!("Found {} playlists", playlists.len());
        playlists.truncate(settings.max_playlists);

        let mut playlist_videos = BTreeMap::new();
        if self.playlist_videos > 0 {
            for playlist in &playlists {
                let Some(id) = playlist.id.as_deref() else {
                    continue;
                };
                let url = playlist.playlist_url();
                info!("Fetching videos from playlist: {}", url);
                let videos = or_empty(
                    &format!("videos of playlist {id}"),
                    self.tool.playlist_videos(&url, self.playlist_videos),
                );
                playlist_videos.insert(id.to_string(), videos);
            }
        }

        info!("Searching for beginner-friendly videos in {}/videos", channel.url);
        let uploads = or_empty("uploads", self.tool.channel_videos(&channel.url));
        let filter = KeywordFilter::new(&self.config.keywords, MatchScope::Title);
        let mut beginner_videos = filter.apply(uploads, |video| (video.title(), ""));
        beginner_videos.truncate(settings.max_videos);
        info!("Found {} beginner-related videos", beginner_videos.len());

        Ok(Some(ExtractChannelRecord {
            url: channel.url.clone(),
            playlists,
            playlist_videos,
            beginner_videos,
        }))
    }

    fn render(&self, snapshot: &Snapshot<ExtractChannelRecord>) -> Result<String, AppError> {
        Ok(report::extract::render(&self.config.topic, snapshot)?)
    }
}
