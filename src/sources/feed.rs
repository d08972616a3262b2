use std::thread;
use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use super::ChannelSource;
use crate::config::{ChannelSpec, Config, PlaylistSeries};
use crate::error::AppError;
use crate::feed::{FeedClient, FeedEntry};
use crate::filter::{KeywordFilter, MatchScope};
use crate::model::{Snapshot, Source};
use crate::report;

#[derive(Debug, Clone, Serialize)]
pub struct FeedChannelRecord {
    pub url: String,
    pub channel_id: String,
    pub recent_videos: Vec<FeedEntry>,
    pub beginner_videos: Vec<FeedEntry>,
    pub curated_playlists: Vec<PlaylistSeries>,
}

pub struct FeedSource<'a> {
    client: FeedClient,
    config: &'a Config,
}

impl<'a> FeedSource<'a> {
    pub fn new(config: &'a Config) -> Result<Self, AppError> {
        Ok(Self { client: FeedClient::new(&config.feed)?, config })
    }
}

impl ChannelSource for FeedSource<'_> {
    type Record = FeedChannelRecord;

    fn source(&self) -> Source {
        Source::Feed
    }

    fn collect(&self, channel: &ChannelSpec) -> Result<Option<FeedChannelRecord>, AppError> {
        let Some(channel_id) = channel.id.clone() else {
            warn!("Unknown channel ID for {}", channel.name);
            return Ok(None);
        };

        info!("Fetching RSS feed for {}...", channel.name);
        let recent_videos = match self.client.fetch(&channel_id) {
            Ok(videos) => {
                info!("Found {} recent videos", videos.len());
                videos
            }
            Err(err) => {
                warn!("Error fetching RSS feed: {}", err);
                Vec::new()
            }
        };

        let filter = KeywordFilter::new(&self.config.keywords, MatchScope::Title);
        let beginner_videos =
            filter.apply(recent_videos.clone(), |video| (video.title.as_str(), ""));

        Ok(Some(FeedChannelRecord {
            url: channel.url.clone(),
            channel_id,
            recent_videos,
            beginner_videos,
            curated_playlists: channel.series.clone(),
        }))
    }

    fn pause(&self) {
        let delay = self.config.feed.delay_ms;
        if delay > 0 {
            thread::sleep(Duration::from_millis(delay));
        }
    }

    fn render(&self, snapshot: &Snapshot<FeedChannelRecord>) -> Result<String, AppError> {
        let config = self.config;
        Ok(report::feed::render(&config.topic, &config.recommended_terms, snapshot)?)
    }
}
