use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{info, warn};

use super::{ChannelSource, or_empty};
use crate::config::{ApiSettings, ChannelSpec, Config};
use crate::error::AppError;
use crate::filter::{KeywordFilter, MatchScope, dedupe_by};
use crate::model::{Snapshot, Source};
use crate::report;
use crate::youtube::ApiClient;
use crate::youtube::models::{Channel, Playlist, PlaylistItem, SearchResult, Video};

#[derive(Debug, Clone, Serialize)]
pub struct ApiChannelRecord {
    pub url: String,
    pub channel_id: String,
    pub channel_details: Channel,
    pub playlists: Vec<Playlist>,
    /// Items per playlist id, only when requested.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub playlist_items: BTreeMap<String, Vec<PlaylistItem>>,
    pub beginner_videos: Vec<SearchResult>,
    pub recent_videos: Vec<SearchResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub video_details: Vec<Video>,
}

pub struct ApiSource<'a> {
    client: ApiClient,
    config: &'a Config,
    playlist_items: usize,
    details: bool,
}

impl<'a> ApiSource<'a> {
    pub fn new(
        client: ApiClient,
        config: &'a Config,
        playlist_items: usize,
        details: bool,
    ) -> Self {
        Self { client, config, playlist_items, details }
    }

    fn settings(&self) -> &ApiSettings {
        &self.config.api
    }

    fn resolve(&self, channel: &ChannelSpec) -> Result<Option<Channel>, AppError> {
        match (&channel.id, &channel.handle) {
            (Some(id), _) => self.client.channel_by_id(id),
            (None, Some(handle)) => self.client.channel_by_handle(handle),
            (None, None) => {
                warn!("{} has neither an id nor a handle configured", channel.name);
                Ok(None)
            }
        }
    }

    fn topical_search(&self, channel_id: &str) -> Vec<SearchResult> {
        let mut hits = Vec::new();
        for query in &self.config.search_queries {
            hits.extend(or_empty(
                &format!("search results for '{query}'"),
                self.client.search_channel_videos(
                    channel_id,
                    Some(query.as_str()),
                    self.settings().search_per_query,
                ),
            ));
        }
        hits
    }
}

impl ChannelSource for ApiSource<'_> {
    type Record = ApiChannelRecord;

    fn source(&self) -> Source {
        Source::Api
    }

    fn collect(&self, channel: &ChannelSpec) -> Result<Option<ApiChannelRecord>, AppError> {
        info!("Fetching channel information...");
        let Some(details) = self.resolve(channel)? else {
            warn!("Could not fetch channel details for {}", channel.name);
            return Ok(None);
        };
        let channel_id = details.id.clone();

        info!("Fetching playlists...");
        let playlists = or_empty(
            "playlists",
            self.client.channel_playlists(&channel_id, self.settings().max_playlists),
        );
        info!("Found {} playlists", playlists.len());

        let mut playlist_items = BTreeMap::new();
        if self.playlist_items > 0 {
            for playlist in &playlists {
                let items = or_empty(
                    &format!("items of playlist {}", playlist.id),
                    self.client.playlist_items(&playlist.id, self.playlist_items),
                );
                playlist_items.insert(playlist.id.clone(), items);
            }
        }

        info!("Searching for beginner-friendly videos...");
        let mut hits = self.topical_search(&channel_id);

        info!("Fetching recent videos...");
        let recent_videos = or_empty(
            "recent videos",
            self.client.search_channel_videos(&channel_id, None, self.settings().recent_videos),
        );
        info!("Found {} recent videos", recent_videos.len());

        let filter = KeywordFilter::new(&self.config.keywords, MatchScope::TitleAndDescription);
        hits.extend(filter.apply(recent_videos.clone(), |video| {
            (video.snippet.title.as_str(), video.snippet.description.as_str())
        }));
        let beginner_videos = dedupe_by(hits, SearchResult::video_id);
        info!("Found {} beginner-related videos", beginner_videos.len());

        let video_details = if self.details && !beginner_videos.is_empty() {
            let ids: Vec<String> = beginner_videos
                .iter()
                .filter_map(|video| video.video_id().map(str::to_string))
                .collect();
            self.client.video_details(&ids)
        } else {
            Vec::new()
        };

        Ok(Some(ApiChannelRecord {
            url: channel.url.clone(),
            channel_id,
            channel_details: details,
            playlists,
            playlist_items,
            beginner_videos,
            recent_videos,
            video_details,
        }))
    }

    fn render(&self, snapshot: &Snapshot<ApiChannelRecord>) -> Result<String, AppError> {
        let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        Ok(report::api::render(&self.config.topic, &generated_at, snapshot)?)
    }
}
