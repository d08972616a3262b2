use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::models::{Channel, Page, Playlist, PlaylistItem, SearchResult, Video};
use super::pagination::{MAX_PAGE_SIZE, paginate};
use crate::config::ApiSettings;
use crate::error::AppError;

const CHANNEL_PARTS: &str = "snippet,contentDetails,statistics";

type Params = Vec<(&'static str, String)>;

/// Blocking client for the YouTube Data API v3, authenticated by API key.
pub struct ApiClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl ApiClient {
    pub fn new(api_key: impl Into<String>, settings: &ApiSettings) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(concat!("tubelist/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn channel_by_id(&self, channel_id: &str) -> Result<Option<Channel>, AppError> {
        self.first_channel(vec![
            ("part", CHANNEL_PARTS.to_string()),
            ("id", channel_id.to_string()),
        ])
    }

    /// Look a channel up by its legacy username first, then by its handle.
    /// A failed username lookup still falls through to the handle.
    pub fn channel_by_handle(&self, handle: &str) -> Result<Option<Channel>, AppError> {
        let username = handle.trim_start_matches('@');
        let by_username = self
            .first_channel(vec![
                ("part", CHANNEL_PARTS.to_string()),
                ("forUsername", username.to_string()),
            ])
            .unwrap_or_else(|err| {
                debug!("Username lookup for {} failed: {}", username, err);
                None
            });
        if by_username.is_some() {
            return Ok(by_username);
        }

        self.first_channel(vec![
            ("part", CHANNEL_PARTS.to_string()),
            ("forHandle", handle.to_string()),
        ])
    }

    pub fn channel_playlists(
        &self,
        channel_id: &str,
        cap: usize,
    ) -> Result<Vec<Playlist>, AppError> {
        self.list(
            "playlists",
            vec![
                ("part", "snippet,contentDetails".to_string()),
                ("channelId", channel_id.to_string()),
            ],
            cap,
        )
    }

    pub fn playlist_items(
        &self,
        playlist_id: &str,
        cap: usize,
    ) -> Result<Vec<PlaylistItem>, AppError> {
        self.list(
            "playlistItems",
            vec![
                ("part", "snippet,contentDetails".to_string()),
                ("playlistId", playlist_id.to_string()),
            ],
            cap,
        )
    }

    /// Newest-first video search within a channel, optionally narrowed by `query`.
    pub fn search_channel_videos(
        &self,
        channel_id: &str,
        query: Option<&str>,
        cap: usize,
    ) -> Result<Vec<SearchResult>, AppError> {
        let mut params = vec![
            ("part", "snippet".to_string()),
            ("channelId", channel_id.to_string()),
            ("type", "video".to_string()),
            ("order", "date".to_string()),
        ];
        if let Some(query) = query.filter(|query| !query.trim().is_empty()) {
            params.push(("q", query.to_string()));
        }
        self.list("search", params, cap)
    }

    /// Full details for the given video ids, fetched in batches of 50.
    /// A failed batch is logged and skipped.
    pub fn video_details(&self, video_ids: &[String]) -> Vec<Video> {
        let mut videos = Vec::new();
        for batch in video_ids.chunks(MAX_PAGE_SIZE) {
            let params = vec![("part", CHANNEL_PARTS.to_string()), ("id", batch.join(","))];
            match self.get::<Page<Video>>("videos", &params) {
                Ok(page) => videos.extend(page.items),
                Err(err) => warn!("Skipping {} video detail(s): {}", batch.len(), err),
            }
        }
        videos
    }

    fn first_channel(&self, params: Params) -> Result<Option<Channel>, AppError> {
        let page: Page<Channel> = self.get("channels", &params)?;
        Ok(page.items.into_iter().next())
    }

    fn list<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: Params,
        cap: usize,
    ) -> Result<Vec<T>, AppError> {
        paginate(cap, |token, page_size| {
            let mut page_params = params.clone();
            page_params.push(("maxResults", page_size.to_string()));
            if let Some(token) = token {
                page_params.push(("pageToken", token.to_string()));
            }
            self.get::<Page<T>>(endpoint, &page_params)
        })
    }

    fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, AppError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {} {:?}", url, params);

        let response =
            self.http.get(&url).query(params).query(&[("key", self.api_key.as_str())]).send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AppError::Api { status: status.as_u16(), body });
        }

        Ok(response.json::<T>()?)
    }
}
