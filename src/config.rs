use std::fs;
use std::io::Write;
use std::path::PathBuf;

use dirs_next as dirs;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_FEED_BASE_URL: &str = "https://www.youtube.com/feeds/videos.xml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub topic: String,
    pub keywords: Vec<String>,
    pub search_queries: Vec<String>,
    pub recommended_terms: Vec<String>,
    pub channels: Vec<ChannelSpec>,
    pub api: ApiSettings,
    pub extract: ExtractSettings,
    pub feed: FeedSettings,
}

/// A channel to harvest. `id` is required by the feed source; the API source
/// falls back to `handle` when it is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    pub url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub series: Vec<PlaylistSeries>,
}

/// A known recurring series on a channel, used when the playlists themselves
/// cannot be listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistSeries {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_playlists: usize,
    pub search_per_query: usize,
    pub recent_videos: usize,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            key: None,
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: 30,
            max_playlists: 50,
            search_per_query: 10,
            recent_videos: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractSettings {
    pub binary: String,
    pub max_playlists: usize,
    pub max_videos: usize,
}

impl Default for ExtractSettings {
    fn default() -> Self {
        Self { binary: "yt-dlp".to_string(), max_playlists: 15, max_videos: 30 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    pub delay_ms: u64,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self { base_url: DEFAULT_FEED_BASE_URL.to_string(), timeout_secs: 10, delay_ms: 1000 }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            topic: "Cooking".to_string(),
            keywords: strings(&[
                "beginner",
                "basics",
                "fundamental",
                "guide",
                "kitchen organization",
                "knife skills",
                "essential",
                "tips",
                "how to",
                "mistakes",
                "pantry",
                "equipment",
                "tools",
                "setup",
                "start",
                "easy",
            ]),
            search_queries: strings(&[
                "beginner guide",
                "basics",
                "fundamentals",
                "kitchen organization",
                "knife skills",
            ]),
            recommended_terms: strings(&[
                "Beginner guide",
                "Kitchen basics",
                "Knife skills",
                "Kitchen organization",
                "Essential equipment",
                "Cooking fundamentals",
                "How to cook [ingredient]",
                "Easy recipes",
            ]),
            channels: default_channels(),
            api: ApiSettings::default(),
            extract: ExtractSettings::default(),
            feed: FeedSettings::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        let path = config_file_path()?;
        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<(), AppError> {
        let path = config_file_path()?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let mut file = fs::File::create(path)?;
        let contents = toml::to_string_pretty(self)?;
        file.write_all(contents.as_bytes())?;
        Ok(())
    }

    /// Adds a keyword unless an equal one (ignoring case) is already present.
    /// Returns whether the list changed.
    pub fn append_keyword(&mut self, value: String) -> bool {
        let value = value.trim().to_string();
        if value.is_empty()
            || self.keywords.iter().any(|existing| existing.eq_ignore_ascii_case(&value))
        {
            return false;
        }
        self.keywords.push(value);
        true
    }

    /// Resolves channel names given on the command line against the
    /// configured channels. An empty selection means every channel.
    pub fn select_channels(&self, names: &[String]) -> Result<Vec<ChannelSpec>, AppError> {
        if names.is_empty() {
            return Ok(self.channels.clone());
        }

        let mut selected: Vec<ChannelSpec> = Vec::new();
        for name in names {
            let channel = self
                .channels
                .iter()
                .find(|channel| channel.name.eq_ignore_ascii_case(name.trim()))
                .ok_or_else(|| AppError::UnknownChannel(name.clone()))?;
            if !selected.contains(channel) {
                selected.push(channel.clone());
            }
        }
        Ok(selected)
    }
}

pub fn config_file_path() -> Result<PathBuf, AppError> {
    let config_root = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .ok_or_else(|| {
            AppError::config("Unable to determine configuration directory for this platform")
        })?;
    Ok(config_root.join("tubelist").join("config.toml"))
}

pub fn ensure_config_file() -> Result<PathBuf, AppError> {
    let path = config_file_path()?;
    if !path.exists() {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let default = Config::default();
        let contents = toml::to_string_pretty(&default)?;
        fs::write(&path, contents)?;
    }
    Ok(path)
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn series(name: &str, description: &str, keywords: &[&str]) -> PlaylistSeries {
    PlaylistSeries {
        name: name.to_string(),
        description: description.to_string(),
        keywords: strings(keywords),
    }
}

fn default_channels() -> Vec<ChannelSpec> {
    vec![
        ChannelSpec {
            name: "Ethan Chlebowski".to_string(),
            id: Some("UCJjlcL2AgENfU-uvxIqZawA".to_string()),
            handle: Some("ethanchlebowski".to_string()),
            url: "https://youtube.com/@ethanchlebowski".to_string(),
            series: vec![
                series(
                    "Kitchen Fundamentals",
                    "Basic techniques and kitchen organization",
                    &["kitchen organization", "beginner", "guide", "fundamentals"],
                ),
                series(
                    "Cooking Techniques",
                    "Essential cooking methods and skills",
                    &["technique", "how to", "basics", "method"],
                ),
                series("Recipe Videos", "Full recipe demonstrations", &["recipe", "cook", "make"]),
            ],
        },
        ChannelSpec {
            name: "Joshua Weissman".to_string(),
            id: Some("UChBEbMKI1eCcejTtmI32UEw".to_string()),
            handle: Some("joshuaweissman".to_string()),
            url: "https://youtube.com/@joshuaweissman".to_string(),
            series: vec![
                series(
                    "But Better",
                    "Making restaurant dishes better at home",
                    &["but better"],
                ),
                series("But Cheaper", "Budget-friendly cooking", &["but cheaper"]),
                series("But Faster", "Quick and easy recipes", &["but faster"]),
                series(
                    "Fundamentals",
                    "Basic cooking techniques and skills",
                    &["fundamental", "basic", "technique", "beginner"],
                ),
            ],
        },
    ]
}
