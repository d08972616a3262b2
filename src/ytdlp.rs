use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::AppError;
use crate::format::{playlist_url, watch_url};

/// A `--flat-playlist` entry: a playlist on a channel's playlists tab or a
/// video in an uploads list. Unread fields are kept for the snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlatEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playlist_count: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FlatEntry {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    fn non_empty_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn video_url(&self) -> String {
        match self.non_empty_id() {
            Some(id) => watch_url(id),
            None => self.url.clone().unwrap_or_default(),
        }
    }

    pub fn playlist_url(&self) -> String {
        match self.non_empty_id() {
            Some(id) => playlist_url(id),
            None => self.url.clone().unwrap_or_default(),
        }
    }
}

/// Thin wrapper around the `yt-dlp` executable.
pub struct YtDlp {
    binary: String,
}

impl YtDlp {
    pub fn new(binary: impl Into<String>) -> Self {
        Self { binary: binary.into() }
    }

    pub fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    pub fn ensure_available(&self) -> Result<(), AppError> {
        if self.is_available() {
            Ok(())
        } else {
            Err(AppError::ToolMissing(self.binary.clone()))
        }
    }

    pub fn channel_playlists(&self, channel_url: &str) -> Result<Vec<FlatEntry>, AppError> {
        self.dump(&format!("{}/playlists", channel_url.trim_end_matches('/')))
    }

    pub fn channel_videos(&self, channel_url: &str) -> Result<Vec<FlatEntry>, AppError> {
        self.dump(&format!("{}/videos", channel_url.trim_end_matches('/')))
    }

    pub fn playlist_videos(
        &self,
        playlist_url: &str,
        cap: usize,
    ) -> Result<Vec<FlatEntry>, AppError> {
        let mut videos = self.dump(playlist_url)?;
        videos.truncate(cap);
        Ok(videos)
    }

    /// Flat-extract `url` and return its entries.
    pub fn dump(&self, url: &str) -> Result<Vec<FlatEntry>, AppError> {
        debug!("$ {} --dump-json --flat-playlist {}", self.binary, url);
        let output = Command::new(&self.binary)
            .args(["--dump-json", "--no-warnings", "--quiet", "--flat-playlist"])
            .arg(url)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = if stderr.trim().is_empty() {
                format!("exited with status {} for {}", output.status, url)
            } else {
                format!("{} ({})", stderr.trim(), url)
            };
            return Err(AppError::Tool(message));
        }

        parse_dump(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parse `--dump-json` output: one JSON document per line. A lone document
/// carrying an `entries` array is a whole playlist; anything else is an entry.
pub fn parse_dump(stdout: &str) -> Result<Vec<FlatEntry>, AppError> {
    let mut documents = stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(serde_json::from_str::<Value>)
        .collect::<Result<Vec<_>, _>>()?;

    if documents.len() == 1
        && let Some(Value::Array(entries)) =
            documents[0].as_object_mut().and_then(|object| object.remove("entries"))
    {
        return entries.into_iter().map(entry_from_value).collect();
    }

    documents.into_iter().map(entry_from_value).collect()
}

fn entry_from_value(value: Value) -> Result<FlatEntry, AppError> {
    Ok(serde_json::from_value(value)?)
}
