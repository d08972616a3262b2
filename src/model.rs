use serde::ser::{Serialize, SerializeMap, Serializer};

/// The retrieval strategy a harvest runs with. Decides the output file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Api,
    Extract,
    Feed,
}

impl Source {
    pub fn display_name(&self) -> &'static str {
        match self {
            Source::Api => "YouTube Data API v3",
            Source::Extract => "yt-dlp",
            Source::Feed => "YouTube RSS feeds",
        }
    }

    pub fn snapshot_file(&self) -> &'static str {
        match self {
            Source::Api => "youtube_api_data.json",
            Source::Extract => "youtube_cooking_data.json",
            Source::Feed => "youtube_feed_data.json",
        }
    }

    pub fn report_file(&self) -> &'static str {
        match self {
            Source::Api => "YOUTUBE_API_RESULTS.md",
            Source::Extract => "youtube_cooking_data.md",
            Source::Feed => "youtube_cooking_videos.md",
        }
    }
}

/// Per-channel records in the order the channels were harvested. Serializes
/// as a JSON object keyed by channel name.
#[derive(Debug, Clone)]
pub struct Snapshot<R> {
    pub channels: Vec<(String, R)>,
}

impl<R> Snapshot<R> {
    pub fn new() -> Self {
        Self { channels: Vec::new() }
    }

    pub fn push(&mut self, name: impl Into<String>, record: R) {
        self.channels.push((name.into(), record));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &R)> {
        self.channels.iter().map(|(name, record)| (name.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl<R> Default for Snapshot<R> {
    fn default() -> Self {
        Snapshot::new()
    }
}

impl<R: Serialize> Serialize for Snapshot<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.channels.len()))?;
        for (name, record) in &self.channels {
            map.serialize_entry(name, record)?;
        }
        map.end()
    }
}
