use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::model::Snapshot;
use crate::output::{write_json, write_text};
use crate::sources::ChannelSource;
use crate::utils::display_path;

/// Options shared by every harvesting subcommand.
pub struct HarvestOptions {
    pub channels: Vec<String>,
    pub output_dir: PathBuf,
}

/// Run `source` over the selected channels, then write the JSON snapshot and
/// the Markdown report into the output directory. Returns the number of
/// channels that made it into the snapshot.
pub fn harvest<S: ChannelSource>(
    source: &S,
    config: &Config,
    options: &HarvestOptions,
) -> Result<usize, AppError> {
    let channels = config.select_channels(&options.channels)?;
    source.prepare()?;
    info!("Using {}", source.source().display_name());

    let mut snapshot = Snapshot::new();
    for (index, channel) in channels.iter().enumerate() {
        if index > 0 {
            source.pause();
        }
        info!("Processing: {}", channel.name);
        match source.collect(channel) {
            Ok(Some(record)) => snapshot.push(channel.name.clone(), record),
            Ok(None) => {}
            Err(err) => warn!("Skipping {}: {}", channel.name, err),
        }
    }
    if snapshot.is_empty() {
        warn!("No channel data collected");
    }

    let snapshot_path = options.output_dir.join(source.source().snapshot_file());
    write_json(&snapshot_path, &snapshot)?;
    println!("Data saved to: {}", display_path(&snapshot_path));

    let report_path = options.output_dir.join(source.source().report_file());
    write_text(&report_path, &source.render(&snapshot)?)?;
    println!("Markdown report saved to: {}", display_path(&report_path));

    Ok(snapshot.len())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::fs;

    use super::*;
    use crate::config::ChannelSpec;
    use crate::model::Source;

    #[derive(Default)]
    struct RecordingSource {
        events: RefCell<Vec<String>>,
    }

    impl ChannelSource for RecordingSource {
        type Record = String;

        fn source(&self) -> Source {
            Source::Feed
        }

        fn collect(&self, channel: &ChannelSpec) -> Result<Option<String>, AppError> {
            self.events.borrow_mut().push(format!("collect {}", channel.name));
            match channel.name.as_str() {
                "Broken" => Err(AppError::Tool("boom".to_string())),
                "Missing" => Ok(None),
                _ => Ok(Some(channel.url.clone())),
            }
        }

        fn pause(&self) {
            self.events.borrow_mut().push("pause".to_string());
        }

        fn render(&self, snapshot: &Snapshot<String>) -> Result<String, AppError> {
            Ok(format!("{} channel(s)\n", snapshot.len()))
        }
    }

    fn config(names: &[&str]) -> Config {
        Config {
            channels: names
                .iter()
                .map(|name| ChannelSpec {
                    name: name.to_string(),
                    id: None,
                    handle: None,
                    url: format!("https://youtube.com/@{}", name.to_lowercase()),
                    series: Vec::new(),
                })
                .collect(),
            ..Config::default()
        }
    }

    #[test]
    fn pauses_only_between_channels() {
        let dir = tempfile::tempdir().unwrap();
        let source = RecordingSource::default();
        let options =
            HarvestOptions { channels: Vec::new(), output_dir: dir.path().to_path_buf() };

        let written =
            harvest(&source, &config(&["A", "Broken", "Missing", "D"]), &options).unwrap();

        assert_eq!(written, 2);
        assert_eq!(
            *source.events.borrow(),
            vec![
                "collect A", "pause", "collect Broken", "pause", "collect Missing", "pause",
                "collect D",
            ]
        );
        let json = fs::read_to_string(dir.path().join("youtube_feed_data.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["A"], "https://youtube.com/@a");
        assert_eq!(value["D"], "https://youtube.com/@d");
        assert!(value.get("Broken").is_none());
        let report = fs::read_to_string(dir.path().join("youtube_cooking_videos.md")).unwrap();
        assert_eq!(report, "2 channel(s)\n");
    }

    #[test]
    fn single_channel_never_pauses() {
        let dir = tempfile::tempdir().unwrap();
        let source = RecordingSource::default();
        let options = HarvestOptions {
            channels: vec!["d".to_string()],
            output_dir: dir.path().to_path_buf(),
        };

        harvest(&source, &config(&["A", "D"]), &options).unwrap();

        assert_eq!(*source.events.borrow(), vec!["collect D"]);
    }
}
