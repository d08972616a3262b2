use super::harvest::{HarvestOptions, harvest};
use crate::config::Config;
use crate::error::AppError;
use crate::sources::ExtractSource;

pub struct ExtractOptions {
    pub harvest: HarvestOptions,
    pub playlist_videos: usize,
}

pub fn execute_extract(options: ExtractOptions) -> Result<(), AppError> {
    let config = Config::load()?;
    let source = ExtractSource::new(&config, options.playlist_videos);
    let written = harvest(&source, &config, &options.harvest)?;
    println!("Done! {written} channel(s) written.");
    Ok(())
}
