use super::harvest::{HarvestOptions, harvest};
use crate::config::Config;
use crate::error::AppError;
use crate::sources::FeedSource;

pub struct FeedOptions {
    pub harvest: HarvestOptions,
}

pub fn execute_feed(options: FeedOptions) -> Result<(), AppError> {
    let config = Config::load()?;
    let source = FeedSource::new(&config)?;
    let written = harvest(&source, &config, &options.harvest)?;
    println!("Done! {written} channel(s) written.");
    Ok(())
}
