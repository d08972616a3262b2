use serde::Serialize;
use tracing::warn;

use crate::config::ChannelSpec;
use crate::error::AppError;
use crate::model::{Snapshot, Source};

pub mod api;
pub mod extract;
pub mod feed;

pub use api::{ApiChannelRecord, ApiSource};
pub use extract::{ExtractChannelRecord, ExtractSource};
pub use feed::{FeedChannelRecord, FeedSource};

/// Trait that every retrieval strategy implements.
pub trait ChannelSource {
    /// What gets written to the JSON snapshot for one channel.
    type Record: Serialize;

    fn source(&self) -> Source;

    /// Checks that must pass before any channel is processed.
    fn prepare(&self) -> Result<(), AppError> {
        Ok(())
    }

    /// Fetch and filter one channel. `Ok(None)` means the channel was skipped.
    fn collect(&self, channel: &ChannelSpec) -> Result<Option<Self::Record>, AppError>;

    /// Called between two channels.
    fn pause(&self) {}

    /// Render the Markdown report.
    fn render(&self, snapshot: &Snapshot<Self::Record>) -> Result<String, AppError>;
}

/// Log a failed lookup and carry on with nothing.
pub(crate) fn or_empty<T>(what: &str, result: Result<Vec<T>, AppError>) -> Vec<T> {
    result.unwrap_or_else(|err| {
        warn!("Failed to fetch {}: {}", what, err);
        Vec::new()
    })
}
