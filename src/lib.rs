//! Library entry point for the tubelist CLI.

pub mod commands;
pub mod config;
pub mod error;
pub mod feed;
pub mod filter;
pub mod format;
pub mod logging;
pub mod model;
pub mod output;
pub mod report;
pub mod sources;
pub mod utils;
pub mod youtube;
pub mod ytdlp;
