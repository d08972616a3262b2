//! YouTube Data API v3 access.

pub mod client;
pub mod models;
pub mod pagination;

pub use client::ApiClient;
