pub mod api;
pub mod config_cmd;
pub mod extract;
pub mod feed;
pub mod harvest;

pub use api::execute_api;
pub use config_cmd::execute_config;
pub use extract::execute_extract;
pub use feed::execute_feed;
pub use harvest::{HarvestOptions, harvest};
