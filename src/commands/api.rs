use super::harvest::{HarvestOptions, harvest};
use crate::config::Config;
use crate::error::AppError;
use crate::sources::ApiSource;
use crate::youtube::ApiClient;

pub struct ApiOptions {
    pub harvest: HarvestOptions,
    pub api_key: Option<String>,
    pub playlist_items: usize,
    pub details: bool,
}

pub fn execute_api(options: ApiOptions) -> Result<(), AppError> {
    let config = Config::load()?;
    let api_key = resolve_api_key(options.api_key.as_deref(), config.api.key.as_deref())?;

    let client = ApiClient::new(api_key, &config.api)?;
    let source = ApiSource::new(client, &config, options.playlist_items, options.details);
    let written = harvest(&source, &config, &options.harvest)?;
    println!("Done! {written} channel(s) written.");
    Ok(())
}

/// The flag (or `YOUTUBE_API_KEY`) wins over `[api] key`. Blank values count
/// as unset.
fn resolve_api_key(flag: Option<&str>, configured: Option<&str>) -> Result<String, AppError> {
    [flag, configured]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|key| !key.is_empty())
        .map(str::to_string)
        .ok_or(AppError::MissingApiKey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_configured_key() {
        assert_eq!(resolve_api_key(Some("flag"), Some("config")).unwrap(), "flag");
        assert_eq!(resolve_api_key(None, Some(" config ")).unwrap(), "config");
    }

    #[test]
    fn blank_flag_falls_back_to_configured_key() {
        assert_eq!(resolve_api_key(Some("  "), Some("config")).unwrap(), "config");
    }

    #[test]
    fn no_usable_key_is_an_error() {
        assert!(matches!(resolve_api_key(Some(""), Some(" ")), Err(AppError::MissingApiKey)));
        assert!(matches!(resolve_api_key(None, None), Err(AppError::MissingApiKey)));
    }
}
