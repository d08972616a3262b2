use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use tubelist::commands::{
    HarvestOptions, api::ApiOptions, config_cmd::ConfigOptions, extract::ExtractOptions,
    feed::FeedOptions,
};
use tubelist::commands::{execute_api, execute_config, execute_extract, execute_feed};
use tubelist::error::AppError;
use tubelist::logging::init_tracing;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Api(args) => {
            init_tracing(args.common.verbose);
            let options = ApiOptions {
                harvest: args.common.into_options(),
                api_key: args.api_key,
                playlist_items: args.playlist_items,
                details: !args.no_details,
            };
            execute_api(options)?;
        }
        Commands::Extract(args) => {
            init_tracing(args.common.verbose);
            let options = ExtractOptions {
                harvest: args.common.into_options(),
                playlist_videos: args.playlist_videos,
            };
            execute_extract(options)?;
        }
        Commands::Feed(args) => {
            init_tracing(args.common.verbose);
            execute_feed(FeedOptions { harvest: args.common.into_options() })?;
        }
        Commands::Config(args) => {
            let options = ConfigOptions {
                show_path: args.path,
                init: args.init,
                edit: args.edit,
                add_keyword: args.add_keyword,
            };
            execute_config(options)?;
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(
    name = "tubelist",
    version,
    about = "Collect playlists and topical videos from YouTube channels into JSON and Markdown."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch channels through the YouTube Data API v3 (needs an API key).
    #[command(visible_alias = "a")]
    Api(ApiArgs),
    /// Fetch channels with yt-dlp, no API key required.
    #[command(visible_alias = "x")]
    Extract(ExtractArgs),
    /// Fetch recent uploads from the channels' RSS feeds.
    #[command(visible_alias = "f")]
    Feed(FeedArgs),
    /// Manage tubelist configuration (channels, keywords, limits).
    #[command(visible_alias = "cfg")]
    Config(ConfigArgs),
}

#[derive(Args)]
struct CommonArgs {
    /// Only process these configured channels (by name, repeatable).
    #[arg(short = 'c', long = "channel", value_name = "NAME", action = ArgAction::Append)]
    channels: Vec<String>,

    /// Directory for the JSON snapshot and the Markdown report.
    #[arg(short, long = "output-dir", value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Log every request.
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

impl CommonArgs {
    fn into_options(self) -> HarvestOptions {
        HarvestOptions { channels: self.channels, output_dir: self.output_dir }
    }
}

#[derive(Args)]
struct ApiArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// YouTube Data API v3 key.
    #[arg(long = "api-key", env = "YOUTUBE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Also fetch up to N videos of every playlist.
    #[arg(long = "playlist-items", value_name = "N", default_value_t = 0)]
    playlist_items: usize,

    /// Skip the per-video detail lookup (durations).
    #[arg(long = "no-details", action = ArgAction::SetTrue)]
    no_details: bool,
}

#[derive(Args)]
struct ExtractArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Also list up to N videos of every playlist.
    #[arg(long = "playlist-videos", value_name = "N", default_value_t = 0)]
    playlist_videos: usize,
}

#[derive(Args)]
struct FeedArgs {
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args)]
struct ConfigArgs {
    /// Show the configuration file path.
    #[arg(long = "path", action = ArgAction::SetTrue)]
    path: bool,

    /// Write the default configuration if none exists yet.
    #[arg(long = "init", action = ArgAction::SetTrue)]
    init: bool,

    /// Open the configuration file in $EDITOR.
    #[arg(long = "edit", action = ArgAction::SetTrue)]
    edit: bool,

    /// Add a topical keyword used to filter videos.
    #[arg(long = "add-keyword", value_name = "KEYWORD")]
    add_keyword: Option<String>,
}
