use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;
use serial_test::serial;
use std::fs;

fn command() -> Command {
    Command::cargo_bin("tubelist").expect("binary exists")
}

fn write_config(config_root: &assert_fs::fixture::ChildPath, contents: &str) {
    let dir = config_root.child("tubelist");
    dir.create_dir_all().unwrap();
    dir.child("config.toml").write_str(contents).unwrap();
}

#[test]
fn version_flag_works() {
    let mut cmd = command();
    cmd.arg("--version");

    cmd.assert().success().stdout(predicate::str::contains("tubelist"));
}

#[test]
fn aliases_resolve_to_subcommands() {
    for (alias, about) in [
        ("a", "YouTube Data API v3"),
        ("x", "yt-dlp"),
        ("f", "RSS feeds"),
    ] {
        let mut cmd = command();
        cmd.arg(alias).arg("--help");
        cmd.assert().success().stdout(predicate::str::contains(about));
    }
}

#[test]
#[serial]
fn api_without_key_fails_with_guidance() {
    let temp = assert_fs::TempDir::new().unwrap();

    let mut cmd = command();
    cmd.env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.child("config").path())
        .env_remove("YOUTUBE_API_KEY")
        .arg("api")
        .arg("--output-dir")
        .arg(temp.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("YouTube API key required"))
        .stderr(predicate::str::contains("console.cloud.google.com"));

    temp.child("youtube_api_data.json").assert(predicate::path::missing());
}

#[test]
#[serial]
fn api_with_unreachable_endpoint_still_writes_outputs() {
    let temp = assert_fs::TempDir::new().unwrap();
    let config_root = temp.child("config");
    write_config(
        &config_root,
        r#"
[[channels]]
name = "Test Kitchen"
id = "UC1"
url = "https://youtube.com/@testkitchen"

[api]
base_url = "http://127.0.0.1:1/youtube/v3"
timeout_secs = 5
"#,
    );
    let out = temp.child("out");

    let mut cmd = command();
    cmd.env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", config_root.path())
        .env("YOUTUBE_API_KEY", "test-key")
        .env_remove("RUST_LOG")
        .arg("api")
        .arg("-o")
        .arg(out.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Data saved to"))
        .stderr(predicate::str::contains("Skipping Test Kitchen"));

    let snapshot = fs::read_to_string(out.child("youtube_api_data.json").path()).unwrap();
    assert_eq!(snapshot.trim(), "{}");
    let report = fs::read_to_string(out.child("YOUTUBE_API_RESULTS.md").path()).unwrap();
    assert!(report.starts_with("# YouTube Cooking Channels - API Results"));
}

#[test]
fn unknown_channel_is_an_error() {
    let temp = assert_fs::TempDir::new().unwrap();

    let mut cmd = command();
    cmd.env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.child("config").path())
        .arg("feed")
        .arg("--channel")
        .arg("Nobody")
        .arg("--output-dir")
        .arg(temp.path());

    cmd.assert().failure().stderr(predicate::str::contains("Unknown channel 'Nobody'"));
}

#[test]
fn feed_skips_channels_without_id() {
    let temp = assert_fs::TempDir::new().unwrap();
    let config_root = temp.child("config");
    write_config(
        &config_root,
        r#"
topic = "Baking"
recommended_terms = ["Sourdough starter"]

[[channels]]
name = "No Id Bakery"
handle = "noidbakery"
url = "https://youtube.com/@noidbakery"

[feed]
delay_ms = 0
"#,
    );

    let mut cmd = command();
    cmd.env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", config_root.path())
        .env_remove("RUST_LOG")
        .arg("feed")
        .arg("--output-dir")
        .arg(temp.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Unknown channel ID for No Id Bakery"))
        .stdout(predicate::str::contains("youtube_cooking_videos.md"));

    let snapshot = fs::read_to_string(temp.child("youtube_feed_data.json").path()).unwrap();
    assert_eq!(snapshot.trim(), "{}");

    let report = fs::read_to_string(temp.child("youtube_cooking_videos.md").path()).unwrap();
    assert!(report.starts_with("# YouTube Baking Channels - Recent Videos"));
    assert!(report.contains("- Sourdough starter"));
    assert!(!report.contains("No Id Bakery"));
}
