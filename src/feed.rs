use std::time::Duration;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::FeedSettings;
use crate::error::AppError;
use crate::format::watch_url;

const ATOM_NS: &[u8] = b"http://www.w3.org/2005/Atom";
const MEDIA_NS: &[u8] = b"http://search.yahoo.com/mrss/";
const YT_NS: &[u8] = b"http://www.youtube.com/xml/schemas/2015";

/// One upload from a channel's Atom feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub id: String,
    pub title: String,
    pub url: String,
    pub published: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
}

pub struct FeedClient {
    http: Client,
    base_url: String,
}

impl FeedClient {
    pub fn new(settings: &FeedSettings) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(concat!("tubelist/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, base_url: settings.base_url.clone() })
    }

    pub fn feed_url(&self, channel_id: &str) -> String {
        format!("{}?channel_id={}", self.base_url, channel_id)
    }

    /// Download and parse the channel's feed. The feed only lists the most
    /// recent uploads (currently 15).
    pub fn fetch(&self, channel_id: &str) -> Result<Vec<FeedEntry>, AppError> {
        let url = self.feed_url(channel_id);
        debug!("GET {}", url);
        let body = self.http.get(&url).send()?.error_for_status()?.text()?;
        parse_feed(&body)
    }
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Title,
    VideoId,
    Published,
    AuthorName,
    Description,
}

/// Parse a YouTube Atom feed. Entries without a `yt:videoId` are skipped.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>, AppError> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut current: Option<FeedEntry> = None;
    let mut in_author = false;
    let mut field: Option<Field> = None;

    loop {
        let (resolved, event) = reader.read_resolved_event()?;
        let ns = namespace(&resolved);
        match event {
            Event::Start(start) => {
                let Some(entry) = current.as_mut() else {
                    if ns == Some(ATOM_NS) && start.local_name().as_ref() == b"entry" {
                        current = Some(FeedEntry::default());
                    }
                    continue;
                };
                match (ns, start.local_name().as_ref()) {
                    (Some(ATOM_NS), b"author") => in_author = true,
                    (Some(ATOM_NS), b"title") => field = Some(Field::Title),
                    (Some(ATOM_NS), b"published") => field = Some(Field::Published),
                    (Some(ATOM_NS), b"name") if in_author => field = Some(Field::AuthorName),
                    (Some(YT_NS), b"videoId") => field = Some(Field::VideoId),
                    (Some(MEDIA_NS), b"description") => field = Some(Field::Description),
                    _ => read_attributes(entry, ns, &start)?,
                }
            }
            Event::Empty(start) => {
                if let Some(entry) = current.as_mut() {
                    read_attributes(entry, ns, &start)?;
                }
            }
            Event::Text(text) => {
                if let (Some(entry), Some(field)) = (current.as_mut(), field) {
                    let value = text.unescape().map_err(quick_xml::Error::from)?;
                    append(entry, field, &value);
                }
            }
            Event::CData(data) => {
                if let (Some(entry), Some(field)) = (current.as_mut(), field) {
                    append(entry, field, &String::from_utf8_lossy(&data));
                }
            }
            Event::End(end) => {
                field = None;
                match (ns, end.local_name().as_ref()) {
                    (Some(ATOM_NS), b"author") => in_author = false,
                    (Some(ATOM_NS), b"entry") => {
                        if let Some(entry) = current.take() {
                            finish_entry(entry, &mut entries);
                        }
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(entries)
}

fn namespace<'a>(resolved: &'a ResolveResult<'_>) -> Option<&'a [u8]> {
    match resolved {
        ResolveResult::Bound(Namespace(ns)) => Some(*ns),
        _ => None,
    }
}

fn append(entry: &mut FeedEntry, field: Field, value: &str) {
    let target = match field {
        Field::Title => &mut entry.title,
        Field::VideoId => &mut entry.id,
        Field::Published => &mut entry.published,
        Field::AuthorName => &mut entry.author,
        Field::Description => entry.description.get_or_insert_with(String::new),
    };
    target.push_str(value);
}

fn read_attributes(
    entry: &mut FeedEntry,
    ns: Option<&[u8]>,
    start: &BytesStart<'_>,
) -> Result<(), AppError> {
    match (ns, start.local_name().as_ref()) {
        (Some(ATOM_NS), b"link") => {
            let rel = attribute(start, "rel")?;
            if (entry.url.is_empty() || rel.as_deref() == Some("alternate"))
                && let Some(href) = attribute(start, "href")?
            {
                entry.url = href;
            }
        }
        (Some(MEDIA_NS), b"thumbnail") if entry.thumbnail.is_none() => {
            entry.thumbnail = attribute(start, "url")?;
        }
        (Some(MEDIA_NS), b"statistics") => {
            entry.views = attribute(start, "views")?.and_then(|views| views.parse().ok());
        }
        _ => {}
    }
    Ok(())
}

fn attribute(start: &BytesStart<'_>, name: &str) -> Result<Option<String>, AppError> {
    let Some(attr) = start.try_get_attribute(name).map_err(quick_xml::Error::from)? else {
        return Ok(None);
    };
    let value = attr.unescape_value().map_err(quick_xml::Error::from)?;
    Ok(Some(value.into_owned()))
}

fn finish_entry(mut entry: FeedEntry, entries: &mut Vec<FeedEntry>) {
    if entry.id.is_empty() {
        warn!("Skipping feed entry without a video id: {:?}", entry.title);
        return;
    }
    if entry.url.is_empty() {
        entry.url = watch_url(&entry.id);
    }
    entries.push(entry);
}
