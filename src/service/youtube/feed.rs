//! YouTube Atom feed access.
//!
//! The channel feed lists the most recent uploads newest first. Only the first entry
//! is of interest; it is converted into a `FeedItem` here so the rest of the monitor
//! never deals with XML.

use atom_syndication::{extension::Extension, Entry, Feed};
use serenity::async_trait;
use std::time::Duration;

use crate::{error::AppError, model::feed::FeedItem, util::text::strip_markup};

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Source of the newest upload.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Returns the newest upload, or `None` if the feed is unreachable, empty or its
    /// newest entry has no video id. Failures are logged, never raised.
    async fn fetch_latest(&self) -> Option<FeedItem>;
}

/// Fetches the public Atom feed of one YouTube channel.
pub struct YoutubeFeedClient {
    http: reqwest::Client,
    feed_url: String,
    timeout: Duration,
}

impl YoutubeFeedClient {
    pub fn new(http: reqwest::Client, feed_url: String, timeout: Duration) -> Self {
        Self {
            http,
            feed_url,
            timeout,
        }
    }

    /// Downloads and parses the feed.
    ///
    /// # Returns
    /// - `Ok(Some(item))` - Newest entry parsed
    /// - `Ok(None)` - Feed empty or newest entry unusable
    /// - `Err(AppError::ReqwestErr)` - Request failed, timed out or returned non-2xx
    /// - `Err(AppError::FeedErr)` - Body is not a valid Atom document
    pub async fn fetch(&self) -> Result<Option<FeedItem>, AppError> {
        let body = self
            .http
            .get(&self.feed_url)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        parse_latest_upload(&body)
    }
}

#[async_trait]
impl FeedSource for YoutubeFeedClient {
    async fn fetch_latest(&self) -> Option<FeedItem> {
        match self.fetch().await {
            Ok(item) => item,
            Err(e) => {
                tracing::warn!("Failed to fetch YouTube feed {}: {}", self.feed_url, e);
                None
            }
        }
    }
}

/// Parses an Atom document and extracts its first (newest) entry.
///
/// An entry without a `yt:videoId` is treated as no item at all, since it could never
/// be compared against the stored marker.
pub fn parse_latest_upload(xml: &[u8]) -> Result<Option<FeedItem>, AppError> {
    let feed = Feed::read_from(xml)?;

    let Some(entry) = feed.entries().first() else {
        return Ok(None);
    };

    let Some(video_id) = video_id(entry) else {
        tracing::warn!("Newest feed entry '{}' has no video id", entry.id());
        return Ok(None);
    };

    let (author, author_url) = match entry.authors().first().or(feed.authors().first()) {
        Some(person) => (
            person.name().to_string(),
            person.uri().map(str::to_string),
        ),
        None => (feed.title().as_str().to_string(), None),
    };

    let link = entry
        .links()
        .iter()
        .find(|link| link.rel() == "alternate")
        .or(entry.links().first())
        .map(|link| link.href().to_string())
        .unwrap_or_else(|| format!("{}{}", WATCH_URL, video_id));

    let media = entry
        .extensions()
        .get("media")
        .and_then(|m| m.get("group"))
        .and_then(|groups| groups.first());

    let summary = media
        .and_then(|group| child(group, "description"))
        .and_then(|description| description.value())
        .map(strip_markup)
        .unwrap_or_default();

    let thumbnail_url = media
        .and_then(|group| child(group, "thumbnail"))
        .and_then(|thumbnail| thumbnail.attrs().get("url"))
        .cloned();

    Ok(Some(FeedItem {
        id: video_id,
        title: entry.title().as_str().trim().to_string(),
        author,
        author_url,
        link,
        summary,
        thumbnail_url,
    }))
}

fn video_id(entry: &Entry) -> Option<String> {
    entry
        .extensions()
        .get("yt")
        .and_then(|yt| yt.get("videoId"))
        .and_then(|values| values.first())
        .and_then(|ext| ext.value())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

/// Finds a child element by local name, whatever prefix the document used.
fn child<'a>(parent: &'a Extension, name: &str) -> Option<&'a Extension> {
    parent
        .children()
        .iter()
        .find(|(key, _)| {
            key.as_str() == name
                || key
                    .rsplit_once(':')
                    .is_some_and(|(_, local)| local == name)
        })
        .and_then(|(_, values)| values.first())
}
