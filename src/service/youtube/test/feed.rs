use std::time::{Duration, Instant};
use test_utils::{
    fixture::feed::{FeedBuilder, FeedEntryFixture},
    http::{closed_endpoint, fixed_response_endpoint, silent_endpoint},
};

use crate::service::youtube::feed::{parse_latest_upload, FeedSource, YoutubeFeedClient};

fn client(base_url: &str, timeout: Duration) -> YoutubeFeedClient {
    YoutubeFeedClient::new(
        reqwest::Client::new(),
        format!("{}/feeds/videos.xml?channel_id=UCtest", base_url),
        timeout,
    )
}

/// Tests extraction of the newest entry.
///
/// Expected: first entry with id, title, link, author and media fields
#[test]
fn parses_first_entry() {
    let xml = FeedBuilder::new()
        .entry("v2", "Second upload")
        .entry("v1", "First upload")
        .build();

    let item = parse_latest_upload(xml.as_bytes()).unwrap().unwrap();

    assert_eq!(item.id, "v2");
    assert_eq!(item.title, "Second upload");
    assert_eq!(item.link, "https://www.youtube.com/watch?v=v2");
    assert_eq!(item.author, "Test Channel");
    assert_eq!(
        item.author_url.as_deref(),
        Some("https://www.youtube.com/channel/UCtest")
    );
    assert_eq!(item.summary, "Description of Second upload");
    assert_eq!(
        item.thumbnail_url.as_deref(),
        Some("https://i.ytimg.com/vi/v2/hqdefault.jpg")
    );
}

/// Tests a feed with no entries.
///
/// Expected: Ok(None)
#[test]
fn empty_feed_has_no_item() {
    let xml = FeedBuilder::new().build();

    assert_eq!(parse_latest_upload(xml.as_bytes()).unwrap(), None);
}

/// Tests a newest entry without `yt:videoId`.
///
/// Expected: Ok(None), older entries are not used instead
#[test]
fn entry_without_video_id_is_dropped() {
    let mut broken = FeedEntryFixture::new("ignored", "Broken");
    broken.video_id = None;
    let xml = FeedBuilder::new()
        .with_entry(broken)
        .entry("v1", "First upload")
        .build();

    assert_eq!(parse_latest_upload(xml.as_bytes()).unwrap(), None);
}

/// Tests that markup in the description is stripped.
///
/// Expected: plain text summary
#[test]
fn description_markup_is_stripped() {
    let mut entry = FeedEntryFixture::new("v1", "Upload");
    entry.description = "<b>Bold</b> and\n\nplain".to_string();
    let xml = FeedBuilder::new().with_entry(entry).build();

    let item = parse_latest_upload(xml.as_bytes()).unwrap().unwrap();

    assert_eq!(item.summary, "Bold and plain");
}

/// Tests a body that is not an Atom document.
///
/// Expected: Err
#[test]
fn invalid_document_is_an_error() {
    assert!(parse_latest_upload(b"<html><body>rate limited</body></html>").is_err());
}

/// Tests fetching from a served feed document.
///
/// Expected: newest entry returned
#[tokio::test]
async fn fetch_latest_reads_served_feed() {
    let xml = FeedBuilder::new().entry("v2", "Second upload").build();
    let base_url = fixed_response_endpoint(200, xml).await.unwrap();

    let item = client(&base_url, Duration::from_secs(5)).fetch_latest().await;

    assert_eq!(item.map(|item| item.id).as_deref(), Some("v2"));
}

/// Tests fetching when nothing listens on the feed address.
///
/// Expected: None
#[tokio::test]
async fn fetch_latest_unreachable_is_none() {
    let base_url = closed_endpoint().await.unwrap();

    assert_eq!(client(&base_url, Duration::from_secs(5)).fetch_latest().await, None);
}

/// Tests fetching from a server that never answers.
///
/// Expected: None once the timeout elapses, not after the server gives up
#[tokio::test]
async fn fetch_latest_timeout_is_none() {
    let base_url = silent_endpoint().await.unwrap();
    let started = Instant::now();

    let item = client(&base_url, Duration::from_millis(300)).fetch_latest().await;

    assert_eq!(item, None);
    assert!(started.elapsed() < Duration::from_secs(5));
}

/// Tests fetching when the feed answers with an error status.
///
/// Expected: None, even though the body is a valid feed
#[tokio::test]
async fn fetch_latest_error_status_is_none() {
    let xml = FeedBuilder::new().entry("v2", "Second upload").build();
    let base_url = fixed_response_endpoint(404, xml).await.unwrap();

    assert_eq!(client(&base_url, Duration::from_secs(5)).fetch_latest().await, None);
}
