use chrono::{TimeZone, Utc};
use serde_json::json;

use super::*;
use test_utils::http::{closed_endpoint, fixed_response_endpoint};

use crate::{
    data::gist::{
        bump_ticket_count, config_from_document, merge_monitor_patch, parse_document,
        GistStateStore,
    },
    error::{storage::StorageError, AppError},
    model::monitor::MonitorConfig,
};

fn store(base_url: &str) -> GistStateStore {
    GistStateStore::with_api_url(
        reqwest::Client::new(),
        &format!("{}/gists/", base_url),
        "abc123",
        "token".to_string(),
        "bot_state.json".to_string(),
    )
}

/// Tests parsing of blank file content.
///
/// Expected: empty document
#[test]
fn parse_blank_content_is_empty_document() {
    assert!(parse_document("  ").unwrap().is_empty());
}

/// Tests parsing content that is valid JSON but not an object.
///
/// Expected: Err(StorageError::NotAnObject)
#[test]
fn parse_rejects_non_object() {
    assert!(matches!(
        parse_document("[1, 2]"),
        Err(AppError::StorageErr(StorageError::NotAnObject))
    ));
}

/// Tests that merging monitor keys keeps unrelated keys of the shared document.
///
/// Expected: ticket_count preserved, channel written as string
#[test]
fn merge_preserves_foreign_keys() {
    let mut document =
        parse_document(r#"{"ticket_count": 12, "last_video_id": "v1"}"#).unwrap();
    let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

    let merged = merge_monitor_patch(
        &mut document,
        &MonitorConfigPatch::destination(ChannelId::new(7), Some(RoleId::new(42))),
        now,
    )
    .unwrap();

    assert_eq!(merged.last_video_id, "v1");
    assert_eq!(document["ticket_count"], json!(12));
    assert_eq!(document["channel_id"], json!("7"));
    assert_eq!(document["role_id"], json!("42"));
    assert_eq!(document["last_video_id"], json!("v1"));
    assert!(document.contains_key("last_updated"));
}

/// Tests two partial saves on the document level.
///
/// Expected: second partial save keeps the first one's field
#[test]
fn merge_sequential_partials() {
    let mut document = parse_document("{}").unwrap();
    let now = Utc::now();

    merge_monitor_patch(
        &mut document,
        &MonitorConfigPatch {
            channel_id: Some(Some(ChannelId::new(7))),
            ..MonitorConfigPatch::default()
        },
        now,
    )
    .unwrap();
    merge_monitor_patch(
        &mut document,
        &MonitorConfigPatch {
            role_id: Some(Some(RoleId::new(42))),
            ..MonitorConfigPatch::default()
        },
        now,
    )
    .unwrap();

    let config = config_from_document(&document).unwrap();
    assert_eq!(config.channel_id, Some(ChannelId::new(7)));
    assert_eq!(config.role_id, Some(RoleId::new(42)));
}

/// Tests bumping the shared ticket counter.
///
/// Expected: missing count starts at 1, existing count increments
#[test]
fn bump_ticket_count_increments() {
    let mut document = parse_document(r#"{"channel_id": "7"}"#).unwrap();

    assert_eq!(bump_ticket_count(&mut document), 1);
    assert_eq!(bump_ticket_count(&mut document), 2);
    assert_eq!(document["ticket_count"], json!(2));
    assert_eq!(document["channel_id"], json!("7"));
}

/// Tests bumping a counter that holds a non-numeric value.
///
/// Expected: restarts at 1
#[test]
fn bump_ticket_count_ignores_garbage() {
    let mut document = parse_document(r#"{"ticket_count": "many"}"#).unwrap();
    assert_eq!(bump_ticket_count(&mut document), 1);
}

/// Tests the store against an unreachable API.
///
/// Expected: load degrades to defaults, save reports failure, tickets restart at 1
#[tokio::test]
async fn unreachable_api_degrades() {
    let store = store(&closed_endpoint().await.unwrap());

    assert_eq!(store.load().await, MonitorConfig::default());
    assert!(!store.save(MonitorConfigPatch::last_video("v2")).await);
    assert_eq!(store.next_ticket_number().await, 1);
}

/// Tests the store against an API answering with a server error.
///
/// Expected: load degrades to defaults, save reports failure
#[tokio::test]
async fn error_status_degrades() {
    let base_url = fixed_response_endpoint(500, r#"{"message":"boom"}"#.to_string())
        .await
        .unwrap();
    let store = store(&base_url);

    assert_eq!(store.load().await, MonitorConfig::default());
    assert!(!store.save(MonitorConfigPatch::last_video("v2")).await);
}

/// Tests loading a Gist whose file holds a monitor record among other keys.
///
/// Expected: record decoded from the file content
#[tokio::test]
async fn load_reads_gist_file() {
    let body = json!({
        "files": {
            "bot_state.json": {
                "content": r#"{"channel_id": "7", "last_video_id": "v1", "ticket_count": 3}"#
            }
        }
    })
    .to_string();
    let store = store(&fixed_response_endpoint(200, body).await.unwrap());

    let config = store.load().await;

    assert_eq!(config.channel_id, Some(ChannelId::new(7)));
    assert_eq!(config.last_video_id, "v1");
}
