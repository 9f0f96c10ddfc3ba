use crate::service::youtube::builder::{
    build_upload_notification, summarize, EMPTY_SUMMARY, SUMMARY_MAX_CHARS,
};

use super::*;

/// Tests truncation of a long description.
///
/// Expected: at most 130 characters, ending with an ellipsis
#[test]
fn long_summary_is_truncated() {
    let description = "a".repeat(200);

    let summary = summarize(&description);

    assert!(summary.chars().count() <= 130);
    assert!(summary.ends_with("..."));
    assert_eq!(summary.chars().count(), SUMMARY_MAX_CHARS + 3);
}

/// Tests that a short description is untouched.
///
/// Expected: same 50 characters
#[test]
fn short_summary_is_kept() {
    let description = "b".repeat(50);

    assert_eq!(summarize(&description), description);
}

/// Tests the placeholder for an empty description.
///
/// Expected: `EMPTY_SUMMARY`
#[test]
fn empty_summary_uses_placeholder() {
    assert_eq!(summarize(""), EMPTY_SUMMARY);
    assert_eq!(summarize("  <br/> "), EMPTY_SUMMARY);
}

/// Tests the rendered notification fields.
///
/// Expected: role mention in content, link and thumbnail copied from the item
#[test]
fn notification_carries_item_fields() {
    let notification = build_upload_notification(&item("v9"), Some(RoleId::new(42)));

    assert!(notification.content.starts_with("<@&42>"));
    assert!(notification.content.contains("Test Channel"));
    assert_eq!(notification.title, "Video v9");
    assert_eq!(notification.url, "https://www.youtube.com/watch?v=v9");
    assert_eq!(
        notification.thumbnail_url.as_deref(),
        Some("https://i.ytimg.com/vi/v9/hqdefault.jpg")
    );
    assert_eq!(notification.summary, "A short description");
}
