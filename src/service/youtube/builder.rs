//! Upload notification rendering.

use serenity::all::RoleId;

use crate::{model::feed::FeedItem, model::notification::UploadNotification, util::text};

/// Longest summary kept before truncation, in characters.
pub const SUMMARY_MAX_CHARS: usize = 120;

/// Shown when an upload has no description.
pub const EMPTY_SUMMARY: &str = "No description provided.";

/// Renders the notification for `item`, mentioning `role_id` if one is configured.
pub fn build_upload_notification(item: &FeedItem, role_id: Option<RoleId>) -> UploadNotification {
    let content = match role_id {
        Some(role_id) => format!("<@&{}> **{}** just uploaded a new video!", role_id, item.author),
        None => format!("**{}** just uploaded a new video!", item.author),
    };

    UploadNotification {
        content,
        title: item.title.clone(),
        url: item.link.clone(),
        author: item.author.clone(),
        author_url: item.author_url.clone(),
        thumbnail_url: item.thumbnail_url.clone(),
        summary: summarize(&item.summary),
    }
}

/// Shortens a plain-text description to `SUMMARY_MAX_CHARS` plus an ellipsis.
pub fn summarize(description: &str) -> String {
    let description = text::strip_markup(description);
    if description.is_empty() {
        return EMPTY_SUMMARY.to_string();
    }

    text::truncate_chars(&description, SUMMARY_MAX_CHARS)
}
