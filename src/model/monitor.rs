//! YouTube monitor configuration and checkpoint models.
//!
//! `MonitorConfig` is the sole durable memory of the upload monitor: where to post,
//! whom to mention, and which upload was announced last. It is read on every poll and
//! written by the admin setup command and after each dispatched notification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serenity::all::{ChannelId, RoleId};

/// Durable configuration and checkpoint record of the upload monitor.
///
/// Every field defaults when absent so records written by older versions, or partial
/// documents, still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Destination channel; `None` suspends notification dispatch.
    #[serde(default, with = "crate::util::snowflake::optional")]
    pub channel_id: Option<ChannelId>,
    /// Role mentioned in each notification.
    #[serde(default, with = "crate::util::snowflake::optional")]
    pub role_id: Option<RoleId>,
    /// Id of the most recently notified upload; empty if none yet.
    #[serde(default)]
    pub last_video_id: String,
    /// Time of the last successful write, informational only.
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl MonitorConfig {
    /// Whether a baseline upload has been recorded yet.
    pub fn has_baseline(&self) -> bool {
        !self.last_video_id.is_empty()
    }
}

/// Partial update of a `MonitorConfig`.
///
/// Only fields set to `Some` are written; everything else in the stored record is
/// left untouched. The channel and role fields are doubly optional so a patch can
/// explicitly clear them (`Some(None)`) as well as leave them alone (`None`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonitorConfigPatch {
    pub channel_id: Option<Option<ChannelId>>,
    pub role_id: Option<Option<RoleId>>,
    pub last_video_id: Option<String>,
}

impl MonitorConfigPatch {
    /// Patch written by the admin setup command.
    pub fn destination(channel_id: ChannelId, role_id: Option<RoleId>) -> Self {
        Self {
            channel_id: Some(Some(channel_id)),
            role_id: Some(role_id),
            last_video_id: None,
        }
    }

    /// Patch advancing the last-seen marker.
    pub fn last_video(video_id: impl Into<String>) -> Self {
        Self {
            last_video_id: Some(video_id.into()),
            ..Self::default()
        }
    }

    /// Merges the patch into `config`, stamping `last_updated` with `now`.
    pub fn apply_to(&self, config: &mut MonitorConfig, now: DateTime<Utc>) {
        if let Some(channel_id) = self.channel_id {
            config.channel_id = channel_id;
        }
        if let Some(role_id) = self.role_id {
            config.role_id = role_id;
        }
        if let Some(last_video_id) = &self.last_video_id {
            config.last_video_id = last_video_id.clone();
        }
        config.last_updated = Some(now);
    }
}

/// Result of one monitor poll, used for logging and tests.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// No destination channel configured; nothing fetched.
    Unconfigured,
    /// The feed was empty, unreachable or its newest entry unusable.
    NoItem,
    /// The newest upload is the one already announced.
    Unchanged,
    /// First poll after setup; the newest upload was recorded without notifying.
    Baseline { video_id: String },
    /// A notification was dispatched.
    ///
    /// `persisted` is false when the marker write failed, in which case the same
    /// upload will be announced again on the next poll.
    Notified { video_id: String, persisted: bool },
    /// A previous poll was still running, so this one did nothing.
    Skipped,
    /// The poll was aborted by an error; the marker was left unchanged.
    Failed { error: String },
}
