//! YouTube upload monitor.
//!
//! `YoutubeMonitorService` is the deduplication and notification engine. Each poll
//! loads the stored `MonitorConfig`, fetches the newest upload and compares its id with
//! the stored last-seen marker by plain string equality. A differing id is announced in
//! the configured channel and only then recorded as the new marker, so a failed dispatch
//! is retried on the next poll (at-least-once delivery).
//!
//! The service is split by concern:
//! - `feed` - Atom feed fetching and parsing
//! - `builder` - Notification rendering and summary truncation
//! - `notifier` - Channel resolution and dispatch through Discord

pub mod builder;
pub mod feed;
pub mod notifier;

use serenity::all::{ChannelId, RoleId};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    data::MonitorStateStore,
    error::{storage::StorageError, AppError},
    model::monitor::{MonitorConfig, MonitorConfigPatch, TickOutcome},
};

use self::{builder::build_upload_notification, feed::FeedSource, notifier::UploadNotifier};

/// Deduplication and notification engine of the upload monitor.
///
/// Cheap to share behind an `Arc`; the scheduler and the setup command hold the same
/// instance so the non-reentrant poll guard covers both.
pub struct YoutubeMonitorService {
    store: Arc<dyn MonitorStateStore>,
    feed: Arc<dyn FeedSource>,
    notifier: Arc<dyn UploadNotifier>,
    /// Held for the duration of one poll.
    poll_guard: Mutex<()>,
}

impl YoutubeMonitorService {
    /// Creates a new YoutubeMonitorService instance.
    ///
    /// # Arguments
    /// - `store` - Durable record of destination and last-seen marker
    /// - `feed` - Source of the newest upload
    /// - `notifier` - Sink for rendered notifications
    pub fn new(
        store: Arc<dyn MonitorStateStore>,
        feed: Arc<dyn FeedSource>,
        notifier: Arc<dyn UploadNotifier>,
    ) -> Self {
        Self {
            store,
            feed,
            notifier,
            poll_guard: Mutex::new(()),
        }
    }

    /// Runs one poll at the tick boundary.
    ///
    /// Never fails: errors are logged and reported as `TickOutcome::Failed`. When a
    /// previous poll is still running this one returns `TickOutcome::Skipped` at once.
    pub async fn poll(&self) -> TickOutcome {
        let Ok(_guard) = self.poll_guard.try_lock() else {
            tracing::warn!("Previous YouTube poll still running, skipping this one");
            return TickOutcome::Skipped;
        };

        let outcome = match self.check_for_upload().await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("YouTube poll failed: {}", e);
                TickOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };

        match &outcome {
            TickOutcome::Unconfigured => {
                tracing::debug!("YouTube monitor has no destination channel yet")
            }
            TickOutcome::NoItem => tracing::debug!("YouTube feed returned no usable entry"),
            TickOutcome::Unchanged => tracing::debug!("No new YouTube upload"),
            TickOutcome::Baseline { video_id } => {
                tracing::info!("Recorded {} as the YouTube baseline upload", video_id)
            }
            TickOutcome::Notified {
                video_id,
                persisted,
            } => {
                if *persisted {
                    tracing::info!("Announced YouTube upload {}", video_id);
                } else {
                    tracing::warn!(
                        "Announced YouTube upload {} but could not record it; it will be announced again",
                        video_id
                    );
                }
            }
            TickOutcome::Skipped | TickOutcome::Failed { .. } => {}
        }

        outcome
    }

    /// Checks the feed once and announces the newest upload if it is new.
    ///
    /// Callers other than tests should go through `poll`, which adds the reentrancy
    /// guard and error logging.
    ///
    /// # Returns
    /// - `Ok(TickOutcome)` - What the poll did
    /// - `Err(AppError::NotFound)` - Destination channel could not be resolved
    /// - `Err(AppError::DiscordErr)` - Dispatch was rejected
    ///
    /// On error the last-seen marker is left unchanged.
    pub async fn check_for_upload(&self) -> Result<TickOutcome, AppError> {
        let config = self.store.load().await;

        let Some(channel_id) = config.channel_id else {
            return Ok(TickOutcome::Unconfigured);
        };

        let Some(item) = self.feed.fetch_latest().await else {
            return Ok(TickOutcome::NoItem);
        };

        if item.id == config.last_video_id {
            return Ok(TickOutcome::Unchanged);
        }

        if !config.has_baseline() {
            if !self
                .store
                .save(MonitorConfigPatch::last_video(&item.id))
                .await
            {
                tracing::warn!("Failed to record baseline upload {}", item.id);
            }
            return Ok(TickOutcome::Baseline { video_id: item.id });
        }

        self.notifier.resolve_channel(channel_id).await?;

        let notification = build_upload_notification(&item, config.role_id);
        self.notifier.send(channel_id, &notification).await?;

        let persisted = self
            .store
            .save(MonitorConfigPatch::last_video(&item.id))
            .await;

        Ok(TickOutcome::Notified {
            video_id: item.id,
            persisted,
        })
    }

    /// Stores a new destination channel and mention role.
    ///
    /// The last-seen marker is untouched.
    ///
    /// # Returns
    /// - `Ok(())` - Destination written
    /// - `Err(AppError::StorageErr)` - Write failed
    pub async fn configure(
        &self,
        channel_id: ChannelId,
        role_id: Option<RoleId>,
    ) -> Result<(), AppError> {
        if self
            .store
            .save(MonitorConfigPatch::destination(channel_id, role_id))
            .await
        {
            Ok(())
        } else {
            Err(StorageError::WriteFailed.into())
        }
    }

    /// Returns the stored record, for status display.
    pub async fn current_config(&self) -> MonitorConfig {
        self.store.load().await
    }
}

#[cfg(test)]
mod test;
