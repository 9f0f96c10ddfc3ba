//! Delivery of upload notifications to Discord.

use serenity::{
    all::{Cache, ChannelId},
    async_trait,
    http::Http,
};
use std::sync::Arc;

use crate::{error::AppError, model::notification::UploadNotification};

/// Sink for rendered upload notifications.
#[async_trait]
pub trait UploadNotifier: Send + Sync {
    /// Confirms the destination channel exists and is visible to the bot.
    ///
    /// # Returns
    /// - `Ok(())` - Channel found in the cache or through the API
    /// - `Err(AppError::NotFound)` - Channel deleted or inaccessible
    async fn resolve_channel(&self, channel_id: ChannelId) -> Result<(), AppError>;

    /// Posts `notification` into `channel_id`.
    async fn send(
        &self,
        channel_id: ChannelId,
        notification: &UploadNotification,
    ) -> Result<(), AppError>;
}

/// Posts notifications through the bot's own HTTP client.
pub struct DiscordNotifier {
    http: Arc<Http>,
    cache: Arc<Cache>,
}

impl DiscordNotifier {
    pub fn new(http: Arc<Http>, cache: Arc<Cache>) -> Self {
        Self { http, cache }
    }
}

#[async_trait]
impl UploadNotifier for DiscordNotifier {
    async fn resolve_channel(&self, channel_id: ChannelId) -> Result<(), AppError> {
        if is_channel_cached(&self.cache, channel_id) {
            return Ok(());
        }

        // Not cached yet right after startup; ask the API before giving up.
        match self.http.get_channel(channel_id).await {
            Ok(_) => Ok(()),
            Err(e) => Err(AppError::NotFound(format!(
                "Notification channel {} is not accessible: {}",
                channel_id, e
            ))),
        }
    }

    async fn send(
        &self,
        channel_id: ChannelId,
        notification: &UploadNotification,
    ) -> Result<(), AppError> {
        channel_id
            .send_message(&self.http, notification.to_message())
            .await?;

        Ok(())
    }
}

/// Whether any cached guild holds `channel_id`.
pub fn is_channel_cached(cache: &Cache, channel_id: ChannelId) -> bool {
    cache.guilds().into_iter().any(|guild_id| {
        cache
            .guild(guild_id)
            .is_some_and(|guild| guild.channels.contains_key(&channel_id))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cache_holds_no_channels() {
        let cache = Cache::new();

        assert!(!is_channel_cached(&cache, ChannelId::new(1)));
    }
}
