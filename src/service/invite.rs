//! Invite use tracking.
//!
//! Discord does not say which invite a new member used. The tracker keeps the use
//! count of every invite per guild and, when a member joins, refetches the invites and
//! looks for the one whose count went up.

use serenity::{all::GuildId, http::Http};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::{error::AppError, model::invite::InviteSnapshot};

type GuildInvites = HashMap<String, InviteSnapshot>;

/// Per-guild cache of invite use counts.
#[derive(Default)]
pub struct InviteTracker {
    guilds: RwLock<HashMap<GuildId, GuildInvites>>,
}

impl InviteTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the cached invites of `guild_id` with a fresh fetch.
    ///
    /// # Returns
    /// - `Ok(())` - Cache replaced
    /// - `Err(AppError::DiscordErr)` - Fetch failed, typically missing Manage Server
    pub async fn refresh(&self, http: &Http, guild_id: GuildId) -> Result<(), AppError> {
        let invites = fetch_invites(http, guild_id).await?;
        self.replace(guild_id, invites).await;
        Ok(())
    }

    pub async fn replace(&self, guild_id: GuildId, invites: Vec<InviteSnapshot>) {
        let invites = invites
            .into_iter()
            .map(|invite| (invite.code.clone(), invite))
            .collect();

        self.guilds.write().await.insert(guild_id, invites);
    }

    pub async fn insert(&self, guild_id: GuildId, invite: InviteSnapshot) {
        self.guilds
            .write()
            .await
            .entry(guild_id)
            .or_default()
            .insert(invite.code.clone(), invite);
    }

    pub async fn remove(&self, guild_id: GuildId, code: &str) {
        if let Some(invites) = self.guilds.write().await.get_mut(&guild_id) {
            invites.remove(code);
        }
    }

    /// Compares `current` with the cached invites and replaces the cache with it.
    ///
    /// # Returns
    /// - `Some(InviteSnapshot)` - The invite (as it is now) whose use count increased
    /// - `None` - No cached invite gained a use (vanity URL, bot invite, unknown guild)
    pub async fn resolve_join(
        &self,
        guild_id: GuildId,
        current: Vec<InviteSnapshot>,
    ) -> Option<InviteSnapshot> {
        let mut guilds = self.guilds.write().await;

        let used = guilds
            .get(&guild_id)
            .and_then(|before| find_used_invite(before, &current));

        guilds.insert(
            guild_id,
            current
                .into_iter()
                .map(|invite| (invite.code.clone(), invite))
                .collect(),
        );

        used
    }

    /// Number of cached invites for `guild_id`.
    pub async fn cached_count(&self, guild_id: GuildId) -> usize {
        self.guilds
            .read()
            .await
            .get(&guild_id)
            .map_or(0, HashMap::len)
    }
}

/// Fetches every invite of `guild_id` as snapshots.
pub async fn fetch_invites(http: &Http, guild_id: GuildId) -> Result<Vec<InviteSnapshot>, AppError> {
    let invites = guild_id.invites(http).await?;
    Ok(invites.iter().map(InviteSnapshot::from).collect())
}

/// Returns the first invite in `after` whose use count exceeds its cached count.
///
/// Codes missing from `before` are ignored; a brand new invite cannot be told apart
/// from one that was used.
pub fn find_used_invite(before: &GuildInvites, after: &[InviteSnapshot]) -> Option<InviteSnapshot> {
    after
        .iter()
        .find(|invite| {
            before
                .get(&invite.code)
                .is_some_and(|cached| invite.uses > cached.uses)
        })
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serenity::all::{ChannelId, UserId};

    fn invite(code: &str, uses: u64) -> InviteSnapshot {
        InviteSnapshot {
            code: code.to_string(),
            uses,
            inviter_id: Some(UserId::new(10)),
            channel_id: ChannelId::new(20),
        }
    }

    fn cached(invites: &[InviteSnapshot]) -> GuildInvites {
        invites
            .iter()
            .map(|i| (i.code.clone(), i.clone()))
            .collect()
    }

    #[test]
    fn finds_invite_with_increased_uses() {
        let before = cached(&[invite("aaa", 1), invite("bbb", 5)]);
        let after = [invite("aaa", 1), invite("bbb", 6)];

        let used = find_used_invite(&before, &after).unwrap();

        assert_eq!(used.code, "bbb");
        assert_eq!(used.uses, 6);
    }

    #[test]
    fn unchanged_counts_are_inconclusive() {
        let before = cached(&[invite("aaa", 1)]);
        assert_eq!(find_used_invite(&before, &[invite("aaa", 1)]), None);
    }

    #[test]
    fn new_codes_are_ignored() {
        let before = cached(&[invite("aaa", 1)]);
        assert_eq!(find_used_invite(&before, &[invite("new", 1)]), None);
    }

    #[tokio::test]
    async fn resolve_join_updates_cache() {
        let tracker = InviteTracker::new();
        let guild_id = GuildId::new(1);
        tracker.replace(guild_id, vec![invite("aaa", 1)]).await;

        let used = tracker
            .resolve_join(guild_id, vec![invite("aaa", 2)])
            .await;
        assert_eq!(used.map(|i| i.code), Some("aaa".to_string()));

        // Same counts again: the cache already holds the new value.
        let used = tracker
            .resolve_join(guild_id, vec![invite("aaa", 2)])
            .await;
        assert_eq!(used, None);
    }

    #[tokio::test]
    async fn unknown_guild_is_cached_on_first_join() {
        let tracker = InviteTracker::new();
        let guild_id = GuildId::new(2);

        let used = tracker
            .resolve_join(guild_id, vec![invite("aaa", 3)])
            .await;

        assert_eq!(used, None);
        assert_eq!(tracker.cached_count(guild_id).await, 1);
    }

    #[tokio::test]
    async fn create_and_delete_events_keep_cache_current() {
        let tracker = InviteTracker::new();
        let guild_id = GuildId::new(3);

        tracker.insert(guild_id, invite("aaa", 0)).await;
        tracker.insert(guild_id, invite("bbb", 0)).await;
        tracker.remove(guild_id, "aaa").await;

        assert_eq!(tracker.cached_count(guild_id).await, 1);

        let used = tracker
            .resolve_join(guild_id, vec![invite("bbb", 1)])
            .await;
        assert_eq!(used.map(|i| i.code), Some("bbb".to_string()));
    }
}
