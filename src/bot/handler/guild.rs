use serenity::all::{Context, Guild};

use crate::state::BotState;

/// Handles the guild_create event by caching the guild's invites.
///
/// Fires for every guild on startup as well as when the bot joins a new one. Guilds
/// where the bot lacks Manage Server simply get no invite cache.
pub async fn handle_guild_create(state: &BotState, ctx: Context, guild: Guild, _is_new: Option<bool>) {
    match state.invites.refresh(&ctx.http, guild.id).await {
        Ok(()) => tracing::debug!(
            "Cached {} invites for guild {} ({})",
            state.invites.cached_count(guild.id).await,
            guild.name,
            guild.id
        ),
        Err(e) => tracing::warn!(
            "Could not cache invites for guild {} ({}): {}",
            guild.name,
            guild.id,
            e
        ),
    }
}
