use serenity::all::{Context, InviteCreateEvent, InviteDeleteEvent};

use crate::{model::invite::InviteSnapshot, state::BotState};

/// Handles the invite_create event by adding the invite to the cache.
pub async fn handle_invite_create(state: &BotState, _ctx: Context, data: InviteCreateEvent) {
    let Some(guild_id) = data.guild_id else {
        return;
    };

    state
        .invites
        .insert(guild_id, InviteSnapshot::from(&data))
        .await;

    tracing::debug!("Cached new invite {} for guild {}", data.code, guild_id);
}

/// Handles the invite_delete event by dropping the invite from the cache.
pub async fn handle_invite_delete(state: &BotState, _ctx: Context, data: InviteDeleteEvent) {
    let Some(guild_id) = data.guild_id else {
        return;
    };

    state.invites.remove(guild_id, &data.code).await;
}
