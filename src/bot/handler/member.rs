use chrono::Utc;
use serenity::all::{ChannelId, Context, CreateMessage, GuildId, Member};

use crate::{
    service::{invite::fetch_invites, member::JoinReport},
    state::BotState,
};

/// Handles the guild_member_addition event by posting a join report.
///
/// The report goes to the guild's system channel. Guilds without one, or where the
/// invites cannot be read, get no report.
pub async fn handle_guild_member_addition(state: &BotState, ctx: Context, new_member: Member) {
    let guild_id = new_member.guild_id;

    let Some(system_channel) = system_channel(&ctx, guild_id).await else {
        tracing::debug!("Guild {} has no system channel, skipping join report", guild_id);
        return;
    };

    let current = match fetch_invites(&ctx.http, guild_id).await {
        Ok(invites) => invites,
        Err(e) => {
            tracing::warn!("Failed to fetch invites for guild {}: {}", guild_id, e);
            return;
        }
    };
    let invite = state.invites.resolve_join(guild_id, current).await;

    let report = JoinReport {
        user_id: new_member.user.id,
        avatar_url: new_member.face(),
        created_at: new_member.user.id.created_at().unix_timestamp(),
        joined_at: new_member
            .joined_at
            .map(|at| at.unix_timestamp())
            .unwrap_or_else(|| Utc::now().timestamp()),
        invite,
    };

    let message = CreateMessage::new().embed(report.to_embed(Utc::now().timestamp()));
    if let Err(e) = system_channel.send_message(&ctx.http, message).await {
        tracing::error!(
            "Failed to post join report for {} in guild {}: {}",
            new_member.user.id,
            guild_id,
            e
        );
    } else {
        tracing::info!(
            "Member {} joined guild {} via {}",
            new_member.user.name,
            guild_id,
            report
                .invite
                .as_ref()
                .map_or("an unknown invite", |invite| invite.code.as_str())
        );
    }
}

/// Looks up the system channel in the cache, falling back to the API.
async fn system_channel(ctx: &Context, guild_id: GuildId) -> Option<ChannelId> {
    if let Some(cached) = ctx.cache.guild(guild_id).map(|guild| guild.system_channel_id) {
        return cached;
    }

    match ctx.http.get_guild(guild_id).await {
        Ok(guild) => guild.system_channel_id,
        Err(e) => {
            tracing::warn!("Failed to fetch guild {}: {}", guild_id, e);
            None
        }
    }
}
