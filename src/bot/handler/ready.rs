//! Ready event handler for bot initialization.
//!
//! The ready handler is used to:
//! - Log connection information
//! - Register every slash command globally, and to the development guild if set

use serenity::all::{ActivityData, Command, Context, Ready};

use crate::{bot::command, state::BotState};

/// Handles the ready event when the bot connects to Discord.
///
/// Global registration can take a while to propagate; the development guild receives
/// the same commands immediately. Registration failures are logged and the bot keeps
/// running with whatever commands Discord already knows.
///
/// # Arguments
/// - `state` - Shared state, for the development guild id
/// - `ctx` - Discord context for HTTP access and setting activity status
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(state: &BotState, ctx: Context, ready: Ready) {
    tracing::info!(
        "{} is connected to Discord ({} guilds)",
        ready.user.name,
        ready.guilds.len()
    );

    ctx.set_activity(Some(ActivityData::watching("for new uploads")));

    match Command::set_global_commands(&ctx.http, command::all_commands()).await {
        Ok(commands) => tracing::info!("Registered {} global commands", commands.len()),
        Err(e) => tracing::error!("Failed to register global commands: {}", e),
    }

    if let Some(guild_id) = state.config.dev_guild_id {
        match guild_id.set_commands(&ctx.http, command::all_commands()).await {
            Ok(commands) => tracing::info!(
                "Registered {} commands to development guild {}",
                commands.len(),
                guild_id
            ),
            Err(e) => tracing::error!(
                "Failed to register commands to development guild {}: {}",
                guild_id,
                e
            ),
        }
    }
}
