use serenity::all::{Client, GatewayIntents};

use crate::{
    bot::handler::Handler,
    error::AppError,
    state::{BotState, ShardManagerContainer},
};

/// Builds the Discord client without connecting.
///
/// The client's HTTP client and cache are needed to build the upload notifier, so the
/// connection is started separately with `start_bot`.
///
/// # Arguments
/// - `state` - Shared handler state; its config provides the bot token
///
/// # Returns
/// - `Ok(Client)` - Client ready to be started
/// - `Err(AppError::DiscordErr)` - Client construction failed
pub async fn init_bot(state: BotState) -> Result<Client, AppError> {
    // GUILD_MEMBERS is a privileged intent - must be enabled in Discord Developer Portal
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_INVITES
        | GatewayIntents::GUILD_MESSAGES;

    let token = state.config.discord_token.clone();
    let handler = Handler::new(state);

    let client = Client::builder(&token, intents)
        .event_handler(handler)
        .await?;

    client
        .data
        .write()
        .await
        .insert::<ShardManagerContainer>(client.shard_manager.clone());

    Ok(client)
}

/// Connects to the gateway and runs until the shards are shut down.
pub async fn start_bot(client: &mut Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
