use serenity::all::{
    CommandInteraction, Context, CreateCommand, CreateInteractionResponse,
    CreateInteractionResponseMessage,
};
use std::time::Duration;

use crate::{error::AppError, state::ShardManagerContainer};

pub const NAME: &str = "ping";

pub fn register() -> CreateCommand {
    CreateCommand::new(NAME).description("Shows the bot's gateway latency")
}

pub async fn run(ctx: &Context, cmd: &CommandInteraction) -> Result<(), AppError> {
    let shard_manager = ctx.data.read().await.get::<ShardManagerContainer>().cloned();

    let latency = match shard_manager {
        Some(manager) => manager
            .runners
            .lock()
            .await
            .get(&ctx.shard_id)
            .and_then(|runner| runner.latency),
        None => None,
    };

    cmd.create_response(
        &ctx.http,
        CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new().content(latency_message(latency)),
        ),
    )
    .await?;

    Ok(())
}

/// Reply text; latency is unknown until the first heartbeat is acknowledged.
pub fn latency_message(latency: Option<Duration>) -> String {
    match latency {
        Some(latency) => format!("Pong! Latency: {}ms", latency.as_millis()),
        None => "Pong! Latency: unavailable (no heartbeat yet)".to_string(),
    }
}
