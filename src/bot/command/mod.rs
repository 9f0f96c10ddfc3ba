//! Slash commands and persistent buttons.
//!
//! Each command module exposes a `NAME`, a `register` builder and a `run` handler
//! returning `Result<(), AppError>`. Errors are logged here and reported to the invoking
//! user as an ephemeral message, whether or not the handler had already responded.

pub mod ping;
pub mod role_panel;
pub mod ticket;
pub mod user_inspect;
pub mod youtube_setup;
pub mod yt_channel;

use serenity::all::{
    ChannelId, CommandDataOptionValue, CommandInteraction, ComponentInteraction, Context,
    CreateCommand, CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, RoleId, UserId,
};

use crate::{
    error::AppError,
    service::{
        role_panel::TOGGLE_BUTTON_ID,
        ticket::{CLOSE_BUTTON_ID, CREATE_BUTTON_ID},
    },
    state::BotState,
};

/// Every slash command the bot registers.
pub fn all_commands() -> Vec<CreateCommand> {
    vec![
        ping::register(),
        yt_channel::register(),
        user_inspect::register(),
        youtube_setup::register(),
        role_panel::register_create(),
        role_panel::register_edit(),
        ticket::register(),
    ]
}

pub async fn dispatch_command(state: &BotState, ctx: &Context, cmd: &CommandInteraction) {
    let result = match cmd.data.name.as_str() {
        ping::NAME => ping::run(ctx, cmd).await,
        yt_channel::NAME => yt_channel::run(state, ctx, cmd).await,
        user_inspect::NAME => user_inspect::run(ctx, cmd).await,
        youtube_setup::NAME => youtube_setup::run(ctx, cmd).await,
        role_panel::CREATE_NAME => role_panel::run_create(ctx, cmd).await,
        role_panel::EDIT_NAME => role_panel::run_edit(ctx, cmd).await,
        ticket::NAME => ticket::run_panel(ctx, cmd).await,
        other => {
            tracing::warn!("Received unknown command /{}", other);
            return;
        }
    };

    if let Err(e) = result {
        tracing::error!("Command /{} failed for {}: {}", cmd.data.name, cmd.user.id, e);
        report_command_error(ctx, cmd, &e).await;
    }
}

pub async fn dispatch_component(state: &BotState, ctx: &Context, component: &ComponentInteraction) {
    let result = match component.data.custom_id.as_str() {
        TOGGLE_BUTTON_ID => role_panel::run_toggle(ctx, component).await,
        CREATE_BUTTON_ID => ticket::run_create(state, ctx, component).await,
        CLOSE_BUTTON_ID => ticket::run_close(state, ctx, component).await,
        other => {
            tracing::debug!("Ignoring component interaction {}", other);
            return;
        }
    };

    if let Err(e) = result {
        tracing::error!(
            "Button {} failed for {}: {}",
            component.data.custom_id,
            component.user.id,
            e
        );
        report_component_error(ctx, component, &e).await;
    }
}

/// Ephemeral plain-text response.
pub fn ephemeral(content: impl Into<String>) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    )
}

fn option<'a>(cmd: &'a CommandInteraction, name: &str) -> Option<&'a CommandDataOptionValue> {
    cmd.data
        .options
        .iter()
        .find(|option| option.name == name)
        .map(|option| &option.value)
}

pub fn string_option<'a>(cmd: &'a CommandInteraction, name: &str) -> Option<&'a str> {
    option(cmd, name).and_then(CommandDataOptionValue::as_str)
}

pub fn channel_option(cmd: &CommandInteraction, name: &str) -> Option<ChannelId> {
    option(cmd, name).and_then(CommandDataOptionValue::as_channel_id)
}

pub fn role_option(cmd: &CommandInteraction, name: &str) -> Option<RoleId> {
    option(cmd, name).and_then(CommandDataOptionValue::as_role_id)
}

pub fn user_option(cmd: &CommandInteraction, name: &str) -> Option<UserId> {
    option(cmd, name).and_then(CommandDataOptionValue::as_user_id)
}

/// Like `string_option`, but missing or blank values are a `BadRequest`.
pub fn required_string<'a>(cmd: &'a CommandInteraction, name: &str) -> Result<&'a str, AppError> {
    string_option(cmd, name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("Missing required option `{}`", name)))
}

fn error_text(error: &AppError) -> String {
    format!("⚠️ {}", error)
}

async fn report_command_error(ctx: &Context, cmd: &CommandInteraction, error: &AppError) {
    let content = error_text(error);
    if cmd
        .create_response(&ctx.http, ephemeral(content.clone()))
        .await
        .is_ok()
    {
        return;
    }

    // Already acknowledged; fall back to a follow-up.
    if let Err(e) = cmd
        .create_followup(
            &ctx.http,
            CreateInteractionResponseFollowup::new()
                .content(content)
                .ephemeral(true),
        )
        .await
    {
        tracing::warn!("Failed to report command error to {}: {}", cmd.user.id, e);
    }
}

async fn report_component_error(ctx: &Context, component: &ComponentInteraction, error: &AppError) {
    let content = error_text(error);
    if component
        .create_response(&ctx.http, ephemeral(content.clone()))
        .await
        .is_ok()
    {
        return;
    }

    if let Err(e) = component
        .create_followup(
            &ctx.http,
            CreateInteractionResponseFollowup::new()
                .content(content)
                .ephemeral(true),
        )
        .await
    {
        tracing::warn!("Failed to report button error to {}: {}", component.user.id, e);
    }
}
