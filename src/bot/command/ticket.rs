use serenity::all::{
    CommandInteraction, CommandOptionType, ComponentInteraction, Context, CreateCommand,
    CreateCommandOption, CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, CreateMessage, Permissions,
};

use crate::{
    bot::command::{ephemeral, string_option},
    error::AppError,
    service::ticket::{
        build_panel_embed, panel_components, TicketRequest, TicketService, CLOSE_DELAY,
        DEFAULT_PANEL_DESCRIPTION, DEFAULT_PANEL_TITLE,
    },
    state::BotState,
};

pub const NAME: &str = "ticket-panel-create";

pub fn register() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Posts a support ticket panel in this channel")
        .default_member_permissions(Permissions::ADMINISTRATOR)
        .add_option(CreateCommandOption::new(
            CommandOptionType::String,
            "title",
            "Panel title",
        ))
        .add_option(CreateCommandOption::new(
            CommandOptionType::String,
            "description",
            "Panel text",
        ))
}

pub async fn run_panel(ctx: &Context, cmd: &CommandInteraction) -> Result<(), AppError> {
    let title = string_option(cmd, "title").unwrap_or(DEFAULT_PANEL_TITLE);
    let description = string_option(cmd, "description").unwrap_or(DEFAULT_PANEL_DESCRIPTION);

    cmd.channel_id
        .send_message(
            &ctx.http,
            CreateMessage::new()
                .embed(build_panel_embed(title, description))
                .components(panel_components()),
        )
        .await?;

    cmd.create_response(&ctx.http, ephemeral("✅ Ticket panel posted."))
        .await?;

    Ok(())
}

/// Opens a ticket for the member who pressed the panel button.
pub async fn run_create(
    state: &BotState,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let guild_id = component
        .guild_id
        .ok_or_else(|| AppError::BadRequest("Tickets only work in a server".to_string()))?;

    // Counter and channel creation can take longer than the response window.
    component.defer_ephemeral(&ctx.http).await?;

    let category_id = component
        .channel_id
        .to_channel(ctx)
        .await?
        .guild()
        .and_then(|channel| channel.parent_id);

    let request = TicketRequest {
        guild_id,
        category_id,
        requester_id: component.user.id,
        requester_name: component.user.name.clone(),
        bot_id: ctx.cache.current_user().id,
    };

    let service = TicketService::new(ctx.http.clone(), state.tickets.clone());
    let (_, channel) = service.open(&request).await?;

    component
        .create_followup(
            &ctx.http,
            CreateInteractionResponseFollowup::new()
                .content(format!("✅ Ticket created: <#{}>", channel.id))
                .ephemeral(true),
        )
        .await?;

    Ok(())
}

/// Announces the closure, waits, then deletes the ticket channel.
pub async fn run_close(
    state: &BotState,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    component
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(CreateInteractionResponseMessage::new().content(
                format!(
                    "🔒 **Closing this ticket.**\nThe channel will be deleted in {} seconds.",
                    CLOSE_DELAY.as_secs()
                ),
            )),
        )
        .await?;

    let service = TicketService::new(ctx.http.clone(), state.tickets.clone());
    if let Err(e) = service.close(component.channel_id).await {
        tracing::error!("Failed to delete ticket channel {}: {}", component.channel_id, e);

        component
            .channel_id
            .say(
                &ctx.http,
                "⚠️ Could not delete this channel. Check that the bot has Manage Channels and its role is high enough.",
            )
            .await?;
    }

    Ok(())
}
