use serenity::all::{
    CommandInteraction, CommandOptionType, ComponentInteraction, Context, CreateCommand,
    CreateCommandOption, CreateMessage, EditMessage, MessageId, Permissions, RoleId,
};

use crate::{
    bot::command::{ephemeral, required_string, role_option},
    error::AppError,
    service::role_panel::{build_panel_embed, panel_components, panel_role, RoleToggle},
    util::parse::parse_snowflake,
};

pub const CREATE_NAME: &str = "role-panel-create";
pub const EDIT_NAME: &str = "role-panel-edit";

fn panel_options(command: CreateCommand) -> CreateCommand {
    command
        .add_option(
            CreateCommandOption::new(CommandOptionType::String, "title", "Panel title")
                .required(true),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::String, "description", "Panel text")
                .required(true),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::Role, "role", "Role the button toggles")
                .required(true),
        )
}

pub fn register_create() -> CreateCommand {
    panel_options(
        CreateCommand::new(CREATE_NAME)
            .description("Posts a panel with a button that toggles a role")
            .default_member_permissions(Permissions::ADMINISTRATOR),
    )
}

pub fn register_edit() -> CreateCommand {
    panel_options(
        CreateCommand::new(EDIT_NAME)
            .description("Updates an existing role panel in this channel")
            .default_member_permissions(Permissions::ADMINISTRATOR)
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "message_id",
                    "Id of the panel message",
                )
                .required(true),
            ),
    )
}

struct PanelInput<'a> {
    title: &'a str,
    description: &'a str,
    role_id: RoleId,
}

fn panel_input(cmd: &CommandInteraction) -> Result<PanelInput<'_>, AppError> {
    Ok(PanelInput {
        title: required_string(cmd, "title")?,
        description: required_string(cmd, "description")?,
        role_id: role_option(cmd, "role")
            .ok_or_else(|| AppError::BadRequest("A role is required".to_string()))?,
    })
}

pub async fn run_create(ctx: &Context, cmd: &CommandInteraction) -> Result<(), AppError> {
    let input = panel_input(cmd)?;

    cmd.channel_id
        .send_message(
            &ctx.http,
            CreateMessage::new()
                .embed(build_panel_embed(input.title, input.description, input.role_id))
                .components(panel_components()),
        )
        .await?;

    tracing::info!(
        "{} created a role panel for role {} in channel {}",
        cmd.user.id,
        input.role_id,
        cmd.channel_id
    );

    cmd.create_response(&ctx.http, ephemeral("✅ Role panel created."))
        .await?;

    Ok(())
}

pub async fn run_edit(ctx: &Context, cmd: &CommandInteraction) -> Result<(), AppError> {
    let message_id = parse_snowflake(required_string(cmd, "message_id")?)
        .map(MessageId::new)
        .map_err(|_| AppError::BadRequest("`message_id` must be a message id".to_string()))?;
    let input = panel_input(cmd)?;

    cmd.channel_id
        .edit_message(
            &ctx.http,
            message_id,
            EditMessage::new()
                .embed(build_panel_embed(input.title, input.description, input.role_id))
                .components(panel_components()),
        )
        .await
        .map_err(|e| {
            AppError::NotFound(format!(
                "Could not edit message {} in this channel: {}",
                message_id, e
            ))
        })?;

    cmd.create_response(&ctx.http, ephemeral("✅ Role panel updated."))
        .await?;

    Ok(())
}

/// Toggles the panel's role on the member who pressed the button.
pub async fn run_toggle(ctx: &Context, component: &ComponentInteraction) -> Result<(), AppError> {
    let role_id = component
        .message
        .embeds
        .first()
        .and_then(|embed| embed.description.as_deref())
        .and_then(panel_role)
        .ok_or_else(|| AppError::BadRequest("Could not determine the panel's role".to_string()))?;

    let member = component
        .member
        .as_ref()
        .ok_or_else(|| AppError::BadRequest("Role panels only work in a server".to_string()))?;

    let role_name = ctx
        .cache
        .guild(member.guild_id)
        .and_then(|guild| guild.roles.get(&role_id).map(|role| role.name.clone()))
        .ok_or_else(|| AppError::NotFound("That role no longer exists".to_string()))?;

    let content = match RoleToggle::for_member(&member.roles, role_id) {
        RoleToggle::Add => {
            member.add_role(&ctx.http, role_id).await?;
            format!("**{}** added.", role_name)
        }
        RoleToggle::Remove => {
            member.remove_role(&ctx.http, role_id).await?;
            format!("**{}** removed.", role_name)
        }
    };

    component.create_response(&ctx.http, ephemeral(content)).await?;

    Ok(())
}
