use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateInteractionResponse, CreateInteractionResponseMessage, Member,
};

use crate::{
    bot::command::user_option,
    error::AppError,
    service::profile::{sorted_role_mentions, MemberProfile},
};

pub const NAME: &str = "user-inspect";

pub fn register() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Shows a detailed profile of a member")
        .add_option(CreateCommandOption::new(
            CommandOptionType::User,
            "member",
            "Member to inspect (defaults to you)",
        ))
}

pub async fn run(ctx: &Context, cmd: &CommandInteraction) -> Result<(), AppError> {
    let guild_id = cmd
        .guild_id
        .ok_or_else(|| AppError::BadRequest("This command only works in a server".to_string()))?;
    let user_id = user_option(cmd, "member").unwrap_or(cmd.user.id);

    let member = guild_id.member(ctx, user_id).await?;
    let profile = build_profile(ctx, &member);

    cmd.create_response(
        &ctx.http,
        CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new().embed(profile.to_embed()),
        ),
    )
    .await?;

    Ok(())
}

/// Collects the profile from the member and whatever the cache knows about the guild.
fn build_profile(ctx: &Context, member: &Member) -> MemberProfile {
    let user_id = member.user.id;

    let (roles, is_admin, status, on_mobile) = match ctx.cache.guild(member.guild_id) {
        Some(guild) => {
            let presence = guild.presences.get(&user_id);
            (
                sorted_role_mentions(guild.id, &member.roles, &guild.roles),
                guild.member_permissions(member).administrator(),
                presence.map(|p| p.status.name().to_string()),
                presence
                    .and_then(|p| p.client_status.as_ref())
                    .is_some_and(|status| status.mobile.is_some()),
            )
        }
        None => (
            member.roles.iter().map(|id| format!("<@&{}>", id)).collect(),
            false,
            None,
            false,
        ),
    };

    MemberProfile {
        user_id,
        username: member.user.name.clone(),
        display_name: member.display_name().to_string(),
        avatar_url: member.face(),
        status,
        created_at: user_id.created_at().unix_timestamp(),
        joined_at: member.joined_at.map(|at| at.unix_timestamp()),
        is_admin,
        roles,
        on_mobile,
    }
}
