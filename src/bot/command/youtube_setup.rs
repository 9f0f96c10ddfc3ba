//! Administrator command configuring the YouTube upload monitor.

use serenity::all::{
    ChannelId, ChannelType, CommandInteraction, CommandOptionType, Context, CreateCommand,
    CreateCommandOption, Permissions, RoleId,
};

use crate::{
    bot::command::{channel_option, ephemeral, role_option},
    error::AppError,
    model::monitor::MonitorConfig,
    state::MonitorContainer,
};

pub const NAME: &str = "admin-yt-setup";

pub fn register() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Sets the channel and role for YouTube upload notifications")
        .default_member_permissions(Permissions::ADMINISTRATOR)
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::Channel,
                "channel",
                "Channel that receives upload notifications",
            )
            .channel_types(vec![ChannelType::Text, ChannelType::News])
            .required(true),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::Role,
            "role",
            "Role mentioned in each notification",
        ))
}

pub async fn run(ctx: &Context, cmd: &CommandInteraction) -> Result<(), AppError> {
    let channel_id = channel_option(cmd, "channel")
        .ok_or_else(|| AppError::BadRequest("A notification channel is required".to_string()))?;
    let role_id = role_option(cmd, "role");

    // The option only restricts the type; make sure the bot can actually see it.
    let channel = channel_id
        .to_channel(ctx)
        .await
        .map_err(|e| {
            AppError::BadRequest(format!("Channel <#{}> is not accessible: {}", channel_id, e))
        })?;
    if channel.guild().map(|c| c.guild_id) != cmd.guild_id {
        return Err(AppError::BadRequest(
            "The channel must belong to this server".to_string(),
        ));
    }

    let handle = ctx
        .data
        .read()
        .await
        .get::<MonitorContainer>()
        .cloned()
        .ok_or_else(|| AppError::NotFound("YouTube monitor is not running".to_string()))?;

    handle.monitor.configure(channel_id, role_id).await?;

    tracing::info!(
        "{} set YouTube notifications to channel {} (role {:?})",
        cmd.user.id,
        channel_id,
        role_id
    );

    let config = handle.monitor.current_config().await;
    cmd.create_response(&ctx.http, ephemeral(setup_summary(channel_id, role_id, &config)))
        .await?;

    if let Err(e) = handle.scheduler.restart().await {
        tracing::error!("Failed to restart YouTube monitor after setup: {}", e);
    }

    Ok(())
}

/// Confirmation shown to the administrator.
pub fn setup_summary(channel_id: ChannelId, role_id: Option<RoleId>, config: &MonitorConfig) -> String {
    let role = role_id
        .map(|id| format!("<@&{}>", id))
        .unwrap_or_else(|| "none".to_string());
    let last = if config.has_baseline() {
        format!("`{}`", config.last_video_id)
    } else {
        "none yet, the newest upload will be recorded on the next check".to_string()
    };

    format!(
        "✅ Notification settings updated\n**Channel:** <#{}>\n**Role:** {}\n**Last announced upload:** {}",
        channel_id, role, last
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_destination_and_marker() {
        let config = MonitorConfig {
            last_video_id: "abc".to_string(),
            ..MonitorConfig::default()
        };

        let summary = setup_summary(ChannelId::new(7), Some(RoleId::new(42)), &config);

        assert!(summary.contains("<#7>"));
        assert!(summary.contains("<@&42>"));
        assert!(summary.contains("`abc`"));
    }

    #[test]
    fn summary_without_role_or_baseline() {
        let summary = setup_summary(ChannelId::new(7), None, &MonitorConfig::default());

        assert!(summary.contains("**Role:** none"));
        assert!(summary.contains("none yet"));
    }
}
