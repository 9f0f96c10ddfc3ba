//! Support ticket channels.
//!
//! Tickets are private text channels created next to the panel that spawned them and
//! numbered from the persisted ticket counter. Both buttons have fixed custom ids so
//! panels and open tickets survive restarts.

use chrono::{DateTime, Utc};
use serenity::{
    all::{
        ButtonStyle, ChannelId, ChannelType, CreateActionRow, CreateButton, CreateChannel,
        CreateEmbed, CreateEmbedFooter, CreateMessage, GuildChannel, GuildId,
        PermissionOverwrite, PermissionOverwriteType, Permissions, ReactionType, RoleId,
        Timestamp, UserId,
    },
    http::Http,
};
use std::{sync::Arc, time::Duration};

use crate::{data::TicketCounterStore, error::AppError};

pub const CREATE_BUTTON_ID: &str = "ticket:create";
pub const CLOSE_BUTTON_ID: &str = "ticket:close";

/// Delay between the closing notice and the channel deletion.
pub const CLOSE_DELAY: Duration = Duration::from_secs(5);

pub const DEFAULT_PANEL_TITLE: &str = "Contact the team";
pub const DEFAULT_PANEL_DESCRIPTION: &str =
    "Press the button below to open a private channel with the moderators.";

const PANEL_COLOR: u32 = 0x3498DB;
const TICKET_COLOR: u32 = 0x2ECC71;
const MAX_CHANNEL_NAME: usize = 100;

/// Who asked for a ticket and where the panel lives.
#[derive(Debug, Clone)]
pub struct TicketRequest {
    pub guild_id: GuildId,
    /// Category of the panel channel; the ticket is created alongside it.
    pub category_id: Option<ChannelId>,
    pub requester_id: UserId,
    pub requester_name: String,
    pub bot_id: UserId,
}

/// Service creating and closing ticket channels.
pub struct TicketService {
    http: Arc<Http>,
    counter: Arc<dyn TicketCounterStore>,
}

impl TicketService {
    pub fn new(http: Arc<Http>, counter: Arc<dyn TicketCounterStore>) -> Self {
        Self { http, counter }
    }

    /// Creates the ticket channel and posts the welcome message with a close button.
    ///
    /// The ticket number is consumed even if channel creation fails afterwards.
    ///
    /// # Returns
    /// - `Ok((number, channel))` - Ticket number and the created channel
    /// - `Err(AppError::DiscordErr)` - Missing Manage Channels or the API rejected the call
    pub async fn open(&self, request: &TicketRequest) -> Result<(u32, GuildChannel), AppError> {
        let number = self.counter.next_ticket_number().await;

        let mut builder = CreateChannel::new(ticket_channel_name(number, &request.requester_name))
            .kind(ChannelType::Text)
            .topic(ticket_topic(request.requester_id, Utc::now()))
            .permissions(ticket_permissions(
                request.guild_id.everyone_role(),
                request.requester_id,
                request.bot_id,
            ));
        if let Some(category_id) = request.category_id {
            builder = builder.category(category_id);
        }

        let channel = request.guild_id.create_channel(&self.http, builder).await?;

        tracing::info!(
            "Opened ticket #{:03} ({}) for user {}",
            number,
            channel.id,
            request.requester_id
        );

        channel
            .id
            .send_message(
                &self.http,
                CreateMessage::new()
                    .embed(build_ticket_embed(number, request.requester_id))
                    .components(close_components()),
            )
            .await?;

        Ok((number, channel))
    }

    /// Waits `CLOSE_DELAY`, then deletes the ticket channel.
    pub async fn close(&self, channel_id: ChannelId) -> Result<(), AppError> {
        tokio::time::sleep(CLOSE_DELAY).await;
        channel_id.delete(&self.http).await?;

        tracing::info!("Closed ticket channel {}", channel_id);

        Ok(())
    }
}

/// Channel name `ticket-NNN-<username>`, reduced to characters Discord keeps.
pub fn ticket_channel_name(number: u32, username: &str) -> String {
    let mut slug = String::new();
    for c in username.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() || c == '_' {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    let slug = if slug.is_empty() { "user" } else { slug };

    let name = format!("ticket-{:03}-{}", number, slug);
    name.chars().take(MAX_CHANNEL_NAME).collect()
}

pub fn ticket_topic(user_id: UserId, opened_at: DateTime<Utc>) -> String {
    format!(
        "User ID: {} | Opened: {}",
        user_id,
        opened_at.format("%Y-%m-%d %H:%M UTC")
    )
}

/// Hidden from `@everyone`, open to the requester and the bot.
pub fn ticket_permissions(
    everyone: RoleId,
    requester: UserId,
    bot: UserId,
) -> Vec<PermissionOverwrite> {
    vec![
        PermissionOverwrite {
            allow: Permissions::empty(),
            deny: Permissions::VIEW_CHANNEL,
            kind: PermissionOverwriteType::Role(everyone),
        },
        PermissionOverwrite {
            allow: Permissions::VIEW_CHANNEL
                | Permissions::SEND_MESSAGES
                | Permissions::ATTACH_FILES
                | Permissions::EMBED_LINKS,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Member(requester),
        },
        PermissionOverwrite {
            allow: Permissions::VIEW_CHANNEL
                | Permissions::SEND_MESSAGES
                | Permissions::MANAGE_CHANNELS,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Member(bot),
        },
    ]
}

pub fn build_panel_embed(title: &str, description: &str) -> CreateEmbed {
    CreateEmbed::new()
        .title(format!("📩 {}", title))
        .description(format!(
            "{}\n\n━━━━━━━━━━━━━━━━━━━━━━\nTickets are created in this category.",
            description
        ))
        .color(PANEL_COLOR)
        .footer(CreateEmbedFooter::new("Support system"))
}

pub fn panel_components() -> Vec<CreateActionRow> {
    vec![CreateActionRow::Buttons(vec![CreateButton::new(
        CREATE_BUTTON_ID,
    )
    .label("Open a ticket")
    .style(ButtonStyle::Success)
    .emoji(ReactionType::Unicode("📩".to_string()))])]
}

pub fn build_ticket_embed(number: u32, requester_id: UserId) -> CreateEmbed {
    CreateEmbed::new()
        .title(format!("🎫 Ticket #{:03}", number))
        .description(format!(
            "Thanks for reaching out, <@{}>.\n\
             Describe your request here and a moderator will be with you shortly.\n\n\
             **When you are done**\nPress the button below to delete this channel.",
            requester_id
        ))
        .color(TICKET_COLOR)
        .footer(CreateEmbedFooter::new("Support system"))
        .timestamp(Timestamp::now())
}

pub fn close_components() -> Vec<CreateActionRow> {
    vec![CreateActionRow::Buttons(vec![CreateButton::new(CLOSE_BUTTON_ID)
        .label("Close ticket")
        .style(ButtonStyle::Danger)
        .emoji(ReactionType::Unicode("🔒".to_string()))])]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn channel_name_is_numbered_and_padded() {
        assert_eq!(ticket_channel_name(7, "alice"), "ticket-007-alice");
        assert_eq!(ticket_channel_name(1234, "bob"), "ticket-1234-bob");
    }

    #[test]
    fn channel_name_is_sanitised() {
        assert_eq!(ticket_channel_name(1, "Big Bob!!"), "ticket-001-big-bob");
        assert_eq!(ticket_channel_name(1, "a.b_c"), "ticket-001-a-b_c");
        assert_eq!(ticket_channel_name(1, "!!!"), "ticket-001-user");
    }

    #[test]
    fn channel_name_is_capped() {
        let name = ticket_channel_name(1, &"x".repeat(200));
        assert_eq!(name.chars().count(), MAX_CHANNEL_NAME);
    }

    #[test]
    fn topic_holds_user_and_time() {
        let opened_at = Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 0).unwrap();

        assert_eq!(
            ticket_topic(UserId::new(99), opened_at),
            "User ID: 99 | Opened: 2025-03-04 05:06 UTC"
        );
    }

    #[test]
    fn everyone_is_denied_view() {
        let overwrites = ticket_permissions(RoleId::new(1), UserId::new(2), UserId::new(3));

        assert_eq!(overwrites.len(), 3);
        assert_eq!(overwrites[0].deny, Permissions::VIEW_CHANNEL);
        assert!(overwrites[1].allow.contains(Permissions::SEND_MESSAGES));
        assert!(overwrites[2].allow.contains(Permissions::MANAGE_CHANNELS));
    }
}
