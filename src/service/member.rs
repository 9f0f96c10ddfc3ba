//! Welcome report posted when a member joins.

use serenity::all::{CreateEmbed, CreateEmbedFooter, Timestamp, UserId};

use crate::model::invite::InviteSnapshot;

pub const REPORT_COLOR: u32 = 0x4285F4;

const SECONDS_PER_DAY: i64 = 86_400;

/// Everything shown in the join report, in Unix seconds where time is involved.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinReport {
    pub user_id: UserId,
    pub avatar_url: String,
    pub created_at: i64,
    pub joined_at: i64,
    /// Invite the member used, if it could be determined.
    pub invite: Option<InviteSnapshot>,
}

impl JoinReport {
    /// Whole days between account creation and `now`, never negative.
    pub fn account_age_days(&self, now: i64) -> i64 {
        (now - self.created_at).max(0) / SECONDS_PER_DAY
    }

    pub fn invite_summary(&self) -> String {
        match &self.invite {
            Some(invite) => {
                let inviter = invite
                    .inviter_id
                    .map(|id| format!("<@{}>", id))
                    .unwrap_or_else(|| "Unknown".to_string());

                format!(
                    "**Code:** `{}`\n**Created by:** {}\n**Leads to:** <#{}>",
                    invite.code, inviter, invite.channel_id
                )
            }
            None => "Could not be determined (vanity URL, bot invite or missing permissions)"
                .to_string(),
        }
    }

    pub fn to_embed(&self, now: i64) -> CreateEmbed {
        CreateEmbed::new()
            .title("New Member Joined")
            .description(format!("Welcome to the server, <@{}>.", self.user_id))
            .color(REPORT_COLOR)
            .thumbnail(&self.avatar_url)
            .field("📍 Invite", self.invite_summary(), false)
            .field(
                "📅 Account",
                format!(
                    "**Created:** <t:{}:F>\n**Age:** about {} days",
                    self.created_at,
                    self.account_age_days(now)
                ),
                false,
            )
            .field(
                "🆔 User",
                format!("**ID:** `{}`\n**Joined:** <t:{}:t>", self.user_id, self.joined_at),
                false,
            )
            .footer(CreateEmbedFooter::new("Join tracker"))
            .timestamp(Timestamp::now())
    }
}
