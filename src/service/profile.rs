//! Member profile card for the user inspector.

use serenity::all::{CreateEmbed, CreateEmbedFooter, GuildId, Role, RoleId, Timestamp, UserId};
use std::collections::HashMap;

pub const PROFILE_COLOR: u32 = 0x4285F4;

/// Data shown on the profile card.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberProfile {
    pub user_id: UserId,
    pub username: String,
    pub display_name: String,
    pub avatar_url: String,
    /// Presence status, `None` when no presence is cached.
    pub status: Option<String>,
    pub created_at: i64,
    pub joined_at: Option<i64>,
    pub is_admin: bool,
    /// Role mentions, highest first.
    pub roles: Vec<String>,
    pub on_mobile: bool,
}

impl MemberProfile {
    pub fn to_embed(&self) -> CreateEmbed {
        let roles = if self.roles.is_empty() {
            "None".to_string()
        } else {
            self.roles.join(" ")
        };
        let joined = self
            .joined_at
            .map(|at| format!("<t:{}:D>", at))
            .unwrap_or_else(|| "Unknown".to_string());

        CreateEmbed::new()
            .title(format!("User Profile: {}", self.display_name))
            .description(format!("ID: `{}`", self.user_id))
            .color(PROFILE_COLOR)
            .thumbnail(&self.avatar_url)
            .field(
                "Basics",
                format!(
                    "**Username:** {}\n**Status:** {}\n**Account created:** <t:{}:D>\n**Joined server:** {}",
                    self.username,
                    self.status.as_deref().unwrap_or("Unknown"),
                    self.created_at,
                    joined
                ),
                false,
            )
            .field(
                "Membership",
                format!(
                    "**Permission level:** {}\n**Roles:** {}",
                    if self.is_admin { "Administrator" } else { "Member" },
                    roles
                ),
                false,
            )
            .field(
                "Activity",
                format!("**Mobile:** {}", if self.on_mobile { "Yes" } else { "No" }),
                true,
            )
            .footer(CreateEmbedFooter::new("User inspector"))
            .timestamp(Timestamp::now())
    }
}

/// Mentions of `member_roles`, highest position first, without `@everyone`.
///
/// Roles missing from `guild_roles` are skipped.
pub fn sorted_role_mentions(
    guild_id: GuildId,
    member_roles: &[RoleId],
    guild_roles: &HashMap<RoleId, Role>,
) -> Vec<String> {
    let everyone = guild_id.everyone_role();

    let mut roles: Vec<&Role> = member_roles
        .iter()
        .filter(|id| **id != everyone)
        .filter_map(|id| guild_roles.get(id))
        .collect();
    roles.sort_by(|a, b| b.position.cmp(&a.position).then(a.id.cmp(&b.id)));

    roles.iter().map(|role| format!("<@&{}>", role.id)).collect()
}
