//! Self-service role panels.
//!
//! A panel is a plain message: an embed naming the target role and a button with a
//! fixed custom id. The role is read back from the embed when the button is pressed, so
//! panels keep working across restarts without any stored state.

use serenity::all::{
    ButtonStyle, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter, ReactionType,
    RoleId,
};

use crate::util::parse::find_role_mention;

/// Custom id of the toggle button on every role panel.
pub const TOGGLE_BUTTON_ID: &str = "role_panel:toggle";

pub const PANEL_COLOR: u32 = 0x4285F4;

const SEPARATOR: &str = "━━━━━━━━━━━━━━";
const TARGET_LABEL: &str = "**Target role:**";

/// What pressing the toggle does for a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleToggle {
    Add,
    Remove,
}

impl RoleToggle {
    /// Removes the role if the member holds it, adds it otherwise.
    pub fn for_member(member_roles: &[RoleId], role_id: RoleId) -> Self {
        if member_roles.contains(&role_id) {
            Self::Remove
        } else {
            Self::Add
        }
    }
}

pub fn panel_description(description: &str, role_id: RoleId) -> String {
    format!("{}\n{}\n{} <@&{}>", description, SEPARATOR, TARGET_LABEL, role_id)
}

pub fn build_panel_embed(title: &str, description: &str, role_id: RoleId) -> CreateEmbed {
    CreateEmbed::new()
        .title(title)
        .description(panel_description(description, role_id))
        .color(PANEL_COLOR)
        .footer(CreateEmbedFooter::new("Role panel"))
}

pub fn panel_components() -> Vec<CreateActionRow> {
    vec![CreateActionRow::Buttons(vec![CreateButton::new(
        TOGGLE_BUTTON_ID,
    )
    .label("Add / remove role")
    .style(ButtonStyle::Primary)
    .emoji(ReactionType::Unicode("✅".to_string()))])]
}

/// Reads the target role back from a panel embed description.
///
/// Prefers the mention after the target label so a role mentioned in the free-text
/// part of the description is never picked by mistake.
pub fn panel_role(description: &str) -> Option<RoleId> {
    let target = description
        .rfind(TARGET_LABEL)
        .map(|index| &description[index..])
        .unwrap_or(description);

    find_role_mention(target).map(RoleId::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_ends_with_role_mention() {
        let description = panel_description("Pick your notifications", RoleId::new(42));

        assert!(description.starts_with("Pick your notifications\n"));
        assert!(description.ends_with("<@&42>"));
        assert!(description.contains(SEPARATOR));
    }

    #[test]
    fn role_is_read_back_from_description() {
        let description = panel_description("Ping me", RoleId::new(42));

        assert_eq!(panel_role(&description), Some(RoleId::new(42)));
    }

    #[test]
    fn target_label_wins_over_earlier_mentions() {
        let description = panel_description("Unlike <@&7>, this role is optional", RoleId::new(42));

        assert_eq!(panel_role(&description), Some(RoleId::new(42)));
    }

    #[test]
    fn legacy_panel_without_label_uses_first_mention() {
        assert_eq!(panel_role("old panel <@&9>"), Some(RoleId::new(9)));
        assert_eq!(panel_role("no mention here"), None);
    }

    #[test]
    fn toggle_depends_on_membership() {
        let roles = [RoleId::new(1), RoleId::new(2)];

        assert_eq!(RoleToggle::for_member(&roles, RoleId::new(2)), RoleToggle::Remove);
        assert_eq!(RoleToggle::for_member(&roles, RoleId::new(3)), RoleToggle::Add);
    }
}
