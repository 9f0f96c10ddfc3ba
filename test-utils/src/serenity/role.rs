//! Test factory for creating Serenity Role objects.

use serenity::all::Role;

/// Guild id used by roles created without an explicit guild.
pub const TEST_GUILD_ID: u64 = 100_000_000_000_000_001;

/// Creates a test Serenity Role with customizable fields.
///
/// Creates a Role object by deserializing JSON with the provided values.
/// All other fields are set to reasonable defaults (not hoisted, not managed,
/// not mentionable, with zero permissions).
///
/// # Arguments
/// - `role_id` - Discord role ID (snowflake)
/// - `name` - Role name
/// - `position` - Role position in the hierarchy (higher = more important)
///
/// # Returns
/// - `Role` - A valid Serenity Role struct for testing
///
/// # Panics
/// - If the JSON cannot be deserialized into a Role (indicates invalid test data)
///
/// # Examples
///
/// ```rust,ignore
/// use test_utils::serenity::role::create_test_role;
///
/// let role = create_test_role(123456789, "Moderator", 10);
/// assert_eq!(role.position, 10);
///
/// // The @everyone role shares its id with the guild
/// let everyone = create_test_role(TEST_GUILD_ID, "@everyone", 0);
/// ```
pub fn create_test_role(role_id: u64, name: &str, position: i16) -> Role {
    serde_json::from_value(serde_json::json!({
        "id": role_id.to_string(),
        "guild_id": TEST_GUILD_ID.to_string(),
        "name": name,
        "color": 0,
        "hoist": false,
        "icon": null,
        "unicode_emoji": null,
        "position": position,
        "permissions": "0",
        "managed": false,
        "mentionable": false,
    }))
    .expect("Failed to create test role - invalid JSON structure")
}
