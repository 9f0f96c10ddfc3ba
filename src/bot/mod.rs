//! Discord gateway integration.
//!
//! The handler reacts to gateway events (ready, guild availability, member joins,
//! invite changes) and routes slash commands and button presses to the `command`
//! modules. Every command and button is registered on ready; buttons use fixed custom
//! ids so panels posted before a restart keep working.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Guild availability and the channel/role cache
//! - `GUILD_MEMBERS` - Member join events for the join tracker (privileged intent)
//! - `GUILD_INVITES` - Invite create/delete events keeping the invite cache current
//! - `GUILD_MESSAGES` - Message events in guild channels
//!
//! Note: `GUILD_MEMBERS` is a privileged intent and must be explicitly enabled
//! in the Discord Developer Portal for the bot application.

pub mod command;
pub mod handler;
pub mod start;
