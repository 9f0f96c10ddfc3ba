//! Business logic layer.
//!
//! Services coordinate the data layer, the YouTube feed and the Discord API. Discord
//! specific plumbing (interaction parsing, responses) stays in the `bot` module; what
//! lives here is either pure and unit tested or sits behind a trait so it can be
//! exercised with in-memory fakes.

pub mod invite;
pub mod member;
pub mod profile;
pub mod role_panel;
pub mod ticket;
pub mod youtube;
