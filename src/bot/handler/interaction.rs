use serenity::all::{Context, Interaction};

use crate::{bot::command, state::BotState};

/// Handles the interaction_create event by routing commands and button presses.
pub async fn handle_interaction(state: &BotState, ctx: Context, interaction: Interaction) {
    match interaction {
        Interaction::Command(cmd) => command::dispatch_command(state, &ctx, &cmd).await,
        Interaction::Component(component) => {
            command::dispatch_component(state, &ctx, &component).await
        }
        _ => {}
    }
}
