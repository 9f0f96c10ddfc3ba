use serenity::all::{
    CommandInteraction, Context, CreateActionRow, CreateButton, CreateCommand, CreateEmbed,
    CreateEmbedAuthor, CreateEmbedFooter, CreateInteractionResponse,
    CreateInteractionResponseMessage,
};

use crate::{error::AppError, state::BotState};

pub const NAME: &str = "yt-channel";

const GUIDE_COLOR: u32 = 0x4285F4;
const YOUTUBE_ICON: &str = "https://www.gstatic.com/youtube/img/branding/favicon/favicon_144x144.png";

pub fn register() -> CreateCommand {
    CreateCommand::new(NAME).description("Shows a link to the official YouTube channel")
}

pub async fn run(state: &BotState, ctx: &Context, cmd: &CommandInteraction) -> Result<(), AppError> {
    let url = &state.config.youtube_channel_url;

    let embed = CreateEmbed::new()
        .title("Official YouTube Channel")
        .url(url)
        .description(
            "New videos and live streams are published here.\nSubscribe so you never miss an upload.",
        )
        .color(GUIDE_COLOR)
        .author(CreateEmbedAuthor::new("Open on YouTube").url(url).icon_url(YOUTUBE_ICON))
        .footer(CreateEmbedFooter::new("Channel guide"));

    cmd.create_response(
        &ctx.http,
        CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new()
                .embed(embed)
                .components(vec![CreateActionRow::Buttons(vec![
                    CreateButton::new_link(url).label("View channel"),
                ])]),
        ),
    )
    .await?;

    Ok(())
}
