use serenity::all::{
    CreateActionRow, CreateButton, CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter,
    CreateMessage, Timestamp,
};

/// Embed color used for upload notifications (YouTube red).
pub const UPLOAD_COLOR: u32 = 0xFF0000;

/// Rendered upload notification, independent of the Discord builder types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadNotification {
    /// Message body, including the role mention when configured.
    pub content: String,
    pub title: String,
    pub url: String,
    pub author: String,
    pub author_url: Option<String>,
    pub thumbnail_url: Option<String>,
    /// Truncated plain-text summary.
    pub summary: String,
}

impl UploadNotification {
    /// Builds the Discord message: content, embed and a link button to the video.
    pub fn to_message(&self) -> CreateMessage {
        let mut author = CreateEmbedAuthor::new(&self.author);
        if let Some(author_url) = &self.author_url {
            author = author.url(author_url);
        }

        let mut embed = CreateEmbed::new()
            .title(&self.title)
            .url(&self.url)
            .description(&self.summary)
            .color(UPLOAD_COLOR)
            .author(author)
            .footer(CreateEmbedFooter::new("YouTube upload monitor"))
            .timestamp(Timestamp::now());

        if let Some(thumbnail_url) = &self.thumbnail_url {
            embed = embed.image(thumbnail_url);
        }

        CreateMessage::new()
            .content(&self.content)
            .embed(embed)
            .components(vec![CreateActionRow::Buttons(vec![
                CreateButton::new_link(&self.url).label("Watch on YouTube"),
            ])])
    }
}
