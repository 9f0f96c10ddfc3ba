//! YouTube Atom feed fixtures.
//!
//! Produces documents shaped like `https://www.youtube.com/feeds/videos.xml`, including
//! the `yt:` and `media:` extension elements the feed poller reads.

/// A single `<entry>` of a YouTube upload feed.
#[derive(Debug, Clone)]
pub struct FeedEntryFixture {
    /// Value of `<yt:videoId>`; `None` omits the element entirely.
    pub video_id: Option<String>,
    pub title: String,
    pub author: String,
    pub author_url: String,
    /// Raw `<media:description>` text, escaped on output.
    pub description: String,
}

impl FeedEntryFixture {
    /// Creates an entry with default author and description.
    pub fn new(video_id: &str, title: &str) -> Self {
        Self {
            video_id: Some(video_id.to_string()),
            title: title.to_string(),
            author: "Test Channel".to_string(),
            author_url: "https://www.youtube.com/channel/UCtest".to_string(),
            description: format!("Description of {}", title),
        }
    }
}

/// Builder for YouTube upload feed documents.
///
/// Entries are emitted in insertion order, so the first entry added is the "newest"
/// item from the poller's point of view.
#[derive(Debug, Default)]
pub struct FeedBuilder {
    entries: Vec<FeedEntryFixture>,
}

impl FeedBuilder {
    /// Creates a builder with no entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry with default author and description.
    pub fn entry(mut self, video_id: &str, title: &str) -> Self {
        self.entries.push(FeedEntryFixture::new(video_id, title));
        self
    }

    /// Appends a fully customised entry.
    pub fn with_entry(mut self, entry: FeedEntryFixture) -> Self {
        self.entries.push(entry);
        self
    }

    /// Renders the Atom document.
    pub fn build(&self) -> String {
        let mut xml = String::from(concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<feed xmlns:yt=\"http://www.youtube.com/xml/schemas/2015\" ",
            "xmlns:media=\"http://search.yahoo.com/mrss/\" ",
            "xmlns=\"http://www.w3.org/2005/Atom\">\n",
            " <id>yt:channel:UCtest</id>\n",
            " <title>Test Channel</title>\n",
            " <updated>2025-01-01T00:00:00+00:00</updated>\n",
        ));

        for entry in &self.entries {
            let id = entry.video_id.as_deref().unwrap_or("missing");
            xml.push_str(" <entry>\n");
            xml.push_str(&format!("  <id>yt:video:{}</id>\n", escape(id)));
            if let Some(video_id) = &entry.video_id {
                xml.push_str(&format!("  <yt:videoId>{}</yt:videoId>\n", escape(video_id)));
            }
            xml.push_str(&format!("  <title>{}</title>\n", escape(&entry.title)));
            xml.push_str(&format!(
                "  <link rel=\"alternate\" href=\"https://www.youtube.com/watch?v={}\"/>\n",
                escape(id)
            ));
            xml.push_str(&format!(
                "  <author>\n   <name>{}</name>\n   <uri>{}</uri>\n  </author>\n",
                escape(&entry.author),
                escape(&entry.author_url)
            ));
            xml.push_str("  <published>2025-01-01T00:00:00+00:00</published>\n");
            xml.push_str("  <updated>2025-01-01T00:00:00+00:00</updated>\n");
            xml.push_str("  <media:group>\n");
            xml.push_str(&format!("   <media:title>{}</media:title>\n", escape(&entry.title)));
            xml.push_str(&format!(
                "   <media:thumbnail url=\"https://i.ytimg.com/vi/{}/hqdefault.jpg\" width=\"480\" height=\"360\"/>\n",
                escape(id)
            ));
            xml.push_str(&format!(
                "   <media:description>{}</media:description>\n",
                escape(&entry.description)
            ));
            xml.push_str("  </media:group>\n");
            xml.push_str(" </entry>\n");
        }

        xml.push_str("</feed>\n");
        xml
    }
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
