/// Newest upload extracted from the YouTube feed.
///
/// Produced fresh on every poll and validated at the poller boundary: an entry without
/// a video id never becomes a `FeedItem`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    /// YouTube video id, compared against the stored last-seen marker.
    pub id: String,
    pub title: String,
    pub author: String,
    pub author_url: Option<String>,
    pub link: String,
    /// Plain-text description, already stripped of markup but not truncated.
    pub summary: String,
    pub thumbnail_url: Option<String>,
}
