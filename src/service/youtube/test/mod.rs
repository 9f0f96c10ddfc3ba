use serenity::{
    all::{ChannelId, RoleId},
    async_trait,
};
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, Mutex,
};

use crate::{
    data::MonitorStateStore,
    error::AppError,
    model::{
        feed::FeedItem,
        monitor::{MonitorConfig, MonitorConfigPatch, TickOutcome},
        notification::UploadNotification,
    },
    service::youtube::{feed::FeedSource, notifier::UploadNotifier, YoutubeMonitorService},
};

mod builder;
mod feed;
mod poll;

/// In-memory store counting writes.
#[derive(Default)]
struct MemoryStore {
    config: Mutex<MonitorConfig>,
    saves: AtomicUsize,
    fail_saves: AtomicBool,
}

impl MemoryStore {
    fn with(config: MonitorConfig) -> Arc<Self> {
        Arc::new(Self {
            config: Mutex::new(config),
            ..Self::default()
        })
    }

    fn snapshot(&self) -> MonitorConfig {
        self.config.lock().unwrap().clone()
    }

    fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MonitorStateStore for MemoryStore {
    async fn load(&self) -> MonitorConfig {
        self.snapshot()
    }

    async fn save(&self, patch: MonitorConfigPatch) -> bool {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves.load(Ordering::SeqCst) {
            return false;
        }
        patch.apply_to(&mut self.config.lock().unwrap(), chrono::Utc::now());
        true
    }
}

/// Feed returning whatever item the test sets.
#[derive(Default)]
struct StaticFeed {
    item: Mutex<Option<FeedItem>>,
    fetches: AtomicUsize,
}

impl StaticFeed {
    fn with(item: Option<FeedItem>) -> Arc<Self> {
        Arc::new(Self {
            item: Mutex::new(item),
            ..Self::default()
        })
    }

    fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedSource for StaticFeed {
    async fn fetch_latest(&self) -> Option<FeedItem> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.item.lock().unwrap().clone()
    }
}

/// Notifier recording every dispatched notification.
#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<(ChannelId, UploadNotification)>>,
    fail_send: AtomicBool,
    unresolvable: AtomicBool,
}

impl RecordingNotifier {
    fn sent(&self) -> Vec<(ChannelId, UploadNotification)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl UploadNotifier for RecordingNotifier {
    async fn resolve_channel(&self, channel_id: ChannelId) -> Result<(), AppError> {
        if self.unresolvable.load(Ordering::SeqCst) {
            return Err(AppError::NotFound(format!("channel {} missing", channel_id)));
        }
        Ok(())
    }

    async fn send(
        &self,
        channel_id: ChannelId,
        notification: &UploadNotification,
    ) -> Result<(), AppError> {
        if self.fail_send.load(Ordering::SeqCst) {
            return Err(AppError::BadRequest("dispatch rejected".to_string()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((channel_id, notification.clone()));
        Ok(())
    }
}

fn item(id: &str) -> FeedItem {
    FeedItem {
        id: id.to_string(),
        title: format!("Video {}", id),
        author: "Test Channel".to_string(),
        author_url: Some("https://www.youtube.com/channel/UCtest".to_string()),
        link: format!("https://www.youtube.com/watch?v={}", id),
        summary: "A short description".to_string(),
        thumbnail_url: Some(format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", id)),
    }
}

fn configured(last_video_id: &str) -> MonitorConfig {
    MonitorConfig {
        channel_id: Some(ChannelId::new(1)),
        role_id: Some(RoleId::new(42)),
        last_video_id: last_video_id.to_string(),
        last_updated: None,
    }
}

struct Setup {
    store: Arc<MemoryStore>,
    feed: Arc<StaticFeed>,
    notifier: Arc<RecordingNotifier>,
    service: YoutubeMonitorService,
}

fn setup(config: MonitorConfig, latest: Option<FeedItem>) -> Setup {
    let store = MemoryStore::with(config);
    let feed = StaticFeed::with(latest);
    let notifier = Arc::new(RecordingNotifier::default());
    let service = YoutubeMonitorService::new(store.clone(), feed.clone(), notifier.clone());

    Setup {
        store,
        feed,
        notifier,
        service,
    }
}
