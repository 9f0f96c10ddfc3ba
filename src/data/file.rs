//! File-backed state store.
//!
//! Layout inside the data directory:
//!
//! - `config.json` - `{channel_id, role_id, last_updated}`
//! - `last_video_id.txt` - the bare last-seen video id
//! - `ticket_state.json` - `{ticket_count}`
//!
//! Every write goes to a sibling `.tmp` file first and is then renamed over the target,
//! so a crash mid-write never leaves a truncated record behind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serenity::all::{ChannelId, RoleId};
use serenity::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::{
    data::{MonitorStateStore, TicketCounterStore},
    error::AppError,
    model::monitor::{MonitorConfig, MonitorConfigPatch},
};

const CONFIG_FILE: &str = "config.json";
const LAST_VIDEO_FILE: &str = "last_video_id.txt";
const TICKET_FILE: &str = "ticket_state.json";

/// Contents of `config.json`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct DestinationRecord {
    #[serde(default, with = "crate::util::snowflake::optional")]
    channel_id: Option<ChannelId>,
    #[serde(default, with = "crate::util::snowflake::optional")]
    role_id: Option<RoleId>,
    #[serde(default)]
    last_updated: Option<DateTime<Utc>>,
}

/// Contents of `ticket_state.json`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct TicketRecord {
    #[serde(default)]
    ticket_count: u32,
}

/// State store keeping its records as flat files in a local directory.
pub struct FileStateStore {
    data_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStateStore {
    /// Creates a store rooted at `data_dir`.
    ///
    /// The directory is created lazily on the first write.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }

    /// Reads both monitor files into one record.
    ///
    /// Missing files read as defaults.
    ///
    /// # Returns
    /// - `Ok(MonitorConfig)` - Record assembled from the files present
    /// - `Err(AppError::IoErr)` - A file exists but could not be read
    /// - `Err(AppError::JsonErr)` - `config.json` is not valid JSON
    pub async fn read_config(&self) -> Result<MonitorConfig, AppError> {
        let destination = self.read_destination().await?;
        let last_video_id = read_optional(&self.path(LAST_VIDEO_FILE))
            .await?
            .map(|contents| contents.trim().to_string())
            .unwrap_or_default();

        Ok(MonitorConfig {
            channel_id: destination.channel_id,
            role_id: destination.role_id,
            last_video_id,
            last_updated: destination.last_updated,
        })
    }

    async fn read_destination(&self) -> Result<DestinationRecord, AppError> {
        match read_optional(&self.path(CONFIG_FILE)).await? {
            Some(contents) if !contents.trim().is_empty() => Ok(serde_json::from_str(&contents)?),
            _ => Ok(DestinationRecord::default()),
        }
    }

    /// Merges `patch` into the stored files.
    ///
    /// The marker file is only rewritten when the patch carries a new marker;
    /// `config.json` is always rewritten to refresh `last_updated`.
    ///
    /// # Returns
    /// - `Ok(())` - All affected files were written
    /// - `Err(AppError)` - A write failed; the marker file is untouched unless it was the
    ///   failing write itself
    pub async fn write_patch(&self, patch: &MonitorConfigPatch) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;

        let mut config = match self.read_config().await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Overwriting unreadable monitor state: {}", e);
                MonitorConfig::default()
            }
        };
        patch.apply_to(&mut config, Utc::now());

        let destination = DestinationRecord {
            channel_id: config.channel_id,
            role_id: config.role_id,
            last_updated: config.last_updated,
        };
        let contents = serde_json::to_vec_pretty(&destination)?;
        write_atomic(&self.path(CONFIG_FILE), &contents).await?;

        // Marker last: a failed save must leave the previous marker in place.
        if let Some(last_video_id) = &patch.last_video_id {
            write_atomic(&self.path(LAST_VIDEO_FILE), last_video_id.as_bytes()).await?;
        }

        Ok(())
    }

    async fn increment_ticket_count(&self) -> (u32, Result<(), AppError>) {
        let _guard = self.write_lock.lock().await;
        let path = self.path(TICKET_FILE);

        let current = match read_optional(&path).await {
            Ok(Some(contents)) => serde_json::from_str::<TicketRecord>(&contents)
                .map(|record| record.ticket_count)
                .unwrap_or_else(|e| {
                    tracing::warn!("Ticket counter file is corrupt, restarting at 0: {}", e);
                    0
                }),
            Ok(None) => 0,
            Err(e) => {
                tracing::warn!("Failed to read ticket counter, restarting at 0: {}", e);
                0
            }
        };

        let next = current.saturating_add(1);
        let result = match serde_json::to_vec_pretty(&TicketRecord { ticket_count: next }) {
            Ok(contents) => write_atomic(&path, &contents).await,
            Err(e) => Err(e.into()),
        };

        (next, result)
    }
}

#[async_trait]
impl MonitorStateStore for FileStateStore {
    async fn load(&self) -> MonitorConfig {
        match self.read_config().await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    "Failed to load monitor state from {}, using defaults: {}",
                    self.data_dir.display(),
                    e
                );
                MonitorConfig::default()
            }
        }
    }

    async fn save(&self, patch: MonitorConfigPatch) -> bool {
        match self.write_patch(&patch).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(
                    "Failed to save monitor state to {}: {}",
                    self.data_dir.display(),
                    e
                );
                false
            }
        }
    }
}

#[async_trait]
impl TicketCounterStore for FileStateStore {
    async fn next_ticket_number(&self) -> u32 {
        let (next, result) = self.increment_ticket_count().await;
        if let Err(e) = result {
            tracing::error!("Failed to persist ticket counter {}: {}", next, e);
        }
        next
    }
}

/// Reads a file, mapping "not found" to `None`.
async fn read_optional(path: &Path) -> Result<Option<String>, AppError> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Writes `contents` to `path` through a temporary sibling file and a rename.
async fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    tokio::fs::write(&tmp, contents).await?;
    tokio::fs::rename(&tmp, path).await?;

    Ok(())
}
