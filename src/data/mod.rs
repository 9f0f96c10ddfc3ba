//! Persisted state store.
//!
//! The bot keeps its durable state (the YouTube monitor's destination and last-seen
//! marker, and the ticket counter) behind two small traits so the medium can be chosen
//! per deployment without the callers noticing:
//!
//! - `file` - flat files in a local data directory, written with atomic rename
//! - `gist` - one JSON document inside a GitHub Gist, fetched and patched over HTTPS
//!
//! # Contract
//!
//! `load` never fails: an unreachable or corrupt store degrades to the default record
//! and a logged warning. `save` merges a partial update into the currently stored
//! record and reports whether the write succeeded.
//!
//! # Concurrency
//!
//! Each backend serialises its own read-modify-write cycles behind an async mutex, so
//! the scheduler and the admin command cannot interleave merges inside one process.
//! Two processes sharing the same Gist are still last-writer-wins; the bot is expected
//! to run as a single instance.

pub mod file;
pub mod gist;

use serenity::async_trait;

use crate::model::monitor::{MonitorConfig, MonitorConfigPatch};

pub use file::FileStateStore;
pub use gist::GistStateStore;

/// Load/merge access to the YouTube monitor's durable record.
#[async_trait]
pub trait MonitorStateStore: Send + Sync {
    /// Returns the stored record, or the default record if it cannot be read.
    async fn load(&self) -> MonitorConfig;

    /// Merges `patch` into the stored record.
    ///
    /// # Returns
    /// - `true` - The merged record was written
    /// - `false` - The write failed; the failure has been logged
    async fn save(&self, patch: MonitorConfigPatch) -> bool;
}

/// Monotonic counter used to number support tickets.
#[async_trait]
pub trait TicketCounterStore: Send + Sync {
    /// Increments the stored counter and returns the new value.
    ///
    /// An unreadable counter restarts from zero; a failed write is logged and the
    /// incremented value is still returned so ticket creation can proceed.
    async fn next_ticket_number(&self) -> u32;
}

#[cfg(test)]
mod test;
