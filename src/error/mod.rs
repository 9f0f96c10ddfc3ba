//! Error types for the bot.
//!
//! This module provides the application's error hierarchy. The `AppError` enum serves
//! as the top-level error type that wraps domain-specific errors. Errors raised inside
//! the polling cycle are logged at the tick boundary and never escape to the process;
//! errors raised by interaction handlers are reported to the invoking user.

pub mod config;
pub mod internal;
pub mod storage;

use thiserror::Error;

use crate::error::{config::ConfigError, internal::InternalError, storage::StorageError};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the bot. Most variants use
/// `#[from]` for automatic error conversion so fallible code can propagate with `?`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    ///
    /// Always fatal as the bot cannot operate without valid configuration.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Failure reading or writing the persisted state.
    #[error(transparent)]
    StorageErr(#[from] StorageError),

    /// Unexpected internal failure such as an unparsable stored id.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Local filesystem error from the file-backed store.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// JSON (de)serialization error for persisted documents.
    #[error(transparent)]
    JsonErr(#[from] serde_json::Error),

    /// HTTP client request error from reqwest.
    ///
    /// Raised by feed fetches and remote document calls, including timeouts.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Malformed Atom document returned by the upstream feed.
    #[error(transparent)]
    FeedErr(#[from] atom_syndication::Error),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Scheduler error.
    ///
    /// Raised when adding, removing or shutting down the polling job fails.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Resource not found error.
    ///
    /// # Fields
    /// - Message describing what resource was not found
    #[error("{0}")]
    NotFound(String),

    /// Invalid request error, typically an invalid command argument.
    ///
    /// # Fields
    /// - Message describing what was invalid about the request
    #[error("{0}")]
    BadRequest(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
