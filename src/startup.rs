use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::{
    config::{Config, StorageConfig},
    data::{FileStateStore, GistStateStore, MonitorStateStore, TicketCounterStore},
    error::AppError,
};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Installs the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Builds the HTTP client shared by the feed poller and the Gist backend.
///
/// The GitHub API rejects requests without a user agent. Individual requests may set a
/// shorter timeout than the client-wide one.
pub fn setup_reqwest_client(config: &Config) -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(config.feed_timeout)
        .build()?;

    Ok(client)
}

/// Opens the configured state backend.
///
/// One backend instance serves both the monitor record and the ticket counter, so
/// their writes share its lock.
pub fn setup_state_store(
    config: &Config,
    http: reqwest::Client,
) -> (Arc<dyn MonitorStateStore>, Arc<dyn TicketCounterStore>) {
    match &config.storage {
        StorageConfig::File { data_dir } => {
            tracing::info!("Using file state store in {}", data_dir.display());
            let store = Arc::new(FileStateStore::new(data_dir.clone()));
            (store.clone(), store)
        }
        StorageConfig::Gist {
            gist_id,
            token,
            filename,
        } => {
            tracing::info!("Using Gist state store {} ({})", gist_id, filename);
            let store = Arc::new(GistStateStore::new(
                http,
                gist_id,
                token.clone(),
                filename.clone(),
            ));
            (store.clone(), store)
        }
    }
}
