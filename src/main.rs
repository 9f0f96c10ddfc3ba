mod bot;
mod config;
mod data;
mod error;
mod model;
mod scheduler;
mod service;
mod startup;
mod state;
mod util;

use std::{sync::Arc, time::Duration};

use crate::{
    config::Config,
    error::AppError,
    scheduler::MonitorScheduler,
    service::youtube::{feed::YoutubeFeedClient, notifier::DiscordNotifier, YoutubeMonitorService},
    state::{BotState, MonitorContainer, MonitorHandle},
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;
    let http_client = startup::setup_reqwest_client(&config)?;
    let (monitor_store, ticket_store) = startup::setup_state_store(&config, http_client.clone());

    let feed = Arc::new(YoutubeFeedClient::new(
        http_client,
        config.feed_url.clone(),
        config.feed_timeout,
    ));
    let poll_interval = config.poll_interval;
    let max_runtime = config.max_runtime;

    tracing::info!("Monitoring YouTube channel {}", config.youtube_channel_id);

    let mut client = bot::start::init_bot(BotState::new(config, ticket_store)).await?;

    // The notifier posts through the bot's own HTTP client and cache.
    let notifier = Arc::new(DiscordNotifier::new(
        client.http.clone(),
        client.cache.clone(),
    ));
    let monitor = Arc::new(YoutubeMonitorService::new(monitor_store, feed, notifier));
    let scheduler = Arc::new(MonitorScheduler::new(monitor.clone(), poll_interval).await?);

    client.data.write().await.insert::<MonitorContainer>(MonitorHandle {
        monitor,
        scheduler: scheduler.clone(),
    });

    scheduler.start().await?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        wait_for_shutdown(max_runtime).await;
        shard_manager.shutdown_all().await;
    });

    let result = bot::start::start_bot(&mut client).await;

    if let Err(e) = scheduler.shutdown().await {
        tracing::error!("Failed to stop YouTube monitor scheduler: {}", e);
    }

    tracing::info!("Shut down");

    result
}

/// Resolves on Ctrl-C or once `max_runtime` has elapsed, whichever comes first.
async fn wait_for_shutdown(max_runtime: Option<Duration>) {
    let runtime_limit = async {
        match max_runtime {
            Some(limit) => tokio::time::sleep(limit).await,
            None => std::future::pending().await,
        }
    };

    tokio::select! {
        result = tokio::signal::ctrl_c() => match result {
            Ok(()) => tracing::info!("Received Ctrl-C, shutting down"),
            Err(e) => tracing::error!("Failed to listen for Ctrl-C, shutting down: {}", e),
        },
        _ = runtime_limit => tracing::info!("Maximum runtime reached, shutting down"),
    }
}
