use std::{sync::Arc, time::Duration};
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};
use uuid::Uuid;

use crate::{error::AppError, service::youtube::YoutubeMonitorService};

/// Lifecycle of the polling job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Created but not started.
    Idle,
    /// Polling every interval through the job `job_id`.
    Running { job_id: Uuid },
    /// Shut down; cannot be started again.
    Stopped,
}

/// Drives `YoutubeMonitorService::poll` on a fixed interval.
///
/// Each tick re-arms regardless of the previous outcome. Overlapping ticks are
/// prevented by the service's own poll guard.
pub struct MonitorScheduler {
    scheduler: JobScheduler,
    monitor: Arc<YoutubeMonitorService>,
    interval: Duration,
    state: Mutex<SchedulerState>,
}

impl MonitorScheduler {
    pub async fn new(
        monitor: Arc<YoutubeMonitorService>,
        interval: Duration,
    ) -> Result<Self, AppError> {
        Ok(Self {
            scheduler: JobScheduler::new().await?,
            monitor,
            interval,
            state: Mutex::new(SchedulerState::Idle),
        })
    }

    /// Starts polling: one poll right away, then one per interval.
    ///
    /// # Returns
    /// - `Ok(())` - Running (also when it already was)
    /// - `Err(AppError::BadRequest)` - The scheduler was shut down
    /// - `Err(AppError::SchedulerErr)` - The job could not be registered
    pub async fn start(&self) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        match *state {
            SchedulerState::Running { .. } => return Ok(()),
            SchedulerState::Stopped => {
                return Err(AppError::BadRequest(
                    "Monitor scheduler has been shut down".to_string(),
                ))
            }
            SchedulerState::Idle => {}
        }

        let job_id = self.add_poll_job().await?;
        self.scheduler.start().await?;
        *state = SchedulerState::Running { job_id };

        self.spawn_poll();

        tracing::info!(
            "YouTube monitor scheduler started, polling every {}s",
            self.interval.as_secs()
        );

        Ok(())
    }

    /// Polls immediately and restarts the interval from now.
    ///
    /// Does nothing unless running.
    pub async fn restart(&self) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        let SchedulerState::Running { job_id } = *state else {
            return Ok(());
        };

        self.scheduler.remove(&job_id).await?;
        let job_id = self.add_poll_job().await?;
        *state = SchedulerState::Running { job_id };

        self.spawn_poll();

        tracing::info!("YouTube monitor interval restarted");

        Ok(())
    }

    /// Cancels the pending timer. An in-flight poll is left to finish on its own.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        if *state == SchedulerState::Stopped {
            return Ok(());
        }

        if let SchedulerState::Running { job_id } = *state {
            self.scheduler.remove(&job_id).await?;
            self.scheduler.clone().shutdown().await?;
        }
        *state = SchedulerState::Stopped;

        tracing::info!("YouTube monitor scheduler stopped");

        Ok(())
    }

    pub async fn state(&self) -> SchedulerState {
        *self.state.lock().await
    }

    async fn add_poll_job(&self) -> Result<Uuid, AppError> {
        let monitor = self.monitor.clone();

        let job = Job::new_repeated_async(self.interval, move |_uuid, _lock| {
            let monitor = monitor.clone();

            Box::pin(async move {
                monitor.poll().await;
            })
        })?;

        Ok(self.scheduler.add(job).await?)
    }

    fn spawn_poll(&self) {
        let monitor = self.monitor.clone();
        tokio::spawn(async move {
            monitor.poll().await;
        });
    }
}
