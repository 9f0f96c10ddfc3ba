//! State shared by all event and interaction handlers.
//!
//! `BotState` is built in `main` before the Discord client and moved into the event
//! handler. The monitor and the shard manager only exist once the client has been
//! built, so they are published afterwards through the client's `TypeMap` under the
//! keys defined here.

use serenity::{gateway::ShardManager, prelude::TypeMapKey};
use std::sync::Arc;

use crate::{
    config::Config, data::TicketCounterStore, scheduler::MonitorScheduler,
    service::{invite::InviteTracker, youtube::YoutubeMonitorService},
};

/// Resources available to every handler.
///
/// Cheap to clone; every field is reference counted.
#[derive(Clone)]
pub struct BotState {
    pub config: Arc<Config>,
    /// Invite use counts for the join tracker.
    pub invites: Arc<InviteTracker>,
    /// Counter numbering support tickets.
    pub tickets: Arc<dyn TicketCounterStore>,
}

impl BotState {
    pub fn new(config: Config, tickets: Arc<dyn TicketCounterStore>) -> Self {
        Self {
            config: Arc::new(config),
            invites: Arc::new(InviteTracker::new()),
            tickets,
        }
    }
}

/// Upload monitor and its scheduler, as seen by the setup command.
#[derive(Clone)]
pub struct MonitorHandle {
    pub monitor: Arc<YoutubeMonitorService>,
    pub scheduler: Arc<MonitorScheduler>,
}

pub struct MonitorContainer;

impl TypeMapKey for MonitorContainer {
    type Value = MonitorHandle;
}

/// Gives `/ping` access to shard heartbeat latencies.
pub struct ShardManagerContainer;

impl TypeMapKey for ShardManagerContainer {
    type Value = Arc<ShardManager>;
}
