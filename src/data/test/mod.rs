use serenity::all::{ChannelId, RoleId};
use test_utils::context::TestContext;

use crate::{
    data::{FileStateStore, MonitorStateStore, TicketCounterStore},
    model::monitor::MonitorConfigPatch,
};

mod file;
mod gist;
