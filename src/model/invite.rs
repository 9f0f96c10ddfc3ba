use serenity::all::{ChannelId, InviteCreateEvent, RichInvite, UserId};

/// Cached state of one guild invite, used to detect which invite a new member used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteSnapshot {
    pub code: String,
    pub uses: u64,
    pub inviter_id: Option<UserId>,
    pub channel_id: ChannelId,
}

impl From<&RichInvite> for InviteSnapshot {
    fn from(invite: &RichInvite) -> Self {
        Self {
            code: invite.code.clone(),
            uses: invite.uses,
            inviter_id: invite.inviter.as_ref().map(|u| u.id),
            channel_id: invite.channel.id,
        }
    }
}

impl From<&InviteCreateEvent> for InviteSnapshot {
    fn from(event: &InviteCreateEvent) -> Self {
        Self {
            code: event.code.clone(),
            uses: event.uses,
            inviter_id: event.inviter.as_ref().map(|u| u.id),
            channel_id: event.channel_id,
        }
    }
}
