use serenity::model::id::{ChannelId, GuildId};

/// Identifies one started track so events from replaced players can be ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaybackToken(pub u64);

/// Identifies one voice connection so events from torn down connections can be ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionEpoch(pub u64);

/// A voice channel the bot can be asked to join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceTarget {
    pub guild: GuildId,
    pub channel: ChannelId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub target: VoiceTarget,
    pub epoch: ConnectionEpoch,
}

impl Connection {
    pub fn guild(&self) -> GuildId {
        self.target.guild
    }
}
