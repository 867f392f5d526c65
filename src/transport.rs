use async_trait::async_trait;
use serenity::model::id::GuildId;
use std::time::Duration;

use crate::{
    error::JukeResult,
    events::EventSender,
    model::{ConnectionEpoch, PlayRequest, VoiceTarget},
};

/// What the session needs from a voice library.
///
/// Implementations report asynchronous outcomes through the [`EventSender`] they are given:
/// `TrackEnd` with the request token when a started track ends, and `Disconnected` with the
/// connection epoch when the voice driver drops.
#[async_trait]
pub trait VoiceTransport: Send + Sync + 'static {
    type Player: PlayerHandle;

    /// Joins `target`, replacing any connection observers registered before.
    async fn connect(&self, target: &VoiceTarget, epoch: ConnectionEpoch, events: EventSender) -> JukeResult<()>;

    /// Leaves the voice channel of `guild`.
    async fn disconnect(&self, guild: GuildId) -> JukeResult<()>;

    /// Starts a fresh player on the connection of `guild`.
    async fn play(&self, guild: GuildId, request: PlayRequest, events: EventSender) -> JukeResult<Self::Player>;
}

/// Controller of one started track.
#[async_trait]
pub trait PlayerHandle: Send + Sync + 'static {
    /// Position reached in the track.
    async fn elapsed(&self) -> JukeResult<Duration>;

    fn set_volume(&self, ratio: f32) -> JukeResult<()>;

    fn stop(&self) -> JukeResult<()>;
}
