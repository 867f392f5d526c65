use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use serenity::model::id::GuildId;
use songbird::{
    input::{File as FileInput, Input},
    tracks::{Track as SongbirdTrack, TrackHandle},
    CoreEvent, Event, EventContext, EventHandler as VoiceEventHandler, Songbird, TrackEvent,
};
use tracing::{debug, warn};

use crate::{
    error::{JukeError, JukeResult},
    events::{EventSender, SessionEvent},
    model::{ConnectionEpoch, PlayRequest, PlaybackToken, VoiceTarget},
    transport::{PlayerHandle, VoiceTransport},
};

/// [`VoiceTransport`] backed by a songbird manager registered on the serenity client.
#[derive(Clone)]
pub struct SongbirdTransport {
    manager: Arc<Songbird>,
}

impl SongbirdTransport {
    pub fn new(manager: Arc<Songbird>) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl VoiceTransport for SongbirdTransport {
    type Player = SongbirdPlayer;

    async fn connect(&self, target: &VoiceTarget, epoch: ConnectionEpoch, events: EventSender) -> JukeResult<()> {
        let call = self.manager.join(target.guild, target.channel).await?;

        let mut call = call.lock().await;

        call.remove_all_global_events();
        call.add_global_event(
            Event::Core(CoreEvent::DriverDisconnect),
            DisconnectNotifier { epoch, events },
        );

        Ok(())
    }

    async fn disconnect(&self, guild: GuildId) -> JukeResult<()> {
        if self.manager.get(guild).is_none() {
            return Ok(());
        }

        self.manager.remove(guild).await?;

        Ok(())
    }

    async fn play(&self, guild: GuildId, request: PlayRequest, events: EventSender) -> JukeResult<SongbirdPlayer> {
        let call = self.manager.get(guild).ok_or(JukeError::NotConnected)?;

        if !request.path.is_file() {
            return Err(JukeError::Transport(format!("{} is not a readable file", request.path.display())));
        }

        let input: Input = FileInput::new(request.path.clone()).into();
        let track = SongbirdTrack::new(input).volume(request.volume).pause();

        let handle = {
            let mut call = call.lock().await;

            call.play(track)
        };

        if let Err(why) = arm(&handle, &request, events).await {
            if let Err(stop) = handle.stop() {
                warn!("Error stopping abandoned track {}: {}", request.path.display(), stop);
            }

            return Err(why);
        }

        Ok(SongbirdPlayer { handle })
    }
}

/// Registers the end observers on a paused track, moves it to its start offset and lets it play.
async fn arm(handle: &TrackHandle, request: &PlayRequest, events: EventSender) -> JukeResult<()> {
    let notifier = TrackEndNotifier { token: request.token, events };

    handle.add_event(Event::Track(TrackEvent::End), notifier.clone())?;
    handle.add_event(Event::Track(TrackEvent::Error), notifier)?;

    if !request.start.is_zero() {
        handle
            .seek(request.start)
            .result_async()
            .await
            .map_err(|why| JukeError::Transport(format!("seek to {:?} failed: {}", request.start, why)))?;
    }

    handle.play()?;

    Ok(())
}

pub struct SongbirdPlayer {
    handle: TrackHandle,
}

#[async_trait]
impl PlayerHandle for SongbirdPlayer {
    async fn elapsed(&self) -> JukeResult<Duration> {
        let state = self.handle.get_info().await?;

        Ok(state.position)
    }

    fn set_volume(&self, ratio: f32) -> JukeResult<()> {
        self.handle.set_volume(ratio)?;

        Ok(())
    }

    fn stop(&self) -> JukeResult<()> {
        self.handle.stop()?;

        Ok(())
    }
}

#[derive(Clone)]
struct TrackEndNotifier {
    token: PlaybackToken,
    events: EventSender,
}

#[async_trait]
impl VoiceEventHandler for TrackEndNotifier {
    async fn act(&self, _ctx: &EventContext<'_>) -> Option<Event> {
        debug!("Track {:?} ended", self.token);

        if self.events.send(SessionEvent::TrackEnd(self.token)).is_err() {
            warn!("Session event channel is closed, dropping track end");
        }

        None
    }
}

struct DisconnectNotifier {
    epoch: ConnectionEpoch,
    events: EventSender,
}

#[async_trait]
impl VoiceEventHandler for DisconnectNotifier {
    async fn act(&self, _ctx: &EventContext<'_>) -> Option<Event> {
        debug!("Voice driver of connection {:?} disconnected", self.epoch);

        if self.events.send(SessionEvent::Disconnected(self.epoch)).is_err() {
            warn!("Session event channel is closed, dropping disconnect");
        }

        None
    }
}
