use std::{mem, sync::Arc, time::Duration};

use tracing::{error, info, warn};

use crate::{
    error::{JukeError, JukeResult},
    events::{EventSender, SessionEvent},
    model::{Connection, ConnectionEpoch, PlayRequest, PlaybackToken, Playlist, Track, VoiceTarget, Volume},
    transport::{PlayerHandle, VoiceTransport},
};

/// Output state of the session.
pub enum Playback<P> {
    Idle,
    Playing { player: P, token: PlaybackToken },
    Stopped,
}

impl<P> Playback<P> {
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing { .. })
    }
}

/// The bot's single playback session: voice connection, player, playlist position and volume.
pub struct Session<T: VoiceTransport> {
    transport: Arc<T>,
    events: EventSender,
    playlist: Playlist,
    connection: Option<Connection>,
    playback: Playback<T::Player>,
    current: usize,
    paused_at: Duration,
    volume: Volume,
    counter: u64,
}

impl<T: VoiceTransport> Session<T> {
    pub fn new(transport: Arc<T>, playlist: Playlist, events: EventSender) -> Self {
        Self {
            transport,
            events,
            playlist,
            connection: None,
            playback: Playback::Idle,
            current: 0,
            paused_at: Duration::ZERO,
            volume: Volume::default(),
            counter: 0,
        }
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn connection(&self) -> Option<&Connection> {
        self.connection.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn paused_position(&self) -> Duration {
        self.paused_at
    }

    pub fn volume(&self) -> Volume {
        self.volume
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.playlist.get(self.current)
    }

    /// Joins `target`, tearing down the previous connection first.
    pub async fn connect(&mut self, target: VoiceTarget) -> JukeResult<()> {
        if let Some(old) = self.connection.take() {
            info!("Leaving {} before joining {}", old.target.name, target.name);

            self.halt();

            if let Err(why) = self.transport.disconnect(old.guild()).await {
                warn!("Error leaving voice channel {}: {}", old.target.name, why);
            }
        }

        let epoch = ConnectionEpoch(self.next_id());

        self.transport.connect(&target, epoch, self.events.clone()).await?;

        info!("Connected to voice channel {} in guild {}", target.name, target.guild);

        self.connection = Some(Connection { target, epoch });

        Ok(())
    }

    /// Plays the current track from the beginning.
    pub async fn play(&mut self) -> JukeResult<Track> {
        self.ensure_ready()?;

        self.start_track(self.current, Duration::ZERO).await
    }

    /// Stops output and remembers where the track was. Returns that position.
    pub async fn stop(&mut self) -> JukeResult<Duration> {
        let player = match mem::replace(&mut self.playback, Playback::Stopped) {
            Playback::Playing { player, .. } => player,
            other => {
                self.playback = other;
                return Err(JukeError::NotPlaying);
            }
        };

        let position = match player.elapsed().await {
            Ok(position) => position,
            Err(why) => {
                warn!("Could not read playback position, keeping {:?}: {}", self.paused_at, why);
                self.paused_at
            }
        };

        if let Err(why) = player.stop() {
            warn!("Error stopping player: {}", why);
        }

        self.paused_at = position;

        info!("Stopped playback at {:?}", position);

        Ok(position)
    }

    /// Plays the current track from the position saved by [`Session::stop`].
    pub async fn resume(&mut self) -> JukeResult<Track> {
        if self.is_playing() {
            return Err(JukeError::AlreadyPlaying);
        }

        self.ensure_ready()?;

        self.start_track(self.current, self.paused_at).await
    }

    pub async fn next(&mut self) -> JukeResult<Track> {
        self.ensure_ready()?;

        let index = self.playlist.next_index(self.current).ok_or(JukeError::NoTracks)?;

        self.skip_to(index).await
    }

    pub async fn previous(&mut self) -> JukeResult<Track> {
        self.ensure_ready()?;

        let index = self.playlist.previous_index(self.current).ok_or(JukeError::NoTracks)?;

        self.skip_to(index).await
    }

    /// Stores the volume and applies it to the running track, if any.
    pub fn set_volume(&mut self, volume: Volume) {
        self.volume = volume;

        if let Playback::Playing { player, .. } = &self.playback {
            if let Err(why) = player.set_volume(volume.ratio()) {
                warn!("Error applying volume to the running track: {}", why);
            }
        }
    }

    /// Leaves the voice channel and rewinds the playlist.
    pub async fn disconnect(&mut self) -> JukeResult<()> {
        let connection = self.connection.take().ok_or(JukeError::NotConnected)?;

        self.halt();
        self.current = 0;
        self.paused_at = Duration::ZERO;

        if let Err(why) = self.transport.disconnect(connection.guild()).await {
            warn!("Error leaving voice channel {}: {}", connection.target.name, why);
        }

        info!("Disconnected from voice channel {}", connection.target.name);

        Ok(())
    }

    pub async fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::TrackEnd(token) => self.on_track_end(token).await,
            SessionEvent::Disconnected(epoch) => self.on_disconnected(epoch),
        }
    }

    async fn on_track_end(&mut self, token: PlaybackToken) {
        match &self.playback {
            Playback::Playing { token: live, .. } if *live == token => {}
            _ => return,
        }

        info!("Playback finished");

        self.playback = Playback::Idle;
        self.paused_at = Duration::ZERO;

        let index = match self.playlist.next_index(self.current) {
            Some(index) => index,
            None => return,
        };

        self.current = index;

        if let Err(why) = self.start_track(index, Duration::ZERO).await {
            error!("Error advancing to track {}: {}", index, why);
        }
    }

    fn on_disconnected(&mut self, epoch: ConnectionEpoch) {
        match &self.connection {
            Some(connection) if connection.epoch == epoch => {}
            _ => return,
        }

        warn!("Voice connection dropped");

        self.halt();
        self.connection = None;
    }

    async fn skip_to(&mut self, index: usize) -> JukeResult<Track> {
        self.current = index;
        self.paused_at = Duration::ZERO;

        self.start_track(index, Duration::ZERO).await
    }

    /// Starts `index` at `start` on the live connection, replacing the previous player.
    async fn start_track(&mut self, index: usize, start: Duration) -> JukeResult<Track> {
        let guild = match &self.connection {
            Some(connection) => connection.guild(),
            None => {
                error!("The bot is not connected to any voice channel");
                return Err(JukeError::NotConnected);
            }
        };

        let track = self.playlist.get(index).cloned().ok_or(JukeError::NoTracks)?;

        self.halt();

        let token = PlaybackToken(self.next_id());
        let request = PlayRequest::new(&track, token)
            .start_time(start)
            .volume(self.volume.ratio());

        match self.transport.play(guild, request, self.events.clone()).await {
            Ok(player) => {
                info!("Playing {} from {:?}", track, start);

                self.playback = Playback::Playing { player, token };

                Ok(track)
            }
            Err(why) => {
                error!("Error playing track {}: {}", track, why);

                Err(why)
            }
        }
    }

    fn ensure_ready(&self) -> JukeResult<()> {
        if self.connection.is_none() {
            return Err(JukeError::NotConnected);
        }

        if self.playlist.is_empty() {
            return Err(JukeError::NoTracks);
        }

        Ok(())
    }

    /// Stops the running player, if any, and forgets its token.
    fn halt(&mut self) {
        if let Playback::Playing { player, .. } = mem::replace(&mut self.playback, Playback::Idle) {
            if let Err(why) = player.stop() {
                warn!("Error stopping previous player: {}", why);
            }
        }
    }

    fn next_id(&mut self) -> u64 {
        self.counter += 1;
        self.counter
    }
}
