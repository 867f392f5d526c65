#![allow(dead_code)]

use std::{collections::HashSet, sync::Arc, time::Duration};

use async_trait::async_trait;
use parking_lot::Mutex;
use serenity::model::id::{ChannelId, GuildId, UserId};

use jukelink::{
    error::{JukeError, JukeResult},
    events::{self, EventReceiver, EventSender, SessionEvent},
    model::{ConnectionEpoch, PlayRequest, Playlist, Track, VoiceTarget},
    router::CommandRouter,
    session::Session,
    transport::{PlayerHandle, VoiceTransport},
};

pub const OWNER: u64 = 1219384660304592962;
pub const STRANGER: u64 = 555;

// ---------- Mock Player ----------
#[derive(Debug, Default)]
pub struct PlayerState {
    pub elapsed: Duration,
    pub volume: Option<f32>,
    pub stopped: bool,
}

#[derive(Clone, Default)]
pub struct MockPlayer {
    pub state: Arc<Mutex<PlayerState>>,
}

impl MockPlayer {
    pub fn set_elapsed(&self, elapsed: Duration) {
        self.state.lock().elapsed = elapsed;
    }

    pub fn is_stopped(&self) -> bool {
        self.state.lock().stopped
    }

    pub fn live_volume(&self) -> Option<f32> {
        self.state.lock().volume
    }
}

#[async_trait]
impl PlayerHandle for MockPlayer {
    async fn elapsed(&self) -> JukeResult<Duration> {
        Ok(self.state.lock().elapsed)
    }

    fn set_volume(&self, ratio: f32) -> JukeResult<()> {
        self.state.lock().volume = Some(ratio);
        Ok(())
    }

    fn stop(&self) -> JukeResult<()> {
        self.state.lock().stopped = true;
        Ok(())
    }
}

// ---------- Mock Transport ----------
#[derive(Default)]
pub struct MockTransport {
    pub connects: Mutex<Vec<(VoiceTarget, ConnectionEpoch)>>,
    pub disconnects: Mutex<Vec<GuildId>>,
    pub plays: Mutex<Vec<PlayRequest>>,
    pub players: Mutex<Vec<MockPlayer>>,
    pub fail_play: Mutex<bool>,
    pub fail_seek: Mutex<bool>,
    pub events: Mutex<Option<EventSender>>,
}

impl MockTransport {
    pub fn play_count(&self) -> usize {
        self.plays.lock().len()
    }

    pub fn last_play(&self) -> PlayRequest {
        self.plays.lock().last().cloned().expect("nothing was played")
    }

    pub fn last_player(&self) -> MockPlayer {
        self.players.lock().last().cloned().expect("no player was created")
    }

    pub fn last_epoch(&self) -> ConnectionEpoch {
        self.connects.lock().last().map(|(_, epoch)| *epoch).expect("never connected")
    }

    /// Reports the most recent track as finished, the way the voice driver would.
    pub fn finish_last(&self) {
        let token = self.last_play().token;
        let sender = self.events.lock().clone().expect("no event sender");

        sender.send(SessionEvent::TrackEnd(token)).unwrap();
    }
}

#[async_trait]
impl VoiceTransport for MockTransport {
    type Player = MockPlayer;

    async fn connect(&self, target: &VoiceTarget, epoch: ConnectionEpoch, events: EventSender) -> JukeResult<()> {
        self.connects.lock().push((target.clone(), epoch));
        *self.events.lock() = Some(events);
        Ok(())
    }

    async fn disconnect(&self, guild: GuildId) -> JukeResult<()> {
        self.disconnects.lock().push(guild);
        Ok(())
    }

    async fn play(&self, _guild: GuildId, request: PlayRequest, events: EventSender) -> JukeResult<MockPlayer> {
        if *self.fail_play.lock() {
            return Err(JukeError::Transport("decoder exploded".to_string()));
        }

        *self.events.lock() = Some(events);

        let player = MockPlayer::default();
        self.players.lock().push(player.clone());

        // The track is already in the mixer when the seek fails, so it is stopped before reporting.
        if *self.fail_seek.lock() && !request.start.is_zero() {
            player.stop()?;
            return Err(JukeError::Transport(format!("seek to {:?} failed", request.start)));
        }

        self.plays.lock().push(request);

        Ok(player)
    }
}

// ---------- Helpers ----------
pub fn target(channel: u64) -> VoiceTarget {
    VoiceTarget {
        guild: GuildId::new(1),
        channel: ChannelId::new(channel),
        name: format!("Voice {}", channel),
    }
}

pub fn playlist(len: usize) -> Playlist {
    Playlist::new((0..len).map(|i| Track::new(format!("music/track{}.mp3", i))).collect())
}

pub fn session(len: usize) -> (Session<MockTransport>, Arc<MockTransport>, EventReceiver) {
    let transport = Arc::new(MockTransport::default());
    let (sender, receiver) = events::channel();

    (Session::new(Arc::clone(&transport), playlist(len), sender), transport, receiver)
}

pub async fn connected_session(len: usize) -> (Session<MockTransport>, Arc<MockTransport>, EventReceiver) {
    let (mut session, transport, receiver) = session(len);

    session.connect(target(10)).await.unwrap();

    (session, transport, receiver)
}

pub fn router() -> CommandRouter {
    CommandRouter::new("*", HashSet::from([UserId::new(OWNER)]))
}
