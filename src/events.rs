use std::sync::Arc;

use tokio::{
    sync::{mpsc, Mutex},
    task::JoinHandle,
};
use tracing::debug;

use crate::{
    model::{ConnectionEpoch, PlaybackToken},
    session::Session,
    transport::VoiceTransport,
};

pub type EventSender = mpsc::UnboundedSender<SessionEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<SessionEvent>;

/// Notifications coming back from the voice transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The track started with this token finished or failed.
    TrackEnd(PlaybackToken),
    /// The voice driver of this connection disconnected.
    Disconnected(ConnectionEpoch),
}

pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Applies transport events to the session, one at a time, until every sender is dropped.
pub fn listen<T: VoiceTransport>(session: Arc<Mutex<Session<T>>>, mut events: EventReceiver) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            debug!("Processing session event {:?}", event);

            session.lock().await.handle_event(event).await;
        }

        debug!("Session event channel closed");
    })
}
