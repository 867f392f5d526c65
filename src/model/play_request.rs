use std::{path::PathBuf, time::Duration};

use super::{track::Track, voice::PlaybackToken};

/// Everything the voice transport needs to start a track.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayRequest {
    pub path: PathBuf,
    pub start: Duration,
    pub volume: f32,
    pub token: PlaybackToken,
}

impl PlayRequest {
    pub fn new(track: &Track, token: PlaybackToken) -> Self {
        Self {
            path: track.path.clone(),
            start: Duration::ZERO,
            volume: 1.0,
            token,
        }
    }

    /// Sets the time the track will start at.
    pub fn start_time(mut self, start: Duration) -> Self {
        self.start = start;
        self
    }

    /// Sets the gain applied to the track, between 0 and 1.
    pub fn volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }
}
