use songbird::error::{ControlError, JoinError};

pub type JukeResult<T> = ::std::result::Result<T, JukeError>;

#[derive(Debug, thiserror::Error)]
pub enum JukeError {
    #[error("The message author is not in a voice channel.")]
    NotInVoiceChannel,
    #[error("There is no active voice connection.")]
    NotConnected,
    #[error("The playlist is empty.")]
    NoTracks,
    #[error("Nothing is playing.")]
    NotPlaying,
    #[error("Playback is already running.")]
    AlreadyPlaying,
    #[error("Volume must be an integer between {min} and {max}.")]
    InvalidVolume { min: u8, max: u8 },
    #[error("Failed to join voice channel: {0}")]
    Join(#[from] JoinError),
    #[error("Track control failed: {0}")]
    Control(#[from] ControlError),
    #[error("Voice transport error: {0}")]
    Transport(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl JukeError {
    /// Whether the error is a user-facing precondition rather than a transport or setup failure.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::NotInVoiceChannel
                | Self::NotConnected
                | Self::NoTracks
                | Self::NotPlaying
                | Self::AlreadyPlaying
                | Self::InvalidVolume { .. }
        )
    }
}
