pub mod track;
pub mod playlist;
pub mod volume;
pub mod play_request;
pub mod voice;
pub mod reply;

pub use play_request::PlayRequest;
pub use playlist::Playlist;
pub use reply::{HelpCard, Reply};
pub use track::Track;
pub use voice::{Connection, ConnectionEpoch, PlaybackToken, VoiceTarget};
pub use volume::Volume;
