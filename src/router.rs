use std::collections::HashSet;

use serenity::model::id::UserId;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    error::JukeError,
    model::{HelpCard, Reply, Track, VoiceTarget, Volume},
    session::Session,
    transport::VoiceTransport,
};

pub const PERMISSION_DENIED: &str = "You do not have permission to use this bot.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Connect,
    Play,
    Stop,
    Resume,
    Next,
    Previous,
    Volume(Option<String>),
    Help,
    Disconnect,
}

impl Command {
    /// Resolves a lower-cased keyword. Unknown keywords yield `None`.
    pub fn parse(keyword: &str, args: &[&str]) -> Option<Self> {
        let command = match keyword {
            "connect" | "c" => Self::Connect,
            "play" | "p" => Self::Play,
            "stop" | "s" => Self::Stop,
            "resume" | "rm" => Self::Resume,
            "next" | "n" => Self::Next,
            "previous" | "back" | "b" => Self::Previous,
            "volume" | "v" => Self::Volume(args.first().map(|arg| arg.to_string())),
            "help" => Self::Help,
            "disconnect" | "d" => Self::Disconnect,
            _ => return None,
        };

        Some(command)
    }
}

/// A chat message as seen by the router.
#[derive(Debug, Clone)]
pub struct Inbound<'a> {
    pub author: UserId,
    pub from_bot: bool,
    pub content: &'a str,
    /// The voice channel the author is currently in.
    pub voice: Option<VoiceTarget>,
}

pub struct CommandRouter {
    prefix: String,
    allowed: HashSet<UserId>,
}

impl CommandRouter {
    pub fn new(prefix: impl Into<String>, allowed: HashSet<UserId>) -> Self {
        Self {
            prefix: prefix.into(),
            allowed,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn is_allowed(&self, user: UserId) -> bool {
        self.allowed.contains(&user)
    }

    /// Handles one message, returning the reply to send back, if any.
    pub async fn route<T: VoiceTransport>(&self, session: &Mutex<Session<T>>, inbound: Inbound<'_>) -> Option<Reply> {
        if inbound.from_bot {
            return None;
        }

        let body = inbound.content.strip_prefix(self.prefix.as_str())?;

        if !self.is_allowed(inbound.author) {
            warn!("Denied command from unauthorized user {}", inbound.author);
            return Some(Reply::text(PERMISSION_DENIED));
        }

        let mut tokens = body.split_whitespace();
        let keyword = tokens.next()?.to_lowercase();
        let args = tokens.collect::<Vec<_>>();

        let command = match Command::parse(&keyword, &args) {
            Some(command) => command,
            None => {
                debug!("Ignoring unknown command {:?}", keyword);
                return None;
            }
        };

        info!("User {} issued {:?}", inbound.author, command);

        let mut session = session.lock().await;

        Some(self.dispatch(&mut session, command, inbound.voice).await)
    }

    async fn dispatch<T: VoiceTransport>(&self, session: &mut Session<T>, command: Command, voice: Option<VoiceTarget>) -> Reply {
        match command {
            Command::Connect => {
                let target = match voice {
                    Some(target) => target,
                    None => return self.failure(&JukeError::NotInVoiceChannel),
                };
                let name = target.name.clone();

                match session.connect(target).await {
                    Ok(()) => Reply::text(format!("Connected to {}. Use `{}p` to start playing.", name, self.prefix)),
                    Err(why) => self.failure(&why),
                }
            }
            Command::Play => self.now_playing(session.play().await),
            Command::Stop => match session.stop().await {
                Ok(_) => Reply::text("Stopped playing!"),
                Err(why) => self.failure(&why),
            },
            Command::Resume => self.now_playing(session.resume().await),
            Command::Next => self.now_playing(session.next().await),
            Command::Previous => self.now_playing(session.previous().await),
            Command::Volume(arg) => match Volume::parse(arg.as_deref()) {
                Ok(volume) => {
                    session.set_volume(volume);
                    Reply::text(format!("Volume set to {}", volume.level()))
                }
                Err(why) => self.failure(&why),
            },
            Command::Help => Reply::Help(HelpCard::new(&self.prefix)),
            Command::Disconnect => match session.disconnect().await {
                Ok(()) => Reply::text("Disconnected from the voice channel."),
                Err(JukeError::NotConnected) => Reply::text("The bot is not connected to any voice channel."),
                Err(why) => self.failure(&why),
            },
        }
    }

    fn now_playing(&self, result: Result<Track, JukeError>) -> Reply {
        match result {
            Ok(track) => Reply::text(format!("Now playing **{}**.", track)),
            Err(why) => self.failure(&why),
        }
    }

    fn failure(&self, error: &JukeError) -> Reply {
        if !error.is_precondition() {
            warn!("Command failed: {}", error);
        }

        let text = match error {
            JukeError::NotInVoiceChannel => "You need to be in a voice channel to connect.".to_string(),
            JukeError::NotConnected => format!(
                "The bot is not connected to any voice channel. Use `{}c` to connect first.",
                self.prefix
            ),
            JukeError::NoTracks => "No tracks available in the music folder.".to_string(),
            JukeError::NotPlaying => "The music is not playing!".to_string(),
            JukeError::AlreadyPlaying => "The music is already playing!".to_string(),
            JukeError::InvalidVolume { min, max } => format!("Please provide a volume between {} and {}.", min, max),
            JukeError::Join(why) => format!("Could not join the voice channel: {}", why),
            other => format!("Could not start playback: {}", other),
        };

        Reply::Text(text)
    }
}
