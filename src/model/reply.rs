/// What the bot answers in the text channel a command came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Help(HelpCard),
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Help(_) => None,
        }
    }
}

/// Command reference rendered as an embed.
#[derive(Debug, Clone, PartialEq)]
pub struct HelpCard {
    pub colour: u32,
    pub title: String,
    pub description: String,
    pub fields: Vec<(String, String)>,
    pub footer: String,
}

impl HelpCard {
    pub fn new(prefix: &str) -> Self {
        let entry = |usage: &str, about: &str| (format!("**`{}{}`**", prefix, usage), about.to_string());

        Self {
            colour: 0x6F03FC,
            title: "Music Bot Help".to_string(),
            description: "Here is a list of commands you can use with this bot:".to_string(),
            fields: vec![
                entry("c", "Connect the bot to your current voice channel."),
                entry("p", "Play the current track from the beginning."),
                entry("s", "Stop playing the current track."),
                entry("rm", "Resume playback of the last stopped track."),
                entry("next", "Play the next track in the playlist."),
                entry("back", "Play the previous track in the playlist."),
                entry("v <volume>", "Set the volume. Range: 1 to 20."),
                entry("d", "Disconnect the bot from the voice channel."),
                entry("help", "Show this message."),
            ],
            footer: "For more info, contact the bot owner.".to_string(),
        }
    }
}
