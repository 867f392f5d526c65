use std::{
    collections::HashSet,
    env,
    net::{Ipv4Addr, SocketAddr},
    path::PathBuf,
};

use serenity::model::id::UserId;

use crate::error::{JukeError, JukeResult};

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub(crate) token: String,
    pub(crate) prefix: String,
    pub(crate) music_dir: PathBuf,
    pub(crate) extensions: Vec<String>,
    pub(crate) allowed_users: HashSet<UserId>,
    pub(crate) liveness_addr: SocketAddr,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            prefix: "*".to_string(),
            music_dir: PathBuf::from("music"),
            extensions: vec!["mp3".to_string()],
            allowed_users: HashSet::new(),
            liveness_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, 3000)),
        }
    }
}

impl BotConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> JukeResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, falling back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> JukeResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let token = lookup("TOKEN")
            .or_else(|| lookup("DISCORD_TOKEN"))
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| JukeError::Config("TOKEN is not set".to_string()))?;
        config.set_token(token.trim());

        if let Some(prefix) = lookup("PREFIX").filter(|prefix| !prefix.trim().is_empty()) {
            config.set_prefix(prefix.trim());
        }

        if let Some(dir) = lookup("MUSIC_DIR") {
            config.set_music_dir(dir);
        }

        if let Some(extensions) = lookup("MUSIC_EXTENSIONS") {
            let extensions = split_list(&extensions)
                .map(|ext| ext.trim_start_matches('.').to_string())
                .collect::<Vec<_>>();

            if extensions.is_empty() {
                return Err(JukeError::Config("MUSIC_EXTENSIONS is empty".to_string()));
            }

            config.set_extensions(extensions);
        }

        if let Some(users) = lookup("ALLOWED_USERS") {
            for id in split_list(&users) {
                let id = id
                    .parse::<u64>()
                    .ok()
                    .filter(|id| *id != 0)
                    .ok_or_else(|| JukeError::Config(format!("`{}` in ALLOWED_USERS is not a user id", id)))?;

                config.allow_user(UserId::new(id));
            }
        }

        if let Some(port) = lookup("PORT") {
            let port = port
                .trim()
                .parse::<u16>()
                .map_err(|_| JukeError::Config(format!("PORT `{}` is not a valid port", port)))?;

            config.set_port(port);
        }

        Ok(config)
    }

    pub fn set_token(&mut self, token: impl ToString) -> &mut Self {
        self.token = token.to_string();
        self
    }

    pub fn set_prefix(&mut self, prefix: impl ToString) -> &mut Self {
        self.prefix = prefix.to_string();
        self
    }

    pub fn set_music_dir(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.music_dir = dir.into();
        self
    }

    pub fn set_extensions(&mut self, extensions: Vec<String>) -> &mut Self {
        self.extensions = extensions;
        self
    }

    pub fn allow_user(&mut self, id: UserId) -> &mut Self {
        self.allowed_users.insert(id);
        self
    }

    pub fn set_port(&mut self, port: u16) -> &mut Self {
        self.liveness_addr.set_port(port);
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn music_dir(&self) -> &PathBuf {
        &self.music_dir
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn allowed_users(&self) -> &HashSet<UserId> {
        &self.allowed_users
    }

    pub fn liveness_addr(&self) -> SocketAddr {
        self.liveness_addr
    }

    /// Text shown as the bot's "Listening to" activity.
    pub fn activity(&self) -> String {
        format!("{}help | Music-BOT", self.prefix)
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|item| !item.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();

        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_the_token_is_set() {
        let config = BotConfig::from_lookup(lookup(&[("TOKEN", "abc")])).unwrap();

        assert_eq!(config.token(), "abc");
        assert_eq!(config.prefix(), "*");
        assert_eq!(config.music_dir(), &PathBuf::from("music"));
        assert_eq!(config.extensions(), &["mp3".to_string()]);
        assert!(config.allowed_users().is_empty());
        assert_eq!(config.liveness_addr().port(), 3000);
        assert_eq!(config.activity(), "*help | Music-BOT");
    }

    #[test]
    fn missing_token_is_an_error() {
        assert!(matches!(BotConfig::from_lookup(lookup(&[])), Err(JukeError::Config(_))));
        assert!(matches!(BotConfig::from_lookup(lookup(&[("TOKEN", "  ")])), Err(JukeError::Config(_))));
    }

    #[test]
    fn overrides_are_read() {
        let config = BotConfig::from_lookup(lookup(&[
            ("DISCORD_TOKEN", "xyz"),
            ("PREFIX", "!"),
            ("MUSIC_DIR", "/srv/tracks"),
            ("MUSIC_EXTENSIONS", "mp3, .ogg"),
            ("ALLOWED_USERS", "1219384660304592962, 42"),
            ("PORT", "8080"),
        ]))
        .unwrap();

        assert_eq!(config.token(), "xyz");
        assert_eq!(config.prefix(), "!");
        assert_eq!(config.music_dir(), &PathBuf::from("/srv/tracks"));
        assert_eq!(config.extensions(), &["mp3".to_string(), "ogg".to_string()]);
        assert!(config.allowed_users().contains(&UserId::new(1219384660304592962)));
        assert!(config.allowed_users().contains(&UserId::new(42)));
        assert_eq!(config.liveness_addr().port(), 8080);
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(BotConfig::from_lookup(lookup(&[("TOKEN", "a"), ("ALLOWED_USERS", "someone")])).is_err());
        assert!(BotConfig::from_lookup(lookup(&[("TOKEN", "a"), ("ALLOWED_USERS", "0")])).is_err());
        assert!(BotConfig::from_lookup(lookup(&[("TOKEN", "a"), ("PORT", "70000")])).is_err());
        assert!(BotConfig::from_lookup(lookup(&[("TOKEN", "a"), ("MUSIC_EXTENSIONS", " , ")])).is_err());
    }
}
