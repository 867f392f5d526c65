use std::sync::Arc;

use serenity::prelude::TypeMapKey;
use tokio::sync::Mutex;

use crate::{session::Session, voice::SongbirdTransport};

pub type SharedSession<T> = Arc<Mutex<Session<T>>>;

/// Key of the live session in the serenity client's data map.
pub struct SessionKey;

impl TypeMapKey for SessionKey {
    type Value = SharedSession<SongbirdTransport>;
}
