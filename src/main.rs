use std::sync::Arc;

use anyhow::Context as _;
use jukelink::{
    config::BotConfig,
    events,
    handler::Handler,
    liveness,
    model::Playlist,
    router::CommandRouter,
    session::Session,
    types::SessionKey,
    voice::SongbirdTransport,
};
use serenity::{prelude::GatewayIntents, Client};
use songbird::{SerenityInit, Songbird};
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jukelink=info,serenity=warn,songbird=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = BotConfig::from_env().context("loading configuration")?;

    if config.allowed_users().is_empty() {
        warn!("ALLOWED_USERS is empty, every command will be denied");
    }

    let playlist = Playlist::load(config.music_dir(), config.extensions()).context("loading playlist")?;

    let manager = Songbird::serenity();
    let (sender, receiver) = events::channel();
    let transport = Arc::new(SongbirdTransport::new(Arc::clone(&manager)));
    let session = Arc::new(Mutex::new(Session::new(transport, playlist, sender)));

    events::listen(Arc::clone(&session), receiver);

    let liveness_addr = config.liveness_addr();
    tokio::spawn(async move {
        if let Err(why) = liveness::serve(liveness_addr).await {
            error!("Liveness server stopped: {}", why);
        }
    });

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_VOICE_STATES
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let router = CommandRouter::new(config.prefix(), config.allowed_users().clone());

    let mut client = Client::builder(config.token(), intents)
        .event_handler(Handler::new(router, config.activity()))
        .register_songbird_with(manager)
        .type_map_insert::<SessionKey>(session)
        .await
        .context("building discord client")?;

    let shard_manager = Arc::clone(&client.shard_manager);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received, disconnecting");
            shard_manager.shutdown_all().await;
        }
    });

    client.start().await.context("running discord client")?;

    Ok(())
}
