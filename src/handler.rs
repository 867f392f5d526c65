use serenity::{
    all::{ActivityData, CreateEmbed, CreateEmbedFooter, CreateMessage},
    async_trait,
    client::{Context, EventHandler},
    model::{channel::Message, gateway::Ready},
};
use tracing::{error, info};

use crate::{
    model::{HelpCard, Reply, VoiceTarget},
    router::{CommandRouter, Inbound},
    types::SessionKey,
};

/// Serenity event handler feeding chat messages to the [`CommandRouter`].
pub struct Handler {
    router: CommandRouter,
    activity: String,
}

impl Handler {
    pub fn new(router: CommandRouter, activity: impl Into<String>) -> Self {
        Self {
            router,
            activity: activity.into(),
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is online", ready.user.tag());

        ctx.set_activity(Some(ActivityData::listening(self.activity.clone())));
    }

    async fn message(&self, ctx: Context, msg: Message) {
        // Early exit before the data map read; the router still does the authoritative filtering.
        if msg.author.bot || !msg.content.starts_with(self.router.prefix()) {
            return;
        }

        let session = {
            let data = ctx.data.read().await;

            match data.get::<SessionKey>() {
                Some(session) => session.clone(),
                None => {
                    error!("Playback session was not registered on the client");
                    return;
                }
            }
        };

        let inbound = Inbound {
            author: msg.author.id,
            from_bot: msg.author.bot,
            content: &msg.content,
            voice: author_voice_channel(&ctx, &msg),
        };

        if let Some(reply) = self.router.route(&*session, inbound).await {
            send_reply(&ctx, &msg, reply).await;
        }
    }
}

/// The voice channel the message author is connected to, looked up in the guild cache.
pub fn author_voice_channel(ctx: &Context, msg: &Message) -> Option<VoiceTarget> {
    let guild = msg.guild(&ctx.cache)?;

    let channel = guild
        .voice_states
        .get(&msg.author.id)
        .and_then(|state| state.channel_id)?;

    let name = guild
        .channels
        .get(&channel)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| channel.to_string());

    Some(VoiceTarget {
        guild: guild.id,
        channel,
        name,
    })
}

async fn send_reply(ctx: &Context, msg: &Message, reply: Reply) {
    let result = match reply {
        Reply::Text(text) => msg.channel_id.say(&ctx.http, text).await,
        Reply::Help(card) => {
            msg.channel_id
                .send_message(&ctx.http, CreateMessage::new().embed(help_embed(card)))
                .await
        }
    };

    if let Err(why) = result {
        error!("Error sending reply to channel {}: {}", msg.channel_id, why);
    }
}

fn help_embed(card: HelpCard) -> CreateEmbed {
    card.fields.into_iter().fold(
        CreateEmbed::new()
            .colour(card.colour)
            .title(card.title)
            .description(card.description)
            .footer(CreateEmbedFooter::new(card.footer)),
        |embed, (name, value)| embed.field(name, value, false),
    )
}
