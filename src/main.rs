//! Quill - a small slash-command Discord bot backed by a document store.
use std::sync::Arc;

use anyhow::Context as _;
use serenity::{
    async_trait,
    builder::{CreateEmbed, CreateInteractionResponse, CreateInteractionResponseMessage},
    client::{Client, Context as DiscordContext, EventHandler},
    gateway::ActivityData,
    model::{application::Interaction, gateway::Ready, prelude::*},
    Result as SerenityResult,
};

use quill::{
    commands::{self, Registry, Reply, Request},
    config::Settings,
    db::Database,
};

struct Handler {
    settings: Settings,
    registry: Registry,
    db: Option<Arc<Database>>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _: DiscordContext, ready: Ready) {
        tracing::info!("{} is connected!", ready.user.name);
    }

    async fn interaction_create(&self, ctx: DiscordContext, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };

        let request = Request {
            settings: &self.settings,
            db: self.db.as_deref(),
            guild_id: command.guild_id.map(GuildId::get),
            user_id: command.user.id.get(),
        };

        let reply = match self.registry.dispatch(&command.data.name, &request).await {
            Ok(reply) => reply,
            Err(why) => {
                tracing::warn!("/{} failed: {}", command.data.name, why);
                match why.user_message() {
                    Some(description) => Reply::error("Error!", description),
                    // Unclassified failures get no reply at all.
                    None => return,
                }
            }
        };

        let embed = CreateEmbed::new()
            .title(&reply.title)
            .description(&reply.description)
            .colour(reply.colour(&self.settings));

        check_msg(
            command
                .create_response(
                    &ctx.http,
                    CreateInteractionResponse::Message(
                        CreateInteractionResponseMessage::new()
                            .embed(embed)
                            .ephemeral(true),
                    ),
                )
                .await,
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();
    let settings = Settings::from_env().context("Invalid environment configuration")?;
    anyhow::ensure!(
        !settings.token.is_empty(),
        "TOKEN environment variable not set"
    );

    let db = if settings.database_url.is_empty() {
        None
    } else {
        Some(Arc::new(
            Database::connect(&settings)
                .await
                .context("Document store connection error")?,
        ))
    };

    let token = settings.token.clone();
    let handler = Handler {
        settings,
        registry: commands::all(),
        db,
    };

    let mut client = Client::builder(&token, GatewayIntents::all())
        .event_handler(handler)
        .status(OnlineStatus::Idle)
        .activity(ActivityData::playing("I <3 Rust"))
        .await
        .context("Client builder error")?;

    client
        .start()
        .await
        .context("An error occurred in client loop")?;

    Ok(())
}

/// Checks that a response successfully sent; if not, then logs why using tracing.
fn check_msg(result: SerenityResult<()>) {
    if let Err(why) = result {
        tracing::error!("Error sending response: {:?}", why);
    }
}
