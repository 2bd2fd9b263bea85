use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info, warn};
use serenity::async_trait;
use serenity::model::application::interaction::Interaction;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use std::sync::Arc;

use acwoc_bot::commands::{handlers, CommandContext, CommandRegistry, Dispatcher};
use acwoc_bot::core::Config;
use acwoc_bot::features::health::{self, HealthState};
use acwoc_bot::features::leaderboard::LeaderboardClient;

struct Handler {
    dispatcher: Arc<Dispatcher>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        self.dispatcher.handle_message(&ctx, &msg).await;
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🔗 Gateway session ID: {:?}", ready.session_id);
        info!("🤖 Bot ID: {}", ready.user.id);

        if let Some(shard) = ready.shard {
            info!("⚡ Shard: {}/{}", shard[0] + 1, shard[1]);
        }

        info!(
            "📋 Serving {} commands: {}",
            self.dispatcher.registry().len(),
            self.dispatcher.registry().command_names().join(", ")
        );
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::ApplicationCommand(command) => {
                self.dispatcher.handle_interaction(&ctx, &command).await;
            }
            Interaction::Ping(_) => {
                info!("Ping interaction received - Discord health check");
            }
            _ => {}
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting AcWoC Discord Bot...");

    let registry = CommandRegistry::build(handlers::create_all())?;
    match registry
        .register_remote(config.client_id, Some(&config.discord_token))
        .await
    {
        Some(count) => info!("✅ Registered {count} slash commands globally"),
        None => warn!("Slash commands were not registered; only prefixed text commands will work"),
    }

    let leaderboard = LeaderboardClient::new(config.leaderboard_url.clone())?;

    let health_state = HealthState::new(leaderboard.clone());
    let port = config.port;
    tokio::spawn(async move {
        if let Err(e) = health::serve(port, health_state).await {
            error!("Health server stopped: {e:?}");
        }
    });

    let config = Arc::new(config);
    let ctx = Arc::new(CommandContext::new(config.clone(), leaderboard));
    let handler = Handler {
        dispatcher: Arc::new(Dispatcher::new(Arc::new(registry), ctx)),
    };

    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            error!("This could indicate:");
            error!("  - Invalid bot token format");
            error!("  - Network issues reaching Discord API");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Bot configured successfully. Connecting to Discord gateway...");
    info!("Gateway intents: {intents:?}");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        error!("This could be due to:");
        error!("  - Invalid bot token");
        error!("  - Network connectivity issues");
        error!("  - Discord API outage");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
