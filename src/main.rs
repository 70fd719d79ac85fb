use std::sync::Arc;

use teloxide::{prelude::*, utils::command::BotCommands};

mod bot_state;
mod config;
mod dialog;
mod handlers;
mod models;
mod replies;
mod weather;

use crate::bot_state::BotState;
use crate::config::Config;
use crate::handlers::{command_handler, message_handler};
use crate::weather::OpenWeatherClient;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "start over and enter a city")]
    Start,
    #[command(description = "show how to use the bot")]
    Help,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Starting weather forecast bot...");

    let config = Config::from_env()?;
    let weather = OpenWeatherClient::new(&config.provider)?;
    log::info!(
        "✅ Weather provider at {} (timeout {:?}, retries {})",
        config.provider.base_url,
        config.provider.timeout,
        config.provider.max_retries
    );

    let state = BotState::in_memory(Arc::new(weather));

    if let Some(ttl) = config.session_ttl {
        let state_clone = state.clone();
        let every = config.session_sweep_interval;
        tokio::spawn(async move {
            handlers::cleanup_sessions_task(state_clone, ttl, every).await;
        });
        log::info!("Idle sessions expire after {:?}", ttl);
    }

    let bot = Bot::new(config.bot_token);

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        log::warn!("Could not register bot commands: {}", e);
    }

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(command_handler)
        )
        .branch(Update::filter_message().endpoint(message_handler));

    log::info!("🚀 Starting dispatcher...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
