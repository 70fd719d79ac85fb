pub mod commands;
pub mod messages;
pub mod utils;

pub use commands::command_handler;
pub use messages::message_handler;

use std::time::Duration;

use tokio::time;

use crate::bot_state::BotState;

/// Periodically drops sessions idle for longer than `ttl`.
pub async fn cleanup_sessions_task(state: BotState, ttl: Duration, every: Duration) {
    let mut interval = time::interval(every);

    loop {
        interval.tick().await;
        state.cleanup_cache(ttl).await;
    }
}
