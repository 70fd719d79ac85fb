use teloxide::prelude::*;
use std::error::Error;

use crate::bot_state::BotState;
use crate::dialog::Input;
use crate::handlers::utils::send_replies;

use crate::Command;

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    match cmd {
        Command::Start | Command::Help => {
            log::info!("👋 Greeting from chat {}", msg.chat.id);
            let sent = state.handle(msg.chat.id, Input::Greeting).await;
            send_replies(&bot, &msg, sent).await?;
        }
    }
    Ok(())
}
