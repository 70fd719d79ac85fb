use teloxide::prelude::*;
use std::error::Error;

use crate::bot_state::BotState;
use crate::dialog::Input;
use crate::handlers::utils::send_replies;

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    state: BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let input = match msg.text() {
        Some(text) => Input::Text(text),
        None => Input::NonText,
    };

    let sent = state.handle(msg.chat.id, input).await;
    send_replies(&bot, &msg, sent).await?;
    Ok(())
}
