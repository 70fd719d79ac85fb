use teloxide::prelude::*;
use teloxide::types::{KeyboardButton, KeyboardMarkup, KeyboardRemove, ReplyMarkup, ReplyParameters};

use crate::dialog::{Keyboard, Reply};
use crate::models::MenuOption;

/// One button per option, one option per row.
pub fn options_keyboard() -> KeyboardMarkup {
    let rows = MenuOption::ALL
        .iter()
        .map(|option| vec![KeyboardButton::new(option.label())])
        .collect::<Vec<_>>();

    KeyboardMarkup::new(rows).resize_keyboard()
}

pub fn reply_markup(keyboard: Keyboard) -> Option<ReplyMarkup> {
    match keyboard {
        Keyboard::Keep => None,
        Keyboard::Options => Some(ReplyMarkup::Keyboard(options_keyboard())),
        Keyboard::Remove => Some(ReplyMarkup::KeyboardRemove(KeyboardRemove::new())),
    }
}

/// Sends each reply in order as a reply to `msg`.
pub async fn send_replies(bot: &Bot, msg: &Message, replies: Vec<Reply>) -> ResponseResult<()> {
    for reply in replies {
        let request = bot
            .send_message(msg.chat.id, reply.text)
            .reply_parameters(ReplyParameters::new(msg.id));

        match reply_markup(reply.keyboard) {
            Some(markup) => request.reply_markup(markup).await?,
            None => request.await?,
        };
    }
    Ok(())
}
