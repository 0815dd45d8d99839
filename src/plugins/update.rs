//! Update command plugin.
//!
//! Forces a status refresh and forwards the freshly edited message to the
//! sender's private chat.

use teloxide::prelude::*;
use teloxide::types::{ChatId, MessageId};
use tracing::warn;

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::bot::updater;

/// Handle the /update command.
pub async fn update_command(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
) -> anyhow::Result<()> {
    let Some(from) = msg.from.as_ref() else {
        warn!("/update without a resolvable sender, dropping");
        return Ok(());
    };

    updater::refresh_status(&bot, &state).await?;

    bot.forward_message(
        ChatId(from.id.0 as i64),
        ChatId(state.config.chat_id),
        MessageId(state.config.message_id),
    )
    .await?;

    Ok(())
}
