//! Info command plugin.
//!
//! Sends a Last.fm profile card to the sender's private chat. Unlike the
//! status path, an upstream failure here is not degraded: the card cannot
//! be partially rendered, so the error propagates out of the handler and
//! is logged by the dispatcher for this invocation only.

use teloxide::prelude::*;
use teloxide::types::{ChatId, ParseMode};
use tracing::warn;

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::message;

/// Handle the /info command with an optional username argument.
pub async fn info_command(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
    username: String,
) -> anyhow::Result<()> {
    let Some(from) = msg.from.as_ref() else {
        warn!("/info without a resolvable sender, dropping");
        return Ok(());
    };

    let target = username
        .split_whitespace()
        .next()
        .unwrap_or(&state.config.user);

    let user = state.lastfm.get_user_info(target).await?;
    let text = message::build_user_info_message(&user, state.catalog);

    bot.send_message(ChatId(from.id.0 as i64), text)
        .parse_mode(ParseMode::Html)
        .await?;

    Ok(())
}
