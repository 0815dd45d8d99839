//! Background status updater.
//!
//! A dedicated task refreshes the pinned status message on a fixed
//! interval, starting immediately on launch. Each cycle is independent:
//! fetch failures degrade the affected section to an empty list and the
//! rest of the message is still built and sent, so a partial Last.fm
//! outage never blanks the whole status.

use std::time::Duration;

use teloxide::prelude::*;
use teloxide::types::{ChatId, LinkPreviewOptions, MessageId, ParseMode};
use tokio::time::interval;
use tracing::{error, info};

use super::dispatcher::{AppState, ThrottledBot};
use crate::lastfm::{LastFmError, TopArtist, Track};
use crate::message;

/// Spawn the periodic update task. The first refresh runs right away.
pub fn spawn(bot: ThrottledBot, state: AppState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            interval_minutes = state.config.update_interval,
            "status updater started"
        );
        let mut timer = interval(Duration::from_secs(state.config.update_interval * 60));

        loop {
            timer.tick().await;
            match refresh_status(&bot, &state).await {
                Ok(()) => info!("status message updated"),
                // Not retried before the next tick.
                Err(e) => error!("status update failed: {e:#}"),
            }
        }
    })
}

/// Fetch the configured user's activity, build the status text, and edit
/// the pinned message in place.
///
/// Overlapping calls from a slow tick and a concurrent `/update` are
/// last-write-wins; the edit itself is serialized by Telegram.
pub async fn refresh_status(bot: &ThrottledBot, state: &AppState) -> anyhow::Result<()> {
    let text = build_current_status(state).await;

    bot.edit_message_text(
        ChatId(state.config.chat_id),
        MessageId(state.config.message_id),
        text,
    )
    .parse_mode(ParseMode::Html)
    .link_preview_options(LinkPreviewOptions {
        is_disabled: true,
        url: None,
        prefer_small_media: false,
        prefer_large_media: false,
        show_above_text: false,
    })
    .await?;

    Ok(())
}

/// Fetch both feeds, degrading each failure to an empty list.
async fn build_current_status(state: &AppState) -> String {
    let config = &state.config;

    let recent: Vec<Track> = or_empty(
        state
            .lastfm
            .get_recent_tracks(&config.user, config.limit_tracks)
            .await,
        "recent tracks",
    );

    let top_artists: Vec<TopArtist> = or_empty(
        state
            .lastfm
            .get_top_artists(&config.user, config.limit_artists)
            .await,
        "top artists",
    );

    message::build_status_message(&recent, &top_artists, config.limit_tracks, state.catalog)
}

/// Degrade a failed fetch to an empty list so the other sections still
/// render.
fn or_empty<T>(result: Result<Vec<T>, LastFmError>, feed: &str) -> Vec<T> {
    result.unwrap_or_else(|e| {
        error!("{feed} fetch failed: {e}");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lastfm::LastFmClient;
    use crate::strings::StringCatalog;

    fn catalog() -> StringCatalog {
        serde_json::from_str(include_str!("../strings/en.json")).unwrap()
    }

    // A connection-refused fetch must not blank the whole status: the
    // failed section degrades to the placeholder while the other section
    // still renders.
    #[tokio::test]
    async fn failed_recent_fetch_degrades_to_placeholder() {
        let client = LastFmClient::new(
            "key".to_string(),
            "trackpin-test",
            Some("http://127.0.0.1:9/".to_string()),
        )
        .unwrap();

        let recent = or_empty(client.get_recent_tracks("listener", 10).await, "recent tracks");
        assert!(recent.is_empty());

        let top_artists = vec![TopArtist {
            name: "X".to_string(),
            url: "ux".to_string(),
            playcount: 5,
        }];
        let catalog = catalog();
        let text = message::build_status_message(&recent, &top_artists, 10, &catalog);

        assert_eq!(text.matches(&catalog.there_is_nothing_here).count(), 1);
        assert!(text.contains(&format!("1. <a href=\"ux\">X</a> - 5 {}", catalog.listens)));
    }
}
