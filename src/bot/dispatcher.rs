//! Message dispatcher setup.
//!
//! Builds the dispatcher with the command handlers and holds the shared
//! application state.

use std::sync::Arc;

use teloxide::adaptors::Throttle;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;

use crate::config::Config;
use crate::lastfm::LastFmClient;
use crate::plugins;
use crate::strings::StringCatalog;

/// Bot type with Throttle adaptor for automatic rate limiting.
pub type ThrottledBot = Throttle<Bot>;

/// Shared application state, immutable after startup.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<Config>,

    /// Last.fm API client.
    pub lastfm: Arc<LastFmClient>,

    /// Message label catalog.
    pub catalog: &'static StringCatalog,
}

impl AppState {
    /// Create a new application state.
    pub fn new(config: Arc<Config>, lastfm: Arc<LastFmClient>, catalog: &'static StringCatalog) -> Self {
        Self {
            config,
            lastfm,
            catalog,
        }
    }
}

/// Build the dispatcher with all handlers.
pub fn build_dispatcher(
    bot: ThrottledBot,
    state: AppState,
) -> Dispatcher<ThrottledBot, anyhow::Error, teloxide::dispatching::DefaultKey> {
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
}

/// Build the handler schema.
fn schema() -> UpdateHandler<anyhow::Error> {
    use teloxide::dispatching::UpdateFilterExt;

    dptree::entry().branch(Update::filter_message().branch(plugins::command_handler()))
}
