//! Message label catalog.
//!
//! Loads the localized label strings embedded at compile time into a fixed
//! struct behind a `OnceLock`. Every label is mandatory: a catalog missing a
//! key fails to deserialize and the bot refuses to start.

use std::sync::OnceLock;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

/// Global catalog store, set once by [`init`].
static CATALOG: OnceLock<StringCatalog> = OnceLock::new();

/// Labels substituted into the status and profile messages.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StringCatalog {
    pub now_playing: String,
    pub past_songs: String,
    pub favorite_artists: String,
    pub listens: String,
    pub there_is_nothing_here: String,
    pub info_for_account: String,
    pub real_name: String,
    pub country: String,
    pub subscriber: String,
    pub playcount: String,
    pub artist_count: String,
    pub track_count: String,
    pub album_count: String,
    pub playlists: String,
    pub link: String,
    pub registered: String,
}

/// Parse the embedded catalog and install it as shared read-only state.
pub fn init() -> Result<()> {
    let catalog: StringCatalog = serde_json::from_str(include_str!("en.json"))
        .context("string catalog failed to parse")?;
    CATALOG
        .set(catalog)
        .map_err(|_| anyhow!("string catalog initialized twice"))
}

/// Shared catalog. Call after a successful [`init`].
///
/// # Panics
/// Panics if [`init`] has not run; `main` loads the catalog before the bot
/// or the updater start.
pub fn catalog() -> &'static StringCatalog {
    CATALOG.get().expect("string catalog not initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_parses() {
        let catalog: StringCatalog = serde_json::from_str(include_str!("en.json")).unwrap();
        assert!(!catalog.there_is_nothing_here.is_empty());
        assert!(!catalog.listens.is_empty());
    }

    #[test]
    fn missing_label_is_an_error() {
        let partial = r#"{ "now_playing": "Now playing" }"#;
        assert!(serde_json::from_str::<StringCatalog>(partial).is_err());
    }
}
