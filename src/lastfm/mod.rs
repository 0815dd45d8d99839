//! Last.fm API integration.
//!
//! Read-only client for the three audioscrobbler endpoints the bot uses,
//! plus the domain types produced by deserializing their JSON payloads.

mod client;
mod models;

pub use client::{LastFmClient, LastFmError};
pub use models::{TopArtist, Track, UserInfo};
