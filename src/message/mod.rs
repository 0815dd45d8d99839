//! Status and profile message builders.
//!
//! Pure text assembly: no I/O, deterministic for a given input. Artist and
//! track names come from a trusted upstream and are inserted into the HTML
//! anchors as-is; only literal `&` is escaped, as a final pass over the
//! whole message.

use chrono::DateTime;

use crate::lastfm::{TopArtist, Track, UserInfo};
use crate::strings::StringCatalog;

/// Build the pinned status message body.
///
/// `limit_tracks` is the limit the recent-tracks fetch was made with: when
/// the account is listening right now, Last.fm prepends the live track on
/// top of the historical window, so a count different from the requested
/// limit also marks the first entry as now playing. An explicit now-playing
/// flag on the first track always wins.
pub fn build_status_message(
    recent: &[Track],
    top_artists: &[TopArtist],
    limit_tracks: u32,
    catalog: &StringCatalog,
) -> String {
    let mut text = String::new();
    let (now_playing, past) = split_now_playing(recent, limit_tracks);

    if let Some(track) = now_playing {
        text.push_str(&catalog.now_playing);
        text.push('\n');
        text.push_str(&track_line(track));
        text.push('\n');
    }

    text.push('\n');
    text.push_str(&catalog.past_songs);
    text.push('\n');
    if past.is_empty() {
        text.push_str(&catalog.there_is_nothing_here);
        text.push('\n');
    } else {
        for track in past {
            text.push_str(&track_line(track));
            text.push('\n');
        }
    }

    text.push('\n');
    text.push_str(&catalog.favorite_artists);
    text.push('\n');
    if top_artists.is_empty() {
        text.push_str(&catalog.there_is_nothing_here);
        text.push('\n');
    } else {
        for (index, artist) in top_artists.iter().enumerate() {
            text.push_str(&format!(
                "{}. <a href=\"{}\">{}</a> - {} {}\n",
                index + 1,
                artist.url,
                artist.name,
                artist.playcount,
                catalog.listens
            ));
        }
    }

    escape_ampersands(&text)
}

/// Build the `/info` profile card body.
pub fn build_user_info_message(user: &UserInfo, catalog: &StringCatalog) -> String {
    let header_link = user.image_url.as_deref().unwrap_or(&user.url);
    let subscriber = if user.subscriber { "yes" } else { "no" };

    let text = format!(
        "<b>{}: <a href=\"{}\">{}</a></b>\n\
         \n\
         {}: {}\n\
         {}: {}\n\
         {}: {}\n\
         \n\
         {}: {}\n\
         {}: {}\n\
         {}: {}\n\
         {}: {}\n\
         {}: {}\n\
         \n\
         {}: <a href=\"{}\">{}</a>\n\
         {}: {}",
        catalog.info_for_account,
        header_link,
        user.name,
        catalog.real_name,
        user.real_name,
        catalog.country,
        user.country,
        catalog.subscriber,
        subscriber,
        catalog.playcount,
        user.playcount,
        catalog.artist_count,
        user.artist_count,
        catalog.track_count,
        user.track_count,
        catalog.album_count,
        user.album_count,
        catalog.playlists,
        user.playlists,
        catalog.link,
        user.url,
        user.name,
        catalog.registered,
        format_registration_date(user.registered),
    );

    escape_ampersands(&text)
}

/// Split off the live track, if any. The remainder is the Past Songs list.
fn split_now_playing(recent: &[Track], limit_tracks: u32) -> (Option<&Track>, &[Track]) {
    let Some((first, rest)) = recent.split_first() else {
        return (None, recent);
    };

    if first.now_playing || recent.len() as u32 != limit_tracks {
        (Some(first), rest)
    } else {
        (None, recent)
    }
}

fn track_line(track: &Track) -> String {
    format!(
        "{} - <a href=\"{}\">{}</a>",
        track.artist, track.url, track.name
    )
}

fn format_registration_date(unixtime: i64) -> String {
    DateTime::from_timestamp(unixtime, 0)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| unixtime.to_string())
}

fn escape_ampersands(text: &str) -> String {
    text.replace('&', "&amp;")
}
