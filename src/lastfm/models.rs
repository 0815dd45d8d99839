//! Domain and wire types for Last.fm responses.
//!
//! The wire layer absorbs the API's quirks: `#text` keys, the
//! `@attr.nowplaying` marker on the live track, and numeric fields encoded
//! as JSON strings. Domain types carry none of that.

use serde::{Deserialize, Deserializer};

/// One scrobbled (or currently playing) track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub artist: String,
    pub name: String,
    pub url: String,
    /// Set when the API marks this entry as actively playing.
    pub now_playing: bool,
}

/// One entry of the ranked top-artists chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopArtist {
    pub name: String,
    pub url: String,
    pub playcount: u64,
}

/// Profile data from `user.getinfo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub name: String,
    pub real_name: String,
    pub country: String,
    pub subscriber: bool,
    /// Largest profile image the API returned, if any.
    pub image_url: Option<String>,
    pub playcount: u64,
    pub artist_count: u64,
    pub track_count: u64,
    pub album_count: u64,
    pub playlists: u64,
    pub url: String,
    /// Registration time, epoch seconds.
    pub registered: i64,
}

/// Numbers arrive either as JSON numbers or as decimal strings.
fn stringly_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn stringly_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecentTracksResponse {
    recenttracks: WireTrackList,
}

#[derive(Debug, Deserialize)]
struct WireTrackList {
    #[serde(default)]
    track: Vec<WireTrack>,
}

#[derive(Debug, Deserialize)]
struct WireTrack {
    artist: WireText,
    name: String,
    url: String,
    #[serde(rename = "@attr")]
    attr: Option<WireTrackAttr>,
}

#[derive(Debug, Deserialize)]
struct WireTrackAttr {
    nowplaying: Option<String>,
}

/// Payload of the form `{"#text": "..."}`.
#[derive(Debug, Deserialize)]
struct WireText {
    #[serde(rename = "#text")]
    text: String,
}

impl RecentTracksResponse {
    pub(crate) fn into_tracks(self) -> Vec<Track> {
        self.recenttracks
            .track
            .into_iter()
            .map(|t| Track {
                artist: t.artist.text,
                name: t.name,
                url: t.url,
                now_playing: t
                    .attr
                    .and_then(|a| a.nowplaying)
                    .is_some_and(|v| v == "true"),
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TopArtistsResponse {
    topartists: WireArtistList,
}

#[derive(Debug, Deserialize)]
struct WireArtistList {
    #[serde(default)]
    artist: Vec<WireArtist>,
}

#[derive(Debug, Deserialize)]
struct WireArtist {
    name: String,
    url: String,
    #[serde(deserialize_with = "stringly_u64")]
    playcount: u64,
}

impl TopArtistsResponse {
    pub(crate) fn into_artists(self) -> Vec<TopArtist> {
        self.topartists
            .artist
            .into_iter()
            .map(|a| TopArtist {
                name: a.name,
                url: a.url,
                playcount: a.playcount,
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserInfoResponse {
    user: WireUser,
}

#[derive(Debug, Deserialize)]
struct WireUser {
    name: String,
    #[serde(default)]
    realname: String,
    #[serde(default)]
    country: String,
    #[serde(default)]
    subscriber: Option<String>,
    #[serde(default)]
    image: Vec<WireImage>,
    #[serde(deserialize_with = "stringly_u64")]
    playcount: u64,
    #[serde(deserialize_with = "stringly_u64")]
    artist_count: u64,
    #[serde(deserialize_with = "stringly_u64")]
    track_count: u64,
    #[serde(deserialize_with = "stringly_u64")]
    album_count: u64,
    #[serde(deserialize_with = "stringly_u64")]
    playlists: u64,
    url: String,
    registered: WireRegistered,
}

#[derive(Debug, Deserialize)]
struct WireImage {
    #[serde(rename = "#text")]
    text: String,
}

#[derive(Debug, Deserialize)]
struct WireRegistered {
    #[serde(deserialize_with = "stringly_i64")]
    unixtime: i64,
}

impl UserInfoResponse {
    pub(crate) fn into_user_info(self) -> UserInfo {
        let user = self.user;
        // The image array is ordered small to large; take the largest.
        let image_url = user
            .image
            .into_iter()
            .map(|i| i.text)
            .filter(|url| !url.is_empty())
            .next_back();

        UserInfo {
            name: user.name,
            real_name: user.realname,
            country: user.country,
            subscriber: user.subscriber.is_some_and(|v| v == "1"),
            image_url,
            playcount: user.playcount,
            artist_count: user.artist_count,
            track_count: user.track_count,
            album_count: user.album_count,
            playlists: user.playlists,
            url: user.url,
            registered: user.registered.unixtime,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recent_tracks_with_now_playing_marker() {
        let body = r##"{
            "recenttracks": {
                "track": [
                    {
                        "artist": {"#text": "Boards of Canada"},
                        "name": "Roygbiv",
                        "url": "https://last.fm/t/1",
                        "@attr": {"nowplaying": "true"}
                    },
                    {
                        "artist": {"#text": "Aphex Twin"},
                        "name": "Xtal",
                        "url": "https://last.fm/t/2"
                    }
                ]
            }
        }"##;

        let tracks: Vec<Track> = serde_json::from_str::<RecentTracksResponse>(body)
            .unwrap()
            .into_tracks();

        assert_eq!(tracks.len(), 2);
        assert!(tracks[0].now_playing);
        assert_eq!(tracks[0].artist, "Boards of Canada");
        assert!(!tracks[1].now_playing);
        assert_eq!(tracks[1].name, "Xtal");
    }

    #[test]
    fn empty_track_list_deserializes() {
        let body = r##"{"recenttracks": {"track": []}}"##;
        let tracks = serde_json::from_str::<RecentTracksResponse>(body)
            .unwrap()
            .into_tracks();
        assert!(tracks.is_empty());
    }

    #[test]
    fn top_artists_parse_stringly_playcount() {
        let body = r##"{
            "topartists": {
                "artist": [
                    {"name": "Autechre", "url": "https://last.fm/a/1", "playcount": "512"},
                    {"name": "Plaid", "url": "https://last.fm/a/2", "playcount": 33}
                ]
            }
        }"##;

        let artists = serde_json::from_str::<TopArtistsResponse>(body)
            .unwrap()
            .into_artists();

        assert_eq!(artists[0].playcount, 512);
        assert_eq!(artists[1].playcount, 33);
    }

    #[test]
    fn user_info_picks_largest_image_and_flags() {
        let body = r##"{
            "user": {
                "name": "listener",
                "realname": "Avery",
                "country": "Iceland",
                "subscriber": "1",
                "image": [
                    {"size": "small", "#text": "https://img/s.png"},
                    {"size": "large", "#text": "https://img/l.png"}
                ],
                "playcount": "10250",
                "artist_count": "840",
                "track_count": "4100",
                "album_count": "390",
                "playlists": "2",
                "url": "https://last.fm/user/listener",
                "registered": {"unixtime": "1199145600", "#text": 1199145600}
            }
        }"##;

        let info = serde_json::from_str::<UserInfoResponse>(body)
            .unwrap()
            .into_user_info();

        assert_eq!(info.image_url.as_deref(), Some("https://img/l.png"));
        assert!(info.subscriber);
        assert_eq!(info.playcount, 10250);
        assert_eq!(info.registered, 1199145600);
    }
}
