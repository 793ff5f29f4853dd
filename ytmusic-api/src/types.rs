//! Normalized result types.
//!
//! The `youtubei` responses are trees of "renderer" objects whose layout
//! changes between releases. Everything the parsers extract is flattened into
//! these few value types; field names follow Rust conventions (`snake_case`)
//! rather than the original API naming (camelCase).

use serde::{Deserialize, Serialize};

/// Browse-id prefix the service uses for "video playlist" pages.
pub const PLAYLIST_BROWSE_PREFIX: &str = "VL";

/// What a [`MediaItem`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Song,
    Album,
    Playlist,
}

/// A song, album or playlist card.
///
/// Returned inside [`Shelf`], by [`YtMusicClient::search`](crate::YtMusicClient::search)
/// and as the tracks of a [`PlaylistDetail`].
///
/// - `video_id` set → directly playable.
/// - `browse_id` / `playlist_id` set without `video_id` → must be browsed
///   (see [`browse_target`](Self::browse_target)) before playback.
/// - both `playlist_id` and `video_id` → an auto-playing mix, kind `Playlist`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub title: String,
    /// Descriptive runs joined, e.g. `Album • Artist • 2021`.
    pub subtitle: String,
    /// Card-sized thumbnail URL, empty if none was offered.
    pub thumbnail_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browse_id: Option<String>,
    pub kind: ItemKind,
}

impl MediaItem {
    /// Whether the item can be streamed without browsing it first.
    pub fn is_playable(&self) -> bool {
        self.video_id.is_some()
    }

    /// Browse id to pass to
    /// [`YtMusicClient::playlist_or_album`](crate::YtMusicClient::playlist_or_album).
    ///
    /// The native browse id wins; otherwise a raw playlist id is turned into
    /// a browse id with [`playlist_browse_id`].
    pub fn browse_target(&self) -> Option<String> {
        self.browse_id
            .clone()
            .or_else(|| self.playlist_id.as_deref().map(playlist_browse_id))
    }
}

/// Turn a raw playlist id (`PL...`, `RDCLAK...`) into a browse id.
///
/// Ids already carrying the `VL` marker are returned unchanged.
pub fn playlist_browse_id(playlist_id: &str) -> String {
    if playlist_id.starts_with(PLAYLIST_BROWSE_PREFIX) {
        playlist_id.to_owned()
    } else {
        format!("{PLAYLIST_BROWSE_PREFIX}{playlist_id}")
    }
}

/// A titled row of cards on the home feed, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shelf {
    pub title: String,
    pub items: Vec<MediaItem>,
}

/// Header and track list of a playlist or album page.
///
/// Returned by [`YtMusicClient::playlist_or_album`](crate::YtMusicClient::playlist_or_album).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistDetail {
    pub title: String,
    pub subtitle: String,
    pub thumbnail_url: String,
    /// Always of kind [`ItemKind::Song`].
    pub tracks: Vec<MediaItem>,
    /// Set when the response could not be interpreted at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlaylistDetail {
    pub(crate) fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}
