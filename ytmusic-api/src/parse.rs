//! Shape-tolerant parsers for `youtubei` responses.
//!
//! There is no published schema. The same page comes back with different
//! container renderers depending on the entity (album, curated playlist,
//! user playlist) and on the client release, so every lookup here is
//! optional: a missing or reshaped field becomes an empty string, `None` or
//! an empty list, never an error.
//!
//! Where several layouts are known, each one has its own extractor and the
//! extractors are tried in a fixed order; the first hit wins.
//!
//! # Card renderers
//!
//! ```text
//! musicTwoRowItemRenderer            albums, playlists, mixes (home shelves)
//!   title.runs[0].text
//!   subtitle.runs[*].text
//!   thumbnailRenderer.musicThumbnailRenderer.thumbnail.thumbnails[]
//!   navigationEndpoint.{watchEndpoint, watchPlaylistEndpoint, browseEndpoint}
//!
//! musicResponsiveListItemRenderer    song rows (search, playlist tracks)
//!   flexColumns[0..2].musicResponsiveListItemFlexColumnRenderer.text.runs
//!   thumbnail.musicThumbnailRenderer.thumbnail.thumbnails[]
//!   overlay...musicPlayButtonRenderer.playNavigationEndpoint.watchEndpoint.videoId
//!   playlistItemData.videoId
//! ```

use crate::config::Vocabulary;
use crate::types::{ItemKind, MediaItem, PlaylistDetail, Shelf};
use serde_json::Value;
use std::ops::RangeInclusive;

/// Shelf title used when a carousel has no header.
const DEFAULT_SHELF_TITLE: &str = "Recommendations";
/// Browse-id prefixes that always denote an album.
const ALBUM_BROWSE_PREFIXES: [&str; 2] = ["MPREb_", "OLAK"];
/// Preferred thumbnail widths for card-sized artwork.
const THUMBNAIL_BAND: RangeInclusive<u64> = 200..=400;

/// Identifiers found on a card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemIds {
    pub video_id: Option<String>,
    pub playlist_id: Option<String>,
    pub browse_id: Option<String>,
}

/// Classify a card. Rules are checked in order; the first match wins.
///
/// 1. album browse id (`MPREb_…`, `OLAK…`) → album
/// 2. album vocabulary in the subtitle → album
/// 3. playlist vocabulary in the subtitle → playlist
/// 4. playlist id without video id → playlist
/// 5. any browse id → playlist
/// 6. playlist id with video id (auto-playing mix) → playlist
/// 7. otherwise → song
#[allow(clippy::if_same_then_else)]
pub fn infer_kind(ids: &ItemIds, subtitle: &str, vocabulary: &Vocabulary) -> ItemKind {
    let browse_id = ids.browse_id.as_deref();
    if browse_id.is_some_and(|b| ALBUM_BROWSE_PREFIXES.iter().any(|p| b.starts_with(p))) {
        ItemKind::Album
    } else if vocabulary.is_album(subtitle) {
        ItemKind::Album
    } else if vocabulary.is_playlist(subtitle) {
        ItemKind::Playlist
    } else if ids.playlist_id.is_some() && ids.video_id.is_none() {
        ItemKind::Playlist
    } else if browse_id.is_some() {
        ItemKind::Playlist
    } else if ids.playlist_id.is_some() && ids.video_id.is_some() {
        ItemKind::Playlist
    } else {
        ItemKind::Song
    }
}

/// Pick a card-sized thumbnail URL.
///
/// The widest candidate within 200–400 px wins; failing that, the widest
/// overall. Ties keep the earlier candidate. No candidates → empty string.
pub fn best_thumbnail(thumbnails: &[Value]) -> String {
    let width = |t: &Value| t["width"].as_u64().unwrap_or(0);
    let mut widest: Option<&Value> = None;
    let mut in_band: Option<&Value> = None;
    for t in thumbnails {
        let w = width(t);
        if widest.is_none_or(|best| w > width(best)) {
            widest = Some(t);
        }
        if THUMBNAIL_BAND.contains(&w) && in_band.is_none_or(|best| w > width(best)) {
            in_band = Some(t);
        }
    }
    in_band
        .or(widest)
        .and_then(|t| t["url"].as_str())
        .unwrap_or_default()
        .to_owned()
}

// ── home ──

/// Parse a `browse` response for `FEmusic_home` into shelves.
///
/// ```text
/// contents.singleColumnBrowseResultsRenderer.tabs[0].tabRenderer.content
///   .sectionListRenderer.contents[].musicCarouselShelfRenderer
///     header.musicCarouselShelfBasicHeaderRenderer.title.runs[0].text
///     contents[]  (cards)
/// ```
///
/// Shelves without any recognizable card are left out.
pub fn home(data: &Value, vocabulary: &Vocabulary) -> Vec<Shelf> {
    if !data.is_object() {
        log::warn!("[Parse] home: response root is not an object");
        return vec![];
    }
    let Some(sections) = first_tab_sections(&data["contents"]["singleColumnBrowseResultsRenderer"])
    else {
        log::debug!("[Parse] home: no section list in response");
        return vec![];
    };
    sections
        .iter()
        .filter_map(|section| carousel_shelf(section, vocabulary))
        .collect()
}

fn carousel_shelf(section: &Value, vocabulary: &Vocabulary) -> Option<Shelf> {
    let shelf = object(&section["musicCarouselShelfRenderer"])
        .or_else(|| object(&section["musicImmersiveCarouselShelfRenderer"]))?;
    let title = first_run(&shelf["header"]["musicCarouselShelfBasicHeaderRenderer"]["title"])
        .unwrap_or(DEFAULT_SHELF_TITLE)
        .to_owned();
    let items: Vec<MediaItem> = array(&shelf["contents"])
        .iter()
        .filter_map(|card| media_item(card, vocabulary))
        .collect();
    (!items.is_empty()).then_some(Shelf { title, items })
}

// ── search ──

/// Parse a `search` response into song rows.
///
/// ```text
/// contents.tabbedSearchResultsRenderer.tabs[0].tabRenderer.content
///   .sectionListRenderer.contents[].musicShelfRenderer.contents[]
///     .musicResponsiveListItemRenderer
/// ```
pub fn search(data: &Value) -> Vec<MediaItem> {
    if !data.is_object() {
        log::warn!("[Parse] search: response root is not an object");
        return vec![];
    }
    let Some(sections) = first_tab_sections(&data["contents"]["tabbedSearchResultsRenderer"]) else {
        log::debug!("[Parse] search: no section list in response");
        return vec![];
    };
    sections
        .iter()
        .filter_map(|section| object(&section["musicShelfRenderer"]))
        .flat_map(|shelf| array(&shelf["contents"]))
        .filter_map(|row| list_row(&row["musicResponsiveListItemRenderer"]))
        .collect()
}

// ── playlist / album ──

type HeaderShape = fn(&Value) -> Option<&Value>;
type TrackContainer = fn(&Value) -> Option<&[Value]>;

/// Known header layouts, in the order they are tried.
const HEADER_SHAPES: [(&str, HeaderShape); 6] = [
    ("immersive", immersive_header),
    ("detail", detail_header),
    ("editable", editable_header),
    ("visual", visual_header),
    ("responsive", responsive_header),
    ("two-column", two_column_header),
];

/// Known track-list containers, in the order they are tried.
const TRACK_CONTAINERS: [(&str, TrackContainer); 3] = [
    ("single-column", single_column_sections),
    ("secondary", secondary_sections),
    ("two-column", two_column_sections),
];

/// Parse a `browse` response for a playlist or album page.
///
/// Header and tracks are located independently: each known layout is tried
/// in turn. A page matching none of them yields an empty header and no
/// tracks. Only a response that is not a JSON object at all is reported,
/// through [`PlaylistDetail::error`].
pub fn playlist(data: &Value) -> PlaylistDetail {
    if !data.is_object() {
        log::warn!("[Parse] playlist: response root is not an object");
        return PlaylistDetail::failed("unexpected response: root is not an object");
    }

    let mut detail = PlaylistDetail::default();

    match HEADER_SHAPES
        .iter()
        .find_map(|(name, shape)| shape(data).map(|header| (name, header)))
    {
        Some((name, header)) => {
            log::debug!("[Parse] playlist: header shape `{name}`");
            detail.title = first_run(&header["title"]).unwrap_or_default().to_owned();
            detail.subtitle = runs(&header["subtitle"])
                .or_else(|| runs(&header["straplineTextOne"]))
                .map(join_runs)
                .unwrap_or_default();
            let thumbnail = &header["thumbnail"];
            let candidates = [
                &thumbnail["musicThumbnailRenderer"]["thumbnail"]["thumbnails"],
                &thumbnail["croppedSquareThumbnailRenderer"]["thumbnail"]["thumbnails"],
                &thumbnail["thumbnails"],
            ];
            let thumbnails = candidates
                .into_iter()
                .find_map(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();
            detail.thumbnail_url = best_thumbnail(thumbnails);
        }
        None => log::debug!("[Parse] playlist: no known header shape"),
    }

    detail.tracks = TRACK_CONTAINERS
        .iter()
        .filter_map(|(name, container)| container(data).map(|sections| (name, sections)))
        .map(|(name, sections)| (name, shelf_tracks(sections)))
        .find(|(_, tracks)| !tracks.is_empty())
        .map(|(name, tracks)| {
            log::debug!("[Parse] playlist: {} tracks in `{name}` container", tracks.len());
            tracks
        })
        .unwrap_or_default();

    detail
}

fn immersive_header(data: &Value) -> Option<&Value> {
    object(&data["header"]["musicImmersiveHeaderRenderer"])
}

fn detail_header(data: &Value) -> Option<&Value> {
    object(&data["header"]["musicDetailHeaderRenderer"])
}

fn editable_header(data: &Value) -> Option<&Value> {
    let editable = &data["header"]["musicEditablePlaylistDetailHeaderRenderer"];
    object(&editable["header"]["musicDetailHeaderRenderer"])
}

fn visual_header(data: &Value) -> Option<&Value> {
    object(&data["header"]["musicVisualHeaderRenderer"])
}

fn responsive_header(data: &Value) -> Option<&Value> {
    object(&data["header"]["musicResponsiveHeaderRenderer"])
}

/// Newer layout: the header is the first section of the main tab.
fn two_column_header(data: &Value) -> Option<&Value> {
    let first = two_column_sections(data)?.first()?;
    let editable = &first["musicEditablePlaylistDetailHeaderRenderer"];
    object(&first["musicResponsiveHeaderRenderer"])
        .or_else(|| object(&editable["header"]["musicResponsiveHeaderRenderer"]))
}

fn single_column_sections(data: &Value) -> Option<&[Value]> {
    first_tab_sections(&data["contents"]["singleColumnBrowseResultsRenderer"])
}

fn secondary_sections(data: &Value) -> Option<&[Value]> {
    data["contents"]["twoColumnBrowseResultsRenderer"]["secondaryContents"]["sectionListRenderer"]
        ["contents"]
        .as_array()
        .map(Vec::as_slice)
}

fn two_column_sections(data: &Value) -> Option<&[Value]> {
    first_tab_sections(&data["contents"]["twoColumnBrowseResultsRenderer"])
}

fn shelf_tracks(sections: &[Value]) -> Vec<MediaItem> {
    sections
        .iter()
        .filter_map(|section| {
            object(&section["musicShelfRenderer"])
                .or_else(|| object(&section["musicPlaylistShelfRenderer"]))
        })
        .flat_map(|shelf| array(&shelf["contents"]))
        .filter_map(|row| list_row(&row["musicResponsiveListItemRenderer"]))
        .collect()
}

// ── cards ──

/// The two renderers that both mean "a media item".
enum Card<'a> {
    TwoRow(&'a Value),
    ListRow(&'a Value),
}

impl<'a> Card<'a> {
    fn detect(card: &'a Value) -> Option<Self> {
        object(&card["musicTwoRowItemRenderer"])
            .map(Card::TwoRow)
            .or_else(|| object(&card["musicResponsiveListItemRenderer"]).map(Card::ListRow))
    }
}

fn media_item(card: &Value, vocabulary: &Vocabulary) -> Option<MediaItem> {
    match Card::detect(card)? {
        Card::TwoRow(renderer) => two_row(renderer, vocabulary),
        Card::ListRow(renderer) => list_row(renderer),
    }
}

fn two_row(renderer: &Value, vocabulary: &Vocabulary) -> Option<MediaItem> {
    let title = first_run(&renderer["title"]).filter(|t| !t.is_empty())?;
    let subtitle = runs(&renderer["subtitle"]).map(join_runs).unwrap_or_default();
    let thumbnail_url = best_thumbnail(array(
        &renderer["thumbnailRenderer"]["musicThumbnailRenderer"]["thumbnail"]["thumbnails"],
    ));

    let nav = &renderer["navigationEndpoint"];
    let ids = ItemIds {
        video_id: id(&nav["watchEndpoint"]["videoId"]),
        playlist_id: id(&nav["watchEndpoint"]["playlistId"])
            .or_else(|| id(&nav["watchPlaylistEndpoint"]["playlistId"])),
        browse_id: id(&nav["browseEndpoint"]["browseId"]).or_else(|| menu_browse_id(renderer)),
    };
    let kind = infer_kind(&ids, &subtitle, vocabulary);

    Some(MediaItem {
        title: title.to_owned(),
        subtitle,
        thumbnail_url,
        video_id: ids.video_id,
        playlist_id: ids.playlist_id,
        browse_id: ids.browse_id,
        kind,
    })
}

/// First browse id offered by the card's context menu ("Go to album" etc.).
fn menu_browse_id(renderer: &Value) -> Option<String> {
    array(&renderer["menu"]["menuRenderer"]["items"])
        .iter()
        .find_map(|item| {
            id(&item["menuNavigationItemRenderer"]["navigationEndpoint"]["browseEndpoint"]["browseId"])
        })
}

/// A song row. Rows without a title are dropped.
fn list_row(renderer: &Value) -> Option<MediaItem> {
    let columns = &renderer["flexColumns"];
    let title_text = &columns[0]["musicResponsiveListItemFlexColumnRenderer"]["text"];
    let title = first_run(title_text).filter(|t| !t.is_empty())?;
    let subtitle = runs(&columns[1]["musicResponsiveListItemFlexColumnRenderer"]["text"])
        .map(join_runs)
        .unwrap_or_default();
    let thumbnail_url = best_thumbnail(array(
        &renderer["thumbnail"]["musicThumbnailRenderer"]["thumbnail"]["thumbnails"],
    ));

    let play_button = &renderer["overlay"]["musicItemThumbnailOverlayRenderer"]["content"]
        ["musicPlayButtonRenderer"];
    let video_id = id(&play_button["playNavigationEndpoint"]["watchEndpoint"]["videoId"])
        .or_else(|| id(&renderer["playlistItemData"]["videoId"]))
        .or_else(|| id(&title_text["runs"][0]["navigationEndpoint"]["watchEndpoint"]["videoId"]));

    Some(MediaItem {
        title: title.to_owned(),
        subtitle,
        thumbnail_url,
        video_id,
        playlist_id: None,
        browse_id: None,
        kind: ItemKind::Song,
    })
}

// ── helpers ──

fn object(v: &Value) -> Option<&Value> {
    v.is_object().then_some(v)
}

fn array(v: &Value) -> &[Value] {
    v.as_array().map(Vec::as_slice).unwrap_or_default()
}

fn first_tab_sections(results: &Value) -> Option<&[Value]> {
    results["tabs"][0]["tabRenderer"]["content"]["sectionListRenderer"]["contents"]
        .as_array()
        .map(Vec::as_slice)
}

fn runs(text: &Value) -> Option<&[Value]> {
    text["runs"].as_array().map(Vec::as_slice)
}

fn first_run(text: &Value) -> Option<&str> {
    text["runs"][0]["text"].as_str()
}

fn join_runs(runs: &[Value]) -> String {
    runs.iter().filter_map(|r| r["text"].as_str()).collect()
}

fn id(v: &Value) -> Option<String> {
    v.as_str().filter(|s| !s.is_empty()).map(String::from)
}
