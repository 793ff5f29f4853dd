//! Playlist and album pages.
//!
//! Endpoint: `POST /youtubei/v1/browse`
//!
//! Request:
//! ```json
//! { "context": { "client": {...} }, "browseId": "MPREb_..." }
//! ```
//!
//! Albums use their `MPREb_` browse id directly. A raw playlist id has no
//! page of its own and must be prefixed with `VL` first; see
//! [`playlist_browse_id`](crate::types::playlist_browse_id) and
//! [`MediaItem::browse_target`](crate::types::MediaItem::browse_target).
//!
//! The page layout differs between albums, curated playlists, user
//! playlists and "visual" pages; [`parse::playlist`] tries each known one.

use crate::auth::AuthContext;
use crate::client::{Endpoint, YtMusicClient};
use crate::config::ClientContext;
use crate::error::Result;
use crate::parse;
use crate::types::PlaylistDetail;
use serde_json::{Value, json};

impl YtMusicClient {
    /// Get the header and tracks of a playlist or album page.
    ///
    /// # Errors
    ///
    /// Transport and decoding errors from [`request`](Self::request). An
    /// unrecognized page layout is not an error: the detail comes back with
    /// empty fields.
    pub fn playlist_or_album(&self, auth: &AuthContext, browse_id: &str) -> Result<PlaylistDetail> {
        let body = browse_body(&self.config().context, browse_id);
        let resp = self.request(Endpoint::Browse, &body, auth)?;
        let detail = parse::playlist(&resp);
        log::debug!("[Playlist] {browse_id}: {} tracks", detail.tracks.len());
        Ok(detail)
    }
}

fn browse_body(context: &ClientContext, browse_id: &str) -> Value {
    json!({ "context": context, "browseId": browse_id })
}
