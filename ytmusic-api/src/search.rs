//! Song search.
//!
//! Endpoint: `POST /youtubei/v1/search`
//!
//! Request:
//! ```json
//! { "context": { "client": {...} }, "query": "daft punk", "params": "EgWKAQIIAWoMEAMQBBAJEA4QChAF" }
//! ```
//!
//! `params` is the service's own opaque filter token for the "Songs" tab.
//! It is sent verbatim; only the first page of results is read.

use crate::auth::AuthContext;
use crate::client::{Endpoint, YtMusicClient};
use crate::config::ClientContext;
use crate::error::Result;
use crate::parse;
use crate::types::MediaItem;
use serde_json::{Value, json};

/// Filter token restricting results to songs.
const SONGS_FILTER: &str = "EgWKAQIIAWoMEAMQBBAJEA4QChAF";

impl YtMusicClient {
    /// Search for songs.
    ///
    /// Returns the first page of results as song items, in service order.
    ///
    /// # Errors
    ///
    /// Transport and decoding errors from [`request`](Self::request).
    pub fn search(&self, auth: &AuthContext, query: &str) -> Result<Vec<MediaItem>> {
        let body = search_body(&self.config().context, query);
        let resp = self.request(Endpoint::Search, &body, auth)?;
        let items = parse::search(&resp);
        log::debug!("[Search] {:?}: {} results", query, items.len());
        Ok(items)
    }
}

fn search_body(context: &ClientContext, query: &str) -> Value {
    json!({ "context": context, "query": query, "params": SONGS_FILTER })
}
