//! Home feed.
//!
//! Endpoint: `POST /youtubei/v1/browse`
//!
//! Request:
//! ```json
//! { "context": { "client": {...} }, "browseId": "FEmusic_home" }
//! ```
//!
//! The response is a single-column page whose sections are carousels
//! ("Quick picks", "Mixed for you", ...). See [`parse::home`] for the layout.

use crate::auth::AuthContext;
use crate::client::{Endpoint, YtMusicClient};
use crate::config::ClientContext;
use crate::error::Result;
use crate::parse;
use crate::types::Shelf;
use serde_json::{Value, json};

const HOME_BROWSE_ID: &str = "FEmusic_home";

impl YtMusicClient {
    /// Fetch the home feed as an ordered list of shelves.
    ///
    /// Requires a logged-in session for personalized content. A response
    /// without the expected containers gives an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Transport and decoding errors from [`request`](Self::request).
    pub fn home(&self, auth: &AuthContext) -> Result<Vec<Shelf>> {
        let body = home_body(&self.config().context);
        let resp = self.request(Endpoint::Browse, &body, auth)?;
        let shelves = parse::home(&resp, &self.config().vocabulary);
        log::debug!("[Home] {} shelves", shelves.len());
        Ok(shelves)
    }
}

fn home_body(context: &ClientContext) -> Value {
    json!({ "context": context, "browseId": HOME_BROWSE_ID })
}
