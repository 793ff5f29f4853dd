//! Client configuration.
//!
//! Everything here is fixed for the lifetime of a [`YtMusicClient`](crate::YtMusicClient):
//! endpoints, timeout, the `context` object sent with every request, and the
//! vocabulary used to classify cards by their subtitle text.

use serde::Serialize;
use std::time::Duration;

/// Web origin of the service; used for `Origin`/`Referer` and in the signature.
pub const ORIGIN: &str = "https://music.youtube.com";
/// Base URL of the private `youtubei` API.
pub const API_BASE: &str = "https://music.youtube.com/youtubei/v1";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const CLIENT_NAME: &str = "WEB_REMIX";
const CLIENT_VERSION: &str = "1.20241023.01.00";

/// The `context` object identifying the calling client.
///
/// Serializes to
///
/// ```json
/// { "client": { "clientName": "WEB_REMIX", "clientVersion": "1.20241023.01.00", "hl": "en", "gl": "US" } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientContext {
    pub client: ClientInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub client_name: String,
    pub client_version: String,
    /// UI language, e.g. `en`, `tr`.
    pub hl: String,
    /// Content region, e.g. `US`, `TR`.
    pub gl: String,
}

impl ClientContext {
    /// Web client context with the given language and region.
    pub fn web(hl: &str, gl: &str) -> Self {
        Self {
            client: ClientInfo {
                client_name: CLIENT_NAME.to_owned(),
                client_version: CLIENT_VERSION.to_owned(),
                hl: hl.to_owned(),
                gl: gl.to_owned(),
            },
        }
    }
}

impl Default for ClientContext {
    fn default() -> Self {
        Self::web("en", "US")
    }
}

/// Subtitle terms that mark a card as an album or a playlist.
///
/// Subtitles are localized (`hl`), so the lists must cover every UI
/// language in use. Terms are matched case-insensitively as whole words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    pub album: Vec<String>,
    pub playlist: Vec<String>,
}

impl Vocabulary {
    pub fn is_album(&self, subtitle: &str) -> bool {
        contains_any(subtitle, &self.album)
    }

    pub fn is_playlist(&self, subtitle: &str) -> bool {
        contains_any(subtitle, &self.playlist)
    }

    /// Add terms for another UI language.
    #[must_use]
    pub fn with_terms<A, P>(mut self, album: A, playlist: P) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        self.album.extend(album.into_iter().map(Into::into));
        self.playlist.extend(playlist.into_iter().map(Into::into));
        self
    }
}

impl Default for Vocabulary {
    /// English and Turkish terms.
    fn default() -> Self {
        Self {
            album: vec![],
            playlist: vec![],
        }
        .with_terms(
            ["album", "albüm", "ep", "single"],
            ["playlist", "çalma listesi", "mix"],
        )
    }
}

fn contains_any(text: &str, terms: &[String]) -> bool {
    let text = text.to_lowercase();
    terms
        .iter()
        .any(|term| contains_word(&text, &term.to_lowercase()))
}

/// Whether `needle` occurs in `haystack` not glued to other letters or digits.
fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(start, _)| {
        let end = start + needle.len();
        let before = haystack[..start].chars().next_back();
        let after = haystack[end..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// Settings for [`YtMusicClient`](crate::YtMusicClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL the endpoint paths (`/browse`, `/search`) are appended to.
    pub api_base: String,
    /// Origin used for `Origin`, `X-Origin`, `Referer` and the signature.
    pub origin: String,
    pub user_agent: String,
    /// Ceiling for one complete request/response exchange.
    pub timeout: Duration,
    pub context: ClientContext,
    pub vocabulary: Vocabulary,
    /// Honour `HTTP(S)_PROXY` from the environment.
    pub system_proxy: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: API_BASE.to_owned(),
            origin: ORIGIN.to_owned(),
            user_agent: USER_AGENT.to_owned(),
            timeout: Duration::from_secs(15),
            context: ClientContext::default(),
            vocabulary: Vocabulary::default(),
            system_proxy: true,
        }
    }
}
