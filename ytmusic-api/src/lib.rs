//! YouTube Music private API client library.
//!
//! Talks to the `youtubei/v1` JSON API used by the `music.youtube.com` web
//! client: home feed, song search, and playlist/album pages. The API has no
//! published schema; responses are normalized into a few stable types
//! ([`Shelf`](types::Shelf), [`MediaItem`](types::MediaItem),
//! [`PlaylistDetail`](types::PlaylistDetail)) by tolerant parsers that
//! degrade to empty values instead of failing.
//!
//! # Authentication
//!
//! Calls are authorized by the cookies of a logged-in browser session. An
//! [`AuthContext`](auth::AuthContext) is derived from any
//! [`CookieStore`](auth::CookieStore) before each call; the client itself
//! holds no session.
//!
//! ```no_run
//! use ytmusic_api::auth::{AuthContext, CookieJar};
//! use ytmusic_api::YtMusicClient;
//!
//! // Import the Cookie header copied from the browser
//! let jar = CookieJar::from_cookie_header("SAPISID=...; __Secure-3PAPISID=...", ".youtube.com");
//! jar.save().unwrap();
//!
//! let auth = AuthContext::from_store(&jar).require().unwrap();
//! let client = YtMusicClient::new().unwrap();
//! for shelf in client.home(&auth).unwrap() {
//!     println!("{} ({} items)", shelf.title, shelf.items.len());
//! }
//! ```
//!
//! # API endpoint mapping
//!
//! | Method                                   | Endpoint  | Description              |
//! |------------------------------------------|-----------|--------------------------|
//! | [`YtMusicClient::home`]                  | `/browse` | Home feed shelves        |
//! | [`YtMusicClient::search`]                | `/search` | Song search (first page) |
//! | [`YtMusicClient::playlist_or_album`]     | `/browse` | Playlist/album tracks    |
//!
//! # Signing
//!
//! Requests carry `Authorization: SAPISIDHASH {ts}_{sha1}` when a signing
//! cookie is present. See [`sign`].

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
mod home;
pub mod parse;
mod playlist;
mod search;
pub mod sign;
pub mod types;

pub use client::YtMusicClient;
pub use error::{Result, YtMusicError};
