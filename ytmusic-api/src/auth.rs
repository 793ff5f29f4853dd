//! Session cookies and the derived auth context.
//!
//! YouTube Music has no API key login; the web client is authorized by the
//! Google session cookies of a logged-in browser. Two things are derived from
//! them for every request:
//!
//! - the `Cookie` header (all cookies under `youtube.com`), and
//! - the signing key for `SAPISIDHASH` (see [`sign`](crate::sign)), taken from
//!   `__Secure-3PAPISID`, or the legacy `SAPISID` if the former is missing.
//!
//! Cookies are supplied by any [`CookieStore`]. [`CookieJar`] is a simple
//! store persisted at `~/.config/ytmusic/cookies.json`:
//!
//! ```json
//! [
//!   { "name": "SAPISID", "value": "AbCd/EfGh", "domain": ".youtube.com" },
//!   { "name": "__Secure-3PAPISID", "value": "AbCd/EfGh", "domain": ".youtube.com" }
//! ]
//! ```
//!
//! The easiest way to fill it is [`CookieJar::from_cookie_header`] with the
//! `Cookie` request header copied from browser developer tools → Network on
//! `music.youtube.com`.

use crate::error::{Result, YtMusicError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root domain whose cookies authorize API calls.
pub const ROOT_DOMAIN: &str = "youtube.com";

/// Signing-key cookie names, most preferred first.
const SIGNING_COOKIES: [&str; 2] = ["__Secure-3PAPISID", "SAPISID"];

/// A single browser cookie. Only name, value and scope are tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    /// Scope, e.g. `.youtube.com` or `music.youtube.com`.
    pub domain: String,
}

impl Cookie {
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: domain.into(),
        }
    }

    /// Whether this cookie is visible under `root` (itself or any subdomain).
    pub fn matches_domain(&self, root: &str) -> bool {
        let domain = self.domain.trim_start_matches('.');
        let root = root.trim_start_matches('.');
        domain.eq_ignore_ascii_case(root)
            || domain
                .to_ascii_lowercase()
                .ends_with(&format!(".{}", root.to_ascii_lowercase()))
    }
}

/// Source of session cookies, queried fresh for every privileged call.
pub trait CookieStore {
    /// All cookies visible under `domain`, in store order.
    fn cookies_for_domain(&self, domain: &str) -> Vec<Cookie>;
}

impl CookieStore for [Cookie] {
    fn cookies_for_domain(&self, domain: &str) -> Vec<Cookie> {
        self.iter().filter(|c| c.matches_domain(domain)).cloned().collect()
    }
}

/// Credentials derived from the session cookies.
///
/// Never persisted. Build a new one before each privileged call so a
/// removed session cookie is noticed immediately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    /// `name=value` pairs joined with `; `.
    pub cookie_header: String,
    /// Value of the preferred signing cookie, if any.
    pub signing_key: Option<String>,
}

impl AuthContext {
    /// Derive the context from cookies already scoped to the root domain.
    pub fn resolve(cookies: &[Cookie]) -> Self {
        let cookie_header = cookies
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ");

        let signing_key = SIGNING_COOKIES.iter().find_map(|name| {
            cookies
                .iter()
                .find(|c| c.name == *name)
                .map(|c| c.value.clone())
        });

        Self {
            cookie_header,
            signing_key,
        }
    }

    /// Query `store` for [`ROOT_DOMAIN`] cookies and derive the context.
    pub fn from_store<S: CookieStore + ?Sized>(store: &S) -> Self {
        Self::resolve(&store.cookies_for_domain(ROOT_DOMAIN))
    }

    /// Whether a signing cookie was found.
    ///
    /// This does not validate the session; an expired cookie still reports
    /// `true` until the service rejects a request.
    pub fn is_authenticated(&self) -> bool {
        self.signing_key.is_some()
    }

    /// Return `self` if authenticated, [`YtMusicError::NotLoggedIn`] otherwise.
    pub fn require(self) -> Result<Self> {
        if self.is_authenticated() {
            Ok(self)
        } else {
            Err(YtMusicError::NotLoggedIn)
        }
    }
}

/// Cookie store backed by a JSON file on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CookieJar {
    cookies: Vec<Cookie>,
}

impl CookieJar {
    pub fn new(cookies: Vec<Cookie>) -> Self {
        Self { cookies }
    }

    /// Import a `Cookie` header (`a=1; b=2`) copied from a browser.
    ///
    /// Every cookie is scoped to `domain`. Malformed pairs without `=` are
    /// skipped; a later duplicate name replaces the earlier value.
    pub fn from_cookie_header(header: &str, domain: &str) -> Self {
        let mut jar = Self::default();
        for pair in header.split(';') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            jar.insert(Cookie::new(name, value.trim(), domain));
        }
        jar
    }

    /// Insert or replace a cookie with the same name and domain.
    pub fn insert(&mut self, cookie: Cookie) {
        if let Some(existing) = self
            .cookies
            .iter_mut()
            .find(|c| c.name == cookie.name && c.domain == cookie.domain)
        {
            existing.value = cookie.value;
        } else {
            self.cookies.push(cookie);
        }
    }

    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Load the jar from `~/.config/ytmusic/cookies.json`.
    ///
    /// Returns an empty jar if the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Save the jar to `~/.config/ytmusic/cookies.json`.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Delete the jar file from disk.
    pub fn clear() -> Result<()> {
        let path = Self::path()?;
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Write the jar to `path`, creating parent directories if needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    fn path() -> Result<PathBuf> {
        let config = dirs::config_dir()
            .ok_or_else(|| YtMusicError::Other("cannot determine config directory".into()))?;
        Ok(config.join("ytmusic").join("cookies.json"))
    }
}

impl CookieStore for CookieJar {
    fn cookies_for_domain(&self, domain: &str) -> Vec<Cookie> {
        self.cookies.as_slice().cookies_for_domain(domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yt(name: &str, value: &str) -> Cookie {
        Cookie::new(name, value, ".youtube.com")
    }

    #[test]
    fn prefers_secure_partitioned_cookie() {
        let cookies = [yt("SAPISID", "legacy"), yt("__Secure-3PAPISID", "secure")];
        let auth = AuthContext::resolve(&cookies);
        assert!(auth.is_authenticated());
        assert_eq!(auth.signing_key.as_deref(), Some("secure"));
    }

    #[test]
    fn falls_back_to_legacy_cookie() {
        let cookies = [yt("HSID", "h"), yt("SAPISID", "legacy")];
        let auth = AuthContext::resolve(&cookies);
        assert_eq!(auth.signing_key.as_deref(), Some("legacy"));
    }

    #[test]
    fn unauthenticated_without_session_cookie() {
        let cookies = [yt("PREF", "f6=40000000"), yt("VISITOR_INFO1_LIVE", "x")];
        let auth = AuthContext::resolve(&cookies);
        assert!(!auth.is_authenticated());
        assert_eq!(auth.signing_key, None);
        assert!(matches!(auth.require(), Err(YtMusicError::NotLoggedIn)));
    }

    #[test]
    fn cookie_header_joins_pairs_in_order() {
        let cookies = [yt("A", "1"), yt("B", "two"), yt("SAPISID", "s")];
        let auth = AuthContext::resolve(&cookies);
        assert_eq!(auth.cookie_header, "A=1; B=two; SAPISID=s");
    }

    #[test]
    fn empty_store_gives_empty_context() {
        let auth = AuthContext::from_store(&CookieJar::default());
        assert_eq!(auth, AuthContext::default());
    }

    #[test]
    fn domain_matching() {
        assert!(Cookie::new("a", "1", ".youtube.com").matches_domain(ROOT_DOMAIN));
        assert!(Cookie::new("a", "1", "music.youtube.com").matches_domain(ROOT_DOMAIN));
        assert!(Cookie::new("a", "1", "YouTube.com").matches_domain(ROOT_DOMAIN));
        assert!(!Cookie::new("a", "1", ".google.com").matches_domain(ROOT_DOMAIN));
        assert!(!Cookie::new("a", "1", "notyoutube.com").matches_domain(ROOT_DOMAIN));
    }

    #[test]
    fn from_store_ignores_foreign_domains() {
        let jar = CookieJar::new(vec![
            Cookie::new("SAPISID", "google", ".google.com"),
            yt("PREF", "x"),
        ]);
        let auth = AuthContext::from_store(&jar);
        assert!(!auth.is_authenticated());
        assert_eq!(auth.cookie_header, "PREF=x");
    }

    #[test]
    fn import_cookie_header() {
        let jar = CookieJar::from_cookie_header(
            "PREF=a=b; SAPISID=abc/def ;junk; =x; __Secure-3PAPISID=sec",
            ".youtube.com",
        );
        let names: Vec<&str> = jar.cookies().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["PREF", "SAPISID", "__Secure-3PAPISID"]);
        assert_eq!(jar.cookies()[0].value, "a=b");
        assert_eq!(jar.cookies()[1].value, "abc/def");

        let auth = AuthContext::from_store(&jar);
        assert_eq!(auth.signing_key.as_deref(), Some("sec"));
    }

    #[test]
    fn insert_replaces_same_name() {
        let mut jar = CookieJar::default();
        jar.insert(yt("SAPISID", "old"));
        jar.insert(yt("SAPISID", "new"));
        assert_eq!(jar.cookies().len(), 1);
        assert_eq!(jar.cookies()[0].value, "new");
    }

    #[test]
    fn jar_file_roundtrip() {
        let dir = std::env::temp_dir().join(format!("ytmusic-jar-{}", std::process::id()));
        let path = dir.join("nested").join("cookies.json");
        let jar = CookieJar::from_cookie_header("SAPISID=s; HSID=h", ".youtube.com");
        jar.save_to(&path).unwrap();
        let loaded = CookieJar::load_from(&path).unwrap();
        assert_eq!(loaded, jar);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_jar_file_is_empty() {
        let path = std::env::temp_dir().join("ytmusic-does-not-exist/cookies.json");
        assert!(CookieJar::load_from(&path).unwrap().is_empty());
    }
}
