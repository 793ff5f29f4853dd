//! HTTP transport for the YouTube Music `youtubei/v1` API.
//!
//! Every call is a JSON `POST` to `https://music.youtube.com/youtubei/v1/{endpoint}`:
//!
//! 1. Body: `{ "context": { "client": {...} }, ...endpoint parameters }`
//! 2. Headers: browser-like `User-Agent`, `Origin`/`X-Origin`/`Referer` set to
//!    the web origin, the session `Cookie`, `X-Goog-AuthUser: 0`
//! 3. If a signing key is known: `Authorization: SAPISIDHASH {ts}_{sha1}`
//!
//! The response body is JSON on success. Errors come back as a non-2xx
//! status with an envelope like:
//!
//! ```json
//! { "error": { "code": 401, "message": "Request is missing required authentication credential.", "status": "UNAUTHENTICATED" } }
//! ```
//!
//! which is mapped to [`YtMusicError::Rejected`](crate::YtMusicError::Rejected).

use crate::auth::AuthContext;
use crate::config::ClientConfig;
use crate::error::{Result, YtMusicError};
use crate::sign::sapisid_hash_now;
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, ORIGIN, REFERER};
use serde_json::Value;

/// Longest body prefix quoted in error messages.
const SNIPPET_LEN: usize = 200;

/// `youtubei/v1` endpoints used by this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Browse,
    Search,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Self::Browse => "browse",
            Self::Search => "search",
        }
    }
}

/// Blocking client for the YouTube Music API.
///
/// Holds a [`reqwest::blocking::Client`] and the [`ClientConfig`]; no session
/// state. Credentials are passed per call as an [`AuthContext`] so the caller
/// can rebuild them from its cookie store each time. API methods are
/// implemented in separate modules (`home`, `search`, `playlist`) as
/// `impl YtMusicClient` blocks.
pub struct YtMusicClient {
    http: Client,
    config: ClientConfig,
}

impl YtMusicClient {
    /// Create a client with the default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with an explicit [`ClientConfig`] (language, timeout,
    /// vocabulary, or a different base URL for testing).
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout);
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// POST `body` to `endpoint` and return the decoded JSON response.
    ///
    /// The request is signed only when `auth` carries a signing key. No
    /// retries are made.
    ///
    /// # Errors
    ///
    /// - [`YtMusicError::Timeout`] — no complete response within the timeout
    /// - [`YtMusicError::Http`] — DNS, connection or TLS failure
    /// - [`YtMusicError::Rejected`] — non-2xx status
    /// - [`YtMusicError::Parse`] — body is not JSON
    pub fn request(&self, endpoint: Endpoint, body: &Value, auth: &AuthContext) -> Result<Value> {
        let url = format!("{}/{}", self.config.api_base.trim_end_matches('/'), endpoint.path());
        let origin = self.config.origin.as_str();
        log::debug!("[Client] POST {url} (signed: {})", auth.is_authenticated());

        let mut req = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header("X-Origin", origin)
            .header(ORIGIN, origin)
            .header(REFERER, format!("{origin}/"))
            .header(COOKIE, auth.cookie_header.as_str())
            .header("X-Goog-AuthUser", "0");

        if let Some(key) = auth.signing_key.as_deref() {
            req = req.header(AUTHORIZATION, sapisid_hash_now(key, origin));
        }

        let resp = req.body(body.to_string()).send().map_err(|e| self.transport_error(e))?;
        let status = resp.status();
        let text = resp.text().map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            log::warn!("[Client] {url} answered HTTP {status}");
            return Err(YtMusicError::Rejected {
                status: status.as_u16(),
                message: rejection_message(&text),
            });
        }

        serde_json::from_str(&text).map_err(|source| YtMusicError::Parse {
            snippet: snippet(&text),
            source,
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> YtMusicError {
        if e.is_timeout() {
            YtMusicError::Timeout(self.config.timeout)
        } else {
            YtMusicError::Http(e)
        }
    }
}

/// `error.message` from the JSON error envelope, else a body snippet.
fn rejection_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(String::from))
        .unwrap_or_else(|| snippet(body))
}

/// At most the first [`SNIPPET_LEN`] characters of `body`.
fn snippet(body: &str) -> String {
    body.chars().take(SNIPPET_LEN).collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    /// A request as seen by [`serve_once`].
    pub(crate) struct Captured {
        pub request_line: String,
        pub headers: Vec<(String, String)>,
        pub body: String,
    }

    impl Captured {
        pub fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str())
        }
    }

    fn read_request(stream: &TcpStream) -> Captured {
        let mut reader = BufReader::new(stream);
        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        let mut headers = Vec::new();
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            let (k, v) = line.split_once(':').unwrap();
            headers.push((k.trim().to_owned(), v.trim().to_owned()));
        }
        let len: usize = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
            .map_or(0, |(_, v)| v.parse().unwrap());
        let mut body = vec![0; len];
        reader.read_exact(&mut body).unwrap();
        Captured {
            request_line: request_line.trim_end().to_owned(),
            headers,
            body: String::from_utf8(body).unwrap(),
        }
    }

    /// Serve one HTTP response on localhost; the captured request is sent
    /// back through the returned channel.
    pub(crate) fn serve_once(status: &str, body: &str) -> (String, mpsc::Receiver<Captured>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}/youtubei/v1", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let captured = read_request(&stream);
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            tx.send(captured).unwrap();
        });
        (base, rx)
    }

    pub(crate) fn client_for(base: &str, timeout: Duration) -> YtMusicClient {
        YtMusicClient::with_config(ClientConfig {
            api_base: base.to_owned(),
            timeout,
            system_proxy: false,
            ..ClientConfig::default()
        })
        .unwrap()
    }

    fn signed_auth() -> AuthContext {
        AuthContext {
            cookie_header: "SAPISID=secret; HSID=h".into(),
            signing_key: Some("secret".into()),
        }
    }

    #[test]
    fn sends_fixed_headers_and_signature() {
        let (base, rx) = serve_once("200 OK", r#"{"ok":true}"#);
        let client = client_for(&base, Duration::from_secs(5));
        let before = chrono::Utc::now().timestamp();

        let resp = client
            .request(Endpoint::Browse, &json!({ "browseId": "FEmusic_home" }), &signed_auth())
            .unwrap();
        assert_eq!(resp, json!({ "ok": true }));

        let req = rx.recv().unwrap();
        assert_eq!(req.request_line, "POST /youtubei/v1/browse HTTP/1.1");
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("origin"), Some("https://music.youtube.com"));
        assert_eq!(req.header("x-origin"), Some("https://music.youtube.com"));
        assert_eq!(req.header("referer"), Some("https://music.youtube.com/"));
        assert_eq!(req.header("cookie"), Some("SAPISID=secret; HSID=h"));
        assert_eq!(req.header("x-goog-authuser"), Some("0"));
        assert!(req.header("user-agent").unwrap().starts_with("Mozilla/5.0"));
        assert_eq!(
            req.header("content-length"),
            Some(req.body.len().to_string().as_str())
        );

        let auth = req.header("authorization").unwrap();
        let ts: i64 = auth
            .strip_prefix("SAPISIDHASH ")
            .and_then(|rest| rest.split('_').next())
            .unwrap()
            .parse()
            .unwrap();
        assert!(ts >= before);
        assert_eq!(
            auth,
            crate::sign::sapisid_hash(ts, "secret", "https://music.youtube.com")
        );
        assert_eq!(
            serde_json::from_str::<Value>(&req.body).unwrap(),
            json!({ "browseId": "FEmusic_home" })
        );
    }

    #[test]
    fn unsigned_without_signing_key() {
        let (base, rx) = serve_once("200 OK", "{}");
        let client = client_for(&base, Duration::from_secs(5));
        let auth = AuthContext {
            cookie_header: "PREF=x".into(),
            signing_key: None,
        };
        client.request(Endpoint::Search, &json!({}), &auth).unwrap();
        let req = rx.recv().unwrap();
        assert_eq!(req.request_line, "POST /youtubei/v1/search HTTP/1.1");
        assert_eq!(req.header("authorization"), None);
        assert_eq!(req.header("cookie"), Some("PREF=x"));
    }

    #[test]
    fn malformed_json_reports_bounded_snippet() {
        let body = format!("<!DOCTYPE html>{}", "x".repeat(5000));
        let (base, _rx) = serve_once("200 OK", &body);
        let client = client_for(&base, Duration::from_secs(5));
        let err = client
            .request(Endpoint::Browse, &json!({}), &AuthContext::default())
            .unwrap_err();
        match err {
            YtMusicError::Parse { snippet, .. } => {
                assert_eq!(snippet.chars().count(), SNIPPET_LEN);
                assert!(snippet.starts_with("<!DOCTYPE html>"));
            }
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn non_success_status_is_rejected() {
        let body = r#"{"error":{"code":401,"message":"Request is missing required authentication credential.","status":"UNAUTHENTICATED"}}"#;
        let (base, _rx) = serve_once("401 Unauthorized", body);
        let client = client_for(&base, Duration::from_secs(5));
        let err = client
            .request(Endpoint::Browse, &json!({}), &AuthContext::default())
            .unwrap_err();
        match err {
            YtMusicError::Rejected { status, message } => {
                assert_eq!(status, 401);
                assert!(message.starts_with("Request is missing"));
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}/youtubei/v1", listener.local_addr().unwrap());
        let (closed_tx, closed_rx) = mpsc::channel();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let _ = read_request(&stream);
            // Never answer; wait for the client to hang up.
            let mut buf = [0u8; 1];
            let n = stream.read(&mut buf).unwrap_or(0);
            closed_tx.send(n).unwrap();
        });

        let timeout = Duration::from_millis(300);
        let client = client_for(&base, timeout);
        let err = client
            .request(Endpoint::Browse, &json!({}), &signed_auth())
            .unwrap_err();
        assert!(matches!(err, YtMusicError::Timeout(t) if t == timeout));

        // The connection is aborted once the client is dropped.
        drop(client);
        let n = closed_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(n, 0);
    }

    #[test]
    fn connection_refused_is_http_error() {
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let client = client_for(&format!("http://{addr}"), Duration::from_secs(5));
        let err = client
            .request(Endpoint::Browse, &json!({}), &AuthContext::default())
            .unwrap_err();
        assert!(matches!(err, YtMusicError::Http(_)));
    }

    #[test]
    fn snippet_is_char_safe() {
        let body = "ü".repeat(300);
        let s = snippet(&body);
        assert_eq!(s.chars().count(), SNIPPET_LEN);
        assert_eq!(snippet("short"), "short");
    }
}
