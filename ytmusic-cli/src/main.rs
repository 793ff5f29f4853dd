use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use ytmusic_api::auth::{AuthContext, CookieJar, ROOT_DOMAIN};
use ytmusic_api::config::{ClientConfig, ClientContext};
use ytmusic_api::types::{ItemKind, MediaItem, playlist_browse_id};
use ytmusic_api::YtMusicClient;

#[derive(Parser)]
#[command(name = "ytmusic", version, about = "YouTube Music CLI (cookie session)")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    /// UI language sent to the service
    #[arg(long, global = true, default_value = "en")]
    hl: String,
    /// Content region sent to the service
    #[arg(long, global = true, default_value = "US")]
    gl: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Save session cookies (the `Cookie` header of a logged-in browser)
    Login {
        /// Cookie header, e.g. "SAPISID=...; __Secure-3PAPISID=...; ..."
        #[arg(required_unless_present = "check")]
        cookie: Option<String>,
        /// Check current login status
        #[arg(long)]
        check: bool,
    },
    /// Clear saved session
    Logout,
    /// Show the home feed
    Home,
    /// Search for songs
    Search {
        /// Search query
        query: String,
    },
    /// Show a playlist or album
    Browse {
        /// Browse ID (e.g. `MPREb_...`, `VLPL...`)
        #[arg(required_unless_present = "playlist")]
        browse_id: Option<String>,
        /// Raw playlist ID; the `VL` browse prefix is added
        #[arg(long, conflicts_with = "browse_id")]
        playlist: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = ClientConfig {
        context: ClientContext::web(&cli.hl, &cli.gl),
        ..ClientConfig::default()
    };
    log::debug!("[Main] client context hl={} gl={}", cli.hl, cli.gl);
    match cli.command {
        Command::Login { cookie, check } => cmd_login(cookie, check),
        Command::Logout => cmd_logout(),
        Command::Home => cmd_home(config, cli.json),
        Command::Search { query } => cmd_search(config, &query, cli.json),
        Command::Browse { browse_id, playlist } => {
            let id = match (browse_id, playlist) {
                (Some(id), _) => id,
                (None, Some(pl)) => playlist_browse_id(&pl),
                (None, None) => bail!("a browse ID or --playlist is required"),
            };
            cmd_browse(config, &id, cli.json)
        }
    }
}

/// Build the auth context from the saved jar; fail early when logged out.
fn session() -> Result<AuthContext> {
    let jar = CookieJar::load()?;
    AuthContext::from_store(&jar)
        .require()
        .context("no session cookie saved; run `ytmusic login <COOKIE>` first")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn describe(item: &MediaItem) -> String {
    let kind = match item.kind {
        ItemKind::Song => "song",
        ItemKind::Album => "album",
        ItemKind::Playlist => "playlist",
    };
    let id = item
        .video_id
        .clone()
        .or_else(|| item.browse_target())
        .unwrap_or_default();
    if item.subtitle.is_empty() {
        format!("[{kind}] {} ({id})", item.title)
    } else {
        format!("[{kind}] {} - {} ({id})", item.title, item.subtitle)
    }
}

// ── login / logout ──

fn cmd_login(cookie: Option<String>, check: bool) -> Result<()> {
    if check {
        let auth = AuthContext::from_store(&CookieJar::load()?);
        if auth.is_authenticated() {
            println!("Logged in (signing cookie present).");
        } else {
            println!("Not logged in.");
        }
        return Ok(());
    }

    let cookie = cookie.context("cookie header required")?;
    let jar = CookieJar::from_cookie_header(&cookie, &format!(".{ROOT_DOMAIN}"));
    if jar.is_empty() {
        bail!("no cookies found in the given header");
    }
    jar.save()?;
    if AuthContext::from_store(&jar).is_authenticated() {
        println!("Session saved ({} cookies).", jar.cookies().len());
    } else {
        println!(
            "Saved {} cookies, but no SAPISID / __Secure-3PAPISID among them; requests will be unsigned.",
            jar.cookies().len()
        );
    }
    Ok(())
}

fn cmd_logout() -> Result<()> {
    CookieJar::clear()?;
    println!("Session cleared.");
    Ok(())
}

// ── home / search / browse ──

fn cmd_home(config: ClientConfig, json: bool) -> Result<()> {
    let auth = session()?;
    let client = YtMusicClient::with_config(config)?;
    let shelves = client.home(&auth).context("failed to load home feed")?;
    if json {
        return print_json(&shelves);
    }
    if shelves.is_empty() {
        println!("Home feed is empty.");
    }
    for shelf in &shelves {
        println!("{}", shelf.title);
        for item in &shelf.items {
            println!("  {}", describe(item));
        }
        println!();
    }
    Ok(())
}

fn cmd_search(config: ClientConfig, query: &str, json: bool) -> Result<()> {
    let auth = session()?;
    let client = YtMusicClient::with_config(config)?;
    let items = client.search(&auth, query).context("search failed")?;
    if json {
        return print_json(&items);
    }
    println!("{} results\n", items.len());
    for item in &items {
        println!("  {}", describe(item));
    }
    Ok(())
}

fn cmd_browse(config: ClientConfig, browse_id: &str, json: bool) -> Result<()> {
    let auth = session()?;
    let client = YtMusicClient::with_config(config)?;
    let detail = client
        .playlist_or_album(&auth, browse_id)
        .with_context(|| format!("failed to load {browse_id}"))?;
    if json {
        return print_json(&detail);
    }
    if let Some(err) = &detail.error {
        bail!("could not read {browse_id}: {err}");
    }
    println!("Title:    {}", detail.title);
    if !detail.subtitle.is_empty() {
        println!("Info:     {}", detail.subtitle);
    }
    if !detail.thumbnail_url.is_empty() {
        println!("Cover:    {}", detail.thumbnail_url);
    }
    println!("Tracks:   {}\n", detail.tracks.len());
    for (i, track) in detail.tracks.iter().enumerate() {
        let id = track.video_id.as_deref().unwrap_or("-");
        println!("  {:>3}. [{id}] {} - {}", i + 1, track.title, track.subtitle);
    }
    Ok(())
}
