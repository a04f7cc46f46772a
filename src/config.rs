//! Service configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Every setting has a default or is
//! optional, so startup never fails on configuration.

use std::net::SocketAddr;

/// Default HTTP listening port.
const DEFAULT_PORT: u16 = 5000;

/// PostgreSQL's conventional port. Seen in the wild when `PORT` is
/// accidentally pointed at the database instead of the web server.
const POSTGRES_PORT: u16 = 5432;

/// Top-level service configuration.
///
/// Loaded once at startup via [`AppConfig::from_env`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address to bind the HTTP server to.
    pub listen_addr: SocketAddr,

    /// PostgreSQL connection string. Absent means the embedded SQLite
    /// backend is used without probing.
    pub database_url: Option<String>,

    /// Path of the SQLite fallback database file.
    pub db_path: String,

    /// Debug-mode toggle; lowers the default log filter to `debug`.
    pub debug: bool,

    /// Sender account identity for outgoing mail.
    pub gmail_email: Option<String>,

    /// App-scoped credential for the sender account.
    pub gmail_app_password: Option<String>,

    /// Access key protecting the admin listing endpoint.
    pub admin_key: Option<String>,

    /// Owner notification address. Falls back to [`Self::gmail_email`]
    /// when unset; see [`AppConfig::owner_recipient`].
    pub owner_email: Option<String>,
}

impl AppConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let port = sanitize_port(parse_env("PORT", DEFAULT_PORT));
        let listen_addr = SocketAddr::from(([0, 0, 0, 0], port));

        Self {
            listen_addr,
            database_url: env_opt("DATABASE_URL"),
            db_path: std::env::var("DB_PATH").unwrap_or_else(|_| "./submissions.db".to_string()),
            debug: parse_env_bool("DEBUG", false),
            gmail_email: env_opt("GMAIL_EMAIL"),
            gmail_app_password: env_opt("GMAIL_APP_PASSWORD"),
            admin_key: env_opt("ADMIN_KEY"),
            owner_email: env_opt("OWNER_EMAIL"),
        }
    }

    /// Address that receives new-submission notifications: `OWNER_EMAIL`
    /// when set, otherwise the sender account itself.
    #[must_use]
    pub fn owner_recipient(&self) -> Option<&str> {
        self.owner_email.as_deref().or(self.gmail_email.as_deref())
    }
}

/// Default `tracing` filter directive, honoring the `DEBUG` toggle.
///
/// Read directly from the environment so the subscriber can be installed
/// before [`AppConfig::from_env`] runs (whose port guard wants to log).
#[must_use]
pub fn default_env_filter() -> &'static str {
    if parse_env_bool("DEBUG", false) {
        "debug"
    } else {
        "info"
    }
}

/// Rejects the PostgreSQL port as a web-server port, substituting the
/// default.
fn sanitize_port(port: u16) -> u16 {
    if port == POSTGRES_PORT {
        tracing::warn!(
            port,
            "PORT is the PostgreSQL default port, using {DEFAULT_PORT} for the web server instead"
        );
        DEFAULT_PORT
    } else {
        port
    }
}

/// Reads an environment variable as an optional string; empty or
/// whitespace-only values count as unset.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().as_deref() {
        Some("true") | Some("TRUE") | Some("1") => true,
        Some("false") | Some("FALSE") | Some("0") => false,
        _ => default,
    }
}
