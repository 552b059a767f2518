use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "PORT";
    pub const BIND_ADDRESS: &str = "BIND_ADDRESS";
    pub const NOTES_CSV_PATH: &str = "NOTES_CSV_PATH";
    /// RON file mapping category name to output rank.
    pub const CATEGORY_ORDER_PATH: &str = "CATEGORY_ORDER_PATH";
    /// Idle sessions older than this are swept.
    pub const SESSION_TTL_MINUTES: &str = "SESSION_TTL_MINUTES";
    /// Upper bound on live sessions; the least recently used is evicted.
    pub const MAX_SESSIONS: &str = "MAX_SESSIONS";
    pub const NOTION_TOKEN: &str = "NOTION_TOKEN";
    pub const NOTION_DATABASE_ID: &str = "NOTION_DATABASE_ID";
    pub const NOTION_API_BASE: &str = "NOTION_API_BASE";
    pub const LEAD_TIMEOUT_SECS: &str = "LEAD_TIMEOUT_SECS";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 8080;
    pub const BIND_ADDRESS: &str = "0.0.0.0";
    pub const NOTES_CSV: &str = "drawing_notes.csv";
    pub const CATEGORY_ORDER: &str = "config/category_order.ron";
    pub const SESSION_TTL_MINUTES: u64 = 120;
    pub const MAX_SESSIONS: u64 = 10_000;
    pub const NOTION_API_BASE: &str = "https://api.notion.com";
    pub const LEAD_TIMEOUT_SECS: u64 = 10;
}

/// Returns the absolute path to the drawing-notes-backend directory.
pub fn backend_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Resolve a configured path: absolute paths and paths that exist relative to
/// the working directory are used as-is, otherwise relative to the backend dir.
fn resolve_path(raw: &str) -> PathBuf {
    let path = PathBuf::from(raw);
    if path.is_absolute() || path.exists() {
        path
    } else {
        backend_dir().join(path)
    }
}

/// Credentials for the hosted lead database
#[derive(Clone, Debug)]
pub struct LeadConfig {
    pub token: Option<String>,
    pub database_id: Option<String>,
    pub api_base: String,
    pub timeout: Duration,
}

impl LeadConfig {
    pub fn is_configured(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
            && self.database_id.as_deref().is_some_and(|d| !d.is_empty())
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub bind_address: String,
    pub notes_csv_path: PathBuf,
    pub category_order_path: PathBuf,
    pub session_ttl: Duration,
    pub max_sessions: usize,
    pub leads: LeadConfig,
}

impl Config {
    pub fn from_env() -> Self {
        let session_ttl_minutes = parse_or(env_vars::SESSION_TTL_MINUTES, defaults::SESSION_TTL_MINUTES);
        let max_sessions = parse_or(env_vars::MAX_SESSIONS, defaults::MAX_SESSIONS);
        let lead_timeout_secs = parse_or(env_vars::LEAD_TIMEOUT_SECS, defaults::LEAD_TIMEOUT_SECS);

        Self {
            port: env::var(env_vars::PORT)
                .unwrap_or_else(|_| defaults::PORT.to_string())
                .parse()
                .expect("PORT must be a valid number"),
            bind_address: env::var(env_vars::BIND_ADDRESS)
                .unwrap_or_else(|_| defaults::BIND_ADDRESS.to_string()),
            notes_csv_path: resolve_path(
                &env::var(env_vars::NOTES_CSV_PATH).unwrap_or_else(|_| defaults::NOTES_CSV.to_string()),
            ),
            category_order_path: resolve_path(
                &env::var(env_vars::CATEGORY_ORDER_PATH)
                    .unwrap_or_else(|_| defaults::CATEGORY_ORDER.to_string()),
            ),
            session_ttl: Duration::from_secs(session_ttl_minutes * 60),
            max_sessions: usize::try_from(max_sessions).unwrap_or(usize::MAX),
            leads: LeadConfig {
                token: env::var(env_vars::NOTION_TOKEN).ok(),
                database_id: env::var(env_vars::NOTION_DATABASE_ID).ok(),
                api_base: env::var(env_vars::NOTION_API_BASE)
                    .unwrap_or_else(|_| defaults::NOTION_API_BASE.to_string())
                    .trim_end_matches('/')
                    .to_string(),
                timeout: Duration::from_secs(lead_timeout_secs),
            },
        }
    }
}

/// Parse a numeric env var, warning and falling back on garbage
fn parse_or(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("{} is not a valid number ({:?}), using {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}
