use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use bobiare_common::{
    helpers::{parse_boolean_flag, parse_number},
    Secret,
};
use bobiare_engine::shop_api::auth_api::DEFAULT_LOGIN_DELAY;
use log::*;

use crate::sessions::{DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_IDLE_TIMEOUT};

const DEFAULT_BOBIARE_HOST: &str = "127.0.0.1";
const DEFAULT_BOBIARE_PORT: u16 = 8470;
const DEFAULT_CARTS_DIR: &str = "data/carts";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// The SQLite database to use. When unset, the server runs on the built-in in-memory catalog and forgets
    /// products, images and accounts on restart.
    pub database_url: Option<String>,
    /// The externally visible address of the server, used to build public image URLs.
    pub public_url: String,
    /// Each session's cart is stored in a subdirectory of this directory.
    pub carts_dir: PathBuf,
    /// If true, any email and password are accepted at login, after `login_delay`. **Not for production.**
    pub simulated_login: bool,
    pub login_delay: Duration,
    /// Sessions unused for this long are dropped from memory. Their carts stay on disk.
    pub session_idle_timeout: Duration,
    /// The most sessions kept in memory at once. The least recently used one is dropped to make room.
    pub max_sessions: usize,
    /// If supplied, this account is created (as an admin) at startup, unless it already exists.
    pub admin_account: Option<AdminAccountConfig>,
}

#[derive(Clone, Debug)]
pub struct AdminAccountConfig {
    pub email: String,
    pub password: Secret<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_BOBIARE_HOST.to_string(),
            port: DEFAULT_BOBIARE_PORT,
            database_url: None,
            public_url: default_public_url(DEFAULT_BOBIARE_HOST, DEFAULT_BOBIARE_PORT),
            carts_dir: PathBuf::from(DEFAULT_CARTS_DIR),
            simulated_login: true,
            login_delay: DEFAULT_LOGIN_DELAY,
            session_idle_timeout: DEFAULT_SESSION_IDLE_TIMEOUT,
            max_sessions: DEFAULT_MAX_SESSIONS,
            admin_account: None,
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, public_url: default_public_url(host, port), ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("BOBIARE_HOST").ok().unwrap_or_else(|| DEFAULT_BOBIARE_HOST.into());
        let port = number_from_env("BOBIARE_PORT", DEFAULT_BOBIARE_PORT);
        let database_url = env::var("BOBIARE_DATABASE_URL").ok().filter(|s| !s.trim().is_empty());
        let public_url = env::var("BOBIARE_PUBLIC_URL")
            .ok()
            .map(|s| s.trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| default_public_url(&host, port));
        let carts_dir = env::var("BOBIARE_CARTS_DIR").map(PathBuf::from).unwrap_or_else(|_| {
            info!("🪛️ BOBIARE_CARTS_DIR is not set. Carts will be stored in {DEFAULT_CARTS_DIR}.");
            PathBuf::from(DEFAULT_CARTS_DIR)
        });
        let simulated_login = parse_boolean_flag(env::var("BOBIARE_SIMULATED_LOGIN").ok(), true);
        if simulated_login {
            warn!(
                "🚨️ BOBIARE_SIMULATED_LOGIN is on. Any email and password will be accepted at login. Set \
                 BOBIARE_SIMULATED_LOGIN=false to check credentials against the accounts in the backend. 🚨️"
            );
        }
        let login_delay = Duration::from_millis(number_from_env(
            "BOBIARE_LOGIN_DELAY_MS",
            u64::try_from(DEFAULT_LOGIN_DELAY.as_millis()).unwrap_or(1000),
        ));
        let idle_minutes = number_from_env("BOBIARE_SESSION_IDLE_MINUTES", DEFAULT_SESSION_IDLE_TIMEOUT.as_secs() / 60);
        let session_idle_timeout = Duration::from_secs(idle_minutes.max(1) * 60);
        let max_sessions = number_from_env("BOBIARE_MAX_SESSIONS", DEFAULT_MAX_SESSIONS);
        let admin_account = AdminAccountConfig::from_env();
        Self {
            host,
            port,
            database_url,
            public_url,
            carts_dir,
            simulated_login,
            login_delay,
            session_idle_timeout,
            max_sessions,
            admin_account,
        }
    }
}

impl AdminAccountConfig {
    pub fn from_env() -> Option<Self> {
        let email = env::var("BOBIARE_ADMIN_EMAIL").ok().filter(|s| !s.trim().is_empty());
        let password = env::var("BOBIARE_ADMIN_PASSWORD").ok().filter(|s| !s.is_empty());
        match (email, password) {
            (Some(email), Some(password)) => Some(Self { email, password: Secret::new(password) }),
            (Some(email), None) => {
                warn!("🪛️ BOBIARE_ADMIN_EMAIL is set to {email}, but BOBIARE_ADMIN_PASSWORD is not. No admin account.");
                None
            },
            (None, Some(_)) => {
                warn!("🪛️ BOBIARE_ADMIN_PASSWORD is set, but BOBIARE_ADMIN_EMAIL is not. No admin account.");
                None
            },
            (None, None) => None,
        }
    }
}

fn default_public_url(host: &str, port: u16) -> String {
    format!("http://{host}:{port}")
}

/// Reads a numeric setting, falling back to `default` (with a warning) when the value does not parse.
fn number_from_env<T>(name: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(name) {
        Ok(s) => parse_number(&s).unwrap_or_else(|e| {
            warn!("🪛️ Invalid configuration value for {name}. {e} Using the default, {default}, instead.");
            default
        }),
        Err(_) => {
            debug!("🪛️ {name} is not set. Using the default value of {default}.");
            default
        },
    }
}
