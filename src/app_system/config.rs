use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use tracing::{info, warn};
use uuid::Uuid;

use crate::cart::DEFAULT_SESSION_KEY;

/// Runtime settings, read from `STORE_*` environment variables.
#[derive(Clone)]
pub struct StoreConfig {
    pub channel_buffer: usize,
    pub checkout_timeout: Duration,
    pub upload_timeout: Duration,
    pub session_key: String,
    /// `None` keeps the cart session in memory.
    pub session_dir: Option<PathBuf>,
    pub admin_username: String,
    pub admin_password: String,
    pub admin_email: String,
    pub admin_session_ttl: chrono::Duration,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("channel_buffer", &self.channel_buffer)
            .field("checkout_timeout", &self.checkout_timeout)
            .field("upload_timeout", &self.upload_timeout)
            .field("session_key", &self.session_key)
            .field("session_dir", &self.session_dir)
            .field("admin_username", &self.admin_username)
            .field("admin_password", &"<redacted>")
            .field("admin_email", &self.admin_email)
            .field("admin_session_ttl", &self.admin_session_ttl)
            .finish()
    }
}

impl StoreConfig {
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Missing or invalid values fall
    /// back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let admin_password = lookup("STORE_ADMIN_PASSWORD")
            .filter(|password| !password.is_empty())
            .unwrap_or_else(|| {
                let generated = Uuid::new_v4().simple().to_string();
                warn!(password = %generated, "STORE_ADMIN_PASSWORD not set, generated a one-time admin password");
                generated
            });

        Self {
            channel_buffer: try_load_positive(&lookup, "STORE_CHANNEL_BUFFER", 32),
            checkout_timeout: Duration::from_secs(try_load_positive(&lookup, "STORE_CHECKOUT_TIMEOUT_SECS", 45)),
            upload_timeout: Duration::from_secs(try_load_positive(&lookup, "STORE_UPLOAD_TIMEOUT_SECS", 30)),
            session_key: try_load(&lookup, "STORE_SESSION_KEY", DEFAULT_SESSION_KEY.to_string()),
            session_dir: lookup("STORE_SESSION_DIR").filter(|dir| !dir.is_empty()).map(PathBuf::from),
            admin_username: try_load(&lookup, "STORE_ADMIN_USERNAME", "admin".to_string()),
            admin_password,
            admin_email: try_load(&lookup, "STORE_ADMIN_EMAIL", "admin@localhost".to_string()),
            admin_session_ttl: chrono::Duration::minutes(try_load_positive(
                &lookup,
                "STORE_ADMIN_SESSION_TTL_MINS",
                480,
            )),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        None => {
            info!("{key} not set, using default: {default}");
            default
        }
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value: {e}, using default: {default}");
            default
        }),
    }
}

fn try_load_positive<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display + PartialOrd + Default + Copy,
    T::Err: Display,
{
    let value = try_load(lookup, key, default);
    if value <= T::default() {
        warn!("{key} must be positive, using default: {default}");
        return default;
    }
    value
}
