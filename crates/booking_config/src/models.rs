// --- File: crates/booking_config/src/models.rs ---

use serde::{Deserialize, Serialize};
use std::fmt;

/// Time zone label attached to event start/end when none is configured.
pub const DEFAULT_TIME_ZONE: &str = "America/Los_Angeles";

/// Origin allowed by the CORS headers when none is configured.
pub const DEFAULT_ALLOW_ORIGIN: &str = "*";

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8086,
        }
    }
}

// --- Google Calendar Config ---
// `credentials_json` and `calendar_id` usually hold the "secret_from_env" marker and are
// filled from GOOGLE_CREDENTIALS / CALENDAR_ID (or BOOKING_SECRET_GCAL_*) at load time.
#[derive(Deserialize, Serialize, Clone)]
pub struct GcalConfig {
    /// Raw service account JSON blob. Parsed per request, never at startup.
    #[serde(default)]
    pub credentials_json: Option<String>,
    #[serde(default)]
    pub calendar_id: Option<String>,
    /// IANA zone name sent with start/end. Defaults to America/Los_Angeles.
    #[serde(default)]
    pub time_zone: Option<String>,
    /// Use the calendar id as the `sub` of the JWT grant (domain-wide delegation).
    #[serde(default = "default_impersonate_owner")]
    pub impersonate_owner: bool,
    /// Forwarded as `sendUpdates` on insert when set ("all", "externalOnly", "none").
    #[serde(default)]
    pub send_updates: Option<String>,
}

fn default_impersonate_owner() -> bool {
    true
}

impl Default for GcalConfig {
    fn default() -> Self {
        Self {
            credentials_json: None,
            calendar_id: None,
            time_zone: None,
            impersonate_owner: default_impersonate_owner(),
            send_updates: None,
        }
    }
}

// The credential blob carries a private key; keep it out of Debug output and logs.
impl fmt::Debug for GcalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GcalConfig")
            .field(
                "credentials_json",
                &self.credentials_json.as_ref().map(|_| "<redacted>"),
            )
            .field("calendar_id", &self.calendar_id)
            .field("time_zone", &self.time_zone)
            .field("impersonate_owner", &self.impersonate_owner)
            .field("send_updates", &self.send_updates)
            .finish()
    }
}

// --- CORS Config ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CorsConfig {
    /// e.g. "https://www.example.com" in production; "*" when unset.
    #[serde(default)]
    pub allow_origin: Option<String>,
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub gcal: GcalConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

impl AppConfig {
    pub fn time_zone(&self) -> &str {
        self.gcal.time_zone.as_deref().unwrap_or(DEFAULT_TIME_ZONE)
    }

    pub fn allow_origin(&self) -> &str {
        self.cors
            .allow_origin
            .as_deref()
            .unwrap_or(DEFAULT_ALLOW_ORIGIN)
    }
}
