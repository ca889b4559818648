//! Environment variable handling for the booking service.
//!
//! Configuration values set to the `secret_from_env` marker are resolved from the
//! process environment. Each secret path has a standardized name
//! (`BOOKING_SECRET_GCAL_CREDENTIALS_JSON`) and, for the calendar settings, a legacy
//! name (`GOOGLE_CREDENTIALS`, `CALENDAR_ID`).

use serde_json::Value;
use std::env;
use tracing::warn;

/// The prefix for layered configuration environment variables (`BOOKING__SERVER__PORT`)
pub const DEFAULT_PREFIX: &str = "BOOKING";

/// The prefix for secret environment variables
pub const SECRET_PREFIX: &str = "BOOKING_SECRET";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// The separator for secret environment variables
pub const SECRET_SEPARATOR: &str = "_";

/// Marker string that is replaced with an environment value at load time
pub const SECRET_MARKER: &str = "secret_from_env";

/// Convert a secret path to an environment variable name
///
/// # Arguments
///
/// * `path` - The secret path (e.g., "gcal.credentials_json")
///
/// # Returns
///
/// The environment variable name (e.g., "BOOKING_SECRET_GCAL_CREDENTIALS_JSON")
pub fn secret_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', SECRET_SEPARATOR);
    format!("{}{}{}", SECRET_PREFIX, SECRET_SEPARATOR, path).to_uppercase()
}

/// Legacy variable name for a secret path, if one exists.
pub fn legacy_secret_env_var(path: &str) -> Option<&'static str> {
    match path {
        "gcal.credentials_json" => Some("GOOGLE_CREDENTIALS"),
        "gcal.calendar_id" => Some("CALENDAR_ID"),
        _ => None,
    }
}

/// Look up a secret path, trying the standardized name first and the legacy name second.
pub fn lookup_secret<F>(path: &str, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(&secret_path_to_env_var(path))
        .or_else(|| legacy_secret_env_var(path).and_then(&lookup))
        .filter(|value| !value.trim().is_empty())
}

/// Get an environment variable for a secret path
pub fn get_secret_env_var(path: &str) -> Option<String> {
    lookup_secret(path, |name| env::var(name).ok())
}

/// Replace every `secret_from_env` marker in `value` using `lookup`.
///
/// Markers without a matching variable become `null`, so the corresponding optional
/// setting reads as missing rather than as the literal marker text.
///
/// Returns the dotted paths that could not be resolved.
pub fn inject_secrets_with<F>(value: &mut Value, lookup: F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    fn walk<F>(path: &mut Vec<String>, obj: &mut Value, lookup: &F, missing: &mut Vec<String>)
    where
        F: Fn(&str) -> Option<String>,
    {
        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    path.push(k.to_string());
                    walk(path, v, lookup, missing);
                    path.pop();
                }
            }
            Value::String(s) if s == SECRET_MARKER => {
                let path_str = path.join(".");
                match lookup_secret(&path_str, lookup) {
                    Some(env_val) => *obj = Value::String(env_val),
                    None => {
                        *obj = Value::Null;
                        missing.push(path_str);
                    }
                }
            }
            _ => {}
        }
    }

    let mut missing = Vec::new();
    walk(&mut Vec::new(), value, &lookup, &mut missing);
    missing
}

/// Inject environment variables into a JSON value
pub fn inject_env_vars(value: &mut Value) {
    for path in inject_secrets_with(value, |name| env::var(name).ok()) {
        warn!(
            "No environment value for {} (tried {}{})",
            path,
            secret_path_to_env_var(&path),
            legacy_secret_env_var(&path)
                .map(|legacy| format!(", {legacy}"))
                .unwrap_or_default()
        );
    }
}
