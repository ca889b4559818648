// File: crates/booking_gcal/src/auth.rs
use booking_config::AppConfig;
use chrono_tz::Tz;
use google_calendar3::{
    hyper_rustls::{self, HttpsConnectorBuilder},
    hyper_util::client::legacy::connect::HttpConnector,
    hyper_util::client::legacy::Client,
    yup_oauth2::{ServiceAccountAuthenticator, ServiceAccountKey},
    CalendarHub,
};
use std::{error::Error, fmt, str::FromStr};
use thiserror::Error;

/// Read/write access to calendars and events.
pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";

/// Values accepted for `gcal.send_updates`.
const SEND_UPDATES_MODES: &[&str] = &["all", "externalOnly", "none"];

// Type aliases for clarity
type Connector = hyper_rustls::HttpsConnector<HttpConnector>;

pub type HubType = CalendarHub<Connector>;

/// Why service credentials could not be built from configuration.
///
/// Messages never include the credential blob itself.
#[derive(Error, Debug)]
pub enum CredentialsError {
    #[error("calendar credentials are not configured")]
    Missing,
    #[error("calendar credentials are not valid service account JSON ({0})")]
    Malformed(String),
    #[error("calendar credentials are missing {0}")]
    MissingField(&'static str),
    #[error("calendar id is not configured")]
    MissingCalendarId,
    #[error("unknown time zone '{0}'")]
    InvalidTimeZone(String),
    #[error("unsupported send_updates mode '{0}'")]
    InvalidSendUpdates(String),
}

/// Everything needed to authenticate and address the target calendar for one request.
#[derive(Clone)]
pub struct ServiceCredentials {
    pub key: ServiceAccountKey,
    pub calendar_id: String,
    /// Carry `calendar_id` as the `sub` claim of the grant.
    pub impersonate_owner: bool,
    pub time_zone: Tz,
    pub send_updates: Option<String>,
}

impl ServiceCredentials {
    /// Parses the credential blob and calendar settings held in `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self, CredentialsError> {
        let gcal = &config.gcal;

        let blob = gcal
            .credentials_json
            .as_deref()
            .map(str::trim)
            .filter(|blob| !blob.is_empty())
            .ok_or(CredentialsError::Missing)?;

        // serde_json messages for data errors may quote input; keep only the position.
        let key: ServiceAccountKey = serde_json::from_str(blob).map_err(|err| {
            CredentialsError::Malformed(format!(
                "{:?} error at line {} column {}",
                err.classify(),
                err.line(),
                err.column()
            ))
        })?;
        if key.client_email.trim().is_empty() {
            return Err(CredentialsError::MissingField("client_email"));
        }
        if key.private_key.trim().is_empty() {
            return Err(CredentialsError::MissingField("private_key"));
        }

        let calendar_id = gcal
            .calendar_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(CredentialsError::MissingCalendarId)?
            .to_string();

        let time_zone = Tz::from_str(config.time_zone())
            .map_err(|_| CredentialsError::InvalidTimeZone(config.time_zone().to_string()))?;

        if let Some(mode) = gcal.send_updates.as_deref() {
            if !SEND_UPDATES_MODES.contains(&mode) {
                return Err(CredentialsError::InvalidSendUpdates(mode.to_string()));
            }
        }

        Ok(Self {
            key,
            calendar_id,
            impersonate_owner: gcal.impersonate_owner,
            time_zone,
            send_updates: gcal.send_updates.clone(),
        })
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    /// Subject of the delegated grant, if delegation is enabled.
    pub fn subject(&self) -> Option<&str> {
        self.impersonate_owner.then_some(self.calendar_id.as_str())
    }

    /// IANA label sent alongside event start and end.
    pub fn time_zone_label(&self) -> &'static str {
        self.time_zone.name()
    }
}

impl fmt::Debug for ServiceCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceCredentials")
            .field("client_email", &self.key.client_email)
            .field("private_key", &"<redacted>")
            .field("calendar_id", &self.calendar_id)
            .field("impersonate_owner", &self.impersonate_owner)
            .field("time_zone", &self.time_zone)
            .field("send_updates", &self.send_updates)
            .finish()
    }
}

/// Builds a calendar hub authenticated as the service account.
///
/// The authenticator signs a JWT bearer grant with the account's private key; when
/// delegation is enabled the grant impersonates the calendar owner.
pub async fn create_calendar_hub(
    credentials: &ServiceCredentials,
) -> Result<HubType, Box<dyn Error + Send + Sync>> {
    let mut builder = ServiceAccountAuthenticator::builder(credentials.key.clone());
    if let Some(subject) = credentials.subject() {
        builder = builder.subject(subject);
    }
    let auth = builder.build().await?;

    let https = HttpsConnectorBuilder::new()
        .with_native_roots()?
        .https_or_http()
        .enable_http1()
        .build();

    let client = Client::builder(hyper_util::rt::TokioExecutor::new()).build(https);

    Ok(CalendarHub::new(client, auth))
}
