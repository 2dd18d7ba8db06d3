//! `EmailJS` configuration parsed from environment variables.

use super::DispatchError;

pub const DEFAULT_EMAILJS_BASE_URL: &str = "https://api.emailjs.com";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for DispatchTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct EmailJsConfig {
    pub service_id: String,
    pub template_id: String,
    /// Account public key, sent as `user_id`.
    pub public_key: String,
    /// Optional private key, sent as `accessToken` when strict mode is on.
    pub private_key: Option<String>,
    pub base_url: String,
    pub timeouts: DispatchTimeouts,
}

impl std::fmt::Debug for EmailJsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailJsConfig")
            .field("service_id", &self.service_id)
            .field("template_id", &self.template_id)
            .field("public_key", &self.public_key)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeouts", &self.timeouts)
            .finish()
    }
}

impl EmailJsConfig {
    /// Config with the default endpoint and timeouts.
    #[must_use]
    pub fn new(service_id: impl Into<String>, template_id: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            service_id: service_id.into(),
            template_id: template_id.into(),
            public_key: public_key.into(),
            private_key: None,
            base_url: DEFAULT_EMAILJS_BASE_URL.to_string(),
            timeouts: DispatchTimeouts::default(),
        }
    }

    /// Build typed `EmailJS` config from environment variables.
    ///
    /// Required:
    /// - `EMAILJS_SERVICE_ID`
    /// - `EMAILJS_TEMPLATE_ID`
    /// - `EMAILJS_PUBLIC_KEY`
    ///
    /// Optional:
    /// - `EMAILJS_PRIVATE_KEY`: sent as `accessToken`
    /// - `EMAILJS_BASE_URL`: default `https://api.emailjs.com`
    /// - `EMAILJS_REQUEST_TIMEOUT_SECS`: default 30
    /// - `EMAILJS_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MissingConfig`] for an unset or empty required
    /// variable and [`DispatchError::ConfigParse`] for a malformed timeout.
    pub fn from_env() -> Result<Self, DispatchError> {
        let service_id = env_required("EMAILJS_SERVICE_ID")?;
        let template_id = env_required("EMAILJS_TEMPLATE_ID")?;
        let public_key = env_required("EMAILJS_PUBLIC_KEY")?;
        let private_key = env_optional("EMAILJS_PRIVATE_KEY");
        let base_url = env_optional("EMAILJS_BASE_URL")
            .unwrap_or_else(|| DEFAULT_EMAILJS_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let timeouts = DispatchTimeouts {
            request_secs: env_parse_u64("EMAILJS_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: env_parse_u64("EMAILJS_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };

        Ok(Self { service_id, template_id, public_key, private_key, base_url, timeouts })
    }

    /// Full URL of the send endpoint.
    #[must_use]
    pub fn send_url(&self) -> String {
        format!("{}/api/v1.0/email/send", self.base_url)
    }
}

fn env_optional(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_required(key: &str) -> Result<String, DispatchError> {
    env_optional(key).ok_or_else(|| DispatchError::MissingConfig { var: key.into() })
}

fn env_parse_u64(key: &str, default: u64) -> Result<u64, DispatchError> {
    match env_optional(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| DispatchError::ConfigParse(format!("{key} must be a whole number of seconds, got '{raw}'"))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
