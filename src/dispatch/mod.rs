//! Message dispatch: hands a validated contact message to a delivery service.
//!
//! DESIGN
//! ======
//! `MessageDispatch` is the seam the controller awaits; tests substitute
//! in-memory fakes. Credentials and template identifiers live in the concrete
//! dispatcher's config and never reach the form state machine.

pub mod config;
pub mod emailjs;

use serde::Serialize;

pub use config::EmailJsConfig;
pub use emailjs::EmailJsDispatcher;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced while configuring or performing a dispatch.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// A required configuration variable is unset or empty.
    #[error("missing config: env var {var} not set")]
    MissingConfig { var: String },

    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("dispatch request failed: {0}")]
    Request(String),

    /// The provider answered with a non-success status.
    #[error("dispatch rejected: status {status}: {body}")]
    Rejected { status: u16, body: String },
}

// =============================================================================
// PAYLOAD
// =============================================================================

/// Everything the delivery service needs for one contact message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub sender_name: String,
    pub sender_email: String,
    pub body: String,
    /// Raw CAPTCHA token, verified server-side by the provider.
    pub captcha_response: String,
}

// =============================================================================
// DISPATCH TRAIT
// =============================================================================

/// Provider-neutral async delivery capability. Enables mocking in tests.
#[async_trait::async_trait]
pub trait MessageDispatch: Send + Sync {
    /// Deliver one message.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] if the provider is unreachable or refuses
    /// the message.
    async fn send(&self, message: &ContactMessage) -> Result<(), DispatchError>;
}
