//! `EmailJS` REST API dispatcher.
//!
//! Thin HTTP wrapper for `/api/v1.0/email/send`. Request building and
//! response classification are pure functions for testability.

use std::time::Duration;

use serde::Serialize;

use super::config::EmailJsConfig;
use super::{ContactMessage, DispatchError, MessageDispatch};

// =============================================================================
// CLIENT
// =============================================================================

pub struct EmailJsDispatcher {
    http: reqwest::Client,
    config: EmailJsConfig,
}

impl EmailJsDispatcher {
    /// Build a dispatcher with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::HttpClientBuild`] if the client cannot be built.
    pub fn new(config: EmailJsConfig) -> Result<Self, DispatchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| DispatchError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// Build a dispatcher from `EMAILJS_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required config is missing or the client fails to build.
    pub fn from_env() -> Result<Self, DispatchError> {
        Self::new(EmailJsConfig::from_env()?)
    }

    #[must_use]
    pub fn config(&self) -> &EmailJsConfig {
        &self.config
    }
}

#[async_trait::async_trait]
impl MessageDispatch for EmailJsDispatcher {
    async fn send(&self, message: &ContactMessage) -> Result<(), DispatchError> {
        let body = build_request(&self.config, message);

        let response = self
            .http
            .post(self.config.send_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| DispatchError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| DispatchError::Request(e.to_string()))?;

        check_response(status, text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: TemplateParams<'a>,
}

/// Variables referenced by the `EmailJS` template.
#[derive(Debug, Serialize)]
struct TemplateParams<'a> {
    from_name: &'a str,
    from_email: &'a str,
    message: &'a str,
    #[serde(rename = "g-recaptcha-response")]
    recaptcha_response: &'a str,
}

fn build_request<'a>(config: &'a EmailJsConfig, message: &'a ContactMessage) -> SendRequest<'a> {
    SendRequest {
        service_id: &config.service_id,
        template_id: &config.template_id,
        user_id: &config.public_key,
        access_token: config.private_key.as_deref(),
        template_params: TemplateParams {
            from_name: &message.sender_name,
            from_email: &message.sender_email,
            message: &message.body,
            recaptcha_response: &message.captcha_response,
        },
    }
}

fn check_response(status: u16, body: String) -> Result<(), DispatchError> {
    if status == 200 {
        Ok(())
    } else {
        Err(DispatchError::Rejected { status, body })
    }
}

#[cfg(test)]
#[path = "emailjs_test.rs"]
mod tests;
