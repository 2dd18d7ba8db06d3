//! CAPTCHA capability consumed by the contact form.
//!
//! SYSTEM CONTEXT
//! ==============
//! The challenge widget lives outside this crate: it renders into its mount
//! point and reports back through `ContactFormController::on_captcha_solved`
//! and `on_captcha_expired`. The controller only needs to tell it to forget
//! a spent token.

use std::fmt;

/// Opaque proof-of-solve string issued by the challenge widget.
///
/// Single use: the controller drops it and resets the widget after every
/// successful dispatch.
#[derive(Clone, PartialEq, Eq)]
pub struct CaptchaToken(String);

impl CaptchaToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens are credentials; keep them out of logs.
impl fmt::Debug for CaptchaToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CaptchaToken(<{} bytes>)", self.0.len())
    }
}

/// Handle on the rendered challenge widget.
pub trait CaptchaWidget: Send + Sync {
    /// Invalidate the current solve and present a fresh challenge.
    fn reset(&self);
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
