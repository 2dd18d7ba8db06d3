//! Submission result shown to the visitor, and the timer that hides it.
//!
//! DESIGN
//! ======
//! The banner reverts to `Idle` on its own after [`STATUS_DISPLAY`]. The
//! revert runs as a tokio task owned by the controller; starting a new cycle,
//! dismissing, or dropping the controller aborts it.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

/// How long a success or error banner stays up before reverting to idle.
pub const STATUS_DISPLAY: Duration = Duration::from_secs(15);

const SUCCESS_BANNER: &str = "Message sent successfully! I'll get back to you soon.";
const ERROR_BANNER: &str =
    "There was an error sending your message. Please try again or contact me directly via email.";

/// Outcome of the most recent completed submission, as displayed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    /// Nothing to show; also the acknowledged state after a banner clears.
    #[default]
    Idle,
    Success,
    Error,
}

impl SubmissionStatus {
    /// Banner copy for this status, if one is shown.
    #[must_use]
    pub fn banner(self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::Success => Some(SUCCESS_BANNER),
            Self::Error => Some(ERROR_BANNER),
        }
    }

    #[must_use]
    pub fn is_idle(self) -> bool {
        self == Self::Idle
    }
}

/// Single pending revert task. Scheduling replaces and aborts any previous one.
#[derive(Debug, Default)]
pub(crate) struct RevertTimer {
    handle: Option<JoinHandle<()>>,
}

impl RevertTimer {
    /// Run `revert` once `delay` has elapsed, unless cancelled first.
    ///
    /// Must be called from within a tokio runtime.
    pub(crate) fn schedule<F>(&mut self, delay: Duration, revert: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            revert();
        }));
    }

    pub(crate) fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// `true` while a revert is waiting to fire.
    pub(crate) fn is_scheduled(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for RevertTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
