//! Contact form submission pipeline for the portfolio site.
//!
//! ARCHITECTURE
//! ============
//! `ContactFormController` owns the form's input, validation errors, CAPTCHA
//! token and displayed status. It talks to the outside world only through two
//! injected capabilities: a [`CaptchaWidget`] it can reset and a
//! [`MessageDispatch`] it awaits. [`EmailJsDispatcher`] is the production
//! dispatcher; tests supply fakes.
//!
//! ```text
//! input ──► update_field ─┐
//! widget ─► on_captcha_* ─┼─► FormState ──submit──► validate ──► MessageDispatch
//!                         │                                      │
//!            dismiss ─────┴──── SubmissionStatus ◄── 15s revert ◄┘
//! ```

pub mod captcha;
pub mod controller;
pub mod dispatch;
pub mod form;

pub use captcha::{CaptchaToken, CaptchaWidget};
pub use controller::status::{STATUS_DISPLAY, SubmissionStatus};
pub use controller::{ContactFormController, SubmitOutcome};
pub use dispatch::{ContactMessage, DispatchError, EmailJsConfig, EmailJsDispatcher, MessageDispatch};
pub use form::validation::{Field, FieldError, ValidationErrors};
pub use form::{FormField, FormFields, UnknownField};
