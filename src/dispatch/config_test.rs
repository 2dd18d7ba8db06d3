use super::*;

/// # Safety
/// Tests must run with `--test-threads=1` to avoid env races.
unsafe fn clear_emailjs_env() {
    unsafe {
        std::env::remove_var("EMAILJS_SERVICE_ID");
        std::env::remove_var("EMAILJS_TEMPLATE_ID");
        std::env::remove_var("EMAILJS_PUBLIC_KEY");
        std::env::remove_var("EMAILJS_PRIVATE_KEY");
        std::env::remove_var("EMAILJS_BASE_URL");
        std::env::remove_var("EMAILJS_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("EMAILJS_CONNECT_TIMEOUT_SECS");
    }
}

unsafe fn set_required_env() {
    unsafe {
        std::env::set_var("EMAILJS_SERVICE_ID", "service_abc");
        std::env::set_var("EMAILJS_TEMPLATE_ID", "template_xyz");
        std::env::set_var("EMAILJS_PUBLIC_KEY", "pk-test");
    }
}

// Env cases share one test: the process environment is global.
#[test]
fn from_env_cases() {
    unsafe {
        clear_emailjs_env();
        set_required_env();
    }
    let cfg = EmailJsConfig::from_env().unwrap();
    assert_eq!(cfg.service_id, "service_abc");
    assert_eq!(cfg.template_id, "template_xyz");
    assert_eq!(cfg.public_key, "pk-test");
    assert_eq!(cfg.private_key, None);
    assert_eq!(cfg.base_url, DEFAULT_EMAILJS_BASE_URL);
    assert_eq!(cfg.timeouts, DispatchTimeouts::default());

    unsafe {
        std::env::set_var("EMAILJS_PRIVATE_KEY", "priv");
        std::env::set_var("EMAILJS_BASE_URL", "https://mail.example.test/");
        std::env::set_var("EMAILJS_REQUEST_TIMEOUT_SECS", "5");
        std::env::set_var("EMAILJS_CONNECT_TIMEOUT_SECS", " 2 ");
    }
    let cfg = EmailJsConfig::from_env().unwrap();
    assert_eq!(cfg.private_key.as_deref(), Some("priv"));
    assert_eq!(cfg.base_url, "https://mail.example.test");
    assert_eq!(cfg.send_url(), "https://mail.example.test/api/v1.0/email/send");
    assert_eq!(cfg.timeouts, DispatchTimeouts { request_secs: 5, connect_secs: 2 });

    unsafe { std::env::set_var("EMAILJS_REQUEST_TIMEOUT_SECS", "soon") };
    let err = EmailJsConfig::from_env().unwrap_err();
    assert!(matches!(err, DispatchError::ConfigParse(_)));
    assert!(err.to_string().contains("EMAILJS_REQUEST_TIMEOUT_SECS"));

    unsafe {
        clear_emailjs_env();
        set_required_env();
        std::env::set_var("EMAILJS_TEMPLATE_ID", "  ");
    }
    let err = EmailJsConfig::from_env().unwrap_err();
    assert!(matches!(err, DispatchError::MissingConfig { ref var } if var == "EMAILJS_TEMPLATE_ID"));

    unsafe { clear_emailjs_env() };
    let err = EmailJsConfig::from_env().unwrap_err();
    assert_eq!(err.to_string(), "missing config: env var EMAILJS_SERVICE_ID not set");

    unsafe { clear_emailjs_env() };
}

#[test]
fn new_uses_default_endpoint() {
    let cfg = EmailJsConfig::new("s", "t", "p");
    assert_eq!(cfg.send_url(), "https://api.emailjs.com/api/v1.0/email/send");
    assert_eq!(cfg.timeouts.request_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    assert_eq!(cfg.timeouts.connect_secs, DEFAULT_CONNECT_TIMEOUT_SECS);
}

#[test]
fn debug_redacts_private_key() {
    let mut cfg = EmailJsConfig::new("s", "t", "p");
    cfg.private_key = Some("very-private".into());
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("very-private"));
    assert!(rendered.contains("<redacted>"));
}
