use super::*;

#[test]
fn token_exposes_raw_value() {
    let token = CaptchaToken::new("03AGdBq25");
    assert_eq!(token.as_str(), "03AGdBq25");
}

#[test]
fn token_debug_hides_value() {
    let token = CaptchaToken::new("super-secret");
    let rendered = format!("{token:?}");
    assert!(!rendered.contains("super-secret"));
    assert_eq!(rendered, "CaptchaToken(<12 bytes>)");
}

#[test]
fn tokens_compare_by_value() {
    assert_eq!(CaptchaToken::new("a"), CaptchaToken::new(String::from("a")));
    assert_ne!(CaptchaToken::new("a"), CaptchaToken::new("b"));
}
