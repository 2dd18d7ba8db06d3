use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

// =============================================================
// SubmissionStatus
// =============================================================

#[test]
fn status_defaults_to_idle() {
    assert_eq!(SubmissionStatus::default(), SubmissionStatus::Idle);
    assert!(SubmissionStatus::Idle.is_idle());
    assert!(!SubmissionStatus::Error.is_idle());
}

#[test]
fn banners_match_form_copy() {
    assert_eq!(SubmissionStatus::Idle.banner(), None);
    assert_eq!(
        SubmissionStatus::Success.banner(),
        Some("Message sent successfully! I'll get back to you soon.")
    );
    assert_eq!(
        SubmissionStatus::Error.banner(),
        Some("There was an error sending your message. Please try again or contact me directly via email.")
    );
}

#[test]
fn status_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&SubmissionStatus::Success).unwrap(), "\"success\"");
}

// =============================================================
// RevertTimer
// =============================================================

fn counter() -> (Arc<AtomicUsize>, impl FnOnce() + Send + 'static) {
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_in_task = hits.clone();
    (hits, move || {
        hits_in_task.fetch_add(1, Ordering::SeqCst);
    })
}

#[tokio::test(start_paused = true)]
async fn timer_fires_after_delay() {
    let mut timer = RevertTimer::default();
    let (hits, revert) = counter();
    timer.schedule(STATUS_DISPLAY, revert);
    assert!(timer.is_scheduled());

    tokio::time::sleep(STATUS_DISPLAY - Duration::from_secs(1)).await;
    assert_eq!(hits.load(Ordering::SeqCst), 0);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert!(!timer.is_scheduled());
}

#[tokio::test(start_paused = true)]
async fn cancelled_timer_never_fires() {
    let mut timer = RevertTimer::default();
    let (hits, revert) = counter();
    timer.schedule(STATUS_DISPLAY, revert);
    timer.cancel();
    assert!(!timer.is_scheduled());

    tokio::time::sleep(STATUS_DISPLAY * 2).await;
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn rescheduling_replaces_previous_timer() {
    let mut timer = RevertTimer::default();
    let (first_hits, first) = counter();
    let (second_hits, second) = counter();

    timer.schedule(Duration::from_secs(5), first);
    timer.schedule(Duration::from_secs(10), second);

    tokio::time::sleep(Duration::from_secs(11)).await;
    assert_eq!(first_hits.load(Ordering::SeqCst), 0);
    assert_eq!(second_hits.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn dropping_timer_aborts_it() {
    let (hits, revert) = counter();
    {
        let mut timer = RevertTimer::default();
        timer.schedule(Duration::from_secs(1), revert);
    }
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}
