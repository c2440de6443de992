// Tests for the emergency trigger and its auto-dismissed acknowledgment

use healthvitals_overlay::session::{Collaborators, EmergencyFlow, EMERGENCY_BANNER};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

fn counting_collaborators() -> (Collaborators, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let collaborators = Collaborators::new(|_: &str| {}).on_emergency(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (collaborators, calls)
}

#[tokio::test(start_paused = true)]
async fn test_acknowledgment_clears_after_window() {
    let (collaborators, calls) = counting_collaborators();
    let mut flow = EmergencyFlow::new(Duration::from_millis(2000));
    assert!(!flow.is_acknowledged());
    assert_eq!(flow.banner(), None);

    flow.trigger(&collaborators);
    assert!(flow.is_acknowledged());
    assert_eq!(flow.banner(), Some(EMERGENCY_BANNER));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    sleep(Duration::from_millis(1950)).await;
    assert!(flow.is_acknowledged());

    sleep(Duration::from_millis(100)).await;
    assert!(!flow.is_acknowledged());
    assert_eq!(flow.banner(), None);
}

#[tokio::test(start_paused = true)]
async fn test_retrigger_restarts_window() {
    let (collaborators, calls) = counting_collaborators();
    let mut flow = EmergencyFlow::new(Duration::from_millis(2000));

    flow.trigger(&collaborators);
    sleep(Duration::from_millis(1000)).await;
    flow.trigger(&collaborators);
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    // t = 2500ms: first window would have closed, second is still open
    sleep(Duration::from_millis(1500)).await;
    assert!(flow.is_acknowledged());

    // t = 3050ms
    sleep(Duration::from_millis(550)).await;
    assert!(!flow.is_acknowledged());
}

#[tokio::test(start_paused = true)]
async fn test_missing_callback_is_a_no_op() {
    let collaborators = Collaborators::new(|_: &str| {});
    let mut flow = EmergencyFlow::new(Duration::from_millis(2000));

    flow.trigger(&collaborators);
    assert!(flow.is_acknowledged());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_leaves_no_pending_dismiss() {
    let (collaborators, _calls) = counting_collaborators();
    let mut flow = EmergencyFlow::new(Duration::from_millis(2000));

    flow.trigger(&collaborators);
    flow.cancel();

    sleep(Duration::from_secs(5)).await;
    assert!(flow.is_acknowledged());
}

#[test]
fn test_trigger_without_runtime_still_notifies() {
    let (collaborators, calls) = counting_collaborators();
    let mut flow = EmergencyFlow::new(Duration::from_millis(2000));

    flow.trigger(&collaborators);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(!flow.is_acknowledged());
}
