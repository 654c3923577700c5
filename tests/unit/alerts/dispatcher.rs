//! Unit tests for alert dispatch

use crate::support::{FakeNotifier, RecordingSink};
use ratiowatch::alerts::{AlertDispatcher, DispatchOutcome};
use ratiowatch::models::alert::{AlertEvent, AlertTrigger};
use ratiowatch::models::rule::{Comparison, ThresholdType, TickerRule};
use ratiowatch::services::notification::Notifier;
use std::sync::Arc;

fn pe_alert() -> AlertEvent {
    AlertEvent::new(
        "ACME",
        TickerRule::new("ACME", ThresholdType::PriceEarnings, 12.0, Comparison::LessThan),
        AlertTrigger::PriceEarnings {
            ratio: 10.0,
            comparison: Comparison::LessThan,
            threshold: 12.0,
        },
    )
}

#[tokio::test]
async fn test_local_only_without_notifier() {
    let sink = RecordingSink::new();
    let dispatcher = AlertDispatcher::new(None).with_local_sink(sink.clone());

    assert!(!dispatcher.has_notifier());
    assert_eq!(dispatcher.dispatch(pe_alert()).await, DispatchOutcome::LocalOnly);
    assert_eq!(
        sink.messages(),
        vec!["ALERT: ACME P/E ratio (10.00) is lt threshold (12)!".to_string()]
    );
}

#[tokio::test]
async fn test_delivered_to_notifier_destination() {
    let sink = RecordingSink::new();
    let notifier = FakeNotifier::working();
    let dispatcher = AlertDispatcher::new(Some(notifier.clone() as Arc<dyn Notifier>))
        .with_local_sink(sink.clone());

    assert_eq!(dispatcher.dispatch(pe_alert()).await, DispatchOutcome::Delivered);

    let attempts = notifier.attempts();
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].0, "chat-1");
    assert_eq!(attempts[0].1, sink.messages()[0]);
}

#[tokio::test]
async fn test_delivery_failure_keeps_local_output() {
    let sink = RecordingSink::new();
    let notifier = FakeNotifier::failing();
    let dispatcher = AlertDispatcher::new(Some(notifier.clone() as Arc<dyn Notifier>))
        .with_local_sink(sink.clone());

    assert_eq!(
        dispatcher.dispatch(pe_alert()).await,
        DispatchOutcome::DeliveryFailed
    );
    assert_eq!(sink.messages().len(), 1);
    // One attempt, no retries.
    assert_eq!(notifier.attempts().len(), 1);
}
