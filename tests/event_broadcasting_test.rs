//! Broadcast hub integration tests
//!
//! Verifies the fan-out guarantees: per-subscriber publish order, no
//! cross-subscriber blocking, safe deregistration, and no replay for
//! late joiners.

use engram::{Event, EventHub};

#[tokio::test]
async fn test_all_subscribers_receive_all_events_in_order() {
    let hub = EventHub::new(16);
    let mut subscriptions = Vec::new();
    for _ in 0..3 {
        subscriptions.push(hub.subscribe());
    }

    let events: Vec<Event> = (0..5)
        .map(|i| Event::memory_search(format!("query-{}", i), i))
        .collect();
    for event in &events {
        assert_eq!(hub.publish(event.clone()), 3);
    }

    for (_guard, rx) in subscriptions.iter_mut() {
        for expected in &events {
            let received = rx.try_recv().expect("subscriber missed an event");
            assert_eq!(received.id, expected.id);
        }
        assert!(rx.try_recv().is_err());
    }
}

#[tokio::test]
async fn test_stalled_subscriber_does_not_block_others() {
    let hub = EventHub::new(4);
    let (_stalled_guard, _stalled_rx) = hub.subscribe();
    let (_guard, mut rx) = hub.subscribe();

    // six events overflow the stalled subscriber's queue of four; the
    // reading subscriber drains as it goes and misses nothing
    for i in 0..6 {
        hub.publish(Event::memory_search(format!("q{}", i), i));
        let received = rx.try_recv().expect("reader should keep receiving");
        assert!(matches!(
            received.event_type,
            engram::EventType::MemorySearch { .. }
        ));
    }

    assert_eq!(hub.subscriber_count(), 1);
}

#[tokio::test]
async fn test_publish_after_disconnect_is_harmless() {
    let hub = EventHub::new(8);
    let (guard, rx) = hub.subscribe();

    // simulate the transport dropping the session
    drop(rx);
    drop(guard);

    assert_eq!(hub.publish(Event::heartbeat()), 0);
    assert_eq!(hub.subscriber_count(), 0);
}

#[tokio::test]
async fn test_late_joiner_sees_only_later_events() {
    let hub = EventHub::new(8);
    let (_first_guard, mut first_rx) = hub.subscribe();

    let early = Event::memory_search("early".to_string(), 0);
    hub.publish(early.clone());

    let (_second_guard, mut second_rx) = hub.subscribe();
    let late = Event::memory_search("late".to_string(), 0);
    hub.publish(late.clone());

    assert_eq!(first_rx.try_recv().unwrap().id, early.id);
    assert_eq!(first_rx.try_recv().unwrap().id, late.id);

    // no backlog replay for the late joiner
    assert_eq!(second_rx.try_recv().unwrap().id, late.id);
    assert!(second_rx.try_recv().is_err());
}
