use std::sync::Arc;
use std::time::Duration;
use vanity_event_bus::{EventBus, EventReceiverExt};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Snapshot(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
struct Saved(u64);

#[tokio::test]
async fn broadcast_reaches_every_subscriber() {
    let bus = EventBus::new();
    let mut first = bus.subscribe::<Saved>().unwrap();
    let mut second = bus.subscribe::<Saved>().unwrap();

    assert_eq!(bus.publish(Saved(9)).unwrap(), 2);

    assert_eq!(EventReceiverExt::recv(&mut first).await, Some(Arc::new(Saved(9))));
    assert_eq!(EventReceiverExt::recv(&mut second).await, Some(Arc::new(Saved(9))));
}

#[tokio::test]
async fn lagging_receiver_resumes_at_the_tail() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe_with_capacity::<Saved>(2).unwrap();

    for i in 0..20 {
        bus.publish(Saved(i)).unwrap();
    }

    let first = EventReceiverExt::recv(&mut rx).await.unwrap();
    assert!(first.0 >= 18, "expected the fresh tail, got {}", first.0);
    let second = EventReceiverExt::recv(&mut rx).await.unwrap();
    assert_eq!(second.0, first.0 + 1);
}

#[tokio::test]
async fn watch_yields_only_the_latest_value() {
    let bus = EventBus::new();
    let mut rx = bus.watch(Snapshot(0)).unwrap();

    bus.publish_latest(Snapshot(1)).unwrap();
    bus.publish_latest(Snapshot(2)).unwrap();

    assert_eq!(EventReceiverExt::recv(&mut rx).await, Some(Arc::new(Snapshot(2))));
    assert_eq!(bus.latest::<Snapshot>(), Some(Arc::new(Snapshot(2))));
}

#[tokio::test]
async fn event_types_are_isolated() {
    let bus = EventBus::new();
    let mut saved = bus.subscribe::<Saved>().unwrap();
    let _snapshots = bus.watch(Snapshot(0)).unwrap();

    bus.publish_latest(Snapshot(5)).unwrap();
    bus.publish(Saved(6)).unwrap();

    assert_eq!(EventReceiverExt::recv(&mut saved).await, Some(Arc::new(Saved(6))));
}

#[tokio::test]
async fn close_ends_subscriptions() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe::<Saved>().unwrap();
    let mut snapshots = bus.watch(Snapshot(0)).unwrap();

    assert_eq!(bus.close(), 2);

    let closed = tokio::time::timeout(Duration::from_secs(1), EventReceiverExt::recv(&mut rx)).await;
    assert_eq!(closed.unwrap(), None);
    let closed = tokio::time::timeout(Duration::from_secs(1), EventReceiverExt::recv(&mut snapshots)).await;
    assert_eq!(closed.unwrap(), None);
}
