use tokio::sync::mpsc;

use clubhouse::live::hub::RoundHub;

struct Peer {
    id: u64,
    rx: mpsc::UnboundedReceiver<String>,
}

async fn join(hub: &RoundHub, round: &str) -> Peer {
    let id = hub.next_session_id();
    let (tx, rx) = mpsc::unbounded_channel();
    hub.subscribe(id, round, tx).await;
    Peer { id, rx }
}

#[tokio::test]
async fn relay_reaches_siblings_only() {
    let hub = RoundHub::new();
    let alice = join(&hub, "R1").await;
    let mut bob = join(&hub, "R1").await;
    let mut carol = join(&hub, "R2").await;

    let delivered = hub.relay(alice.id, r#"{"hole":3,"score":4}"#).await;
    assert_eq!(delivered, 1);
    assert_eq!(bob.rx.recv().await.unwrap(), r#"{"hole":3,"score":4}"#);
    assert!(carol.rx.try_recv().is_err(), "other rounds stay quiet");

    // The sender never hears its own update.
    let mut alice = alice;
    assert!(alice.rx.try_recv().is_err());
}

#[tokio::test]
async fn relay_without_subscription_is_a_noop() {
    let hub = RoundHub::new();
    let stranger = hub.next_session_id();
    assert_eq!(hub.relay(stranger, "{}").await, 0);
}

#[tokio::test]
async fn disconnect_stops_delivery() {
    let hub = RoundHub::new();
    let alice = join(&hub, "R1").await;
    let bob = join(&hub, "R1").await;

    hub.disconnect(bob.id).await;
    assert_eq!(hub.relay(alice.id, "{}").await, 0);
}

#[tokio::test]
async fn dropped_receiver_is_skipped() {
    let hub = RoundHub::new();
    let alice = join(&hub, "R1").await;
    let bob = join(&hub, "R1").await;
    let mut carol = join(&hub, "R1").await;

    // Bob's task died without a clean disconnect.
    drop(bob.rx);

    let delivered = hub.relay(alice.id, r#"{"hole":1}"#).await;
    assert_eq!(delivered, 1);
    assert_eq!(carol.rx.recv().await.unwrap(), r#"{"hole":1}"#);
}

#[tokio::test]
async fn resubscribing_keeps_old_round_membership() {
    let hub = RoundHub::new();
    let mut alice = join(&hub, "R1").await;
    let bob = join(&hub, "R1").await;

    // Alice switches rounds; her relays now target R2, but her entry in R1's
    // subscriber set remains.
    let (tx, _rx2) = mpsc::unbounded_channel();
    hub.subscribe(alice.id, "R2", tx).await;

    assert_eq!(hub.relay(bob.id, r#"{"hole":9}"#).await, 1);
    assert_eq!(alice.rx.recv().await.unwrap(), r#"{"hole":9}"#);
}

#[tokio::test]
async fn deliveries_arrive_in_send_order() {
    let hub = RoundHub::new();
    let alice = join(&hub, "R1").await;
    let mut bob = join(&hub, "R1").await;

    for i in 1..=5 {
        hub.relay(alice.id, &format!(r#"{{"seq":{i}}}"#)).await;
    }
    for i in 1..=5 {
        assert_eq!(bob.rx.recv().await.unwrap(), format!(r#"{{"seq":{i}}}"#));
    }
}
