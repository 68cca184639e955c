use super::*;
use serde_json::json;

#[test]
fn drain_preserves_arrival_order() {
    let (tx, mut rx) = bridge_channel();
    tx.send_event("click", Some(DrawableId::raw(5)), vec![json!(1)])
        .unwrap();
    tx.interrupt(InterruptSignal::SigInt).unwrap();
    tx.send_event("heartbeat", None, vec![]).unwrap();

    let drained = rx.drain();
    assert_eq!(drained.len(), 3);
    assert!(matches!(&drained[0], BridgeMessage::Event { name, target, .. }
        if name == "click" && *target == Some(DrawableId::raw(5))));
    assert_eq!(drained[1], BridgeMessage::Interrupt(InterruptSignal::SigInt));
    assert!(rx.drain().is_empty());
}

#[test]
fn senders_work_across_threads() {
    let (tx, mut rx) = bridge_channel();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let tx = tx.clone();
            std::thread::spawn(move || tx.send_event("motion", None, vec![json!(i)]).unwrap())
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(rx.drain().len(), 4);
}

#[test]
fn drain_after_senders_are_dropped() {
    let (tx, mut rx) = bridge_channel();
    tx.send_event("click", None, vec![]).unwrap();
    drop(tx);
    assert_eq!(rx.drain().len(), 1);
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Disconnected)));
}

#[test]
fn send_fails_once_receiver_is_gone() {
    let (tx, rx) = bridge_channel();
    drop(rx);
    assert!(tx.send_event("click", None, vec![]).is_err());
}
