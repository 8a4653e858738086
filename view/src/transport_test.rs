use std::cell::RefCell;
use std::rc::Rc;

use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;

use super::*;

type ServerTx = UnboundedSender<Result<String, String>>;

struct Harness {
    pool: LocalPool,
    outbox: Outbox,
    /// Frames the view wrote to the socket.
    wire: UnboundedReceiver<String>,
    /// Push frames "from the server".
    server: ServerTx,
    received: Rc<RefCell<Vec<String>>>,
    finished: Rc<RefCell<Option<bool>>>,
}

impl Harness {
    /// Spawn `drive`; `echo` makes every inbound frame trigger a `begin` send.
    fn start(echo: bool) -> Self {
        let pool = LocalPool::new();
        let (outbox, outgoing) = Outbox::channel();
        let (wire_tx, wire) = unbounded::<String>();
        let (server, server_rx) = unbounded::<Result<String, String>>();
        let received = Rc::new(RefCell::new(Vec::new()));
        let finished = Rc::new(RefCell::new(None));

        let sink_outbox = outbox.clone();
        let sink_received = Rc::clone(&received);
        let on_text = move |text: &str| {
            sink_received.borrow_mut().push(text.to_owned());
            if echo {
                sink_outbox.send(&Outbound::Begin).expect("send from handler");
            }
        };

        let task_outbox = outbox.clone();
        let task_finished = Rc::clone(&finished);
        pool.spawner()
            .spawn_local(async move {
                let result = drive(wire_tx, server_rx, task_outbox, outgoing, on_text).await;
                *task_finished.borrow_mut() = Some(result.is_ok());
            })
            .expect("spawn");

        Self { pool, outbox, wire, server, received, finished }
    }

    fn drain_wire(&mut self) -> Vec<String> {
        let mut out = Vec::new();
        while let Ok(Some(text)) = self.wire.try_next() {
            out.push(text);
        }
        out
    }
}

#[test]
fn send_before_open_is_rejected_and_not_queued() {
    let (outbox, mut outgoing) = Outbox::channel();
    assert_eq!(outbox.state(), LinkState::Connecting);
    assert_eq!(outbox.send(&Outbound::Begin), Err(SendError::NotOpen));
    assert!(outgoing.try_next().is_err(), "nothing should be queued");
}

#[test]
fn handshake_is_the_first_frame_on_the_wire() {
    let mut h = Harness::start(false);
    assert_eq!(h.outbox.send(&Outbound::Consent), Err(SendError::NotOpen));

    h.pool.run_until_stalled();
    assert_eq!(h.drain_wire(), vec![r#"{"type":"connected"}"#.to_owned()]);
    assert_eq!(h.outbox.state(), LinkState::Open);

    h.outbox.send(&Outbound::Consent).expect("send");
    h.pool.run_until_stalled();
    assert_eq!(h.drain_wire(), vec![r#"{"type":"consent"}"#.to_owned()]);
}

#[test]
fn exactly_one_handshake_precedes_handler_traffic() {
    let mut h = Harness::start(true);
    h.server.unbounded_send(Ok(r#"{"type":"goto","slide":1}"#.to_owned())).expect("push");
    h.pool.run_until_stalled();

    let wire = h.drain_wire();
    assert_eq!(wire.first().map(String::as_str), Some(r#"{"type":"connected"}"#));
    assert_eq!(wire.iter().filter(|t| t.contains("connected")).count(), 1);
    assert_eq!(wire.get(1).map(String::as_str), Some(r#"{"type":"begin"}"#));
}

#[test]
fn inbound_frames_reach_handler_in_arrival_order() {
    let mut h = Harness::start(false);
    for text in ["a", "b", "c"] {
        h.server.unbounded_send(Ok(text.to_owned())).expect("push");
    }
    h.pool.run_until_stalled();
    assert_eq!(*h.received.borrow(), vec!["a", "b", "c"]);
}

#[test]
fn server_close_ends_link_without_retry() {
    let mut h = Harness::start(false);
    h.pool.run_until_stalled();
    h.server.close_channel();
    h.pool.run_until_stalled();

    assert_eq!(*h.finished.borrow(), Some(true));
    assert_eq!(h.outbox.state(), LinkState::Closed);
    assert_eq!(h.outbox.send(&Outbound::Begin), Err(SendError::Closed));
    assert_eq!(h.drain_wire(), vec![r#"{"type":"connected"}"#.to_owned()]);
}

#[test]
fn receive_error_ends_link() {
    let mut h = Harness::start(false);
    h.server.unbounded_send(Err("reset by peer".to_owned())).expect("push");
    h.server.unbounded_send(Ok("late".to_owned())).expect("push");
    h.pool.run_until_stalled();

    assert_eq!(*h.finished.borrow(), Some(true));
    assert!(h.received.borrow().is_empty());
    assert_eq!(h.outbox.state(), LinkState::Closed);
}

#[test]
fn teardown_stops_the_loop_and_stays_closed() {
    let mut h = Harness::start(false);
    h.pool.run_until_stalled();
    h.outbox.teardown();
    h.pool.run_until_stalled();

    assert_eq!(*h.finished.borrow(), Some(true));
    assert_eq!(h.outbox.state(), LinkState::Closed);
    assert_eq!(h.outbox.send(&Outbound::Consent), Err(SendError::Closed));
}

#[test]
fn teardown_before_open_prevents_opening() {
    let (outbox, outgoing) = Outbox::channel();
    outbox.teardown();
    outbox.mark_open();
    assert_eq!(outbox.state(), LinkState::Closed);
    drop(outgoing);
}

#[test]
fn teardown_before_open_skips_the_handshake() {
    let mut pool = LocalPool::new();
    let (outbox, outgoing) = Outbox::channel();
    let (wire_tx, mut wire_rx) = unbounded::<String>();
    let (server, server_rx) = unbounded::<Result<String, String>>();
    server.unbounded_send(Ok(r#"{"type":"goto","slide":1}"#.to_owned())).expect("queue frame");

    outbox.teardown();
    let mut seen = Vec::new();
    let result = pool.run_until(drive(wire_tx, server_rx, outbox.clone(), outgoing, |text: &str| {
        seen.push(text.to_owned());
    }));

    assert!(result.is_ok());
    assert_eq!(outbox.state(), LinkState::Closed);
    assert!(seen.is_empty(), "no frames are routed for a stopped view");
    assert!(matches!(wire_rx.try_next(), Ok(None)), "nothing written and the sink is dropped");
}

#[test]
fn handshake_failure_closes_link() {
    let mut pool = LocalPool::new();
    let (outbox, outgoing) = Outbox::channel();
    let (wire_tx, wire_rx) = unbounded::<String>();
    drop(wire_rx);
    let (_server, server_rx) = unbounded::<Result<String, String>>();

    let result = pool.run_until(drive(wire_tx, server_rx, outbox.clone(), outgoing, |_: &str| {}));
    assert!(matches!(result, Err(TransportError::Handshake(_))));
    assert_eq!(outbox.state(), LinkState::Closed);
}
