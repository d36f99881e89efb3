use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use weft_push::{ChannelRegistry, ChannelSink, MpscSink, SinkError, DEFAULT_CHANNEL};

/// Sink that records whole payloads and how often it was written to.
struct RecordingSink {
    payloads: Mutex<Vec<String>>,
    writes: AtomicUsize,
}

impl RecordingSink {
    fn new() -> Self {
        Self {
            payloads: Mutex::new(Vec::new()),
            writes: AtomicUsize::new(0),
        }
    }

    fn payloads(&self) -> Vec<String> {
        self.payloads.lock().unwrap().clone()
    }

    fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChannelSink for RecordingSink {
    async fn send(&self, payload: &str) -> Result<(), SinkError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.payloads.lock().unwrap().push(payload.to_string());
        Ok(())
    }
}

/// Sink that appends bytes in two halves with a yield in between, so an
/// unserialized concurrent writer would interleave.
struct SlowByteSink {
    buf: Mutex<Vec<u8>>,
}

impl SlowByteSink {
    fn new() -> Self {
        Self {
            buf: Mutex::new(Vec::new()),
        }
    }

    fn contents(&self) -> String {
        String::from_utf8(self.buf.lock().unwrap().clone()).unwrap()
    }
}

#[async_trait]
impl ChannelSink for SlowByteSink {
    async fn send(&self, payload: &str) -> Result<(), SinkError> {
        let (head, tail) = payload.as_bytes().split_at(payload.len() / 2);
        self.buf.lock().unwrap().extend_from_slice(head);
        tokio::task::yield_now().await;
        self.buf.lock().unwrap().extend_from_slice(tail);
        Ok(())
    }
}

#[tokio::test]
async fn broadcast_to_absent_name_is_a_silent_noop() {
    let registry = Arc::new(ChannelRegistry::new());

    assert!(registry.broadcast("nobody", "payload").await.is_ok());
    assert!(!registry.contains("nobody"));
}

#[tokio::test]
async fn broadcast_delivers_to_the_named_channel() {
    let registry = Arc::new(ChannelRegistry::new());
    let sink = Arc::new(RecordingSink::new());

    registry.open("updates", Arc::clone(&sink) as _, None);
    registry.broadcast("updates", "u1").await.unwrap();
    registry.broadcast("updates", "u2").await.unwrap();

    assert_eq!(sink.payloads(), vec!["u1", "u2"]);
}

#[tokio::test]
async fn close_is_idempotent() {
    let registry = Arc::new(ChannelRegistry::new());
    registry.open(DEFAULT_CHANNEL, Arc::new(RecordingSink::new()), None);

    registry.close(DEFAULT_CHANNEL);
    registry.close(DEFAULT_CHANNEL);

    assert!(registry.is_empty());
}

#[tokio::test]
async fn no_delivery_after_timeout() {
    let registry = Arc::new(ChannelRegistry::new());
    let sink = Arc::new(RecordingSink::new());

    let handle = registry.open(
        DEFAULT_CHANNEL,
        Arc::clone(&sink) as _,
        Some(Duration::from_secs(30)),
    );
    assert_eq!(handle.timeout(), Some(Duration::from_secs(30)));

    registry.broadcast(DEFAULT_CHANNEL, "u1").await.unwrap();
    handle.timed_out();

    // Subsequent broadcast is a silent no-op and the entry is gone.
    registry.broadcast(DEFAULT_CHANNEL, "u2").await.unwrap();
    assert_eq!(sink.payloads(), vec!["u1"]);
    assert!(!registry.contains(DEFAULT_CHANNEL));
}

#[tokio::test]
async fn lifecycle_notifications_are_idempotent() {
    let registry = Arc::new(ChannelRegistry::new());
    let sink = Arc::new(RecordingSink::new());

    let handle = registry.open("events", Arc::clone(&sink) as _, None);
    handle.complete();
    handle.error();
    handle.timed_out();

    assert!(handle.is_closed());
    assert!(!registry.contains("events"));
    registry.broadcast("events", "late").await.unwrap();
    assert_eq!(sink.writes(), 0);
}

#[tokio::test]
async fn delivery_failure_closes_and_deregisters() {
    let registry = Arc::new(ChannelRegistry::new());
    let (sink, rx) = MpscSink::channel(4);

    registry.open("events", Arc::new(sink), None);
    drop(rx);

    let err = registry.broadcast("events", "payload").await.unwrap_err();
    assert!(matches!(err, SinkError::Closed));
    assert!(!registry.contains("events"));

    // The name is free again and later broadcasts are no-ops.
    assert!(registry.broadcast("events", "payload").await.is_ok());
}

#[tokio::test]
async fn reopen_replaces_previous_channel() {
    let registry = Arc::new(ChannelRegistry::new());
    let first = Arc::new(RecordingSink::new());
    let second = Arc::new(RecordingSink::new());

    let stale = registry.open("events", Arc::clone(&first) as _, None);
    registry.open("events", Arc::clone(&second) as _, None);

    registry.broadcast("events", "payload").await.unwrap();
    assert_eq!(first.writes(), 0);
    assert_eq!(second.payloads(), vec!["payload"]);

    // A handle from before the re-open must not evict the replacement.
    stale.complete();
    assert!(registry.contains("events"));
    registry.broadcast("events", "again").await.unwrap();
    assert_eq!(second.writes(), 2);
}

#[tokio::test]
async fn concurrent_broadcasts_never_interleave_within_one_sink() {
    let registry = Arc::new(ChannelRegistry::new());
    let left = Arc::new(SlowByteSink::new());
    let right = Arc::new(SlowByteSink::new());

    registry.open("left", Arc::clone(&left) as _, None);
    registry.open("right", Arc::clone(&right) as _, None);

    let mut tasks = Vec::new();
    for task in 0..8 {
        for name in ["left", "right"] {
            let registry = Arc::clone(&registry);
            tasks.push(tokio::spawn(async move {
                for i in 0..10 {
                    let payload = format!("<msg task={} i={}/>", task, i);
                    registry.broadcast(name, &payload).await.unwrap();
                }
            }));
        }
    }
    for task in tasks {
        task.await.unwrap();
    }

    for sink in [&left, &right] {
        let contents = sink.contents();
        // Every message must appear as one contiguous run; any
        // interleaving would split a "<msg" prefix from its "/>".
        let mut rest = contents.as_str();
        let mut count = 0;
        while !rest.is_empty() {
            assert!(rest.starts_with("<msg "), "interleaved output: {}", contents);
            let end = rest.find("/>").expect("truncated message") + 2;
            count += 1;
            rest = &rest[end..];
        }
        assert_eq!(count, 80);
    }
}

#[tokio::test]
async fn no_delivery_after_close_races_with_broadcasts() {
    let registry = Arc::new(ChannelRegistry::new());
    let sink = Arc::new(RecordingSink::new());
    let handle = registry.open("racy", Arc::clone(&sink) as _, None);

    let broadcaster = {
        let registry = Arc::clone(&registry);
        tokio::spawn(async move {
            for i in 0..100 {
                // Errors cannot happen here; the channel either delivers
                // or is already gone.
                registry
                    .broadcast("racy", &format!("m{}", i))
                    .await
                    .unwrap();
                tokio::task::yield_now().await;
            }
        })
    };

    tokio::task::yield_now().await;
    handle.complete();
    let writes_at_close = sink.writes();
    broadcaster.await.unwrap();

    // Nothing was written after the channel reported completion.
    assert_eq!(sink.writes(), writes_at_close);
}
