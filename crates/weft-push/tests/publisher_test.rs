use std::sync::Arc;
use std::time::Duration;

use weft_core::UpdateSet;
use weft_push::{ChannelRegistry, MpscSink, PeriodicPublisher};
use weft_render::{Bindings, FnResolver, Renderer};

fn clock_renderer() -> Arc<Renderer> {
    let resolver = Arc::new(FnResolver::new().fragment("clock", "time", |bindings| {
        format!("<span>{}</span>", bindings["tick"])
    }));
    Arc::new(Renderer::envelope(resolver))
}

#[tokio::test]
async fn publishes_rendered_updates_on_every_tick() {
    let registry = Arc::new(ChannelRegistry::new());
    let (sink, mut rx) = MpscSink::channel(16);
    registry.open("clock", Arc::new(sink), None);

    let publisher = PeriodicPublisher::new(
        Arc::clone(&registry),
        clock_renderer(),
        "clock",
        Duration::from_millis(10),
    );

    let mut tick = 0;
    let task = publisher.spawn(move || {
        tick += 1;
        let updates = UpdateSet::new()
            .replace("clock")
            .with_fragment("clock :: time")
            .expect("static fragment identifier");
        let mut bindings = Bindings::new();
        bindings.insert("tick".to_string(), serde_json::json!(tick));
        (updates, bindings)
    });

    let first = rx.recv().await.expect("first tick");
    assert_eq!(
        first,
        "<update-op action=\"replace\" target=\"clock\"><template><span>1</span></template></update-op>"
    );

    let second = rx.recv().await.expect("second tick");
    assert!(second.contains("<span>2</span>"));

    task.abort();
}

#[tokio::test]
async fn keeps_ticking_with_nobody_connected() {
    let registry = Arc::new(ChannelRegistry::new());

    let publisher = PeriodicPublisher::new(
        Arc::clone(&registry),
        clock_renderer(),
        "clock",
        Duration::from_millis(5),
    );
    let task = publisher.spawn(|| {
        let updates = UpdateSet::new()
            .replace("clock")
            .with_fragment("clock :: time")
            .expect("static fragment identifier");
        let mut bindings = Bindings::new();
        bindings.insert("tick".to_string(), serde_json::json!(0));
        (updates, bindings)
    });

    // Let a few ticks elapse with no channel open, then connect.
    tokio::time::sleep(Duration::from_millis(20)).await;
    let (sink, mut rx) = MpscSink::channel(16);
    registry.open("clock", Arc::new(sink), None);

    let payload = rx.recv().await.expect("payload after late connect");
    assert!(payload.contains("<span>0</span>"));

    task.abort();
}
