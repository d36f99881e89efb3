use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use weft_core::UpdateSet;
use weft_render::{Bindings, Renderer};

use crate::registry::ChannelRegistry;

/// Builds an update set on a fixed interval and pushes it to one named
/// channel.
///
/// A thin driver around the registry: ticks with nobody connected fall
/// through as silent no-op broadcasts, and render or delivery failures
/// are logged without stopping the loop.
pub struct PeriodicPublisher {
    registry: Arc<ChannelRegistry>,
    renderer: Arc<Renderer>,
    channel: String,
    interval: Duration,
}

impl PeriodicPublisher {
    pub fn new(
        registry: Arc<ChannelRegistry>,
        renderer: Arc<Renderer>,
        channel: impl Into<String>,
        interval: Duration,
    ) -> Self {
        Self {
            registry,
            renderer,
            channel: channel.into(),
            interval,
        }
    }

    /// Spawn the publishing loop. `build` is called on every tick for
    /// the next update set and bindings; an empty set skips the tick.
    /// Abort the returned handle to stop publishing.
    pub fn spawn<B>(self, mut build: B) -> JoinHandle<()>
    where
        B: FnMut() -> (UpdateSet, Bindings) + Send + 'static,
    {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;

                let (updates, bindings) = build();
                if updates.is_empty() {
                    continue;
                }

                let payload = match self.renderer.render_payload(&updates, &bindings) {
                    Ok(payload) => payload,
                    Err(err) => {
                        tracing::error!(channel = %self.channel, error = %err, "failed to render periodic update");
                        continue;
                    }
                };

                if let Err(err) = self.registry.broadcast(&self.channel, &payload).await {
                    tracing::warn!(channel = %self.channel, error = %err, "periodic push failed");
                }
            }
        })
    }
}
