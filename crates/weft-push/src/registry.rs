use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use tokio::sync::Mutex;

use crate::sink::{ChannelSink, SinkError};

/// Name a transport gets when it opens a channel without picking one.
pub const DEFAULT_CHANNEL: &str = "default";

/// A registered push channel. The registry owns this entry; the sink it
/// wraps belongs to the transport holding the live connection.
struct Channel {
    name: String,
    sink: Arc<dyn ChannelSink>,
    timeout: Option<Duration>,
    closed: AtomicBool,
    // Serializes deliveries so concurrent broadcasts to one name cannot
    // interleave bytes on the sink.
    write_gate: Mutex<()>,
}

impl Channel {
    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Concurrent registry of named push channels.
///
/// [`open`](ChannelRegistry::open) registers, [`broadcast`](ChannelRegistry::broadcast)
/// delivers, and the transport reports the end of a connection's life
/// through its [`ChannelHandle`]; whichever of completion, error,
/// timeout or delivery failure happens first removes the entry.
/// Broadcasting to a name nobody holds open is a no-op; the client may
/// simply not be connected yet.
///
/// The name map is guarded by a lock that is never held across an await;
/// each channel carries its own async write gate, so a slow delivery on
/// one channel never blocks opens, closes or broadcasts on unrelated
/// names.
pub struct ChannelRegistry {
    channels: RwLock<HashMap<String, Arc<Channel>>>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self {
            channels: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new open channel under `name`, replacing any prior
    /// entry (last writer wins). The previous holder is not signalled;
    /// its transport is expected to close the superseded sink itself.
    ///
    /// `timeout` is advisory: the registry runs no timers. The transport
    /// enforces the duration and reports expiry through
    /// [`ChannelHandle::timed_out`].
    pub fn open(
        self: &Arc<Self>,
        name: impl Into<String>,
        sink: Arc<dyn ChannelSink>,
        timeout: Option<Duration>,
    ) -> ChannelHandle {
        let name = name.into();
        let channel = Arc::new(Channel {
            name: name.clone(),
            sink,
            timeout,
            closed: AtomicBool::new(false),
            write_gate: Mutex::new(()),
        });

        let previous = self.write_map().insert(name.clone(), Arc::clone(&channel));
        if let Some(previous) = previous {
            previous.close();
            tracing::debug!(channel = %name, "superseded existing channel");
        }

        tracing::debug!(channel = %name, "channel opened");

        ChannelHandle {
            registry: Arc::clone(self),
            channel,
        }
    }

    /// Close and deregister whatever is registered under `name`; no-op
    /// when nothing is.
    pub fn close(&self, name: &str) {
        if let Some(channel) = self.write_map().remove(name) {
            channel.close();
            tracing::debug!(channel = %name, "channel closed");
        }
    }

    /// Deliver `payload` to the channel registered under `name`.
    ///
    /// Returns `Ok(())` when no such channel exists, since an unobserved
    /// broadcast is not a failure. A sink error closes and deregisters
    /// the channel before it is returned to the caller.
    pub async fn broadcast(&self, name: &str, payload: &str) -> Result<(), SinkError> {
        let channel = self.read_map().get(name).cloned();
        let Some(channel) = channel else {
            return Ok(());
        };

        let gate = channel.write_gate.lock().await;
        if channel.is_closed() {
            return Ok(());
        }

        if let Err(err) = channel.sink.send(payload).await {
            drop(gate);
            tracing::warn!(channel = %name, error = %err, "delivery failed, closing channel");
            self.deregister(&channel);
            return Err(err);
        }

        Ok(())
    }

    /// Whether a channel is currently registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.read_map().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.read_map().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_map().is_empty()
    }

    /// Mark closed and remove the entry, but only while it still points
    /// at this very channel. A handle left over from before a re-open
    /// must not evict the replacement.
    fn deregister(&self, channel: &Arc<Channel>) {
        channel.close();

        let mut channels = self.write_map();
        if channels
            .get(&channel.name)
            .is_some_and(|current| Arc::ptr_eq(current, channel))
        {
            channels.remove(&channel.name);
            tracing::debug!(channel = %channel.name, "channel deregistered");
        }
    }

    fn read_map(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<Channel>>> {
        self.channels.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_map(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<Channel>>> {
        self.channels.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Transport-side handle to a registered channel.
///
/// The transport reports how the connection ended through this handle.
/// All three notifications deregister the channel; they are idempotent
/// and safe to fire after the channel has been superseded.
#[derive(Clone)]
pub struct ChannelHandle {
    registry: Arc<ChannelRegistry>,
    channel: Arc<Channel>,
}

impl ChannelHandle {
    /// Name the channel is registered under.
    pub fn name(&self) -> &str {
        &self.channel.name
    }

    /// Advisory timeout the channel was opened with, for the transport
    /// to enforce.
    pub fn timeout(&self) -> Option<Duration> {
        self.channel.timeout
    }

    pub fn is_closed(&self) -> bool {
        self.channel.is_closed()
    }

    /// The connection finished normally.
    pub fn complete(&self) {
        tracing::debug!(channel = %self.channel.name, "channel completed");
        self.registry.deregister(&self.channel);
    }

    /// The transport hit an error on the connection.
    pub fn error(&self) {
        tracing::debug!(channel = %self.channel.name, "channel errored");
        self.registry.deregister(&self.channel);
    }

    /// The transport-enforced timeout expired.
    pub fn timed_out(&self) {
        tracing::debug!(channel = %self.channel.name, "channel timed out");
        self.registry.deregister(&self.channel);
    }
}
