use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

/// Delivery failure on a channel sink.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The receiving side is gone; the channel must be torn down.
    #[error("Sink closed")]
    Closed,

    #[error("Sink I/O error: {0}")]
    Io(String),
}

/// Output side of a push channel.
///
/// The transport that created the connection owns the sink; the registry
/// only holds a reference for delivery. A send may block on transport
/// backpressure, so callers should not hold locks across it.
#[async_trait]
pub trait ChannelSink: Send + Sync {
    async fn send(&self, payload: &str) -> Result<(), SinkError>;
}

/// Sink backed by a tokio mpsc sender.
///
/// The receiving half is handed to the transport, which typically wraps
/// it in a `ReceiverStream` and forwards each payload as one server-sent
/// event. Once the receiver is dropped (client gone), the next send
/// fails with [`SinkError::Closed`] and the registry tears the channel
/// down.
pub struct MpscSink {
    tx: mpsc::Sender<String>,
}

impl MpscSink {
    pub fn new(tx: mpsc::Sender<String>) -> Self {
        Self { tx }
    }

    /// Create a sink together with its receiving half.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }
}

#[async_trait]
impl ChannelSink for MpscSink {
    async fn send(&self, payload: &str) -> Result<(), SinkError> {
        self.tx
            .send(payload.to_string())
            .await
            .map_err(|_| SinkError::Closed)
    }
}
