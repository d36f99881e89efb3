use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{Stream, StreamExt};
use tokio_stream::wrappers::ReceiverStream;

use weft_push::{ChannelHandle, MpscSink, DEFAULT_CHANNEL};

use crate::state::AppState;

/// Subscribe to the default channel.
pub async fn subscribe_default(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    open_stream(state, DEFAULT_CHANNEL.to_string())
}

/// Subscribe to a named channel.
pub async fn subscribe(
    State(state): State<AppState>,
    Path(channel): Path<String>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    open_stream(state, channel)
}

/// Reports the end of the SSE stream's life when the response stream is
/// dropped (client disconnect or server shutdown).
struct StreamGuard {
    handle: ChannelHandle,
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        self.handle.complete();
    }
}

fn open_stream(
    state: AppState,
    channel: String,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (sink, rx) = MpscSink::channel(state.config.channels.capacity);
    let timeout = state.config.channels.timeout_secs.map(Duration::from_secs);

    let handle = state.registry.open(channel, Arc::new(sink), timeout);
    tracing::debug!(channel = %handle.name(), "sse stream opened");

    // The registry only records the timeout; enforcing it is this
    // transport's job.
    if let Some(duration) = timeout {
        let expiry = handle.clone();
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            expiry.timed_out();
        });
    }

    let guard = StreamGuard { handle };
    let stream = ReceiverStream::new(rx).map(move |payload| {
        let _ = &guard; // hold until the stream itself is dropped
        Ok(Event::default().data(payload))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
