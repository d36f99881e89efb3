//! Asynchronous push delivery for weft.
//!
//! Long-lived client connections register themselves as named channels
//! in a [`ChannelRegistry`]; request handlers and background tasks then
//! [`broadcast`](ChannelRegistry::broadcast) rendered payloads to a name
//! without knowing whether anyone is listening. Channel lifecycle is
//! deterministic: completion, transport error, timeout or a failed
//! delivery all deregister the channel immediately, and a broadcast to
//! an absent name is a silent no-op.

pub mod publisher;
pub mod registry;
pub mod sink;

pub use publisher::PeriodicPublisher;
pub use registry::{ChannelHandle, ChannelRegistry, DEFAULT_CHANNEL};
pub use sink::{ChannelSink, MpscSink, SinkError};
