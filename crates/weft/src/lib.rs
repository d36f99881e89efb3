//! # weft
//!
//! Server-driven partial page updates: request handlers describe *what*
//! should change on the page as an ordered set of update operations, and
//! weft delivers them: synchronously as the response body, or pushed
//! out of band to long-lived client connections registered as named
//! channels.
//!
//! ## Overview
//!
//! - **Describe** changes with the fluent, copy-on-append
//!   [`UpdateSet`] builder
//! - **Render** fragments through your own [`FragmentResolver`]
//! - **Encode** to the envelope or out-of-band wire format, or plug in
//!   a new [`WireFormat`]
//! - **Push** payloads to connected clients through the concurrent
//!   [`ChannelRegistry`], with deterministic cleanup on completion,
//!   error, timeout or delivery failure
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use weft::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Fragment rendering stays yours; register closures (or wrap a
//!     // real template engine behind the FragmentResolver trait).
//!     let resolver = Arc::new(FnResolver::new().fragment("todos", "item", |bindings| {
//!         format!("<li>{}</li>", bindings["title"])
//!     }));
//!     let renderer = Renderer::envelope(resolver);
//!
//!     // Describe the changes one request causes.
//!     let updates = UpdateSet::new()
//!         .append("todos").with_fragment("todos :: item")?
//!         .remove("empty-hint")?;
//!
//!     let mut bindings = Bindings::new();
//!     bindings.insert("title".to_string(), serde_json::json!("milk"));
//!
//!     // Synchronous path: stream into the response body.
//!     let mut body = Vec::new();
//!     renderer.render_to(&updates, &bindings, &mut body)?;
//!
//!     // Asynchronous path: broadcast to whoever is connected.
//!     let registry = Arc::new(ChannelRegistry::new());
//!     let payload = renderer.render_payload(&updates, &bindings)?;
//!     registry.broadcast(DEFAULT_CHANNEL, &payload).await?;
//!
//!     Ok(())
//! }
//! ```

pub use weft_core::{
    Action, FragmentSpec, UpdateBuilder, UpdateError, UpdateOperation, UpdateSet,
};
pub use weft_push::{
    ChannelHandle, ChannelRegistry, ChannelSink, MpscSink, PeriodicPublisher, SinkError,
    DEFAULT_CHANNEL,
};
pub use weft_render::{
    Bindings, EnvelopeFormat, FnResolver, FragmentResolver, OobFormat, RenderError, Renderer,
    ResolveError, WireFormat,
};

pub mod prelude;
