//! Prelude module for convenient imports
//!
//! Import everything you need with:
//! ```rust
//! use weft::prelude::*;
//! ```

pub use crate::{
    Action, Bindings, ChannelHandle, ChannelRegistry, ChannelSink, EnvelopeFormat, FnResolver,
    FragmentResolver, FragmentSpec, MpscSink, OobFormat, PeriodicPublisher, RenderError, Renderer,
    ResolveError, SinkError, UpdateBuilder, UpdateError, UpdateOperation, UpdateSet, WireFormat,
    DEFAULT_CHANNEL,
};
