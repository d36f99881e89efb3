//! Wire encodings and the streaming renderer.
//!
//! An [`UpdateSet`](weft_core::UpdateSet) says *what* should change; this
//! crate turns it into bytes. Fragment rendering itself is delegated to a
//! [`FragmentResolver`]; the renderer only decides which fragment to
//! resolve for each operation and how to wrap the markup, via a pluggable
//! [`WireFormat`]. Two encodings ship out of the box: the envelope
//! encoding ([`EnvelopeFormat`]) and the out-of-band swap encoding
//! ([`OobFormat`]).

pub mod error;
pub mod format;
pub mod renderer;
pub mod resolver;

pub use error::{RenderError, ResolveError};
pub use format::{EnvelopeFormat, OobFormat, WireFormat};
pub use renderer::Renderer;
pub use resolver::{Bindings, FnResolver, FragmentResolver};
