use std::io::Write;
use std::sync::Arc;

use weft_core::{FragmentSpec, UpdateOperation, UpdateSet};

use crate::error::Result;
use crate::format::{EnvelopeFormat, OobFormat, WireFormat};
use crate::resolver::{Bindings, FragmentResolver};

/// Renders update sets through a fragment resolver into one wire format.
///
/// Operations are resolved, encoded and flushed one at a time, in
/// insertion order. A failure mid-sequence aborts the pass and leaves
/// the bytes already written in place. Flushed output on a live
/// transport cannot be retracted, so the caller is responsible for
/// aborting the exchange. Nothing is retried.
pub struct Renderer {
    resolver: Arc<dyn FragmentResolver>,
    format: Box<dyn WireFormat>,
}

impl Renderer {
    pub fn new(resolver: Arc<dyn FragmentResolver>, format: Box<dyn WireFormat>) -> Self {
        Self { resolver, format }
    }

    /// Renderer using the envelope encoding.
    pub fn envelope(resolver: Arc<dyn FragmentResolver>) -> Self {
        Self::new(resolver, Box::new(EnvelopeFormat))
    }

    /// Renderer using the out-of-band encoding.
    pub fn oob(resolver: Arc<dyn FragmentResolver>) -> Self {
        Self::new(resolver, Box::new(OobFormat))
    }

    /// Content type of the bodies this renderer produces.
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }

    /// Stream the encoded update set into `sink`, one operation at a
    /// time.
    pub fn render_to(
        &self,
        updates: &UpdateSet,
        bindings: &Bindings,
        sink: &mut dyn Write,
    ) -> Result<()> {
        for operation in updates {
            let markup = self.resolve(operation, bindings)?;
            let mut encoded = String::new();
            self.format.encode(operation, markup.as_deref(), &mut encoded);
            sink.write_all(encoded.as_bytes())?;
        }

        Ok(())
    }

    /// Render the whole update set into a single payload string, e.g.
    /// for delivery as one server-sent event. Newlines in the resolved
    /// markup are stripped so the payload stays a single event data
    /// line.
    pub fn render_payload(&self, updates: &UpdateSet, bindings: &Bindings) -> Result<String> {
        let mut payload = String::new();

        for operation in updates {
            let markup = self
                .resolve(operation, bindings)?
                .map(|markup| markup.replace('\n', ""));
            self.format.encode(operation, markup.as_deref(), &mut payload);
        }

        Ok(payload)
    }

    fn resolve(&self, operation: &UpdateOperation, bindings: &Bindings) -> Result<Option<String>> {
        if operation.is_remove() {
            return Ok(None);
        }

        let spec = FragmentSpec::parse(operation.fragment());

        Ok(Some(self.resolver.resolve(&spec, bindings)?))
    }
}
