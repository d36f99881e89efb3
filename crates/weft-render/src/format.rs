use weft_core::UpdateOperation;

/// A wire encoding for update operations.
///
/// Implementations are pure and stateless: one operation plus its
/// already-rendered markup in, bytes out. New delivery protocols plug in
/// here without touching the update model or the channel registry.
pub trait WireFormat: Send + Sync {
    /// Encode one operation into `out`. `markup` is `None` exactly for
    /// removal operations.
    fn encode(&self, operation: &UpdateOperation, markup: Option<&str>, out: &mut String);

    /// Content type of a response body in this encoding.
    fn content_type(&self) -> &'static str;
}

/// Envelope encoding: each operation becomes an `<update-op>` element
/// carrying the action verb and target, with the rendered markup wrapped
/// in an inner `<template>`. Removals close the envelope immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvelopeFormat;

impl EnvelopeFormat {
    pub const MEDIA_TYPE: &'static str = "text/vnd.update-stream.html";
}

impl WireFormat for EnvelopeFormat {
    fn encode(&self, operation: &UpdateOperation, markup: Option<&str>, out: &mut String) {
        out.push_str("<update-op action=\"");
        out.push_str(operation.action().verb());
        out.push_str("\" target=\"");
        out.push_str(operation.target());
        out.push_str("\">");

        if let Some(markup) = markup {
            out.push_str("<template>");
            out.push_str(markup);
            out.push_str("</template>");
        }

        out.push_str("</update-op>");
    }

    fn content_type(&self) -> &'static str {
        Self::MEDIA_TYPE
    }
}

/// Out-of-band encoding: the target id doubles as the wrapper's identity
/// and a swap-mode attribute tells the client how to apply the content.
#[derive(Debug, Clone, Copy, Default)]
pub struct OobFormat;

impl OobFormat {
    pub const MEDIA_TYPE: &'static str = "text/html";
}

impl WireFormat for OobFormat {
    fn encode(&self, operation: &UpdateOperation, markup: Option<&str>, out: &mut String) {
        out.push_str("<div id=\"");
        out.push_str(operation.target());
        out.push_str("\" data-swap=\"");
        out.push_str(operation.action().swap_mode());
        out.push_str("\">");

        if let Some(markup) = markup {
            out.push_str(markup);
        }

        out.push_str("</div>");
    }

    fn content_type(&self) -> &'static str {
        Self::MEDIA_TYPE
    }
}
