use thiserror::Error;

/// A fragment identifier that could not be resolved to markup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Fragment not found: {0}")]
    FragmentNotFound(String),
}

/// Failure during a render pass. Bytes already flushed to the sink stay
/// written; the caller decides how to abort the exchange.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Fragment resolution failed: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Write failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
