use thiserror::Error;

/// Build-time validation failures. These fire while an update set is
/// being built; an invalid operation is never recorded.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UpdateError {
    #[error("Target must not be empty")]
    EmptyTarget,

    #[error("Template name must not be empty")]
    EmptyTemplate,

    #[error("Fragment identifier must not be empty")]
    EmptyFragment,

    #[error("Invalid fragment identifier: {0}")]
    InvalidFragment(String),
}

pub type Result<T> = std::result::Result<T, UpdateError>;
