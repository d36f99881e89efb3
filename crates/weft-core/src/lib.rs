//! Core update model for weft.
//!
//! A request handler describes what should change on the page as an
//! ordered set of update operations: append, prepend, replace or update a
//! region with a rendered fragment, or remove a region outright. The set
//! is accumulated through a fluent builder and handed to a renderer
//! (synchronous response body) or a channel registry (asynchronous push);
//! this crate only covers the model and its build-time validation.
//!
//! ```rust
//! use weft_core::UpdateSet;
//!
//! # fn main() -> Result<(), weft_core::UpdateError> {
//! let updates = UpdateSet::new()
//!     .append("todos").with_fragment("todos :: item")?
//!     .replace("todo-count").within_template("todos")?
//!     .remove("empty-hint")?;
//!
//! assert_eq!(updates.len(), 3);
//! # Ok(())
//! # }
//! ```

pub mod action;
pub mod error;
pub mod fragment;
pub mod update;

pub use action::Action;
pub use error::UpdateError;
pub use fragment::FragmentSpec;
pub use update::{UpdateBuilder, UpdateOperation, UpdateSet};
