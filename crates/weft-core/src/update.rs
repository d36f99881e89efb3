use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::error::{Result, UpdateError};

/// Placeholder stored as the fragment of `Remove` operations. A removal
/// carries nothing to render, but the operation still has a fragment
/// slot.
pub(crate) const REMOVE_FRAGMENT: &str = r"¯\_(ツ)_/¯";

/// A single DOM-region mutation: what to do, where, and which fragment
/// to render into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOperation {
    action: Action,
    target: String,
    fragment: String,
}

impl UpdateOperation {
    pub fn action(&self) -> Action {
        self.action
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Fragment identifier to render. Present but meaningless for
    /// `Remove` operations.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn is_remove(&self) -> bool {
        self.action.is_remove()
    }
}

/// An ordered collection of update operations.
///
/// Accumulated through the fluent builder; every completed builder step
/// clones the operation list and returns a new `UpdateSet`, so a value
/// already handed out never changes and can be read from any number of
/// threads while derived sets are still being built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSet {
    operations: Vec<UpdateOperation>,
}

impl UpdateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rendered fragment inside the target element.
    pub fn append(&self, target: impl Into<String>) -> UpdateBuilder {
        self.builder(target, Action::Append)
    }

    /// Prepend a rendered fragment inside the target element.
    pub fn prepend(&self, target: impl Into<String>) -> UpdateBuilder {
        self.builder(target, Action::Prepend)
    }

    /// Replace the target element with a rendered fragment.
    pub fn replace(&self, target: impl Into<String>) -> UpdateBuilder {
        self.builder(target, Action::Replace)
    }

    /// Replace the target element's content with a rendered fragment.
    pub fn update(&self, target: impl Into<String>) -> UpdateBuilder {
        self.builder(target, Action::Update)
    }

    /// Remove the target element. There is nothing to render, so the
    /// operation is sealed immediately.
    pub fn remove(&self, target: impl Into<String>) -> Result<UpdateSet> {
        self.builder(target, Action::Remove)
            .seal(REMOVE_FRAGMENT.to_string())
    }

    fn builder(&self, target: impl Into<String>, action: Action) -> UpdateBuilder {
        UpdateBuilder {
            operations: self.operations.clone(),
            target: target.into(),
            action,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UpdateOperation> {
        self.operations.iter()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl<'a> IntoIterator for &'a UpdateSet {
    type Item = &'a UpdateOperation;
    type IntoIter = std::slice::Iter<'a, UpdateOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}

/// Builder scoped to one target and action. A `with*` call validates,
/// seals the operation and yields the extended [`UpdateSet`].
#[derive(Debug)]
pub struct UpdateBuilder {
    operations: Vec<UpdateOperation>,
    target: String,
    action: Action,
}

impl UpdateBuilder {
    /// Use the given identifier verbatim as the render key.
    pub fn with(self, fragment: impl Into<String>) -> Result<UpdateSet> {
        let fragment = fragment.into();
        if fragment.trim().is_empty() {
            return Err(UpdateError::EmptyFragment);
        }

        self.seal(fragment)
    }

    /// Render the region named after this builder's target within the
    /// given template, i.e. the fragment `"{template} :: {target}"`.
    pub fn within_template(self, template: impl Into<String>) -> Result<UpdateSet> {
        let template = template.into();
        if template.trim().is_empty() {
            return Err(UpdateError::EmptyTemplate);
        }

        let fragment = format!("{} :: {}", template, self.target);

        self.seal(fragment)
    }

    /// Use an explicit `"template :: region"` identifier.
    pub fn with_fragment(self, fragment: impl Into<String>) -> Result<UpdateSet> {
        let fragment = fragment.into();
        if fragment.trim().is_empty() {
            return Err(UpdateError::EmptyFragment);
        }
        if !fragment.contains("::") {
            return Err(UpdateError::InvalidFragment(fragment));
        }

        self.seal(fragment)
    }

    fn seal(mut self, fragment: String) -> Result<UpdateSet> {
        if self.target.trim().is_empty() {
            return Err(UpdateError::EmptyTarget);
        }

        self.operations.push(UpdateOperation {
            action: self.action,
            target: self.target,
            fragment,
        });

        Ok(UpdateSet {
            operations: self.operations,
        })
    }
}
