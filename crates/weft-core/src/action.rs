use serde::{Deserialize, Serialize};

/// The kind of DOM mutation an update operation performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Insert the fragment after the target's existing children.
    Append,

    /// Insert the fragment before the target's existing children.
    Prepend,

    /// Replace the target element with the fragment.
    Replace,

    /// Replace the target's content with the fragment.
    Update,

    /// Remove the target element. Nothing is rendered.
    Remove,
}

impl Action {
    /// Attribute value used by the envelope encoding.
    pub fn verb(&self) -> &'static str {
        match self {
            Action::Append => "append",
            Action::Prepend => "prepend",
            Action::Replace => "replace",
            Action::Update => "update",
            Action::Remove => "remove",
        }
    }

    /// Swap mode used by the out-of-band encoding. Appends insert before
    /// the closing tag; every other action swaps or removes the whole
    /// element.
    pub fn swap_mode(&self) -> &'static str {
        match self {
            Action::Append => "beforeend",
            _ => "true",
        }
    }

    pub fn is_remove(&self) -> bool {
        matches!(self, Action::Remove)
    }
}
