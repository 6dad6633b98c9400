//! Typed lookup failures.
//!
//! Every variant here is an authoring error: content referred to something by
//! name that does not exist. They propagate with `?` and abort the current
//! operation rather than being swallowed as a no-op.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("no scene named '{0}'")]
    UnknownScene(String),
    #[error("'{0}' is not a detail view")]
    NotADetailView(String),
    #[error("'{0}' is a detail view, not a scene")]
    NotAScene(String),
    #[error("no thing named '{0}'")]
    UnknownThing(String),
    #[error("no item named '{0}'")]
    UnknownItem(String),
    #[error("thing '{thing}' has no interact named '{interact}'")]
    UnknownInteract { thing: String, interact: String },
    #[error("no data bag for {0}")]
    UnknownScope(String),
    #[error("item '{0}' is not in the inventory")]
    NotInInventory(String),
}
