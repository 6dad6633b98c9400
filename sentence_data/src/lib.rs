//! Shared data model for Suspended Sentence content.

pub mod defs;
pub mod validate;

pub use defs::*;
pub use validate::{ValidationError, validate_content};
