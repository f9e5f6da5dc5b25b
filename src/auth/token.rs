//! Token kinds and secret wrappers.

pub mod kind;
pub mod secret;
