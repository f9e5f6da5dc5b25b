//! Session credentials: token kinds, redacted secrets, and the access/refresh pair.

pub mod session;
pub mod token;

pub use session::*;
pub use token::{kind::*, secret::*};
