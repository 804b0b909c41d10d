//! Request extractors.

pub mod cookies;
pub use cookies::*;
