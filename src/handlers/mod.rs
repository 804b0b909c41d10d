//! HTTP handlers.

pub mod rest;
pub use rest::*;
