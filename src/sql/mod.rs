//! Safe SQL: identifiers from the catalog only, values as bound parameters.

mod builder;
pub mod executor;
pub mod params;
pub use builder::*;
pub use executor::*;
pub use params::*;
