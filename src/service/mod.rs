//! Query construction and execution: predicates, sanitizers, CRUD.

mod crud;
mod options;
mod payload;
mod predicate;
pub mod sanitize;
pub use crud::{Operation, QueryRequest, QueryService, Target};
pub use options::{ListOptions, SortDirection};
pub use payload::Payload;
pub use predicate::{FilterOperator, Predicate, PredicateBuilder};
