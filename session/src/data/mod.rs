//! Data layer
//!
//! - `session` - Query session builder (filters, sort, pagination, joins)
//! - `engine` - Store and configuration collaborator traits
//! - `sql` - SQL abstraction layer for multi-database support
//! - `error` - Unified error type

pub mod engine;
pub mod error;
pub mod session;
pub mod sql;

pub use engine::{ConfigSource, Engine, StoreEngine};
pub use error::DataError;
