//! Query session building
//!
//! Turns untrusted pagination, filter and sort parameters into a
//! parameterized [`QueryPlan`].
//!
//! ## Usage
//!
//! ```
//! use std::collections::HashMap;
//!
//! use ormer_session::data::engine::Engine;
//! use ormer_session::data::session::{Entity, FieldGuard, Pagination, SessionBuilder, SortSpec};
//! use ormer_session::data::sql::Backend;
//!
//! let engine = Engine::new(Backend::Mysql);
//! let config = HashMap::from([("tableNamePrefix".to_string(), String::new())]);
//! let builder = SessionBuilder::new(&engine, &config, FieldGuard::for_entity(Entity::User));
//!
//! let plan = builder
//!     .build("org1", Pagination::from_raw(0, 10), "displayName", "ali", &SortSpec::from_raw("", ""))
//!     .unwrap();
//! let (sql, params) = plan.to_sql("user", Backend::Mysql.dialect());
//! assert_eq!(
//!     sql,
//!     "SELECT * FROM user WHERE owner = ? AND display_name LIKE ? ORDER BY created_time DESC LIMIT 10 OFFSET 0"
//! );
//! assert_eq!(params.values, vec!["org1", "%ali%"]);
//! ```

mod bind;
mod builder;
mod criteria;
mod filter;
mod guard;
mod join;
mod observer;
mod pagination;
mod plan;
mod sort;

pub use bind::bind_params;
pub use builder::{Filters, SessionBuilder, SessionRequest};
pub use criteria::parse_criteria;
pub use filter::{FilterCriterion, OWNER_COLUMN};
pub use guard::{Entity, FieldGuard, columns};
pub use join::{JoinStrategy, PRIMARY_ALIAS, TABLE_PREFIX_KEY, USER_ALIAS, USER_TABLE};
pub use observer::{CollectingObserver, DropReason, FieldEvent, FieldObserver, TracingObserver};
pub use pagination::{Pagination, SENTINEL, Window};
pub use plan::{Join, OrderClause, Predicate, QueryPlan, SqlParams};
pub use sort::{ASCEND, DEFAULT_SORT_FIELD, SortOrder, SortSpec};
