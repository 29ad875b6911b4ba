//! # elif-query-graph: Declarative Query Graphs for elif.rs
//!
//! Describe, for a root model, which fields to load, which to-one relations
//! to join inline, which ordering to apply and which to-many relations to
//! eager-load in separate batches, then compile that description into a
//! single configured query through a [`QueryAdapter`].
//!
//! ```ignore
//! let items = QueryGraph::builder(line_item).fields(["sku", "qty"]).order(false).build()?;
//! let orders = QueryGraph::builder(order)
//!     .fields(["id", "total"])
//!     .relation("items", items)
//!     .build()?;
//!
//! let query = orders.compile(&QuerySetAdapter::new(), None)?;
//! ```
//!
//! Graphs are validated and flattened when they are built. Compilation only
//! issues adapter calls; it never executes anything.

pub mod adapter;
pub mod definition;
pub mod error;
pub mod graph;
pub mod meta;
pub mod ordering;
pub mod query_set;

/// Field name accepted on every model as an alias for its primary key
pub const PK_FIELD_NAME: &str = "pk";

/// Separator between relation names in a lookup path
pub const LOOKUP_SEP: &str = "__";

pub use adapter::{Prefetch, QueryAdapter};
pub use definition::{GraphDefinition, OrderSetting};
pub use error::{GraphError, GraphResult};
pub use graph::{classify_relation, QueryGraph, QueryGraphBuilder, RelationKind};
pub use meta::{ModelDescriptor, ModelKind, ModelMeta, ModelRegistry, SubjectType};
pub use ordering::{OrderDirection, OrderKey, Ordering};
pub use query_set::{Directive, QuerySet, QuerySetAdapter, QuerySetError};
