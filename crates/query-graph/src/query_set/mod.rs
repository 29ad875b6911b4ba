//! Query Set - a lazy, recorded query description
//!
//! [`QuerySet`] is the query object produced by [`QuerySetAdapter`]. It does
//! not talk to a database; it keeps every directive in the order it was
//! issued so a compiled graph can be inspected, compared or handed to a
//! backend that replays the directives.

pub mod adapter;
pub mod builder;
pub mod directives;

pub use adapter::{QuerySetAdapter, QuerySetError};
pub use builder::QuerySet;
pub use directives::Directive;
