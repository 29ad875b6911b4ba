//! Relation classification
//!
//! A relation key that names a scalar or foreign-key field of the subject is a
//! to-one join; anything else is a to-many collection loaded separately.

use std::collections::HashSet;

/// How a relation is loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// Single-valued relation, joined into the same query
    Join,
    /// Collection relation, loaded in a separate batched query
    Prefetch,
}

/// Classify `name` against the subject's scalar and foreign-key field names
pub fn classify_relation(name: &str, field_names: &HashSet<String>) -> RelationKind {
    let kind = if field_names.contains(name) {
        RelationKind::Join
    } else {
        RelationKind::Prefetch
    };
    tracing::trace!("Classified relation '{}' as {:?}", name, kind);
    kind
}
