//! Model metadata consumed by query graphs
//!
//! A query graph never inspects model types itself. Everything it needs to
//! know about a subject (its name, its scalar and foreign-key field names and
//! whether its backend tolerates column restriction) comes through
//! [`ModelMeta`].

pub mod descriptor;
pub mod registry;

use std::fmt::Debug;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use descriptor::ModelDescriptor;
pub use registry::ModelRegistry;

/// Shared handle to a subject type's metadata
pub type SubjectType = Arc<dyn ModelMeta>;

/// How a subject type is mapped by its backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Plain table-backed model
    #[default]
    Table,
    /// Inheritance-mapped model whose rows are rebuilt from several tables
    Polymorphic,
    /// Graph database node
    GraphNode,
}

impl ModelKind {
    /// Returns true if selecting a subset of columns is safe for this kind
    pub fn supports_field_restriction(self) -> bool {
        matches!(self, Self::Table)
    }
}

/// Metadata interface for a model or node type
pub trait ModelMeta: Send + Sync + Debug {
    /// Name of the type, used in messages and renderings
    fn type_name(&self) -> &str;

    /// Scalar and foreign-key field names of the type
    fn field_names(&self) -> Vec<String>;

    /// Backend mapping of the type
    fn kind(&self) -> ModelKind {
        ModelKind::Table
    }

    /// Returns true if the backend can restrict loaded fields for this type
    fn supports_field_restriction(&self) -> bool {
        self.kind().supports_field_restriction()
    }

    /// Type name a relation (to-one or to-many) points at, when known
    fn relation_target(&self, _name: &str) -> Option<String> {
        None
    }
}
