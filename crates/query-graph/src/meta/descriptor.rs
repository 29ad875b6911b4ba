//! Plain-data model metadata

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{ModelKind, ModelMeta};

/// Declarative description of a model type
///
/// Foreign keys count as fields: they can be joined inline. Collection
/// relations are tracked separately and are only used to resolve targets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub name: String,

    #[serde(default)]
    pub kind: ModelKind,

    #[serde(default)]
    pub fields: Vec<String>,

    /// Foreign key name -> related type name
    #[serde(default)]
    pub foreign_keys: IndexMap<String, String>,

    /// Collection relation name -> related type name
    #[serde(default)]
    pub relations: IndexMap<String, String>,
}

impl ModelDescriptor {
    /// Create a new table-backed descriptor with no fields
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the backend mapping kind
    pub fn with_kind(mut self, kind: ModelKind) -> Self {
        self.kind = kind;
        self
    }

    /// Add a scalar field
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.fields.push(name.into());
        self
    }

    /// Add several scalar fields
    pub fn fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add a foreign key pointing at `target`
    pub fn foreign_key(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.foreign_keys.insert(name.into(), target.into());
        self
    }

    /// Add a collection relation pointing at `target`
    pub fn has_many(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.relations.insert(name.into(), target.into());
        self
    }
}

impl ModelMeta for ModelDescriptor {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn field_names(&self) -> Vec<String> {
        self.fields
            .iter()
            .chain(self.foreign_keys.keys())
            .cloned()
            .collect()
    }

    fn kind(&self) -> ModelKind {
        self.kind
    }

    fn relation_target(&self, name: &str) -> Option<String> {
        self.foreign_keys
            .get(name)
            .or_else(|| self.relations.get(name))
            .cloned()
    }
}
