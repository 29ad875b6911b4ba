//! Model Registry - name-keyed lookup of subject metadata

use std::sync::Arc;

use indexmap::IndexMap;

use super::{ModelDescriptor, ModelMeta, SubjectType};
use crate::error::{GraphError, GraphResult};

/// Registry of subject types keyed by type name
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: IndexMap<String, SubjectType>,
}

impl ModelRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subject type under its own type name, replacing any previous entry
    pub fn register(&mut self, meta: SubjectType) -> &mut Self {
        tracing::debug!("Registering model metadata: {}", meta.type_name());
        self.models.insert(meta.type_name().to_string(), meta);
        self
    }

    /// Register a plain descriptor and return its shared handle
    pub fn register_descriptor(&mut self, descriptor: ModelDescriptor) -> SubjectType {
        let subject: SubjectType = Arc::new(descriptor);
        self.register(subject.clone());
        subject
    }

    /// Look up a subject type by name
    pub fn get(&self, name: &str) -> GraphResult<SubjectType> {
        self.models
            .get(name)
            .cloned()
            .ok_or_else(|| GraphError::UnknownModel {
                name: name.to_string(),
            })
    }

    /// Returns true if a type with this name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// Registered type names in registration order
    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl FromIterator<ModelDescriptor> for ModelRegistry {
    fn from_iter<I: IntoIterator<Item = ModelDescriptor>>(iter: I) -> Self {
        let mut registry = Self::new();
        for descriptor in iter {
            registry.register_descriptor(descriptor);
        }
        registry
    }
}
