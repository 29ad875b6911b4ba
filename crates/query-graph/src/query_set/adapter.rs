//! Query Set Adapter - compiles query graphs into [`QuerySet`]s
//!
//! In strict mode every path handed to the adapter is resolved against a
//! [`ModelRegistry`], the way an ORM rejects an unknown lookup when the
//! query is configured.

use thiserror::Error;

use super::builder::QuerySet;
use crate::adapter::{Prefetch, QueryAdapter};
use crate::meta::{ModelRegistry, SubjectType};
use crate::ordering::OrderKey;
use crate::{LOOKUP_SEP, PK_FIELD_NAME};

/// Errors raised while configuring a [`QuerySet`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuerySetError {
    #[error("Model not registered: {name}")]
    UnknownModel { name: String },

    #[error("Invalid relation path '{path}' on {model}")]
    UnknownRelationPath { model: String, path: String },

    #[error("Invalid field path '{path}' on {model}")]
    UnknownFieldPath { model: String, path: String },
}

/// What the last segment of a lookup path must name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathTarget {
    /// A to-one relation
    Join,
    /// Any relation
    Relation,
    /// A scalar field or the primary-key alias
    Field,
}

/// [`QueryAdapter`] producing recorded [`QuerySet`]s
#[derive(Debug, Clone, Default)]
pub struct QuerySetAdapter {
    registry: Option<ModelRegistry>,
}

impl QuerySetAdapter {
    /// Adapter that records directives without checking them
    pub fn new() -> Self {
        Self::default()
    }

    /// Adapter that resolves every path against `registry`
    pub fn strict(registry: ModelRegistry) -> Self {
        Self {
            registry: Some(registry),
        }
    }

    pub fn is_strict(&self) -> bool {
        self.registry.is_some()
    }

    fn check(&self, model: &str, path: &str, target: PathTarget) -> Result<(), QuerySetError> {
        let Some(registry) = &self.registry else {
            return Ok(());
        };

        let unknown_model = |name: &str| QuerySetError::UnknownModel {
            name: name.to_string(),
        };
        let invalid = || match target {
            PathTarget::Field => QuerySetError::UnknownFieldPath {
                model: model.to_string(),
                path: path.to_string(),
            },
            _ => QuerySetError::UnknownRelationPath {
                model: model.to_string(),
                path: path.to_string(),
            },
        };

        let mut current = registry.get(model).map_err(|_| unknown_model(model))?;
        let segments: Vec<&str> = path.split(LOOKUP_SEP).collect();
        let (last, hops) = segments.split_last().ok_or_else(invalid)?;

        // Eager loads may hop across collections; everything else only crosses to-one relations.
        for segment in hops {
            if target != PathTarget::Relation && !current.field_names().iter().any(|f| f == segment) {
                return Err(invalid());
            }
            let related = current.relation_target(segment).ok_or_else(invalid)?;
            current = registry
                .get(&related)
                .map_err(|_| unknown_model(related.as_str()))?;
        }

        let is_field = *last == PK_FIELD_NAME || current.field_names().iter().any(|f| f == last);
        let valid = match target {
            PathTarget::Field => is_field,
            PathTarget::Join => is_field && current.relation_target(last).is_some(),
            PathTarget::Relation => current.relation_target(last).is_some(),
        };

        if valid {
            Ok(())
        } else {
            Err(invalid())
        }
    }

    fn check_all<'a>(
        &self,
        model: &str,
        paths: impl IntoIterator<Item = &'a str>,
        target: PathTarget,
    ) -> Result<(), QuerySetError> {
        paths
            .into_iter()
            .try_for_each(|path| self.check(model, path, target))
    }
}

impl QueryAdapter for QuerySetAdapter {
    type Query = QuerySet;
    type Error = QuerySetError;

    fn default_query(&self, subject: &SubjectType) -> Result<QuerySet, QuerySetError> {
        let name = subject.type_name();
        if let Some(registry) = &self.registry {
            if !registry.contains(name) {
                return Err(QuerySetError::UnknownModel {
                    name: name.to_string(),
                });
            }
        }
        Ok(QuerySet::new(name))
    }

    fn select_related(&self, query: QuerySet, paths: &[String]) -> Result<QuerySet, QuerySetError> {
        self.check_all(&query.model, paths.iter().map(String::as_str), PathTarget::Join)?;
        Ok(query.select_related(paths.iter().cloned()))
    }

    fn only(&self, query: QuerySet, fields: &[String]) -> Result<QuerySet, QuerySetError> {
        self.check_all(&query.model, fields.iter().map(String::as_str), PathTarget::Field)?;
        Ok(query.only(fields.iter().cloned()))
    }

    fn order_by(&self, query: QuerySet, keys: &[OrderKey]) -> Result<QuerySet, QuerySetError> {
        self.check_all(&query.model, keys.iter().map(OrderKey::field), PathTarget::Field)?;
        Ok(query.order_by(keys.iter().cloned()))
    }

    fn clear_ordering(&self, query: QuerySet) -> Result<QuerySet, QuerySetError> {
        Ok(query.clear_ordering())
    }

    fn prefetch_related(
        &self,
        query: QuerySet,
        prefetches: Vec<Prefetch<QuerySet>>,
    ) -> Result<QuerySet, QuerySetError> {
        self.check_all(
            &query.model,
            prefetches.iter().map(|p| p.lookup.as_str()),
            PathTarget::Relation,
        )?;
        Ok(query.prefetch_related(prefetches))
    }
}
