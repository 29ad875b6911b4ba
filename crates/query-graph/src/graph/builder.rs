//! Query Graph Builder - validation and flattening at construction time

use std::collections::HashSet;
use std::sync::Arc;

use indexmap::IndexMap;

use super::classify::{classify_relation, RelationKind};
use super::QueryGraph;
use crate::error::{GraphError, GraphResult};
use crate::meta::SubjectType;
use crate::ordering::Ordering;
use crate::{LOOKUP_SEP, PK_FIELD_NAME};

/// Collects the parts of a [`QueryGraph`] before validating them in [`build`](Self::build)
#[derive(Debug, Clone)]
pub struct QueryGraphBuilder {
    subject: SubjectType,
    fields: Vec<String>,
    ordering: Ordering,
    relations: IndexMap<String, Arc<QueryGraph>>,
}

impl QueryGraphBuilder {
    /// Create a builder with no fields, no relations and default ordering
    pub fn new(subject: SubjectType) -> Self {
        Self {
            subject,
            fields: Vec::new(),
            ordering: Ordering::Default,
            relations: IndexMap::new(),
        }
    }

    /// Add a scalar field to load
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.fields.push(name.into());
        self
    }

    /// Add several scalar fields to load
    pub fn fields<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.fields.extend(names.into_iter().map(Into::into));
        self
    }

    /// Set the ordering (`true`, `false`, one key or a list of keys)
    pub fn order(mut self, order: impl Into<Ordering>) -> Self {
        self.ordering = order.into();
        self
    }

    /// Disable ordering
    pub fn unordered(self) -> Self {
        self.order(Ordering::Unordered)
    }

    /// Add a related graph; a later call with the same name replaces the graph
    pub fn relation(mut self, name: impl Into<String>, graph: impl Into<Arc<QueryGraph>>) -> Self {
        self.relations.insert(name.into(), graph.into());
        self
    }

    /// Validate the collected parts and flatten joined relations
    pub fn build(self) -> GraphResult<QueryGraph> {
        let QueryGraphBuilder {
            subject,
            fields,
            ordering,
            relations,
        } = self;
        let model = subject.type_name().to_string();

        if fields.iter().any(|f| f == PK_FIELD_NAME) && ordering.is_enabled() {
            return Err(GraphError::OrderingConflict { model });
        }

        let mut known_fields: HashSet<String> = subject.field_names().into_iter().collect();
        known_fields.insert(PK_FIELD_NAME.to_string());

        let invalid = distinct(fields.iter().filter(|f| !known_fields.contains(f.as_str())));
        if !invalid.is_empty() {
            return Err(GraphError::unknown_field_names(model, invalid));
        }

        let overlapping = distinct(fields.iter().filter(|f| relations.contains_key(f.as_str())));
        if !overlapping.is_empty() {
            return Err(GraphError::name_collision(model, overlapping));
        }

        let mut joins: Vec<(String, Arc<QueryGraph>)> = Vec::new();
        let mut prefetch: IndexMap<String, Arc<QueryGraph>> = IndexMap::new();
        for (name, graph) in relations {
            match classify_relation(&name, &known_fields) {
                RelationKind::Join => joins.push((name, graph)),
                RelationKind::Prefetch => {
                    prefetch.insert(name, graph);
                }
            }
        }

        let mut select_related: Vec<String> = joins.iter().map(|(name, _)| name.clone()).collect();
        let mut field_names = fields;

        for (name, joined) in &joins {
            select_related.extend(joined.select_related.iter().map(|path| lookup_path(name, path)));
            field_names.extend(joined.field_names.iter().map(|field| lookup_path(name, field)));

            for (path, graph) in &joined.prefetch {
                let path = lookup_path(name, path);
                if prefetch.contains_key(&path) {
                    return Err(GraphError::DuplicatePrefetchPath { model, path });
                }
                prefetch.insert(path, Arc::clone(graph));
            }
        }

        tracing::debug!(
            "Built query graph for {}: {} fields, {} joins, {} eager loads",
            model,
            field_names.len(),
            select_related.len(),
            prefetch.len()
        );

        Ok(QueryGraph {
            subject,
            field_names,
            select_related,
            prefetch,
            ordering,
        })
    }
}

/// Prefix `path` with the relation it is reached through
fn lookup_path(relation: &str, path: &str) -> String {
    format!("{}{}{}", relation, LOOKUP_SEP, path)
}

/// Unique names in first-seen order
fn distinct<'a>(names: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .filter(|name| seen.insert(name.to_string()))
        .cloned()
        .collect()
}
