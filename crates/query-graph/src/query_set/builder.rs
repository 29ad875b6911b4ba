//! Query Set - core type and derived views

use indexmap::IndexSet;

use super::directives::Directive;
use crate::adapter::Prefetch;
use crate::ordering::Ordering;

/// Lazy query over one model, recorded as an ordered list of directives
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySet {
    pub(crate) model: String,
    pub(crate) directives: Vec<Directive>,
}

impl QuerySet {
    /// Create an unfiltered query over `model`
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            directives: Vec::new(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Directives in the order they were issued
    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// All joined paths, deduplicated in first-seen order
    pub fn joins(&self) -> Vec<&str> {
        let mut joins = IndexSet::new();
        for directive in &self.directives {
            if let Directive::SelectRelated(paths) = directive {
                joins.extend(paths.iter().map(String::as_str));
            }
        }
        joins.into_iter().collect()
    }

    /// Fields the query is restricted to; the last restriction wins
    pub fn selected_fields(&self) -> Option<&[String]> {
        self.directives.iter().rev().find_map(|directive| match directive {
            Directive::Only(fields) => Some(fields.as_slice()),
            _ => None,
        })
    }

    /// Ordering in effect once every directive is applied
    pub fn effective_ordering(&self) -> Ordering {
        self.directives
            .iter()
            .rev()
            .find_map(|directive| match directive {
                Directive::OrderBy(keys) => Some(Ordering::keys(keys.iter().cloned())),
                Directive::ClearOrdering => Some(Ordering::Unordered),
                _ => None,
            })
            .unwrap_or(Ordering::Default)
    }

    /// All eager loads in the order they were attached
    pub fn prefetches(&self) -> Vec<&Prefetch<QuerySet>> {
        self.directives
            .iter()
            .filter_map(|directive| match directive {
                Directive::PrefetchRelated(prefetches) => Some(prefetches.iter()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// Nested query used to eager-load `lookup`
    pub fn prefetch(&self, lookup: &str) -> Option<&QuerySet> {
        self.prefetches()
            .into_iter()
            .find(|prefetch| prefetch.lookup == lookup)
            .map(|prefetch| &prefetch.query)
    }

    /// Names of the issued directives, e.g. `["select_related", "only"]`
    pub fn directive_names(&self) -> Vec<&'static str> {
        self.directives.iter().map(Directive::name).collect()
    }
}
