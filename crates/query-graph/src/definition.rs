//! Declarative graph definitions
//!
//! A definition is a serde document that mirrors the builder API and is
//! turned into a [`QueryGraph`] against a [`ModelRegistry`]:
//!
//! ```yaml
//! model: Order
//! fields: [id, total]
//! order: -total
//! relations:
//!   customer: { model: Customer, fields: [name] }
//!   items: { model: LineItem, fields: [sku, qty], order: false }
//! ```
//!
//! `order` accepts `true`/`false`, one key, a list of keys or `null`
//! (disabled). Omitting it keeps the model's default ordering. Relations are
//! built in document order.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GraphError, GraphResult};
use crate::graph::QueryGraph;
use crate::meta::ModelRegistry;
use crate::ordering::Ordering;

/// The `order` entry of a definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderSetting {
    Flag(bool),
    Key(String),
    Keys(Vec<String>),
    Null,
}

impl Default for OrderSetting {
    fn default() -> Self {
        OrderSetting::Flag(true)
    }
}

impl From<OrderSetting> for Ordering {
    fn from(setting: OrderSetting) -> Self {
        match setting {
            OrderSetting::Flag(enabled) => enabled.into(),
            OrderSetting::Key(key) => key.into(),
            OrderSetting::Keys(keys) => keys.into(),
            OrderSetting::Null => Ordering::Unordered,
        }
    }
}

/// Serializable description of a query graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDefinition {
    pub model: String,

    #[serde(default)]
    pub fields: Vec<String>,

    #[serde(default)]
    pub order: OrderSetting,

    /// Relation name -> nested definition, kept raw until the graph is built
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub relations: IndexMap<String, Value>,
}

impl GraphDefinition {
    pub fn from_json_str(source: &str) -> GraphResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_json_value(value: Value) -> GraphResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_yaml_str(source: &str) -> GraphResult<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Load a definition file; `.json` files are read as JSON, anything else as YAML
    pub fn from_path(path: impl AsRef<Path>) -> GraphResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            GraphError::definition(format!("failed to read {}: {}", path.display(), e))
        })?;

        tracing::debug!("Loading graph definition from {}", path.display());
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&source),
            _ => Self::from_yaml_str(&source),
        }
    }

    /// Build the graph, resolving every model name through `registry`
    pub fn build(&self, registry: &ModelRegistry) -> GraphResult<QueryGraph> {
        let subject = registry.get(&self.model)?;
        let mut builder = QueryGraph::builder(subject)
            .fields(self.fields.iter().cloned())
            .order(self.order.clone());

        for (name, value) in &self.relations {
            let graph = self.subgraph(name, value)?.build(registry)?;
            builder = builder.relation(name.clone(), graph);
        }

        builder.build()
    }

    fn subgraph(&self, name: &str, value: &Value) -> GraphResult<GraphDefinition> {
        if !value.is_object() {
            return Err(GraphError::invalid_subgraph(&self.model, name));
        }
        serde_json::from_value(value.clone())
            .map_err(|e| GraphError::definition(format!("relation '{}' on {}: {}", name, self.model, e)))
    }
}
