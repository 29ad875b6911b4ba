//! Error types for query graph construction
//!
//! Every error here is raised while a graph is being assembled. A graph is
//! either fully valid or it is never built; compilation failures belong to
//! the adapter and are surfaced through its own error type.

use thiserror::Error;

/// Result type alias for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

/// Error types for query graph construction and definition loading
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The primary-key alias was requested while ordering is still enabled
    #[error("Ordering must be disabled when '{pk}' is selected on {model}", pk = crate::PK_FIELD_NAME)]
    OrderingConflict { model: String },

    /// One or more requested fields are not fields of the model
    #[error("Invalid field names for {model}: {}", .names.join(", "))]
    UnknownFieldName { model: String, names: Vec<String> },

    /// Names requested both as scalar fields and as relations
    #[error("Overlapping field names for {model}: {}", .names.join(", "))]
    NameCollision { model: String, names: Vec<String> },

    /// A relation value is not a query graph
    #[error("Value associated with field '{key}' on {model} is not a query graph")]
    InvalidSubgraphValue { model: String, key: String },

    /// Two joined relations flatten to the same eager-load path
    #[error("Eager-load path '{path}' on {model} is declared more than once")]
    DuplicatePrefetchPath { model: String, path: String },

    /// A definition names a model that is not registered
    #[error("Model not registered: {name}")]
    UnknownModel { name: String },

    /// A definition document could not be read
    #[error("Invalid graph definition: {message}")]
    Definition { message: String },
}

impl GraphError {
    /// Create an unknown field name error
    pub fn unknown_field_names(model: impl Into<String>, names: Vec<String>) -> Self {
        Self::UnknownFieldName {
            model: model.into(),
            names,
        }
    }

    /// Create a name collision error
    pub fn name_collision(model: impl Into<String>, names: Vec<String>) -> Self {
        Self::NameCollision {
            model: model.into(),
            names,
        }
    }

    /// Create an invalid subgraph value error
    pub fn invalid_subgraph(model: impl Into<String>, key: impl Into<String>) -> Self {
        Self::InvalidSubgraphValue {
            model: model.into(),
            key: key.into(),
        }
    }

    /// Create a definition error
    pub fn definition(message: impl Into<String>) -> Self {
        Self::Definition {
            message: message.into(),
        }
    }

    /// Names carried by the error, if any
    pub fn names(&self) -> &[String] {
        match self {
            GraphError::UnknownFieldName { names, .. } | GraphError::NameCollision { names, .. } => {
                names
            }
            _ => &[],
        }
    }
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        GraphError::definition(err.to_string())
    }
}

impl From<serde_yaml::Error> for GraphError {
    fn from(err: serde_yaml::Error) -> Self {
        GraphError::definition(err.to_string())
    }
}
