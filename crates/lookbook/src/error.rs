//! Fatal pipeline errors.
//!
//! Structural problems in the variable graph stop the build: emitting a
//! partial stylesheet is worse than failing loudly. Per-token formatting
//! problems are not errors; see [`crate::diagnostics`].

use thiserror::Error;

use crate::variable::VariableId;

/// An alias could not be followed to a concrete value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// An alias references a variable id that isn't in the set.
    #[error("variable '{variable}' aliases non-existent variable id '{target_id}'")]
    MissingTarget {
        variable: String,
        target_id: VariableId,
    },
    /// Following aliases led back to a variable already on the chain.
    #[error("cycle detected in variable aliases: {}", path.join(" -> "))]
    Cycle { path: Vec<String> },
    /// The variable has no value in any mode.
    #[error("variable '{variable}' has no value in any mode")]
    NoValue { variable: String },
    /// The variable points at a collection id that isn't in the export.
    #[error("variable '{variable}' belongs to unknown collection '{collection_id}'")]
    UnknownCollection {
        variable: String,
        collection_id: String,
    },
}

/// A variable path that cannot produce a token name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    #[error("couldn't make a token name for '{path}': empty leaf segment")]
    EmptyLeaf { path: String },
}

/// Top-level error for every fallible library operation.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Naming(#[from] NamingError),

    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_target_display() {
        let err = ResolutionError::MissingTarget {
            variable: "semantic/bg".to_string(),
            target_id: VariableId::from("VariableID:1:2"),
        };
        let msg = err.to_string();
        assert!(msg.contains("semantic/bg"));
        assert!(msg.contains("VariableID:1:2"));
    }

    #[test]
    fn test_cycle_display() {
        let err = ResolutionError::Cycle {
            path: vec!["a".to_string(), "b".to_string(), "a".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("cycle"));
        assert!(msg.contains("a -> b -> a"));
    }

    #[test]
    fn test_error_wraps_naming() {
        let err: Error = NamingError::EmptyLeaf {
            path: "color/".to_string(),
        }
        .into();
        assert!(err.to_string().contains("color/"));
    }
}
