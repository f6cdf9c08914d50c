//! Transpiler error types.

use thiserror::Error;
use thyme_types::{Category, ModelNode, Value};

/// Errors that can occur while transpiling a model node.
///
/// No partial output accompanies an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranspileError {
    /// No rule accepts this node.
    #[error("non-transpilable {category}: {node}")]
    NonTranspilableModel { category: Category, node: String },

    /// The value variant has no rule in the current call context.
    #[error("non-transpilable value: {value}")]
    NonTranspilableValue { value: String },

    /// A rule claimed the node but does not know the named property.
    #[error("unknown property `{property}` in {value}")]
    UnknownObjectProperty { property: String, value: String },

    /// A named item (rule, configuration key) is not known.
    #[error("unknown {kind}: {name}")]
    UnknownItem { kind: &'static str, name: String },
}

impl TranspileError {
    pub fn non_transpilable_model<N: ModelNode>(node: &N) -> Self {
        Self::NonTranspilableModel {
            category: N::CATEGORY,
            node: node.to_string(),
        }
    }

    pub fn non_transpilable_value(value: &Value) -> Self {
        Self::NonTranspilableValue {
            value: value.to_string(),
        }
    }

    pub fn unknown_object_property(property: &str, value: &Value) -> Self {
        Self::UnknownObjectProperty {
            property: property.to_string(),
            value: value.to_string(),
        }
    }

    /// Re-attribute a value-level rejection to the enclosing `node`.
    ///
    /// Every other kind passes through unchanged.
    pub fn into_model_error<N: ModelNode>(self, node: &N) -> Self {
        match self {
            Self::NonTranspilableValue { .. } => Self::non_transpilable_model(node),
            other => other,
        }
    }
}

/// Transpiler result type alias.
pub type TranspileResult<T> = Result<T, TranspileError>;

#[cfg(test)]
mod tests {
    use super::*;
    use thyme_types::Assertion;

    #[test]
    fn test_messages_describe_the_node() {
        let err = TranspileError::non_transpilable_model(&Value::literal("x"));
        assert_eq!(err.to_string(), "non-transpilable value: \"x\"");

        let err = TranspileError::unknown_object_property("colour", &Value::page("colour"));
        assert_eq!(err.to_string(), "unknown property `colour` in $page.colour");
    }

    #[test]
    fn test_into_model_error_only_rewrites_value_errors() {
        let assertion = Assertion::exists(Value::literal("x"));

        let rewritten = TranspileError::non_transpilable_value(&Value::literal("x"))
            .into_model_error(&assertion);
        assert!(matches!(
            rewritten,
            TranspileError::NonTranspilableModel {
                category: Category::Assertion,
                ..
            }
        ));

        let unknown = TranspileError::unknown_object_property("colour", &Value::page("colour"));
        assert_eq!(unknown.clone().into_model_error(&assertion), unknown);
    }
}
