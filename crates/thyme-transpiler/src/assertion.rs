//! Assertion rules.

use std::sync::Arc;

use thyme_source::{CompilableSource, PlaceholderSet};
use thyme_types::{Assertion, Comparison, Value};

use crate::call_factory::assertion as assertion_call;
use crate::call_factory::navigator::{self, NavigatorMethod};
use crate::call_factory::variable_assignment::{has_attribute_name, is_assignable, is_scalar_object};
use crate::call_factory::VariableAssignmentFactory;
use crate::dispatch::{Dispatcher, NodeTranspiler};
use crate::error::{TranspileError, TranspileResult};
use crate::names::{EXAMINED_VALUE, EXPECTED_VALUE};

pub fn dispatcher(factory: Arc<VariableAssignmentFactory>) -> Dispatcher<Assertion> {
    Dispatcher::new(vec![
        Box::new(ExistsComparisonTranspiler::new(factory.clone())),
        Box::new(ValueComparisonTranspiler::new(factory)),
    ])
}

// ══════════════════════════════════════════════════════════════════════════════
// Exists / not-exists
// ══════════════════════════════════════════════════════════════════════════════

/// Element references become a direct `has` check asserted true or false.
/// Attributes and environment values are assigned and asserted not-null or
/// null.
pub struct ExistsComparisonTranspiler {
    factory: Arc<VariableAssignmentFactory>,
}

impl ExistsComparisonTranspiler {
    pub fn new(factory: Arc<VariableAssignmentFactory>) -> Self {
        Self { factory }
    }

    fn examinable(value: &Value) -> bool {
        match value {
            Value::ElementReference(_) => true,
            Value::AttributeReference(attribute) => has_attribute_name(attribute),
            other => is_scalar_object(other),
        }
    }
}

impl NodeTranspiler<Assertion> for ExistsComparisonTranspiler {
    fn name(&self) -> &'static str {
        "exists-comparison"
    }

    fn handles(&self, node: &Assertion) -> bool {
        matches!(
            node,
            Assertion::Examination(assertion)
                if matches!(assertion.comparison, Comparison::Exists | Comparison::NotExists)
                    && Self::examinable(&assertion.examined)
        )
    }

    fn transpile(&self, node: &Assertion) -> TranspileResult<CompilableSource> {
        let Assertion::Examination(assertion) = node else {
            return Err(TranspileError::non_transpilable_model(node));
        };
        let exists = match assertion.comparison {
            Comparison::Exists => true,
            Comparison::NotExists => false,
            _ => return Err(TranspileError::non_transpilable_model(node)),
        };

        let mut scope = PlaceholderSet::new();
        let assignment = match &assertion.examined {
            Value::ElementReference(identifier) => {
                let has_call = navigator::call_for_identifier(NavigatorMethod::Has, identifier, &mut scope);
                return Ok(if exists {
                    assertion_call::expression_is_true(has_call, &mut scope)
                } else {
                    assertion_call::expression_is_false(has_call, &mut scope)
                });
            }
            Value::AttributeReference(attribute) => {
                let target = scope.create_fresh(EXAMINED_VALUE);
                self.factory.create_for_attribute(attribute, target, &mut scope)
            }
            scalar if is_scalar_object(scalar) => {
                let target = scope.create_fresh(EXAMINED_VALUE);
                self.factory
                    .create_for_scalar(scalar, target, &self.factory.config().absent_default)
            }
            _ => return Err(TranspileError::non_transpilable_model(node)),
        }
        .map_err(|err| err.into_model_error(node))?;

        Ok(if exists {
            assertion_call::value_is_not_null(assignment, &mut scope)
        } else {
            assertion_call::value_is_null(assignment, &mut scope)
        })
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Value comparisons
// ══════════════════════════════════════════════════════════════════════════════

/// Assigns the examined and expected values, then compares them.
pub struct ValueComparisonTranspiler {
    factory: Arc<VariableAssignmentFactory>,
}

impl ValueComparisonTranspiler {
    pub fn new(factory: Arc<VariableAssignmentFactory>) -> Self {
        Self { factory }
    }

    fn method(comparison: Comparison) -> Option<&'static str> {
        match comparison {
            Comparison::Is => Some("assertEquals"),
            Comparison::IsNot => Some("assertNotEquals"),
            Comparison::Includes => Some("assertStringContainsString"),
            Comparison::Excludes => Some("assertStringNotContainsString"),
            Comparison::Matches => Some("assertRegExp"),
            Comparison::Exists | Comparison::NotExists => None,
        }
    }
}

impl NodeTranspiler<Assertion> for ValueComparisonTranspiler {
    fn name(&self) -> &'static str {
        "value-comparison"
    }

    fn handles(&self, node: &Assertion) -> bool {
        matches!(
            node,
            Assertion::Comparison(assertion)
                if Self::method(assertion.comparison).is_some()
                    && is_assignable(&assertion.examined)
                    && is_assignable(&assertion.expected)
        )
    }

    fn transpile(&self, node: &Assertion) -> TranspileResult<CompilableSource> {
        let Assertion::Comparison(assertion) = node else {
            return Err(TranspileError::non_transpilable_model(node));
        };
        let Some(method) = Self::method(assertion.comparison) else {
            return Err(TranspileError::non_transpilable_model(node));
        };

        let mut scope = PlaceholderSet::new();
        let examined_target = scope.create_fresh(EXAMINED_VALUE);
        let expected_target = scope.create_fresh(EXPECTED_VALUE);

        let examined = self
            .factory
            .create_for_value(&assertion.examined, examined_target.clone(), &mut scope)
            .map_err(|err| err.into_model_error(node))?;
        let expected = self
            .factory
            .create_for_value(&assertion.expected, expected_target.clone(), &mut scope)
            .map_err(|err| err.into_model_error(node))?;
        let call = assertion_call::comparison(method, &expected_target, &examined_target, &mut scope);

        Ok(CompilableSource::concat([
            examined.into_source(),
            expected.into_source(),
            call,
        ]))
    }
}
