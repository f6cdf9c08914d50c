//! Assigning element lookups, attributes and scalar values to placeholders.

use std::sync::Arc;

use thyme_source::{CompilableSource, PlaceholderSet, VariableAssignment, VariablePlaceholder};
use thyme_types::{AttributeIdentifier, DomIdentifier, Value};

use super::navigator::{self, NavigatorMethod};
use super::{assertion, element, element_locator, exporting};
use crate::config::TranspilerConfig;
use crate::dispatch::Dispatcher;
use crate::error::{TranspileError, TranspileResult};
use crate::escape::single_quoted;
use crate::names::{COLLECTION, ELEMENT, ELEMENT_LOCATOR, HAS};

/// Whether `attribute` names an attribute at all.
pub fn has_attribute_name(attribute: &AttributeIdentifier) -> bool {
    !attribute.attribute_name.trim().is_empty()
}

/// Values read from the browser environment rather than the DOM.
pub fn is_scalar_object(value: &Value) -> bool {
    matches!(
        value,
        Value::BrowserProperty(_) | Value::EnvironmentParameter(_) | Value::PageProperty(_)
    )
}

/// Values `create_for_value` can assign.
pub fn is_assignable(value: &Value) -> bool {
    match value {
        Value::Literal(_) | Value::ElementReference(_) => true,
        Value::AttributeReference(attribute) => has_attribute_name(attribute),
        other => is_scalar_object(other),
    }
}

pub struct VariableAssignmentFactory {
    values: Arc<Dispatcher<Value>>,
    config: Arc<TranspilerConfig>,
}

impl VariableAssignmentFactory {
    pub fn new(values: Arc<Dispatcher<Value>>, config: Arc<TranspilerConfig>) -> Self {
        Self { values, config }
    }

    pub fn config(&self) -> &TranspilerConfig {
        &self.config
    }

    // ── Element lookups ──────────────────────────────────────────────────────

    /// Bind the single element matched by `identifier` to `target`, after
    /// asserting that it exists.
    pub fn create_for_element(
        &self,
        identifier: &DomIdentifier,
        target: VariablePlaceholder,
        scope: &mut PlaceholderSet,
    ) -> VariableAssignment {
        self.create_for_lookup(identifier, target, NavigatorMethod::HasOne, NavigatorMethod::FindOne, scope)
    }

    /// Bind every element matched by `identifier` to `target`, after
    /// asserting that at least one exists.
    pub fn create_for_element_collection(
        &self,
        identifier: &DomIdentifier,
        target: VariablePlaceholder,
        scope: &mut PlaceholderSet,
    ) -> VariableAssignment {
        self.create_for_lookup(identifier, target, NavigatorMethod::Has, NavigatorMethod::Find, scope)
    }

    /// ```text
    /// {{ ELEMENT_LOCATOR }} = new ElementLocator(...)
    /// {{ HAS }} = {{ NAVIGATOR }}->has({{ ELEMENT_LOCATOR }})
    /// {{ TEST_CONTEXT }}->assertTrue({{ HAS }})
    /// <target> = {{ NAVIGATOR }}->find({{ ELEMENT_LOCATOR }})
    /// ```
    fn create_for_lookup(
        &self,
        identifier: &DomIdentifier,
        target: VariablePlaceholder,
        has: NavigatorMethod,
        find: NavigatorMethod,
        scope: &mut PlaceholderSet,
    ) -> VariableAssignment {
        let locator = scope.create_fresh(ELEMENT_LOCATOR);
        let has_target = scope.create_fresh(HAS);

        let locator_assignment =
            VariableAssignment::new(locator.clone(), element_locator::constructor(identifier));
        let arguments = element_locator::arguments_for_placeholder(&locator, identifier);

        let has_assignment =
            VariableAssignment::new(has_target, navigator::call(has, arguments.clone(), scope));
        let existence_check = assertion::value_is_true(has_assignment, scope);
        let find_call = navigator::call(find, arguments, scope);

        VariableAssignment::new(target, find_call)
            .with_predecessors([locator_assignment.into_source(), existence_check])
    }

    /// `<target> = {{ ELEMENT }}->getAttribute('<name>')` after an element
    /// lookup.
    pub fn create_for_attribute(
        &self,
        attribute: &AttributeIdentifier,
        target: VariablePlaceholder,
        scope: &mut PlaceholderSet,
    ) -> TranspileResult<VariableAssignment> {
        if !has_attribute_name(attribute) {
            return Err(TranspileError::NonTranspilableValue {
                value: attribute.to_string(),
            });
        }

        let element_target = scope.create_fresh(ELEMENT);
        let element_assignment = self.create_for_element(&attribute.element, element_target.clone(), scope);
        let access = exporting(
            format!(
                "{element_target}->getAttribute('{}')",
                single_quoted(&attribute.attribute_name)
            ),
            [&element_target],
        );

        Ok(VariableAssignment::new(target, access).with_predecessors([element_assignment.into_source()]))
    }

    /// `<target> = {{ INSPECTOR }}->getValue({{ COLLECTION }})` after a
    /// collection lookup.
    pub fn create_for_element_collection_value(
        &self,
        identifier: &DomIdentifier,
        target: VariablePlaceholder,
        scope: &mut PlaceholderSet,
    ) -> VariableAssignment {
        let collection = scope.create_fresh(COLLECTION);
        let collection_assignment =
            self.create_for_element_collection(identifier, collection.clone(), scope);
        let get_value = element::get_value(&collection, scope);

        VariableAssignment::new(target, get_value)
            .with_predecessors([collection_assignment.into_source()])
    }

    // ── Scalars ──────────────────────────────────────────────────────────────

    /// Assign a literal or environment-derived value. Environment parameters
    /// may be absent and are coalesced with `default`.
    pub fn create_for_scalar(
        &self,
        value: &Value,
        target: VariablePlaceholder,
        default: &str,
    ) -> TranspileResult<VariableAssignment> {
        if !matches!(value, Value::Literal(_)) && !is_scalar_object(value) {
            return Err(TranspileError::non_transpilable_value(value));
        }

        let mut access = self.values.transpile(value)?;
        if matches!(value, Value::EnvironmentParameter(_)) {
            access = access.map_final_statement(|statement| format!("{statement} ?? {default}"));
        }

        Ok(VariableAssignment::new(target, access))
    }

    // ── Values ───────────────────────────────────────────────────────────────

    /// Assign `value` for use, cast with the configured value cast.
    pub fn create_for_value(
        &self,
        value: &Value,
        target: VariablePlaceholder,
        scope: &mut PlaceholderSet,
    ) -> TranspileResult<VariableAssignment> {
        self.create_for_value_as(
            value,
            target,
            &self.config.value_cast,
            &self.config.absent_default,
            scope,
        )
    }

    /// Assign `value` and then cast it in place: `<target> = (<cast>) <target>`.
    pub fn create_for_value_as(
        &self,
        value: &Value,
        target: VariablePlaceholder,
        cast: &str,
        default: &str,
        scope: &mut PlaceholderSet,
    ) -> TranspileResult<VariableAssignment> {
        let assignment = match value {
            Value::ElementReference(identifier) => {
                self.create_for_element_collection_value(identifier, target.clone(), scope)
            }
            Value::AttributeReference(attribute) => {
                self.create_for_attribute(attribute, target.clone(), scope)?
            }
            scalar => self.create_for_scalar(scalar, target.clone(), default)?,
        };

        let cast_statement = CompilableSource::statement(format!("({cast}) {target}"));
        Ok(VariableAssignment::new(target, cast_statement).with_predecessors([assignment.into_source()]))
    }

    /// Assign a boolean stating whether `value` is present.
    ///
    /// Elements use a direct `has` check; attributes and environment values
    /// compare the assigned value against `null`.
    pub fn create_for_value_existence(
        &self,
        value: &Value,
        target: VariablePlaceholder,
        scope: &mut PlaceholderSet,
    ) -> TranspileResult<VariableAssignment> {
        let assignment = match value {
            Value::ElementReference(identifier) => {
                let has_call = navigator::call_for_identifier(NavigatorMethod::Has, identifier, scope);
                return Ok(VariableAssignment::new(target, has_call));
            }
            Value::AttributeReference(attribute) => {
                self.create_for_attribute(attribute, target.clone(), scope)?
            }
            scalar if is_scalar_object(scalar) => {
                self.create_for_scalar(scalar, target.clone(), &self.config.absent_default)?
            }
            other => return Err(TranspileError::non_transpilable_value(other)),
        };

        let comparison = CompilableSource::statement(format!("{target} !== null"));
        Ok(VariableAssignment::new(target, comparison).with_predecessors([assignment.into_source()]))
    }
}
