//! Identifier rules: locate an element, or read one of its attributes.

use thyme_source::{CompilableSource, CompilationMetadata, PlaceholderSet};
use thyme_types::Identifier;

use crate::call_factory::navigator::{self, NavigatorMethod};
use crate::call_factory::variable_assignment::has_attribute_name;
use crate::dispatch::{Dispatcher, NodeTranspiler};
use crate::error::{TranspileError, TranspileResult};
use crate::escape::single_quoted;

pub fn dispatcher() -> Dispatcher<Identifier> {
    Dispatcher::new(vec![
        Box::new(ElementIdentifierTranspiler),
        Box::new(AttributeIdentifierTranspiler),
    ])
}

/// `{{ NAVIGATOR }}->findOne(<locators>)`
pub struct ElementIdentifierTranspiler;

impl NodeTranspiler<Identifier> for ElementIdentifierTranspiler {
    fn name(&self) -> &'static str {
        "element-identifier"
    }

    fn handles(&self, node: &Identifier) -> bool {
        matches!(node, Identifier::Element(_))
    }

    fn transpile(&self, node: &Identifier) -> TranspileResult<CompilableSource> {
        let Identifier::Element(identifier) = node else {
            return Err(TranspileError::non_transpilable_model(node));
        };
        let mut scope = PlaceholderSet::new();
        Ok(navigator::call_for_identifier(NavigatorMethod::FindOne, identifier, &mut scope))
    }
}

/// `{{ NAVIGATOR }}->findOne(<locators>)->getAttribute('<name>')`
pub struct AttributeIdentifierTranspiler;

impl NodeTranspiler<Identifier> for AttributeIdentifierTranspiler {
    fn name(&self) -> &'static str {
        "attribute-identifier"
    }

    fn handles(&self, node: &Identifier) -> bool {
        matches!(node, Identifier::Attribute(attribute) if has_attribute_name(attribute))
    }

    fn transpile(&self, node: &Identifier) -> TranspileResult<CompilableSource> {
        let Identifier::Attribute(attribute) = node else {
            return Err(TranspileError::non_transpilable_model(node));
        };
        if !has_attribute_name(attribute) {
            return Err(TranspileError::non_transpilable_model(node));
        }

        let mut scope = PlaceholderSet::new();
        let find_call =
            navigator::call_for_identifier(NavigatorMethod::FindOne, &attribute.element, &mut scope);
        Ok(find_call.extend(
            |call| format!("{call}->getAttribute('{}')", single_quoted(&attribute.attribute_name)),
            &CompilationMetadata::new(),
        ))
    }
}
